//! The boundary to whatever lays out the HTML (a headless browser, a test fixture, ...).

use async_trait::async_trait;
use log::debug;

use super::snapshot::DomSnapshot;
use crate::errors::Result;
use crate::models::common::Dimensions;

/// Renders HTML at a viewport size and returns the laid-out document.
///
/// Implementations wait until the document has reached a stable load state before
/// returning; that wait is the suspension point of this call.
#[async_trait]
pub trait RenderingSurface: Send + Sync {
    async fn render(&self, html: &str, viewport: Dimensions) -> Result<DomSnapshot>;
}

/// A surface that returns a pre-rendered snapshot regardless of its input.
/// Used with snapshots captured by an external browser driver.
#[derive(Debug, Clone)]
pub struct StaticSurface {
    snapshot: DomSnapshot,
}

impl StaticSurface {
    pub fn new(snapshot: DomSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(DomSnapshot::from_json_str(json)?))
    }
}

#[async_trait]
impl RenderingSurface for StaticSurface {
    async fn render(&self, html: &str, viewport: Dimensions) -> Result<DomSnapshot> {
        debug!(
            "Static surface serving {} nodes for {} bytes of HTML at {}x{}",
            self.snapshot.len(),
            html.len(),
            viewport.width,
            viewport.height
        );
        Ok(self.snapshot.clone())
    }
}
