use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::errors::Result;
use crate::extractors::icon::IconSource;

/// Fetches icon glyph SVGs over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpIconSource {
    client: reqwest::Client,
}

impl HttpIconSource {
    /// Uses an existing client, sharing its connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    /// Fetches an SVG document.
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL of the SVG file.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the server answers with a non-success status, the body otherwise.
    /// Transport failures are returned as `ConversionError::Network`.
    async fn fetch_svg(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "image/svg+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                debug!("Icon request to {url} returned {status}");
            }
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}
