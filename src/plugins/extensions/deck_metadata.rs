use async_trait::async_trait;
use log::debug;

use crate::deck::DeckDocument;
use crate::errors::Result;
use crate::models::presentation::PresentationDto;
use crate::plugins::{Plugin, PluginCapabilities, PluginContext};

/// Writes title, author, subject and company into the generated document.
///
/// Values set on the plugin win; unset ones fall back to the presentation metadata
/// read from the source document.
#[derive(Debug, Clone, Default)]
pub struct DeckMetadataPlugin {
    title: Option<String>,
    author: Option<String>,
    subject: Option<String>,
    company: Option<String>,
}

impl DeckMetadataPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn set_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn set_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

#[async_trait]
impl Plugin for DeckMetadataPlugin {
    fn name(&self) -> &str {
        "deck-metadata"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().with_after_generate()
    }

    async fn after_generate(
        &self,
        document: &mut DeckDocument,
        presentation: &PresentationDto,
        _ctx: &mut PluginContext,
    ) -> Result<()> {
        let source = &presentation.metadata;
        let properties = &mut document.properties;
        properties.title = self.title.clone().or_else(|| source.title.clone());
        properties.author = self.author.clone().or_else(|| source.author.clone());
        properties.subject = self.subject.clone().or_else(|| source.subject.clone());
        properties.company = self.company.clone().or_else(|| source.company.clone());
        if properties.created_at.is_none() {
            properties.created_at = source.created_at;
        }
        debug!("deck-metadata: title {:?}", properties.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{DeckLayout, DeckProperties};
    use crate::models::common::Dimensions;
    use crate::models::presentation::PresentationMetadata;

    #[tokio::test]
    async fn test_plugin_values_win_over_source() {
        let mut document = DeckDocument {
            layout: DeckLayout {
                name: "CUSTOM".into(),
                width: 10.0,
                height: 5.0,
            },
            properties: DeckProperties::default(),
            slides: vec![],
        };
        let presentation = PresentationDto {
            slides: vec![],
            metadata: PresentationMetadata {
                title: Some("From HTML".into()),
                author: Some("Ada".into()),
                ..Default::default()
            },
            dimensions: Dimensions::new(960.0, 480.0),
        };

        DeckMetadataPlugin::new()
            .set_title("Board update")
            .set_company("Acme")
            .after_generate(&mut document, &presentation, &mut PluginContext::default())
            .await
            .unwrap();

        assert_eq!(document.properties.title.as_deref(), Some("Board update"));
        assert_eq!(document.properties.author.as_deref(), Some("Ada"));
        assert_eq!(document.properties.company.as_deref(), Some("Acme"));
        assert_eq!(document.properties.subject, None);
    }
}
