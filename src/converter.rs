//! The conversion pipeline: load HTML, convert it into slides, export a deck.

use chrono::{DateTime, Utc};
use log::{debug, info, log, Level};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::sync::Arc;

use crate::config::ConverterConfig;
use crate::deck::{DeckDocument, DocumentBackend, JsonBackend};
use crate::dom::surface::RenderingSurface;
use crate::errors::{ConversionError, Result};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::page::SlideDto;
use crate::models::presentation::{PresentationDto, PresentationMetadata};
use crate::parser::{ParserStrategy, SurfaceParser};
use crate::plugins::{default_core_plugins, Plugin, PluginContext, PluginManager};
use crate::serializer::{Serializer, Units};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="author"]"#).expect("valid selector"));
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).expect("valid selector"));

/// Title, author and subject declared in the document head.
pub fn read_document_metadata(html: &str) -> PresentationMetadata {
    let document = Html::parse_document(html);
    let non_empty = |s: String| {
        let s = s.trim().to_string();
        (!s.is_empty()).then_some(s)
    };
    let meta = |selector: &Selector| {
        document
            .select(selector)
            .next()
            .and_then(|m| m.value().attr("content"))
            .map(str::to_string)
            .and_then(non_empty)
    };
    PresentationMetadata {
        title: document
            .select(&TITLE)
            .next()
            .map(|t| t.text().collect::<String>())
            .and_then(non_empty),
        author: meta(&AUTHOR),
        subject: meta(&DESCRIPTION),
        ..Default::default()
    }
}

/// Builder for creating a [`Converter`].
/// Either a parser or a rendering surface must be set.
#[derive(Default)]
pub struct ConverterBuilder {
    config: ConverterConfig,
    parser: Option<Arc<dyn ParserStrategy>>,
    surface: Option<Arc<dyn RenderingSurface>>,
    backend: Option<Arc<dyn DocumentBackend>>,
    core_plugins: Option<Vec<Box<dyn Plugin>>>,
    extension_plugins: Vec<Box<dyn Plugin>>,
    ids: Option<Arc<dyn IdGenerator>>,
    created_at: Option<DateTime<Utc>>,
    units: Units,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Renders through `surface` with the standard slide walk.
    pub fn set_surface(mut self, surface: Arc<dyn RenderingSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Replaces the standard slide walk. Takes precedence over a surface.
    pub fn set_parser(mut self, parser: Arc<dyn ParserStrategy>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Where `export` writes the deck. Defaults to [`JsonBackend`].
    pub fn set_backend(mut self, backend: Arc<dyn DocumentBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Replaces the default core plugin set.
    pub fn core_plugins(mut self, plugins: Vec<Box<dyn Plugin>>) -> Self {
        self.core_plugins = Some(plugins);
        self
    }

    /// Plugins registered after the core set.
    pub fn extension_plugins(mut self, plugins: Vec<Box<dyn Plugin>>) -> Self {
        self.extension_plugins = plugins;
        self
    }

    pub fn set_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Fixes the creation time recorded in the presentation metadata.
    pub fn set_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn set_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Builds the `Converter`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for an unusable configuration or when neither a parser nor a
    /// surface was set; `DuplicatePlugin` when two plugins share a name.
    pub fn build(self) -> Result<Converter> {
        self.config.validate()?;
        let parser: Arc<dyn ParserStrategy> = match (self.parser, self.surface) {
            (Some(parser), _) => parser,
            (None, Some(surface)) => Arc::new(SurfaceParser::new(surface)),
            (None, None) => {
                return Err(ConversionError::InvalidConfig(
                    "a parser or a rendering surface is required".to_string(),
                ))
            }
        };

        let mut manager = PluginManager::new();
        let core = self.core_plugins.unwrap_or_else(default_core_plugins);
        for plugin in core.into_iter().chain(self.extension_plugins) {
            manager.register(plugin)?;
        }

        Ok(Converter {
            config: self.config,
            manager,
            parser,
            backend: self.backend.unwrap_or_else(|| Arc::new(JsonBackend::default())),
            serializer: Serializer::new().with_units(self.units),
            ids: self.ids.unwrap_or_else(|| Arc::new(UuidGenerator)),
            created_at: self.created_at,
            source: None,
            presentation: None,
            context: None,
        })
    }
}

/// Converts one HTML document at a time: `load`, then `convert`, then `export`.
pub struct Converter {
    config: ConverterConfig,
    manager: PluginManager,
    parser: Arc<dyn ParserStrategy>,
    backend: Arc<dyn DocumentBackend>,
    serializer: Serializer,
    ids: Arc<dyn IdGenerator>,
    created_at: Option<DateTime<Utc>>,
    source: Option<String>,
    presentation: Option<PresentationDto>,
    context: Option<PluginContext>,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Registers an additional plugin after the ones already present.
    pub fn use_plugin(&mut self, plugin: Box<dyn Plugin>) -> Result<&mut Self> {
        self.manager.register(plugin)?;
        Ok(self)
    }

    pub fn unregister(&mut self, name: &str) -> &mut Self {
        self.manager.unregister(name);
        self
    }

    /// Names of the registered plugins, in execution order.
    pub fn plugins(&self) -> Vec<&str> {
        self.manager.plugins()
    }

    /// Sets the HTML to convert, discarding any previous result.
    pub fn load(&mut self, html: impl Into<String>) -> &mut Self {
        self.source = Some(html.into());
        self.presentation = None;
        self.context = None;
        self
    }

    fn phase_level(&self) -> Level {
        if self.config.debug {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Runs the parse pipeline and stores the resulting presentation.
    ///
    /// # Errors
    ///
    /// `MissingSource` before `load`; `NoSlidesFound` when the selector matches nothing;
    /// any error raised by the surface or a plugin hook.
    pub async fn convert(&mut self) -> Result<&PresentationDto> {
        let source = self.source.clone().ok_or(ConversionError::MissingSource)?;
        let level = self.phase_level();
        let parser_config = self.config.parser_config();
        let mut ctx = PluginContext::new(parser_config.clone(), Arc::clone(&self.ids));

        let html = self
            .manager
            .execute_before_parse(source, &parser_config, &mut ctx)
            .await?;
        let head = read_document_metadata(&html);

        let parsed = self.parser.parse(&html, &parser_config).await?;
        log!(
            level,
            "before on_parse: {} slide(s), {} classified node(s)",
            parsed.slides.len(),
            parsed.nodes.len()
        );

        let mut slides: Vec<SlideDto> = parsed
            .slides
            .iter()
            .map(|s| {
                let mut slide = SlideDto::new(self.ids.next_id("slide"), s.index);
                slide.background = s.background.clone();
                slide
            })
            .collect();

        for entry in &parsed.nodes {
            let Some(node) = parsed.node(entry) else {
                continue;
            };
            let Some(slide) = slides.get_mut(entry.slide_index) else {
                continue;
            };
            if let Some(element) = self
                .manager
                .execute_on_parse(node, &entry.context, &mut ctx)
                .await?
            {
                slide.elements.push(element);
            }
        }
        log!(
            level,
            "after on_parse: {} element(s)",
            slides.iter().map(|s| s.elements.len()).sum::<usize>()
        );

        let mut processed = Vec::with_capacity(slides.len());
        for slide in slides {
            processed.push(self.manager.execute_on_slide(slide, &mut ctx).await?);
        }
        log!(
            level,
            "after on_slide: {} element(s)",
            processed.iter().map(|s| s.elements.len()).sum::<usize>()
        );

        let metadata = PresentationMetadata {
            created_at: Some(self.created_at.unwrap_or_else(Utc::now)),
            plugins: self.manager.plugins().iter().map(|n| n.to_string()).collect(),
            ..head
        };
        self.context = Some(ctx);
        let presentation = self.presentation.insert(PresentationDto {
            slides: processed,
            metadata,
            dimensions: self.config.dimensions,
        });
        info!(
            "Converted {} slide(s) with {} element(s)",
            presentation.slides.len(),
            presentation.element_count()
        );
        Ok(&*presentation)
    }

    /// The result of the last `convert`.
    pub fn presentation(&self) -> Result<&PresentationDto> {
        self.presentation
            .as_ref()
            .ok_or(ConversionError::MissingPresentation)
    }

    /// Serializes the presentation and runs the `after_generate` hooks against it.
    pub async fn generate(&mut self) -> Result<DeckDocument> {
        let presentation = self
            .presentation
            .as_ref()
            .ok_or(ConversionError::MissingPresentation)?;
        if presentation.slides.is_empty() {
            return Err(ConversionError::NoSlidesFound {
                selector: self.config.selector.clone(),
            });
        }

        let mut document = self.serializer.serialize(presentation);
        let ctx = self.context.get_or_insert_with(|| {
            PluginContext::new(self.config.parser_config(), Arc::clone(&self.ids))
        });
        self.manager
            .execute_after_generate(&mut document, presentation, ctx)
            .await?;
        debug!(
            "Generated {} slide(s) with {} object(s)",
            document.slides.len(),
            document.object_count()
        );
        Ok(document)
    }

    /// Generates the deck and writes it through the backend.
    pub async fn export(&mut self) -> Result<Vec<u8>> {
        let document = self.generate().await?;
        self.backend.write(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::Rect;
    use crate::dom::surface::StaticSurface;
    use crate::ids::SequentialIds;
    use crate::plugins::DeckMetadataPlugin;
    use chrono::TimeZone;

    fn converter() -> Converter {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let slide = b
            .element(root, "div", Rect::new(0.0, 0.0, 992.0, 558.0))
            .class("slide")
            .id();
        let h1 = b.element(slide, "h1", Rect::new(20.0, 20.0, 400.0, 40.0)).id();
        b.text(h1, "Title");
        Converter::builder()
            .set_surface(Arc::new(StaticSurface::new(b.build())))
            .set_ids(Arc::new(SequentialIds::new()))
            .set_created_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .extension_plugins(vec![Box::new(DeckMetadataPlugin::new().set_company("Acme"))])
            .build()
            .unwrap()
    }

    #[test]
    fn test_reads_head_metadata() {
        let metadata = read_document_metadata(
            r#"<html><head><title> Q3 Review </title><meta name="author" content="Dana"><meta name="description" content="Results"></head><body></body></html>"#,
        );
        assert_eq!(metadata.title.as_deref(), Some("Q3 Review"));
        assert_eq!(metadata.author.as_deref(), Some("Dana"));
        assert_eq!(metadata.subject.as_deref(), Some("Results"));
    }

    #[tokio::test]
    async fn test_preconditions() {
        let mut converter = converter();
        assert!(matches!(
            converter.convert().await.unwrap_err(),
            ConversionError::MissingSource
        ));
        assert!(matches!(
            converter.presentation().unwrap_err(),
            ConversionError::MissingPresentation
        ));
        assert!(matches!(
            converter.export().await.unwrap_err(),
            ConversionError::MissingPresentation
        ));
    }

    #[tokio::test]
    async fn test_convert_and_export() {
        let mut converter = converter();
        converter.load("<html><head><title>Deck</title></head></html>");
        let presentation = converter.convert().await.unwrap();
        assert_eq!(presentation.slides.len(), 1);
        assert_eq!(presentation.slides[0].id, "slide-1");
        assert_eq!(presentation.slides[0].elements.len(), 1);
        assert_eq!(presentation.metadata.title.as_deref(), Some("Deck"));
        assert_eq!(presentation.metadata.plugins.last().map(String::as_str), Some("deck-metadata"));

        let document = converter.generate().await.unwrap();
        assert_eq!(document.properties.company.as_deref(), Some("Acme"));
        assert_eq!(document.properties.title.as_deref(), Some("Deck"));

        let bytes = converter.export().await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["slides"][0]["objects"][0]["kind"], "text");
    }

    #[test]
    fn test_builder_requires_a_parser() {
        let err = Converter::builder().build().err().unwrap();
        assert!(matches!(err, ConversionError::InvalidConfig(_)));
    }

    #[test]
    fn test_duplicate_extension_fails_build() {
        let result = Converter::builder()
            .set_surface(Arc::new(StaticSurface::new(SnapshotBuilder::new().build())))
            .extension_plugins(vec![
                Box::new(DeckMetadataPlugin::new()),
                Box::new(DeckMetadataPlugin::new()),
            ])
            .build();
        assert!(matches!(
            result.err(),
            Some(ConversionError::DuplicatePlugin { name }) if name == "deck-metadata"
        ));
    }
}
