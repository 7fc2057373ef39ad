use log::debug;

use super::{ParseContext, Plugin, PluginCapabilities, PluginContext};
use crate::config::ParserConfig;
use crate::deck::DeckDocument;
use crate::dom::snapshot::NodeRef;
use crate::errors::{ConversionError, Result};
use crate::models::elements::ElementDto;
use crate::models::page::SlideDto;
use crate::models::presentation::PresentationDto;

struct Registered {
    plugin: Box<dyn Plugin>,
    capabilities: PluginCapabilities,
}

/// Ordered plugin registry. Registration order is execution order for every hook kind.
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Registered>,
}

impl PluginManager {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a plugin to the registry.
    ///
    /// # Errors
    ///
    /// `ConversionError::DuplicatePlugin` if a plugin with the same name is registered.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<()> {
        let name = plugin.name().to_string();
        if self.plugins.iter().any(|r| r.plugin.name() == name) {
            return Err(ConversionError::DuplicatePlugin { name });
        }
        let capabilities = plugin.capabilities();
        debug!("Registered plugin '{}' ({:?})", name, capabilities);
        self.plugins.push(Registered {
            plugin,
            capabilities,
        });
        Ok(())
    }

    /// Removes a plugin by name. Unknown names are ignored.
    pub fn unregister(&mut self, name: &str) {
        self.plugins.retain(|r| r.plugin.name() != name);
    }

    /// Names of the registered plugins, in execution order.
    pub fn plugins(&self) -> Vec<&str> {
        self.plugins.iter().map(|r| r.plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Chains every `before_parse` hook; each receives the previous hook's output.
    pub async fn execute_before_parse(
        &self,
        html: String,
        config: &ParserConfig,
        ctx: &mut PluginContext,
    ) -> Result<String> {
        let mut html = html;
        for r in self.plugins.iter().filter(|r| r.capabilities.before_parse) {
            html = r.plugin.before_parse(html, config, ctx).await?;
        }
        Ok(html)
    }

    /// Returns the element produced by the first plugin that handles the node's type and
    /// returns something. Later plugins are not called once one has produced an element.
    pub async fn execute_on_parse(
        &self,
        node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        for r in &self.plugins {
            if !r.capabilities.handles_type(parse.element_type) {
                continue;
            }
            if let Some(element) = r.plugin.on_parse(node, parse, ctx).await? {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }

    /// Chains every `on_slide` hook.
    pub async fn execute_on_slide(
        &self,
        slide: SlideDto,
        ctx: &mut PluginContext,
    ) -> Result<SlideDto> {
        let mut slide = slide;
        for r in self.plugins.iter().filter(|r| r.capabilities.on_slide) {
            slide = r.plugin.on_slide(slide, ctx).await?;
        }
        Ok(slide)
    }

    /// Runs every `after_generate` hook for its side effects on the document.
    pub async fn execute_after_generate(
        &self,
        document: &mut DeckDocument,
        presentation: &PresentationDto,
        ctx: &mut PluginContext,
    ) -> Result<()> {
        for r in self.plugins.iter().filter(|r| r.capabilities.after_generate) {
            r.plugin.after_generate(document, presentation, ctx).await?;
        }
        Ok(())
    }
}
