//! The plugin contract and the state shared between hooks of one conversion.
//!
//! A plugin declares its hooks once, through [`PluginCapabilities`], when it is
//! registered with the [`PluginManager`]. The manager then only calls the hooks a plugin
//! declared, in registration order.

pub mod builtin;
pub mod extensions;
pub mod manager;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ParserConfig;
use crate::deck::DeckDocument;
use crate::dom::snapshot::{NodeId, NodeRef, Rect};
use crate::dom::style::ComputedStyle;
use crate::errors::Result;
use crate::extractors::position::relative_position;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::common::{ElementType, Position};
use crate::models::elements::ElementDto;
use crate::models::page::SlideDto;
use crate::models::presentation::PresentationDto;

pub use builtin::default_core_plugins;
pub use extensions::{CustomFontPlugin, DeckMetadataPlugin};
pub use manager::PluginManager;

/// The hooks a plugin implements and the element types its `on_parse` handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginCapabilities {
    pub handles: Vec<ElementType>,
    pub before_parse: bool,
    pub on_slide: bool,
    pub after_generate: bool,
}

impl PluginCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element types passed to `on_parse`.
    pub fn parsing(mut self, types: &[ElementType]) -> Self {
        self.handles = types.to_vec();
        self
    }

    pub fn with_before_parse(mut self) -> Self {
        self.before_parse = true;
        self
    }

    pub fn with_on_slide(mut self) -> Self {
        self.on_slide = true;
        self
    }

    pub fn with_after_generate(mut self) -> Self {
        self.after_generate = true;
        self
    }

    pub fn on_parse(&self) -> bool {
        !self.handles.is_empty()
    }

    pub fn handles_type(&self, element_type: ElementType) -> bool {
        self.handles.contains(&element_type)
    }
}

/// Per-node record built by the parser for each (node, element type) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseContext {
    pub element_type: ElementType,
    pub tag_name: String,
    pub style: ComputedStyle,
    /// Viewport-relative bounding rectangle of the node.
    pub rect: Rect,
    pub slide_index: usize,
    pub slide_root: NodeId,
    pub slide_rect: Rect,
}

impl ParseContext {
    /// Builds the context of `node` on the slide rooted at `slide_root`.
    pub fn new(
        node: &NodeRef<'_>,
        element_type: ElementType,
        slide_index: usize,
        slide_root: &NodeRef<'_>,
    ) -> Self {
        Self {
            element_type,
            tag_name: node.tag_name().to_string(),
            style: node.style().clone(),
            rect: node.rect(),
            slide_index,
            slide_root: slide_root.id(),
            slide_rect: slide_root.rect(),
        }
    }

    /// Top-left corner of the node relative to its slide.
    pub fn position(&self) -> Position {
        relative_position(&self.rect, &self.slide_rect)
    }

    pub fn is_slide_root(&self, node: &NodeRef<'_>) -> bool {
        node.id() == self.slide_root
    }
}

/// Mutable state of one conversion: free-form metadata, a typed store that plugins use to
/// pass data between their own hooks, the identifier source and the parser options.
///
/// Created at the start of a conversion and dropped at its end.
pub struct PluginContext {
    pub metadata: IndexMap<String, Value>,
    pub config: ParserConfig,
    ids: Arc<dyn IdGenerator>,
    state: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContext")
            .field("metadata", &self.metadata)
            .field("config", &self.config)
            .field("state", &self.state.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for PluginContext {
    fn default() -> Self {
        Self::new(ParserConfig::default(), Arc::new(UuidGenerator))
    }
}

impl PluginContext {
    pub fn new(config: ParserConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            metadata: IndexMap::new(),
            config,
            ids,
            state: HashMap::new(),
        }
    }

    /// A fresh element identifier, e.g. `text-…`.
    pub fn next_id(&self, prefix: &str) -> String {
        self.ids.next_id(prefix)
    }

    pub fn ids(&self) -> Arc<dyn IdGenerator> {
        Arc::clone(&self.ids)
    }

    pub fn state<T: Any>(&self, key: &str) -> Option<&T> {
        self.state.get(key)?.downcast_ref::<T>()
    }

    pub fn state_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.state.get_mut(key)?.downcast_mut::<T>()
    }

    pub fn set_state<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.state.insert(key.into(), Box::new(value));
    }

    /// Removes and returns a stored value, if it has type `T`.
    pub fn take_state<T: Any>(&mut self, key: &str) -> Option<T> {
        let boxed = self.state.remove(key)?;
        match boxed.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(boxed) => {
                self.state.insert(key.to_string(), boxed);
                None
            }
        }
    }
}

/// An extension point of the conversion pipeline.
///
/// Every hook has a pass-through default. Only the hooks declared in
/// [`Plugin::capabilities`] are ever called.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique name within a registry, e.g. `core:text`.
    fn name(&self) -> &str;

    fn capabilities(&self) -> PluginCapabilities;

    /// Rewrites or inspects the HTML before it is rendered.
    async fn before_parse(
        &self,
        html: String,
        _config: &ParserConfig,
        _ctx: &mut PluginContext,
    ) -> Result<String> {
        Ok(html)
    }

    /// Produces an element for a classified node, or `None` to let the next plugin try.
    async fn on_parse(
        &self,
        _node: NodeRef<'_>,
        _parse: &ParseContext,
        _ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        Ok(None)
    }

    /// Post-processes an assembled slide.
    async fn on_slide(&self, slide: SlideDto, _ctx: &mut PluginContext) -> Result<SlideDto> {
        Ok(slide)
    }

    /// Runs against the generated document before it is written.
    async fn after_generate(
        &self,
        _document: &mut DeckDocument,
        _presentation: &PresentationDto,
        _ctx: &mut PluginContext,
    ) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn test_capabilities_builder() {
        let caps = PluginCapabilities::new()
            .parsing(&[ElementType::Text])
            .with_on_slide();
        assert!(caps.on_parse());
        assert!(caps.handles_type(ElementType::Text));
        assert!(!caps.handles_type(ElementType::Image));
        assert!(caps.on_slide);
        assert!(!caps.before_parse);
        assert!(!PluginCapabilities::new().on_parse());
    }

    #[test]
    fn test_typed_state() {
        let mut ctx = PluginContext::new(ParserConfig::default(), Arc::new(SequentialIds::new()));
        ctx.set_state("counter", 1usize);
        *ctx.state_mut::<usize>("counter").unwrap() += 1;
        assert_eq!(ctx.state::<usize>("counter"), Some(&2));
        assert!(ctx.state::<String>("counter").is_none());
        assert!(ctx.take_state::<String>("counter").is_none());
        assert_eq!(ctx.take_state::<usize>("counter"), Some(2));
        assert!(ctx.state::<usize>("counter").is_none());
        assert_eq!(ctx.next_id("text"), "text-1");
    }
}
