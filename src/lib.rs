//! Converts rendered HTML slides into an editable, structured slide deck.
//!
//! The pipeline renders the HTML through a [`RenderingSurface`], classifies every node of
//! each slide root, lets the registered [`Plugin`]s turn classified nodes into elements and
//! post-process whole slides, then maps the result onto a [`DeckDocument`] that a
//! [`DocumentBackend`] writes out.

pub mod client;
pub mod config;
pub mod constants;
pub mod converter;
pub mod deck;
pub mod dom;
pub mod errors;
pub mod extractors;
pub mod ids;
pub mod models;
pub mod parser;
pub mod plugins;
pub mod serializer;

pub use client::HttpIconSource;
pub use config::{ConverterConfig, ParserConfig};
pub use converter::{Converter, ConverterBuilder};
pub use deck::{DeckDocument, DocumentBackend, JsonBackend, SlideObject};
pub use dom::{DomSnapshot, RenderingSurface, SnapshotBuilder, StaticSurface};
pub use errors::{ConversionError, Result};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use models::presentation::PresentationDto;
pub use parser::{ParserStrategy, SurfaceParser};
pub use plugins::{
    default_core_plugins, CustomFontPlugin, DeckMetadataPlugin, Plugin, PluginCapabilities,
    PluginContext, PluginManager,
};
pub use serializer::{Serializer, Units};
