//! Optional plugins registered after the core set.

mod custom_font;
mod deck_metadata;

pub use custom_font::CustomFontPlugin;
pub use deck_metadata::DeckMetadataPlugin;
