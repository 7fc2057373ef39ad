use thiserror::Error;

/// Represents errors that can occur while converting an HTML document into a slide deck.
///
/// Only structural problems surface as errors. Malformed per-element data (an unparseable
/// color, a bad gradient, an unmatched chart) degrades to "omit this attribute/element"
/// inside the extractors and plugins and never reaches this type.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// A plugin with the same name is already registered.
    #[error("Plugin \"{name}\" is already registered")]
    DuplicatePlugin { name: String },

    /// A chart configuration could not be normalized into chart data.
    #[error("Invalid chart configuration for chart '{chart_id}': {reason}")]
    InvalidChartConfig { chart_id: String, reason: String },

    /// The slide selector matched no elements in the rendered document.
    #[error("No slides found for selector '{selector}'")]
    NoSlidesFound { selector: String },

    /// `convert` was called before any HTML source was loaded.
    #[error("No HTML source loaded. Call load() first.")]
    MissingSource,

    /// `export` or `presentation` was called before `convert`.
    #[error("No presentation available. Call convert() first.")]
    MissingPresentation,

    /// An external resource (e.g. an icon glyph) could not be fetched from any location.
    #[error("Unable to resolve asset '{asset}': {reason}")]
    UnresolvedAsset { asset: String, reason: String },

    /// The rendering surface failed to produce a document.
    #[error("Rendering surface error: {0}")]
    Render(String),

    /// The document-generation backend failed to write the deck.
    #[error("Document backend error: {0}")]
    Backend(String),

    /// The converter configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error occurred while (de)serializing JSON (configs, snapshots, decks).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred, e.g. while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// A type alias for `Result<T, ConversionError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ConversionError>;
