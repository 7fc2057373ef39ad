//! Conversion configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_SELECTOR, DEFAULT_SLIDE_WIDTH};
use crate::errors::{ConversionError, Result};
use crate::models::common::Dimensions;

fn default_selector() -> String {
    DEFAULT_SLIDE_SELECTOR.to_string()
}

fn default_dimensions() -> Dimensions {
    Dimensions::new(DEFAULT_SLIDE_WIDTH, DEFAULT_SLIDE_HEIGHT)
}

/// Options recognized by the converter. Every field has a default, so `{}` is a valid
/// configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverterConfig {
    /// CSS selector identifying slide-root elements.
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Viewport the document is rendered in, in pixels.
    #[serde(default = "default_dimensions")]
    pub dimensions: Dimensions,

    /// Raises per-phase summaries from `debug` to `info` level.
    #[serde(default)]
    pub debug: bool,

    /// Fixed width multiplier for text boxes, replacing the font-size based one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_width_buffer: Option<f64>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            dimensions: default_dimensions(),
            debug: false,
            text_width_buffer: None,
        }
    }
}

impl ConverterConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ConverterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Checks that the selector is non-empty and the viewport has a positive area.
    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(ConversionError::InvalidConfig(
                "selector must not be empty".to_string(),
            ));
        }
        if !(self.dimensions.width > 0.0 && self.dimensions.height > 0.0) {
            return Err(ConversionError::InvalidConfig(format!(
                "dimensions must be positive, got {}x{}",
                self.dimensions.width, self.dimensions.height
            )));
        }
        if let Some(buffer) = self.text_width_buffer {
            if !(buffer > 0.0) {
                return Err(ConversionError::InvalidConfig(format!(
                    "textWidthBuffer must be positive, got {buffer}"
                )));
            }
        }
        Ok(())
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            selector: self.selector.clone(),
            dimensions: self.dimensions,
            text_width_buffer: self.text_width_buffer,
        }
    }
}

/// The part of the configuration visible to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    pub selector: String,
    pub dimensions: Dimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_width_buffer: Option<f64>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ConverterConfig::default().parser_config()
    }
}
