// src/models/bullet.rs

use serde::{Deserialize, Serialize};

/// The kind of marker a list item renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletKind {
    Bullet,
    Number,
}

/// Describes the bullet of a list-item text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    #[serde(rename = "type")]
    pub kind: BulletKind,
    /// Indent of the bullet in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<f64>,
    /// 1-based number of the item when `kind` is `Number`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_start_at: Option<u32>,
}
