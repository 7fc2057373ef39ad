//! Font Awesome glyph detection and resolution.
//!
//! Icon glyphs are rendered by the browser from a web font, which a presentation cannot
//! embed. Each glyph is instead fetched as an SVG and emitted as an image.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::client::HttpIconSource;
use crate::constants::{FA5_TO_FA6_NAMES, ICON_CDN_ROOTS};
use crate::dom::snapshot::NodeRef;
use crate::errors::{ConversionError, Result};

static SVG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("svg").expect("valid selector"));
static PATH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("path").expect("valid selector"));

static GLOBAL_CACHE: Lazy<IconCache> =
    Lazy::new(|| IconCache::new(Arc::new(HttpIconSource::default())));

/// Classes that style an icon rather than name its glyph.
const MODIFIER_CLASSES: &[&str] = &[
    "fa-solid", "fa-regular", "fa-brands", "fa-light", "fa-thin", "fa-duotone", "fa-sharp",
    "fa-fw", "fa-lg", "fa-xs", "fa-sm", "fa-xl", "fa-2xs", "fa-2xl", "fa-spin", "fa-pulse",
    "fa-border", "fa-inverse", "fa-li", "fa-ul", "fa-beat", "fa-fade", "fa-bounce", "fa-shake",
];

const MODIFIER_PREFIXES: &[&str] = &["fa-rotate-", "fa-flip-", "fa-stack", "fa-pull-"];

/// The Font Awesome style family a glyph is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconVariant {
    Solid,
    Regular,
    Brands,
}

impl IconVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconVariant::Solid => "solid",
            IconVariant::Regular => "regular",
            IconVariant::Brands => "brands",
        }
    }
}

impl fmt::Display for IconVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_modifier(class: &str) -> bool {
    MODIFIER_CLASSES.contains(&class)
        || MODIFIER_PREFIXES.iter().any(|p| class.starts_with(p))
        || class
            .strip_prefix("fa-")
            .and_then(|rest| rest.strip_suffix('x'))
            .map(|n| n.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
}

pub fn detect_icon_variant<'a>(classes: impl IntoIterator<Item = &'a str>) -> IconVariant {
    let mut variant = IconVariant::Solid;
    for class in classes {
        match class {
            "fab" | "fa-brands" => return IconVariant::Brands,
            "far" | "fa-regular" => variant = IconVariant::Regular,
            _ => {}
        }
    }
    variant
}

/// The glyph name of an icon (`"fa-house"` → `"house"`), skipping modifier classes.
pub fn icon_glyph<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<String> {
    classes
        .into_iter()
        .find(|c| c.starts_with("fa-") && !is_modifier(c))
        .map(|c| c.trim_start_matches("fa-").to_string())
}

/// True for `i`/`span` elements carrying a Font Awesome glyph class.
pub fn is_icon_element(node: &NodeRef<'_>) -> bool {
    matches!(node.tag_name(), "i" | "span") && icon_glyph(node.class_list()).is_some()
}

/// The Font Awesome 6 name of a glyph that was renamed from Font Awesome 5.
pub fn fa6_name(glyph: &str) -> Option<&'static str> {
    FA5_TO_FA6_NAMES
        .iter()
        .find(|(old, _)| *old == glyph)
        .map(|(_, new)| *new)
}

/// The drawing data of a glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSvg {
    pub view_box: String,
    pub path: String,
}

impl IconSvg {
    /// Reads the view box and concatenated path data of an SVG document.
    pub fn parse(svg: &str) -> Option<Self> {
        let doc = Html::parse_fragment(svg);
        let root = doc.select(&SVG_SELECTOR).next()?;
        let view_box = root
            .value()
            .attr("viewbox")
            .or_else(|| root.value().attr("viewBox"))
            .unwrap_or("0 0 512 512")
            .to_string();
        let path = root
            .select(&PATH_SELECTOR)
            .filter_map(|p| p.value().attr("d"))
            .collect::<Vec<_>>()
            .join(" ");
        (!path.is_empty()).then_some(Self { view_box, path })
    }

    /// A base64 `data:` URI of the glyph painted in `color` (hex without `#`).
    pub fn to_data_uri(&self, color: &str) -> String {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{}\"><path fill=\"#{}\" d=\"{}\"/></svg>",
            self.view_box, color, self.path
        );
        svg_data_uri(&svg)
    }
}

/// Encodes SVG markup as a base64 `data:image/svg+xml` URI.
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

/// Fetches raw SVG documents by URL.
#[async_trait]
pub trait IconSource: Send + Sync {
    /// Returns the document body, or `None` when the location does not have it.
    async fn fetch_svg(&self, url: &str) -> Result<Option<String>>;
}

type PendingFetch = Shared<BoxFuture<'static, Option<IconSvg>>>;
type IconKey = (IconVariant, String);

/// Get-or-fetch cache of glyphs, keyed by (variant, glyph).
///
/// Concurrent requests for the same key share a single pending fetch. Successful
/// results are kept for the lifetime of the cache; failures are not, so a later
/// request retries.
pub struct IconCache {
    source: Arc<dyn IconSource>,
    resolved: Mutex<HashMap<IconKey, IconSvg>>,
    in_flight: Mutex<HashMap<IconKey, PendingFetch>>,
}

impl fmt::Debug for IconCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconCache")
            .field("resolved", &self.resolved.lock().len())
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}

impl IconCache {
    pub fn new(source: Arc<dyn IconSource>) -> Self {
        Self {
            source,
            resolved: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide cache backed by the public CDN.
    pub fn global() -> &'static IconCache {
        &GLOBAL_CACHE
    }

    pub fn cached(&self, variant: IconVariant, glyph: &str) -> Option<IconSvg> {
        self.resolved
            .lock()
            .get(&(variant, glyph.to_string()))
            .cloned()
    }

    /// Returns the glyph, fetching it at most once however many callers ask concurrently.
    pub async fn get_or_fetch(&self, variant: IconVariant, glyph: &str) -> Result<IconSvg> {
        if let Some(svg) = self.cached(variant, glyph) {
            return Ok(svg);
        }

        let key: IconKey = (variant, glyph.to_string());
        let pending = {
            let mut in_flight = self.in_flight.lock();
            in_flight
                .entry(key.clone())
                .or_insert_with(|| {
                    let source = Arc::clone(&self.source);
                    let glyph = glyph.to_string();
                    async move { resolve_glyph(source.as_ref(), variant, &glyph).await }
                        .boxed()
                        .shared()
                })
                .clone()
        };

        let result = pending.clone().await;

        {
            let mut in_flight = self.in_flight.lock();
            if in_flight
                .get(&key)
                .map(|existing| existing.ptr_eq(&pending))
                .unwrap_or(false)
            {
                in_flight.remove(&key);
            }
        }

        match result {
            Some(svg) => {
                self.resolved.lock().insert(key, svg.clone());
                Ok(svg)
            }
            None => Err(ConversionError::UnresolvedAsset {
                asset: format!("{variant}/{glyph}"),
                reason: "glyph not found at any icon CDN location".to_string(),
            }),
        }
    }
}

/// Tries the FA6 name before the given one, the requested variant before `solid`,
/// and every CDN root in order.
async fn resolve_glyph(source: &dyn IconSource, variant: IconVariant, glyph: &str) -> Option<IconSvg> {
    let mut names = Vec::new();
    if let Some(renamed) = fa6_name(glyph) {
        names.push(renamed.to_string());
    }
    names.push(glyph.to_string());

    let mut variants = vec![variant];
    if variant != IconVariant::Solid {
        variants.push(IconVariant::Solid);
    }

    for name in &names {
        for v in &variants {
            for root in ICON_CDN_ROOTS {
                let url = format!("{root}/{v}/{name}.svg");
                match source.fetch_svg(&url).await {
                    Ok(Some(body)) => match IconSvg::parse(&body) {
                        Some(svg) => {
                            debug!("Resolved icon '{glyph}' from {url}");
                            return Some(svg);
                        }
                        None => debug!("No drawable path in {url}"),
                    },
                    Ok(None) => debug!("Icon not found at {url}"),
                    Err(e) => warn!("Fetching icon '{glyph}' from {url} failed: {e}"),
                }
            }
        }
    }
    None
}
