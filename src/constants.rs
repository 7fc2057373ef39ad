//! Defines constants used throughout the extraction and serialization pipeline.

// Conversion factors (CSS pixels are defined at 96 per inch)
pub const DPI: f64 = 96.0;
pub const PT_PER_INCH: f64 = 72.0;

// Conversion defaults
pub const DEFAULT_SLIDE_SELECTOR: &str = ".slide";
pub const DEFAULT_SLIDE_WIDTH: f64 = 992.0;
pub const DEFAULT_SLIDE_HEIGHT: f64 = 558.0;

// Default values used when specific properties are missing or cannot be resolved.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_TEXT_COLOR: &str = "000000";
pub const DEFAULT_BULLET_INDENT: f64 = 15.0;
pub const CHART_FONT_SIZE: f64 = 10.0;
pub const CHART_GRID_COLOR: &str = "D9D9D9";

/// Numeric weights above this value render with the backend's bold flag.
pub const BOLD_WEIGHT_THRESHOLD: u32 = 400;

/// Rotations smaller than this (in degrees) are treated as no rotation.
pub const MIN_ROTATION_DEG: f64 = 0.01;

/// Suffixes appended to a base font face when the backend only accepts full family names.
/// Weight 400 has no entry: regular weight never carries a suffix.
pub const FONT_WEIGHT_SUFFIXES: &[(u32, &str)] = &[
    (100, "Thin"),
    (200, "ExtraLight"),
    (300, "Light"),
    (500, "Medium"),
    (600, "SemiBold"),
    (700, "Bold"),
    (800, "ExtraBold"),
    (900, "Black"),
];

/// Font Awesome 5 glyph names that were renamed in Font Awesome 6.
pub const FA5_TO_FA6_NAMES: &[(&str, &str)] = &[
    ("times", "xmark"),
    ("times-circle", "circle-xmark"),
    ("check-circle", "circle-check"),
    ("exclamation-triangle", "triangle-exclamation"),
    ("exclamation-circle", "circle-exclamation"),
    ("info-circle", "circle-info"),
    ("question-circle", "circle-question"),
    ("line-chart", "chart-line"),
    ("bar-chart", "chart-column"),
    ("pie-chart", "chart-pie"),
    ("search", "magnifying-glass"),
    ("cog", "gear"),
    ("cogs", "gears"),
    ("home", "house"),
    ("external-link-alt", "up-right-from-square"),
    ("arrow-circle-right", "circle-arrow-right"),
    ("long-arrow-alt-right", "right-long"),
    ("mobile-alt", "mobile-screen-button"),
    ("shield-alt", "shield-halved"),
    ("users-cog", "users-gear"),
    ("tachometer-alt", "gauge-high"),
];

/// CDN roots probed in order when fetching icon glyph SVGs.
pub const ICON_CDN_ROOTS: &[&str] = &[
    "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.0.0/svgs",
    "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@7.0.0/svgs",
];

/// CSS named colors accepted by the color sanitizer (lowercase name, hex without `#`).
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "000000"),
    ("silver", "c0c0c0"),
    ("gray", "808080"),
    ("grey", "808080"),
    ("white", "ffffff"),
    ("maroon", "800000"),
    ("red", "ff0000"),
    ("purple", "800080"),
    ("fuchsia", "ff00ff"),
    ("magenta", "ff00ff"),
    ("green", "008000"),
    ("lime", "00ff00"),
    ("olive", "808000"),
    ("yellow", "ffff00"),
    ("navy", "000080"),
    ("blue", "0000ff"),
    ("teal", "008080"),
    ("aqua", "00ffff"),
    ("cyan", "00ffff"),
    ("orange", "ffa500"),
    ("pink", "ffc0cb"),
    ("brown", "a52a2a"),
    ("gold", "ffd700"),
    ("indigo", "4b0082"),
    ("violet", "ee82ee"),
    ("coral", "ff7f50"),
    ("crimson", "dc143c"),
    ("salmon", "fa8072"),
    ("tomato", "ff6347"),
    ("khaki", "f0e68c"),
    ("beige", "f5f5dc"),
    ("ivory", "fffff0"),
    ("lavender", "e6e6fa"),
    ("turquoise", "40e0d0"),
    ("tan", "d2b48c"),
    ("chocolate", "d2691e"),
    ("darkblue", "00008b"),
    ("darkgreen", "006400"),
    ("darkred", "8b0000"),
    ("darkgray", "a9a9a9"),
    ("darkgrey", "a9a9a9"),
    ("lightgray", "d3d3d3"),
    ("lightgrey", "d3d3d3"),
    ("lightblue", "add8e6"),
    ("lightgreen", "90ee90"),
    ("steelblue", "4682b4"),
    ("royalblue", "4169e1"),
    ("slategray", "708090"),
    ("slategrey", "708090"),
    ("whitesmoke", "f5f5f5"),
    ("gainsboro", "dcdcdc"),
    ("rebeccapurple", "663399"),
];
