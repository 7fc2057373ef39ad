//! The rendered-document boundary: snapshot model, node handles, selectors and the
//! rendering-surface trait.

pub mod builder;
pub mod selector;
pub mod snapshot;
pub mod style;
pub mod surface;

pub use builder::SnapshotBuilder;
pub use snapshot::{DomSnapshot, NodeId, NodeRef, Rect};
pub use style::{parse_px, ComputedStyle};
pub use surface::{RenderingSurface, StaticSurface};
