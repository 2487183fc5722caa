//! Shape states and the variant catalogue
//!
//! Each variant is a generative rule: an initial raster and a set of
//! transforms that produce child states. Families live in their own modules;
//! `state` ties them together behind a single closed type.

/// Path-shaped chains with endpoint extension and trimming
pub mod chain;
/// Squares, rectangles and towers
pub mod rectilinear;
/// Rings of evenly spaced points
pub mod ring;
/// Grid-scaled wrappers over the base families
pub mod scaled;
/// Immutable search states and transform dispatch
pub mod state;
/// Variant tags and per-variant transform lists
pub mod variant;

pub use state::{ShapeFields, ShapeParts, ShapeState};
pub use variant::{Family, Transform, Variant};
