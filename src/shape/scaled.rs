//! Grid-scaled wrappers
//!
//! A grid variant keeps its family's raster at unit resolution and renders it
//! through [`Raster::scale_grid`], so each logical cell becomes one point on a
//! `scale`-spaced lattice.

use crate::raster::grid::Raster;
use crate::shape::variant::Transform;

/// Scale every grid variant starts at
pub const INITIAL_SCALE: usize = 1;

/// New scale after a scaling transform, or `None` if the transform does not
/// apply or would drop the scale below one
pub fn rescale(transform: Transform, scale: usize) -> Option<usize> {
    match transform {
        Transform::ScaleUp => Some(scale + 1),
        Transform::ScaleDown => scale.checked_sub(1).filter(|&next| next >= 1),
        _ => None,
    }
}

/// Rendered raster for a logical raster at `scale`
pub fn render(logical: &Raster, scale: usize) -> Raster {
    logical.scale_grid(scale)
}
