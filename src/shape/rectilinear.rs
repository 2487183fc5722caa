//! Square, rectangle and tower generators
//!
//! All three grow and shrink a filled block from its top-left corner. Squares
//! move both axes at once, rectangles move either axis independently, and
//! towers behave like rectangles until their first resize, after which the
//! other axis is frozen.

use serde::{Deserialize, Serialize};

use crate::io::configuration::FOREGROUND;
use crate::raster::grid::Raster;
use crate::shape::variant::Transform;

/// Axis a tower has committed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowDirection {
    /// No resize has happened yet
    #[default]
    Undecided,
    /// Only rows may be added or removed
    Vertical,
    /// Only columns may be added or removed
    Horizontal,
}

/// Initial square: a filled 3x3 block
pub fn initial_square() -> Raster {
    Raster::filled(3, 3, FOREGROUND)
}

/// Initial rectangle: a filled block three rows tall and two columns wide
pub fn initial_rectangle() -> Raster {
    Raster::filled(3, 2, FOREGROUND)
}

/// Initial tower: a single filled cell
pub fn initial_tower() -> Raster {
    Raster::filled(1, 1, FOREGROUND)
}

/// Apply a square transform
pub fn apply_square(transform: Transform, raster: &Raster) -> Option<Raster> {
    match transform {
        Transform::Expand => {
            let mut grown = raster.add_right_column().add_bottom_row();
            let (rows, cols) = grown.dim();
            grown.set_row(rows - 1, FOREGROUND);
            grown.set_col(cols - 1, FOREGROUND);
            Some(grown)
        }
        Transform::Contract => non_empty(raster.slice(
            0,
            raster.rows().saturating_sub(1),
            0,
            raster.cols().saturating_sub(1),
        )),
        _ => None,
    }
}

/// Apply a rectangle transform
pub fn apply_rectangle(transform: Transform, raster: &Raster) -> Option<Raster> {
    match transform {
        Transform::ExpandX => {
            let mut grown = raster.add_right_column();
            grown.set_col(grown.cols() - 1, FOREGROUND);
            Some(grown)
        }
        Transform::ExpandY => {
            let mut grown = raster.add_bottom_row();
            grown.set_row(grown.rows() - 1, FOREGROUND);
            Some(grown)
        }
        Transform::ContractX => non_empty(raster.remove_right_column()),
        Transform::ContractY => non_empty(raster.remove_bottom_row()),
        _ => None,
    }
}

/// Apply a tower transform, returning the new raster and locked axis
pub fn apply_tower(
    transform: Transform,
    raster: &Raster,
    direction: GrowDirection,
) -> Option<(Raster, GrowDirection)> {
    let axis = match transform {
        Transform::ExpandX | Transform::ContractX => GrowDirection::Horizontal,
        Transform::ExpandY | Transform::ContractY => GrowDirection::Vertical,
        _ => return None,
    };
    if direction != GrowDirection::Undecided && direction != axis {
        return None;
    }
    apply_rectangle(transform, raster).map(|grown| (grown, axis))
}

fn non_empty(raster: Raster) -> Option<Raster> {
    (!raster.is_empty()).then_some(raster)
}
