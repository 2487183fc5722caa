//! Raster padding and single-edge growth
//!
//! Padding surrounds a raster with a border of a fill value, either into a
//! freshly allocated array or into a caller-supplied destination whose size
//! must already match. Edge growth and removal build on the same routines and
//! are the primitives the shape generators use to resize their canvases.

use ndarray::{Array2, s};
use num_traits::Zero;

use crate::io::error::{Result, dimension_mismatch};
use crate::raster::grid::Raster;

/// Border widths on each side of a raster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    /// Rows added above
    pub top: usize,
    /// Rows added below
    pub bottom: usize,
    /// Columns added on the left
    pub left: usize,
    /// Columns added on the right
    pub right: usize,
}

impl Padding {
    /// The same border width on every side
    pub const fn uniform(width: usize) -> Self {
        Self {
            top: width,
            bottom: width,
            left: width,
            right: width,
        }
    }

    /// Dimensions of a (rows, cols) array after padding
    pub const fn padded_dims(&self, dims: (usize, usize)) -> (usize, usize) {
        (
            dims.0 + self.top + self.bottom,
            dims.1 + self.left + self.right,
        )
    }
}

/// Pad a 2D array into a newly allocated array
pub fn pad_array<T: Clone>(array: &Array2<T>, padding: &Padding, fill: T) -> Array2<T> {
    let (rows, cols) = array.dim();
    let mut padded = Array2::from_elem(padding.padded_dims((rows, cols)), fill);
    padded
        .slice_mut(s![
            padding.top..padding.top + rows,
            padding.left..padding.left + cols
        ])
        .assign(array);
    padded
}

/// Pad a 2D array into an existing destination
///
/// # Errors
///
/// Returns an error if the destination is not exactly the padded size
pub fn pad_array_into<T: Clone>(
    array: &Array2<T>,
    padding: &Padding,
    fill: T,
    destination: &mut Array2<T>,
) -> Result<()> {
    let (rows, cols) = array.dim();
    let expected = padding.padded_dims((rows, cols));
    if destination.dim() != expected {
        return Err(dimension_mismatch("pad_into", expected, destination.dim()));
    }

    destination.fill(fill);
    destination
        .slice_mut(s![
            padding.top..padding.top + rows,
            padding.left..padding.left + cols
        ])
        .assign(array);
    Ok(())
}

/// Grow an array with zero-valued borders
pub fn grow_array<T: Clone + Zero>(array: &Array2<T>, padding: &Padding) -> Array2<T> {
    pad_array(array, padding, T::zero())
}

impl Raster {
    /// Surround the raster with a border of `fill`
    #[must_use]
    pub fn pad(&self, padding: &Padding, fill: i32) -> Self {
        Self::from_array(pad_array(self.cells(), padding, fill))
    }

    /// Pad into a caller-supplied raster of exactly the padded size
    ///
    /// # Errors
    ///
    /// Returns an error if `destination` has the wrong dimensions
    pub fn pad_into(&self, padding: &Padding, fill: i32, destination: &mut Self) -> Result<()> {
        let mut cells = std::mem::take(destination).into_cells();
        let outcome = pad_array_into(self.cells(), padding, fill, &mut cells);
        *destination = Self::from_array(cells);
        outcome
    }

    /// Prepend a background row
    #[must_use]
    pub fn add_top_row(&self) -> Self {
        self.grow(Padding {
            top: 1,
            ..Padding::default()
        })
    }

    /// Append a background row
    #[must_use]
    pub fn add_bottom_row(&self) -> Self {
        self.grow(Padding {
            bottom: 1,
            ..Padding::default()
        })
    }

    /// Prepend a background column
    #[must_use]
    pub fn add_left_column(&self) -> Self {
        self.grow(Padding {
            left: 1,
            ..Padding::default()
        })
    }

    /// Append a background column
    #[must_use]
    pub fn add_right_column(&self) -> Self {
        self.grow(Padding {
            right: 1,
            ..Padding::default()
        })
    }

    /// Drop the first row
    #[must_use]
    pub fn remove_top_row(&self) -> Self {
        self.slice_rows(1, self.rows())
    }

    /// Drop the last row
    #[must_use]
    pub fn remove_bottom_row(&self) -> Self {
        self.slice_rows(0, self.rows().saturating_sub(1))
    }

    /// Drop the first column
    #[must_use]
    pub fn remove_left_column(&self) -> Self {
        self.slice_cols(1, self.cols())
    }

    /// Drop the last column
    #[must_use]
    pub fn remove_right_column(&self) -> Self {
        self.slice_cols(0, self.cols().saturating_sub(1))
    }

    fn grow(&self, padding: Padding) -> Self {
        Self::from_array(grow_array(self.cells(), &padding))
    }
}
