//! Pixel propagation (binary dilation)
//!
//! Each output cell is foreground when the input cell or any of its neighbours
//! under the chosen connectivity is foreground. The same-size form is used to
//! build the comparator pyramid; the growing form pads by one cell first so
//! nothing is lost at the border and the input content lands at (+1, +1).

use crate::io::configuration::{BACKGROUND, FOREGROUND};
use crate::raster::extension::Padding;
use crate::raster::grid::Raster;

/// Neighbourhood used when propagating foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge-adjacent cells only
    Four,
    /// Edge and corner adjacent cells
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            Self::Eight => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }
}

impl Raster {
    /// Dilate without changing dimensions
    ///
    /// Foreground cells are normalised to [`FOREGROUND`].
    #[must_use]
    pub fn dilate(&self, connectivity: Connectivity) -> Self {
        let (rows, cols) = self.dim();
        let mut out = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let lit = self.is_foreground(row, col)
                    || connectivity.offsets().iter().any(|&(dr, dc)| {
                        match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                            (Some(r), Some(c)) => self.is_foreground(r, c),
                            _ => false,
                        }
                    });
                out.set(row, col, if lit { FOREGROUND } else { BACKGROUND });
            }
        }
        out
    }

    /// Pad by one background cell on every side, then dilate
    ///
    /// The result is two rows and two columns larger; input cell (r, c)
    /// corresponds to output cell (r + 1, c + 1).
    #[must_use]
    pub fn dilate_grow(&self, connectivity: Connectivity) -> Self {
        self.pad(&Padding::uniform(1), BACKGROUND)
            .dilate(connectivity)
    }
}
