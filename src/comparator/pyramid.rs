//! Dilation pyramids and per-level disagreement masks
//!
//! A pyramid pads its source by its depth on every side and then stacks
//! repeated eight-connected dilations, so level `i + 1` has a foreground set
//! containing level `i`'s and nothing grows off the canvas. Mismatch masks
//! record where two same-sized levels disagree as a row-major bit vector so
//! the disagreement inside any window can be counted without touching cells.

use bitvec::prelude::*;
use std::ops::Range;

use crate::io::configuration::BACKGROUND;
use crate::io::error::{Result, dimension_mismatch};
use crate::raster::dilation::Connectivity;
use crate::raster::extension::Padding;
use crate::raster::grid::Raster;

/// Padded stack of progressively dilated rasters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pyramid {
    levels: Vec<Raster>,
    padding: usize,
}

impl Pyramid {
    /// Build `depth` levels from `source`, padded by `depth` cells
    pub fn build(source: &Raster, depth: usize) -> Self {
        let mut levels = Vec::with_capacity(depth);
        let mut current = source.pad(&Padding::uniform(depth), BACKGROUND);
        for _ in 0..depth {
            let next = current.dilate(Connectivity::Eight);
            levels.push(current);
            current = next;
        }
        Self {
            levels,
            padding: depth,
        }
    }

    /// Number of levels
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Border added around the source on every side
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// All levels, finest first
    pub fn levels(&self) -> &[Raster] {
        &self.levels
    }

    /// One level, if it exists
    pub fn level(&self, index: usize) -> Option<&Raster> {
        self.levels.get(index)
    }
}

/// Cells where two equally sized rasters disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchMask {
    bits: BitVec,
    cols: usize,
    total: usize,
}

impl MismatchMask {
    /// Mask of disagreeing cells
    ///
    /// # Errors
    ///
    /// Returns an error if the rasters differ in size
    pub fn between(a: &Raster, b: &Raster) -> Result<Self> {
        if a.dim() != b.dim() {
            return Err(dimension_mismatch("mismatch mask", a.dim(), b.dim()));
        }
        Ok(Self::from_cells(
            a.cols(),
            a.cells().iter().zip(b.cells().iter()).map(|(x, y)| x != y),
        ))
    }

    /// Mask of non-background cells, i.e. disagreement with a blank raster
    pub fn foreground(raster: &Raster) -> Self {
        Self::from_cells(
            raster.cols(),
            raster.cells().iter().map(|&cell| cell != BACKGROUND),
        )
    }

    fn from_cells(cols: usize, cells: impl Iterator<Item = bool>) -> Self {
        let bits: BitVec = cells.collect();
        let total = bits.count_ones();
        Self { bits, cols, total }
    }

    /// Total number of disagreeing cells
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Disagreeing cells inside a window; parts outside the mask count zero
    pub fn count_window(&self, rows: Range<usize>, cols: Range<usize>) -> usize {
        if self.cols == 0 {
            return 0;
        }
        let col_start = cols.start.min(self.cols);
        let col_end = cols.end.min(self.cols);
        if col_start >= col_end {
            return 0;
        }
        rows.map(|row| {
            let start = row * self.cols;
            self.bits
                .get(start + col_start..start + col_end)
                .map_or(0, BitSlice::count_ones)
        })
        .sum()
    }
}
