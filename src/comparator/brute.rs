//! Exact sliding-window disagreement
//!
//! The distance at a placement is the number of cells where the reference
//! disagrees with the base after the candidate is pasted over it. Only the
//! covered window changes, so each placement costs one pass over the candidate
//! plus a lookup of the precomputed base disagreement.

use ndarray::Array2;

use crate::comparator::pyramid::MismatchMask;
use crate::comparator::{RasterComparator, Score, argmin, placements, resolve_base};
use crate::io::error::Result;
use crate::raster::grid::Raster;

/// Exact comparator
#[derive(Debug, Clone)]
pub struct BruteComparator {
    reference: Raster,
    mismatch: MismatchMask,
}

impl BruteComparator {
    /// Compare against `reference` over an all-background base
    pub fn new(reference: Raster) -> Self {
        let mismatch = MismatchMask::foreground(&reference);
        Self {
            reference,
            mismatch,
        }
    }

    /// Compare against `reference` with candidates pasted over `base`
    ///
    /// # Errors
    ///
    /// Returns an error if `base` differs in size from `reference`
    pub fn with_base(reference: Raster, base: Raster) -> Result<Self> {
        let base = resolve_base(&reference, Some(base))?;
        let mismatch = MismatchMask::between(&reference, &base)?;
        Ok(Self {
            reference,
            mismatch,
        })
    }

    /// Distance at every placement, `None` if the candidate does not fit
    pub fn score_all(&self, candidate: &Raster) -> Option<Array2<u64>> {
        let (rows, cols) = placements(self.reference.dim(), candidate.dim())?;
        let (height, width) = candidate.dim();
        Some(Array2::from_shape_fn((rows, cols), |(row, col)| {
            let covered = self.mismatch.count_window(row..row + height, col..col + width);
            let mut disagreement = self.mismatch.total() - covered;
            for ((r, c), &value) in candidate.cells().indexed_iter() {
                if self.reference.get(row + r, col + c) != Some(value) {
                    disagreement += 1;
                }
            }
            disagreement as u64
        }))
    }
}

impl RasterComparator for BruteComparator {
    fn reference(&self) -> &Raster {
        &self.reference
    }

    fn score(&self, candidate: &Raster) -> Score {
        self.score_all(candidate)
            .map_or_else(Score::impossible, |scores| argmin(&scores))
    }
}
