//! Multi-resolution propagated comparator
//!
//! The reference and base are each expanded into a dilation pyramid once, and
//! the per-level base disagreement is cached as a mask. Scoring a candidate
//! builds the candidate's own pyramid and, for each placement and level,
//! replaces the disagreement inside the candidate's window (grown by the
//! level index, since dilation spreads the candidate that far) with the
//! disagreement between the candidate level and the reference level.
//!
//! Levels are combined with weight `level + 1`, so coarse levels, which
//! tolerate small misalignments, dominate. At level zero the score equals the
//! brute-force distance exactly.

use ndarray::Array2;

use crate::comparator::pyramid::{MismatchMask, Pyramid};
use crate::comparator::{RasterComparator, Score, argmin, placements, resolve_base};
use crate::io::error::{Result, invalid_parameter};
use crate::raster::grid::Raster;

/// Pyramid-based comparator scoring every placement
#[derive(Debug, Clone)]
pub struct PropagatedComparator {
    reference: Raster,
    reference_levels: Pyramid,
    masks: Vec<MismatchMask>,
}

impl PropagatedComparator {
    /// Compare against `reference` over an all-background base
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is zero
    pub fn new(reference: Raster, depth: usize) -> Result<Self> {
        let base = Raster::new(reference.rows(), reference.cols());
        Self::with_base(reference, base, depth)
    }

    /// Compare against `reference` with candidates laid over `base`
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is zero or `base` differs in size from
    /// `reference`
    pub fn with_base(reference: Raster, base: Raster, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(invalid_parameter(
                "depth",
                &depth,
                &"pyramid needs at least one level",
            ));
        }
        let base = resolve_base(&reference, Some(base))?;
        let reference_levels = Pyramid::build(&reference, depth);
        let base_levels = Pyramid::build(&base, depth);
        let masks = reference_levels
            .levels()
            .iter()
            .zip(base_levels.levels())
            .map(|(r, b)| MismatchMask::between(r, b))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            reference,
            reference_levels,
            masks,
        })
    }

    /// Number of pyramid levels
    pub fn depth(&self) -> usize {
        self.reference_levels.depth()
    }

    /// Weight applied to a level's score
    pub const fn weight(level: usize) -> u64 {
        level as u64 + 1
    }

    /// Candidate pyramid at this comparator's depth
    pub fn candidate_pyramid(&self, candidate: &Raster) -> Pyramid {
        Pyramid::build(candidate, self.depth())
    }

    /// Unweighted score of each level at one placement
    ///
    /// Returns `None` if the candidate does not fit at `offset`.
    pub fn level_scores(&self, candidate: &Raster, offset: [usize; 2]) -> Option<Vec<u64>> {
        let (rows, cols) = placements(self.reference.dim(), candidate.dim())?;
        if offset[0] >= rows || offset[1] >= cols {
            return None;
        }
        let pyramid = self.candidate_pyramid(candidate);
        Some(
            (0..self.depth())
                .map(|level| self.level_score(&pyramid, candidate.dim(), offset, level))
                .collect(),
        )
    }

    /// Weighted score at one placement, given the candidate's pyramid
    ///
    /// `size` is the unpadded candidate size and `offset` must be a valid
    /// placement for it.
    pub fn score_at(&self, pyramid: &Pyramid, size: (usize, usize), offset: [usize; 2]) -> u64 {
        (0..self.depth())
            .map(|level| Self::weight(level) * self.level_score(pyramid, size, offset, level))
            .sum()
    }

    /// Weighted score at every placement, `None` if the candidate does not fit
    pub fn score_all(&self, candidate: &Raster) -> Option<Array2<u64>> {
        let (rows, cols) = placements(self.reference.dim(), candidate.dim())?;
        let pyramid = self.candidate_pyramid(candidate);
        Some(Array2::from_shape_fn((rows, cols), |(row, col)| {
            self.score_at(&pyramid, candidate.dim(), [row, col])
        }))
    }

    fn level_score(
        &self,
        pyramid: &Pyramid,
        (height, width): (usize, usize),
        [row, col]: [usize; 2],
        level: usize,
    ) -> u64 {
        let (Some(mask), Some(reference), Some(candidate)) = (
            self.masks.get(level),
            self.reference_levels.level(level),
            pyramid.level(level),
        ) else {
            return 0;
        };

        // Window in candidate-pyramid coordinates, grown by the level index
        let padding = pyramid.padding();
        let rows = padding - level..padding + level + height;
        let cols = padding - level..padding + level + width;

        let outside = mask.total()
            - mask.count_window(
                row + rows.start..row + rows.end,
                col + cols.start..col + cols.end,
            );
        let mut inside = 0;
        for r in rows {
            for c in cols.clone() {
                if candidate.get(r, c) != reference.get(row + r, col + c) {
                    inside += 1;
                }
            }
        }
        (outside + inside) as u64
    }
}

impl RasterComparator for PropagatedComparator {
    fn reference(&self) -> &Raster {
        &self.reference
    }

    fn score(&self, candidate: &Raster) -> Score {
        self.score_all(candidate)
            .map_or_else(Score::impossible, |scores| argmin(&scores))
    }
}
