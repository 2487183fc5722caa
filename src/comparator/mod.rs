//! Scoring candidate rasters against a fixed reference
//!
//! A comparator is built once per reference (and optional base reconstruction)
//! and then asked, many times, where a candidate fits best. Three
//! implementations trade accuracy for speed:
//! - `brute`: exact disagreement at every placement
//! - `propagated`: weighted multi-resolution disagreement over a dilation pyramid
//! - `cached`: the propagated score restricted to a shortlist of placements
//!   refreshed only when the search finds a new best

use clap::ValueEnum;
use ndarray::Array2;

use crate::io::configuration::{PROPAGATION_DEPTH, SHORTLIST_SIZE};
use crate::io::error::{Result, dimension_mismatch, invalid_parameter};
use crate::raster::grid::Raster;

/// Exact sliding-window comparator
pub mod brute;
/// Top-K shortlist over the propagated comparator
pub mod cached;
/// Multi-resolution dilation-pyramid comparator
pub mod propagated;
/// Dilation pyramids and per-level mismatch masks
pub mod pyramid;

pub use brute::BruteComparator;
pub use cached::CachedComparator;
pub use propagated::PropagatedComparator;

/// Distance reported for candidates that cannot be placed
pub const IMPOSSIBLE: u64 = u64::MAX;

/// Best placement of a candidate and its distance
///
/// Orders by distance first, then by offset in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    /// Lower is better; [`IMPOSSIBLE`] when the candidate does not fit
    pub distance: u64,
    /// Top-left `[row, col]` of the candidate inside the reference
    pub offset: [usize; 2],
}

impl Score {
    /// The "cannot fit" sentinel
    pub const fn impossible() -> Self {
        Self {
            distance: IMPOSSIBLE,
            offset: [0, 0],
        }
    }

    /// True for the "cannot fit" sentinel
    pub const fn is_impossible(&self) -> bool {
        self.distance == IMPOSSIBLE
    }
}

/// Scores candidates against a reference raster
pub trait RasterComparator {
    /// The raster candidates are scored against
    fn reference(&self) -> &Raster;

    /// Best placement of `candidate`, or [`Score::impossible`] if it is larger
    /// than the reference in either axis
    fn score(&self, candidate: &Raster) -> Score;

    /// Refresh any cached state around a new best candidate
    fn flush(&mut self, _best: &Raster) {}

    /// Refresh invoked when a search is seeded
    fn full_flush(&mut self, best: &Raster) {
        self.flush(best);
    }
}

/// Comparator implementation selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ComparatorKind {
    /// Exact disagreement at every placement
    Brute,
    /// Multi-resolution pyramid scoring at every placement
    Propagated,
    /// Pyramid scoring over a cached shortlist of placements
    #[default]
    Cached,
}

/// Comparator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparatorConfig {
    /// Number of pyramid levels
    pub depth: usize,
    /// Placements kept by the cached comparator
    pub shortlist_size: usize,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            depth: PROPAGATION_DEPTH,
            shortlist_size: SHORTLIST_SIZE,
        }
    }
}

impl ComparatorConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the depth or shortlist size is zero
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(invalid_parameter(
                "depth",
                &self.depth,
                &"pyramid needs at least one level",
            ));
        }
        if self.shortlist_size == 0 {
            return Err(invalid_parameter(
                "shortlist_size",
                &self.shortlist_size,
                &"shortlist needs at least one entry",
            ));
        }
        Ok(())
    }
}

/// Build a boxed comparator
///
/// `base` defaults to an all-background raster the size of the reference.
///
/// # Errors
///
/// Returns an error if `base` differs in size from `reference` or the
/// configuration is invalid
pub fn build_comparator(
    kind: ComparatorKind,
    reference: Raster,
    base: Option<Raster>,
    config: ComparatorConfig,
) -> Result<Box<dyn RasterComparator>> {
    let base = resolve_base(&reference, base)?;
    Ok(match kind {
        ComparatorKind::Brute => Box::new(BruteComparator::with_base(reference, base)?),
        ComparatorKind::Propagated => Box::new(PropagatedComparator::with_base(
            reference,
            base,
            config.depth,
        )?),
        ComparatorKind::Cached => Box::new(CachedComparator::with_base(reference, base, config)?),
    })
}

/// Use `base` if given, else a blank raster; either way it must match the reference
pub(crate) fn resolve_base(reference: &Raster, base: Option<Raster>) -> Result<Raster> {
    let base = base.unwrap_or_else(|| Raster::new(reference.rows(), reference.cols()));
    if base.dim() != reference.dim() {
        return Err(dimension_mismatch(
            "comparator base",
            reference.dim(),
            base.dim(),
        ));
    }
    Ok(base)
}

/// Number of valid top-left placements per axis, `None` if the candidate is
/// larger than the reference in either axis
pub(crate) fn placements(reference: (usize, usize), candidate: (usize, usize)) -> Option<(usize, usize)> {
    let rows = reference.0.checked_sub(candidate.0)? + 1;
    let cols = reference.1.checked_sub(candidate.1)? + 1;
    Some((rows, cols))
}

/// Smallest entry, first in row-major order on ties
pub(crate) fn argmin(scores: &Array2<u64>) -> Score {
    scores
        .indexed_iter()
        .map(|((row, col), &distance)| Score {
            distance,
            offset: [row, col],
        })
        .min()
        .unwrap_or_else(Score::impossible)
}
