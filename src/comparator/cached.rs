//! Shortlist cache over the propagated comparator
//!
//! A flush scores the current best candidate at every placement and keeps the
//! `shortlist_size` best placements in ascending order. Until the next flush,
//! candidates are scored only at those placements. The resulting heuristic is
//! not monotonic between flushes: a candidate whose true best placement fell
//! off the shortlist is overestimated until the search finds a new best and
//! refreshes the list. When the shortlist is empty, or none of its placements
//! fits the candidate, scoring falls back to a full pass.

use std::collections::BinaryHeap;

use crate::comparator::propagated::PropagatedComparator;
use crate::comparator::{ComparatorConfig, RasterComparator, Score, placements};
use crate::io::error::Result;
use crate::raster::grid::Raster;

/// Propagated comparator restricted to a refreshed shortlist of placements
#[derive(Debug, Clone)]
pub struct CachedComparator {
    inner: PropagatedComparator,
    shortlist: Vec<Score>,
    shortlist_size: usize,
}

impl CachedComparator {
    /// Compare against `reference` over an all-background base
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(reference: Raster, config: ComparatorConfig) -> Result<Self> {
        let base = Raster::new(reference.rows(), reference.cols());
        Self::with_base(reference, base, config)
    }

    /// Compare against `reference` with candidates laid over `base`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `base` differs in
    /// size from `reference`
    pub fn with_base(reference: Raster, base: Raster, config: ComparatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: PropagatedComparator::with_base(reference, base, config.depth)?,
            shortlist: Vec::new(),
            shortlist_size: config.shortlist_size,
        })
    }

    /// Current shortlist, best first
    pub fn shortlist(&self) -> &[Score] {
        &self.shortlist
    }

    /// The wrapped full comparator
    pub const fn inner(&self) -> &PropagatedComparator {
        &self.inner
    }
}

impl RasterComparator for CachedComparator {
    fn reference(&self) -> &Raster {
        self.inner.reference()
    }

    fn score(&self, candidate: &Raster) -> Score {
        let Some((rows, cols)) = placements(self.reference().dim(), candidate.dim()) else {
            return Score::impossible();
        };
        let mut offsets = self
            .shortlist
            .iter()
            .map(|entry| entry.offset)
            .filter(|&[row, col]| row < rows && col < cols)
            .peekable();
        if offsets.peek().is_none() {
            return self.inner.score(candidate);
        }

        let pyramid = self.inner.candidate_pyramid(candidate);
        offsets
            .map(|offset| Score {
                distance: self.inner.score_at(&pyramid, candidate.dim(), offset),
                offset,
            })
            .min()
            .unwrap_or_else(Score::impossible)
    }

    fn flush(&mut self, best: &Raster) {
        self.shortlist.clear();
        let Some(scores) = self.inner.score_all(best) else {
            return;
        };

        // Max-heap holding the smallest entries seen so far
        let mut heap = BinaryHeap::with_capacity(self.shortlist_size + 1);
        for ((row, col), &distance) in scores.indexed_iter() {
            heap.push(Score {
                distance,
                offset: [row, col],
            });
            if heap.len() > self.shortlist_size {
                heap.pop();
            }
        }
        self.shortlist = heap.into_sorted_vec();
        log::debug!(
            "shortlist refreshed with {} placements, best distance {}",
            self.shortlist.len(),
            self.shortlist.first().map_or(0, |score| score.distance)
        );
    }
}
