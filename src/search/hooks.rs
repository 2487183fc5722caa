//! Comparator-backed search callbacks

use log::info;

use crate::comparator::{RasterComparator, Score};
use crate::io::progress::SearchProgress;
use crate::search::engine::SearchHooks;
use crate::shape::state::ShapeState;

/// Scores states with a comparator and reports progress
///
/// Terminates once a state reaches the target distance, if one is set.
pub struct ComparatorHooks {
    comparator: Box<dyn RasterComparator>,
    target: Option<u64>,
    progress: Option<SearchProgress>,
    flushes: usize,
}

impl ComparatorHooks {
    /// Hooks around `comparator` with no target and no progress display
    pub fn new(comparator: Box<dyn RasterComparator>) -> Self {
        Self {
            comparator,
            target: None,
            progress: None,
            flushes: 0,
        }
    }

    /// Stop once a state scores at or below `distance`
    #[must_use]
    pub const fn with_target(mut self, distance: u64) -> Self {
        self.target = Some(distance);
        self
    }

    /// Report expansions and improvements to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: SearchProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Swap in a comparator for a new reference
    pub fn replace_comparator(&mut self, comparator: Box<dyn RasterComparator>) {
        self.comparator = comparator;
    }

    /// The comparator in use
    pub fn comparator(&self) -> &dyn RasterComparator {
        self.comparator.as_ref()
    }

    /// Progress display, if any
    pub const fn progress_mut(&mut self) -> Option<&mut SearchProgress> {
        self.progress.as_mut()
    }

    /// Number of cache flushes requested by the engine
    pub const fn flushes(&self) -> usize {
        self.flushes
    }
}

impl SearchHooks for ComparatorHooks {
    fn heuristic(&mut self, state: &ShapeState) -> Score {
        self.comparator.score(state.raster())
    }

    fn node_action(&mut self, _state: &ShapeState) {
        if let Some(progress) = &self.progress {
            progress.record_node();
        }
    }

    fn terminate(&mut self, state: &ShapeState) -> bool {
        match (self.target, state.heuristic()) {
            (Some(target), Some(distance)) => distance <= target,
            _ => false,
        }
    }

    fn flush(&mut self, best: &ShapeState) {
        self.flushes += 1;
        self.comparator.flush(best.raster());
        if let (Some(progress), Some(distance)) = (self.progress.as_mut(), best.heuristic()) {
            progress.record_best(distance);
        }
    }

    fn full_flush(&mut self, best: &ShapeState) {
        info!("seeding {}", best.describe());
        self.flushes += 1;
        self.comparator.full_flush(best.raster());
    }
}
