//! Priority frontier and content-addressed visited set

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::raster::grid::Raster;
use crate::shape::state::ShapeState;

/// Queued state with its priority fixed at insertion
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    priority: f64,
    sequence: u64,
    state: ShapeState,
}

impl FrontierEntry {
    /// Priority the entry was queued with
    pub const fn priority(&self) -> f64 {
        self.priority
    }

    /// The queued state
    pub const fn state(&self) -> &ShapeState {
        &self.state
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Equal priorities pop in insertion order
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Min-priority queue of unexpanded states
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    next_sequence: u64,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a state under `priority`
    pub fn push(&mut self, state: ShapeState, priority: f64) {
        self.heap.push(Reverse(FrontierEntry {
            priority,
            sequence: self.next_sequence,
            state,
        }));
        self.next_sequence += 1;
    }

    /// Remove the lowest-priority state
    pub fn pop(&mut self) -> Option<ShapeState> {
        self.heap.pop().map(|Reverse(entry)| entry.state)
    }

    /// Lowest-priority entry without removing it
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek().map(|Reverse(entry)| entry)
    }

    /// Number of queued states
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued state
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}

/// Rasters already queued, bucketed by content hash
///
/// Buckets hold full rasters so hash collisions never merge distinct shapes.
#[derive(Debug, Default)]
pub struct VisitedSet {
    buckets: HashMap<u32, Vec<Raster>>,
    len: usize,
}

impl VisitedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raster; returns `false` if it was already present
    pub fn insert(&mut self, raster: &Raster) -> bool {
        let bucket = self.buckets.entry(raster.content_hash()).or_default();
        if bucket.contains(raster) {
            return false;
        }
        bucket.push(raster.clone());
        self.len += 1;
        true
    }

    /// True if an equal raster has been recorded
    pub fn contains(&self, raster: &Raster) -> bool {
        self.buckets
            .get(&raster.content_hash())
            .is_some_and(|bucket| bucket.contains(raster))
    }

    /// Number of distinct rasters recorded
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been recorded
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forget every raster
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}
