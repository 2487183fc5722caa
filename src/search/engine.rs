//! Best-first search over shape states
//!
//! The engine pops the lowest-priority state, reports it, refreshes the
//! comparator cache whenever the heuristic improves on the best seen so far,
//! asks whether to stop, and otherwise queues every unseen child. States over
//! their cost bound are dropped when popped rather than when queued, so the
//! frontier never needs to be revisited.

use log::{debug, info};
use std::ops::ControlFlow;

use crate::comparator::{IMPOSSIBLE, Score};
use crate::io::configuration::COST_SCALE;
use crate::search::frontier::{Frontier, VisitedSet};
use crate::shape::state::ShapeState;

/// Callbacks the engine drives
pub trait SearchHooks {
    /// Score a state before it is queued
    fn heuristic(&mut self, state: &ShapeState) -> Score;

    /// Called once for every state the engine expands
    fn node_action(&mut self, _state: &ShapeState) {}

    /// Accept `state` as good enough to stop
    fn terminate(&mut self, _state: &ShapeState) -> bool {
        false
    }

    /// Called when `best` improves on every heuristic seen so far
    fn flush(&mut self, _best: &ShapeState) {}

    /// Called for each state seeded with [`SearchEngine::add_new`]
    fn full_flush(&mut self, best: &ShapeState) {
        self.flush(best);
    }
}

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of steps per run; `None` is unbounded
    pub lifetime: Option<usize>,
    /// Divisor applied to accumulated cost in the frontier priority
    pub cost_scale: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lifetime: None,
            cost_scale: COST_SCALE,
        }
    }
}

/// Why a run ended; every variant is a normal outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The step budget ran out
    LifetimeExpired,
    /// No feasible state remained
    FrontierExhausted,
    /// The best remaining state cannot be placed in the reference
    Impossible,
    /// The termination hook accepted a state
    Terminated,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and expanded
    pub expanded: usize,
    /// States queued
    pub enqueued: usize,
    /// Children skipped because an equal raster was already queued
    pub duplicates: usize,
    /// States dropped at pop time for exceeding their cost bound
    pub pruned: usize,
}

/// Best-first search driver
pub struct SearchEngine<H: SearchHooks> {
    hooks: H,
    config: SearchConfig,
    frontier: Frontier,
    visited: VisitedSet,
    remaining: Option<usize>,
    best_heuristic: Option<u64>,
    best_state: Option<ShapeState>,
    stats: SearchStats,
}

impl<H: SearchHooks> SearchEngine<H> {
    /// Create an engine with an empty frontier
    pub fn new(hooks: H, config: SearchConfig) -> Self {
        Self {
            hooks,
            config,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            remaining: config.lifetime,
            best_heuristic: None,
            best_state: None,
            stats: SearchStats::default(),
        }
    }

    /// Seed a state: full cache flush, then score and queue it
    ///
    /// Returns `false` if an equal raster was already queued.
    pub fn add_new(&mut self, state: ShapeState) -> bool {
        self.hooks.full_flush(&state);
        self.add(state)
    }

    /// Score and queue a state unless an equal raster was already queued
    ///
    /// Returns `false` for duplicates, which are not scored.
    pub fn add(&mut self, state: ShapeState) -> bool {
        if !self.visited.insert(state.raster()) {
            self.stats.duplicates += 1;
            return false;
        }
        let score = self.hooks.heuristic(&state);
        let state = state.with_score(score);
        let priority = state.priority(self.config.cost_scale);
        self.frontier.push(state, priority);
        self.stats.enqueued += 1;
        true
    }

    /// Expand one state
    pub fn step(&mut self) -> ControlFlow<StopReason> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return ControlFlow::Break(StopReason::LifetimeExpired);
            }
            *remaining -= 1;
        }

        let state = loop {
            let Some(state) = self.frontier.pop() else {
                return ControlFlow::Break(StopReason::FrontierExhausted);
            };
            if state.over_budget() {
                self.stats.pruned += 1;
                continue;
            }
            break state;
        };

        let heuristic = state.heuristic().unwrap_or(IMPOSSIBLE);
        if heuristic == IMPOSSIBLE {
            return ControlFlow::Break(StopReason::Impossible);
        }

        self.stats.expanded += 1;
        debug!("expanding {}", state.describe());
        self.hooks.node_action(&state);

        if self.best_heuristic.is_none_or(|best| heuristic < best) {
            info!("new best: {}", state.describe());
            self.hooks.flush(&state);
            self.best_heuristic = Some(heuristic);
            self.best_state = Some(state.clone());
        }

        if self.hooks.terminate(&state) {
            return ControlFlow::Break(StopReason::Terminated);
        }

        for child in state.successors() {
            self.add(child);
        }
        ControlFlow::Continue(())
    }

    /// Step until a stop condition is reached
    pub fn run(&mut self) -> StopReason {
        loop {
            if let ControlFlow::Break(reason) = self.step() {
                info!(
                    "search stopped ({reason:?}) after {} expansions, {} queued, {} duplicates, {} pruned",
                    self.stats.expanded,
                    self.stats.enqueued,
                    self.stats.duplicates,
                    self.stats.pruned
                );
                return reason;
            }
        }
    }

    /// Clear the frontier, visited set, best state, counters and budget
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.remaining = self.config.lifetime;
        self.best_heuristic = None;
        self.best_state = None;
        self.stats = SearchStats::default();
    }

    /// Lowest heuristic expanded so far
    pub const fn best_heuristic(&self) -> Option<u64> {
        self.best_heuristic
    }

    /// State that set the current best heuristic
    pub const fn best_state(&self) -> Option<&ShapeState> {
        self.best_state.as_ref()
    }

    /// Counters since construction or the last reset
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Steps left in the budget; `None` if unbounded
    pub const fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Number of queued states
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of distinct rasters seen
    pub const fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Engine configuration
    pub const fn config(&self) -> SearchConfig {
        self.config
    }

    /// Borrow the hooks
    pub const fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutably borrow the hooks
    pub const fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Consume the engine, returning the hooks
    pub fn into_hooks(self) -> H {
        self.hooks
    }
}
