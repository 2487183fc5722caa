//! Iterative decomposition of a reference into placed shapes
//!
//! Each round searches for the shape that best fits what is left of the
//! reference, paints it into the reconstruction if that brings the
//! reconstruction closer to the reference, clears its foreground from the
//! residual, and resets the engine for the next round.

use log::info;

use crate::comparator::{ComparatorConfig, ComparatorKind, build_comparator};
use crate::io::configuration::DEFAULT_MAX_ROUNDS;
use crate::io::error::Result;
use crate::io::progress::SearchProgress;
use crate::raster::grid::Raster;
use crate::search::engine::{SearchConfig, SearchEngine, StopReason};
use crate::search::hooks::ComparatorHooks;
use crate::shape::state::ShapeState;
use crate::shape::variant::Variant;

/// Decomposition tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposeConfig {
    /// Upper bound on rounds
    pub max_rounds: usize,
    /// Comparator built against each residual
    pub comparator: ComparatorKind,
    /// Comparator tuning
    pub comparator_config: ComparatorConfig,
    /// Engine tuning applied to every round
    pub search: SearchConfig,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            comparator: ComparatorKind::default(),
            comparator_config: ComparatorConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// A shape accepted in one round
#[derive(Debug, Clone)]
pub struct Placement {
    /// Round the shape was accepted in, from zero
    pub round: usize,
    /// The accepted state; its offset is the placement
    pub state: ShapeState,
    /// Why the round's search stopped
    pub stop: StopReason,
}

/// Outcome of a decomposition
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Accepted shapes in order
    pub placements: Vec<Placement>,
    /// Union of all accepted shapes
    pub reconstruction: Raster,
    /// Reference foreground not yet covered
    pub residual: Raster,
}

/// Decompose `reference` into shapes drawn from `variants`
///
/// Stops when the residual has no foreground, when a round finds nothing that
/// improves the reconstruction, or after `max_rounds`.
///
/// # Errors
///
/// Returns an error if a comparator cannot be built from the configuration
pub fn decompose(
    reference: &Raster,
    variants: &[Variant],
    config: &DecomposeConfig,
    progress: Option<SearchProgress>,
) -> Result<Decomposition> {
    let (rows, cols) = reference.dim();
    let mut residual = reference.clone();
    let mut reconstruction = Raster::new(rows, cols);
    let mut placements = Vec::new();

    let comparator = build_comparator(
        config.comparator,
        residual.clone(),
        None,
        config.comparator_config,
    )?;
    let mut hooks = ComparatorHooks::new(comparator);
    if let Some(progress) = progress {
        hooks = hooks.with_progress(progress);
    }
    let mut engine = SearchEngine::new(hooks, config.search);

    for round in 0..config.max_rounds {
        if residual.foreground_count() == 0 {
            info!("residual empty after {round} rounds");
            break;
        }
        if round > 0 {
            engine.reset();
            engine.hooks_mut().replace_comparator(build_comparator(
                config.comparator,
                residual.clone(),
                None,
                config.comparator_config,
            )?);
        }
        if let Some(progress) = engine.hooks_mut().progress_mut() {
            progress.start_round(round, config.search.lifetime);
        }

        for &variant in variants {
            engine.add_new(ShapeState::new(variant));
        }
        let stop = engine.run();
        if let Some(progress) = engine.hooks_mut().progress_mut() {
            progress.finish();
        }

        let Some(best) = engine.best_state().cloned() else {
            info!("round {round}: nothing placeable");
            break;
        };
        let candidate = reconstruction.overlay(best.raster(), best.offset());
        let before = reference.diff(&reconstruction)?;
        let after = reference.diff(&candidate)?;
        if after >= before {
            info!("round {round}: best shape does not improve the reconstruction ({before} -> {after})");
            break;
        }

        info!(
            "round {round}: placed {} ({before} -> {after} cells differ)",
            best.describe()
        );
        residual = residual.subtract(best.raster(), best.offset());
        reconstruction = candidate;
        placements.push(Placement {
            round,
            state: best,
            stop,
        });
    }

    if let Some(progress) = engine.hooks_mut().progress_mut() {
        progress.clear();
    }

    Ok(Decomposition {
        placements,
        reconstruction,
        residual,
    })
}
