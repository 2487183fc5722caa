//! Terminal progress for search rounds

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static ROUND_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{prefix} {spinner} {pos} expanded {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Progress display for one search round at a time
///
/// Bounded rounds show a bar over the step budget; unbounded rounds show a
/// spinner with the expansion count. The message tracks the best distance.
pub struct SearchProgress {
    bar: ProgressBar,
    round: usize,
    best: Option<u64>,
}

impl SearchProgress {
    /// Progress drawn to the terminal
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Progress that draws nothing
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            round: 0,
            best: None,
        }
    }

    /// Begin a round with an optional step budget
    pub fn start_round(&mut self, round: usize, budget: Option<usize>) {
        self.round = round;
        self.best = None;
        match budget {
            Some(steps) => {
                self.bar.set_style(ROUND_STYLE.clone());
                self.bar.set_length(steps as u64);
            }
            None => self.bar.set_style(SPINNER_STYLE.clone()),
        }
        self.bar.set_position(0);
        self.bar.set_prefix(format!("round {round}"));
        self.bar.set_message(String::new());
    }

    /// Count one expanded state
    pub fn record_node(&self) {
        self.bar.inc(1);
    }

    /// Show a new best distance
    pub fn record_best(&mut self, distance: u64) {
        self.best = Some(distance);
        self.bar.set_message(format!("best {distance}"));
    }

    /// Current round number
    pub const fn round(&self) -> usize {
        self.round
    }

    /// Best distance shown this round
    pub const fn best(&self) -> Option<u64> {
        self.best
    }

    /// Number of states counted this round
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Leave the final state of the round on screen
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Remove the display
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}
