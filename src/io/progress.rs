//! Terminal progress display for simulation runs

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ticks {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over the update cycles of one run
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar expecting `ticks` update cycles
    pub fn new(ticks: usize) -> Self {
        let bar = ProgressBar::new(ticks as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Report a finished cycle and the current number of placed cells
    pub fn tick(&self, placed_cells: usize) {
        self.bar.inc(1);
        self.bar.set_message(format!("{placed_cells} cells"));
    }

    /// Cycles reported so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Leave the bar at its final state
    pub fn finish(&self) {
        self.bar.finish();
    }
}
