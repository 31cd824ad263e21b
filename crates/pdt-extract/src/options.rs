//! Tunables of the extraction heuristics.

/// Configuration for [`crate::analyze_with_options`].
///
/// The defaults reproduce the behaviour production schedules were tuned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Drop grid dates falling on Saturday or Sunday.
    pub skip_grid_weekends: bool,
    /// Raw lines inspected above a month row when looking for day numbers.
    pub grid_lookback_lines: usize,
    /// Fewer unique dates than this lets the sequential counter take over.
    pub sequential_threshold: usize,
    /// Characters scanned after the "jour de tournage" header.
    pub vertical_scan_chars: usize,
    /// Exclusive upper bound for day-counter candidates.
    pub vertical_max_day: u32,
    /// Largest step in the day counter that may still be accepted.
    pub max_confirmed_jump: u32,
    /// Successors (+1, +2, ...) that must exist to accept a step above 2.
    pub jump_confirmations: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            skip_grid_weekends: true,
            grid_lookback_lines: 40,
            sequential_threshold: 2,
            vertical_scan_chars: 5000,
            vertical_max_day: 150,
            max_confirmed_jump: 10,
            jump_confirmations: 2,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn with_skip_grid_weekends(mut self, enable: bool) -> Self {
        self.skip_grid_weekends = enable;
        self
    }

    #[must_use]
    pub fn with_max_confirmed_jump(mut self, max_jump: u32) -> Self {
        self.max_confirmed_jump = max_jump;
        self
    }

    #[must_use]
    pub fn with_jump_confirmations(mut self, confirmations: u32) -> Self {
        self.jump_confirmations = confirmations;
        self
    }

    #[must_use]
    pub fn with_vertical_scan_chars(mut self, chars: usize) -> Self {
        self.vertical_scan_chars = chars;
        self
    }
}
