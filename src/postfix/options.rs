//! Repair pass configuration.

/// Default bound on repair passes per table.
pub const DEFAULT_MAX_PASSES: usize = 8;

/// Options for the table repair pass.
#[derive(Debug, Clone)]
pub struct RepairOptions {
    /// Maximum number of full rule passes before giving up
    pub max_passes: usize,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl RepairOptions {
    /// Create new repair options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pass bound (at least 1).
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes.max(1);
        self
    }
}
