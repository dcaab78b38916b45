use crate::{BackdropError, BackdropResult};

/// Threshold the search starts from.
pub const DEFAULT_INITIAL_THRESHOLD: i32 = 50;
/// Amount the threshold drops after a pass over the whole RGB cube finds nothing.
pub const DEFAULT_DECAY_STEP: i32 = 10;
/// Number of traced shape colors sampled before the background search.
pub const DEFAULT_SAMPLE_LIMIT: usize = 500;

/// How a single pass over the RGB cube is scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Visit candidates one by one in counter order.
    #[default]
    Sequential,
    /// Split each pass across the rayon thread pool; the lowest accepted counter still wins.
    Parallel,
}

/// Options for the distinct color search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub initial_threshold: i32,
    pub decay_step: i32,
    pub strategy: SearchStrategy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            initial_threshold: DEFAULT_INITIAL_THRESHOLD,
            decay_step: DEFAULT_DECAY_STEP,
            strategy: SearchStrategy::Sequential,
        }
    }
}

impl SearchOptions {
    /// Set the threshold the first pass uses.
    pub fn with_initial_threshold(mut self, initial_threshold: i32) -> Self {
        self.initial_threshold = initial_threshold;
        self
    }

    /// Set how much the threshold drops after an exhausted pass.
    pub fn with_decay_step(mut self, decay_step: i32) -> Self {
        self.decay_step = decay_step;
        self
    }

    /// Set the scan strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check that the search is guaranteed to terminate with these options.
    pub fn validate(&self) -> BackdropResult<()> {
        if self.decay_step <= 0 {
            return Err(BackdropError::InvalidArgument(format!(
                "decay step must be positive, got {}",
                self.decay_step
            )));
        }
        Ok(())
    }
}
