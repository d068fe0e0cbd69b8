/**
 * Construction-time settings of a generator.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// A unique list of `n` strings may take at most `n * attempts_factor`
    /// renders
    pub attempts_factor: usize,
}

impl GeneratorConfig {
    pub const DEFAULT_ATTEMPTS_FACTOR: usize = 10;

    pub fn new() -> Self {
        Self{ attempts_factor: Self::DEFAULT_ATTEMPTS_FACTOR }
    }

    pub fn with_attempts_factor(mut self, attempts_factor: usize) -> Self {
        self.attempts_factor = attempts_factor;
        self
    }

    /// Renders allowed for a unique list of `count` strings.
    pub fn attempts_budget(&self, count: usize) -> usize {
        count.saturating_mul(self.attempts_factor)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
