/// Exponential moving average with first-sample initialization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaFilter {
    value: f32,
    initialized: bool,
}

impl EmaFilter {
    /// Create new EMA filter with uninitialized state
    pub const fn new() -> Self {
        Self {
            value: 0.0,
            initialized: false,
        }
    }

    /// Move towards `input` by `alpha` of the remaining distance.
    ///
    /// Returns the residual `input - value` measured before the update, or
    /// `None` on the first call, which jumps straight to `input`.
    pub fn apply(&mut self, input: f32, alpha: f32) -> Option<f32> {
        debug_assert!(
            (0.0..=1.0).contains(&alpha),
            "EMA alpha must be in range [0.0, 1.0], got {}",
            alpha
        );

        if !self.initialized {
            self.value = input;
            self.initialized = true;
            return None;
        }

        let residual = input - self.value;
        self.value += alpha * residual;
        Some(residual)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Jump to `value` as if it had been the first sample
    pub fn reset_to(&mut self, value: f32) {
        self.value = value;
        self.initialized = true;
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.initialized = false;
        self.value = 0.0;
    }
}

impl Default for EmaFilter {
    fn default() -> Self {
        Self::new()
    }
}
