use crate::filters::{EmaFilter, NoiseEstimator};
use crate::hysteresis::ChangeDetector;

/// Mutable per-axis runtime state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    /// Smoothed position before sticky zone mapping
    pub smoother: EmaFilter,

    /// Ambient noise estimate
    pub noise: NoiseEstimator,

    /// Last position reported through `has_new_value`
    pub detector: ChangeDetector,
}

impl State {
    pub const fn new(initial_noise: f32) -> Self {
        Self {
            smoother: EmaFilter::new(),
            noise: NoiseEstimator::new(initial_noise),
            detector: ChangeDetector::new(0.0),
        }
    }

    /// Start over from zero, waiting for a first sample
    pub fn reset(&mut self, initial_noise: f32) {
        *self = Self::new(initial_noise);
    }

    /// Start over as if `norm` had been the first sample and `reported`
    /// had already been handed out
    pub fn reset_to(&mut self, norm: f32, reported: f32, initial_noise: f32) {
        self.smoother.reset_to(norm);
        self.noise.reset(initial_noise);
        self.detector.reset(reported);
    }
}
