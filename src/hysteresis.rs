//! Noise-scaled change detection.
//!
//! Operates on normalized values (0.0-1.0) after the sticky zone mapping.

use num_traits::float::FloatCore;

/// Minimum movement required to report a change outside the sticky zones.
///
/// `clamp(noise * multiplier * attenuation, 0, max)`
#[inline]
pub fn dynamic_threshold(noise: f32, multiplier: f32, attenuation: f32, max: f32) -> f32 {
    (noise * multiplier * attenuation).clamp(0.0, max)
}

/// Tracks the last value handed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChangeDetector {
    last_reported: f32,
}

impl ChangeDetector {
    pub const fn new(last_reported: f32) -> Self {
        Self { last_reported }
    }

    pub fn last_reported(&self) -> f32 {
        self.last_reported
    }

    pub fn reset(&mut self, value: f32) {
        self.last_reported = value;
    }

    /// Decide whether `current` differs enough from the last report.
    ///
    /// - Changes of at most `quantum` (one integer output step) are dropped.
    /// - Inside the sticky zones any larger change is reported.
    /// - Elsewhere the change must exceed `threshold`.
    ///
    /// On report, `current` becomes the new reference.
    pub fn check(&mut self, current: f32, in_sticky_zone: bool, threshold: f32, quantum: f32) -> bool {
        let diff = (current - self.last_reported).abs();

        if diff <= quantum {
            return false;
        }

        if in_sticky_zone || diff > threshold {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "new value: {} (diff={} thresh={} {})",
                current,
                diff,
                threshold,
                if in_sticky_zone { "sticky" } else { "normal" }
            );

            self.last_reported = current;
            return true;
        }

        false
    }
}
