use num_traits::float::FloatCore;

/// Ambient noise estimate driven by residual sign flips.
///
/// Noise jitters around the true value, so its residual keeps changing sign.
/// Real movement leaves the smoothed value chasing the input with a residual
/// of constant sign. Flipped residuals feed their magnitude into a slow EMA;
/// same-signed ones feed zero and let the estimate decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseEstimator {
    estimate: f32,
    last_residual: f32,
}

impl NoiseEstimator {
    pub const fn new(initial: f32) -> Self {
        Self {
            estimate: initial,
            last_residual: 0.0,
        }
    }

    /// Feed one pre-update residual. Returns the new estimate.
    pub fn update(&mut self, residual: f32, rate: f32) -> f32 {
        let flipped = sign_flipped(residual, self.last_residual);
        self.last_residual = residual;

        let sample = if flipped { residual.abs() } else { 0.0 };
        let previous = self.estimate;
        self.estimate = ((1.0 - rate) * previous + rate * sample).clamp(0.0, 1.0);

        #[cfg(feature = "tracing")]
        {
            if (self.estimate - previous).abs() > 0.01 {
                tracing::debug!(
                    "noise: {} -> {} ({})",
                    previous,
                    self.estimate,
                    if flipped { "spike" } else { "settling" }
                );
            }
        }

        self.estimate
    }

    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    pub fn reset(&mut self, initial: f32) {
        self.estimate = initial;
        self.last_residual = 0.0;
    }
}

/// Zero counts as its own sign, and two zeros in a row count as a flip.
fn sign_flipped(current: f32, previous: f32) -> bool {
    let current = sign_of(current);
    let previous = sign_of(previous);
    current != previous || current == 0
}

fn sign_of(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
