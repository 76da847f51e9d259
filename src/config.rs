use crate::mode::{Auto, Clock, Live};
use crate::timing::{decay_rate, threshold_attenuation};
use crate::zones::{DeadZone, StickyZone};

/// Reference resolution the default "feel" constants were tuned against.
const CANONICAL_MAX: f32 = 1023.0;

/// ~0.3% magnetic zone at each end
pub const DEFAULT_STICKY_ZONE: f32 = 3.0 / CANONICAL_MAX;

/// ~2.9% ceiling for the dynamic threshold
pub const DEFAULT_MAX_THRESHOLD: f32 = 30.0 / CANONICAL_MAX;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidNoiseSmoothingRate,
    InvalidThresholdMultiplier,
    InvalidMaxThreshold,
    InvalidInitialNoise,
    ZeroCalibrationCycles,
    InvalidIntervalClamp,
    InvalidFallbackInterval,
    InvalidConvergenceResidual,
    InvalidReferenceSettleTime,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidNoiseSmoothingRate => {
                write!(f, "noise_smoothing_rate must be in range (0.0, 1.0]")
            }
            ConfigError::InvalidThresholdMultiplier => {
                write!(f, "threshold_multiplier must be finite and non-negative")
            }
            ConfigError::InvalidMaxThreshold => {
                write!(f, "max_threshold_norm must be in range [0.0, 1.0]")
            }
            ConfigError::InvalidInitialNoise => {
                write!(f, "initial_noise_norm must be in range [0.0, 1.0]")
            }
            ConfigError::ZeroCalibrationCycles => write!(f, "calibration_cycles must be > 0"),
            ConfigError::InvalidIntervalClamp => {
                write!(f, "min_interval_ms must be positive and not exceed max_interval_ms")
            }
            ConfigError::InvalidFallbackInterval => {
                write!(f, "fallback_interval_sec must be positive")
            }
            ConfigError::InvalidConvergenceResidual => {
                write!(f, "convergence_residual must be in range (0.0, 1.0)")
            }
            ConfigError::InvalidReferenceSettleTime => {
                write!(f, "threshold_reference_settle_sec must be positive")
            }
        }
    }
}

/// Tuning constants that shape how the filter "feels".
///
/// The defaults suit typical potentiometers and sliders; most users only
/// touch `settle_time_sec` on [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// EMA rate of the noise estimate. Default `0.005`.
    pub noise_smoothing_rate: f32,

    /// Headroom applied to the noise estimate to get the change threshold. Default `3.5`.
    pub threshold_multiplier: f32,

    /// Upper bound for the dynamic threshold, normalized. Default `30/1023`.
    pub max_threshold_norm: f32,

    /// Noise estimate after init and reset. Default `0.01`.
    pub initial_noise_norm: f32,

    /// Intervals measured before [`Auto`] mode freezes its alpha. Default `256`.
    pub calibration_cycles: u16,

    /// Measured intervals are clamped to `[min_interval_ms, max_interval_ms]`.
    /// Defaults `0.1` (10 kHz) and `50.0` (20 Hz).
    pub min_interval_ms: f32,
    pub max_interval_ms: f32,

    /// Interval assumed before calibration completes. Default `0.016` (~60 Hz).
    pub fallback_interval_sec: f32,

    /// Fraction of a step error left after `settle_time_sec`. Default `0.05`.
    pub convergence_residual: f32,

    /// Settle time above which the threshold is attenuated. Default `0.1`.
    pub threshold_reference_settle_sec: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            noise_smoothing_rate: 0.005,
            threshold_multiplier: 3.5,
            max_threshold_norm: DEFAULT_MAX_THRESHOLD,
            initial_noise_norm: 0.01,
            calibration_cycles: 256,
            min_interval_ms: 0.1,
            max_interval_ms: 50.0,
            fallback_interval_sec: 0.016,
            convergence_residual: 0.05,
            threshold_reference_settle_sec: 0.1,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.noise_smoothing_rate > 0.0 && self.noise_smoothing_rate <= 1.0) {
            return Err(ConfigError::InvalidNoiseSmoothingRate);
        }

        if !(self.threshold_multiplier.is_finite() && self.threshold_multiplier >= 0.0) {
            return Err(ConfigError::InvalidThresholdMultiplier);
        }

        if !(0.0..=1.0).contains(&self.max_threshold_norm) {
            return Err(ConfigError::InvalidMaxThreshold);
        }

        if !(0.0..=1.0).contains(&self.initial_noise_norm) {
            return Err(ConfigError::InvalidInitialNoise);
        }

        if self.calibration_cycles == 0 {
            return Err(ConfigError::ZeroCalibrationCycles);
        }

        // Also rejects NaN bounds
        if !(self.min_interval_ms > 0.0 && self.min_interval_ms <= self.max_interval_ms) {
            return Err(ConfigError::InvalidIntervalClamp);
        }

        if !(self.fallback_interval_sec > 0.0) {
            return Err(ConfigError::InvalidFallbackInterval);
        }

        if !(self.convergence_residual > 0.0 && self.convergence_residual < 1.0) {
            return Err(ConfigError::InvalidConvergenceResidual);
        }

        if !(self.threshold_reference_settle_sec > 0.0) {
            return Err(ConfigError::InvalidReferenceSettleTime);
        }

        Ok(())
    }
}

/// Axis configuration. Built once, then moved into a [`SmoothAxis`].
///
/// Out-of-range values are sanitized instead of rejected, so a badly tuned
/// axis still produces finite output:
/// - `max_raw == 0` becomes `1`
/// - an inverted dead zone falls back to the full range
/// - the sticky zone is clamped to `[0.0, 0.49]`
/// - a non-positive settle time disables smoothing
///
/// [`SmoothAxis`]: crate::SmoothAxis
#[derive(Debug, Clone)]
pub struct Config<M> {
    max_raw: u16,
    settle_time_sec: f32,
    dead_zone: DeadZone,
    sticky_zone: StickyZone,
    tuning: Tuning,
    mode: M,

    decay_rate: f32,
    threshold_attenuation: f32,
}

impl Config<Live> {
    /// Elapsed time is passed to every `update` call.
    pub fn live(max_raw: u16, settle_time_sec: f32) -> Self {
        Self::with_mode(max_raw, settle_time_sec, Live)
    }
}

impl<C: Clock> Config<Auto<C>> {
    /// The loop interval is measured from `clock` during warm-up.
    pub fn auto(max_raw: u16, settle_time_sec: f32, clock: C) -> Self {
        Self::with_mode(max_raw, settle_time_sec, Auto::new(clock))
    }
}

impl<M> Config<M> {
    fn with_mode(max_raw: u16, settle_time_sec: f32, mode: M) -> Self {
        let tuning = Tuning::default();
        Self {
            max_raw: max_raw.max(1),
            settle_time_sec,
            dead_zone: DeadZone::full_range(),
            sticky_zone: StickyZone::new(DEFAULT_STICKY_ZONE),
            tuning,
            mode,
            decay_rate: decay_rate(settle_time_sec, tuning.convergence_residual),
            threshold_attenuation: threshold_attenuation(
                settle_time_sec,
                tuning.threshold_reference_settle_sec,
            ),
        }
    }

    /// Clip unreliable ends of the raw range. Readings at or below `full_off`
    /// map to 0, at or above `full_on` to 1.
    pub fn with_dead_zone(mut self, full_off: f32, full_on: f32) -> Self {
        self.dead_zone = DeadZone::new(full_off, full_on);
        self
    }

    /// Endpoint hysteresis width, normalized.
    pub fn with_sticky_zone(mut self, margin: f32) -> Self {
        self.sticky_zone = StickyZone::new(margin);
        self
    }

    /// Override the default tuning constants.
    pub fn with_tuning(mut self, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        self.tuning = tuning;
        self.decay_rate = decay_rate(self.settle_time_sec, tuning.convergence_residual);
        self.threshold_attenuation =
            threshold_attenuation(self.settle_time_sec, tuning.threshold_reference_settle_sec);
        Ok(self)
    }

    pub fn max_raw(&self) -> u16 {
        self.max_raw
    }

    pub fn settle_time_sec(&self) -> f32 {
        self.settle_time_sec
    }

    pub fn dead_zone(&self) -> DeadZone {
        self.dead_zone
    }

    pub fn sticky_zone(&self) -> StickyZone {
        self.sticky_zone
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    pub(crate) fn mode_mut(&mut self) -> &mut M {
        &mut self.mode
    }

    /// `ln(residual) / settle_time_sec`, or `0.0` when smoothing is disabled.
    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    pub fn threshold_attenuation(&self) -> f32 {
        self.threshold_attenuation
    }

    /// One step of the integer output, normalized.
    pub(crate) fn quantum(&self) -> f32 {
        1.0 / f32::from(self.max_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_derived_values() {
        let config = Config::live(1023, 0.25);
        assert!((config.decay_rate() - (-11.982_93)).abs() < 1e-3);
        assert!((config.threshold_attenuation() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_with_tuning_recomputes_derived_values() {
        let tuning = Tuning {
            convergence_residual: 0.01,
            threshold_reference_settle_sec: 0.05,
            ..Tuning::default()
        };
        let config = Config::live(1023, 0.25).with_tuning(tuning).unwrap();

        let expected_k = libm::logf(0.01) / 0.25;
        assert!((config.decay_rate() - expected_k).abs() < 1e-4);
        assert!((config.threshold_attenuation() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_error_display() {
        use std::string::ToString;

        assert_eq!(
            ConfigError::ZeroCalibrationCycles.to_string(),
            "calibration_cycles must be > 0"
        );
    }
}
