//! Settle time to smoothing coefficient conversion.
//!
//! The filter is tuned in physical time: a step error must shrink to a fixed
//! residual fraction after `settle_time_sec`. From that we derive a decay rate
//! `k` once, and turn `k` plus an elapsed interval into a per-sample alpha.

/// Bounds for the convergence residual so `ln` stays finite and negative.
const RESIDUAL_MIN: f32 = 1e-4;
const RESIDUAL_MAX: f32 = 0.9999;

/// Exponent clamp for `exp(k * dt)`.
const EXPONENT_MIN: f32 = -20.0;

/// Decay rate `k = ln(residual) / settle_time_sec`.
///
/// Returns `0.0` for non-positive (or NaN) settle times, which disables
/// smoothing entirely: every sample is taken as-is.
pub fn decay_rate(settle_time_sec: f32, convergence_residual: f32) -> f32 {
    if settle_time_sec.is_nan() || settle_time_sec <= 0.0 {
        return 0.0;
    }

    let residual = convergence_residual.clamp(RESIDUAL_MIN, RESIDUAL_MAX);
    libm::logf(residual) / settle_time_sec
}

/// Per-sample EMA coefficient for an elapsed interval: `1 - exp(k * dt)`.
///
/// Falls back to `1.0` (instant convergence) when `dt <= 0` or `k == 0`.
/// A negative interval means time ran backwards upstream; checked builds
/// panic on it.
pub fn alpha_from_interval(decay_rate: f32, dt_sec: f32) -> f32 {
    if dt_sec > 0.0 && decay_rate != 0.0 {
        let exponent = (decay_rate * dt_sec).clamp(EXPONENT_MIN, 0.0);
        return 1.0 - libm::expf(exponent);
    }

    debug_assert!(
        dt_sec >= 0.0 || decay_rate == 0.0,
        "elapsed time must not be negative, got {}",
        dt_sec
    );
    1.0
}

/// Threshold damping for long settle times: `1 / max(settle / reference, 1)`.
///
/// Heavier smoothing already suppresses most jitter, so the noise-driven
/// threshold needs less headroom.
pub fn threshold_attenuation(settle_time_sec: f32, reference_settle_sec: f32) -> f32 {
    let ratio = settle_time_sec / reference_settle_sec;
    if ratio > 1.0 { 1.0 / ratio } else { 1.0 }
}
