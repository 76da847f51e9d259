//! Interval sourcing modes.
//!
//! An axis either receives the elapsed time with every sample ([`Live`]) or
//! measures the loop rate itself during a warm-up window ([`Auto`]). The mode
//! is a type parameter of the axis, so each one only exposes the matching
//! `update` entry point.

use crate::config::Tuning;
use crate::timing::alpha_from_interval;

/// Monotonic millisecond time source for [`Auto`] mode.
///
/// Readings may wrap around `u32::MAX`; deltas are taken with wrapping
/// subtraction.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    #[inline]
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Elapsed time is supplied by the caller on every update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Live;

/// Elapsed time is measured from a [`Clock`] during warm-up and then frozen.
#[derive(Debug, Clone)]
pub struct Auto<C> {
    clock: C,
    calibration: Calibration,
}

impl<C: Clock> Auto<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            calibration: Calibration::new(),
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Advance calibration by one sample and return the alpha to use for it.
    pub(crate) fn next_alpha(&mut self, decay_rate: f32, tuning: &Tuning) -> f32 {
        if !self.calibration.is_calibrated() {
            let now_ms = self.clock.now_ms();
            self.calibration.observe(now_ms, decay_rate, tuning);
        }
        self.calibration.alpha(decay_rate, tuning)
    }
}

/// One-shot warm-up state for [`Auto`] mode.
///
/// Starts in `Calibrating` and moves to `Calibrated` exactly once. Resetting
/// the axis does not re-enter calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    Calibrating {
        /// Number of intervals measured so far
        samples_seen: u16,
        /// Sum of the clamped intervals in seconds
        accumulated_sec: f32,
        /// Previous clock reading, `None` until the first sample
        last_ms: Option<u32>,
    },
    Calibrated {
        /// Frozen smoothing coefficient
        alpha: f32,
        /// Average loop interval in seconds
        interval_sec: f32,
    },
}

impl Calibration {
    pub const fn new() -> Self {
        Calibration::Calibrating {
            samples_seen: 0,
            accumulated_sec: 0.0,
            last_ms: None,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self, Calibration::Calibrated { .. })
    }

    pub fn interval_sec(&self) -> Option<f32> {
        match self {
            Calibration::Calibrated { interval_sec, .. } => Some(*interval_sec),
            Calibration::Calibrating { .. } => None,
        }
    }

    /// Smoothing coefficient for the current state.
    ///
    /// Before warm-up completes this assumes the fallback interval (~60 Hz).
    pub fn alpha(&self, decay_rate: f32, tuning: &Tuning) -> f32 {
        match self {
            Calibration::Calibrated { alpha, .. } => *alpha,
            Calibration::Calibrating { .. } => {
                alpha_from_interval(decay_rate, tuning.fallback_interval_sec)
            }
        }
    }

    /// Record one clock reading.
    ///
    /// The first reading only seeds the timestamp. Each later reading adds the
    /// clamped delta; after `calibration_cycles` deltas the average interval is
    /// converted into a fixed alpha.
    pub fn observe(&mut self, now_ms: u32, decay_rate: f32, tuning: &Tuning) {
        let Calibration::Calibrating {
            samples_seen,
            accumulated_sec,
            last_ms,
        } = self
        else {
            return;
        };

        let Some(previous_ms) = last_ms.replace(now_ms) else {
            return;
        };

        let dt_ms = (now_ms.wrapping_sub(previous_ms) as f32)
            .clamp(tuning.min_interval_ms, tuning.max_interval_ms);
        *accumulated_sec += dt_ms / 1000.0;
        *samples_seen += 1;

        if *samples_seen >= tuning.calibration_cycles.max(1) {
            let interval_sec = *accumulated_sec / f32::from(*samples_seen);
            let alpha = alpha_from_interval(decay_rate, interval_sec);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                "calibration complete: cycles={} dt_avg={}ms alpha={}",
                *samples_seen,
                interval_sec * 1000.0,
                alpha
            );

            *self = Calibration::Calibrated {
                alpha,
                interval_sec,
            };
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}
