use num_traits::float::FloatCore;

use crate::config::Config;
use crate::hysteresis::dynamic_threshold;
use crate::mode::{Auto, Clock, Live};
use crate::state::State;
use crate::timing::alpha_from_interval;

/// Adaptive smoothing and change detection for one analog input.
///
/// `M` is [`Live`] or [`Auto`] and decides which `update` is available.
#[derive(Debug, Clone)]
pub struct SmoothAxis<M> {
    config: Config<M>,
    state: State,
}

impl<M> SmoothAxis<M> {
    pub fn new(config: Config<M>) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "init: max_raw={} settle_time={}s",
            config.max_raw(),
            config.settle_time_sec()
        );

        let state = State::new(config.tuning().initial_noise_norm);
        Self { config, state }
    }

    pub fn config(&self) -> &Config<M> {
        &self.config
    }

    fn process(&mut self, raw: u16, alpha: f32) {
        // Normalize input to 0.0..1.0, clipping dead zones
        let norm = self.config.dead_zone().normalize(raw, self.config.max_raw());

        // Smooth; the first sample only seeds the filter
        let Some(residual) = self.state.smoother.apply(norm, alpha) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("first sample: norm={}", norm);
            return;
        };

        // Same pre-update residual drives the noise estimate
        self.state
            .noise
            .update(residual, self.config.tuning().noise_smoothing_rate);
    }

    /// Forget all history and wait for a new first sample at zero.
    ///
    /// Auto mode keeps its calibration.
    pub fn reset(&mut self) {
        self.state.reset(self.config.tuning().initial_noise_norm);
    }

    /// Forget all history and continue from `raw` without reporting a jump.
    ///
    /// Auto mode keeps its calibration.
    pub fn reset_to(&mut self, raw: u16) {
        let norm = self.config.dead_zone().normalize(raw, self.config.max_raw());
        let reported = self.config.sticky_zone().apply(norm);
        self.state
            .reset_to(norm, reported, self.config.tuning().initial_noise_norm);
    }

    pub fn has_first_sample(&self) -> bool {
        self.state.smoother.is_initialized()
    }

    /// Smoothed position in `[0.0, 1.0]` with sticky zones applied.
    ///
    /// `0.0` until the first sample.
    pub fn norm(&self) -> f32 {
        if !self.has_first_sample() {
            return 0.0;
        }
        self.config.sticky_zone().apply(self.state.smoother.value())
    }

    /// Smoothed position scaled to `[0, max_raw]`.
    pub fn value(&self) -> u16 {
        to_scaled(self.norm(), self.config.max_raw())
    }

    /// True when the position moved enough since the last `true`.
    ///
    /// Calling it again without a new update returns `false`.
    pub fn has_new_value(&mut self) -> bool {
        if !self.has_first_sample() {
            return false;
        }

        let current = self.norm();
        let in_sticky_zone = self
            .config
            .sticky_zone()
            .contains(self.state.smoother.value());
        let threshold = self.threshold_norm();

        self.state
            .detector
            .check(current, in_sticky_zone, threshold, self.config.quantum())
    }

    /// Current noise estimate, normalized.
    pub fn noise_norm(&self) -> f32 {
        self.state.noise.estimate()
    }

    /// Movement currently required to report a change outside the sticky zones.
    pub fn threshold_norm(&self) -> f32 {
        let tuning = self.config.tuning();
        dynamic_threshold(
            self.state.noise.estimate(),
            tuning.threshold_multiplier,
            self.config.threshold_attenuation(),
            tuning.max_threshold_norm,
        )
    }

    /// [`threshold_norm`](Self::threshold_norm) in raw units, rounded to nearest.
    pub fn threshold_value(&self) -> u16 {
        let threshold = self.threshold_norm();
        if threshold <= 0.0 {
            return 0;
        }

        let max_f = f32::from(self.config.max_raw());
        (threshold * max_f).round().min(max_f) as u16
    }
}

impl SmoothAxis<Live> {
    /// Feed one sample taken `dt_sec` seconds after the previous one.
    ///
    /// `dt_sec <= 0` takes the sample without smoothing. Negative values
    /// panic in debug builds.
    pub fn update(&mut self, raw: u16, dt_sec: f32) {
        let alpha = alpha_from_interval(self.config.decay_rate(), dt_sec);
        self.process(raw, alpha);
    }
}

impl<C: Clock> SmoothAxis<Auto<C>> {
    /// Feed one sample. The loop interval is measured during warm-up and
    /// then frozen.
    pub fn update(&mut self, raw: u16) {
        let decay_rate = self.config.decay_rate();
        let tuning = *self.config.tuning();
        let alpha = self.config.mode_mut().next_alpha(decay_rate, &tuning);
        self.process(raw, alpha);
    }

    pub fn is_calibrated(&self) -> bool {
        self.config.mode().calibration().is_calibrated()
    }

    /// Average loop interval measured during warm-up.
    pub fn calibrated_interval_sec(&self) -> Option<f32> {
        self.config.mode().calibration().interval_sec()
    }
}

/// Map a normalized value to `[0, max_raw]`, rounding to nearest.
///
/// Values within one step of either end snap to the exact endpoint.
fn to_scaled(norm: f32, max_raw: u16) -> u16 {
    let max_f = f32::from(max_raw);
    let low = 1.0 / max_f;
    let high = (max_f - 1.0) / max_f;

    // With two or fewer steps the snap bands would overlap
    if low < high {
        if norm <= low {
            return 0;
        }
        if norm >= high {
            return max_raw;
        }
    }

    (norm * max_f).round().clamp(0.0, max_f) as u16
}
