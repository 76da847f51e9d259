//! Adaptive smoothing for noisy single-axis analog inputs.
//!
//! Turns raw ADC readings from a potentiometer or slider into a stable
//! position plus a "meaningful change" flag. The only required tuning is the
//! settle time: how long a step change takes to reach 95% of its target.
//!
//! ```
//! use smooth_axis::{Config, SmoothAxis};
//!
//! let mut axis = SmoothAxis::new(Config::live(1023, 0.25));
//!
//! for raw in [0, 512, 512, 512] {
//!     axis.update(raw, 0.016);
//!     if axis.has_new_value() {
//!         let _position = axis.value();
//!     }
//! }
//! ```
//!
//! Each sample is normalized through the dead zone, smoothed with a
//! time-based EMA, and its residual feeds a noise estimate. Reports are
//! gated by a threshold that scales with that estimate, except inside the
//! sticky zones at either end, where every step is reported.
#![no_std]

#[cfg(test)]
extern crate std;

mod axis;
mod config;
mod state;
pub mod filters;
pub mod hysteresis;
pub mod mode;
pub mod timing;
pub mod zones;

pub use axis::SmoothAxis;
pub use config::{Config, ConfigError, Tuning, DEFAULT_MAX_THRESHOLD, DEFAULT_STICKY_ZONE};
pub use mode::{Auto, Calibration, Clock, Live};
pub use zones::{DeadZone, StickyZone, MAX_STICKY_ZONE};
