/// Per-sample estimators
///
/// Both run in normalized f32 space and hold a few bytes of state each.
mod ema;
mod noise;

pub use ema::EmaFilter;
pub use noise::NoiseEstimator;
