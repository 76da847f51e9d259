//! Dead zone and sticky zone mapping.
//!
//! Both operate on normalized values (0.0-1.0). The dead zone shapes the
//! input before smoothing; the sticky zone shapes the output after it.

/// Largest sticky margin. At 0.5 floor and ceiling would coincide.
pub const MAX_STICKY_ZONE: f32 = 0.49;

/// Input clipping for hardware regions that never read reliably.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadZone {
    full_off: f32,
    full_on: f32,
}

impl DeadZone {
    /// Create a dead zone. Bounds are clamped to `[0.0, 1.0]`; an empty or
    /// inverted band falls back to the full range.
    pub fn new(full_off: f32, full_on: f32) -> Self {
        let full_off = full_off.clamp(0.0, 1.0);
        let full_on = full_on.clamp(0.0, 1.0);

        // Negated so NaN bounds also fall back
        if !(full_on > full_off) {
            return Self::full_range();
        }

        Self { full_off, full_on }
    }

    pub const fn full_range() -> Self {
        Self {
            full_off: 0.0,
            full_on: 1.0,
        }
    }

    pub fn full_off(&self) -> f32 {
        self.full_off
    }

    pub fn full_on(&self) -> f32 {
        self.full_on
    }

    /// Map a raw reading in `[0, max_raw]` to `[0.0, 1.0]`.
    ///
    /// Readings at or below `full_off` give exactly 0.0, at or above
    /// `full_on` exactly 1.0, and the band between is stretched to fill
    /// the whole range.
    pub fn normalize(&self, raw: u16, max_raw: u16) -> f32 {
        let max_f = f32::from(max_raw.max(1));
        let norm = (f32::from(raw) / max_f).clamp(self.full_off, self.full_on);

        (norm - self.full_off) / (self.full_on - self.full_off)
    }
}

impl Default for DeadZone {
    fn default() -> Self {
        Self::full_range()
    }
}

/// Endpoint hysteresis.
///
/// Values within `margin` of either end snap to exactly 0.0 or 1.0; the
/// band between is re-stretched so the output still spans `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyZone {
    margin: f32,
}

impl StickyZone {
    /// Create a sticky zone, clamping `margin` to `[0.0, MAX_STICKY_ZONE]`.
    pub fn new(margin: f32) -> Self {
        let margin = if margin.is_nan() {
            0.0
        } else {
            margin.clamp(0.0, MAX_STICKY_ZONE)
        };
        Self { margin }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn floor(&self) -> f32 {
        self.margin
    }

    pub fn ceiling(&self) -> f32 {
        1.0 - self.margin
    }

    /// Check if value sits in either endpoint margin
    pub fn contains(&self, value: f32) -> bool {
        value <= self.floor() || value >= self.ceiling()
    }

    pub fn apply(&self, value: f32) -> f32 {
        if value <= self.floor() {
            return 0.0;
        }
        if value >= self.ceiling() {
            return 1.0;
        }

        ((value - self.margin) / (1.0 - 2.0 * self.margin)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_range() {
        let zone = DeadZone::full_range();

        assert_eq!(zone.normalize(0, 1023), 0.0);
        assert_eq!(zone.normalize(1023, 1023), 1.0);
        assert!((zone.normalize(512, 1023) - 0.500_49).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_clamps_above_max() {
        let zone = DeadZone::full_range();
        assert_eq!(zone.normalize(5000, 1023), 1.0);
    }

    #[test]
    fn test_dead_zone_clips_and_stretches() {
        let zone = DeadZone::new(0.1, 0.9);

        assert_eq!(zone.normalize(50, 1000), 0.0); // below full_off
        assert_eq!(zone.normalize(100, 1000), 0.0); // at full_off
        assert_eq!(zone.normalize(950, 1000), 1.0); // above full_on
        assert!((zone.normalize(500, 1000) - 0.5).abs() < 1e-6);
        assert!((zone.normalize(300, 1000) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_inverted_dead_zone_falls_back() {
        assert_eq!(DeadZone::new(0.8, 0.2), DeadZone::full_range());
        assert_eq!(DeadZone::new(0.5, 0.5), DeadZone::full_range());
        assert_eq!(DeadZone::new(f32::NAN, 0.5), DeadZone::full_range());
    }

    #[test]
    fn test_sticky_zone_clamped() {
        assert_eq!(StickyZone::new(-0.1).margin(), 0.0);
        assert_eq!(StickyZone::new(0.7).margin(), MAX_STICKY_ZONE);
        assert_eq!(StickyZone::new(f32::NAN).margin(), 0.0);

        let zone = StickyZone::new(0.5);
        assert!(zone.floor() < zone.ceiling());
    }

    #[test]
    fn test_sticky_zone_snaps_endpoints() {
        let zone = StickyZone::new(0.05);

        assert_eq!(zone.apply(0.0), 0.0);
        assert_eq!(zone.apply(0.03), 0.0);
        assert_eq!(zone.apply(0.05), 0.0);
        assert_eq!(zone.apply(0.97), 1.0);
        assert_eq!(zone.apply(1.0), 1.0);
    }

    #[test]
    fn test_sticky_zone_restretches_middle() {
        let zone = StickyZone::new(0.1);

        assert!((zone.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((zone.apply(0.2) - 0.125).abs() < 1e-6);
        assert!((zone.apply(0.8) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_sticky_zone_is_monotonic() {
        let zone = StickyZone::new(0.05);
        let mut previous = 0.0;
        for i in 0..=1000 {
            let mapped = zone.apply(i as f32 / 1000.0);
            assert!(mapped >= previous);
            previous = mapped;
        }
    }

    #[test]
    fn test_zero_margin_is_identity() {
        let zone = StickyZone::new(0.0);
        assert_eq!(zone.apply(0.25), 0.25);
        assert_eq!(zone.apply(0.75), 0.75);
    }

    #[test]
    fn test_contains() {
        let zone = StickyZone::new(0.1);

        assert!(zone.contains(0.05));
        assert!(zone.contains(0.1));
        assert!(!zone.contains(0.5));
        assert!(zone.contains(0.91));
        assert!(zone.contains(0.95));
    }
}
