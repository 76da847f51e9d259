use smooth_axis::{Config, SmoothAxis};

/// Axis that follows its input immediately, without sticky zones
fn instant_axis(max_raw: u16) -> SmoothAxis<smooth_axis::Live> {
    SmoothAxis::new(Config::live(max_raw, 0.0).with_sticky_zone(0.0))
}

#[test]
fn test_nothing_before_first_sample() {
    let mut axis = SmoothAxis::new(Config::live(1023, 0.25));

    assert!(!axis.has_first_sample());
    assert_eq!(axis.norm(), 0.0);
    assert_eq!(axis.value(), 0);
    assert!(!axis.has_new_value());
}

#[test]
fn test_first_sample_teleports() {
    let mut axis = SmoothAxis::new(Config::live(1023, 0.25).with_sticky_zone(0.0));
    axis.update(512, 0.016);

    assert!(axis.has_first_sample());
    assert_eq!(axis.value(), 512);
    assert!(axis.has_new_value());
}

#[test]
fn test_12_bit_range() {
    let mut axis = instant_axis(4095);

    axis.update(0, 0.016);
    assert_eq!(axis.value(), 0);

    axis.update(4095, 0.016);
    assert_eq!(axis.value(), 4095);

    axis.update(2048, 0.016);
    assert_eq!(axis.value(), 2048);

    axis.update(1024, 0.016);
    assert_eq!(axis.value(), 1024);
}

#[test]
fn test_16_bit_range() {
    let mut axis = SmoothAxis::new(Config::live(u16::MAX, 0.25));
    axis.update(u16::MAX, 0.016);

    assert_eq!(axis.value(), u16::MAX);
    assert!((axis.norm() - 1.0).abs() < 0.001);
}

#[test]
fn test_input_above_max_clamped() {
    let mut axis = instant_axis(1000);
    axis.update(1500, 0.016);

    assert_eq!(axis.norm(), 1.0);
    assert_eq!(axis.value(), 1000);
}

#[test]
fn test_dead_zone_clipping() {
    let mut axis = SmoothAxis::new(
        Config::live(1000, 0.0)
            .with_sticky_zone(0.0)
            .with_dead_zone(0.1, 0.9),
    );

    axis.update(50, 0.016);
    assert_eq!(axis.value(), 0, "below full_off reads as zero");

    axis.update(950, 0.016);
    assert_eq!(axis.value(), 1000, "above full_on reads as max");

    axis.update(500, 0.016);
    assert_eq!(axis.value(), 500, "middle of the band stays centered");

    axis.update(300, 0.016);
    assert_eq!(axis.value(), 250, "band is stretched to the full range");
}

#[test]
fn test_sticky_zone_stretches_middle_band() {
    let mut axis = SmoothAxis::new(Config::live(1000, 0.0).with_sticky_zone(0.1));

    axis.update(500, 0.016);
    assert_eq!(axis.value(), 500);

    // (0.2 - 0.1) / 0.8
    axis.update(200, 0.016);
    assert_eq!(axis.value(), 125);
}
