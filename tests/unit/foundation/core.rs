use super::*;

#[test]
fn logical_size_rejects_negative_and_nan() {
    assert!(LogicalSize::new(-1.0, 10.0).is_err());
    assert!(LogicalSize::new(10.0, f64::NAN).is_err());
    assert!(LogicalSize::new(0.0, 0.0).is_ok());
}

#[test]
fn logical_size_contains_is_inclusive() {
    let s = LogicalSize::new(100.0, 50.0).unwrap();
    assert!(s.contains(Point::new(0.0, 0.0)));
    assert!(s.contains(Point::new(100.0, 50.0)));
    assert!(!s.contains(Point::new(100.5, 10.0)));
    assert!(!s.contains(Point::new(-0.1, 10.0)));
}

#[test]
fn premul_scales_channels_by_alpha() {
    assert_eq!(Rgba8::rgba(255, 128, 0, 0).premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::rgba(255, 128, 0, 255).premul(), [255, 128, 0, 255]);
    let [r, g, _, a] = Rgba8::rgba(200, 100, 0, 128).premul();
    assert_eq!(a, 128);
    assert_eq!(r, 100);
    assert_eq!(g, 50);
}

#[test]
fn with_opacity_clamps_and_handles_nan() {
    let c = Rgba8::rgb(1, 2, 3);
    assert_eq!(c.with_opacity(2.0).a, 255);
    assert_eq!(c.with_opacity(-1.0).a, 0);
    assert_eq!(c.with_opacity(f64::NAN).a, 0);
    assert_eq!(c.with_opacity(0.5).a, 128);
}
