use super::*;

fn size(w: f64, h: f64) -> LogicalSize {
    LogicalSize::new(w, h).unwrap()
}

#[test]
fn low_quality_on_retina_cancels_out() {
    let b = backing_size(size(800.0, 600.0), 2.0, Quality::Low).unwrap();
    assert_eq!(b, BackingSize { width: 800, height: 600 });
}

#[test]
fn backing_rounds_fractional_sizes() {
    let b = backing_size(size(101.0, 33.0), 1.5, Quality::Medium).unwrap();
    // 101 * 1.125 = 113.625, 33 * 1.125 = 37.125
    assert_eq!(b, BackingSize { width: 114, height: 37 });
}

#[test]
fn backing_rejects_bad_dpr() {
    assert!(backing_size(size(10.0, 10.0), 0.0, Quality::High).is_err());
    assert!(backing_size(size(10.0, 10.0), f64::NAN, Quality::High).is_err());
}

#[test]
fn allocate_rejects_empty_and_oversized_surfaces() {
    let err = Surface::allocate(size(0.0, 100.0), 1.0, Quality::High).unwrap_err();
    assert!(matches!(err, BackdropError::ContextUnavailable(_)));
    let err = Surface::allocate(size(70_000.0, 10.0), 1.0, Quality::High).unwrap_err();
    assert!(matches!(err, BackdropError::ContextUnavailable(_)));
}

#[test]
fn present_swaps_only_on_request() {
    let mut s = Surface::allocate(size(4.0, 4.0), 1.0, Quality::High).unwrap();
    s.fill_front(Rgba8::rgb(10, 20, 30));
    let before = s.snapshot();

    s.begin_frame();
    s.shade_region(None, |_| Some([255, 255, 255, 255]));
    assert_eq!(s.snapshot(), before);

    s.present();
    assert_eq!(s.snapshot().pixel(0, 0), Some([255, 255, 255, 255]));
    assert_ne!(s.snapshot().digest(), before.digest());
}

#[test]
fn shade_region_maps_logical_to_device_pixels() {
    let mut s = Surface::allocate(size(4.0, 4.0), 2.0, Quality::High).unwrap();
    assert_eq!(s.backing(), BackingSize { width: 8, height: 8 });
    s.begin_frame();
    s.shade_region(Some(Rect::new(0.0, 0.0, 1.0, 1.0)), |p| {
        assert!(p.x < 1.0 && p.y < 1.0);
        Some([0, 0, 255, 255])
    });
    s.present();
    let f = s.snapshot();
    assert_eq!(f.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(2, 2), Some([0, 0, 0, 0]));
}

#[test]
fn solid_layer_covers_interior_of_shape() {
    let mut s = Surface::allocate(size(20.0, 20.0), 1.0, Quality::High).unwrap();
    s.begin_frame();
    let mut path = BezPath::new();
    path.move_to((2.0, 2.0));
    path.line_to((18.0, 2.0));
    path.line_to((18.0, 18.0));
    path.line_to((2.0, 18.0));
    path.close_path();
    s.draw_layer(&[SolidShape {
        path,
        color: Rgba8::rgb(255, 0, 0),
    }])
    .unwrap();
    s.present();
    let f = s.snapshot();
    assert_eq!(f.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn shaded_path_uses_coverage_mask() {
    let mut s = Surface::allocate(size(20.0, 20.0), 1.0, Quality::High).unwrap();
    s.begin_frame();
    let mut path = BezPath::new();
    path.move_to((0.0, 10.0));
    path.line_to((20.0, 10.0));
    path.line_to((20.0, 20.0));
    path.line_to((0.0, 20.0));
    path.close_path();
    s.fill_path_shaded(&path, |_| [0, 200, 0, 200]);
    s.present();
    let f = s.snapshot();
    assert_eq!(f.pixel(5, 15), Some([0, 200, 0, 200]));
    assert_eq!(f.pixel(5, 5), Some([0, 0, 0, 0]));
}
