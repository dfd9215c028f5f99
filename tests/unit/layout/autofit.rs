use super::*;
use crate::foundation::math::approx_eq;

fn area() -> Rect {
    Rect::new(139.0, 98.0, 139.0 + 464.0 * 0.7, 98.0 + 625.0 * 0.7)
}

#[test]
fn wide_source_fits_by_width() {
    let p = compute_auto_fit(ImageSize::new(1600, 900), area(), 2.0).unwrap();
    assert!(approx_eq(p.width, 464.0 * 0.7 * 2.0, 1e-9));
    assert!(approx_eq(p.height, p.width * 900.0 / 1600.0, 1e-9));
    assert_eq!(p.rotation_deg, 0.0);
}

#[test]
fn tall_source_fits_by_height() {
    let p = compute_auto_fit(ImageSize::new(300, 900), area(), 2.0).unwrap();
    assert!(approx_eq(p.height, 625.0 * 0.7 * 2.0, 1e-9));
    assert!(approx_eq(p.width, p.height / 3.0, 1e-9));
}

#[test]
fn equal_aspect_fits_by_height() {
    let a = Rect::new(0.0, 0.0, 400.0, 400.0);
    let p = compute_auto_fit(ImageSize::new(50, 50), a, 1.7).unwrap();
    assert!(approx_eq(p.height, 680.0, 1e-9));
    assert!(approx_eq(p.width, 680.0, 1e-9));
}

#[test]
fn result_is_centered_on_area() {
    for (w, h) in [(1, 1), (4000, 3), (3, 4000), (1024, 768)] {
        let p = compute_auto_fit(ImageSize::new(w, h), area(), 2.0).unwrap();
        let c = p.center();
        assert!(approx_eq(c.x, area().center().x, 1e-6));
        assert!(approx_eq(c.y, area().center().y, 1e-6));
        assert!(p.width > 0.0 && p.height > 0.0);
    }
}

#[test]
fn degenerate_source_is_an_image_load_error() {
    let err = compute_auto_fit(ImageSize::new(0, 0), area(), 2.0).unwrap_err();
    assert!(err.is_image_load());
    let err = compute_auto_fit(ImageSize::new(10, 0), area(), 2.0).unwrap_err();
    assert!(err.is_image_load());
}

#[test]
fn degenerate_area_and_overflow_are_rejected() {
    let empty = Rect::new(5.0, 5.0, 5.0, 50.0);
    assert!(matches!(
        compute_auto_fit(ImageSize::new(10, 10), empty, 2.0),
        Err(MockupError::InvalidGeometry(_))
    ));
    assert!(matches!(
        compute_auto_fit(ImageSize::new(10, 10), area(), 0.0),
        Err(MockupError::InvalidGeometry(_))
    ));
}

#[test]
fn editor_nudge_is_relative_to_editor_center() {
    let n = EditorNudge::from_editor_position(150.0, 120.0);
    assert_eq!(n, EditorNudge::new(10.0, -20.0));
    assert_eq!(EditorNudge::new(f64::NAN, 1.0).as_vec2(), Vec2::ZERO);
}
