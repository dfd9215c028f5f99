use super::*;
use crate::foundation::math::approx_eq;

fn base() -> Placement {
    Placement::new(10.0, 20.0, 200.0, 100.0)
}

#[test]
fn drag_moves_without_resizing() {
    let p = apply_user_transform(base(), Gesture::Drag { dx: 5.0, dy: -7.5 });
    assert_eq!((p.x, p.y), (15.0, 12.5));
    assert_eq!((p.width, p.height), (200.0, 100.0));
}

#[test]
fn uniform_resize_keeps_aspect() {
    let p = apply_user_transform(base(), Gesture::ResizeUniform { dw: 100.0 });
    assert!(approx_eq(p.width, 300.0, 1e-9));
    assert!(approx_eq(p.height, 150.0, 1e-9));
    assert_eq!((p.x, p.y), (10.0, 20.0));
}

#[test]
fn independent_resize_may_change_aspect() {
    let p = apply_user_transform(base(), Gesture::Resize { dw: -100.0, dh: 50.0 });
    assert_eq!((p.width, p.height), (100.0, 150.0));
}

#[test]
fn resize_is_clamped_to_min_extent() {
    let p = apply_user_transform(base(), Gesture::Resize { dw: -500.0, dh: -100.0 });
    assert_eq!((p.width, p.height), (MIN_EXTENT, MIN_EXTENT));

    let p = apply_user_transform(base(), Gesture::ResizeUniform { dw: -199.5 });
    assert!(p.width > 0.0 && p.height >= MIN_EXTENT);
    assert!(approx_eq(p.width / p.height, 2.0, 1e-9));

    let p = apply_user_transform(base(), Gesture::ResizeUniform { dw: -1000.0 });
    assert!(approx_eq(p.height, MIN_EXTENT, 1e-12));
    assert!(approx_eq(p.width, 2.0 * MIN_EXTENT, 1e-12));
}

#[test]
fn rotation_wraps_into_range() {
    let p = apply_user_transform(base(), Gesture::Rotate { degrees: -30.0 });
    assert!(approx_eq(p.rotation_deg, 330.0, 1e-9));
    let p = apply_user_transform(p, Gesture::Rotate { degrees: 390.0 });
    assert!(approx_eq(p.rotation_deg, 0.0, 1e-9));
}

#[test]
fn full_turn_is_equivalent_geometry() {
    let start = apply_user_transform(base(), Gesture::Rotate { degrees: 17.0 });
    let turned = apply_user_transform(start, Gesture::Rotate { degrees: 360.0 });
    assert!(start.approx_same_geometry(&turned, 1e-9));
}

#[test]
fn non_finite_deltas_are_ignored() {
    assert_eq!(
        apply_user_transform(base(), Gesture::Drag { dx: f64::NAN, dy: 0.0 }),
        base()
    );
    assert_eq!(
        apply_user_transform(base(), Gesture::Rotate { degrees: f64::INFINITY }),
        base()
    );
}

#[test]
fn commit_replaces_and_clamps() {
    let target = Placement {
        rotation_deg: 45.0,
        ..Placement::new(1.0, 2.0, 0.0, 30.0)
    };
    let p = apply_user_transform(base(), Gesture::Commit(target));
    assert_eq!((p.x, p.y, p.width, p.height), (1.0, 2.0, MIN_EXTENT, 30.0));
    assert_eq!(p.rotation_deg, 45.0);

    let broken = Placement::new(f64::NAN, 0.0, 10.0, 10.0);
    assert_eq!(apply_user_transform(base(), Gesture::Commit(broken)), base());
}
