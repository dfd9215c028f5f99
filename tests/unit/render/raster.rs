use super::*;

use kurbo::Shape;

use crate::foundation::core::Rect;

#[test]
fn surface_dims_rejects_empty_and_oversized() {
    assert_eq!(surface_dims(CanvasSize::new(600, 600)).unwrap(), (600, 600));
    assert!(surface_dims(CanvasSize::new(0, 10)).is_err());
    assert!(surface_dims(CanvasSize::new(70_000, 10)).is_err());
}

#[test]
fn empty_draw_is_fully_transparent() {
    let mut r = Rasterizer::default();
    let px = r.render(CanvasSize::new(4, 3), |_| Ok(())).unwrap();
    assert_eq!(px.len(), 4 * 3 * 4);
    assert!(px.iter().all(|b| *b == 0));
}

#[test]
fn context_is_cleared_between_renders() {
    let mut r = Rasterizer::default();
    let rect = Rect::new(0.0, 0.0, 4.0, 4.0).to_path(0.1);
    let filled = r
        .render(CanvasSize::new(4, 4), |ctx| {
            fill_path_opaque(ctx, &rect);
            Ok(())
        })
        .unwrap();
    assert!(filled.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));

    let cleared = r.render(CanvasSize::new(4, 4), |_| Ok(())).unwrap();
    assert!(cleared.iter().all(|b| *b == 0));

    let resized = r.render(CanvasSize::new(2, 5), |_| Ok(())).unwrap();
    assert_eq!(resized.len(), 2 * 5 * 4);
}

#[test]
fn image_is_placed_by_transform() {
    let image = PreparedImage::from_straight_rgba8(1, 1, vec![0, 255, 0, 255]).unwrap();
    let mut r = Rasterizer::default();
    let px = r
        .render(CanvasSize::new(4, 4), |ctx| {
            draw_image(ctx, &image, Affine::translate((2.0, 2.0)) * Affine::scale(2.0))
        })
        .unwrap();
    let at = |x: usize, y: usize| &px[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
    assert_eq!(at(0, 0), &[0, 0, 0, 0]);
    assert_eq!(at(3, 3)[3], 255);
    assert_eq!(at(3, 3)[1], 255);
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((3.0, 0.0));
    path.quad_to((4.0, 1.0), (3.0, 2.0));
    path.close_path();
    assert_eq!(bezpath_to_cpu(&path).elements().len(), 4);
}

#[test]
fn mismatched_pixmap_bytes_are_rejected() {
    assert!(pixmap_from_premul_bytes(&[0u8; 7], 1, 2).is_err());
    assert!(pixmap_from_premul_bytes(&[0u8; 8], 1, 2).is_ok());
}
