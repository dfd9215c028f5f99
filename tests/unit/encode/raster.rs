use super::*;

fn frame(px: [u8; 4], w: u32, h: u32) -> RasterFrame {
    RasterFrame {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn default_is_max_quality_jpeg() {
    assert_eq!(ExportFormat::default(), ExportFormat::Jpeg { quality: 100 });
    assert_eq!(ExportFormat::default().extension(), "jpg");
    assert_eq!(ExportFormat::Png.extension(), "png");
}

#[test]
fn quality_outside_range_is_rejected() {
    assert!(ExportFormat::Jpeg { quality: 0 }.validate().is_err());
    assert!(ExportFormat::Jpeg { quality: 101 }.validate().is_err());
    assert!(ExportFormat::Jpeg { quality: 1 }.validate().is_ok());
}

#[test]
fn format_json_shape() {
    let j = serde_json::to_string(&ExportFormat::Jpeg { quality: 90 }).unwrap();
    assert_eq!(j, r#"{"kind":"jpeg","quality":90}"#);
    let p: ExportFormat = serde_json::from_str(r#"{"kind":"png"}"#).unwrap();
    assert_eq!(p, ExportFormat::Png);
}

#[test]
fn jpeg_starts_with_soi_marker_and_decodes_to_frame_size() {
    let bytes = encode_frame(&frame([200, 40, 10, 255], 16, 8), ExportFormat::default()).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (16, 8));
}

#[test]
fn jpeg_flattens_transparency_onto_black() {
    assert_eq!(flatten_to_rgb8(&frame([0, 0, 0, 0], 1, 1)), vec![0, 0, 0]);
    assert_eq!(flatten_to_rgb8(&frame([64, 32, 16, 128], 1, 1)), vec![64, 32, 16]);
}

#[test]
fn png_roundtrips_straight_alpha() {
    let bytes = encode_frame(&frame([100, 50, 0, 255], 3, 2), ExportFormat::Png).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(2, 1).0, [100, 50, 0, 255]);
}

#[test]
fn mismatched_buffer_is_an_encode_error() {
    let mut f = frame([0, 0, 0, 255], 2, 2);
    f.data.pop();
    let err = encode_frame(&f, ExportFormat::Png).unwrap_err();
    assert!(matches!(err, MockupError::Encode(_)));
}

#[test]
fn write_encoded_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!(
        "printmock_write_encoded_{}",
        std::process::id()
    ));
    let path = dir.join("nested").join("out.bin");
    write_encoded(&path, b"abc").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    let _ = std::fs::remove_dir_all(&dir);
}
