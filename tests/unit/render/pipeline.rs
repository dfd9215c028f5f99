use super::*;

use crate::assets::store::PreparedTemplate;
use crate::catalog::template::{AreaAnchor, ClipSpec, FilterParams, TemplateSpec};
use crate::foundation::core::{CanvasSize, Point, Size, Vec2};

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::from_straight_rgba8(w, h, rgba.repeat((w * h) as usize)).unwrap()
}

fn template(kind: ProductKind) -> PreparedTemplate {
    let spec = TemplateSpec {
        product: kind,
        canvas: CanvasSize::new(12, 12),
        background: "bg.png".to_string(),
        scale: 1.0,
        offset: Vec2::ZERO,
        printable: Size::new(6.0, 6.0),
        area_anchor: AreaAnchor::CanvasCenter,
        overflow: 1.0,
        clip: ClipSpec::Polygon {
            points: vec![
                Point::new(2.0, 2.0),
                Point::new(10.0, 2.0),
                Point::new(10.0, 10.0),
                Point::new(2.0, 10.0),
            ],
        },
        filter: FilterParams::default(),
    };
    PreparedTemplate::new(spec, solid(3, 3, [20, 20, 20, 255]), None).unwrap()
}

fn store() -> TemplateAssetStore {
    TemplateAssetStore::from_parts(ProductKind::ALL.map(template))
}

fn placements() -> BTreeMap<ProductKind, Placement> {
    ProductKind::ALL
        .iter()
        .enumerate()
        .map(|(i, k)| (*k, Placement::new(i as f64, 1.0, 8.0, 8.0)))
        .collect()
}

#[test]
fn render_all_returns_every_product() {
    let out = render_all(
        &store(),
        &solid(4, 4, [250, 10, 10, 255]),
        &placements(),
        &ExportSettings {
            format: ExportFormat::Png,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(out.len(), 3);
    for bytes in out.values() {
        let img = image::load_from_memory(bytes).unwrap();
        assert_eq!((img.width(), img.height()), (12, 12));
    }
}

#[test]
fn render_all_matches_single_product_renders() {
    let store = store();
    let source = solid(4, 4, [250, 10, 10, 255]);
    let placements = placements();
    let all = render_all(&store, &source, &placements, &ExportSettings::default()).unwrap();
    for (kind, placement) in &placements {
        let one = render_product(&store, &source, *kind, placement, ExportFormat::default()).unwrap();
        assert_eq!(all[kind], one);
    }
}

#[test]
fn render_all_rejects_zero_threads_and_fails_whole_batch() {
    let source = solid(4, 4, [250, 10, 10, 255]);
    let zero = ExportSettings {
        format: ExportFormat::Png,
        threads: Some(0),
    };
    assert!(render_all(&store(), &source, &placements(), &zero).is_err());

    let mut bad = placements();
    bad.insert(ProductKind::Pillow, Placement::new(0.0, 0.0, -1.0, 4.0));
    let err = render_all(&store(), &source, &bad, &ExportSettings::default()).unwrap_err();
    assert!(matches!(err, MockupError::InvalidGeometry(_)));
}

#[test]
fn stale_preview_is_superseded() {
    let tickets = RenderTickets::new();
    let latest = LatestFrames::new();
    let store = store();
    let source = solid(4, 4, [250, 10, 10, 255]);
    let p = Placement::new(0.0, 0.0, 8.0, 8.0);

    let old = tickets.issue(ProductKind::Frame);
    let new = tickets.issue(ProductKind::Frame);

    let outcome =
        render_preview(&tickets, &latest, old, &store, &source, &p, ExportFormat::Png).unwrap();
    assert_eq!(outcome, PreviewOutcome::Superseded);
    assert_eq!(latest.get(ProductKind::Frame), None);

    let outcome =
        render_preview(&tickets, &latest, new, &store, &source, &p, ExportFormat::Png).unwrap();
    let PreviewOutcome::Ready(bytes) = outcome else {
        panic!("newest ticket must render");
    };
    assert_eq!(latest.get(ProductKind::Frame), Some(bytes));
    assert_eq!(latest.generation(ProductKind::Frame), Some(new.generation));
}

#[test]
fn previews_of_other_products_are_independent() {
    let tickets = RenderTickets::new();
    let latest = LatestFrames::new();
    let store = store();
    let source = solid(4, 4, [250, 10, 10, 255]);
    let p = Placement::new(0.0, 0.0, 8.0, 8.0);

    let frame = tickets.issue(ProductKind::Frame);
    let _ = tickets.issue(ProductKind::Tshirt);
    let outcome =
        render_preview(&tickets, &latest, frame, &store, &source, &p, ExportFormat::Png).unwrap();
    assert!(matches!(outcome, PreviewOutcome::Ready(_)));
}
