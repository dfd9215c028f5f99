use super::*;

use std::collections::HashMap;

#[test]
fn empty_json_yields_defaults() {
    let cfg = MockupConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, MockupConfig::default());
    assert_eq!(cfg.assets_root, PathBuf::from("assets"));
    assert_eq!(cfg.export.format, ExportFormat::Jpeg { quality: 100 });
    assert_eq!(cfg.export.threads, None);
}

#[test]
fn full_json_parses() {
    let cfg = MockupConfig::from_json_str(
        r#"{
            "assets_root": "mock/assets",
            "export": { "format": { "kind": "png" }, "threads": 2 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.assets_root, PathBuf::from("mock/assets"));
    assert_eq!(cfg.export.format, ExportFormat::Png);
    assert_eq!(cfg.export.threads, Some(2));
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    assert!(MockupConfig::from_json_str(r#"{"asset_root": "x"}"#).is_err());
    assert!(MockupConfig::from_json_str(r#"{"export": {"threads": 0}}"#).is_err());
    assert!(
        MockupConfig::from_json_str(r#"{"export": {"format": {"kind": "jpeg", "quality": 0}}}"#)
            .is_err()
    );
}

#[test]
fn template_override_replaces_builtin() {
    let mut spec = TemplateSpec::builtin(ProductKind::Tshirt);
    spec.filter.opacity = 0.5;
    let mut cfg = MockupConfig::default();
    cfg.templates.insert(ProductKind::Tshirt, spec);

    let json = serde_json::to_string(&cfg).unwrap();
    let back = MockupConfig::from_json_str(&json).unwrap();
    let catalog = back.catalog().unwrap();
    assert_eq!(catalog.get(ProductKind::Tshirt).filter.opacity, 0.5);
    assert_eq!(
        catalog.get(ProductKind::Frame),
        &TemplateSpec::builtin(ProductKind::Frame)
    );
}

#[test]
fn override_for_wrong_product_is_rejected() {
    let mut cfg = MockupConfig::default();
    cfg.templates
        .insert(ProductKind::Pillow, TemplateSpec::builtin(ProductKind::Frame));
    assert!(cfg.validate().is_err());
}

#[test]
fn env_overrides_apply_and_ignore_garbage() {
    let env: HashMap<&str, &str> = HashMap::from([
        (ENV_ASSETS_DIR, "/srv/mockups"),
        (ENV_JPEG_QUALITY, "92"),
        (ENV_THREADS, "zero"),
    ]);
    let cfg = MockupConfig::default().apply_env(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.assets_root, PathBuf::from("/srv/mockups"));
    assert_eq!(cfg.export.format, ExportFormat::Jpeg { quality: 92 });
    assert_eq!(cfg.export.threads, None);

    let cfg = MockupConfig::default().apply_env(|k| match k {
        ENV_JPEG_QUALITY => Some("250".to_string()),
        ENV_THREADS => Some("3".to_string()),
        _ => None,
    });
    assert_eq!(cfg.export.format, ExportFormat::Jpeg { quality: 100 });
    assert_eq!(cfg.export.threads, Some(3));
}
