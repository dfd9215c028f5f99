use super::*;

#[test]
fn parse_and_display_agree() {
    for kind in ProductKind::ALL {
        assert_eq!(kind.as_str().parse::<ProductKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
    assert_eq!("T-Shirt".parse::<ProductKind>().unwrap(), ProductKind::Tshirt);
    assert!("mug".parse::<ProductKind>().is_err());
}

#[test]
fn indices_are_dense_and_distinct() {
    let idx: Vec<usize> = ProductKind::ALL.iter().map(|k| k.index()).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn serde_uses_lowercase_names() {
    let json = serde_json::to_string(&ProductKind::Tshirt).unwrap();
    assert_eq!(json, "\"tshirt\"");
    let back: ProductKind = serde_json::from_str("\"pillow\"").unwrap();
    assert_eq!(back, ProductKind::Pillow);
}
