use std::fmt;
use std::str::FromStr;

use crate::foundation::error::MockupError;

/// Product types a source image can be composited onto.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Framed print.
    #[default]
    Frame,
    /// Throw pillow.
    Pillow,
    /// T-shirt front panel.
    Tshirt,
}

impl ProductKind {
    /// Every product, in export order.
    pub const ALL: [ProductKind; 3] = [ProductKind::Frame, ProductKind::Pillow, ProductKind::Tshirt];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::Frame => "frame",
            ProductKind::Pillow => "pillow",
            ProductKind::Tshirt => "tshirt",
        }
    }

    /// Dense index for per-product slot arrays.
    pub fn index(self) -> usize {
        match self {
            ProductKind::Frame => 0,
            ProductKind::Pillow => 1,
            ProductKind::Tshirt => 2,
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame" => Ok(ProductKind::Frame),
            "pillow" => Ok(ProductKind::Pillow),
            "tshirt" | "t-shirt" | "shirt" => Ok(ProductKind::Tshirt),
            other => Err(MockupError::validation(format!(
                "unknown product kind '{other}' (expected frame, pillow or tshirt)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/product.rs"]
mod tests;
