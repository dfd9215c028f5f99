//! Calibrated product templates.
//!
//! The numbers in the built-in templates were tuned by eye against specific product photographs.
//! They are reproduced exactly and must not be re-derived.

use std::collections::BTreeMap;

use crate::{
    assets::store::normalize_rel_path,
    catalog::product::ProductKind,
    foundation::core::{CanvasSize, ImageSize, Placement, Point, Rect, Size, Vec2},
    foundation::error::{MockupError, MockupResult},
    layout::autofit::{EditorNudge, compute_auto_fit},
};

/// Logical size shared by every built-in template stage.
pub const DEFAULT_CANVAS: CanvasSize = CanvasSize::new(600, 600);

/// Where the printable area sits on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaAnchor {
    /// Top-left at `offset + shift`.
    Offset { shift: Vec2 },
    /// Centered on the canvas; `offset` is ignored.
    CanvasCenter,
}

/// Visible silhouette of the printable area.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipSpec {
    /// Closed polygon in canvas coordinates.
    Polygon { points: Vec<Point> },
    /// Mask asset (SVG or raster) drawn at `offset`, stretched to the canvas size. Only pixels
    /// under its opaque region stay visible.
    Mask { source: String, offset: Vec2 },
}

/// Cosmetic blend of the source layer into the product photo.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterParams {
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
    /// Additive brightness in `[-1, 1]`, applied to straight-alpha channels.
    #[serde(default)]
    pub brightness: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            brightness: 0.0,
        }
    }
}

/// Everything needed to place and clip a source image on one product photo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateSpec {
    pub product: ProductKind,
    pub canvas: CanvasSize,
    /// Background photograph, relative to the assets root.
    pub background: String,
    pub scale: f64,
    pub offset: Vec2,
    /// Nominal printable area before `scale` is applied.
    pub printable: Size,
    pub area_anchor: AreaAnchor,
    /// Multiple of the printable area the fitted image spans.
    pub overflow: f64,
    pub clip: ClipSpec,
    pub filter: FilterParams,
}

impl TemplateSpec {
    pub fn builtin(kind: ProductKind) -> Self {
        match kind {
            ProductKind::Frame => Self::frame(),
            ProductKind::Pillow => Self::pillow(),
            ProductKind::Tshirt => Self::tshirt(),
        }
    }

    fn frame() -> Self {
        let (s, ox, oy) = (0.7, 139.0, 98.0);
        Self {
            product: ProductKind::Frame,
            canvas: DEFAULT_CANVAS,
            background: "cuadromockup.jpg".to_string(),
            scale: s,
            offset: Vec2::new(ox, oy),
            printable: Size::new(464.0, 625.0),
            area_anchor: AreaAnchor::Offset { shift: Vec2::ZERO },
            overflow: 2.0,
            clip: ClipSpec::Polygon {
                points: vec![
                    Point::new(ox - 3.0, oy - 3.0),
                    Point::new(ox + 464.0 * s, oy - 3.0 * s),
                    Point::new(ox + 468.0 * s + 2.0, oy + 625.0 * s),
                    Point::new(ox - 9.0, oy + 625.0 * s),
                ],
            },
            filter: FilterParams {
                opacity: 0.85,
                brightness: -0.1,
            },
        }
    }

    fn pillow() -> Self {
        let offset = Vec2::new(3.0, -5.0);
        Self {
            product: ProductKind::Pillow,
            canvas: DEFAULT_CANVAS,
            background: "almohadonmockup.jpg".to_string(),
            scale: 1.0,
            offset,
            printable: Size::new(400.0, 400.0),
            area_anchor: AreaAnchor::CanvasCenter,
            overflow: 1.7,
            clip: ClipSpec::Mask {
                source: "pillowrem.svg".to_string(),
                offset,
            },
            filter: FilterParams {
                opacity: 0.9,
                brightness: 0.0,
            },
        }
    }

    fn tshirt() -> Self {
        let (s, ox, oy) = (0.9, 120.0, 100.0);
        Self {
            product: ProductKind::Tshirt,
            canvas: DEFAULT_CANVAS,
            background: "remeramockup.jpg".to_string(),
            scale: s,
            offset: Vec2::new(ox, oy),
            printable: Size::new(350.0, 400.0),
            area_anchor: AreaAnchor::Offset {
                shift: Vec2::new(50.0, 0.0),
            },
            overflow: 1.8,
            clip: ClipSpec::Polygon {
                points: vec![
                    Point::new(ox + 50.0, oy - 3.0),
                    Point::new(ox + 350.0 * s - 4.0, oy),
                    Point::new(ox + 350.0 * s + 2.0, oy + 400.0 * s),
                    Point::new(ox + 50.0, oy + 400.0 * s),
                ],
            },
            filter: FilterParams {
                opacity: 0.85,
                brightness: -0.1,
            },
        }
    }

    /// Printable area in canvas coordinates (post-scale).
    pub fn printable_area(&self) -> Rect {
        let w = self.printable.width * self.scale;
        let h = self.printable.height * self.scale;
        let origin = match self.area_anchor {
            AreaAnchor::Offset { shift } => Point::new(self.offset.x + shift.x, self.offset.y + shift.y),
            AreaAnchor::CanvasCenter => {
                let c = self.canvas.center();
                Point::new(c.x - w / 2.0, c.y - h / 2.0)
            }
        };
        Rect::new(origin.x, origin.y, origin.x + w, origin.y + h)
    }

    /// Default placement for a freshly loaded source image.
    pub fn auto_fit(&self, source: ImageSize, nudge: EditorNudge) -> MockupResult<Placement> {
        let fitted = compute_auto_fit(source, self.printable_area(), self.overflow)?;
        Ok(fitted.translated(nudge.as_vec2()))
    }

    pub fn validate(&self) -> MockupResult<()> {
        let name = self.product.as_str();
        self.canvas.validate()?;
        normalize_rel_path(&self.background)?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(MockupError::validation(format!(
                "{name}: scale must be finite and > 0"
            )));
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            return Err(MockupError::validation(format!("{name}: offset must be finite")));
        }
        if !(self.printable.width.is_finite()
            && self.printable.height.is_finite()
            && self.printable.width > 0.0
            && self.printable.height > 0.0)
        {
            return Err(MockupError::validation(format!(
                "{name}: printable area must be positive"
            )));
        }
        if !self.overflow.is_finite() || self.overflow <= 0.0 {
            return Err(MockupError::validation(format!(
                "{name}: overflow must be finite and > 0"
            )));
        }
        if !(0.0..=1.0).contains(&self.filter.opacity) {
            return Err(MockupError::validation(format!(
                "{name}: filter opacity must be in [0, 1]"
            )));
        }
        if !(-1.0..=1.0).contains(&self.filter.brightness) {
            return Err(MockupError::validation(format!(
                "{name}: filter brightness must be in [-1, 1]"
            )));
        }
        match &self.clip {
            ClipSpec::Polygon { points } => {
                if points.len() < 3 {
                    return Err(MockupError::validation(format!(
                        "{name}: clip polygon needs at least 3 points"
                    )));
                }
                if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
                    return Err(MockupError::validation(format!(
                        "{name}: clip polygon points must be finite"
                    )));
                }
            }
            ClipSpec::Mask { source, offset } => {
                normalize_rel_path(source)?;
                if !(offset.x.is_finite() && offset.y.is_finite()) {
                    return Err(MockupError::validation(format!(
                        "{name}: mask offset must be finite"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One template per product kind.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateCatalog {
    templates: BTreeMap<ProductKind, TemplateSpec>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: ProductKind::ALL
                .into_iter()
                .map(|k| (k, TemplateSpec::builtin(k)))
                .collect(),
        }
    }

    /// Replace one product's template. The replacement's `product` field must match `kind`.
    pub fn with_override(mut self, kind: ProductKind, spec: TemplateSpec) -> MockupResult<Self> {
        if spec.product != kind {
            return Err(MockupError::validation(format!(
                "template override for '{kind}' describes '{}'",
                spec.product
            )));
        }
        self.templates.insert(kind, spec);
        Ok(self)
    }

    pub fn get(&self, kind: ProductKind) -> &TemplateSpec {
        // Every constructor populates all kinds.
        &self.templates[&kind]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductKind, &TemplateSpec)> {
        self.templates.iter().map(|(k, v)| (*k, v))
    }

    pub fn validate(&self) -> MockupResult<()> {
        self.templates.values().try_for_each(TemplateSpec::validate)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/template.rs"]
mod tests;
