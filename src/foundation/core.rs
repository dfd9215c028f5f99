use crate::foundation::{
    error::{MockupError, MockupResult},
    math::approx_eq,
};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Fixed logical pixel size of an editing/export surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> MockupResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MockupError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(MockupError::validation(format!(
                "canvas {}x{} exceeds the raster limit of {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub fn center(self) -> Point {
        self.rect().center()
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Natural pixel dimensions of a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. A degenerate size is treated as an unusable image, never as a ratio.
    pub fn aspect(self) -> MockupResult<f64> {
        if self.is_empty() {
            return Err(MockupError::image_load(format!(
                "source image has degenerate size {}x{}",
                self.width, self.height
            )));
        }
        Ok(f64::from(self.width) / f64::from(self.height))
    }
}

/// Smallest width/height a placement may shrink to, in logical pixels.
pub const MIN_EXTENT: f64 = 1.0;

/// User-adjustable transform of the source image on a template canvas.
///
/// `x`/`y` is the top-left corner of the unrotated box and also the rotation origin, which
/// matches how interactive transform boxes report node geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation_deg: f64,
}

impl Placement {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation_deg: 0.0,
        }
    }

    pub fn validate(&self) -> MockupResult<()> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("rotation_deg", self.rotation_deg),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(MockupError::invalid_geometry(format!(
                    "placement {name} must be finite (got {v})"
                )));
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(MockupError::invalid_geometry(format!(
                "placement size must be positive (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }

    /// Unrotated bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Rigid part of the transform: translate to origin, then rotate about it.
    pub fn box_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y)) * Affine::rotate(self.rotation_deg.to_radians())
    }

    /// Maps source pixel space onto the canvas.
    pub fn to_affine(&self, source: ImageSize) -> MockupResult<Affine> {
        if source.is_empty() {
            return Err(MockupError::image_load("source image has zero width or height"));
        }
        let sx = self.width / f64::from(source.width);
        let sy = self.height / f64::from(source.height);
        Ok(self.box_affine() * Affine::scale_non_uniform(sx, sy))
    }

    /// Canvas-space corners of the rotated box, clockwise from the origin corner.
    pub fn corners(&self) -> [Point; 4] {
        let a = self.box_affine();
        [
            a * Point::new(0.0, 0.0),
            a * Point::new(self.width, 0.0),
            a * Point::new(self.width, self.height),
            a * Point::new(0.0, self.height),
        ]
    }

    /// Same on-canvas geometry within `eps` (compares rotated corners, so 0° and 360° agree).
    pub fn approx_same_geometry(&self, other: &Placement, eps: f64) -> bool {
        self.corners()
            .iter()
            .zip(other.corners().iter())
            .all(|(a, b)| approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
