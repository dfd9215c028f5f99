//! Clip providers.
//!
//! Both variants reduce to a per-pixel coverage over the canvas; the compositor only ever applies
//! coverage with destination-in, so there is no per-template drawing code.

use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    catalog::template::{ClipSpec, TemplateSpec},
    foundation::core::{Affine, BezPath, CanvasSize, Point, Vec2},
    foundation::error::{MockupError, MockupResult},
    render::raster::{Rasterizer, draw_image, fill_path_opaque},
};

/// 8-bit coverage of a canvas, row-major, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coverage {
    pub width: u32,
    pub height: u32,
    pub alpha: Arc<Vec<u8>>,
}

impl Coverage {
    pub fn at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }

    fn from_premul_rgba8(canvas: CanvasSize, rgba: &[u8]) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            alpha: Arc::new(rgba.chunks_exact(4).map(|px| px[3]).collect()),
        }
    }
}

/// Closed polygon in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonClip {
    points: Vec<Point>,
}

impl PolygonClip {
    pub fn new(points: Vec<Point>) -> MockupResult<Self> {
        if points.len() < 3 {
            return Err(MockupError::validation("clip polygon needs at least 3 points"));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.points.iter();
        if let Some(first) = it.next() {
            path.move_to(*first);
        }
        for p in it {
            path.line_to(*p);
        }
        path.close_path();
        path
    }
}

/// Mask image whose opaque region is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskClip {
    mask: PreparedImage,
    offset: Vec2,
}

impl MaskClip {
    pub fn new(mask: PreparedImage, offset: Vec2) -> Self {
        Self { mask, offset }
    }

    /// Placement of the mask on the canvas: shifted by `offset`, stretched to the canvas size.
    fn transform(&self, canvas: CanvasSize) -> Affine {
        Affine::translate(self.offset)
            * Affine::scale_non_uniform(
                f64::from(canvas.width) / f64::from(self.mask.width),
                f64::from(canvas.height) / f64::from(self.mask.height),
            )
    }
}

/// How a template hides the parts of the source image that fall off the product.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipStrategy {
    Polygon(PolygonClip),
    Mask(MaskClip),
}

impl ClipStrategy {
    /// Build the strategy a template asks for. `mask` must be present for mask clips.
    pub fn for_template(spec: &TemplateSpec, mask: Option<PreparedImage>) -> MockupResult<Self> {
        match &spec.clip {
            ClipSpec::Polygon { points } => Ok(Self::Polygon(PolygonClip::new(points.clone())?)),
            ClipSpec::Mask { source, offset } => {
                let mask = mask.ok_or_else(|| {
                    MockupError::image_load(format!(
                        "{}: mask '{source}' was not provided",
                        spec.product
                    ))
                })?;
                Ok(Self::Mask(MaskClip::new(mask, *offset)))
            }
        }
    }

    pub(crate) fn coverage(
        &self,
        canvas: CanvasSize,
        raster: &mut Rasterizer,
    ) -> MockupResult<Coverage> {
        let rgba = match self {
            ClipStrategy::Polygon(poly) => {
                let path = poly.path();
                raster.render(canvas, |ctx| {
                    fill_path_opaque(ctx, &path);
                    Ok(())
                })?
            }
            ClipStrategy::Mask(mask) => {
                let transform = mask.transform(canvas);
                raster.render(canvas, |ctx| draw_image(ctx, &mask.mask, transform))?
            }
        };
        Ok(Coverage::from_premul_rgba8(canvas, &rgba))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/strategy.rs"]
mod tests;
