use crate::{
    assets::{decode::PreparedImage, store::PreparedTemplate},
    foundation::core::{Affine, CanvasSize, Placement},
    foundation::error::{MockupError, MockupResult},
    render::{
        blend::{brighten_premul, mask_in_place, over_in_place},
        raster::{Rasterizer, draw_image},
    },
};

/// A composited mockup before encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RasterFrame {
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// CPU compositor. Holds a reusable rasterizer, so keep one per worker thread.
#[derive(Debug, Default)]
pub struct Compositor {
    raster: Rasterizer,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Background first, then the filtered, transformed and clipped source on top.
    #[tracing::instrument(
        level = "debug",
        skip(self, template, source),
        fields(product = %template.product())
    )]
    pub fn composite(
        &mut self,
        template: &PreparedTemplate,
        source: &PreparedImage,
        placement: &Placement,
    ) -> MockupResult<RasterFrame> {
        placement.validate()?;
        let spec = &template.spec;
        let canvas = spec.canvas;
        if template.coverage.width != canvas.width || template.coverage.height != canvas.height {
            return Err(MockupError::render(format!(
                "{}: clip coverage is {}x{}, canvas is {}x{}",
                spec.product,
                template.coverage.width,
                template.coverage.height,
                canvas.width,
                canvas.height
            )));
        }

        let bg = &template.background;
        let bg_transform = Affine::scale_non_uniform(
            f64::from(canvas.width) / f64::from(bg.width),
            f64::from(canvas.height) / f64::from(bg.height),
        );
        let mut out = self
            .raster
            .render(canvas, |ctx| draw_image(ctx, bg, bg_transform))?;

        let filtered;
        let source = if spec.filter.brightness != 0.0 {
            filtered = PreparedImage {
                width: source.width,
                height: source.height,
                rgba8_premul: std::sync::Arc::new(brighten_premul(
                    &source.rgba8_premul,
                    spec.filter.brightness,
                )),
            };
            &filtered
        } else {
            source
        };

        let src_transform = placement.to_affine(source.size())?;
        let mut layer = self
            .raster
            .render(canvas, |ctx| draw_image(ctx, source, src_transform))?;
        mask_in_place(&mut layer, &template.coverage.alpha)?;
        over_in_place(&mut out, &layer, spec.filter.opacity)?;

        Ok(RasterFrame {
            width: canvas.width,
            height: canvas.height,
            data: out,
            premultiplied: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
