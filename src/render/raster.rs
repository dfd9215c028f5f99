//! Thin glue over `vello_cpu`: surfaces are drawn from scratch into fresh pixmaps and read back
//! as premultiplied RGBA8.

use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Affine, BezPath, CanvasSize},
    foundation::error::{MockupError, MockupResult},
};

/// Reusable drawing context, recreated only when the surface size changes.
#[derive(Default)]
pub(crate) struct Rasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl Rasterizer {
    /// Run `draw` on a cleared context of `canvas` size and return the resulting pixels.
    pub(crate) fn render(
        &mut self,
        canvas: CanvasSize,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> MockupResult<()>,
    ) -> MockupResult<Vec<u8>> {
        let (w, h) = surface_dims(canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        draw(&mut ctx)?;
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

fn surface_dims(canvas: CanvasSize) -> MockupResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| MockupError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| MockupError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(MockupError::render("surface must be non-empty"));
    }
    Ok((w, h))
}

/// Draw `image` (in its own pixel space) through `transform`.
pub(crate) fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    image: &PreparedImage,
    transform: Affine,
) -> MockupResult<()> {
    let paint = image_paint(image)?;
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(image.width),
        f64::from(image.height),
    ));
    Ok(())
}

/// Fill `path` (canvas coordinates) with opaque white.
pub(crate) fn fill_path_opaque(ctx: &mut vello_cpu::RenderContext, path: &BezPath) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn image_paint(image: &PreparedImage) -> MockupResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MockupResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MockupError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MockupError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MockupError::render("pixmap byte len mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
