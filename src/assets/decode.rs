use std::sync::Arc;

use crate::foundation::{
    core::{CanvasSize, ImageSize},
    error::{MockupError, MockupResult},
    math::premultiply_rgba8_in_place,
};

/// Largest width or height the rasterizer can sample from.
pub const MAX_IMAGE_DIMENSION: u32 = u16::MAX as u32;

/// Decoded raster in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> MockupResult<Self> {
        if width == 0 || height == 0 {
            return Err(MockupError::image_load(format!(
                "image has degenerate size {width}x{height}"
            )));
        }
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(MockupError::image_load(format!(
                "image is {width}x{height}, larger than the {MAX_IMAGE_DIMENSION} px limit per side"
            )));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba.len() != expected {
            return Err(MockupError::image_load(format!(
                "rgba8 buffer is {} bytes, expected {expected}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

pub fn decode_image(bytes: &[u8]) -> MockupResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MockupError::image_load(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Parsed SVG document.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

pub fn parse_svg(bytes: &[u8]) -> MockupResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| MockupError::image_load(format!("parse svg tree: {e}")))?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Rasterize `svg` stretched to `width`x`height`.
pub fn rasterize_svg(svg: &PreparedSvg, width: u32, height: u32) -> MockupResult<PreparedImage> {
    let size = svg.tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(MockupError::image_load("svg has invalid width/height"));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MockupError::image_load("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&svg.tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

/// Decode a clip mask. SVG masks are rasterized directly at canvas size; raster masks are kept
/// at their natural size and stretched when drawn.
///
/// Coverage is read from alpha. Rasters without an alpha channel (grayscale masks) use luminance
/// as coverage instead: white keeps, black clips.
pub fn decode_mask(bytes: &[u8], canvas: CanvasSize) -> MockupResult<PreparedImage> {
    if looks_like_svg(bytes) {
        let svg = parse_svg(bytes)?;
        return rasterize_svg(&svg, canvas.width, canvas.height);
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MockupError::image_load(format!("decode mask from memory: {e}")))?;
    if dyn_img.color().has_alpha() {
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        return PreparedImage::from_straight_rgba8(width, height, rgba.into_raw());
    }
    let luma = dyn_img.to_luma8();
    let (width, height) = luma.dimensions();
    let rgba = luma
        .into_raw()
        .into_iter()
        .flat_map(|l| [255, 255, 255, l])
        .collect();
    PreparedImage::from_straight_rgba8(width, height, rgba)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    if image::guess_format(bytes).is_ok() {
        return false;
    }
    let head = &bytes[..bytes.len().min(1024)];
    String::from_utf8_lossy(head).contains("<svg")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
