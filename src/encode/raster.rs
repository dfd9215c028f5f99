use std::path::Path;

use anyhow::Context;
use image::ImageEncoder;

use crate::{
    foundation::error::{MockupError, MockupResult},
    foundation::math::{mul_div255_u8, unpremultiply_px},
    render::compositor::RasterFrame,
};

pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Output container for a composited mockup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportFormat {
    Jpeg { quality: u8 },
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }

    pub fn validate(self) -> MockupResult<()> {
        match self {
            Self::Jpeg { quality } if !(1..=100).contains(&quality) => Err(
                MockupError::validation(format!("jpeg quality must be in 1..=100, got {quality}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Encode a frame.
///
/// JPEG drops alpha by flattening onto opaque black, which for premultiplied pixels is just the
/// color channels. PNG keeps alpha and is written straight (unpremultiplied).
pub fn encode_frame(frame: &RasterFrame, format: ExportFormat) -> MockupResult<Vec<u8>> {
    format.validate()?;
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(MockupError::encode(format!(
            "frame buffer is {} bytes for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut out = Vec::new();
    match format {
        ExportFormat::Jpeg { quality } => {
            let rgb = flatten_to_rgb8(frame);
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
                .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
                .map_err(|e| MockupError::encode(format!("jpeg: {e}")))?;
        }
        ExportFormat::Png => {
            let rgba = straight_rgba8(frame);
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(
                    &rgba,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| MockupError::encode(format!("png: {e}")))?;
        }
    }
    Ok(out)
}

fn flatten_to_rgb8(frame: &RasterFrame) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(frame.data.len() / 4 * 3);
    for px in frame.data.chunks_exact(4) {
        let px = if frame.premultiplied {
            [px[0], px[1], px[2]]
        } else {
            let a = u16::from(px[3]);
            [
                mul_div255_u8(u16::from(px[0]), a),
                mul_div255_u8(u16::from(px[1]), a),
                mul_div255_u8(u16::from(px[2]), a),
            ]
        };
        rgb.extend_from_slice(&px);
    }
    rgb
}

fn straight_rgba8(frame: &RasterFrame) -> Vec<u8> {
    if !frame.premultiplied {
        return frame.data.clone();
    }
    frame
        .data
        .chunks_exact(4)
        .flat_map(|px| unpremultiply_px([px[0], px[1], px[2], px[3]]))
        .collect()
}

/// Write encoded bytes, creating the parent directory if needed.
pub fn write_encoded(path: &Path, bytes: &[u8]) -> MockupResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
