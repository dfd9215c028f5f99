use crate::foundation::{
    error::{MockupError, MockupResult},
    math::{mul_div255_u8, premultiply_rgba8_in_place, unit_to_u8, unpremultiply_px},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over with an extra layer opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = u16::from(unit_to_u8(opacity));
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> MockupResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MockupError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Destination-in: keep `layer` only where `coverage` is opaque.
pub fn mask_in_place(layer: &mut [u8], coverage: &[u8]) -> MockupResult<()> {
    if layer.len() != coverage.len().saturating_mul(4) {
        return Err(MockupError::render(
            "mask_in_place expects one coverage byte per rgba8 pixel",
        ));
    }
    for (px, &w) in layer.chunks_exact_mut(4).zip(coverage.iter()) {
        if w == 255 {
            continue;
        }
        let w16 = u16::from(w);
        for c in px.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w16);
        }
    }
    Ok(())
}

/// Additive brightness on straight-alpha channels (`c + brightness * 255`, clamped), returned
/// premultiplied again. Alpha is untouched.
pub fn brighten_premul(src: &[u8], brightness: f32) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    if brightness == 0.0 || !brightness.is_finite() {
        out.extend_from_slice(src);
        return out;
    }
    let delta = (brightness.clamp(-1.0, 1.0) * 255.0).round() as i16;
    for px in src.chunks_exact(4) {
        let straight = unpremultiply_px([px[0], px[1], px[2], px[3]]);
        let adj = |c: u8| -> u8 { (i16::from(c) + delta).clamp(0, 255) as u8 };
        out.extend_from_slice(&[adj(straight[0]), adj(straight[1]), adj(straight[2]), straight[3]]);
    }
    premultiply_rgba8_in_place(&mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
