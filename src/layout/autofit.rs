use crate::foundation::{
    core::{ImageSize, Placement, Rect, Vec2},
    error::{MockupError, MockupResult},
};

/// Reference center of the interactive editor stage, in logical pixels.
pub const EDITOR_CENTER: f64 = 140.0;

/// Relative offset the user chose in the shared editor, carried across product types.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorNudge {
    pub dx: f64,
    pub dy: f64,
}

impl EditorNudge {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Nudge implied by an editor node sitting at `(x, y)`.
    pub fn from_editor_position(x: f64, y: f64) -> Self {
        Self {
            dx: x - EDITOR_CENTER,
            dy: y - EDITOR_CENTER,
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        if self.dx.is_finite() && self.dy.is_finite() {
            Vec2::new(self.dx, self.dy)
        } else {
            Vec2::ZERO
        }
    }
}

/// Scale-to-fill placement for a freshly loaded source image.
///
/// The source is fitted by width when it is relatively wider than `area`, otherwise by height,
/// to `overflow` times the matching area dimension, and centered on the area. Overflowing the
/// nominal area is intentional: the clip silhouette is irregular and must still be filled.
#[tracing::instrument(level = "debug", skip(area))]
pub fn compute_auto_fit(source: ImageSize, area: Rect, overflow: f64) -> MockupResult<Placement> {
    let image_aspect = source.aspect()?;

    let (aw, ah) = (area.width(), area.height());
    if !(aw.is_finite() && ah.is_finite() && area.x0.is_finite() && area.y0.is_finite()) {
        return Err(MockupError::invalid_geometry("printable area must be finite"));
    }
    if aw <= 0.0 || ah <= 0.0 {
        return Err(MockupError::invalid_geometry(format!(
            "printable area must be positive (got {aw}x{ah})"
        )));
    }
    if !overflow.is_finite() || overflow <= 0.0 {
        return Err(MockupError::invalid_geometry(format!(
            "overflow multiple must be finite and > 0 (got {overflow})"
        )));
    }

    let area_aspect = aw / ah;
    let (width, height) = if image_aspect > area_aspect {
        let w = aw * overflow;
        (w, w / image_aspect)
    } else {
        let h = ah * overflow;
        (h * image_aspect, h)
    };

    let placement = Placement::new(
        area.x0 + (aw - width) / 2.0,
        area.y0 + (ah - height) / 2.0,
        width,
        height,
    );
    tracing::debug!(
        area_w = aw,
        area_h = ah,
        width,
        height,
        image_aspect,
        area_aspect,
        "auto-fit computed"
    );
    placement.validate()?;
    Ok(placement)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/autofit.rs"]
mod tests;
