use crate::foundation::core::{MIN_EXTENT, Placement};

/// One interactive transform-box gesture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Move the box.
    Drag { dx: f64, dy: f64 },
    /// Corner handle: width changes by `dw`, height follows the current aspect ratio.
    ResizeUniform { dw: f64 },
    /// Edge handles: width and height change independently.
    Resize { dw: f64, dh: f64 },
    /// Rotate about the placement origin, clockwise on screen.
    Rotate { degrees: f64 },
    /// Absolute geometry reported when an editor transform ends.
    Commit(Placement),
}

/// Apply `gesture` to `current`. Never fails: extents are clamped to [`MIN_EXTENT`], rotation is
/// kept in `[0, 360)` and non-finite deltas leave the placement unchanged.
pub fn apply_user_transform(current: Placement, gesture: Gesture) -> Placement {
    let next = match gesture {
        Gesture::Drag { dx, dy } => {
            if !(dx.is_finite() && dy.is_finite()) {
                return current;
            }
            Placement {
                x: current.x + dx,
                y: current.y + dy,
                ..current
            }
        }
        Gesture::ResizeUniform { dw } => {
            if !dw.is_finite() {
                return current;
            }
            resize_uniform(current, dw)
        }
        Gesture::Resize { dw, dh } => {
            if !(dw.is_finite() && dh.is_finite()) {
                return current;
            }
            Placement {
                width: (current.width + dw).max(MIN_EXTENT),
                height: (current.height + dh).max(MIN_EXTENT),
                ..current
            }
        }
        Gesture::Rotate { degrees } => {
            if !degrees.is_finite() {
                return current;
            }
            Placement {
                rotation_deg: current.rotation_deg + degrees,
                ..current
            }
        }
        Gesture::Commit(p) => {
            if !committed_is_clampable(&p) {
                return current;
            }
            Placement {
                width: p.width.max(MIN_EXTENT),
                height: p.height.max(MIN_EXTENT),
                ..p
            }
        }
    };
    normalize(next)
}

fn resize_uniform(current: Placement, dw: f64) -> Placement {
    let aspect = current.width / current.height;
    let mut width = current.width + dw;
    let mut height = width / aspect;
    let smallest = width.min(height);
    if smallest < MIN_EXTENT {
        let k = MIN_EXTENT / smallest.max(f64::MIN_POSITIVE);
        // Shrinking past zero flips sign; fall back to the minimal box at the current aspect.
        if width <= 0.0 || height <= 0.0 {
            if aspect >= 1.0 {
                height = MIN_EXTENT;
                width = MIN_EXTENT * aspect;
            } else {
                width = MIN_EXTENT;
                height = MIN_EXTENT / aspect;
            }
        } else {
            width *= k;
            height *= k;
        }
    }
    Placement {
        width,
        height,
        ..current
    }
}

fn committed_is_clampable(p: &Placement) -> bool {
    [p.x, p.y, p.width, p.height, p.rotation_deg]
        .iter()
        .all(|v| v.is_finite())
}

fn normalize(mut p: Placement) -> Placement {
    p.rotation_deg = p.rotation_deg.rem_euclid(360.0);
    if p.rotation_deg >= 360.0 {
        p.rotation_deg = 0.0;
    }
    p.width = p.width.max(MIN_EXTENT);
    p.height = p.height.max(MIN_EXTENT);
    p
}

#[cfg(test)]
#[path = "../../tests/unit/layout/gesture.rs"]
mod tests;
