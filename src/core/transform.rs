use crate::core::geo::{Point, ViewportSize};
use serde::{Deserialize, Serialize};

/// Pan/zoom state applied to the viewed content (CSS-style scale + translate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Scale factor (1.0 = no zoom)
    pub scale: f64,
    /// Horizontal translation in pixels
    pub x: f64,
    /// Vertical translation in pixels
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::with_scale(1.0)
    }

    pub fn with_scale(scale: f64) -> Self {
        Self::new(scale, 0.0, 0.0)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the content is zoomed past its natural size
    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    /// Returns a copy with `update` merged over this transform
    pub fn apply(&self, update: &TransformUpdate) -> Transform {
        Transform {
            scale: update.scale.unwrap_or(self.scale),
            x: update.x.unwrap_or(self.x),
            y: update.y.unwrap_or(self.y),
        }
    }

    /// Formats each component with two decimals for the rendering layer
    pub fn to_render(&self) -> RenderTransform {
        RenderTransform {
            x: fixed2(self.x),
            y: fixed2(self.y),
            scale: fixed2(self.scale),
        }
    }
}

/// Two-decimal rendering with exact halves rounded away from zero.
///
/// `{:.2}` rounds the exact binary value correctly but sends ties to even.
/// A binary float sits exactly halfway between two hundredths only when it is
/// an odd number of eighths, so those are rounded explicitly.
fn fixed2(value: f64) -> String {
    // -0.0 prints as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let hundredths = (value * 100.0).round();
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{:.2}", value)
}

/// Maximum pan offset in each direction for the given scale.
///
/// Half of the overflow of the scaled viewport beyond its natural size,
/// expressed in unscaled pixels. Zero at `scale == 1`.
pub fn pan_range(scale: f64, viewport: &ViewportSize) -> Point {
    Point::new(
        (viewport.width * scale - viewport.width) / (scale * 2.0),
        (viewport.height * scale - viewport.height) / (scale * 2.0),
    )
}

/// Restricts `value` to `[min, max]`; `max` wins when the bounds cross.
pub fn between(min: f64, max: f64, value: f64) -> f64 {
    max.min(min.max(value))
}

/// Partial transform change produced by a single gesture sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformUpdate {
    pub scale: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl TransformUpdate {
    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            scale: None,
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.x.is_none() && self.y.is_none()
    }

    /// Merges a newer update over this one, field by field
    pub fn merge(&mut self, newer: TransformUpdate) {
        if newer.scale.is_some() {
            self.scale = newer.scale;
        }
        if newer.x.is_some() {
            self.x = newer.x;
        }
        if newer.y.is_some() {
            self.y = newer.y;
        }
    }
}

/// String form of a transform handed to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTransform {
    pub x: String,
    pub y: String,
    pub scale: String,
}

impl From<Transform> for RenderTransform {
    fn from(transform: Transform) -> Self {
        transform.to_render()
    }
}
