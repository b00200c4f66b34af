use crate::{
    core::{
        geo::{Point, ViewportSize},
        transform::{between, pan_range, Transform, TransformUpdate},
    },
    input::events::PointerEvent,
};
use serde::{Deserialize, Serialize};

/// Normalized pointer sample consumed once by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub x: f64,
    pub y: f64,
    /// Two fingers on a touch platform, or alt held with a mouse
    pub two_point_touch: bool,
    pub native_scale_hint: Option<f64>,
}

impl GestureSample {
    pub fn pan(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            two_point_touch: false,
            native_scale_hint: None,
        }
    }

    pub fn pinch(x: f64, y: f64) -> Self {
        Self {
            two_point_touch: true,
            ..Self::pan(x, y)
        }
    }

    pub fn with_native_scale(mut self, scale: f64) -> Self {
        self.native_scale_hint = Some(scale);
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Normalizes a raw platform event.
    ///
    /// On touch platforms the first touch gives the position and two touches
    /// mean pinch; otherwise the mouse position is used and the alt key
    /// stands in for the second finger. Touch events without any touches
    /// (e.g. the final `touchend`) yield no sample.
    pub fn from_event(event: &PointerEvent, touch_capable: bool) -> Option<Self> {
        if touch_capable {
            let first = event.touches.first()?;
            Some(Self {
                x: first.position.x,
                y: first.position.y,
                two_point_touch: event.touches.len() == 2,
                native_scale_hint: event.scale.filter(|scale| *scale != 0.0),
            })
        } else {
            Some(Self {
                x: event.position.x,
                y: event.position.y,
                two_point_touch: event.modifiers.alt,
                native_scale_hint: None,
            })
        }
    }
}

/// State of a single continuous press, from gesture start to gesture end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub start_point: Point,
    pub start_transform: Transform,
    /// Viewport captured when the press began; `None` if layout was unknown
    pub viewport: Option<ViewportSize>,
}

impl GestureSession {
    pub fn begin(
        sample: &GestureSample,
        start_transform: Transform,
        viewport: Option<ViewportSize>,
    ) -> Self {
        Self {
            start_point: sample.position(),
            start_transform,
            viewport,
        }
    }

    /// Usable viewport for this session, if any
    fn usable_viewport(&self) -> Option<ViewportSize> {
        self.viewport.filter(ViewportSize::is_valid)
    }

    /// Pinch zoom for a two-point sample.
    ///
    /// Without a native hint the scale factor is derived from horizontal
    /// displacement relative to the viewport center, which approximates the
    /// finger spread with a single tracked point.
    pub fn pinch(
        &self,
        sample: &GestureSample,
        max_scale: f64,
        snap_threshold: f64,
    ) -> Option<TransformUpdate> {
        let viewport = self.usable_viewport()?;
        let factor = match sample.native_scale_hint.filter(|hint| hint.is_finite()) {
            Some(hint) => hint,
            None => {
                let start = viewport.translate_to_center(&self.start_point);
                let moved = viewport.translate_to_center(&sample.position());
                let base = self.start_transform.scale;
                if sample.x < viewport.width / 2.0 {
                    base + (start.x - moved.x) / viewport.width
                } else {
                    base + (moved.x - start.x) / viewport.width
                }
            }
        };
        if !factor.is_finite() {
            return None;
        }

        let next_scale = between(1.0, max_scale, factor);
        let mut update = TransformUpdate::scale(next_scale);
        if next_scale < snap_threshold {
            update.x = Some(0.0);
            update.y = Some(0.0);
        }
        Some(update)
    }

    /// Drag pan for a single-point sample, clamped to the range the current
    /// scale allows
    pub fn pan(&self, sample: &GestureSample, scale: f64) -> Option<TransformUpdate> {
        let viewport = self.usable_viewport()?;
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let range = pan_range(scale, &viewport);
        let delta = sample.position().subtract(&self.start_point);
        let candidate = self.start_transform.translation().add(&delta);
        if !candidate.is_finite() {
            return None;
        }
        Some(TransformUpdate::translate(
            between(-range.x, range.x, candidate.x),
            between(-range.y, range.y, candidate.y),
        ))
    }
}
