use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a raw platform event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// `touchstart` / `mousedown`
    Start,
    /// `touchmove` / `mousemove`
    Move,
    /// `touchend` / `mouseup`
    End,
}

/// Raw pointer, mouse or touch event as delivered by the platform
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerEvent {
    /// Mouse position in client pixels (ignored on touch platforms)
    pub position: Point,
    /// Active touch points, in platform order
    pub touches: Vec<TouchPoint>,
    pub modifiers: KeyModifiers,
    /// Native pinch ratio reported by some touch platforms
    pub scale: Option<f64>,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            ..Default::default()
        }
    }

    /// Mouse event with the alt key held, which simulates a pinch on
    /// platforms without touch support
    pub fn mouse_with_alt(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            modifiers: KeyModifiers {
                alt: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn touch(touches: Vec<TouchPoint>) -> Self {
        Self {
            touches,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Whether an event was handled.
///
/// `Handled` asks the host to suppress the platform default (page scroll,
/// native zoom) for the event that produced it.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn from_bool(handled: bool) -> Self {
        if handled {
            EventHandled::Handled
        } else {
            EventHandled::NotHandled
        }
    }

    pub fn should_prevent_default(&self) -> bool {
        matches!(self, EventHandled::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let event = PointerEvent::mouse_with_alt(10.0, 20.0);
        assert!(event.modifiers.alt);
        assert!(!event.modifiers.shift);
        assert_eq!(event.position, Point::new(10.0, 20.0));

        let event = PointerEvent::touch(vec![TouchPoint::new(1, 5.0, 6.0)]).with_scale(1.4);
        assert_eq!(event.touches.len(), 1);
        assert_eq!(event.scale, Some(1.4));
    }

    #[test]
    fn test_event_handled() {
        assert!(EventHandled::from_bool(true).should_prevent_default());
        assert!(!EventHandled::NotHandled.should_prevent_default());
    }

    #[test]
    fn test_pointer_event_from_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{ "position": { "x": 3.0, "y": 4.0 }, "modifiers": { "alt": true } }"#)
                .unwrap();
        assert_eq!(event.position, Point::new(3.0, 4.0));
        assert!(event.modifiers.alt);
        assert!(event.touches.is_empty());
        assert_eq!(event.scale, None);
    }
}
