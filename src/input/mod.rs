pub mod events;
pub mod gestures;

// Re-export the essential types
pub use events::{EventHandled, GesturePhase, KeyModifiers, PointerEvent, TouchPoint};
pub use gestures::{GestureSample, GestureSession};
