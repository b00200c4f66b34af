//! # Pinchable
//!
//! Pinch-to-zoom and drag-to-pan for a bounded viewport.
//!
//! The [`GestureEngine`] consumes normalized pointer samples, keeps a single
//! clamped `(scale, x, y)` transform and reports when the user starts and
//! stops pinching. Rendering, DOM attachment and real event loops stay with
//! the host, which plugs in through the [`runtime::Platform`] trait.

pub mod core;
pub mod engine;
pub mod input;
#[cfg(feature = "debug")]
pub mod logging;
pub mod prelude;
pub mod replay;
pub mod runtime;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::EngineBuilder,
    config::{ConfigError, EngineConfig},
    geo::{Point, ViewportSize},
    transform::{RenderTransform, Transform, TransformUpdate},
};

pub use crate::engine::{EngineCallbacks, GestureEngine, PinchActivityState};

pub use crate::input::{
    events::{EventHandled, GesturePhase, PointerEvent},
    gestures::GestureSample,
};

pub use crate::runtime::{FrameScheduler, Platform, TimerId, Timer, VirtualPlatform, Wakeup};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum PinchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Replay error: {0}")]
    Replay(String),
}

/// Error type alias for convenience
pub type Error = PinchError;
