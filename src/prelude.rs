//! Prelude module for common pinchable types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pinchable::prelude::*;`

pub use crate::core::{
    builder::EngineBuilder,
    config::{ConfigError, EngineConfig},
    geo::{Point, ViewportSize},
    transform::{pan_range, RenderTransform, Transform, TransformUpdate},
};

pub use crate::engine::{EngineCallbacks, GestureEngine, PinchActivityState};

pub use crate::input::{
    events::{EventHandled, GesturePhase, KeyModifiers, PointerEvent, TouchPoint},
    gestures::{GestureSample, GestureSession},
};

pub use crate::runtime::{FrameScheduler, Platform, TimerId, Timer, VirtualPlatform, Wakeup};

#[cfg(feature = "debug")]
pub use crate::logging::{init_logging, LoggingConfig};

pub use crate::{Error as PinchError, Result};

pub use std::time::Duration;
