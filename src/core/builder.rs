//! Engine builder for fluent API configuration
//!
//! `EngineBuilder` collects options and notification hooks and produces a
//! [`GestureEngine`] bound to a host platform.

use crate::{
    core::{
        config::EngineConfig,
        geo::ViewportSize,
        transform::{RenderTransform, Transform},
    },
    engine::{EngineCallbacks, GestureEngine},
    runtime::Platform,
    Result,
};
use std::time::Duration;

/// Builder for creating and configuring GestureEngine instances
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    viewport: Option<ViewportSize>,
    callbacks: EngineCallbacks,
}

impl EngineBuilder {
    /// Create a new EngineBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial_scale(mut self, scale: f64) -> Self {
        self.config.initial_scale = scale;
        self
    }

    pub fn max_scale(mut self, max_scale: f64) -> Self {
        self.config.max_scale = max_scale;
        self
    }

    pub fn manipulation_enabled(mut self, enabled: bool) -> Self {
        self.config.manipulation_enabled = enabled;
        self
    }

    pub fn pinch_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pinch_idle_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn resize_debounce(mut self, debounce: Duration) -> Self {
        self.config.resize_debounce_ms = debounce.as_millis() as u64;
        self
    }

    /// Set the viewport size known at construction time
    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Some(ViewportSize::new(width, height));
        self
    }

    pub fn on_pinch_start<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.on_pinch_start = Some(Box::new(callback));
        self
    }

    pub fn on_pinch_stop<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Transform) + 'static,
    {
        self.callbacks.on_pinch_stop = Some(Box::new(callback));
        self
    }

    pub fn on_render<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&RenderTransform) + 'static,
    {
        self.callbacks.on_render = Some(Box::new(callback));
        self
    }

    /// Validate the configuration and build the engine
    pub fn build<P: Platform>(self, platform: P) -> Result<GestureEngine<P>> {
        let mut engine = GestureEngine::new(self.config, platform)?;
        engine.set_callbacks(self.callbacks);
        if let Some(viewport) = self.viewport {
            engine.set_viewport(viewport);
        }
        Ok(engine)
    }
}
