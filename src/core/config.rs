//! Configuration for the gesture engine
//!
//! `EngineConfig` carries the recognized options of the pinch/pan component
//! plus the timing knobs of the debounced notifications. It deserializes from
//! JSON with every field optional, falling back to the defaults in
//! [`crate::core::constants`].

use crate::core::constants::{
    DEFAULT_INITIAL_SCALE, DEFAULT_MAX_SCALE, PINCH_IDLE_TIMEOUT_MS, RESIZE_DEBOUNCE_MS,
    SNAP_TO_ORIGIN_SCALE,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("max scale must be finite and at least 1, got {0}")]
    MaxScaleOutOfRange(f64),

    #[error("initial scale {scale} is outside [1, {max_scale}]")]
    InitialScaleOutOfRange { scale: f64, max_scale: f64 },

    #[error("snap threshold must be finite and at least 1, got {0}")]
    SnapThresholdOutOfRange(f64),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Starting scale, also the target of external scale resets
    pub initial_scale: f64,
    /// Upper clamp bound for pinch zoom
    pub max_scale: f64,
    /// When false, samples pass through without any pan/zoom math
    pub manipulation_enabled: bool,
    pub pinch_idle_timeout_ms: u64,
    pub resize_debounce_ms: u64,
    /// Pinch results below this scale reset the pan offset to the origin
    pub snap_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_scale: DEFAULT_INITIAL_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            manipulation_enabled: true,
            pinch_idle_timeout_ms: PINCH_IDLE_TIMEOUT_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            snap_threshold: SNAP_TO_ORIGIN_SCALE,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON and validates it
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn pinch_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.pinch_idle_timeout_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_scale.is_finite() || self.max_scale < 1.0 {
            return Err(ConfigError::MaxScaleOutOfRange(self.max_scale));
        }
        self.check_scale(self.initial_scale)?;
        if !self.snap_threshold.is_finite() || self.snap_threshold < 1.0 {
            return Err(ConfigError::SnapThresholdOutOfRange(self.snap_threshold));
        }
        if self.pinch_idle_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("pinch idle timeout"));
        }
        if self.resize_debounce_ms == 0 {
            return Err(ConfigError::ZeroDuration("resize debounce"));
        }
        Ok(())
    }

    /// Checks that `scale` is a reachable transform scale under this config
    pub fn check_scale(&self, scale: f64) -> Result<(), ConfigError> {
        if scale.is_finite() && (1.0..=self.max_scale).contains(&scale) {
            Ok(())
        } else {
            Err(ConfigError::InitialScaleOutOfRange {
                scale,
                max_scale: self.max_scale,
            })
        }
    }
}
