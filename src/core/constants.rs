//! Engine-wide defaults for pinch/pan handling.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Scale applied before any gesture.
pub const DEFAULT_INITIAL_SCALE: f64 = 1.0;

/// Upper clamp bound for pinch zoom.
pub const DEFAULT_MAX_SCALE: f64 = 2.0;

/// Quiet period after the last scale change before a pinch counts as stopped.
pub const PINCH_IDLE_TIMEOUT_MS: u64 = 500;

/// Trailing debounce applied to viewport resize notifications.
pub const RESIZE_DEBOUNCE_MS: u64 = 500;

/// Scales below this are treated as fully unzoomed and snap the pan to the origin.
pub const SNAP_TO_ORIGIN_SCALE: f64 = 1.01;

/// Display refresh interval assumed by the virtual platform (~60 Hz).
pub const FRAME_INTERVAL_MS: u64 = 16;
