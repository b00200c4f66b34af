//! Platform abstraction layer for frame and timer callbacks
//!
//! The engine never touches a real event loop. It asks the host for a frame
//! or a timer through the traits below, and the host calls back with
//! [`GestureEngine::dispatch`] once the frame tick or deadline arrives.
//! [`VirtualPlatform`] is a deterministic host used for replays and tests.

use crate::{core::constants::FRAME_INTERVAL_MS, engine::GestureEngine};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timers the engine may arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerId {
    /// Quiet period that ends an active pinch
    PinchIdle,
    /// Trailing debounce for viewport resizes
    Resize,
}

/// Callback the host delivers back to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Frame,
    Timer(TimerId),
}

/// Requests a callback on the next display refresh
pub trait FrameScheduler {
    /// Requests a `Wakeup::Frame`; repeated requests before the frame fires
    /// collapse into one
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);
}

/// One-shot timers keyed by [`TimerId`]
pub trait Timer {
    /// Arms `id` to fire after `delay`, replacing any earlier deadline
    fn set_timer(&mut self, id: TimerId, delay: Duration);

    fn cancel_timer(&mut self, id: TimerId);
}

/// Everything the engine needs from its host environment
pub trait Platform: FrameScheduler + Timer {
    /// Whether raw events carry touch lists; otherwise the alt key simulates a pinch
    fn is_touch_capable(&self) -> bool;
}

/// Deterministic platform with a manually advanced clock
#[derive(Debug, Clone)]
pub struct VirtualPlatform {
    touch_capable: bool,
    frame_interval: Duration,
    now: Duration,
    frame_requested: bool,
    frame_requests: usize,
    timers: FxHashMap<TimerId, Duration>,
}

impl VirtualPlatform {
    pub fn new(touch_capable: bool) -> Self {
        Self {
            touch_capable,
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
            now: Duration::ZERO,
            frame_requested: false,
            frame_requests: 0,
            timers: FxHashMap::default(),
        }
    }

    pub fn touch() -> Self {
        Self::new(true)
    }

    pub fn mouse() -> Self {
        Self::new(false)
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Time elapsed since the platform was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_requested
    }

    /// Number of distinct frames requested so far
    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    pub fn timer_deadline(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id).copied()
    }

    /// First refresh tick strictly after the current time
    fn next_frame_tick(&self) -> Duration {
        let interval = self.frame_interval.as_nanos();
        let ticks = self.now.as_nanos() / interval + 1;
        Duration::from_nanos((ticks * interval) as u64)
    }

    /// Pops the earliest wakeup due no later than `until` and moves the
    /// clock to its deadline. Frames win ties against timers.
    pub fn next_wakeup(&mut self, until: Duration) -> Option<Wakeup> {
        let frame = self
            .frame_requested
            .then(|| (self.next_frame_tick(), Wakeup::Frame));
        let timer = self
            .timers
            .iter()
            .min_by_key(|(id, deadline)| (**deadline, **id))
            .map(|(id, deadline)| (*deadline, Wakeup::Timer(*id)));

        let (deadline, wakeup) = match (frame, timer) {
            (Some(frame), Some(timer)) if timer.0 < frame.0 => timer,
            (Some(frame), _) => frame,
            (None, Some(timer)) => timer,
            (None, None) => return None,
        };
        if deadline > until {
            return None;
        }

        self.now = self.now.max(deadline);
        match wakeup {
            Wakeup::Frame => self.frame_requested = false,
            Wakeup::Timer(id) => {
                self.timers.remove(&id);
            }
        }
        Some(wakeup)
    }

    fn advance_clock(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Default for VirtualPlatform {
    fn default() -> Self {
        Self::touch()
    }
}

impl FrameScheduler for VirtualPlatform {
    fn request_frame(&mut self) {
        if !self.frame_requested {
            self.frame_requested = true;
            self.frame_requests += 1;
        }
    }

    fn cancel_frame(&mut self) {
        self.frame_requested = false;
    }
}

impl Timer for VirtualPlatform {
    fn set_timer(&mut self, id: TimerId, delay: Duration) {
        self.timers.insert(id, self.now + delay);
    }

    fn cancel_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

impl Platform for VirtualPlatform {
    fn is_touch_capable(&self) -> bool {
        self.touch_capable
    }
}

impl GestureEngine<VirtualPlatform> {
    /// Moves the virtual clock forward by `elapsed`, delivering every frame
    /// and timer that falls due on the way, in deadline order
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.platform().now() + elapsed;
        while let Some(wakeup) = self.platform_mut().next_wakeup(until) {
            self.dispatch(wakeup);
        }
        self.platform_mut().advance_clock(until);
    }

    pub fn advance_ms(&mut self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requests_collapse() {
        let mut platform = VirtualPlatform::touch();
        platform.request_frame();
        platform.request_frame();
        assert_eq!(platform.frame_requests(), 1);
        assert!(platform.is_frame_pending());

        assert_eq!(
            platform.next_wakeup(Duration::from_millis(100)),
            Some(Wakeup::Frame)
        );
        assert_eq!(platform.now(), Duration::from_millis(16));
        assert_eq!(platform.next_wakeup(Duration::from_millis(100)), None);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut platform = VirtualPlatform::mouse();
        platform.set_timer(TimerId::Resize, Duration::from_millis(300));
        platform.set_timer(TimerId::PinchIdle, Duration::from_millis(100));

        let until = Duration::from_secs(1);
        assert_eq!(
            platform.next_wakeup(until),
            Some(Wakeup::Timer(TimerId::PinchIdle))
        );
        assert_eq!(
            platform.next_wakeup(until),
            Some(Wakeup::Timer(TimerId::Resize))
        );
        assert_eq!(platform.now(), Duration::from_millis(300));
        assert_eq!(platform.next_wakeup(until), None);
    }

    #[test]
    fn test_rearming_replaces_deadline() {
        let mut platform = VirtualPlatform::touch();
        platform.set_timer(TimerId::PinchIdle, Duration::from_millis(500));
        platform.set_timer(TimerId::PinchIdle, Duration::from_millis(800));
        assert_eq!(
            platform.timer_deadline(TimerId::PinchIdle),
            Some(Duration::from_millis(800))
        );
        platform.cancel_timer(TimerId::PinchIdle);
        assert_eq!(platform.timer_deadline(TimerId::PinchIdle), None);
    }

    #[test]
    fn test_wakeups_past_horizon_stay_queued() {
        let mut platform = VirtualPlatform::touch();
        platform.set_timer(TimerId::Resize, Duration::from_millis(500));
        assert_eq!(platform.next_wakeup(Duration::from_millis(499)), None);
        assert!(platform.timer_deadline(TimerId::Resize).is_some());
    }

    #[test]
    fn test_frame_tick_alignment() {
        let mut platform = VirtualPlatform::touch().with_frame_interval(Duration::from_millis(10));
        platform.advance_clock(Duration::from_millis(25));
        platform.request_frame();
        assert_eq!(
            platform.next_wakeup(Duration::from_secs(1)),
            Some(Wakeup::Frame)
        );
        assert_eq!(platform.now(), Duration::from_millis(30));
    }
}
