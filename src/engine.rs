//! Gesture-driven pan/zoom engine
//!
//! [`GestureEngine`] owns the [`Transform`] and turns a stream of gesture
//! samples into clamped transform updates. Updates are coalesced and applied
//! once per display frame; pinch activity is tracked with a debounce timer
//! that drives the pinch start/stop notifications.

use crate::{
    core::{
        config::EngineConfig,
        geo::ViewportSize,
        transform::{RenderTransform, Transform, TransformUpdate},
    },
    input::{
        events::{EventHandled, GesturePhase, PointerEvent},
        gestures::{GestureSample, GestureSession},
    },
    runtime::{Platform, TimerId, Wakeup},
    Result,
};
use log::{debug, trace};

pub type PinchStartCallback = Box<dyn FnMut()>;
pub type PinchStopCallback = Box<dyn FnMut(Transform)>;
pub type RenderCallback = Box<dyn FnMut(&RenderTransform)>;

/// Whether the user is currently changing the scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchActivityState {
    #[default]
    Idle,
    Active,
}

/// Notification hooks; all optional
#[derive(Default)]
pub struct EngineCallbacks {
    /// Fired on the Idle → Active transition
    pub on_pinch_start: Option<PinchStartCallback>,
    /// Fired on the Active → Idle transition with the transform at that point
    pub on_pinch_stop: Option<PinchStopCallback>,
    /// Fired with the formatted transform whenever a new transform is applied
    pub on_render: Option<RenderCallback>,
}

impl std::fmt::Debug for EngineCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCallbacks")
            .field("on_pinch_start", &self.on_pinch_start.is_some())
            .field("on_pinch_stop", &self.on_pinch_stop.is_some())
            .field("on_render", &self.on_render.is_some())
            .finish()
    }
}

pub struct GestureEngine<P: Platform> {
    config: EngineConfig,
    platform: P,
    /// Last committed transform, the one the renderer shows
    transform: Transform,
    /// Updates computed since the last frame, merged field by field
    pending: Option<TransformUpdate>,
    frame_requested: bool,
    viewport: Option<ViewportSize>,
    /// Latest size reported during an ongoing resize burst
    pending_viewport: Option<ViewportSize>,
    session: Option<GestureSession>,
    pinch_state: PinchActivityState,
    callbacks: EngineCallbacks,
    disposed: bool,
}

impl<P: Platform> GestureEngine<P> {
    pub fn new(config: EngineConfig, platform: P) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transform: Transform::with_scale(config.initial_scale),
            config,
            platform,
            pending: None,
            frame_requested: false,
            viewport: None,
            pending_viewport: None,
            session: None,
            pinch_state: PinchActivityState::Idle,
            callbacks: EngineCallbacks::default(),
            disposed: false,
        })
    }

    pub fn set_callbacks(&mut self, callbacks: EngineCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn on_pinch_start<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.callbacks.on_pinch_start = Some(Box::new(callback));
    }

    pub fn on_pinch_stop<F>(&mut self, callback: F)
    where
        F: FnMut(Transform) + 'static,
    {
        self.callbacks.on_pinch_stop = Some(Box::new(callback));
    }

    pub fn on_render<F>(&mut self, callback: F)
    where
        F: FnMut(&RenderTransform) + 'static,
    {
        self.callbacks.on_render = Some(Box::new(callback));
    }

    /// Committed transform snapshot
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Committed transform with any not-yet-committed update applied
    pub fn latest_transform(&self) -> Transform {
        match &self.pending {
            Some(update) => self.transform.apply(update),
            None => self.transform,
        }
    }

    pub fn render_transform(&self) -> RenderTransform {
        self.transform.to_render()
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pinch_state(&self) -> PinchActivityState {
        self.pinch_state
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_state == PinchActivityState::Active
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn viewport(&self) -> Option<ViewportSize> {
        self.viewport
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Applies a viewport size right away, e.g. on first layout
    pub fn set_viewport(&mut self, size: ViewportSize) {
        if self.disposed {
            return;
        }
        if self.pending_viewport.take().is_some() {
            self.platform.cancel_timer(TimerId::Resize);
        }
        debug!("viewport set to {}x{}", size.width, size.height);
        self.viewport = Some(size);
    }

    /// Records a resize notification; the latest size is applied once no
    /// further resize has arrived for the debounce period
    pub fn on_resize(&mut self, size: ViewportSize) {
        if self.disposed {
            return;
        }
        self.pending_viewport = Some(size);
        self.platform
            .set_timer(TimerId::Resize, self.config.resize_debounce());
    }

    /// Resets the scale to a new externally supplied initial scale.
    ///
    /// Nothing happens when the committed scale already matches, so re-sending
    /// the same value keeps an uncommitted pinch. Otherwise a pending pinch
    /// scale is dropped. The pan offset is left as is and not re-clamped
    /// against the range of the new scale.
    pub fn set_initial_scale(&mut self, scale: f64) -> Result<()> {
        self.config.check_scale(scale)?;
        self.config.initial_scale = scale;
        if self.disposed {
            return Ok(());
        }
        if self.transform.scale != scale {
            debug!("scale reset from {} to {}", self.transform.scale, scale);
            if let Some(pending) = self.pending.as_mut() {
                pending.scale = None;
            }
            self.transform.scale = scale;
            self.notify_render();
        }
        Ok(())
    }

    /// Changes the pinch upper bound for subsequent gestures
    pub fn set_max_scale(&mut self, max_scale: f64) -> Result<()> {
        let config = EngineConfig {
            max_scale,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Turns pan/zoom math on or off; disabling drops any open session.
    ///
    /// While disabled the pinch idle timeout reports nothing and the pinch
    /// state stays `Active`, so no new start fires until a later pinch times
    /// out with manipulation enabled again.
    pub fn set_manipulation_enabled(&mut self, enabled: bool) {
        self.config.manipulation_enabled = enabled;
        if !enabled && self.session.take().is_some() {
            debug!("manipulation disabled, gesture session closed");
        }
    }

    /// Opens a gesture session.
    ///
    /// Returns `Handled` when the host should suppress the platform default:
    /// the press begins a pinch or the content is already zoomed.
    pub fn on_gesture_start(&mut self, sample: &GestureSample) -> EventHandled {
        if self.disposed || !self.config.manipulation_enabled {
            return EventHandled::NotHandled;
        }
        let current = self.latest_transform();
        self.session = Some(GestureSession::begin(sample, current, self.viewport));
        debug!(
            "gesture session opened at ({}, {}), two-point: {}",
            sample.x, sample.y, sample.two_point_touch
        );
        EventHandled::from_bool(sample.two_point_touch || current.is_zoomed())
    }

    /// Interprets a sample of the open session as a pinch or a pan.
    ///
    /// Without an open session, or without a usable viewport, nothing happens.
    pub fn on_gesture_move(&mut self, sample: &GestureSample) -> EventHandled {
        if self.disposed || !self.config.manipulation_enabled {
            return EventHandled::NotHandled;
        }
        let Some(session) = self.session else {
            return EventHandled::NotHandled;
        };

        let update = if sample.two_point_touch {
            session.pinch(sample, self.config.max_scale, self.config.snap_threshold)
        } else {
            session.pan(sample, self.latest_transform().scale)
        };

        match update {
            Some(update) => {
                self.emit(update);
                EventHandled::Handled
            }
            None => EventHandled::NotHandled,
        }
    }

    /// Closes the gesture session; an already computed update still commits
    pub fn on_gesture_end(&mut self) {
        if self.session.take().is_some() {
            debug!("gesture session closed");
        }
    }

    /// Adapter entry point for raw platform events
    pub fn handle_event(&mut self, phase: GesturePhase, event: &PointerEvent) -> EventHandled {
        if phase == GesturePhase::End {
            self.on_gesture_end();
            return EventHandled::NotHandled;
        }
        let Some(sample) = GestureSample::from_event(event, self.platform.is_touch_capable())
        else {
            return EventHandled::NotHandled;
        };
        match phase {
            GesturePhase::Start => self.on_gesture_start(&sample),
            _ => self.on_gesture_move(&sample),
        }
    }

    /// Delivers a frame tick or timer expiry requested from the platform
    pub fn dispatch(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::Frame => self.on_frame(),
            Wakeup::Timer(id) => self.on_timer(id),
        }
    }

    /// Commits the coalesced update of this frame
    pub fn on_frame(&mut self) {
        self.frame_requested = false;
        if self.disposed {
            return;
        }
        if let Some(update) = self.pending.take().filter(|update| !update.is_empty()) {
            self.transform = self.transform.apply(&update);
            trace!(
                "commit scale={:.3} x={:.3} y={:.3}",
                self.transform.scale,
                self.transform.x,
                self.transform.y
            );
            self.notify_render();
        }
    }

    pub fn on_timer(&mut self, id: TimerId) {
        if self.disposed {
            return;
        }
        match id {
            TimerId::PinchIdle => self.pinch_stopped(),
            TimerId::Resize => {
                if let Some(size) = self.pending_viewport.take() {
                    debug!("viewport resized to {}x{}", size.width, size.height);
                    self.viewport = Some(size);
                }
            }
        }
    }

    /// Cancels outstanding frame and timer requests and drops all gesture
    /// state. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.frame_requested {
            self.platform.cancel_frame();
            self.frame_requested = false;
        }
        self.platform.cancel_timer(TimerId::PinchIdle);
        self.platform.cancel_timer(TimerId::Resize);
        self.session = None;
        self.pending = None;
        self.pending_viewport = None;
        self.pinch_state = PinchActivityState::Idle;
        debug!("gesture engine disposed");
    }

    fn emit(&mut self, update: TransformUpdate) {
        let current = self.latest_transform();
        let next = current.apply(&update);
        if next == current {
            return;
        }
        if next.scale != current.scale {
            self.refresh_pinch_timer();
        }
        self.pending.get_or_insert_with(TransformUpdate::default).merge(update);
        if !self.frame_requested {
            self.frame_requested = true;
            self.platform.request_frame();
        }
    }

    fn refresh_pinch_timer(&mut self) {
        self.platform
            .set_timer(TimerId::PinchIdle, self.config.pinch_idle_timeout());
        if self.pinch_state == PinchActivityState::Idle {
            self.pinch_state = PinchActivityState::Active;
            debug!("pinch started");
            if let Some(callback) = self.callbacks.on_pinch_start.as_mut() {
                callback();
            }
        }
    }

    fn pinch_stopped(&mut self) {
        if self.pinch_state == PinchActivityState::Idle {
            return;
        }
        if !self.config.manipulation_enabled {
            debug!("pinch timeout ignored, manipulation disabled");
            return;
        }
        self.pinch_state = PinchActivityState::Idle;
        let transform = self.latest_transform();
        debug!("pinch stopped at scale {:.3}", transform.scale);
        if let Some(callback) = self.callbacks.on_pinch_stop.as_mut() {
            callback(transform);
        }
    }

    fn notify_render(&mut self) {
        if let Some(callback) = self.callbacks.on_render.as_mut() {
            callback(&self.transform.to_render());
        }
    }
}

impl<P: Platform> Drop for GestureEngine<P> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<P: Platform + std::fmt::Debug> std::fmt::Debug for GestureEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEngine")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("transform", &self.transform)
            .field("pending", &self.pending)
            .field("viewport", &self.viewport)
            .field("session", &self.session)
            .field("pinch_state", &self.pinch_state)
            .field("callbacks", &self.callbacks)
            .field("disposed", &self.disposed)
            .finish()
    }
}
