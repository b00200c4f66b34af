//! Scripted gesture replay
//!
//! A [`Script`] describes a viewport, an engine configuration and a list of
//! raw input steps. [`run`] feeds it through a [`GestureEngine`] on a
//! [`VirtualPlatform`] and reports every commit and pinch notification,
//! tagged with the index of the step during which it happened.

use crate::{
    core::{builder::EngineBuilder, config::EngineConfig, geo::ViewportSize, transform::RenderTransform},
    input::events::{GesturePhase, PointerEvent},
    runtime::VirtualPlatform,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub touch_capable: bool,
    #[serde(default)]
    pub config: EngineConfig,
    pub viewport: ViewportSize,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Start { event: PointerEvent },
    Move { event: PointerEvent },
    End,
    Resize { width: f64, height: f64 },
    Wait { ms: u64 },
    SetInitialScale { scale: f64 },
    SetManipulationEnabled { enabled: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Commit { step: usize, transform: RenderTransform },
    PinchStart { step: usize },
    PinchStop { step: usize, transform: RenderTransform },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub events: Vec<ReplayEvent>,
    /// Steps whose event asked the host to suppress the platform default
    pub prevented_default: Vec<usize>,
    pub final_transform: RenderTransform,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(json)?;
        script.config.validate()?;
        if !script.viewport.is_valid() {
            return Err(Error::Replay(format!(
                "viewport {}x{} is not usable",
                script.viewport.width, script.viewport.height
            )));
        }
        Ok(script)
    }
}

impl ReplayReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn pinch_starts(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ReplayEvent::PinchStart { .. }))
            .count()
    }

    pub fn pinch_stops(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ReplayEvent::PinchStop { .. }))
            .count()
    }
}

/// Replays `script` and lets pending frames and timers settle afterwards
pub fn run(script: &Script) -> Result<ReplayReport> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let step = Rc::new(Cell::new(0usize));

    let mut engine = {
        let (commits, commit_step) = (events.clone(), step.clone());
        let (starts, start_step) = (events.clone(), step.clone());
        let (stops, stop_step) = (events.clone(), step.clone());
        EngineBuilder::new()
            .with_config(script.config.clone())
            .viewport(script.viewport.width, script.viewport.height)
            .on_render(move |transform| {
                commits.borrow_mut().push(ReplayEvent::Commit {
                    step: commit_step.get(),
                    transform: transform.clone(),
                })
            })
            .on_pinch_start(move || {
                starts.borrow_mut().push(ReplayEvent::PinchStart {
                    step: start_step.get(),
                })
            })
            .on_pinch_stop(move |transform| {
                stops.borrow_mut().push(ReplayEvent::PinchStop {
                    step: stop_step.get(),
                    transform: transform.to_render(),
                })
            })
            .build(VirtualPlatform::new(script.touch_capable))?
    };

    let mut prevented_default = Vec::new();
    for (index, current) in script.steps.iter().enumerate() {
        step.set(index);
        let handled = match current {
            Step::Start { event } => Some(engine.handle_event(GesturePhase::Start, event)),
            Step::Move { event } => Some(engine.handle_event(GesturePhase::Move, event)),
            Step::End => Some(engine.handle_event(GesturePhase::End, &PointerEvent::default())),
            Step::Resize { width, height } => {
                engine.on_resize(ViewportSize::new(*width, *height));
                None
            }
            Step::Wait { ms } => {
                engine.advance_ms(*ms);
                None
            }
            Step::SetInitialScale { scale } => {
                engine.set_initial_scale(*scale)?;
                None
            }
            Step::SetManipulationEnabled { enabled } => {
                engine.set_manipulation_enabled(*enabled);
                None
            }
        };
        if handled.is_some_and(|handled| handled.should_prevent_default()) {
            prevented_default.push(index);
        }
    }

    step.set(script.steps.len());
    let config = engine.config();
    let settle = config.pinch_idle_timeout().max(config.resize_debounce());
    engine.advance(settle);
    log::debug!("replayed {} steps", script.steps.len());

    let final_transform = engine.render_transform();
    engine.dispose();
    drop(engine);
    let events = events.take();
    Ok(ReplayReport {
        events,
        prevented_default,
        final_transform,
    })
}
