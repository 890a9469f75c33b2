#![forbid(unsafe_code)]

//! Replay a trace through the engine and record every step.

use std::fmt::Write as _;

use rangeknob_core::{
    KnobDragEffect, KnobDragState, PointerEvent, RangeSliderEngine, SliderEffect, SliderStep,
};
use serde::Serialize;

use crate::error::Result;
use crate::trace::Trace;

const DIGEST_PREFIX: &str = "blake3:";

/// Everything observable from one replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub name: Option<String>,
    /// Frames emitted when the slider was built.
    pub layout: Vec<SliderEffect>,
    pub steps: Vec<ReplayedStep>,
    pub final_values: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayedStep {
    pub index: usize,
    pub event: PointerEvent,
    #[serde(flatten)]
    pub step: SliderStep,
}

/// Feed every event of `trace` to a fresh engine.
pub fn replay(trace: &Trace) -> Result<ReplayReport> {
    let mut engine = RangeSliderEngine::new(trace.config.clone())?;
    let layout = engine.layout();
    let span = tracing::info_span!("replay", trace = trace.label(), events = trace.events.len());
    let _guard = span.enter();

    let steps = trace
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| ReplayedStep {
            index,
            event: *event,
            step: engine.handle(event),
        })
        .collect::<Vec<_>>();

    let final_values = engine.values();
    tracing::info!(
        steps = steps.len(),
        min_value = final_values.0,
        max_value = final_values.1,
        "replay finished"
    );
    Ok(ReplayReport {
        name: trace.name.clone(),
        layout,
        steps,
        final_values,
    })
}

impl ReplayReport {
    /// Value notifications in emission order.
    #[must_use]
    pub fn notifications(&self) -> Vec<(f64, f64)> {
        self.steps
            .iter()
            .flat_map(|s| s.step.effects.iter())
            .filter_map(|effect| match *effect {
                SliderEffect::ValuesChanged {
                    min_value,
                    max_value,
                } => Some((min_value, max_value)),
                _ => None,
            })
            .collect()
    }

    /// Digest of the canonical JSON effect stream.
    ///
    /// Two replays that emit the same layout, transitions and effects have
    /// the same digest.
    pub fn digest(&self) -> Result<String> {
        let steps = self.steps.iter().map(|s| &s.step).collect::<Vec<_>>();
        let canonical = serde_json::to_vec(&(&self.layout, steps))?;
        Ok(format!(
            "{DIGEST_PREFIX}{}",
            blake3::hash(&canonical).to_hex()
        ))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One line per event plus an indented line per effect.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let name = self.name.as_deref().unwrap_or("unnamed");
        let _ = writeln!(out, "trace {name}: {} event(s)", self.steps.len());
        for replayed in &self.steps {
            let t = &replayed.step.transition;
            let _ = writeln!(
                out,
                "#{:<4} {:<5} {} -> {}  {}",
                replayed.index,
                t.knob,
                state_label(&t.from),
                state_label(&t.to),
                describe_effect(&t.effect),
            );
            for effect in &replayed.step.effects {
                let _ = writeln!(out, "        {}", describe_slider_effect(effect));
            }
        }
        let (min, max) = self.final_values;
        let _ = writeln!(out, "final values: {min:.4} .. {max:.4}");
        out
    }
}

fn state_label(state: &KnobDragState) -> &'static str {
    match state {
        KnobDragState::Idle => "idle",
        KnobDragState::Dragging { .. } => "dragging",
    }
}

fn describe_effect(effect: &KnobDragEffect) -> String {
    match *effect {
        KnobDragEffect::DragStarted { x, .. } => format!("drag started at {x:.3}"),
        KnobDragEffect::Moved { from, to, clamped } => {
            let suffix = if clamped { " (clamped)" } else { "" };
            format!("moved {from:.3} -> {to:.3}{suffix}")
        }
        KnobDragEffect::MoveRejected {
            requested,
            distance,
            floor,
        } => format!("rejected {requested:.3}: distance {distance:.3} < floor {floor:.3}"),
        KnobDragEffect::Committed {
            raw_x, x, reason, ..
        } => format!("committed {raw_x:.3} -> {x:.3} ({reason:?})"),
        KnobDragEffect::Noop { reason } => format!("noop ({reason:?})"),
    }
}

fn describe_slider_effect(effect: &SliderEffect) -> String {
    match *effect {
        SliderEffect::KnobFrame { knob, frame, .. } => format!(
            "knob {knob} frame x={:.3} y={:.3} {}x{}",
            frame.x, frame.y, frame.width, frame.height
        ),
        SliderEffect::RangeFrame {
            frame,
            polarity,
            color,
        } => format!(
            "range x={:.3} width={:.3} {polarity:?} {color}",
            frame.x, frame.width
        ),
        SliderEffect::ValuesChanged {
            min_value,
            max_value,
        } => format!("values changed {min_value:.4} .. {max_value:.4}"),
    }
}
