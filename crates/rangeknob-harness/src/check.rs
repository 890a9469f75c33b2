#![forbid(unsafe_code)]

//! Invariant checks over a replayed trace.
//!
//! Every step is checked against:
//!
//! 1. Both knob centres stay inside `[knob/2, track − knob/2]`.
//! 2. Without negative range the knobs never cross, and every reported
//!    selection keeps the minimum separation.
//! 3. A commit produces exactly one value notification; nothing else does.
//! 4. Range frames carry the polarity of the current knob order.
//!
//! Then the notifications are compared with the trace's `expect` block, if
//! it has one.

use std::fmt::{self, Write as _};

use rangeknob_core::{
    KnobDragEffect, KnobId, Polarity, RangeSliderEngine, SliderEffect, ValueSpace,
};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::trace::Trace;

/// Pixel tolerance relative to the track length.
const POSITION_TOLERANCE: f64 = 1e-9;
/// Value tolerance relative to the domain span.
const SEPARATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Event index, or `None` for expectation mismatches.
    pub step: Option<usize>,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Some(step) => write!(f, "#{step}: {}", self.message),
            None => write!(f, "expect: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub name: Option<String>,
    pub events: usize,
    pub notifications: Vec<(f64, f64)>,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let name = self.name.as_deref().unwrap_or("unnamed");
        let status = if self.passed() { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "{status} {name}: {} event(s), {} notification(s)",
            self.events,
            self.notifications.len()
        );
        for violation in &self.violations {
            let _ = writeln!(out, "  {violation}");
        }
        out
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct Checker<'a> {
    space: ValueSpace,
    negative_range: bool,
    minimum_separation: f64,
    violations: &'a mut Vec<Violation>,
}

impl Checker<'_> {
    fn fail(&mut self, step: usize, message: String) {
        tracing::warn!(step, %message, "invariant violated");
        self.violations.push(Violation {
            step: Some(step),
            message,
        });
    }

    fn positions(&mut self, step: usize, engine: &RangeSliderEngine) {
        let tolerance = POSITION_TOLERANCE * self.space.max_center();
        let (lo, hi) = (self.space.min_center(), self.space.max_center());
        for knob in KnobId::ALL {
            let x = engine.knob_x(knob);
            if x < lo - tolerance || x > hi + tolerance {
                self.fail(step, format!("{knob} knob at {x} outside [{lo}, {hi}]"));
            }
        }
        let (left_x, right_x) = (engine.knob_x(KnobId::Left), engine.knob_x(KnobId::Right));
        if !self.negative_range && left_x > right_x + tolerance {
            self.fail(step, format!("knobs crossed: left {left_x} > right {right_x}"));
        }
    }

    fn effects(
        &mut self,
        step: usize,
        engine: &RangeSliderEngine,
        committed: bool,
        effects: &[SliderEffect],
    ) {
        let span = self.space.maximum_value() - self.space.minimum_value();
        let polarity = Polarity::of(engine.knob_x(KnobId::Left), engine.knob_x(KnobId::Right));
        let mut notified = 0usize;
        for effect in effects {
            match *effect {
                SliderEffect::ValuesChanged {
                    min_value,
                    max_value,
                } => {
                    notified += 1;
                    let required = self.minimum_separation;
                    let floor = required - SEPARATION_TOLERANCE * span;
                    if !self.negative_range && max_value - min_value < floor {
                        self.fail(
                            step,
                            format!("selection {min_value}..{max_value} narrower than {required}"),
                        );
                    }
                }
                SliderEffect::RangeFrame {
                    polarity: reported,
                    ..
                } if reported != polarity => {
                    self.fail(
                        step,
                        format!("range frame polarity {reported:?}, knob order says {polarity:?}"),
                    );
                }
                _ => {}
            }
        }
        let expected = usize::from(committed);
        if notified != expected {
            self.fail(
                step,
                format!("{notified} notification(s) where {expected} expected"),
            );
        }
    }
}

/// Replay `trace` and collect every invariant violation.
pub fn check(trace: &Trace) -> Result<CheckReport> {
    if let Some(tolerance) = trace.expect.as_ref().map(|expect| expect.tolerance) {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(HarnessError::invalid(format!(
                "expectation tolerance must be finite and non-negative, got {tolerance}"
            )));
        }
    }
    let mut engine = RangeSliderEngine::new(trace.config.clone())?;
    let mut violations = Vec::new();
    let mut notifications = Vec::new();
    let mut checker = Checker {
        space: *engine.space(),
        negative_range: trace.config.is_negative_range_enabled,
        minimum_separation: trace.config.minimum_separation(),
        violations: &mut violations,
    };

    for (index, event) in trace.events.iter().enumerate() {
        let step = engine.handle(event);
        let committed = matches!(step.transition.effect, KnobDragEffect::Committed { .. });
        checker.positions(index, &engine);
        checker.effects(index, &engine, committed, &step.effects);
        notifications.extend(step.effects.iter().filter_map(|effect| match *effect {
            SliderEffect::ValuesChanged {
                min_value,
                max_value,
            } => Some((min_value, max_value)),
            _ => None,
        }));
    }

    if let Some(expect) = &trace.expect {
        compare_notifications(
            &expect.notifications,
            &notifications,
            expect.tolerance,
            &mut violations,
        );
    }

    Ok(CheckReport {
        name: trace.name.clone(),
        events: trace.events.len(),
        notifications,
        violations,
    })
}

fn compare_notifications(
    expected: &[(f64, f64)],
    actual: &[(f64, f64)],
    tolerance: f64,
    violations: &mut Vec<Violation>,
) {
    if expected.len() != actual.len() {
        violations.push(Violation {
            step: None,
            message: format!(
                "{} notification(s) expected, {} produced",
                expected.len(),
                actual.len()
            ),
        });
    }
    for (i, (want, got)) in expected.iter().zip(actual).enumerate() {
        let close = (want.0 - got.0).abs() <= tolerance && (want.1 - got.1).abs() <= tolerance;
        if !close {
            violations.push(Violation {
                step: None,
                message: format!(
                    "notification {i}: expected ({}, {}), got ({}, {})",
                    want.0, want.1, got.0, got.1
                ),
            });
        }
    }
}
