#![forbid(unsafe_code)]

//! Built-in reference traces.
//!
//! All scenarios use a 300px track with 28px knobs over `[0, 100]`, one-unit
//! steps and a ten-step minimum range. That puts 2.72px between adjacent
//! values and the left/right knob centres at 82 and 218.

use rangeknob_core::{KnobId, PointerEvent, SliderConfig};

use crate::error::{HarnessError, Result};
use crate::trace::{Expectation, Trace};

const PX_PER_UNIT: f64 = 2.72;

/// Names accepted by [`builtin`], in listing order.
pub const NAMES: &[&str] = &[
    "min-range-floor",
    "snap-on-release",
    "negative-crossing",
    "two-finger",
];

fn base_config() -> SliderConfig {
    SliderConfig::default()
        .with_domain(0.0, 100.0)
        .with_selection(25.0, 75.0)
        .with_track(300.0, 28.0)
        .with_steps(Some(1.0))
        .with_minimum_range(10.0)
}

fn down(knob: KnobId, position: f64) -> PointerEvent {
    PointerEvent::PointerDown { knob, position }
}

fn mv(knob: KnobId, units: f64) -> PointerEvent {
    PointerEvent::PointerMove {
        knob,
        delta: units * PX_PER_UNIT,
    }
}

fn up(knob: KnobId) -> PointerEvent {
    PointerEvent::PointerUp { knob }
}

fn trace(
    name: &str,
    config: SliderConfig,
    events: Vec<PointerEvent>,
    expect: &[(f64, f64)],
) -> Trace {
    Trace {
        name: Some(name.to_string()),
        config,
        events,
        expect: Some(Expectation::new(expect.to_vec())),
    }
}

/// Look up a built-in scenario by name.
#[must_use]
pub fn builtin(name: &str) -> Option<Trace> {
    let left = KnobId::Left;
    let right = KnobId::Right;
    let scenario = match name {
        // 25 -> 60 is legal; the next jump would come within 10 units of the
        // right knob and is refused. Backing off consumes the pending
        // translation first, so the knob lands at 58.
        "min-range-floor" => trace(
            name,
            base_config(),
            vec![
                down(left, 82.0),
                mv(left, 35.0),
                PointerEvent::PointerMove {
                    knob: left,
                    delta: 30.0,
                },
                PointerEvent::PointerMove {
                    knob: left,
                    delta: -35.2,
                },
                up(left),
            ],
            &[(58.0, 75.0)],
        ),
        "snap-on-release" => trace(
            name,
            base_config(),
            vec![down(right, 218.0), mv(right, 7.3), up(right)],
            &[(25.0, 82.0)],
        ),
        "negative-crossing" => trace(
            name,
            base_config().with_negative_range(true),
            vec![down(right, 218.0), mv(right, -65.0), up(right)],
            &[(25.0, 10.0)],
        ),
        // Both knobs held at once; the right one is torn down by the host.
        // Each commit reports the other knob's live position.
        "two-finger" => trace(
            name,
            base_config(),
            vec![
                down(left, 82.0),
                down(right, 218.0),
                mv(left, -5.0),
                mv(right, 5.0),
                up(left),
                PointerEvent::PointerCancel { knob: right },
            ],
            &[(20.0, 80.0), (20.0, 80.0)],
        ),
        _ => return None,
    };
    Some(scenario)
}

/// Like [`builtin`], but an unknown name is an error.
pub fn require(name: &str) -> Result<Trace> {
    builtin(name).ok_or_else(|| HarnessError::UnknownScenario {
        name: name.to_string(),
    })
}

/// Every built-in scenario, in [`NAMES`] order.
#[must_use]
pub fn all() -> Vec<Trace> {
    NAMES.iter().filter_map(|name| builtin(name)).collect()
}
