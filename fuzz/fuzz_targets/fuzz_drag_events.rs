#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rangeknob_core::{
    KnobDragEffect, KnobId, PointerEvent, RangeSliderEngine, SliderConfig, SliderEffect,
};

#[derive(Debug, Arbitrary)]
enum Op {
    Down { right: bool, position: i16 },
    Move { right: bool, delta: i16, fraction: u8 },
    Up { right: bool },
    Cancel { right: bool },
    /// Raw bits, so NaN and infinities get through.
    RawMove { right: bool, bits: u64 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    negative_range: bool,
    steps_enabled: bool,
    /// Minimum range in steps, 0..=20.
    minimum_range: u8,
    ops: Vec<Op>,
}

fn knob(right: bool) -> KnobId {
    if right { KnobId::Right } else { KnobId::Left }
}

fn to_event(op: &Op) -> PointerEvent {
    match *op {
        Op::Down { right, position } => PointerEvent::PointerDown {
            knob: knob(right),
            position: f64::from(position),
        },
        Op::Move {
            right,
            delta,
            fraction,
        } => PointerEvent::PointerMove {
            knob: knob(right),
            delta: f64::from(delta) / 8.0 + f64::from(fraction) / 256.0,
        },
        Op::Up { right } => PointerEvent::PointerUp { knob: knob(right) },
        Op::Cancel { right } => PointerEvent::PointerCancel { knob: knob(right) },
        Op::RawMove { right, bits } => PointerEvent::PointerMove {
            knob: knob(right),
            delta: f64::from_bits(bits),
        },
    }
}

fuzz_target!(|input: Input| {
    let mut config = SliderConfig::default()
        .with_domain(0.0, 100.0)
        .with_selection(25.0, 75.0)
        .with_minimum_range(f64::from(input.minimum_range % 21))
        .with_negative_range(input.negative_range);
    config.is_steps_enabled = input.steps_enabled;

    let Ok(mut engine) = RangeSliderEngine::new(config.clone()) else {
        return;
    };
    let space = *engine.space();
    let tolerance = 1e-9 * space.max_center();
    let mut commits = 0usize;
    let mut notifications = 0usize;

    for op in input.ops.iter().take(512) {
        let step = engine.handle(&to_event(op));
        if matches!(step.transition.effect, KnobDragEffect::Committed { .. }) {
            commits += 1;
        }
        notifications += step
            .effects
            .iter()
            .filter(|e| matches!(e, SliderEffect::ValuesChanged { .. }))
            .count();

        let (left_x, right_x) = (engine.knob_x(KnobId::Left), engine.knob_x(KnobId::Right));
        for x in [left_x, right_x] {
            assert!(x.is_finite(), "knob position went non-finite");
            assert!(
                x >= space.min_center() - tolerance && x <= space.max_center() + tolerance,
                "knob at {x} left the track"
            );
        }
        if !config.is_negative_range_enabled {
            let distance = right_x - left_x;
            let floor = engine.constraints().separation_floor();
            assert!(
                distance >= floor - tolerance,
                "separation {distance} below floor {floor}"
            );
        }
    }

    assert_eq!(commits, notifications, "one notification per commit");
});
