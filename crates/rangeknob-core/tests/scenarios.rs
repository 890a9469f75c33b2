//! End-to-end drag scenarios on a 300px track with 28px knobs over [0, 100].

use rangeknob_core::{
    KnobDragEffect, KnobId, PointerEvent, Polarity, RangeSlider, RecordedValues,
    RecordingRenderer, Rgba, SliderConfig,
};

const EPS: f64 = 1e-9;

fn config() -> SliderConfig {
    SliderConfig::default()
        .with_domain(0.0, 100.0)
        .with_selection(25.0, 75.0)
        .with_track(300.0, 28.0)
        .with_steps(Some(1.0))
        .with_minimum_range(10.0)
        .with_negative_range(false)
}

fn slider(config: SliderConfig) -> RangeSlider<RecordingRenderer, RecordedValues> {
    RangeSlider::new(config, RecordingRenderer::default(), RecordedValues::default())
        .expect("valid config")
}

/// Pixel delta that moves a knob from value `from` to value `to`.
fn delta_for(slider: &RangeSlider<RecordingRenderer, RecordedValues>, from: f64, to: f64) -> f64 {
    let space = slider.engine().space();
    space.value_to_pixel(to) - space.value_to_pixel(from)
}

fn down(knob: KnobId) -> PointerEvent {
    PointerEvent::PointerDown {
        knob,
        position: 0.0,
    }
}

#[test]
fn left_knob_cannot_come_within_minimum_range() {
    let mut slider = slider(config());
    let knob = KnobId::Left;

    slider.handle(&down(knob));
    // Walk toward the right knob one unit at a time, up to 70.
    let step = delta_for(&slider, 0.0, 1.0);
    let mut rejected = 0;
    for _ in 0..45 {
        let t = slider.handle(&PointerEvent::PointerMove { knob, delta: step });
        if matches!(t.effect, KnobDragEffect::MoveRejected { .. }) {
            rejected += 1;
        }
    }
    assert!(rejected > 0, "approaching within 5 units must be refused");
    let live = slider.engine().value(knob);
    assert!(live <= 65.0 + 1e-6, "left knob at {live}");

    slider.handle(&PointerEvent::PointerUp { knob });
    let (min, max) = slider.observer().last().expect("commit notified");
    assert!(min <= 65.0 + 1e-6);
    assert!((max - 75.0).abs() < EPS);
    assert!(max - min >= 10.0 - 1e-6);
}

#[test]
fn single_jump_into_floor_leaves_knob_in_place() {
    let mut slider = slider(config());
    let knob = KnobId::Left;
    slider.handle(&down(knob));
    let delta = delta_for(&slider, 25.0, 70.0);
    let t = slider.handle(&PointerEvent::PointerMove { knob, delta });
    assert!(matches!(t.effect, KnobDragEffect::MoveRejected { .. }));
    assert!((slider.engine().value(knob) - 25.0).abs() < EPS);
    assert_eq!(slider.observer().values().len(), 0);
}

#[test]
fn right_knob_release_snaps_to_nearest_step() {
    let mut slider = slider(config());
    let knob = KnobId::Right;
    slider.handle(&down(knob));
    let delta = delta_for(&slider, 75.0, 82.3);
    slider.handle(&PointerEvent::PointerMove { knob, delta });
    assert!((slider.engine().value(knob) - 82.3).abs() < 1e-6);

    slider.handle(&PointerEvent::PointerUp { knob });
    // Committed values are exact, including the untouched left knob.
    assert_eq!(slider.observer().values(), &[(25.0, 82.0)]);
}

#[test]
fn knob_pinned_at_track_end_reports_domain_maximum() {
    let mut slider = slider(config());
    let knob = KnobId::Right;
    slider.handle(&down(knob));
    slider.handle(&PointerEvent::PointerMove {
        knob,
        delta: 10_000.0,
    });
    slider.handle(&PointerEvent::PointerUp { knob });
    assert_eq!(slider.observer().last(), Some((25.0, 100.0)));
}

#[test]
fn crossing_with_negative_range_reports_inverted_pair() {
    let mut slider = slider(config().with_negative_range(true));
    let knob = KnobId::Right;
    slider.handle(&down(knob));
    let delta = delta_for(&slider, 75.0, 10.0);
    slider.handle(&PointerEvent::PointerMove { knob, delta });

    let (_, polarity, color) = slider.renderer().last_range().expect("range frame");
    assert_eq!(polarity, Polarity::Negative);
    assert_eq!(color, Rgba::RED);

    slider.handle(&PointerEvent::PointerUp { knob });
    let (min, max) = slider.observer().last().expect("commit notified");
    assert!(min > max);
    assert!((min - 25.0).abs() < EPS);
    assert!((max - 10.0).abs() < 1e-6);
}

#[test]
fn uncrossing_restores_positive_color() {
    let mut slider = slider(config().with_negative_range(true));
    let knob = KnobId::Left;
    slider.handle(&down(knob));
    let there = delta_for(&slider, 25.0, 90.0);
    slider.handle(&PointerEvent::PointerMove { knob, delta: there });
    assert_eq!(
        slider.renderer().last_range().map(|(_, p, _)| p),
        Some(Polarity::Negative)
    );
    slider.handle(&PointerEvent::PointerMove {
        knob,
        delta: -there,
    });
    let (_, polarity, color) = slider.renderer().last_range().expect("range frame");
    assert_eq!(polarity, Polarity::Positive);
    assert_eq!(color, Rgba::BLUE);
}

#[test]
fn dragging_past_the_track_end_clamps() {
    let mut slider = slider(config());
    let knob = KnobId::Right;
    slider.handle(&down(knob));
    slider.handle(&PointerEvent::PointerMove {
        knob,
        delta: 10_000.0,
    });
    let space = *slider.engine().space();
    assert_eq!(slider.engine().knob_x(knob), space.max_center());

    // Coming back moves immediately: the overshoot is not remembered.
    slider.handle(&PointerEvent::PointerMove { knob, delta: -5.0 });
    assert!((slider.engine().knob_x(knob) - (space.max_center() - 5.0)).abs() < EPS);

    slider.handle(&PointerEvent::PointerCancel { knob });
    let frame = slider.renderer().last_knob_frame(knob).expect("knob frame");
    assert!(frame.right() <= 300.0 + EPS);
}

#[test]
fn two_finger_drag_commits_each_knob_once() {
    let mut slider = slider(config());
    slider.handle(&down(KnobId::Left));
    slider.handle(&down(KnobId::Right));
    let widen = delta_for(&slider, 0.0, 5.0);
    slider.handle(&PointerEvent::PointerMove {
        knob: KnobId::Left,
        delta: -widen,
    });
    slider.handle(&PointerEvent::PointerMove {
        knob: KnobId::Right,
        delta: widen,
    });
    assert!(slider.observer().values().is_empty());

    slider.handle(&PointerEvent::PointerUp {
        knob: KnobId::Left,
    });
    slider.handle(&PointerEvent::PointerUp {
        knob: KnobId::Right,
    });
    let values = slider.observer().values();
    assert_eq!(values.len(), 2);
    let (min, max) = values[1];
    assert!((min - 20.0).abs() < 1e-6);
    assert!((max - 80.0).abs() < 1e-6);
}
