#![forbid(unsafe_code)]

//! The dual-knob range slider.
//!
//! [`RangeSliderEngine`] owns all interaction state and turns each
//! [`PointerEvent`] into a [`SliderStep`]: the drag transition plus the list
//! of outbound [`SliderEffect`]s. It never calls out to anything, which keeps
//! it testable without a UI toolkit.
//!
//! [`RangeSlider`] wraps an engine together with the host's collaborators
//! and pushes every effect to them as it is produced.
//!
//! # Effects per event
//!
//! | transition          | effects                                          |
//! |---------------------|--------------------------------------------------|
//! | accepted move       | knob frame, range frame                          |
//! | commit (up/cancel)  | knob frame, range frame, values changed          |
//! | anything else       | none                                             |

use std::time::Duration;

use crate::color::Rgba;
use crate::config::{SEPARATION_EPSILON, SliderConfig};
use crate::constraint::ConstraintEngine;
use crate::drag::{DragPolicy, KnobDragEffect, KnobDragMachine, KnobDragTransition};
use crate::error::{Result, SelectionError};
use crate::event::{KnobId, PointerEvent};
use crate::geometry::Frame;
use crate::selection::{Polarity, SelectedRange};
use crate::value_space::ValueSpace;
use crate::{debug, debug_span};

/// Outbound side effect produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "effect", rename_all = "snake_case")
)]
pub enum SliderEffect {
    /// Reposition a knob. `settle` is the smoothing hint for the renderer.
    KnobFrame {
        knob: KnobId,
        frame: Frame,
        settle: Duration,
    },
    /// Reposition and recolor the selected-range bar.
    RangeFrame {
        frame: Frame,
        polarity: Polarity,
        color: Rgba,
    },
    /// A drag committed. Values are reported by knob identity, so a crossed
    /// selection has `min_value > max_value`.
    ValuesChanged { min_value: f64, max_value: f64 },
}

/// Result of handling one pointer event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderStep {
    pub transition: KnobDragTransition,
    pub effects: Vec<SliderEffect>,
}

/// Receives frames to draw.
pub trait SliderRenderer {
    fn set_knob_frame(&mut self, knob: KnobId, frame: Frame, settle: Duration);

    fn set_selected_range_frame(&mut self, frame: Frame, polarity: Polarity, color: Rgba);
}

/// Receives committed selections.
pub trait ValuesObserver {
    fn on_values_changed(&mut self, min_value: f64, max_value: f64);
}

impl<F: FnMut(f64, f64)> ValuesObserver for F {
    fn on_values_changed(&mut self, min_value: f64, max_value: f64) {
        self(min_value, max_value);
    }
}

/// Push `effects` to the collaborators in order.
pub fn dispatch<R, O>(effects: &[SliderEffect], renderer: &mut R, observer: &mut O)
where
    R: SliderRenderer + ?Sized,
    O: ValuesObserver + ?Sized,
{
    for effect in effects {
        match *effect {
            SliderEffect::KnobFrame {
                knob,
                frame,
                settle,
            } => renderer.set_knob_frame(knob, frame, settle),
            SliderEffect::RangeFrame {
                frame,
                polarity,
                color,
            } => renderer.set_selected_range_frame(frame, polarity, color),
            SliderEffect::ValuesChanged {
                min_value,
                max_value,
            } => observer.on_values_changed(min_value, max_value),
        }
    }
}

/// Interaction state of one range slider.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSliderEngine {
    config: SliderConfig,
    policy: DragPolicy,
    /// Knob centres, indexed by [`KnobId`].
    positions: [f64; 2],
    machines: [KnobDragMachine; 2],
}

impl RangeSliderEngine {
    /// Validate `config` and place both knobs at their initial values.
    pub fn new(config: SliderConfig) -> Result<Self> {
        let space = ValueSpace::new(&config)?;
        let policy = DragPolicy {
            space,
            constraints: ConstraintEngine::new(space, &config),
            steps_enabled: config.is_steps_enabled,
        };
        let positions = [
            space.value_to_pixel(config.minimum_value_selected),
            space.value_to_pixel(config.maximum_value_selected),
        ];
        debug!(
            left_x = positions[0],
            right_x = positions[1],
            step_size_in_point = space.step_size_in_point(),
            "range slider laid out"
        );
        Ok(Self {
            config,
            policy,
            positions,
            machines: [
                KnobDragMachine::new(KnobId::Left),
                KnobDragMachine::new(KnobId::Right),
            ],
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn space(&self) -> &ValueSpace {
        &self.policy.space
    }

    #[inline]
    #[must_use]
    pub fn constraints(&self) -> &ConstraintEngine {
        &self.policy.constraints
    }

    /// Current centre of `knob`.
    #[inline]
    #[must_use]
    pub fn knob_x(&self, knob: KnobId) -> f64 {
        self.positions[knob.index()]
    }

    /// Current value of `knob`. Exact on step boundaries when stepping is
    /// enabled.
    #[inline]
    #[must_use]
    pub fn value(&self, knob: KnobId) -> f64 {
        self.policy.value_at(self.knob_x(knob))
    }

    /// `(left, right)` values, by knob identity.
    #[must_use]
    pub fn values(&self) -> (f64, f64) {
        (self.value(KnobId::Left), self.value(KnobId::Right))
    }

    #[must_use]
    pub fn selected_range(&self) -> SelectedRange {
        SelectedRange::between(self.knob_x(KnobId::Left), self.knob_x(KnobId::Right))
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self, knob: KnobId) -> bool {
        self.machines[knob.index()].is_dragging()
    }

    #[must_use]
    pub fn knob_frame(&self, knob: KnobId) -> Frame {
        Frame::centered_square(
            self.knob_x(knob),
            self.config.control_height() / 2.0,
            self.config.knob_size,
        )
    }

    /// Knob under `(x, y)`. The right knob is drawn on top and wins overlaps.
    #[must_use]
    pub fn knob_at(&self, x: f64, y: f64) -> Option<KnobId> {
        [KnobId::Right, KnobId::Left]
            .into_iter()
            .find(|&knob| self.knob_frame(knob).contains(x, y))
    }

    /// Frames for the whole control: both knobs and the range bar.
    #[must_use]
    pub fn layout(&self) -> Vec<SliderEffect> {
        vec![
            self.knob_frame_effect(KnobId::Left),
            self.knob_frame_effect(KnobId::Right),
            self.range_frame_effect(),
        ]
    }

    /// Apply one pointer event.
    pub fn handle(&mut self, event: &PointerEvent) -> SliderStep {
        let knob = event.knob();
        let _span = debug_span!("pointer_event", knob = %knob).entered();

        let index = knob.index();
        let current_x = self.positions[index];
        let other_x = self.positions[knob.other().index()];
        let transition = self.machines[index].apply(event, &self.policy, current_x, other_x);
        SliderStep {
            effects: self.apply_transition(&transition),
            transition,
        }
    }

    /// Commit every active drag at its last legal position.
    ///
    /// For hosts tearing the control down mid-gesture. Commits notify like a
    /// normal release.
    pub fn cancel_all(&mut self) -> Vec<SliderStep> {
        let mut steps = Vec::new();
        for knob in KnobId::ALL {
            let index = knob.index();
            let current_x = self.positions[index];
            let other_x = self.positions[knob.other().index()];
            if let Some(transition) =
                self.machines[index].force_cancel(&self.policy, current_x, other_x)
            {
                steps.push(SliderStep {
                    effects: self.apply_transition(&transition),
                    transition,
                });
            }
        }
        steps
    }

    /// Programmatically select `(left, right)`.
    ///
    /// Values are clamped to the domain and snapped to steps when stepping is
    /// enabled. The host is not notified; the returned effects only carry the
    /// new frames.
    pub fn set_values(
        &mut self,
        left: f64,
        right: f64,
    ) -> std::result::Result<Vec<SliderEffect>, SelectionError> {
        for value in [left, right] {
            if !value.is_finite() {
                return Err(SelectionError::NonFinite { value });
            }
        }
        if let Some(knob) = KnobId::ALL.into_iter().find(|&k| self.is_dragging(k)) {
            return Err(SelectionError::DragInProgress { knob });
        }

        let space = self.policy.space;
        let place = |value: f64| self.policy.snap(space.value_to_pixel(value));
        let (left_x, right_x) = (place(left), place(right));

        if !self.config.is_negative_range_enabled {
            let (left, right) = (self.policy.value_at(left_x), self.policy.value_at(right_x));
            if left > right {
                return Err(SelectionError::Inverted { left, right });
            }
            let required = self.config.minimum_separation();
            let separation = right - left;
            let tolerance = (space.maximum_value() - space.minimum_value()) * SEPARATION_EPSILON;
            if separation + tolerance < required {
                return Err(SelectionError::TooNarrow {
                    separation,
                    required,
                });
            }
        }

        self.positions = [left_x, right_x];
        debug!(left_x, right_x, "selection set programmatically");
        Ok(self.layout())
    }

    fn apply_transition(&mut self, transition: &KnobDragTransition) -> Vec<SliderEffect> {
        let Some(x) = transition.effect.target_x() else {
            return Vec::new();
        };
        let knob = transition.knob;
        self.positions[knob.index()] = x;

        let mut effects = Vec::with_capacity(3);
        effects.push(self.knob_frame_effect(knob));
        effects.push(self.range_frame_effect());
        if matches!(transition.effect, KnobDragEffect::Committed { .. }) {
            let (min_value, max_value) = self.values();
            debug!(min_value, max_value, "values changed");
            effects.push(SliderEffect::ValuesChanged {
                min_value,
                max_value,
            });
        }
        effects
    }

    fn knob_frame_effect(&self, knob: KnobId) -> SliderEffect {
        SliderEffect::KnobFrame {
            knob,
            frame: self.knob_frame(knob),
            settle: self.config.settle_duration,
        }
    }

    fn range_frame_effect(&self) -> SliderEffect {
        let range = self.selected_range();
        SliderEffect::RangeFrame {
            frame: range.frame(&self.config),
            polarity: range.polarity,
            color: range.polarity.color(&self.config),
        }
    }
}

/// An engine wired to its renderer and value observer.
///
/// The slider does not own the host: `observer` is typically a closure or a
/// handle that forwards to the host.
#[derive(Debug)]
pub struct RangeSlider<R, O> {
    engine: RangeSliderEngine,
    renderer: R,
    observer: O,
}

impl<R, O> RangeSlider<R, O>
where
    R: SliderRenderer,
    O: ValuesObserver,
{
    /// Build the engine and push the initial layout to `renderer`.
    pub fn new(config: SliderConfig, mut renderer: R, mut observer: O) -> Result<Self> {
        let engine = RangeSliderEngine::new(config)?;
        dispatch(&engine.layout(), &mut renderer, &mut observer);
        Ok(Self {
            engine,
            renderer,
            observer,
        })
    }

    /// Handle one pointer event and push its effects.
    pub fn handle(&mut self, event: &PointerEvent) -> KnobDragTransition {
        let step = self.engine.handle(event);
        dispatch(&step.effects, &mut self.renderer, &mut self.observer);
        step.transition
    }

    /// See [`RangeSliderEngine::set_values`].
    pub fn set_values(&mut self, left: f64, right: f64) -> std::result::Result<(), SelectionError> {
        let effects = self.engine.set_values(left, right)?;
        dispatch(&effects, &mut self.renderer, &mut self.observer);
        Ok(())
    }

    /// See [`RangeSliderEngine::cancel_all`].
    pub fn cancel_all(&mut self) {
        for step in self.engine.cancel_all() {
            dispatch(&step.effects, &mut self.renderer, &mut self.observer);
        }
    }

    #[inline]
    #[must_use]
    pub fn engine(&self) -> &RangeSliderEngine {
        &self.engine
    }

    #[inline]
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_parts(self) -> (RangeSliderEngine, R, O) {
        (self.engine, self.renderer, self.observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordedValues, RecordingRenderer, RenderCall};

    const EPS: f64 = 1e-9;

    /// Domain [0, 100] with 4px per unit: knob centres are 14 + 4v.
    fn exact_config() -> SliderConfig {
        SliderConfig::default()
            .with_domain(0.0, 100.0)
            .with_selection(25.0, 75.0)
            .with_track(428.0, 28.0)
    }

    fn engine() -> RangeSliderEngine {
        RangeSliderEngine::new(exact_config()).expect("valid config")
    }

    fn drag(engine: &mut RangeSliderEngine, knob: KnobId, deltas: &[f64]) -> Vec<SliderStep> {
        let mut steps = vec![engine.handle(&PointerEvent::PointerDown { knob, position: 0.0 })];
        for &delta in deltas {
            steps.push(engine.handle(&PointerEvent::PointerMove { knob, delta }));
        }
        steps.push(engine.handle(&PointerEvent::PointerUp { knob }));
        steps
    }

    #[test]
    fn initial_positions_follow_selected_values() {
        let engine = engine();
        assert_eq!(engine.knob_x(KnobId::Left), 114.0);
        assert_eq!(engine.knob_x(KnobId::Right), 314.0);
        assert_eq!(engine.values(), (25.0, 75.0));
        assert_eq!(engine.selected_range().polarity, Polarity::Positive);
    }

    #[test]
    fn layout_emits_both_knobs_and_range() {
        let engine = engine();
        let layout = engine.layout();
        assert_eq!(layout.len(), 3);
        assert_eq!(
            layout[0],
            SliderEffect::KnobFrame {
                knob: KnobId::Left,
                frame: Frame::new(100.0, 0.0, 28.0, 28.0),
                settle: Duration::from_millis(20),
            }
        );
        assert_eq!(
            layout[2],
            SliderEffect::RangeFrame {
                frame: Frame::new(114.0, 13.0, 200.0, 2.0),
                polarity: Polarity::Positive,
                color: Rgba::BLUE,
            }
        );
    }

    #[test]
    fn live_moves_do_not_notify() {
        let mut engine = engine();
        engine.handle(&PointerEvent::PointerDown {
            knob: KnobId::Right,
            position: 314.0,
        });
        let step = engine.handle(&PointerEvent::PointerMove {
            knob: KnobId::Right,
            delta: 9.0,
        });
        assert_eq!(step.effects.len(), 2);
        assert!(
            !step
                .effects
                .iter()
                .any(|e| matches!(e, SliderEffect::ValuesChanged { .. }))
        );
        // Live drag is not snapped.
        assert_eq!(engine.knob_x(KnobId::Right), 323.0);
    }

    #[test]
    fn commit_notifies_once_with_snapped_values() {
        let mut engine = engine();
        let steps = drag(&mut engine, KnobId::Right, &[9.0]);
        let notifications: Vec<_> = steps
            .iter()
            .flat_map(|s| &s.effects)
            .filter_map(|e| match *e {
                SliderEffect::ValuesChanged {
                    min_value,
                    max_value,
                } => Some((min_value, max_value)),
                _ => None,
            })
            .collect();
        assert_eq!(notifications.len(), 1);
        let (min_value, max_value) = notifications[0];
        assert!((min_value - 25.0).abs() < EPS);
        // 323 is 77.25 units; snaps down to 77.
        assert!((max_value - 77.0).abs() < EPS);
    }

    #[test]
    fn rejected_move_emits_nothing() {
        let mut engine = engine();
        engine.handle(&PointerEvent::PointerDown {
            knob: KnobId::Left,
            position: 114.0,
        });
        let step = engine.handle(&PointerEvent::PointerMove {
            knob: KnobId::Left,
            delta: 170.0,
        });
        assert!(step.effects.is_empty());
        assert_eq!(engine.knob_x(KnobId::Left), 114.0);
    }

    #[test]
    fn crossing_with_negative_range_flips_polarity() {
        let config = exact_config().with_negative_range(true);
        let mut engine = RangeSliderEngine::new(config).expect("valid config");
        let steps = drag(&mut engine, KnobId::Right, &[-240.0]);
        let commit = steps.last().expect("commit step");
        assert!(commit.effects.contains(&SliderEffect::ValuesChanged {
            min_value: 25.0,
            max_value: 15.0,
        }));
        assert!(commit.effects.iter().any(|e| matches!(
            e,
            SliderEffect::RangeFrame {
                polarity: Polarity::Negative,
                color: Rgba::RED,
                ..
            }
        )));
    }

    #[test]
    fn concurrent_drags_read_latest_positions() {
        let mut engine = engine();
        engine.handle(&PointerEvent::PointerDown {
            knob: KnobId::Left,
            position: 114.0,
        });
        engine.handle(&PointerEvent::PointerDown {
            knob: KnobId::Right,
            position: 314.0,
        });
        // Right knob comes in to 214 first.
        engine.handle(&PointerEvent::PointerMove {
            knob: KnobId::Right,
            delta: -100.0,
        });
        // Left knob to 184 would be 30px from 214: below the 40px floor.
        let step = engine.handle(&PointerEvent::PointerMove {
            knob: KnobId::Left,
            delta: 70.0,
        });
        assert!(step.effects.is_empty());
        assert_eq!(engine.knob_x(KnobId::Left), 114.0);
        assert!(engine.is_dragging(KnobId::Left) && engine.is_dragging(KnobId::Right));
    }

    #[test]
    fn knob_hit_testing_prefers_right_knob() {
        let config = exact_config().with_selection(25.0, 30.0).with_minimum_range(0.0);
        let engine = RangeSliderEngine::new(config).expect("valid config");
        // Left centre 114, right centre 134: both frames cover x = 125.
        assert_eq!(engine.knob_at(125.0, 14.0), Some(KnobId::Right));
        assert_eq!(engine.knob_at(101.0, 14.0), Some(KnobId::Left));
        assert_eq!(engine.knob_at(300.0, 14.0), None);
        assert_eq!(engine.knob_at(114.0, 40.0), None);
    }

    #[test]
    fn set_values_snaps_and_reframes_without_notifying() {
        let mut engine = engine();
        let effects = engine.set_values(10.4, 60.6).expect("legal selection");
        assert_eq!(effects.len(), 3);
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, SliderEffect::ValuesChanged { .. }))
        );
        assert_eq!(engine.values(), (10.0, 61.0));
    }

    #[test]
    fn set_values_enforces_ordering_and_separation() {
        let mut engine = engine();
        assert!(matches!(
            engine.set_values(60.0, 40.0),
            Err(SelectionError::Inverted { .. })
        ));
        assert!(matches!(
            engine.set_values(40.0, 45.0),
            Err(SelectionError::TooNarrow { .. })
        ));
        assert!(matches!(
            engine.set_values(f64::NAN, 45.0),
            Err(SelectionError::NonFinite { .. })
        ));
        assert_eq!(engine.values(), (25.0, 75.0));
    }

    #[test]
    fn set_values_refuses_during_drag() {
        let mut engine = engine();
        engine.handle(&PointerEvent::PointerDown {
            knob: KnobId::Right,
            position: 314.0,
        });
        assert_eq!(
            engine.set_values(30.0, 70.0),
            Err(SelectionError::DragInProgress {
                knob: KnobId::Right
            })
        );
    }

    #[test]
    fn cancel_all_commits_active_sessions() {
        let mut engine = engine();
        engine.handle(&PointerEvent::PointerDown {
            knob: KnobId::Left,
            position: 114.0,
        });
        engine.handle(&PointerEvent::PointerMove {
            knob: KnobId::Left,
            delta: 7.0,
        });
        let steps = engine.cancel_all();
        assert_eq!(steps.len(), 1);
        assert!(!engine.is_dragging(KnobId::Left));
        // 121 is 26.75 units: snaps to 27.
        assert_eq!(engine.knob_x(KnobId::Left), 122.0);
        assert!(engine.cancel_all().is_empty());
    }

    #[test]
    fn range_slider_pushes_to_collaborators() {
        let mut slider = RangeSlider::new(
            exact_config(),
            RecordingRenderer::default(),
            RecordedValues::default(),
        )
        .expect("valid config");
        assert_eq!(slider.renderer().calls().len(), 3);

        slider.handle(&PointerEvent::PointerDown {
            knob: KnobId::Left,
            position: 114.0,
        });
        slider.handle(&PointerEvent::PointerMove {
            knob: KnobId::Left,
            delta: -20.0,
        });
        slider.handle(&PointerEvent::PointerUp { knob: KnobId::Left });

        assert_eq!(slider.observer().values(), &[(20.0, 75.0)]);
        let last_knob = slider
            .renderer()
            .calls()
            .iter()
            .rev()
            .find_map(|call| match call {
                RenderCall::KnobFrame { knob, frame, .. } => Some((*knob, *frame)),
                RenderCall::RangeFrame { .. } => None,
            });
        assert_eq!(
            last_knob,
            Some((KnobId::Left, Frame::new(80.0, 0.0, 28.0, 28.0)))
        );
    }

    #[test]
    fn closures_observe_values() {
        let mut seen = Vec::new();
        {
            let mut slider = RangeSlider::new(
                exact_config(),
                RecordingRenderer::default(),
                |min: f64, max: f64| seen.push((min, max)),
            )
            .expect("valid config");
            slider.handle(&PointerEvent::PointerDown {
                knob: KnobId::Right,
                position: 314.0,
            });
            slider.handle(&PointerEvent::PointerCancel {
                knob: KnobId::Right,
            });
        }
        assert_eq!(seen, vec![(25.0, 75.0)]);
    }
}
