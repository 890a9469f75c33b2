#![forbid(unsafe_code)]

//! Per-knob drag lifecycle.
//!
//! ```text
//! Idle -> Dragging -> (commit) -> Idle
//! ```
//!
//! One [`KnobDragMachine`] exists per knob. Each pointer event is applied as
//! a pure step `(state, event) -> (state, effect)`: the machine never touches
//! knob positions itself, it reports where the knob should go and the caller
//! applies it. Machines for the two knobs are independent; a session only
//! reads the other knob's position as passed in for the current event.
//!
//! # Invariants
//!
//! 1. At most one session per knob. A second pointer-down while dragging is a
//!    no-op.
//! 2. A rejected move leaves the knob where it was. The translation that
//!    produced it stays pending and is added to the next move, so the knob
//!    catches up with the pointer as soon as a legal position is requested.
//! 3. Pointer-up and pointer-cancel both commit at the last legal position.
//!    Only the commit quantizes.

use crate::config::SEPARATION_EPSILON;
use crate::constraint::{ConstraintEngine, MoveVerdict};
use crate::event::{KnobId, PointerEvent};
use crate::value_space::ValueSpace;
use crate::{debug, trace, warn};

/// Lifecycle state of one knob's drag session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "state", rename_all = "snake_case")
)]
pub enum KnobDragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position reported at pointer-down.
        origin: f64,
        /// Knob centre when the session started.
        start_x: f64,
        /// Translation not yet consumed by an accepted move.
        pending: f64,
        accepted_moves: u32,
        rejected_moves: u32,
    },
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CommitReason {
    Released,
    Canceled,
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum KnobDragNoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    KnobMismatch,
    NonFiniteInput,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "effect", rename_all = "snake_case")
)]
pub enum KnobDragEffect {
    DragStarted {
        origin: f64,
        x: f64,
    },
    Moved {
        from: f64,
        to: f64,
        clamped: bool,
    },
    MoveRejected {
        requested: f64,
        distance: f64,
        floor: f64,
    },
    Committed {
        /// Position before quantization.
        raw_x: f64,
        /// Final committed position.
        x: f64,
        reason: CommitReason,
        accepted_moves: u32,
        rejected_moves: u32,
    },
    Noop {
        reason: KnobDragNoopReason,
    },
}

impl KnobDragEffect {
    /// New knob centre requested by this effect, if any.
    #[inline]
    #[must_use]
    pub fn target_x(&self) -> Option<f64> {
        match *self {
            Self::Moved { to, .. } => Some(to),
            Self::Committed { x, .. } => Some(x),
            _ => None,
        }
    }
}

/// One state-machine step with its diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnobDragTransition {
    pub transition_id: u64,
    pub knob: KnobId,
    pub from: KnobDragState,
    pub to: KnobDragState,
    pub effect: KnobDragEffect,
}

/// Everything a session needs besides the knob positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolicy {
    pub space: ValueSpace,
    pub constraints: ConstraintEngine,
    pub steps_enabled: bool,
}

impl DragPolicy {
    /// Snap `x` to a step when stepping is enabled, and clamp it to the track.
    #[must_use]
    pub fn snap(&self, x: f64) -> f64 {
        if self.steps_enabled {
            self.space.quantize(x)
        } else {
            self.space.clamp_center(x)
        }
    }

    /// Value reported for a knob centre at `x`.
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        if self.steps_enabled {
            self.space.step_value(x)
        } else {
            self.space.pixel_to_value(x)
        }
    }

    /// Final resting position for `knob` released at `x` while the other
    /// knob sits at `other_x`.
    ///
    /// Snapping goes to the nearest step unless that step would cross the
    /// separation floor; then the knob snaps one step away from the other
    /// knob instead.
    #[must_use]
    pub fn commit_position(&self, knob: KnobId, x: f64, other_x: f64) -> f64 {
        let snapped = self.snap(x);
        if !self.steps_enabled || self.constraints.is_negative_range_enabled() {
            return snapped;
        }
        let tolerance = SEPARATION_EPSILON * self.space.max_center();
        let distance = ConstraintEngine::signed_distance(knob, other_x, snapped);
        if distance >= self.constraints.separation_floor() - tolerance {
            return snapped;
        }
        let step = self.space.step_size_in_point();
        let away = match knob {
            KnobId::Left => snapped - step,
            KnobId::Right => snapped + step,
        };
        self.space.clamp_center(away)
    }
}

/// Drag lifecycle machine for one knob.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobDragMachine {
    knob: KnobId,
    state: KnobDragState,
    transition_counter: u64,
}

impl KnobDragMachine {
    #[must_use]
    pub const fn new(knob: KnobId) -> Self {
        Self {
            knob,
            state: KnobDragState::Idle,
            transition_counter: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn knob(&self) -> KnobId {
        self.knob
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> KnobDragState {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, KnobDragState::Dragging { .. })
    }

    /// Apply one pointer event.
    ///
    /// `current_x` is this knob's centre and `other_x` the other knob's
    /// centre, both as of this event.
    pub fn apply(
        &mut self,
        event: &PointerEvent,
        policy: &DragPolicy,
        current_x: f64,
        other_x: f64,
    ) -> KnobDragTransition {
        let from = self.state;
        let effect = if event.knob() != self.knob {
            KnobDragEffect::Noop {
                reason: KnobDragNoopReason::KnobMismatch,
            }
        } else if !event.is_finite() {
            warn!(knob = %self.knob, ?event, "ignoring non-finite pointer input");
            KnobDragEffect::Noop {
                reason: KnobDragNoopReason::NonFiniteInput,
            }
        } else {
            self.step(event, policy, current_x, other_x)
        };

        self.transition_counter = self.transition_counter.saturating_add(1);
        KnobDragTransition {
            transition_id: self.transition_counter,
            knob: self.knob,
            from,
            to: self.state,
            effect,
        }
    }

    /// End any active session at `current_x` without an inbound event.
    ///
    /// Used when the host tears the control down mid-drag. Returns `None`
    /// when idle.
    pub fn force_cancel(
        &mut self,
        policy: &DragPolicy,
        current_x: f64,
        other_x: f64,
    ) -> Option<KnobDragTransition> {
        if !self.is_dragging() {
            return None;
        }
        let from = self.state;
        let effect = self.commit(policy, current_x, other_x, CommitReason::Canceled);
        self.transition_counter = self.transition_counter.saturating_add(1);
        Some(KnobDragTransition {
            transition_id: self.transition_counter,
            knob: self.knob,
            from,
            to: self.state,
            effect,
        })
    }

    fn step(
        &mut self,
        event: &PointerEvent,
        policy: &DragPolicy,
        current_x: f64,
        other_x: f64,
    ) -> KnobDragEffect {
        match (self.state, *event) {
            (KnobDragState::Idle, PointerEvent::PointerDown { position, .. }) => {
                self.state = KnobDragState::Dragging {
                    origin: position,
                    start_x: current_x,
                    pending: 0.0,
                    accepted_moves: 0,
                    rejected_moves: 0,
                };
                debug!(knob = %self.knob, x = current_x, "drag started");
                KnobDragEffect::DragStarted {
                    origin: position,
                    x: current_x,
                }
            }
            (KnobDragState::Idle, _) => KnobDragEffect::Noop {
                reason: KnobDragNoopReason::IdleWithoutActiveDrag,
            },
            (KnobDragState::Dragging { .. }, PointerEvent::PointerDown { .. }) => {
                KnobDragEffect::Noop {
                    reason: KnobDragNoopReason::DragAlreadyInProgress,
                }
            }
            (
                KnobDragState::Dragging {
                    origin,
                    start_x,
                    pending,
                    accepted_moves,
                    rejected_moves,
                },
                PointerEvent::PointerMove { delta, .. },
            ) => {
                let pending = pending + delta;
                let requested = current_x + pending;
                match policy
                    .constraints
                    .propose_move(self.knob, other_x, requested)
                {
                    MoveVerdict::Accepted { x, clamped } => {
                        self.state = KnobDragState::Dragging {
                            origin,
                            start_x,
                            pending: 0.0,
                            accepted_moves: accepted_moves.saturating_add(1),
                            rejected_moves,
                        };
                        debug!(knob = %self.knob, from = current_x, to = x, clamped, "knob moved");
                        KnobDragEffect::Moved {
                            from: current_x,
                            to: x,
                            clamped,
                        }
                    }
                    MoveVerdict::Rejected { distance, floor } => {
                        self.state = KnobDragState::Dragging {
                            origin,
                            start_x,
                            pending,
                            accepted_moves,
                            rejected_moves: rejected_moves.saturating_add(1),
                        };
                        trace!(knob = %self.knob, requested, distance, floor, "move rejected");
                        KnobDragEffect::MoveRejected {
                            requested,
                            distance,
                            floor,
                        }
                    }
                }
            }
            (KnobDragState::Dragging { .. }, PointerEvent::PointerUp { .. }) => {
                self.commit(policy, current_x, other_x, CommitReason::Released)
            }
            (KnobDragState::Dragging { .. }, PointerEvent::PointerCancel { .. }) => {
                self.commit(policy, current_x, other_x, CommitReason::Canceled)
            }
        }
    }

    fn commit(
        &mut self,
        policy: &DragPolicy,
        current_x: f64,
        other_x: f64,
        reason: CommitReason,
    ) -> KnobDragEffect {
        let (accepted_moves, rejected_moves) = match self.state {
            KnobDragState::Dragging {
                accepted_moves,
                rejected_moves,
                ..
            } => (accepted_moves, rejected_moves),
            KnobDragState::Idle => (0, 0),
        };
        self.state = KnobDragState::Idle;
        let x = policy.commit_position(self.knob, current_x, other_x);
        debug!(knob = %self.knob, raw_x = current_x, x, ?reason, "drag committed");
        KnobDragEffect::Committed {
            raw_x: current_x,
            x,
            reason,
            accepted_moves,
            rejected_moves,
        }
    }
}
