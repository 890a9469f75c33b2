#![forbid(unsafe_code)]

//! Legal knob positions.
//!
//! [`ConstraintEngine::propose_move`] decides where a dragged knob may go
//! given the other knob's current position:
//!
//! 1. The signed distance is measured from the other knob toward the moving
//!    one, positive while the knobs are in their natural order.
//! 2. With negative range disabled, a distance below
//!    `minimum_range * step_size_in_point` rejects the move outright. There is
//!    no partial move toward the floor.
//! 3. With negative range enabled, any distance is legal.
//! 4. Accepted positions are clamped to the track.

use crate::config::SliderConfig;
use crate::event::KnobId;
use crate::value_space::ValueSpace;

/// Outcome of one proposed move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "verdict", rename_all = "snake_case")
)]
pub enum MoveVerdict {
    /// The knob may move to `x`. `clamped` is set when the track bounds
    /// shortened the request.
    Accepted { x: f64, clamped: bool },
    /// The request would bring the knobs closer than the separation floor.
    Rejected { distance: f64, floor: f64 },
}

impl MoveVerdict {
    /// Position the knob ends up at, given where it was.
    #[inline]
    #[must_use]
    pub fn resolve(self, current_x: f64) -> f64 {
        match self {
            Self::Accepted { x, .. } => x,
            Self::Rejected { .. } => current_x,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Separation and bounds policy for one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintEngine {
    space: ValueSpace,
    separation_floor: f64,
    negative_range: bool,
}

impl ConstraintEngine {
    #[must_use]
    pub fn new(space: ValueSpace, config: &SliderConfig) -> Self {
        Self {
            space,
            separation_floor: config.minimum_range * space.step_size_in_point(),
            negative_range: config.is_negative_range_enabled,
        }
    }

    /// Minimum knob-centre distance in pixels. Zero disables the floor.
    #[inline]
    #[must_use]
    pub fn separation_floor(&self) -> f64 {
        if self.negative_range {
            0.0
        } else {
            self.separation_floor
        }
    }

    #[inline]
    #[must_use]
    pub fn is_negative_range_enabled(&self) -> bool {
        self.negative_range
    }

    /// Distance from `other_x` to `x`, positive while `moving` sits on its
    /// own side of the other knob.
    #[inline]
    #[must_use]
    pub fn signed_distance(moving: KnobId, other_x: f64, x: f64) -> f64 {
        match moving {
            KnobId::Left => other_x - x,
            KnobId::Right => x - other_x,
        }
    }

    /// Decide whether `moving` may go to `requested_x` while the other knob
    /// sits at `other_x`.
    #[must_use]
    pub fn propose_move(&self, moving: KnobId, other_x: f64, requested_x: f64) -> MoveVerdict {
        let distance = Self::signed_distance(moving, other_x, requested_x);
        if !self.negative_range && distance < self.separation_floor {
            return MoveVerdict::Rejected {
                distance,
                floor: self.separation_floor,
            };
        }
        let x = self.space.clamp_center(requested_x);
        MoveVerdict::Accepted {
            x,
            clamped: x != requested_x,
        }
    }
}
