#![forbid(unsafe_code)]

//! Inbound pointer events.
//!
//! Host adapters translate platform gestures (touch pans, mouse drags) into
//! [`PointerEvent`]s addressed to one knob. Positions and deltas are
//! horizontal pixel quantities in control-local coordinates.

use std::fmt;

/// One of the two knobs, named by initial role.
///
/// `Left` starts at `minimum_value_selected` and `Right` at
/// `maximum_value_selected`. With negative range enabled the names no longer
/// imply numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum KnobId {
    Left,
    Right,
}

impl KnobId {
    pub const ALL: [KnobId; 2] = [KnobId::Left, KnobId::Right];

    /// The knob this one is constrained against.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for KnobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// A pointer lifecycle signal for one knob.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "event", rename_all = "snake_case")
)]
pub enum PointerEvent {
    /// Contact began on the knob's hit region at horizontal `position`.
    PointerDown { knob: KnobId, position: f64 },
    /// Contact moved by `delta` pixels since the previous event.
    PointerMove { knob: KnobId, delta: f64 },
    /// Contact lifted.
    PointerUp { knob: KnobId },
    /// Contact lost or interrupted by the platform.
    PointerCancel { knob: KnobId },
}

impl PointerEvent {
    #[inline]
    #[must_use]
    pub const fn knob(&self) -> KnobId {
        match *self {
            Self::PointerDown { knob, .. }
            | Self::PointerMove { knob, .. }
            | Self::PointerUp { knob }
            | Self::PointerCancel { knob } => knob,
        }
    }

    /// Whether every numeric payload is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::PointerDown { position, .. } => position.is_finite(),
            Self::PointerMove { delta, .. } => delta.is_finite(),
            Self::PointerUp { .. } | Self::PointerCancel { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_knob_is_an_involution() {
        for knob in KnobId::ALL {
            assert_ne!(knob.other(), knob);
            assert_eq!(knob.other().other(), knob);
        }
    }

    #[test]
    fn event_reports_its_knob() {
        let down = PointerEvent::PointerDown {
            knob: KnobId::Right,
            position: 3.0,
        };
        assert_eq!(down.knob(), KnobId::Right);
        assert_eq!(PointerEvent::PointerCancel { knob: KnobId::Left }.knob(), KnobId::Left);
    }

    #[test]
    fn non_finite_payloads_are_detected() {
        let bad = PointerEvent::PointerMove {
            knob: KnobId::Left,
            delta: f64::NAN,
        };
        assert!(!bad.is_finite());
        assert!(PointerEvent::PointerUp { knob: KnobId::Left }.is_finite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn events_use_tagged_snake_case() {
        let event = PointerEvent::PointerMove {
            knob: KnobId::Right,
            delta: -4.5,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert_eq!(json, r#"{"event":"pointer_move","knob":"right","delta":-4.5}"#);
        let back: PointerEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
