#![forbid(unsafe_code)]

//! In-memory collaborators that record what the slider pushes to them.
//!
//! Used by tests and by the replay harness to inspect the outbound call
//! stream without a real renderer.

use std::time::Duration;

use crate::color::Rgba;
use crate::event::KnobId;
use crate::geometry::Frame;
use crate::selection::Polarity;
use crate::slider::{SliderRenderer, ValuesObserver};

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "call", rename_all = "snake_case")
)]
pub enum RenderCall {
    KnobFrame {
        knob: KnobId,
        frame: Frame,
        settle: Duration,
    },
    RangeFrame {
        frame: Frame,
        polarity: Polarity,
        color: Rgba,
    },
}

/// Renderer that keeps every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Most recent frame pushed for `knob`.
    #[must_use]
    pub fn last_knob_frame(&self, knob: KnobId) -> Option<Frame> {
        self.calls.iter().rev().find_map(|call| match *call {
            RenderCall::KnobFrame { knob: k, frame, .. } if k == knob => Some(frame),
            _ => None,
        })
    }

    /// Most recent range bar frame and polarity.
    #[must_use]
    pub fn last_range(&self) -> Option<(Frame, Polarity, Rgba)> {
        self.calls.iter().rev().find_map(|call| match *call {
            RenderCall::RangeFrame {
                frame,
                polarity,
                color,
            } => Some((frame, polarity, color)),
            RenderCall::KnobFrame { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SliderRenderer for RecordingRenderer {
    fn set_knob_frame(&mut self, knob: KnobId, frame: Frame, settle: Duration) {
        self.calls.push(RenderCall::KnobFrame {
            knob,
            frame,
            settle,
        });
    }

    fn set_selected_range_frame(&mut self, frame: Frame, polarity: Polarity, color: Rgba) {
        self.calls.push(RenderCall::RangeFrame {
            frame,
            polarity,
            color,
        });
    }
}

/// Observer that keeps every committed `(min_value, max_value)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedValues {
    values: Vec<(f64, f64)>,
}

impl RecordedValues {
    #[must_use]
    pub fn values(&self) -> &[(f64, f64)] {
        &self.values
    }

    #[must_use]
    pub fn last(&self) -> Option<(f64, f64)> {
        self.values.last().copied()
    }
}

impl ValuesObserver for RecordedValues {
    fn on_values_changed(&mut self, min_value: f64, max_value: f64) {
        self.values.push((min_value, max_value));
    }
}
