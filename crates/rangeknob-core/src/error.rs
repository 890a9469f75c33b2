#![forbid(unsafe_code)]

//! Error types.
//!
//! Constraint violations during a drag are never errors: they are recorded
//! as rejected moves. Errors are reserved for programmer mistakes caught at
//! construction time and for refused programmatic updates.

use thiserror::Error;

use crate::event::KnobId;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid slider configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{option} must be finite, got {value}")]
    NonFinite { option: &'static str, value: f64 },

    #[error("{option} must be positive, got {value}")]
    NonPositive { option: &'static str, value: f64 },

    #[error("empty value domain: maximum_value {maximum} must exceed minimum_value {minimum}")]
    EmptyDomain { minimum: f64, maximum: f64 },

    #[error("knob_size {knob_size} leaves no travel on a track of width {track_width}")]
    KnobWiderThanTrack { knob_size: f64, track_width: f64 },

    #[error("minimum_range must not be negative, got {minimum_range}")]
    NegativeMinimumRange { minimum_range: f64 },

    #[error("minimum separation {required} exceeds the value domain span {span}")]
    MinimumRangeExceedsDomain { required: f64, span: f64 },

    #[error("{option} {value} lies outside [{minimum}, {maximum}]")]
    SelectionOutOfDomain {
        option: &'static str,
        value: f64,
        minimum: f64,
        maximum: f64,
    },

    #[error(
        "minimum_value_selected {minimum_selected} exceeds maximum_value_selected \
         {maximum_selected} while negative range is disabled"
    )]
    InvertedSelection {
        minimum_selected: f64,
        maximum_selected: f64,
    },

    #[error("initial selection width {separation} is below the minimum separation {required}")]
    SelectionTooNarrow { separation: f64, required: f64 },
}

/// A refused programmatic selection update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("selected value must be finite, got {value}")]
    NonFinite { value: f64 },

    #[error("{knob} knob is being dragged")]
    DragInProgress { knob: KnobId },

    #[error("left value {left} exceeds right value {right} while negative range is disabled")]
    Inverted { left: f64, right: f64 },

    #[error("selection width {separation} is below the minimum separation {required}")]
    TooNarrow { separation: f64, required: f64 },
}
