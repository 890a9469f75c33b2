#![forbid(unsafe_code)]

//! Slider configuration.
//!
//! [`SliderConfig`] is the single explicit configuration surface. It is
//! validated once when a [`ValueSpace`](crate::value_space::ValueSpace) or
//! slider is built from it and is immutable afterwards.

use std::time::Duration;

use crate::color::Rgba;
use crate::error::{ConfigError, Result};

/// Relative tolerance used when comparing derived separations.
pub(crate) const SEPARATION_EPSILON: f64 = 1e-9;

/// Geometry, domain and policy options for one range slider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SliderConfig {
    /// Lower bound of the value domain (default: 1.0).
    pub minimum_value: f64,
    /// Upper bound of the value domain (default: 100.0).
    pub maximum_value: f64,
    /// Initial value of the left knob (default: 25.0).
    pub minimum_value_selected: f64,
    /// Initial value of the right knob (default: 75.0).
    pub maximum_value_selected: f64,
    /// Diameter of each knob's hit target in pixels (default: 28.0).
    pub knob_size: f64,
    /// Usable pixel length of the track (default: 300.0).
    pub track_width: f64,
    /// Height of the control. Frames are centred on `height / 2`.
    /// `None` uses `knob_size`.
    pub height: Option<f64>,
    /// Thickness of the selected-range bar (default: 2.0).
    pub track_height: f64,
    /// Snap committed positions to multiples of `step_size` (default: true).
    pub is_steps_enabled: bool,
    /// Step granularity in value units (default: 1.0).
    pub step_size: f64,
    /// Minimum knob separation, in steps (default: 10.0).
    pub minimum_range: f64,
    /// Allow the knobs to cross (default: false).
    pub is_negative_range_enabled: bool,
    /// Range fill when left ≤ right (default: blue).
    pub positive_range_color: Rgba,
    /// Range fill when the knobs have crossed (default: red).
    pub negative_range_color: Rgba,
    /// Smoothing hint forwarded with every knob frame (default: 20ms).
    pub settle_duration: Duration,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            minimum_value: 1.0,
            maximum_value: 100.0,
            minimum_value_selected: 25.0,
            maximum_value_selected: 75.0,
            knob_size: 28.0,
            track_width: 300.0,
            height: None,
            track_height: 2.0,
            is_steps_enabled: true,
            step_size: 1.0,
            minimum_range: 10.0,
            is_negative_range_enabled: false,
            positive_range_color: Rgba::BLUE,
            negative_range_color: Rgba::RED,
            settle_duration: Duration::from_millis(20),
        }
    }
}

impl SliderConfig {
    #[must_use]
    pub fn with_domain(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum_value = minimum;
        self.maximum_value = maximum;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, left: f64, right: f64) -> Self {
        self.minimum_value_selected = left;
        self.maximum_value_selected = right;
        self
    }

    #[must_use]
    pub fn with_track(mut self, track_width: f64, knob_size: f64) -> Self {
        self.track_width = track_width;
        self.knob_size = knob_size;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Enable stepping with the given granularity, or disable it with `None`.
    #[must_use]
    pub fn with_steps(mut self, step_size: Option<f64>) -> Self {
        match step_size {
            Some(step) => {
                self.is_steps_enabled = true;
                self.step_size = step;
            }
            None => self.is_steps_enabled = false,
        }
        self
    }

    #[must_use]
    pub fn with_minimum_range(mut self, steps: f64) -> Self {
        self.minimum_range = steps;
        self
    }

    #[must_use]
    pub fn with_negative_range(mut self, enabled: bool) -> Self {
        self.is_negative_range_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, positive: Rgba, negative: Rgba) -> Self {
        self.positive_range_color = positive;
        self.negative_range_color = negative;
        self
    }

    /// Effective control height.
    #[inline]
    #[must_use]
    pub fn control_height(&self) -> f64 {
        self.height.unwrap_or(self.knob_size)
    }

    /// Minimum separation between the two selected values, in value units.
    #[inline]
    #[must_use]
    pub fn minimum_separation(&self) -> f64 {
        self.minimum_range * self.step_size
    }

    /// Reject configurations that would produce non-finite derived constants
    /// or an unusable initial state.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("minimum_value", self.minimum_value),
            ("maximum_value", self.maximum_value),
            ("minimum_value_selected", self.minimum_value_selected),
            ("maximum_value_selected", self.maximum_value_selected),
            ("knob_size", self.knob_size),
            ("track_width", self.track_width),
            ("height", self.control_height()),
            ("track_height", self.track_height),
            ("step_size", self.step_size),
            ("minimum_range", self.minimum_range),
        ];
        for (option, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { option, value });
            }
        }

        if self.maximum_value <= self.minimum_value {
            return Err(ConfigError::EmptyDomain {
                minimum: self.minimum_value,
                maximum: self.maximum_value,
            });
        }

        let positive = [
            ("step_size", self.step_size),
            ("knob_size", self.knob_size),
            ("height", self.control_height()),
            ("track_height", self.track_height),
        ];
        for (option, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { option, value });
            }
        }

        if self.knob_size >= self.track_width {
            return Err(ConfigError::KnobWiderThanTrack {
                knob_size: self.knob_size,
                track_width: self.track_width,
            });
        }

        if self.minimum_range < 0.0 {
            return Err(ConfigError::NegativeMinimumRange {
                minimum_range: self.minimum_range,
            });
        }

        let span = self.maximum_value - self.minimum_value;
        let tolerance = span * SEPARATION_EPSILON;
        let required = self.minimum_separation();
        if !self.is_negative_range_enabled && required > span + tolerance {
            return Err(ConfigError::MinimumRangeExceedsDomain { required, span });
        }

        for (option, value) in [
            ("minimum_value_selected", self.minimum_value_selected),
            ("maximum_value_selected", self.maximum_value_selected),
        ] {
            if value < self.minimum_value || value > self.maximum_value {
                return Err(ConfigError::SelectionOutOfDomain {
                    option,
                    value,
                    minimum: self.minimum_value,
                    maximum: self.maximum_value,
                });
            }
        }

        if !self.is_negative_range_enabled {
            if self.minimum_value_selected > self.maximum_value_selected {
                return Err(ConfigError::InvertedSelection {
                    minimum_selected: self.minimum_value_selected,
                    maximum_selected: self.maximum_value_selected,
                });
            }
            let separation = self.maximum_value_selected - self.minimum_value_selected;
            if separation + tolerance < required {
                return Err(ConfigError::SelectionTooNarrow {
                    separation,
                    required,
                });
            }
        }

        Ok(())
    }
}
