#![forbid(unsafe_code)]

//! The region between the two knobs.

use crate::color::Rgba;
use crate::config::SliderConfig;
use crate::geometry::Frame;

/// Orientation of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Polarity {
    /// Left knob at or before the right knob.
    #[default]
    Positive,
    /// The knobs have crossed. Only reachable with negative range enabled.
    Negative,
}

impl Polarity {
    /// Polarity of a selection whose knobs sit at `left_x` and `right_x`.
    #[inline]
    #[must_use]
    pub fn of(left_x: f64, right_x: f64) -> Self {
        if left_x <= right_x {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Configured fill color for this polarity.
    #[inline]
    #[must_use]
    pub fn color(self, config: &SliderConfig) -> Rgba {
        match self {
            Self::Positive => config.positive_range_color,
            Self::Negative => config.negative_range_color,
        }
    }
}

/// Pixel interval between the knob centres, recomputed after every move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedRange {
    /// `min(left_x, right_x)`.
    pub start: f64,
    /// `max(left_x, right_x)`.
    pub end: f64,
    pub polarity: Polarity,
}

impl SelectedRange {
    #[must_use]
    pub fn between(left_x: f64, right_x: f64) -> Self {
        Self {
            start: left_x.min(right_x),
            end: left_x.max(right_x),
            polarity: Polarity::of(left_x, right_x),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Bar frame centred on the control's midline.
    #[must_use]
    pub fn frame(&self, config: &SliderConfig) -> Frame {
        Frame::horizontal_span(
            self.start,
            self.end,
            config.control_height() / 2.0,
            config.track_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_knobs_are_positive() {
        let range = SelectedRange::between(82.0, 218.0);
        assert_eq!(range.polarity, Polarity::Positive);
        assert_eq!((range.start, range.end), (82.0, 218.0));
        assert_eq!(range.width(), 136.0);
    }

    #[test]
    fn coincident_knobs_are_positive() {
        assert_eq!(Polarity::of(50.0, 50.0), Polarity::Positive);
    }

    #[test]
    fn crossed_knobs_are_negative_and_normalized() {
        let range = SelectedRange::between(218.0, 82.0);
        assert_eq!(range.polarity, Polarity::Negative);
        assert_eq!((range.start, range.end), (82.0, 218.0));
    }

    #[test]
    fn polarity_selects_configured_color() {
        let config = SliderConfig::default();
        assert_eq!(Polarity::Positive.color(&config), Rgba::BLUE);
        assert_eq!(Polarity::Negative.color(&config), Rgba::RED);
    }

    #[test]
    fn frame_sits_on_the_midline() {
        let config = SliderConfig::default();
        let frame = SelectedRange::between(82.0, 218.0).frame(&config);
        assert_eq!(frame, Frame::new(82.0, 13.0, 136.0, 2.0));
    }
}
