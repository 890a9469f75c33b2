#![forbid(unsafe_code)]

//! Conversions between the value domain and knob centre pixels.
//!
//! Values map linearly onto knob centre-x coordinates
//! `[knob_size / 2, track_width - knob_size / 2]`, so a knob never hangs off
//! either end of the track. Every conversion and the drag constraint share
//! the derived constants computed once in [`ValueSpace::new`].

use crate::config::{SEPARATION_EPSILON, SliderConfig};
use crate::error::Result;

/// Immutable geometry of one slider's value domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSpace {
    minimum_value: f64,
    maximum_value: f64,
    knob_size: f64,
    track_width: f64,
    step_size: f64,
    /// Pixels per value unit.
    px_per_unit: f64,
    /// Pixels per logical step.
    step_size_in_point: f64,
}

impl ValueSpace {
    /// Validate `config` and derive the pixel constants from it.
    pub fn new(config: &SliderConfig) -> Result<Self> {
        config.validate()?;
        let px_per_unit = (config.track_width - config.knob_size)
            / (config.maximum_value - config.minimum_value);
        Ok(Self {
            minimum_value: config.minimum_value,
            maximum_value: config.maximum_value,
            knob_size: config.knob_size,
            track_width: config.track_width,
            step_size: config.step_size,
            px_per_unit,
            step_size_in_point: px_per_unit * config.step_size,
        })
    }

    #[inline]
    #[must_use]
    pub fn minimum_value(&self) -> f64 {
        self.minimum_value
    }

    #[inline]
    #[must_use]
    pub fn maximum_value(&self) -> f64 {
        self.maximum_value
    }

    #[inline]
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    #[inline]
    #[must_use]
    pub fn knob_size(&self) -> f64 {
        self.knob_size
    }

    #[inline]
    #[must_use]
    pub fn px_per_unit(&self) -> f64 {
        self.px_per_unit
    }

    /// Pixel distance of one logical step.
    #[inline]
    #[must_use]
    pub fn step_size_in_point(&self) -> f64 {
        self.step_size_in_point
    }

    /// Lowest legal knob centre.
    #[inline]
    #[must_use]
    pub fn min_center(&self) -> f64 {
        self.knob_size / 2.0
    }

    /// Highest legal knob centre.
    #[inline]
    #[must_use]
    pub fn max_center(&self) -> f64 {
        self.track_width - self.knob_size / 2.0
    }

    #[inline]
    #[must_use]
    pub fn clamp_center(&self, x: f64) -> f64 {
        x.clamp(self.min_center(), self.max_center())
    }

    #[inline]
    #[must_use]
    pub fn clamp_value(&self, value: f64) -> f64 {
        value.clamp(self.minimum_value, self.maximum_value)
    }

    /// Pixel length a knob centre can travel.
    #[inline]
    #[must_use]
    pub fn travel(&self) -> f64 {
        self.track_width - self.knob_size
    }

    /// Knob centre for `value`, clamped to the domain first.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        let value = self.clamp_value(value);
        let ratio = (value - self.minimum_value) / (self.maximum_value - self.minimum_value);
        self.min_center() + self.travel() * ratio
    }

    /// Value for the knob centre `x`, clamped to the track first.
    ///
    /// The track ends map to exactly `minimum_value` and `maximum_value`.
    #[must_use]
    pub fn pixel_to_value(&self, x: f64) -> f64 {
        let x = self.clamp_center(x);
        if x >= self.max_center() {
            return self.maximum_value;
        }
        let ratio = (x - self.min_center()) / self.travel();
        let span = self.maximum_value - self.minimum_value;
        self.clamp_value(self.minimum_value + span * ratio)
    }

    /// Like [`pixel_to_value`](Self::pixel_to_value), but a centre sitting on
    /// a step boundary reports `minimum_value + index * step_size` exactly.
    #[must_use]
    pub fn step_value(&self, x: f64) -> f64 {
        let x = self.clamp_center(x);
        if x >= self.max_center() {
            return self.maximum_value;
        }
        let offset = x - self.min_center();
        let index = (offset / self.step_size_in_point).round();
        let tolerance = SEPARATION_EPSILON * self.track_width;
        if (offset - index * self.step_size_in_point).abs() > tolerance {
            return self.pixel_to_value(x);
        }
        self.clamp_value(self.minimum_value + index * self.step_size)
    }

    /// Snap a knob centre to the nearest step boundary.
    ///
    /// A remainder of exactly half a step snaps down. The result is clamped
    /// to the track, so a partial last step never pushes a knob out of
    /// bounds. Quantizing a quantized position returns it unchanged.
    #[must_use]
    pub fn quantize(&self, x: f64) -> f64 {
        let step = self.step_size_in_point;
        let offset = self.clamp_center(x) - self.min_center();
        let index = (offset / step).floor();
        let remainder = offset - index * step;
        let snapped = if remainder > step / 2.0 {
            index + 1.0
        } else {
            index
        };
        self.clamp_center(self.min_center() + snapped * step)
    }

    /// Snap a value to the nearest step, in value space.
    #[must_use]
    pub fn quantize_value(&self, value: f64) -> f64 {
        self.step_value(self.quantize(self.value_to_pixel(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    /// Domain [0, 100] on a 300px track with 28px knobs.
    fn space() -> ValueSpace {
        let config = SliderConfig::default()
            .with_domain(0.0, 100.0)
            .with_selection(25.0, 75.0);
        ValueSpace::new(&config).expect("valid config")
    }

    #[test]
    fn derived_constants() {
        let vs = space();
        assert!((vs.px_per_unit() - 2.72).abs() < EPS);
        assert!((vs.step_size_in_point() - 2.72).abs() < EPS);
        assert_eq!(vs.min_center(), 14.0);
        assert_eq!(vs.max_center(), 286.0);
    }

    #[test]
    fn step_size_scales_step_in_points() {
        let config = SliderConfig::default()
            .with_domain(0.0, 100.0)
            .with_selection(20.0, 80.0)
            .with_steps(Some(5.0))
            .with_minimum_range(2.0);
        let vs = ValueSpace::new(&config).expect("valid config");
        assert!((vs.step_size_in_point() - 13.6).abs() < EPS);
    }

    #[test]
    fn domain_edges_map_to_track_edges() {
        let vs = space();
        assert_eq!(vs.value_to_pixel(0.0), 14.0);
        assert!((vs.value_to_pixel(100.0) - 286.0).abs() < EPS);
        assert_eq!(vs.pixel_to_value(14.0), 0.0);
        assert!((vs.pixel_to_value(286.0) - 100.0).abs() < EPS);
    }

    #[test]
    fn conversions_round_trip() {
        let vs = space();
        for v in [0.0, 0.5, 25.0, 33.3, 82.3, 99.99, 100.0] {
            assert!((vs.pixel_to_value(vs.value_to_pixel(v)) - v).abs() < EPS);
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let vs = space();
        assert_eq!(vs.value_to_pixel(-50.0), 14.0);
        assert!((vs.value_to_pixel(1e6) - 286.0).abs() < EPS);
        assert_eq!(vs.pixel_to_value(-10.0), 0.0);
        assert_eq!(vs.pixel_to_value(1000.0), 100.0);
    }

    #[test]
    fn track_end_reports_maximum_exactly() {
        let vs = space();
        assert_eq!(vs.pixel_to_value(vs.max_center()), 100.0);
        assert_eq!(vs.step_value(vs.max_center()), 100.0);
        assert_eq!(vs.pixel_to_value(vs.value_to_pixel(25.0)), 25.0);
    }

    #[test]
    fn step_value_is_exact_on_step_boundaries() {
        let vs = space();
        // 2.72px steps are not exact in binary.
        let snapped = vs.quantize(vs.value_to_pixel(82.3));
        assert_eq!(vs.step_value(snapped), 82.0);
        assert_eq!(vs.step_value(vs.value_to_pixel(25.0)), 25.0);
        assert_eq!(vs.quantize_value(7.6), 8.0);

        // Off-grid centres fall back to the continuous mapping.
        let between = vs.value_to_pixel(40.5);
        assert!((vs.step_value(between) - 40.5).abs() < EPS);
    }

    #[test]
    fn quantize_rounds_to_nearest_step() {
        let vs = space();
        let snapped = vs.quantize(vs.value_to_pixel(82.3));
        assert!((vs.pixel_to_value(snapped) - 82.0).abs() < EPS);
        let snapped = vs.quantize(vs.value_to_pixel(82.7));
        assert!((vs.pixel_to_value(snapped) - 83.0).abs() < EPS);
    }

    #[test]
    fn exact_half_step_snaps_down() {
        // 400px of travel over 100 units: 4px per step, exact in binary.
        let config = SliderConfig::default()
            .with_domain(0.0, 100.0)
            .with_selection(25.0, 75.0)
            .with_track(428.0, 28.0);
        let vs = ValueSpace::new(&config).expect("valid config");
        let half = vs.min_center() + 40.5 * vs.step_size_in_point();
        assert_eq!(half, 176.0);
        assert_eq!(vs.quantize(half), 174.0);
        assert_eq!(vs.quantize(half + 0.01), 178.0);
    }

    #[test]
    fn quantize_is_idempotent() {
        let vs = space();
        for x in [14.0, 20.1, 100.0, 150.55, 285.9, 286.0] {
            let once = vs.quantize(x);
            let twice = vs.quantize(once);
            assert!((once - twice).abs() < EPS, "{x}: {once} vs {twice}");
        }
    }

    #[test]
    fn quantize_never_leaves_the_track() {
        // 100 / 3 leaves a partial last step.
        let config = SliderConfig::default()
            .with_domain(0.0, 100.0)
            .with_selection(0.0, 99.0)
            .with_steps(Some(3.0))
            .with_minimum_range(1.0);
        let vs = ValueSpace::new(&config).expect("valid config");
        let top = vs.quantize(vs.max_center());
        assert!(top <= vs.max_center());
        assert!(vs.quantize(vs.max_center() + 50.0) <= vs.max_center());
    }

    #[test]
    fn quantize_value_uses_domain_origin() {
        let config = SliderConfig::default()
            .with_domain(1.0, 101.0)
            .with_selection(10.0, 90.0)
            .with_steps(Some(5.0))
            .with_minimum_range(1.0);
        let vs = ValueSpace::new(&config).expect("valid config");
        assert!((vs.quantize_value(13.0) - 11.0).abs() < 1e-6);
        assert!((vs.quantize_value(14.0) - 16.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SliderConfig::default().with_domain(10.0, 0.0);
        assert!(ValueSpace::new(&config).is_err());
    }
}
