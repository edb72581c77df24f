//! Wall-clock-driven oscillation of a keyframed attribute.
//!
//! Keyframes carry (value, period, offset). A 3-channel curve is fit over
//! position; each frame the curve is evaluated at the current progress and
//! the oscillation phase is advanced by elapsed wall time times the local
//! period. Phase survives teardown through the [`KeyCache`].

use crate::curve::{CurveFit, CurveType};
use crate::error::MotionError;
use crate::ids::OwnerId;
use crate::key_cache::KeyCache;
use crate::oscillator::WaveShape;
use crate::spline_set::sort_and_dedup;

const CURVE_VALUE: usize = 0;
const CURVE_PERIOD: usize = 1;
const CURVE_OFFSET: usize = 2;

const TAU: f32 = std::f32::consts::TAU;

#[derive(Debug)]
pub struct TimeCycleSplineSet {
    attribute: String,
    curve_fit: Option<CurveFit>,
    wave_shape: WaveShape,
    positions: Vec<i32>,
    values: Vec<f32>, // (value, period, offset) triples
    last_time_nanos: i64,
    last_cycle: f32,
    keep_going: bool,
}

impl TimeCycleSplineSet {
    /// `attribute` names the animated property; it keys the phase cache.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            curve_fit: None,
            wave_shape: WaveShape::Sin,
            positions: Vec::new(),
            values: Vec::new(),
            last_time_nanos: 0,
            last_cycle: f32::NAN,
            keep_going: false,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn set_point(&mut self, position: i32, value: f32, period: f32, shape: WaveShape, offset: f32) {
        self.positions.push(position);
        self.values.extend_from_slice(&[value, period, offset]);
        // the highest value shape is chosen
        self.wave_shape = self.wave_shape.max(shape);
    }

    /// Seed the wall clock so the first `get` sees a sane delta.
    pub fn set_start_time(&mut self, nanos: i64) {
        self.last_time_nanos = nanos;
    }

    pub fn setup(&mut self, curve_type: CurveType) -> Result<(), MotionError> {
        if self.positions.is_empty() {
            return Err(MotionError::NoKeyframes(self.attribute.clone()));
        }
        let (time, values) = sort_and_dedup(&self.positions, &self.values, 3);
        self.curve_fit = Some(CurveFit::new(curve_type, &time, &values)?);
        Ok(())
    }

    /// True when the last `get` produced a live oscillation, meaning the
    /// owner must keep scheduling frames.
    pub fn needs_next_frame(&self) -> bool {
        self.keep_going
    }

    /// Evaluate at `progress` with the current wall clock. `time_nanos`
    /// must be non-decreasing across calls for one owner.
    pub fn get(
        &mut self,
        progress: f32,
        time_nanos: i64,
        owner: OwnerId,
        cache: &mut KeyCache,
    ) -> Result<f32, MotionError> {
        let curve = self.curve_fit.as_ref().ok_or(MotionError::NotSetup)?;
        let mut channels = [0.0f32; 3];
        curve.get_pos_f32(progress as f64, &mut channels);
        let value = channels[CURVE_VALUE];
        let period = channels[CURVE_PERIOD];
        let offset = channels[CURVE_OFFSET];

        if period == 0.0 {
            // waveform is suppressed; nothing keeps running
            self.keep_going = false;
            return Ok(offset);
        }

        if self.last_cycle.is_nan() {
            // not seen this run; recover the phase from the cache
            self.last_cycle = cache.get_float_value(owner, &self.attribute, 0);
            if self.last_cycle.is_nan() {
                self.last_cycle = 0.0;
            }
        }
        let delta_time = time_nanos - self.last_time_nanos;
        self.last_cycle =
            ((self.last_cycle as f64 + delta_time as f64 * 1e-9 * period as f64) % 1.0) as f32;
        cache.set_float_value(owner, &self.attribute, 0, self.last_cycle);
        self.last_time_nanos = time_nanos;

        let wave = self.calc_wave(self.last_cycle);
        self.keep_going = value != 0.0 || period != 0.0;
        Ok(value * wave + offset)
    }

    /// Closed waveform family over one cycle of phase `p` in [0, 1).
    fn calc_wave(&self, p: f32) -> f32 {
        match self.wave_shape {
            // custom waves are progress-driven only; fall back to sine here
            WaveShape::Sin | WaveShape::Custom => (p * TAU).sin(),
            WaveShape::Square => (0.5 - p % 1.0).signum(),
            WaveShape::Triangle => 1.0 - p.abs(),
            WaveShape::Saw => (p * 2.0 + 1.0) % 2.0 - 1.0,
            WaveShape::ReverseSaw => 1.0 - (p * 2.0 + 1.0) % 2.0,
            WaveShape::Cos => (p * TAU).cos(),
            WaveShape::Bounce => {
                let x = 1.0 - ((p * 4.0) % 4.0 - 2.0).abs();
                1.0 - x * x
            }
        }
    }

    pub fn curve_fit(&self) -> Option<&CurveFit> {
        self.curve_fit.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_shape_takes_the_maximum_id() {
        let mut set = TimeCycleSplineSet::new("rotation");
        set.set_point(0, 1.0, 1.0, WaveShape::Bounce, 0.0);
        set.set_point(100, 1.0, 1.0, WaveShape::Square, 0.0);
        assert_eq!(set.wave_shape, WaveShape::Bounce);
    }

    #[test]
    fn calc_wave_piecewise_family() {
        let mut set = TimeCycleSplineSet::new("alpha");
        set.wave_shape = WaveShape::Sin;
        assert!((set.calc_wave(0.0)).abs() < 1e-6);
        assert!((set.calc_wave(0.25) - 1.0).abs() < 1e-6);
        assert!((set.calc_wave(0.5)).abs() < 1e-6);
        set.wave_shape = WaveShape::Square;
        assert_eq!(set.calc_wave(0.1), 1.0);
        assert_eq!(set.calc_wave(0.6), -1.0);
        set.wave_shape = WaveShape::Triangle;
        assert_eq!(set.calc_wave(0.0), 1.0);
        assert_eq!(set.calc_wave(1.0), 0.0);
        set.wave_shape = WaveShape::Bounce;
        assert!((set.calc_wave(0.5)).abs() < 1e-6);
    }
}
