//! Variable-frequency oscillation curves.
//!
//! An [`Oscillator`] integrates locally varying periods registered along the
//! progress axis into an absolute phase function over [0, 1], then samples a
//! closed family of waveform shapes at that phase. `normalize()` must run
//! after the last `add_point` and before any evaluation.

use serde::{Deserialize, Serialize};

use crate::curve::MonotonicCurve;

const TAU: f64 = std::f64::consts::TAU;

/// Cyclic waveform shapes. The discriminant doubles as the shape id; when a
/// keyframe set mixes shapes the highest id wins.
#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum WaveShape {
    #[default]
    Sin = 0,
    Square = 1,
    Triangle = 2,
    Saw = 3,
    ReverseSaw = 4,
    Cos = 5,
    Bounce = 6,
    Custom = 7,
}

#[derive(Clone, Debug, Default)]
pub struct Oscillator {
    position: Vec<f64>,
    period: Vec<f64>,
    area: Vec<f64>,
    shape: WaveShape,
    custom_curve: Option<MonotonicCurve>,
    normalized: bool,
}

/// Periodic monotone spline over a list of wave samples, padded one period
/// on each side so the boundary tangents wrap.
fn build_wave(samples: &[f32]) -> MonotonicCurve {
    let n = samples.len();
    let gap = 1.0 / (n - 1) as f64;
    let mut time = Vec::with_capacity(3 * n - 2);
    let mut values = Vec::with_capacity(3 * n - 2);
    for (i, v) in samples.iter().take(n - 1).enumerate() {
        time.push(i as f64 * gap - 1.0);
        values.push(vec![*v as f64]);
    }
    for (i, v) in samples.iter().enumerate() {
        time.push(i as f64 * gap);
        values.push(vec![*v as f64]);
    }
    for (i, v) in samples.iter().enumerate().skip(1) {
        time.push(i as f64 * gap + 1.0);
        values.push(vec![*v as f64]);
    }
    MonotonicCurve::new(&time, &values)
}

impl Oscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the waveform; `custom` supplies the sample list for
    /// [`WaveShape::Custom`] and is ignored for the closed shapes.
    pub fn set_type(&mut self, shape: WaveShape, custom: Option<&[f32]>) {
        self.shape = shape;
        self.custom_curve = match custom {
            Some(samples) if samples.len() >= 2 => Some(build_wave(samples)),
            _ => None,
        };
    }

    /// Register the local period at `position`; keeps positions sorted.
    pub fn add_point(&mut self, position: f64, period: f64) {
        let at = self.position.partition_point(|&p| p < position);
        self.position.insert(at, position);
        self.period.insert(at, period);
        self.normalized = false;
    }

    /// Scale periods so their trapezoidal integral over position matches the
    /// period sum, and precompute cumulative phase areas.
    pub fn normalize(&mut self) {
        let mut total_area = 0.0;
        let mut total_count = 0.0;
        for p in &self.period {
            total_count += p;
        }
        for i in 1..self.period.len() {
            let h = (self.period[i - 1] + self.period[i]) / 2.0;
            let w = self.position[i] - self.position[i - 1];
            total_area += w * h;
        }
        for p in self.period.iter_mut() {
            *p *= total_count / total_area;
        }
        self.area = vec![0.0; self.period.len()];
        for i in 1..self.period.len() {
            let h = (self.period[i - 1] + self.period[i]) / 2.0;
            let w = self.position[i] - self.position[i - 1];
            self.area[i] = self.area[i - 1] + w * h;
        }
        self.normalized = true;
    }

    /// Integrated phase (in cycles) at progress `time`.
    fn get_p(&self, time: f64) -> f64 {
        if !self.normalized {
            return 0.0;
        }
        let time = time.clamp(0.0, 1.0);
        let index = self.position.partition_point(|&p| p < time);
        if index < self.position.len() && self.position[index] == time {
            return if index > 0 { 1.0 } else { 0.0 };
        }
        let m = (self.period[index] - self.period[index - 1])
            / (self.position[index] - self.position[index - 1]);
        self.area[index - 1]
            + (self.period[index - 1] - m * self.position[index - 1]) * (time - self.position[index - 1])
            + m * (time * time - self.position[index - 1] * self.position[index - 1]) / 2.0
    }

    /// Derivative of the phase function at progress `time`.
    fn get_dp(&self, time: f64) -> f64 {
        if !self.normalized {
            return 0.0;
        }
        let time = time.clamp(0.00001, 0.999999);
        let index = self.position.partition_point(|&p| p < time);
        if index < self.position.len() && self.position[index] == time {
            return 0.0;
        }
        let m = (self.period[index] - self.period[index - 1])
            / (self.position[index] - self.position[index - 1]);
        m * time + (self.period[index - 1] - m * self.position[index - 1])
    }

    pub fn get_value(&self, time: f64, phase: f64) -> f64 {
        let angle = phase + self.get_p(time); // angle is / by 360
        match self.shape {
            WaveShape::Sin => (TAU * angle).sin(),
            WaveShape::Square => (0.5 - angle % 1.0).signum(),
            WaveShape::Triangle => 1.0 - ((angle * 4.0 + 1.0) % 4.0 - 2.0).abs(),
            WaveShape::Saw => (angle * 2.0 + 1.0) % 2.0 - 1.0,
            WaveShape::ReverseSaw => 1.0 - (angle * 2.0 + 1.0) % 2.0,
            WaveShape::Cos => (TAU * angle).cos(),
            WaveShape::Bounce => {
                let x = 1.0 - (angle * 4.0 % 4.0 - 2.0).abs();
                1.0 - x * x
            }
            WaveShape::Custom => match &self.custom_curve {
                Some(curve) => curve.get_pos_channel(angle % 1.0, 0),
                None => (TAU * angle).sin(),
            },
        }
    }

    pub fn get_slope(&self, time: f64, phase: f64, dphase: f64) -> f64 {
        let angle = phase + self.get_p(time);
        let dangle_dtime = self.get_dp(time) + dphase;
        match self.shape {
            WaveShape::Sin => TAU * dangle_dtime * (TAU * angle).cos(),
            WaveShape::Square => 0.0,
            WaveShape::Triangle => {
                4.0 * dangle_dtime * ((angle * 4.0 + 3.0) % 4.0 - 2.0).signum()
            }
            WaveShape::Saw => dangle_dtime * 2.0,
            WaveShape::ReverseSaw => -dangle_dtime * 2.0,
            WaveShape::Cos => -TAU * dangle_dtime * (TAU * angle).sin(),
            WaveShape::Bounce => 4.0 * dangle_dtime * ((angle * 4.0 + 2.0) % 4.0 - 2.0),
            WaveShape::Custom => match &self.custom_curve {
                Some(curve) => dangle_dtime * curve.get_slope_channel(angle % 1.0, 0),
                None => TAU * dangle_dtime * (TAU * angle).cos(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn uniform_period_integrates_linearly() {
        let mut osc = Oscillator::new();
        osc.set_type(WaveShape::Sin, None);
        osc.add_point(0.0, 1.0);
        osc.add_point(1.0, 1.0);
        osc.normalize();
        // two registered unit periods normalize to two cycles over [0,1]
        approx(osc.get_p(0.125), 0.25, 1e-9);
        approx(osc.get_value(0.125, 0.0), 1.0, 1e-6);
        approx(osc.get_value(0.0, 0.0), 0.0, 1e-6);
    }

    #[test]
    fn phase_offset_shifts_the_wave() {
        let mut osc = Oscillator::new();
        osc.set_type(WaveShape::Cos, None);
        osc.add_point(0.0, 1.0);
        osc.add_point(1.0, 1.0);
        osc.normalize();
        approx(osc.get_value(0.0, 0.5), -1.0, 1e-6);
    }

    #[test]
    fn slope_matches_finite_difference() {
        let mut osc = Oscillator::new();
        osc.set_type(WaveShape::Sin, None);
        osc.add_point(0.0, 2.0);
        osc.add_point(1.0, 1.0);
        osc.normalize();
        let t = 0.3;
        let eps = 1e-5;
        let fd = (osc.get_value(t + eps, 0.0) - osc.get_value(t - eps, 0.0)) / (2.0 * eps);
        approx(osc.get_slope(t, 0.0, 0.0), fd, 1e-3);
    }

    #[test]
    fn wave_shape_names_are_the_wire_format() {
        // adapters parse shapes by variant name
        assert_eq!(serde_json::to_string(&WaveShape::Sin).unwrap(), "\"Sin\"");
        assert_eq!(
            serde_json::from_str::<WaveShape>("\"ReverseSaw\"").unwrap(),
            WaveShape::ReverseSaw
        );
    }

    #[test]
    fn custom_wave_samples_are_hit() {
        let mut osc = Oscillator::new();
        osc.set_type(WaveShape::Custom, Some(&[0.0, 1.0, 0.0]));
        osc.add_point(0.0, 1.0);
        osc.add_point(1.0, 1.0);
        osc.normalize();
        // one normalized cycle maps phase 0.5 onto the middle sample;
        // two cycles over [0,1] put phase 0.5 at progress 0.25
        approx(osc.get_value(0.25, 0.0), 1.0, 1e-6);
    }
}
