//! Progress-driven cyclic perturbation of a keyframed attribute.
//!
//! The analogue of [`crate::time_cycle::TimeCycleSplineSet`] without a wall
//! clock: phase comes from integrating per-keyframe periods over progress
//! (see [`Oscillator`]), and (offset, phase, value) are themselves splined
//! over position.

use serde::{Deserialize, Serialize};

use crate::curve::{CurveFit, CurveType};
use crate::error::MotionError;
use crate::oscillator::{Oscillator, WaveShape};

const OFFSET: usize = 0;
const PHASE: usize = 1;
const VALUE: usize = 2;

/// How the oscillator parameterizes phase. Only progress-driven cycles are
/// implemented; path-length parameterization needs a path-length
/// accumulator collaborator and is an extension point.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum VariesBy {
    #[default]
    Progress,
    PathLength,
}

#[derive(Clone, Debug)]
struct WavePoint {
    position: i32,
    value: f32,
    offset: f32,
    period: f32,
    phase: f32,
}

#[derive(Debug, Default)]
pub struct KeyCycleOscillator {
    cycle: Option<CycleOscillator>,
    wave_points: Vec<WavePoint>,
    wave_shape: WaveShape,
    custom_wave: Option<Vec<f32>>,
    varies_by: VariesBy,
}

impl KeyCycleOscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one oscillator wave point. `custom` supplies the sample list
    /// when `shape` is [`WaveShape::Custom`]; `varies_by` is sticky once any
    /// keyframe sets it.
    #[allow(clippy::too_many_arguments)]
    pub fn set_point(
        &mut self,
        position: i32,
        shape: WaveShape,
        custom: Option<&[f32]>,
        varies_by: Option<VariesBy>,
        period: f32,
        offset: f32,
        phase: f32,
        value: f32,
    ) {
        self.wave_points.push(WavePoint {
            position,
            value,
            offset,
            period,
            phase,
        });
        if let Some(varies_by) = varies_by {
            self.varies_by = varies_by;
        }
        // the highest value shape is chosen
        self.wave_shape = self.wave_shape.max(shape);
        if let Some(samples) = custom {
            self.custom_wave = Some(samples.to_vec());
        }
    }

    pub fn varies_by_path(&self) -> bool {
        self.varies_by == VariesBy::PathLength
    }

    pub fn setup(&mut self, path_length: f32) -> Result<(), MotionError> {
        if self.wave_points.is_empty() {
            return Err(MotionError::NoKeyframes("key cycle".into()));
        }
        // stable sort + first-seen-wins dedup; a repeated position would
        // give the curve fit a zero-width segment
        self.wave_points.sort_by_key(|wp| wp.position);
        self.wave_points.dedup_by_key(|wp| wp.position);
        let mut cycle = CycleOscillator::new(
            self.wave_shape,
            self.custom_wave.as_deref(),
            self.wave_points.len(),
        );
        for (i, wp) in self.wave_points.iter().enumerate() {
            cycle.set_point(i, wp.position, wp.period, wp.offset, wp.phase, wp.value);
        }
        cycle.setup(path_length)?;
        self.cycle = Some(cycle);
        Ok(())
    }

    pub fn get(&self, t: f32) -> Result<f32, MotionError> {
        let cycle = self.cycle.as_ref().ok_or(MotionError::NotSetup)?;
        Ok(cycle.get_values(t) as f32)
    }

    pub fn get_slope(&self, t: f32) -> Result<f32, MotionError> {
        let cycle = self.cycle.as_ref().ok_or(MotionError::NotSetup)?;
        Ok(cycle.get_slope(t) as f32)
    }
}

/// The computation core: per-point (offset, phase, value) channels splined
/// over position, combined with the oscillator's integrated phase.
#[derive(Debug)]
struct CycleOscillator {
    oscillator: Oscillator,
    positions: Vec<f64>,
    periods: Vec<f32>,
    offsets: Vec<f32>,
    phases: Vec<f32>,
    values: Vec<f32>,
    curve_fit: Option<CurveFit>,
    path_length: f32,
}

impl CycleOscillator {
    fn new(shape: WaveShape, custom: Option<&[f32]>, steps: usize) -> Self {
        let mut oscillator = Oscillator::new();
        oscillator.set_type(shape, custom);
        Self {
            oscillator,
            positions: vec![0.0; steps],
            periods: vec![0.0; steps],
            offsets: vec![0.0; steps],
            phases: vec![0.0; steps],
            values: vec![0.0; steps],
            curve_fit: None,
            path_length: 0.0,
        }
    }

    fn set_point(
        &mut self,
        index: usize,
        frame_position: i32,
        period: f32,
        offset: f32,
        phase: f32,
        value: f32,
    ) {
        self.positions[index] = frame_position as f64 / 100.0;
        self.periods[index] = period;
        self.offsets[index] = offset;
        self.phases[index] = phase;
        self.values[index] = value;
    }

    fn setup(&mut self, path_length: f32) -> Result<(), MotionError> {
        self.path_length = path_length;
        // extrapolate the period to the ends of the progress range
        if self.positions[0] > 0.0 {
            self.oscillator.add_point(0.0, self.periods[0] as f64);
        }
        let last = self.positions.len() - 1;
        if self.positions[last] < 1.0 {
            self.oscillator.add_point(1.0, self.periods[last] as f64);
        }
        let mut spline_values = Vec::with_capacity(self.positions.len());
        for i in 0..self.positions.len() {
            let mut row = vec![0.0f64; 3];
            row[OFFSET] = self.offsets[i] as f64;
            row[PHASE] = self.phases[i] as f64;
            row[VALUE] = self.values[i] as f64;
            spline_values.push(row);
            self.oscillator
                .add_point(self.positions[i], self.periods[i] as f64);
        }
        self.oscillator.normalize();
        self.curve_fit = if self.positions.len() > 1 {
            Some(CurveFit::new(
                CurveType::Spline,
                &self.positions,
                &spline_values,
            )?)
        } else {
            // only one value, no need to interpolate
            None
        };
        Ok(())
    }

    fn channels(&self, time: f32) -> [f64; 3] {
        match &self.curve_fit {
            Some(curve) => {
                let mut v = [0.0f64; 3];
                curve.get_pos(time as f64, &mut v);
                v
            }
            None => [
                self.offsets[0] as f64,
                self.phases[0] as f64,
                self.values[0] as f64,
            ],
        }
    }

    fn get_values(&self, time: f32) -> f64 {
        let v = self.channels(time);
        let wave_value = self.oscillator.get_value(time as f64, v[PHASE]);
        v[OFFSET] + wave_value * v[VALUE]
    }

    fn get_slope(&self, time: f32) -> f64 {
        let v = self.channels(time);
        let dv = match &self.curve_fit {
            Some(curve) => {
                let mut s = [0.0f64; 3];
                curve.get_slope(time as f64, &mut s);
                s
            }
            None => [0.0; 3],
        };
        let wave_value = self.oscillator.get_value(time as f64, v[PHASE]);
        let wave_slope = self.oscillator.get_slope(time as f64, v[PHASE], dv[PHASE]);
        dv[OFFSET] + wave_value * dv[VALUE] + wave_slope * v[VALUE]
    }
}
