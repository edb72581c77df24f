//! Single-scalar-property curve: accumulate keyframes, sort, dedup, fit.

use crate::config::Config;
use crate::curve::{CurveFit, CurveType};
use crate::error::MotionError;

/// Keyframe positions are integers 0..=100 (normalized progress x100).
/// Points may arrive in any order and with duplicate positions; `setup`
/// sorts them and keeps the first-seen value per position.
#[derive(Debug, Default)]
pub struct SplineSet {
    curve_fit: Option<CurveFit>,
    positions: Vec<i32>,
    values: Vec<f32>,
}

impl SplineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: &Config) -> Self {
        Self {
            curve_fit: None,
            positions: Vec::with_capacity(cfg.keyframe_capacity),
            values: Vec::with_capacity(cfg.keyframe_capacity),
        }
    }

    pub fn set_point(&mut self, position: i32, value: f32) {
        self.positions.push(position);
        self.values.push(value);
    }

    /// Sort, dedup (first occurrence wins) and fit. Positions map to curve
    /// time as `position * 1e-2`.
    pub fn setup(&mut self, curve_type: CurveType) -> Result<(), MotionError> {
        if self.positions.is_empty() {
            return Err(MotionError::NoKeyframes("spline set".into()));
        }
        let (time, values) = sort_and_dedup(&self.positions, &self.values, 1);
        self.curve_fit = Some(CurveFit::new(curve_type, &time, &values)?);
        Ok(())
    }

    pub fn get(&self, t: f32) -> Result<f32, MotionError> {
        let curve = self.curve_fit.as_ref().ok_or(MotionError::NotSetup)?;
        Ok(curve.get_pos_channel(t as f64, 0) as f32)
    }

    pub fn get_slope(&self, t: f32) -> Result<f32, MotionError> {
        let curve = self.curve_fit.as_ref().ok_or(MotionError::NotSetup)?;
        Ok(curve.get_slope_channel(t as f64, 0) as f32)
    }

    pub fn curve_fit(&self) -> Option<&CurveFit> {
        self.curve_fit.as_ref()
    }
}

/// Shared sort/dedup for parallel (position, channels) keyframe arrays.
/// `values` holds `channels` floats per position, row-major. The stable sort
/// guarantees the first-inserted value survives a duplicate position.
pub(crate) fn sort_and_dedup(
    positions: &[i32],
    values: &[f32],
    channels: usize,
) -> (Vec<f64>, Vec<Vec<f64>>) {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by_key(|&i| positions[i]);

    let mut time = Vec::with_capacity(positions.len());
    let mut rows = Vec::with_capacity(positions.len());
    let mut last: Option<i32> = None;
    for &i in &order {
        if last == Some(positions[i]) {
            continue;
        }
        last = Some(positions[i]);
        time.push(positions[i] as f64 * 1e-2);
        rows.push(
            values[i * channels..(i + 1) * channels]
                .iter()
                .map(|&v| v as f64)
                .collect(),
        );
    }
    (time, rows)
}
