//! Curve fitting over keyframed channels.
//!
//! A [`CurveFit`] is built once from sorted, deduplicated `(time, values)`
//! samples and then evaluated many times per animation. Variants:
//! - `Constant`: single keyframe, flat value, zero slope.
//! - `Linear`: piecewise linear with endpoint-slope extrapolation.
//! - `Spline`: monotone cubic Hermite (no overshoot between keyframes).
//! - `Arc`: x/y pairs stitched with quarter ellipses.

pub mod arc;
pub mod linear;
pub mod monotonic;

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

pub use arc::{ArcCurve, ArcMode};
pub use linear::LinearCurve;
pub use monotonic::MonotonicCurve;

/// Requested engine for [`CurveFit::new`]. A single keyframe always yields
/// the Constant engine regardless of the requested type.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurveType {
    #[default]
    Spline,
    Linear,
    Constant,
}

/// Single stored vector; position is flat, slope is zero for all `t`.
#[derive(Clone, Debug)]
pub struct ConstantCurve {
    time: f64,
    value: Vec<f64>,
}

impl ConstantCurve {
    fn new(time: f64, value: Vec<f64>) -> Self {
        Self { time, value }
    }
}

#[derive(Clone, Debug)]
pub enum CurveFit {
    Constant(ConstantCurve),
    Linear(LinearCurve),
    Spline(MonotonicCurve),
    Arc(ArcCurve),
}

fn check_dimensions(time: &[f64], values: &[Vec<f64>]) -> Result<usize, MotionError> {
    if time.is_empty() || values.is_empty() {
        return Err(MotionError::NoKeyframes("curve".into()));
    }
    debug_assert_eq!(time.len(), values.len());
    let dim = values[0].len();
    for (index, row) in values.iter().enumerate() {
        if row.len() != dim {
            return Err(MotionError::DimensionMismatch {
                index,
                expected: dim,
                got: row.len(),
            });
        }
    }
    Ok(dim)
}

impl CurveFit {
    /// Select an engine for the given samples. `time` must be sorted
    /// ascending and distinct; rows of `values` share one dimensionality.
    pub fn new(
        curve_type: CurveType,
        time: &[f64],
        values: &[Vec<f64>],
    ) -> Result<Self, MotionError> {
        check_dimensions(time, values)?;
        if time.len() == 1 {
            // not enough points to interpolate; always constant
            return Ok(CurveFit::Constant(ConstantCurve::new(
                time[0],
                values[0].clone(),
            )));
        }
        Ok(match curve_type {
            CurveType::Constant => {
                CurveFit::Constant(ConstantCurve::new(time[0], values[0].clone()))
            }
            CurveType::Linear => CurveFit::Linear(LinearCurve::new(time, values)),
            CurveType::Spline => CurveFit::Spline(MonotonicCurve::new(time, values)),
        })
    }

    /// Arc-aware variant: channels 0 and 1 are an (x, y) pair blended along
    /// quarter ellipses according to the per-segment `modes`.
    pub fn arc(modes: &[ArcMode], time: &[f64], values: &[Vec<f64>]) -> Result<Self, MotionError> {
        let dim = check_dimensions(time, values)?;
        if dim != 2 {
            return Err(MotionError::DimensionMismatch {
                index: 0,
                expected: 2,
                got: dim,
            });
        }
        if time.len() == 1 {
            return Ok(CurveFit::Constant(ConstantCurve::new(
                time[0],
                values[0].clone(),
            )));
        }
        Ok(CurveFit::Arc(ArcCurve::new(modes, time, values)))
    }

    /// Number of interpolated channels.
    pub fn dim(&self) -> usize {
        match self {
            CurveFit::Constant(c) => c.value.len(),
            CurveFit::Linear(c) => c.dim(),
            CurveFit::Spline(c) => c.dim(),
            CurveFit::Arc(_) => 2,
        }
    }

    /// Sorted distinct times the curve was fit over.
    pub fn time_points(&self) -> &[f64] {
        match self {
            CurveFit::Constant(c) => std::slice::from_ref(&c.time),
            CurveFit::Linear(c) => c.time_points(),
            CurveFit::Spline(c) => c.time_points(),
            CurveFit::Arc(c) => c.time_points(),
        }
    }

    /// Fill `v` with every channel at `t`.
    pub fn get_pos(&self, t: f64, v: &mut [f64]) {
        match self {
            CurveFit::Constant(c) => v.copy_from_slice(&c.value),
            CurveFit::Linear(c) => c.get_pos(t, v),
            CurveFit::Spline(c) => c.get_pos(t, v),
            CurveFit::Arc(c) => c.get_pos(t, v),
        }
    }

    /// Float overload of [`CurveFit::get_pos`].
    pub fn get_pos_f32(&self, t: f64, v: &mut [f32]) {
        match self {
            CurveFit::Constant(c) => {
                for (out, value) in v.iter_mut().zip(&c.value) {
                    *out = *value as f32;
                }
            }
            CurveFit::Linear(c) => c.get_pos_f32(t, v),
            CurveFit::Spline(c) => c.get_pos_f32(t, v),
            CurveFit::Arc(c) => c.get_pos_f32(t, v),
        }
    }

    /// One channel at `t`.
    pub fn get_pos_channel(&self, t: f64, j: usize) -> f64 {
        match self {
            CurveFit::Constant(c) => c.value[j],
            CurveFit::Linear(c) => c.get_pos_channel(t, j),
            CurveFit::Spline(c) => c.get_pos_channel(t, j),
            CurveFit::Arc(c) => c.get_pos_channel(t, j),
        }
    }

    /// Fill `v` with the derivative of every channel at `t`.
    pub fn get_slope(&self, t: f64, v: &mut [f64]) {
        match self {
            CurveFit::Constant(_) => v.fill(0.0),
            CurveFit::Linear(c) => c.get_slope(t, v),
            CurveFit::Spline(c) => c.get_slope(t, v),
            CurveFit::Arc(c) => c.get_slope(t, v),
        }
    }

    /// Derivative of one channel at `t`.
    pub fn get_slope_channel(&self, t: f64, j: usize) -> f64 {
        match self {
            CurveFit::Constant(_) => 0.0,
            CurveFit::Linear(c) => c.get_slope_channel(t, j),
            CurveFit::Spline(c) => c.get_slope_channel(t, j),
            CurveFit::Arc(c) => c.get_slope_channel(t, j),
        }
    }
}
