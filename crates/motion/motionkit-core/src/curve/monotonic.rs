//! Monotone cubic Hermite interpolation in multiple dimensions.
//!
//! Tangents are averaged segment slopes with Fritsch–Carlson limiting, so
//! the interpolant never overshoots between two keyframes whose sampled
//! values are monotone. Outside the keyframe range the curve extrapolates
//! linearly using the endpoint slope.

#[derive(Clone, Debug)]
pub struct MonotonicCurve {
    time: Vec<f64>,
    y: Vec<Vec<f64>>,
    tangent: Vec<Vec<f64>>,
}

/// Cubic Hermite spline on a segment of width `h`, local parameter `x` in
/// [0, 1], endpoint values `y1`, `y2` and endpoint tangents `t1`, `t2`.
#[inline]
fn interpolate(h: f64, x: f64, y1: f64, y2: f64, t1: f64, t2: f64) -> f64 {
    let x2 = x * x;
    let x3 = x2 * x;
    -2.0 * x3 * y2 + 3.0 * x2 * y2 + 2.0 * x3 * y1 - 3.0 * x2 * y1 + y1
        + h * t2 * x3
        + h * t1 * x3
        - h * t2 * x2
        - 2.0 * h * t1 * x2
        + h * t1 * x
}

/// Derivative of [`interpolate`] with respect to `x` (caller divides by `h`
/// to get the slope in curve time).
#[inline]
fn diff(h: f64, x: f64, y1: f64, y2: f64, t1: f64, t2: f64) -> f64 {
    let x2 = x * x;
    -6.0 * x2 * y2 + 6.0 * x * y2 + 6.0 * x2 * y1 - 6.0 * x * y1
        + 3.0 * h * t2 * x2
        + 3.0 * h * t1 * x2
        - 2.0 * h * t2 * x
        - 4.0 * h * t1 * x
        + h * t1
}

impl MonotonicCurve {
    /// `time` must be sorted ascending with at least two distinct entries;
    /// rows of `values` share one dimensionality (validated by the caller).
    pub fn new(time: &[f64], values: &[Vec<f64>]) -> Self {
        let n = time.len();
        let dim = values[0].len();
        let mut slope = vec![vec![0.0f64; dim]; n - 1];
        let mut tangent = vec![vec![0.0f64; dim]; n];
        for j in 0..dim {
            for i in 0..n - 1 {
                let dt = time[i + 1] - time[i];
                slope[i][j] = (values[i + 1][j] - values[i][j]) / dt;
                tangent[i][j] = if i == 0 {
                    slope[i][j]
                } else {
                    (slope[i - 1][j] + slope[i][j]) * 0.5
                };
            }
            tangent[n - 1][j] = slope[n - 2][j];
        }
        // Fritsch-Carlson limiting keeps each segment monotone.
        for i in 0..n - 1 {
            for j in 0..dim {
                if slope[i][j] == 0.0 {
                    tangent[i][j] = 0.0;
                    tangent[i + 1][j] = 0.0;
                } else {
                    let a = tangent[i][j] / slope[i][j];
                    let b = tangent[i + 1][j] / slope[i][j];
                    let h = a.hypot(b);
                    if h > 3.0 {
                        let t = 3.0 / h;
                        tangent[i][j] = t * a * slope[i][j];
                        tangent[i + 1][j] = t * b * slope[i][j];
                    }
                }
            }
        }
        Self {
            time: time.to_vec(),
            y: values.to_vec(),
            tangent,
        }
    }

    pub fn dim(&self) -> usize {
        self.y[0].len()
    }

    pub fn time_points(&self) -> &[f64] {
        &self.time
    }

    pub fn get_pos(&self, t: f64, v: &mut [f64]) {
        let n = self.time.len();
        let dim = self.dim();
        if t <= self.time[0] {
            let mut slope = vec![0.0f64; dim];
            self.get_slope(self.time[0], &mut slope);
            for j in 0..dim {
                v[j] = self.y[0][j] + (t - self.time[0]) * slope[j];
            }
            return;
        }
        if t >= self.time[n - 1] {
            let mut slope = vec![0.0f64; dim];
            self.get_slope(self.time[n - 1], &mut slope);
            for j in 0..dim {
                v[j] = self.y[n - 1][j] + (t - self.time[n - 1]) * slope[j];
            }
            return;
        }
        for i in 0..n - 1 {
            if t < self.time[i + 1] {
                let h = self.time[i + 1] - self.time[i];
                let x = (t - self.time[i]) / h;
                for j in 0..dim {
                    v[j] = interpolate(
                        h,
                        x,
                        self.y[i][j],
                        self.y[i + 1][j],
                        self.tangent[i][j],
                        self.tangent[i + 1][j],
                    );
                }
                return;
            }
        }
    }

    pub fn get_pos_f32(&self, t: f64, v: &mut [f32]) {
        let mut tmp = vec![0.0f64; self.dim()];
        self.get_pos(t, &mut tmp);
        for (out, value) in v.iter_mut().zip(&tmp) {
            *out = *value as f32;
        }
    }

    pub fn get_pos_channel(&self, t: f64, j: usize) -> f64 {
        let n = self.time.len();
        if t <= self.time[0] {
            return self.y[0][j] + (t - self.time[0]) * self.get_slope_channel(self.time[0], j);
        }
        if t >= self.time[n - 1] {
            return self.y[n - 1][j]
                + (t - self.time[n - 1]) * self.get_slope_channel(self.time[n - 1], j);
        }
        for i in 0..n - 1 {
            if t == self.time[i] {
                return self.y[i][j];
            }
            if t < self.time[i + 1] {
                let h = self.time[i + 1] - self.time[i];
                let x = (t - self.time[i]) / h;
                return interpolate(
                    h,
                    x,
                    self.y[i][j],
                    self.y[i + 1][j],
                    self.tangent[i][j],
                    self.tangent[i + 1][j],
                );
            }
        }
        0.0
    }

    pub fn get_slope(&self, t: f64, v: &mut [f64]) {
        let n = self.time.len();
        let dim = self.dim();
        let t = t.clamp(self.time[0], self.time[n - 1]);
        for i in 0..n - 1 {
            if t <= self.time[i + 1] {
                let h = self.time[i + 1] - self.time[i];
                let x = (t - self.time[i]) / h;
                for j in 0..dim {
                    v[j] = diff(
                        h,
                        x,
                        self.y[i][j],
                        self.y[i + 1][j],
                        self.tangent[i][j],
                        self.tangent[i + 1][j],
                    ) / h;
                }
                return;
            }
        }
    }

    pub fn get_slope_channel(&self, t: f64, j: usize) -> f64 {
        let n = self.time.len();
        let t = t.clamp(self.time[0], self.time[n - 1]);
        for i in 0..n - 1 {
            if t <= self.time[i + 1] {
                let h = self.time[i + 1] - self.time[i];
                let x = (t - self.time[i]) / h;
                return diff(
                    h,
                    x,
                    self.y[i][j],
                    self.y[i + 1][j],
                    self.tangent[i][j],
                    self.tangent[i + 1][j],
                ) / h;
            }
        }
        0.0
    }
}
