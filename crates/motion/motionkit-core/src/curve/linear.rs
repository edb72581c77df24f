//! Piecewise linear interpolation in multiple dimensions.

#[derive(Clone, Debug)]
pub struct LinearCurve {
    time: Vec<f64>,
    y: Vec<Vec<f64>>,
}

impl LinearCurve {
    /// `time` sorted ascending, at least two entries.
    pub fn new(time: &[f64], values: &[Vec<f64>]) -> Self {
        Self {
            time: time.to_vec(),
            y: values.to_vec(),
        }
    }

    pub fn dim(&self) -> usize {
        self.y[0].len()
    }

    pub fn time_points(&self) -> &[f64] {
        &self.time
    }

    /// Segment index whose [time[i], time[i+1]] range covers `t` (clamped).
    #[inline]
    fn segment(&self, t: f64) -> usize {
        let n = self.time.len();
        for i in 0..n - 1 {
            if t <= self.time[i + 1] {
                return i;
            }
        }
        n - 2
    }

    pub fn get_pos(&self, t: f64, v: &mut [f64]) {
        let n = self.time.len();
        let dim = self.dim();
        // linear curves extrapolate at their (constant) endpoint slope,
        // which is the same as extending the end segments
        let i = if t <= self.time[0] {
            0
        } else if t >= self.time[n - 1] {
            n - 2
        } else {
            self.segment(t)
        };
        let h = self.time[i + 1] - self.time[i];
        let x = (t - self.time[i]) / h;
        for j in 0..dim {
            v[j] = self.y[i][j] * (1.0 - x) + self.y[i + 1][j] * x;
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
        let i = if t <= self.time[0] {
            0
        } else if t >= self.time[n - 1] {
            n - 2
        } else {
            self.segment(t)
        };
        let h = self.time[i + 1] - self.time[i];
        let x = (t - self.time[i]) / h;
        self.y[i][j] * (1.0 - x) + self.y[i + 1][j] * x
    }

    pub fn get_slope(&self, t: f64, v: &mut [f64]) {
        let n = self.time.len();
        let t = t.clamp(self.time[0], self.time[n - 1]);
        let i = self.segment(t);
        let h = self.time[i + 1] - self.time[i];
        for j in 0..self.dim() {
            v[j] = (self.y[i + 1][j] - self.y[i][j]) / h;
        }
    }

    pub fn get_slope_channel(&self, t: f64, j: usize) -> f64 {
        let n = self.time.len();
        let t = t.clamp(self.time[0], self.time[n - 1]);
        let i = self.segment(t);
        let h = self.time[i + 1] - self.time[i];
        (self.y[i + 1][j] - self.y[i][j]) / h
    }
}
