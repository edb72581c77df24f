//! Arc curve fitting: an (x, y) path stitched together with quarter
//! ellipses. Each segment carries a constant-speed lookup table so motion
//! along the arc has uniform velocity in `t`.

use serde::{Deserialize, Serialize};

const EPSILON: f64 = 0.001;
const LUT_SIZE: usize = 101;
const PERCENT_SIZE: usize = 91;

/// Per-segment arc behavior. `Flip` alternates the sweep direction chosen
/// by the previous vertical/horizontal start.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ArcMode {
    #[default]
    StartLinear,
    StartVertical,
    StartHorizontal,
    Flip,
    Below,
    Above,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Sweep {
    Vertical,
    Horizontal,
    Linear,
    Up,
    Down,
}

#[derive(Clone, Debug)]
struct Arc {
    lut: Vec<f64>,
    arc_distance: f64,
    time1: f64,
    time2: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    one_over_delta_time: f64,
    ellipse_a: f64,
    ellipse_b: f64,
    ellipse_center_x: f64,
    ellipse_center_y: f64,
    arc_velocity: f64,
    vertical: bool,
    linear: bool,
}

impl Arc {
    fn new(sweep: Sweep, t1: f64, t2: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let vertical = match sweep {
            Sweep::Vertical => true,
            Sweep::Up => dy < 0.0,
            Sweep::Down => dy > 0.0,
            _ => false,
        };
        let one_over_delta_time = 1.0 / (t2 - t1);
        let mut arc = Self {
            lut: Vec::new(),
            arc_distance: 0.0,
            time1: t1,
            time2: t2,
            x1,
            y1,
            x2,
            y2,
            one_over_delta_time,
            ellipse_a: f64::NAN,
            ellipse_b: f64::NAN,
            ellipse_center_x: 0.0,
            ellipse_center_y: 0.0,
            arc_velocity: 0.0,
            vertical,
            linear: false,
        };
        if sweep == Sweep::Linear || dx.abs() < EPSILON || dy.abs() < EPSILON {
            arc.linear = true;
            arc.arc_distance = dy.hypot(dx);
            arc.arc_velocity = arc.arc_distance * one_over_delta_time;
            // the unused ellipse center caches the segment slope
            arc.ellipse_center_x = dx * one_over_delta_time;
            arc.ellipse_center_y = dy * one_over_delta_time;
        } else {
            arc.ellipse_a = dx * if vertical { -1.0 } else { 1.0 };
            arc.ellipse_b = dy * if vertical { 1.0 } else { -1.0 };
            arc.ellipse_center_x = if vertical { x2 } else { x1 };
            arc.ellipse_center_y = if vertical { y1 } else { y2 };
            arc.build_table();
            arc.arc_velocity = arc.arc_distance * one_over_delta_time;
        }
        arc
    }

    /// Angle on the quarter ellipse at `time`, constant-speed corrected.
    fn angle(&self, time: f64) -> f64 {
        let percent = if self.vertical {
            (self.time2 - time) * self.one_over_delta_time
        } else {
            (time - self.time1) * self.one_over_delta_time
        };
        std::f64::consts::FRAC_PI_2 * self.lookup(percent)
    }

    fn calc(&self, time: f64) -> (f64, f64) {
        let a = self.angle(time);
        (
            self.ellipse_center_x + self.ellipse_a * a.sin(),
            self.ellipse_center_y + self.ellipse_b * a.cos(),
        )
    }

    fn calc_derivative(&self, time: f64) -> (f64, f64) {
        let a = self.angle(time);
        let vx = self.ellipse_a * a.cos();
        let vy = -self.ellipse_b * a.sin();
        let norm = self.arc_velocity / vx.hypot(vy);
        if self.vertical {
            (-vx * norm, -vy * norm)
        } else {
            (vx * norm, vy * norm)
        }
    }

    fn linear_pos(&self, t: f64) -> (f64, f64) {
        let x = (t - self.time1) * self.one_over_delta_time;
        (
            self.x1 + x * (self.x2 - self.x1),
            self.y1 + x * (self.y2 - self.y1),
        )
    }

    fn linear_derivative(&self) -> (f64, f64) {
        (self.ellipse_center_x, self.ellipse_center_y)
    }

    fn pos(&self, t: f64) -> (f64, f64) {
        if self.linear {
            self.linear_pos(t)
        } else {
            self.calc(t)
        }
    }

    fn derivative(&self, t: f64) -> (f64, f64) {
        if self.linear {
            self.linear_derivative()
        } else {
            self.calc_derivative(t)
        }
    }

    fn lookup(&self, v: f64) -> f64 {
        if v <= 0.0 {
            return 0.0;
        }
        if v >= 1.0 {
            return 1.0;
        }
        let pos = v * (self.lut.len() - 1) as f64;
        let iv = pos as usize;
        let off = pos - iv as f64;
        self.lut[iv] + off * (self.lut[iv + 1] - self.lut[iv])
    }

    fn build_table(&mut self) {
        let a = self.x2 - self.x1;
        let b = self.y1 - self.y2;
        let mut percent = [0.0f64; PERCENT_SIZE];
        let mut lx = 0.0;
        let mut ly = 0.0;
        let mut dist = 0.0;
        for (i, entry) in percent.iter_mut().enumerate() {
            let angle = (90.0 * i as f64 / (PERCENT_SIZE - 1) as f64).to_radians();
            let px = a * angle.sin();
            let py = b * angle.cos();
            if i > 0 {
                dist += (px - lx).hypot(py - ly);
                *entry = dist;
            }
            lx = px;
            ly = py;
        }
        self.arc_distance = dist;
        for entry in percent.iter_mut() {
            *entry /= dist;
        }
        self.lut = vec![0.0; LUT_SIZE];
        for i in 0..LUT_SIZE {
            let pos = i as f64 / (LUT_SIZE - 1) as f64;
            // first entry at or above pos
            let p2 = percent.partition_point(|&x| x < pos);
            self.lut[i] = if p2 == 0 {
                0.0
            } else if p2 >= PERCENT_SIZE {
                1.0
            } else if percent[p2] == pos {
                p2 as f64 / (PERCENT_SIZE - 1) as f64
            } else {
                let p1 = p2 - 1;
                (p1 as f64 + (pos - percent[p1]) / (percent[p2] - percent[p1]))
                    / (PERCENT_SIZE - 1) as f64
            };
        }
    }
}

#[derive(Clone, Debug)]
pub struct ArcCurve {
    time: Vec<f64>,
    arcs: Vec<Arc>,
}

impl ArcCurve {
    /// `time` sorted ascending with at least two entries; `values` rows are
    /// (x, y) pairs; `modes` selects the sweep per segment (the last mode is
    /// reused when the slice runs short).
    pub fn new(modes: &[ArcMode], time: &[f64], values: &[Vec<f64>]) -> Self {
        let mut arcs = Vec::with_capacity(time.len() - 1);
        let mut last = Sweep::Vertical;
        for i in 0..time.len() - 1 {
            let mode = modes.get(i).or(modes.last()).copied().unwrap_or_default();
            let sweep = match mode {
                ArcMode::StartVertical => {
                    last = Sweep::Vertical;
                    last
                }
                ArcMode::StartHorizontal => {
                    last = Sweep::Horizontal;
                    last
                }
                ArcMode::Flip => {
                    last = if last == Sweep::Vertical {
                        Sweep::Horizontal
                    } else {
                        Sweep::Vertical
                    };
                    last
                }
                ArcMode::StartLinear => Sweep::Linear,
                ArcMode::Above => Sweep::Up,
                ArcMode::Below => Sweep::Down,
            };
            arcs.push(Arc::new(
                sweep,
                time[i],
                time[i + 1],
                values[i][0],
                values[i][1],
                values[i + 1][0],
                values[i + 1][1],
            ));
        }
        Self {
            time: time.to_vec(),
            arcs,
        }
    }

    pub fn time_points(&self) -> &[f64] {
        &self.time
    }

    fn first(&self) -> &Arc {
        &self.arcs[0]
    }

    fn last(&self) -> &Arc {
        &self.arcs[self.arcs.len() - 1]
    }

    pub fn get_pos(&self, t: f64, v: &mut [f64]) {
        if t < self.first().time1 {
            let t0 = self.first().time1;
            let dt = t - t0;
            let (x, y) = self.first().pos(t0);
            let (dx, dy) = self.first().derivative(t0);
            v[0] = x + dt * dx;
            v[1] = y + dt * dy;
            return;
        }
        if t > self.last().time2 {
            let t0 = self.last().time2;
            let dt = t - t0;
            let (x, y) = self.last().pos(t0);
            let (dx, dy) = self.last().derivative(t0);
            v[0] = x + dt * dx;
            v[1] = y + dt * dy;
            return;
        }
        for arc in &self.arcs {
            if t <= arc.time2 {
                let (x, y) = arc.pos(t);
                v[0] = x;
                v[1] = y;
                return;
            }
        }
    }

    pub fn get_pos_f32(&self, t: f64, v: &mut [f32]) {
        let mut tmp = [0.0f64; 2];
        self.get_pos(t, &mut tmp);
        v[0] = tmp[0] as f32;
        v[1] = tmp[1] as f32;
    }

    pub fn get_pos_channel(&self, t: f64, j: usize) -> f64 {
        let mut tmp = [0.0f64; 2];
        self.get_pos(t, &mut tmp);
        tmp[j]
    }

    pub fn get_slope(&self, t: f64, v: &mut [f64]) {
        let t = t.clamp(self.first().time1, self.last().time2);
        for arc in &self.arcs {
            if t <= arc.time2 {
                let (dx, dy) = arc.derivative(t);
                v[0] = dx;
                v[1] = dy;
                return;
            }
        }
    }

    pub fn get_slope_channel(&self, t: f64, j: usize) -> f64 {
        let mut tmp = [0.0f64; 2];
        self.get_slope(t, &mut tmp);
        tmp[j]
    }
}
