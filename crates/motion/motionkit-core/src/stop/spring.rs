//! Mass-spring-damper settle engine.

use crate::error::MotionError;
use crate::stop::StopEngine;

/// Reflect the trajectory at the low (0) boundary.
pub const BOUNDARY_LOW: u8 = 1;
/// Reflect the trajectory at the high (1) boundary.
pub const BOUNDARY_HIGH: u8 = 2;

/// Simulates a damped spring pulling the position toward a target value.
/// State is mutated on every `get_interpolation` call; the clock passed in
/// must be non-decreasing.
#[derive(Debug, Default)]
pub struct SpringStopEngine {
    damping: f64,
    stiffness: f64,
    mass: f64,
    target: f64,
    pos: f64,
    v: f64,
    stop_threshold: f64,
    boundary_mode: u8,
    last_time: f32,
}

impl SpringStopEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the simulation for a new gesture. Fails fast on a
    /// non-positive mass or stiffness, which would otherwise integrate to
    /// NaN/Infinity.
    #[allow(clippy::too_many_arguments)]
    pub fn spring_config(
        &mut self,
        current_pos: f32,
        target: f32,
        current_velocity: f32,
        mass: f32,
        stiffness: f32,
        damping: f32,
        stop_threshold: f32,
        boundary_mode: u8,
    ) -> Result<(), MotionError> {
        if mass <= 0.0 || stiffness <= 0.0 {
            return Err(MotionError::DegenerateSpring { mass, stiffness });
        }
        log::debug!(
            "spring config: pos={current_pos} target={target} v={current_velocity} \
             k={stiffness} c={damping} m={mass}"
        );
        self.target = target as f64;
        self.pos = current_pos as f64;
        self.v = current_velocity as f64;
        self.mass = mass as f64;
        self.stiffness = stiffness as f64;
        self.damping = damping as f64;
        self.stop_threshold = stop_threshold as f64;
        self.boundary_mode = boundary_mode;
        self.last_time = 0.0;
        Ok(())
    }
}

impl StopEngine for SpringStopEngine {
    fn debug(&self, desc: &str, time: f32) -> String {
        format!(
            "{desc} ===== spring\n\
             {desc} time = {time} pos = {pos} vel = {v} target = {target}\n\
             {desc} k = {k} c = {c} m = {m} threshold = {threshold}",
            pos = self.pos,
            v = self.v,
            target = self.target,
            k = self.stiffness,
            c = self.damping,
            m = self.mass,
            threshold = self.stop_threshold,
        )
    }

    fn get_velocity_at(&self, _x: f32) -> f32 {
        self.v as f32
    }

    fn get_velocity(&self) -> f32 {
        self.v as f32
    }

    fn get_interpolation(&mut self, time: f32) -> f32 {
        let dt = (time - self.last_time) as f64;
        // two-stage update: half the velocity step is applied before the
        // position step, which damps the integration error of plain Euler
        let a = (-self.stiffness * (self.pos - self.target) - self.damping * self.v) / self.mass;
        let dv = a * dt;
        let avg_v = self.v + dv / 2.0;
        self.v += dv / 2.0;
        self.pos += avg_v * dt;
        if self.boundary_mode > 0 {
            // reflection conserves speed, only the signs change
            if self.pos < 0.0 && (self.boundary_mode & BOUNDARY_LOW) != 0 {
                self.pos = -self.pos;
                self.v = -self.v;
            }
            if self.pos > 1.0 && (self.boundary_mode & BOUNDARY_HIGH) != 0 {
                self.pos = 2.0 - self.pos;
                self.v = -self.v;
            }
        }
        self.last_time = time;
        self.pos as f32
    }

    fn is_stopped(&self) -> bool {
        let x = self.pos - self.target;
        // relative threshold quantity, not physically normalized energy
        let energy = self.v * self.v * self.mass + self.stiffness * x * x;
        let max_deflection = (energy / self.stiffness).sqrt();
        max_deflection <= self.stop_threshold
    }
}
