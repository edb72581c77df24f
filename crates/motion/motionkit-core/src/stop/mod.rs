//! Settle-to-stop simulation for fling/gesture driven transitions.
//!
//! Two engines share one contract: a kinematic trapezoidal-velocity profile
//! and a mass-spring-damper ODE. [`StopLogic`] fronts them with a small
//! state machine; the owning driver polls `get_interpolation` once per frame
//! with an absolute, monotonically increasing clock until `is_stopped()`.

pub mod kinematic;
pub mod spring;

use crate::error::MotionError;

pub use kinematic::KinematicStopEngine;
pub use spring::SpringStopEngine;

/// Contract shared by all settle engines. `time` is an absolute clock
/// starting at 0 when the engine is configured, not a per-frame delta.
pub trait StopEngine {
    /// Multi-line description of the engine state at `time`, for logs.
    fn debug(&self, desc: &str, time: f32) -> String;

    /// Velocity the simulation would report at clock `x`.
    fn get_velocity_at(&self, x: f32) -> f32;

    /// Most recent simulated velocity.
    fn get_velocity(&self) -> f32;

    /// Position at clock `time`; advances internal state.
    fn get_interpolation(&mut self, time: f32) -> f32;

    fn is_stopped(&self) -> bool;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Active {
    #[default]
    Unconfigured,
    Kinematic,
    Spring,
}

/// Routes evaluation calls to whichever engine the last `config` /
/// `spring_config` selected. A fresh gesture reconfigures in place; there is
/// no other way back out of a configured state.
#[derive(Debug, Default)]
pub struct StopLogic {
    kinematic: KinematicStopEngine,
    spring: Option<SpringStopEngine>,
    active: Active,
}

impl StopLogic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Velocity-continuous deceleration profile reaching `destination` at
    /// velocity 0 within the given bounds.
    pub fn config(
        &mut self,
        current_pos: f32,
        destination: f32,
        current_velocity: f32,
        max_time: f32,
        max_acceleration: f32,
        max_velocity: f32,
    ) {
        self.kinematic.config(
            current_pos,
            destination,
            current_velocity,
            max_time,
            max_acceleration,
            max_velocity,
        );
        self.active = Active::Kinematic;
    }

    /// Mass-spring-damper settle toward `target`. The spring engine is
    /// constructed lazily on first use.
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
        let spring = self.spring.get_or_insert_with(SpringStopEngine::new);
        spring.spring_config(
            current_pos,
            target,
            current_velocity,
            mass,
            stiffness,
            damping,
            stop_threshold,
            boundary_mode,
        )?;
        self.active = Active::Spring;
        Ok(())
    }

    fn engine(&self) -> Option<&dyn StopEngine> {
        match self.active {
            Active::Unconfigured => None,
            Active::Kinematic => Some(&self.kinematic as &dyn StopEngine),
            Active::Spring => self.spring.as_ref().map(|s| s as &dyn StopEngine),
        }
    }

    pub fn get_interpolation(&mut self, time: f32) -> Result<f32, MotionError> {
        match self.active {
            Active::Unconfigured => Err(MotionError::NotSetup),
            Active::Kinematic => Ok(self.kinematic.get_interpolation(time)),
            Active::Spring => {
                let spring = self.spring.as_mut().ok_or(MotionError::NotSetup)?;
                Ok(spring.get_interpolation(time))
            }
        }
    }

    pub fn get_velocity(&self) -> f32 {
        self.engine().map_or(0.0, |e| e.get_velocity())
    }

    pub fn get_velocity_at(&self, x: f32) -> f32 {
        self.engine().map_or(0.0, |e| e.get_velocity_at(x))
    }

    /// True once the active engine has settled; also true while
    /// unconfigured, since there is nothing left to run.
    pub fn is_stopped(&self) -> bool {
        self.engine().map_or(true, |e| e.is_stopped())
    }

    pub fn debug(&self, desc: &str, time: f32) -> String {
        self.engine()
            .map_or_else(|| format!("{desc} unconfigured"), |e| e.debug(desc, time))
    }
}
