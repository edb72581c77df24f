//! Kinematic settle engine: a bounded trapezoidal/triangular velocity
//! profile reaching the destination at velocity 0.
//!
//! `config` plans up to three linear-velocity stages and `get_interpolation`
//! integrates them. An initial velocity pointing away from the destination
//! gets a braking stage first; an initial velocity too fast to stop within
//! the remaining distance is brought down harder than `max_acceleration`
//! rather than overshooting.

use crate::stop::StopEngine;

const EPSILON: f32 = 0.00001;

/// One constant-acceleration stage of the profile, in coordinates
/// normalized so travel toward the destination is positive.
#[derive(Copy, Clone, Debug, Default)]
struct Stage {
    start_v: f32,
    end_v: f32,
    duration: f32,
    /// Distance covered from the start of the profile through this stage.
    end_pos: f32,
}

#[derive(Debug, Default)]
pub struct KinematicStopEngine {
    stages: [Stage; 3],
    number_of_stages: usize,
    profile: &'static str,
    start_position: f32,
    backwards: bool,
    done: bool,
    last_position: f32,
    last_velocity: f32,
}

impl KinematicStopEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan a profile from `current_pos` to `destination`. The initial
    /// speed toward the destination must not exceed `max_velocity`.
    pub fn config(
        &mut self,
        current_pos: f32,
        destination: f32,
        current_velocity: f32,
        max_time: f32,
        max_acceleration: f32,
        max_velocity: f32,
    ) {
        self.done = false;
        self.start_position = current_pos;
        self.backwards = current_pos > destination;
        self.last_position = 0.0;
        self.last_velocity = 0.0;
        let velocity = if self.backwards {
            -current_velocity
        } else {
            current_velocity
        };
        let distance = (destination - current_pos).abs();
        self.plan(velocity, distance, max_acceleration, max_velocity, max_time);
        log::debug!("stop profile: {}", self.profile);
    }

    fn plan(
        &mut self,
        mut velocity: f32,
        distance: f32,
        max_acceleration: f32,
        max_velocity: f32,
        max_time: f32,
    ) {
        if velocity == 0.0 {
            velocity = 0.0001;
        }
        if velocity < 0.0 {
            // moving away from the destination: brake to rest first, which
            // lengthens the distance the forward profile must cover
            let time_to_zero = -velocity / max_acceleration;
            let reverse_distance = time_to_zero * velocity / 2.0;
            let total_distance = distance - reverse_distance;
            let peak = (max_acceleration * total_distance).sqrt();
            if peak < max_velocity {
                self.profile = "backward accelerate, decelerate";
                self.number_of_stages = 2;
                let d1 = (peak - velocity) / max_acceleration;
                self.stages[0] = Stage {
                    start_v: velocity,
                    end_v: peak,
                    duration: d1,
                    end_pos: (velocity + peak) * d1 / 2.0,
                };
                self.stages[1] = Stage {
                    start_v: peak,
                    end_v: 0.0,
                    duration: peak / max_acceleration,
                    end_pos: distance,
                };
                return;
            }
            self.profile = "backward accelerate, cruise, decelerate";
            self.number_of_stages = 3;
            let d1 = (max_velocity - velocity) / max_acceleration;
            let d3 = max_velocity / max_acceleration;
            let acc_dist = (velocity + max_velocity) * d1 / 2.0;
            let dec_dist = max_velocity * d3 / 2.0;
            self.stages[0] = Stage {
                start_v: velocity,
                end_v: max_velocity,
                duration: d1,
                end_pos: acc_dist,
            };
            self.stages[1] = Stage {
                start_v: max_velocity,
                end_v: max_velocity,
                duration: (distance - acc_dist - dec_dist) / max_velocity,
                end_pos: distance - dec_dist,
            };
            self.stages[2] = Stage {
                start_v: max_velocity,
                end_v: 0.0,
                duration: d3,
                end_pos: distance,
            };
            return;
        }

        let min_time_to_stop = velocity / max_acceleration;
        let stop_distance = min_time_to_stop * velocity / 2.0;
        if stop_distance >= distance {
            // too fast to stop within the distance under max_acceleration;
            // brake harder and land exactly on the destination
            self.profile = "hard stop";
            self.number_of_stages = 1;
            self.stages[0] = Stage {
                start_v: velocity,
                end_v: 0.0,
                duration: 2.0 * distance / velocity,
                end_pos: distance,
            };
            return;
        }

        let distance_before_brake = distance - stop_distance;
        let cruise_time = distance_before_brake / velocity;
        if cruise_time + min_time_to_stop < max_time {
            // time allows just maintaining velocity, then stopping
            self.profile = "cruise, decelerate";
            self.number_of_stages = 2;
            self.stages[0] = Stage {
                start_v: velocity,
                end_v: velocity,
                duration: cruise_time,
                end_pos: distance_before_brake,
            };
            self.stages[1] = Stage {
                start_v: velocity,
                end_v: 0.0,
                duration: min_time_to_stop,
                end_pos: distance,
            };
            return;
        }

        let peak = (max_acceleration * distance + velocity * velocity / 2.0).sqrt();
        if peak < max_velocity {
            self.profile = "accelerate, decelerate";
            self.number_of_stages = 2;
            let d1 = (peak - velocity) / max_acceleration;
            self.stages[0] = Stage {
                start_v: velocity,
                end_v: peak,
                duration: d1,
                end_pos: (velocity + peak) * d1 / 2.0,
            };
            self.stages[1] = Stage {
                start_v: peak,
                end_v: 0.0,
                duration: peak / max_acceleration,
                end_pos: distance,
            };
            return;
        }

        self.profile = "accelerate, cruise, decelerate";
        self.number_of_stages = 3;
        let d1 = (max_velocity - velocity) / max_acceleration;
        let d3 = max_velocity / max_acceleration;
        let acc_dist = (velocity + max_velocity) * d1 / 2.0;
        let dec_dist = max_velocity * d3 / 2.0;
        self.stages[0] = Stage {
            start_v: velocity,
            end_v: max_velocity,
            duration: d1,
            end_pos: acc_dist,
        };
        self.stages[1] = Stage {
            start_v: max_velocity,
            end_v: max_velocity,
            duration: (distance - acc_dist - dec_dist) / max_velocity,
            end_pos: distance - dec_dist,
        };
        self.stages[2] = Stage {
            start_v: max_velocity,
            end_v: 0.0,
            duration: d3,
            end_pos: distance,
        };
    }

    /// (position, velocity) of the forward-normalized profile at `time`.
    fn profile_at(&self, time: f32) -> (f32, f32, bool) {
        let mut t = time;
        let mut start_pos = 0.0;
        for stage in self.stages.iter().take(self.number_of_stages) {
            if t < stage.duration {
                let a = (stage.end_v - stage.start_v) / stage.duration;
                let v = stage.start_v + a * t;
                let pos = start_pos + stage.start_v * t + a * t * t / 2.0;
                return (pos, v, false);
            }
            t -= stage.duration;
            start_pos = stage.end_pos;
        }
        (start_pos, 0.0, true)
    }

    fn total_distance(&self) -> f32 {
        if self.number_of_stages == 0 {
            0.0
        } else {
            self.stages[self.number_of_stages - 1].end_pos
        }
    }
}

impl StopEngine for KinematicStopEngine {
    fn debug(&self, desc: &str, time: f32) -> String {
        let (pos, v, done) = self.profile_at(time);
        let mut ret = format!("{desc} ===== {}\n", self.profile);
        ret += &format!(
            "{desc} {} time = {time} stages {}\n",
            if self.backwards { "backwards" } else { "forward" },
            self.number_of_stages
        );
        for (i, stage) in self.stages.iter().take(self.number_of_stages).enumerate() {
            ret += &format!(
                "{desc} stage{n} dur {dur} vel {v0} -> {v1} pos {p}\n",
                n = i + 1,
                dur = stage.duration,
                v0 = stage.start_v,
                v1 = stage.end_v,
                p = stage.end_pos
            );
        }
        ret += &format!("{desc} pos = {pos} vel = {v} done = {done}");
        ret
    }

    fn get_velocity_at(&self, x: f32) -> f32 {
        self.profile_at(x).1
    }

    fn get_velocity(&self) -> f32 {
        self.last_velocity
    }

    fn get_interpolation(&mut self, time: f32) -> f32 {
        let (pos, v, done) = self.profile_at(time);
        self.last_position = pos;
        self.last_velocity = v;
        if done {
            self.done = true;
        }
        self.start_position + if self.backwards { -pos } else { pos }
    }

    fn is_stopped(&self) -> bool {
        self.done
            || (self.get_velocity() < EPSILON
                && (self.total_distance() - self.last_position).abs() < EPSILON)
    }
}
