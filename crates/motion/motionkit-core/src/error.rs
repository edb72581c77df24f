//! Error taxonomy for the motion engine.
//!
//! Every failure here is a caller bug in the keyframe-resolution or gesture
//! layer, surfaced immediately: a silently wrong motion value is a visible
//! correctness bug, not a transient condition. There are no retry semantics;
//! a corrected input on the next frame produces a corrected output.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    /// setup() was called with zero accumulated keyframes.
    #[error("no keyframes were added before setup of '{0}'")]
    NoKeyframes(String),

    /// Keyframe value vectors within one curve must share dimensionality.
    #[error("keyframe {index} has {got} channels, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// Evaluation was attempted before setup()/config() completed.
    #[error("evaluated before setup completed")]
    NotSetup,

    /// Spring integration requires positive mass and stiffness.
    #[error("spring parameters must be positive (mass={mass}, stiffness={stiffness})")]
    DegenerateSpring { mass: f32, stiffness: f32 },
}
