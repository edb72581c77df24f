//! motionkit-core (engine-agnostic)
//!
//! Per-frame motion interpolation: monotone/linear/arc curve fitting over
//! keyframes, cyclic waveform oscillation, and simulated settle-to-stop
//! trajectories. The owning motion system supplies resolved keyframes and a
//! time or progress value each frame; this crate hands back scalars/vectors.
//!
//! Single-threaded, call-per-frame model: curves are immutable after
//! `setup()`, per-frame state (oscillation phase, stop-engine integration)
//! must stay confined to the thread driving the animation, and successive
//! evaluation calls for one animated object must supply non-decreasing
//! time/progress.

pub mod config;
pub mod curve;
pub mod cycle;
pub mod error;
pub mod ids;
pub mod key_cache;
pub mod oscillator;
pub mod spline_set;
pub mod stop;
pub mod time_cycle;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use curve::{ArcMode, CurveFit, CurveType};
pub use cycle::{KeyCycleOscillator, VariesBy};
pub use error::MotionError;
pub use ids::{IdAllocator, OwnerId};
pub use key_cache::KeyCache;
pub use oscillator::{Oscillator, WaveShape};
pub use spline_set::SplineSet;
pub use stop::{KinematicStopEngine, SpringStopEngine, StopEngine, StopLogic};
pub use time_cycle::TimeCycleSplineSet;
