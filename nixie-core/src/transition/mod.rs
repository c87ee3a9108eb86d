//! Digit transitions
//!
//! Maps digits to cathode pins and turns a digit change on one tube into a
//! timed sequence of pin writes (refresh, instant, crossfade, scrollback).

pub mod engine;
pub mod pinmap;
pub mod steps;

pub use engine::{drive, Effects, TransitionRequest, TransitionStyle};
pub use pinmap::PinMap;
pub use steps::{
    PinWrite, Step, TransitionSteps, CROSSFADE_CYCLE_MS, CROSSFADE_STEPS, SCROLLBACK_DWELL_MS,
};
