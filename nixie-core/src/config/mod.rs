//! Configuration types
//!
//! Board wiring and display window, supplied by the firmware at startup.

pub mod display;
pub mod wiring;

pub use display::*;
pub use wiring::*;
