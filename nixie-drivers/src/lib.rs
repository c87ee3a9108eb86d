//! Hardware-facing pieces for nixie displays
//!
//! This crate provides concrete implementations around nixie-core:
//!
//! - [`PinBank`]: cathode pins on plain embedded-hal GPIO outputs
//! - [`sim`]: simulated expander and clock for host tests and demos
//! - [`SharedDisplay`]: one display shared between a clock loop and a
//!   protection worker

#![no_std]
#![deny(unsafe_code)]

pub mod pin_bank;
pub mod shared;
pub mod sim;

pub use pin_bank::{BankError, PinBank};
pub use shared::SharedDisplay;
pub use sim::{SimClock, SimError, SimExpander};
