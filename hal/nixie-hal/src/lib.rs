//! Nixie Hardware Abstraction Layer
//!
//! This crate defines the hardware capability the display core needs from a
//! board: driving a single cathode pin high or low. Boards implement it on
//! top of whatever actually switches the cathodes (I2C GPIO expanders, shift
//! registers, direct MCU pins).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware loop (clock, counter, ...)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-core (display, effects)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  I2C expander │       │  nixie-drivers│
//! │  (board code) │       │   pin bank    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinWriter`] - Cathode pin output

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

// Re-export key items at crate root for convenience
pub use gpio::{Level, PinId, PinWriter};
