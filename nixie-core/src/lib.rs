//! Board-agnostic core logic for nixie tube displays
//!
//! This crate contains all display logic that does not depend on a
//! specific board:
//!
//! - Display configuration (tube wiring, active window)
//! - Pin mapping and digit transition effects
//! - The display surface with its committed digit buffer
//! - Cathode poisoning protection routine and schedule
//!
//! Hardware is reached through [`nixie_hal::PinWriter`] for cathode pins and
//! [`embedded_hal::delay::DelayNs`] for effect timing.

#![no_std]
#![deny(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod display;
pub mod error;
pub mod protection;
pub mod time;
pub mod transition;

pub use cancel::CancelToken;
pub use config::{ConfigError, DisplayConfig, TubeWiring, MAX_TUBES};
pub use display::{DigitBuffer, NixieDisplay};
pub use error::DisplayError;
pub use protection::{ProtectionRequest, ProtectionSchedule, ProtectionStyle};
pub use time::WallTime;
pub use transition::{Effects, PinMap, Step, TransitionRequest, TransitionStyle};

pub use nixie_hal::{Level, PinId, PinWriter};
