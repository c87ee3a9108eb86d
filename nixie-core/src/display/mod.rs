//! Display surface and digit buffer

pub mod buffer;
pub mod surface;

#[cfg(test)]
pub(crate) mod mock;

pub use buffer::{DigitBuffer, MAX_VALUE};
pub use surface::{NixieDisplay, TEST_PATTERN};
