//! Cathode pin abstractions
//!
//! Every cathode of every tube is wired to one numbered output. The display
//! core only ever asks for "pin N high" or "pin N low"; how that reaches the
//! hardware is up to the implementation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical pin identifier on the output expander
pub type PinId = u8;

/// Output level of a cathode pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Cathode off
    #[default]
    Low,
    /// Cathode lit
    High,
}

impl Level {
    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if this is the low level
    pub const fn is_low(self) -> bool {
        !self.is_high()
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Numbered cathode output
///
/// A write either lands on the hardware or returns an error. There are no
/// retries at this level; callers decide what a failed write means.
pub trait PinWriter {
    /// Error type for pin writes
    type Error;

    /// Drive `pin` to `level`
    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error>;

    /// Drive `pin` high (cathode lit)
    fn set_high(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.write_pin(pin, Level::High)
    }

    /// Drive `pin` low (cathode off)
    fn set_low(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.write_pin(pin, Level::Low)
    }
}

// Lets callers lend a writer to a display without giving it away
impl<T: PinWriter + ?Sized> PinWriter for &mut T {
    type Error = T::Error;

    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        T::write_pin(self, pin, level)
    }
}
