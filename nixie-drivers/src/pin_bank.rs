//! GPIO pin bank
//!
//! Cathode drivers wired straight to MCU pins (one GPIO per cathode through
//! a high-voltage transistor). Pin ids `base..base + N` map onto the bank in
//! order, so several banks can sit side by side in one pin numbering.

use embedded_hal::digital::{OutputPin, PinState};
use nixie_hal::{Level, PinId, PinWriter};

/// Pin bank errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankError {
    /// Pin id outside this bank
    UnknownPin(PinId),
    /// The GPIO rejected the write
    Pin(PinId),
}

/// `N` output pins addressed from `base`
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
    base: PinId,
}

impl<P: OutputPin, const N: usize> PinBank<P, N> {
    /// Create a bank answering to pin ids `base..base + N`
    pub fn new(pins: [P; N], base: PinId) -> Self {
        Self { pins, base }
    }

    /// First pin id of the bank
    pub fn base(&self) -> PinId {
        self.base
    }

    /// Check if the bank owns `pin`
    pub fn contains(&self, pin: PinId) -> bool {
        self.index(pin).is_some()
    }

    /// Give back the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn index(&self, pin: PinId) -> Option<usize> {
        let index = pin.checked_sub(self.base)? as usize;
        (index < N).then_some(index)
    }
}

impl<P: OutputPin, const N: usize> PinWriter for PinBank<P, N> {
    type Error = BankError;

    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), BankError> {
        let index = self.index(pin).ok_or(BankError::UnknownPin(pin))?;
        let state = if level.is_high() {
            PinState::High
        } else {
            PinState::Low
        };

        self.pins[index].set_state(state).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("GPIO write failed on pin {}", pin);
            BankError::Pin(pin)
        })
    }
}
