//! Per-tube cathode wiring

use heapless::FnvIndexSet;
use nixie_hal::PinId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cathodes per tube (digits 0-9)
pub const DIGITS_PER_TUBE: usize = 10;

/// Expander pins of one tube, indexed by digit
///
/// `pins[d]` is the pin that lights digit `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeWiring {
    /// Pin per digit
    pub pins: [PinId; DIGITS_PER_TUBE],
}

impl TubeWiring {
    /// Create a wiring table from a digit-indexed pin array
    pub const fn new(pins: [PinId; DIGITS_PER_TUBE]) -> Self {
        Self { pins }
    }

    /// Wiring where digit `d` sits on pin `base + d`
    pub const fn sequential(base: PinId) -> Self {
        let mut pins = [0; DIGITS_PER_TUBE];
        let mut d = 0;
        while d < DIGITS_PER_TUBE {
            pins[d] = base.wrapping_add(d as u8);
            d += 1;
        }
        Self { pins }
    }

    /// Pin for a digit, or None if the digit is not 0-9
    pub fn pin(&self, digit: u8) -> Option<PinId> {
        self.pins.get(digit as usize).copied()
    }

    /// First pin that appears twice in this table, if any
    pub fn duplicate_pin(&self) -> Option<PinId> {
        let mut seen: FnvIndexSet<PinId, 16> = FnvIndexSet::new();
        for &pin in &self.pins {
            // Capacity 16 always fits 10 distinct pins
            if let Ok(false) = seen.insert(pin) {
                return Some(pin);
            }
        }
        None
    }
}

impl Default for TubeWiring {
    fn default() -> Self {
        Self::sequential(0)
    }
}
