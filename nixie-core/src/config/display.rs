//! Display configuration
//!
//! Fixed at construction: which tubes are wired, how their cathodes map to
//! expander pins, and which slots of the 6-digit buffer they show.

use nixie_hal::PinId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::wiring::TubeWiring;

/// Digit slots in the display buffer (and maximum wired tubes)
pub const MAX_TUBES: usize = 6;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Active tube count is zero
    NoTubes,
    /// Active tube count above [`MAX_TUBES`]
    TooManyTubes(u8),
    /// Active window does not fit in the buffer
    WindowOutOfRange {
        /// Active tube count
        active: u8,
        /// Requested offset
        offset: u8,
    },
    /// Same pin used for two digits of one tube
    DuplicatePin {
        /// Tube index
        tube: u8,
        /// Repeated pin
        pin: PinId,
    },
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Number of wired tubes (1-6)
    pub active: u8,
    /// Right shift of the shown number, in digits
    ///
    /// With offset 0 the tubes show the least significant `active` digits.
    /// Each step of offset drops one more low digit.
    pub offset: u8,
    /// Wiring per tube, leftmost tube first
    pub wiring: [TubeWiring; MAX_TUBES],
    /// Crossfade between digits at startup
    pub crossfade: bool,
    /// Scroll back through digits when falling to zero at startup
    pub scrollback: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            active: MAX_TUBES as u8,
            offset: 0,
            wiring: [
                TubeWiring::sequential(0),
                TubeWiring::sequential(10),
                TubeWiring::sequential(20),
                TubeWiring::sequential(30),
                TubeWiring::sequential(40),
                TubeWiring::sequential(50),
            ],
            crossfade: true,
            scrollback: true,
        }
    }
}

impl DisplayConfig {
    /// Create a configuration with both effects enabled
    pub fn new(active: u8, offset: u8, wiring: [TubeWiring; MAX_TUBES]) -> Self {
        Self {
            active,
            offset,
            wiring,
            crossfade: true,
            scrollback: true,
        }
    }

    /// Set the startup crossfade flag
    pub fn with_crossfade(mut self, enabled: bool) -> Self {
        self.crossfade = enabled;
        self
    }

    /// Set the startup scrollback flag
    pub fn with_scrollback(mut self, enabled: bool) -> Self {
        self.scrollback = enabled;
        self
    }

    /// Validate the configuration
    ///
    /// Only the wiring of active tubes is checked; unused tables are never
    /// driven.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.active == 0 {
            return Err(ConfigError::NoTubes);
        }
        if self.active as usize > MAX_TUBES {
            return Err(ConfigError::TooManyTubes(self.active));
        }
        if self.active as usize + self.offset as usize > MAX_TUBES {
            return Err(ConfigError::WindowOutOfRange {
                active: self.active,
                offset: self.offset,
            });
        }

        for (tube, wiring) in self.wiring.iter().take(self.active as usize).enumerate() {
            if let Some(pin) = wiring.duplicate_pin() {
                return Err(ConfigError::DuplicatePin {
                    tube: tube as u8,
                    pin,
                });
            }
        }

        Ok(())
    }

    /// Buffer slot shown by the leftmost active tube
    pub fn window_start(&self) -> usize {
        MAX_TUBES.saturating_sub(self.active as usize + self.offset as usize)
    }

    /// Buffer slot shown by active tube `tube`
    pub fn slot(&self, tube: usize) -> usize {
        self.window_start() + tube
    }
}
