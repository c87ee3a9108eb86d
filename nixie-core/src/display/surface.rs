//! Nixie display surface
//!
//! Owns the digit buffer and the hardware handles, and turns values and
//! times into per-tube transitions.
//!
//! # Usage
//!
//! ```ignore
//! let mut display = NixieDisplay::new(config, expander, delay)?;
//! display.init()?;
//!
//! // Firmware loop, every 250 ms:
//! display.write_time(now.hour, now.minute, now.second)?;
//! ```

use embedded_hal::delay::DelayNs;
use nixie_hal::PinWriter;

use super::buffer::DigitBuffer;
use crate::config::{ConfigError, DisplayConfig, MAX_TUBES};
use crate::error::DisplayError;
use crate::time::WallTime;
use crate::transition::{drive, Effects, PinMap, TransitionRequest};

/// Pattern written by [`NixieDisplay::init`]
pub const TEST_PATTERN: u32 = 999_999;

/// Which active tubes a write drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TubeSelection {
    /// Every active tube, unchanged ones get a refresh
    All,
    /// Only tubes whose digit changed
    Changed,
    /// One tube by index
    Single(u8),
}

/// Multi-tube nixie display
///
/// Single owner of the display state. Every operation blocks until the
/// hardware has been driven (including effect timing) or an error is known.
pub struct NixieDisplay<W, D> {
    config: DisplayConfig,
    map: PinMap,
    effects: Effects,
    buffer: DigitBuffer,
    writer: W,
    delay: D,
}

impl<W: PinWriter, D: DelayNs> NixieDisplay<W, D> {
    /// Create a display
    ///
    /// Nothing is written to the hardware until the first operation.
    pub fn new(config: DisplayConfig, writer: W, delay: D) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            map: PinMap::new(&config),
            effects: Effects {
                crossfade: config.crossfade,
                scrollback: config.scrollback,
            },
            buffer: DigitBuffer::default(),
            config,
            writer,
            delay,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Get the pin map
    pub fn pin_map(&self) -> &PinMap {
        &self.map
    }

    /// Get the digit buffer
    pub fn buffer(&self) -> &DigitBuffer {
        &self.buffer
    }

    /// Committed digits of the active window, leftmost tube first
    pub fn digits(&self) -> &[u8] {
        let start = self.config.window_start();
        &self.buffer.previous()[start..start + self.config.active as usize]
    }

    /// All six committed digits, including slots outside the window
    pub fn previous_digits(&self) -> &[u8; MAX_TUBES] {
        self.buffer.previous()
    }

    /// Get access to the pin writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Get mutable access to the pin writer
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get access to the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the hardware handles
    pub fn release(self) -> (W, D) {
        (self.writer, self.delay)
    }

    /// Currently enabled effects
    pub fn effects(&self) -> Effects {
        self.effects
    }

    /// Replace both effect flags
    pub fn set_effects(&mut self, effects: Effects) {
        self.effects = effects;
    }

    /// Enable or disable crossfade, effective on the next write
    pub fn set_crossfade(&mut self, enabled: bool) {
        self.effects.crossfade = enabled;
    }

    /// Enable or disable scrollback, effective on the next write
    pub fn set_scrollback(&mut self, enabled: bool) {
        self.effects.scrollback = enabled;
    }

    /// Blank the display, then light the all-nines test pattern
    ///
    /// Every active tube gets written, so a missing expander shows up here
    /// instead of on the first clock update.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.clear()?;
        self.write(TEST_PATTERN)
    }

    /// Show a number (0-999999)
    ///
    /// Every active tube is driven, tubes whose digit did not change get a
    /// refresh write.
    pub fn write(&mut self, value: u32) -> Result<(), DisplayError> {
        let digits = DigitBuffer::decompose(value).ok_or(DisplayError::InvalidParameter)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("write {}", value);

        self.apply(digits, TubeSelection::All)
    }

    /// Show a time of day as `HHMMSS`
    ///
    /// Only tubes whose digit changed are driven. This keeps the once-per-
    /// second clock update to one or two tubes.
    pub fn write_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), DisplayError> {
        let time = WallTime::new(hour, minute, second).ok_or(DisplayError::InvalidParameter)?;
        self.write_wall_time(time)
    }

    /// Show an already validated time of day
    pub fn write_wall_time(&mut self, time: WallTime) -> Result<(), DisplayError> {
        self.apply(time.digits(), TubeSelection::Changed)
    }

    /// Set one tube (1 = leftmost active tube) to a digit
    ///
    /// The other tubes are left alone; the whole buffer is committed.
    pub fn write_single_tube(&mut self, tube: u8, digit: u8) -> Result<(), DisplayError> {
        if tube == 0 || tube > self.config.active || digit > 9 {
            return Err(DisplayError::InvalidParameter);
        }

        let index = tube - 1;
        let mut digits = *self.buffer.previous();
        digits[self.config.slot(index as usize)] = digit;

        self.apply(digits, TubeSelection::Single(index))
    }

    /// Drive every cathode of every active tube low
    ///
    /// The digit buffer is not touched, a later `write` re-lights the tubes.
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        for tube in 0..self.config.active {
            let wiring = *self.map.wiring(tube)?;
            for pin in wiring.pins {
                if self.writer.set_low(pin).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Clear failed: tube {} pin {}", tube, pin);
                    return Err(DisplayError::Internal { tube, pin });
                }
            }
        }
        Ok(())
    }

    /// Blank the display and return the buffer to its power-on state
    pub fn shutdown(&mut self) -> Result<(), DisplayError> {
        self.clear()?;
        self.buffer.reset();
        Ok(())
    }

    /// Sleep on the display's delay provider
    pub(crate) fn pause_ms(&mut self, ms: u32) {
        if ms > 0 {
            self.delay.delay_ms(ms);
        }
    }

    /// Stage digits, drive the selected tubes, then commit or roll back
    pub(crate) fn apply(
        &mut self,
        digits: [u8; MAX_TUBES],
        selection: TubeSelection,
    ) -> Result<(), DisplayError> {
        self.buffer.stage(digits);

        for tube in 0..self.config.active {
            let slot = self.config.slot(tube as usize);
            let current = self.buffer.current()[slot];
            let previous = self.buffer.previous()[slot];

            let selected = match selection {
                TubeSelection::All => true,
                TubeSelection::Changed => current != previous,
                TubeSelection::Single(index) => index == tube,
            };
            if !selected {
                continue;
            }

            if let Err(err) = self.drive_tube(tube, current, previous) {
                self.buffer.rollback();
                return Err(err.into_internal());
            }
        }

        self.buffer.commit();
        Ok(())
    }

    fn drive_tube(&mut self, tube: u8, current: u8, previous: u8) -> Result<(), DisplayError> {
        let request = TransitionRequest::new(&self.map, tube, current, previous, self.effects)?;
        drive(&request, &self.map, &mut self.writer, &mut self.delay)
    }
}
