//! Simulated expander and clock
//!
//! Deterministic stand-ins for the I/O expander and the delay provider.
//! The expander keeps the level of every pin and a short write history;
//! the clock only adds up the time it was asked to sleep.

use embedded_hal::delay::DelayNs;
use heapless::HistoryBuffer;
use nixie_core::TubeWiring;
use nixie_hal::{Level, PinId, PinWriter};

/// Writes kept in the expander history
pub const HISTORY_LEN: usize = 64;

/// Simulated expander errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// Pin id beyond the expander
    OutOfRange(PinId),
    /// Failure injected with [`SimExpander::fail_on`]
    Injected(PinId),
}

/// Expander with `N` output pins
pub struct SimExpander<const N: usize> {
    levels: [Level; N],
    writes: u32,
    history: HistoryBuffer<(PinId, Level), HISTORY_LEN>,
    fail_pin: Option<PinId>,
}

impl<const N: usize> Default for SimExpander<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SimExpander<N> {
    /// Create an expander with every pin low
    pub fn new() -> Self {
        Self {
            levels: [Level::Low; N],
            writes: 0,
            history: HistoryBuffer::new(),
            fail_pin: None,
        }
    }

    /// Make every later write to `pin` fail (None to heal)
    pub fn fail_on(&mut self, pin: Option<PinId>) {
        self.fail_pin = pin;
    }

    /// Level of a pin (Low if out of range)
    pub fn level(&self, pin: PinId) -> Level {
        self.levels.get(pin as usize).copied().unwrap_or_default()
    }

    /// Successful writes since creation or the last [`reset_counters`]
    ///
    /// [`reset_counters`]: Self::reset_counters
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Most recent writes, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(PinId, Level)> {
        self.history.oldest_ordered()
    }

    /// Forget write counts and history, keep pin levels
    pub fn reset_counters(&mut self) {
        self.writes = 0;
        self.history.clear();
    }

    /// Number of lit cathodes of a tube
    pub fn lit_count(&self, wiring: &TubeWiring) -> usize {
        wiring
            .pins
            .iter()
            .filter(|&&pin| self.level(pin).is_high())
            .count()
    }

    /// Digit a tube shows, or None if it is dark or shows several
    pub fn shown_digit(&self, wiring: &TubeWiring) -> Option<u8> {
        if self.lit_count(wiring) != 1 {
            return None;
        }
        wiring
            .pins
            .iter()
            .position(|&pin| self.level(pin).is_high())
            .map(|digit| digit as u8)
    }
}

impl<const N: usize> PinWriter for SimExpander<N> {
    type Error = SimError;

    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), SimError> {
        if self.fail_pin == Some(pin) {
            return Err(SimError::Injected(pin));
        }
        let slot = self
            .levels
            .get_mut(pin as usize)
            .ok_or(SimError::OutOfRange(pin))?;

        *slot = level;
        self.writes = self.writes.wrapping_add(1);
        self.history.write((pin, level));
        Ok(())
    }
}

/// Clock counting requested sleep time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    elapsed_ns: u64,
}

impl SimClock {
    /// Create a clock at zero
    pub const fn new() -> Self {
        Self { elapsed_ns: 0 }
    }

    /// Total slept time (ms)
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    /// Total slept time (ns)
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// Back to zero
    pub fn reset(&mut self) {
        self.elapsed_ns = 0;
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += ms as u64 * 1_000_000;
    }
}
