//! Test doubles for the display surface

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use nixie_hal::{Level, PinId, PinWriter};

/// Writer recording every write
///
/// Fails on `fail_pin`, or on every write once `fail_after` writes have
/// succeeded.
pub struct MockWriter {
    pub writes: Vec<(PinId, Level), 2048>,
    pub fail_pin: Option<PinId>,
    pub fail_after: Option<usize>,
}

impl MockWriter {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            fail_pin: None,
            fail_after: None,
        }
    }

    pub fn take(&mut self) -> Vec<(PinId, Level), 2048> {
        core::mem::take(&mut self.writes)
    }

    pub fn highs(&self) -> Vec<PinId, 2048> {
        self.writes
            .iter()
            .filter(|(_, level)| level.is_high())
            .map(|(pin, _)| *pin)
            .collect()
    }
}

impl PinWriter for MockWriter {
    type Error = ();

    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), ()> {
        if self.fail_pin == Some(pin) {
            return Err(());
        }
        if let Some(limit) = self.fail_after {
            if self.writes.len() >= limit {
                return Err(());
            }
        }
        self.writes.push((pin, level)).map_err(|_| ())
    }
}

/// Delay accumulating requested time
#[derive(Default)]
pub struct MockDelay {
    pub elapsed_ms: u64,
    pub calls: usize,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ms += (ns / 1_000_000) as u64;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += ms as u64;
        self.calls += 1;
    }
}
