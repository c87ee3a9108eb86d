//! Timed pin steps generated for a transition
//!
//! Steps are computed on demand from the style and the tube wiring, so a
//! transition never needs a buffer. Cloning a [`TransitionSteps`] (or
//! calling [`TransitionSteps::restart`]) replays the same sequence, which is
//! how tests inspect an effect without driving hardware.

use nixie_hal::{Level, PinId};

use super::engine::TransitionStyle;
use crate::config::TubeWiring;

/// Full crossfade cycle in milliseconds
pub const CROSSFADE_CYCLE_MS: u32 = 20;

/// Overlap steps in a crossfade (duty 0.2 to 0.8 in tenths)
pub const CROSSFADE_STEPS: u8 = 7;

/// First crossfade duty, in tenths of a cycle
const CROSSFADE_FIRST_DUTY: u32 = 2;

/// Time each intermediate digit is lit during scrollback
pub const SCROLLBACK_DWELL_MS: u32 = CROSSFADE_CYCLE_MS;

/// One pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinWrite {
    /// Target pin
    pub pin: PinId,
    /// Level to drive
    pub level: Level,
}

impl PinWrite {
    /// Drive `pin` high
    pub const fn high(pin: PinId) -> Self {
        Self {
            pin,
            level: Level::High,
        }
    }

    /// Drive `pin` low
    pub const fn low(pin: PinId) -> Self {
        Self {
            pin,
            level: Level::Low,
        }
    }
}

/// One timed hardware action
///
/// `first` is written, then `second` (if any), then the output is held for
/// `hold_ms` before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// First write
    pub first: PinWrite,
    /// Optional second write, issued right after the first
    pub second: Option<PinWrite>,
    /// Hold after the writes (ms)
    pub hold_ms: u32,
}

impl Step {
    const fn single(first: PinWrite, hold_ms: u32) -> Self {
        Self {
            first,
            second: None,
            hold_ms,
        }
    }

    const fn pair(first: PinWrite, second: PinWrite, hold_ms: u32) -> Self {
        Self {
            first,
            second: Some(second),
            hold_ms,
        }
    }

    /// Pin writes of this step, in order
    pub fn writes(self) -> impl Iterator<Item = PinWrite> {
        core::iter::once(self.first).chain(self.second)
    }
}

/// Lazy step sequence of one tube transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSteps {
    style: TransitionStyle,
    wiring: TubeWiring,
    previous: u8,
    current: u8,
    index: u8,
}

impl TransitionSteps {
    /// Create the sequence for already validated digits
    pub(crate) fn new(
        style: TransitionStyle,
        wiring: TubeWiring,
        previous: u8,
        current: u8,
    ) -> Self {
        Self {
            style,
            wiring,
            previous,
            current,
            index: 0,
        }
    }

    /// Transition style being played
    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    /// Total number of steps, independent of progress
    pub fn total(&self) -> usize {
        match self.style {
            TransitionStyle::Refresh | TransitionStyle::Instant => 1,
            TransitionStyle::Crossfade => CROSSFADE_STEPS as usize * 2,
            TransitionStyle::Scrollback => self.previous as usize + 2,
        }
    }

    /// Total hold time of the whole sequence (ms)
    pub fn total_hold_ms(&self) -> u32 {
        let mut replay = self.clone();
        replay.restart();
        replay.map(|step| step.hold_ms).sum()
    }

    /// Rewind to the first step
    pub fn restart(&mut self) {
        self.index = 0;
    }

    fn pin(&self, digit: u8) -> PinId {
        self.wiring.pins[digit as usize]
    }

    fn step_at(&self, index: usize) -> Option<Step> {
        if index >= self.total() {
            return None;
        }

        let new_pin = self.pin(self.current);
        let old_pin = self.pin(self.previous);

        let step = match self.style {
            TransitionStyle::Refresh => Step::single(PinWrite::high(new_pin), 0),
            TransitionStyle::Instant => {
                Step::pair(PinWrite::high(new_pin), PinWrite::low(old_pin), 0)
            }
            TransitionStyle::Crossfade => {
                let duty = CROSSFADE_FIRST_DUTY + (index / 2) as u32;
                if index % 2 == 0 {
                    // Old digit phase
                    Step::pair(
                        PinWrite::low(new_pin),
                        PinWrite::high(old_pin),
                        CROSSFADE_CYCLE_MS * (10 - duty) / 10,
                    )
                } else {
                    // New digit phase
                    Step::pair(
                        PinWrite::high(new_pin),
                        PinWrite::low(old_pin),
                        CROSSFADE_CYCLE_MS * duty / 10,
                    )
                }
            }
            TransitionStyle::Scrollback => {
                let last = self.previous as usize + 1;
                if index == 0 {
                    Step::single(PinWrite::low(old_pin), 0)
                } else if index == 1 {
                    Step::single(PinWrite::high(old_pin), SCROLLBACK_DWELL_MS)
                } else if index < last {
                    // Walk one digit down
                    let lit = self.previous - (index as u8 - 2);
                    Step::pair(
                        PinWrite::low(self.pin(lit)),
                        PinWrite::high(self.pin(lit - 1)),
                        SCROLLBACK_DWELL_MS,
                    )
                } else {
                    Step::pair(PinWrite::low(self.pin(1)), PinWrite::high(new_pin), 0)
                }
            }
        };

        Some(step)
    }
}

impl Iterator for TransitionSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = self.step_at(self.index as usize)?;
        self.index += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.index as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TransitionSteps {}
