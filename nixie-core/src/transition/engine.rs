//! Transition style selection and execution

use embedded_hal::delay::DelayNs;
use nixie_hal::PinWriter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pinmap::PinMap;
use super::steps::TransitionSteps;
use crate::error::DisplayError;

/// Enabled transition effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Effects {
    /// Blend old and new cathodes when a digit changes
    pub crossfade: bool,
    /// Walk down through the digits when falling to zero
    pub scrollback: bool,
}

impl Effects {
    /// Plain switching, no effects
    pub const NONE: Self = Self {
        crossfade: false,
        scrollback: false,
    };

    /// Both effects on
    pub const ALL: Self = Self {
        crossfade: true,
        scrollback: true,
    };
}

/// How one tube moves from its old digit to its new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionStyle {
    /// Same cathode, re-assert it
    Refresh,
    /// Switch cathodes directly
    Instant,
    /// Timed overlap of both cathodes
    Crossfade,
    /// Odometer walk down to zero
    Scrollback,
}

impl TransitionStyle {
    /// Pick the style for a digit change
    ///
    /// Priority: scrollback, crossfade, instant, refresh. `same_pin` is
    /// decided by the wiring rather than the digits.
    pub fn select(effects: Effects, previous: u8, current: u8, same_pin: bool) -> Self {
        if effects.scrollback && current == 0 && previous != 0 {
            TransitionStyle::Scrollback
        } else if same_pin {
            TransitionStyle::Refresh
        } else if effects.crossfade {
            TransitionStyle::Crossfade
        } else {
            TransitionStyle::Instant
        }
    }
}

/// Single tube transition, consumed once per tube per write
///
/// Only built through [`TransitionRequest::new`], so the style always
/// matches the digits and the wiring it was selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionRequest {
    tube: u8,
    current: u8,
    previous: u8,
    style: TransitionStyle,
}

impl TransitionRequest {
    /// Validate the digits and select a style
    pub fn new(
        map: &PinMap,
        tube: u8,
        current: u8,
        previous: u8,
        effects: Effects,
    ) -> Result<Self, DisplayError> {
        let new_pin = map.pin(tube, current)?;
        let old_pin = map.pin(tube, previous)?;

        Ok(Self {
            tube,
            current,
            previous,
            style: TransitionStyle::select(effects, previous, current, new_pin == old_pin),
        })
    }

    /// Tube index (0 = leftmost active tube)
    pub fn tube(&self) -> u8 {
        self.tube
    }

    /// Digit to show
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Digit currently shown
    pub fn previous(&self) -> u8 {
        self.previous
    }

    /// Selected style
    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    /// Step sequence for this request
    pub fn steps(&self, map: &PinMap) -> Result<TransitionSteps, DisplayError> {
        let wiring = *map.wiring(self.tube)?;
        if wiring.pin(self.current).is_none() {
            return Err(DisplayError::InvalidDigit(self.current));
        }
        if wiring.pin(self.previous).is_none() {
            return Err(DisplayError::InvalidDigit(self.previous));
        }

        Ok(TransitionSteps::new(
            self.style,
            wiring,
            self.previous,
            self.current,
        ))
    }
}

/// Play a transition on the hardware
///
/// Each step's writes are issued in order, then the step's hold is slept.
/// The first failed write stops the sequence; later steps are never issued.
pub fn drive<W, D>(
    request: &TransitionRequest,
    map: &PinMap,
    writer: &mut W,
    delay: &mut D,
) -> Result<(), DisplayError>
where
    W: PinWriter,
    D: DelayNs,
{
    for step in request.steps(map)? {
        for write in step.writes() {
            if writer.write_pin(write.pin, write.level).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Pin write failed: tube {} pin {} ({})",
                    request.tube,
                    write.pin,
                    write.level
                );
                return Err(DisplayError::HardwareWrite {
                    tube: request.tube,
                    pin: write.pin,
                });
            }
        }

        if step.hold_ms > 0 {
            delay.delay_ms(step.hold_ms);
        }
    }

    Ok(())
}
