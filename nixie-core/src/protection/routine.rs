//! Cathode poisoning protection routine
//!
//! Cathodes that stay dark for hours get sputtered over by the lit ones.
//! The routine cycles every cathode at a fixed dwell, then puts the display
//! back the way it was.

use embedded_hal::delay::DelayNs;
use nixie_hal::PinWriter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pattern::{ProtectionPattern, ProtectionStyle, VALUES_PER_ITERATION};
use crate::cancel::CancelToken;
use crate::display::surface::TubeSelection;
use crate::display::NixieDisplay;
use crate::error::DisplayError;
use crate::transition::Effects;

/// Default time each pattern value is shown (ms)
pub const DEFAULT_DWELL_MS: u32 = 15;

/// Protection run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProtectionRequest {
    /// Pattern to cycle
    pub style: ProtectionStyle,
    /// Total run time (ms), rounded down to whole iterations
    pub duration_ms: u32,
    /// Time each value is shown (ms)
    pub dwell_ms: u32,
}

impl ProtectionRequest {
    /// Create a request with the default dwell
    pub const fn new(style: ProtectionStyle, duration_ms: u32) -> Self {
        Self {
            style,
            duration_ms,
            dwell_ms: DEFAULT_DWELL_MS,
        }
    }

    /// Override the dwell
    pub const fn with_dwell(mut self, dwell_ms: u32) -> Self {
        self.dwell_ms = dwell_ms;
        self
    }

    /// Number of full pattern cycles
    ///
    /// At least one cycle must fit in the duration.
    pub fn iterations(&self) -> Result<u32, DisplayError> {
        if self.dwell_ms == 0 {
            return Err(DisplayError::InvalidParameter);
        }
        let cycle_ms = self
            .dwell_ms
            .checked_mul(VALUES_PER_ITERATION)
            .ok_or(DisplayError::InvalidParameter)?;
        if self.duration_ms < cycle_ms {
            return Err(DisplayError::InvalidParameter);
        }
        Ok(self.duration_ms / cycle_ms)
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), DisplayError> {
        self.iterations().map(|_| ())
    }

    /// Values to show, in order
    pub fn pattern(&self) -> Result<ProtectionPattern, DisplayError> {
        Ok(ProtectionPattern::new(self.style, self.iterations()?))
    }
}

impl Default for ProtectionRequest {
    fn default() -> Self {
        Self::new(ProtectionStyle::Slot, 0)
    }
}

impl<W: PinWriter, D: DelayNs> NixieDisplay<W, D> {
    /// Run the protection routine, blocking until it ends
    ///
    /// Effects are off while the pattern runs. On success or cancellation
    /// the previous effect flags come back and the digits shown before the
    /// routine are driven again on every active tube. A failed pin write
    /// aborts with `Internal`; only the effect flags are restored then.
    pub fn run_protection(
        &mut self,
        request: &ProtectionRequest,
        cancel: &CancelToken,
    ) -> Result<(), DisplayError> {
        let pattern = request.pattern()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Protection start: {} x{} dwell {}ms",
            request.style,
            pattern.len(),
            request.dwell_ms
        );

        let saved_effects = self.effects();
        let saved_digits = *self.buffer().previous();

        self.set_effects(Effects::NONE);
        let outcome = self.play_pattern(pattern, request.dwell_ms, cancel);
        self.set_effects(saved_effects);

        match outcome {
            Ok(()) | Err(DisplayError::Cancelled) => {
                self.apply(saved_digits, TubeSelection::All)?;
                outcome
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Protection aborted: {}", err);
                Err(err)
            }
        }
    }

    fn play_pattern(
        &mut self,
        pattern: ProtectionPattern,
        dwell_ms: u32,
        cancel: &CancelToken,
    ) -> Result<(), DisplayError> {
        for value in pattern {
            if cancel.is_cancelled() {
                #[cfg(feature = "defmt")]
                defmt::debug!("Protection cancelled");
                return Err(DisplayError::Cancelled);
            }
            self.write(value)?;
            self.pause_ms(dwell_ms);
        }
        Ok(())
    }
}
