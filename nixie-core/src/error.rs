//! Display error types

use nixie_hal::PinId;

/// Errors returned by display operations
///
/// None of these are retried inside the driver. A hardware failure leaves
/// the committed digit buffer where it was, so the caller can simply issue
/// the same write again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Value, time, tube or duration out of range
    InvalidParameter,
    /// Digit outside 0-9 given to the pin mapper
    InvalidDigit(u8),
    /// Tube index outside the active window given to the pin mapper
    InvalidTube(u8),
    /// A pin write failed during one tube's transition
    HardwareWrite {
        /// Tube index (0 = leftmost active tube)
        tube: u8,
        /// Pin whose write failed
        pin: PinId,
    },
    /// A multi-tube operation stopped on a failed pin write
    Internal {
        /// Tube index (0 = leftmost active tube)
        tube: u8,
        /// Pin whose write failed
        pin: PinId,
    },
    /// Protection routine stopped through its cancel token
    Cancelled,
    /// Display is already borrowed by another operation
    Busy,
}

impl DisplayError {
    /// Wrap a single-tube hardware failure as a multi-tube failure
    ///
    /// Other variants pass through unchanged.
    pub(crate) fn into_internal(self) -> Self {
        match self {
            DisplayError::HardwareWrite { tube, pin } => DisplayError::Internal { tube, pin },
            other => other,
        }
    }

    /// Check if the error came from the hardware rather than the caller
    pub fn is_hardware(&self) -> bool {
        matches!(
            self,
            DisplayError::HardwareWrite { .. } | DisplayError::Internal { .. }
        )
    }
}
