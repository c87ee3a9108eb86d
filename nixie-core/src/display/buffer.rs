//! Six-slot digit buffer with commit-last semantics

use crate::config::MAX_TUBES;

/// Largest value that fits the buffer
pub const MAX_VALUE: u32 = 999_999;

/// Current and last committed digits
///
/// `current` holds what a write is trying to show; `previous` holds what the
/// tubes were last successfully driven to. A write stages into `current`
/// and then either commits (`previous = current`) or rolls back
/// (`current = previous`), so outside a write both are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitBuffer {
    current: [u8; MAX_TUBES],
    previous: [u8; MAX_TUBES],
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self {
            current: [0; MAX_TUBES],
            previous: [9; MAX_TUBES],
        }
    }
}

impl DigitBuffer {
    /// Split a value into six digits, most significant first
    ///
    /// Returns None above [`MAX_VALUE`].
    pub fn decompose(value: u32) -> Option<[u8; MAX_TUBES]> {
        if value > MAX_VALUE {
            return None;
        }

        let mut digits = [0; MAX_TUBES];
        let mut rest = value;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        Some(digits)
    }

    /// Digits being written (equal to `previous` between writes)
    pub fn current(&self) -> &[u8; MAX_TUBES] {
        &self.current
    }

    /// Last committed digits
    pub fn previous(&self) -> &[u8; MAX_TUBES] {
        &self.previous
    }

    /// Committed digits as a number
    pub fn value(&self) -> u32 {
        self.previous
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32)
    }

    pub(crate) fn stage(&mut self, digits: [u8; MAX_TUBES]) {
        self.current = digits;
    }

    pub(crate) fn commit(&mut self) {
        self.previous = self.current;
    }

    pub(crate) fn rollback(&mut self) {
        self.current = self.previous;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
