//! Protection display patterns

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Values written per pattern iteration
pub const VALUES_PER_ITERATION: u32 = 10;

/// IN-14 cathode stacking order, front to back
const SEQUENTIAL: [u32; VALUES_PER_ITERATION as usize] = [
    111_111, 0, 222_222, 999_999, 333_333, 888_888, 444_444, 777_777, 555_555, 666_666,
];

const WAVE: [u32; VALUES_PER_ITERATION as usize] = [
    123_456, 234_567, 345_678, 456_789, 567_890, 678_901, 789_012, 890_123, 901_234, 12_345,
];

/// Cathode cycling pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProtectionStyle {
    /// Diagonal run of digits shifting one place per step
    Wave,
    /// Every tube shows the same digit, counting 0 to 9
    #[default]
    Slot,
    /// Same digit on every tube, in cathode stacking order
    Sequential,
}

impl ProtectionStyle {
    /// Value shown at `step` of an iteration (wraps every 10 steps)
    pub const fn value(self, step: u32) -> u32 {
        let index = (step % VALUES_PER_ITERATION) as usize;
        match self {
            ProtectionStyle::Wave => WAVE[index],
            ProtectionStyle::Slot => index as u32 * 111_111,
            ProtectionStyle::Sequential => SEQUENTIAL[index],
        }
    }
}

/// Values of a whole protection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionPattern {
    style: ProtectionStyle,
    step: u32,
    total: u32,
}

impl ProtectionPattern {
    /// Pattern running `iterations` full cycles
    pub fn new(style: ProtectionStyle, iterations: u32) -> Self {
        Self {
            style,
            step: 0,
            total: iterations.saturating_mul(VALUES_PER_ITERATION),
        }
    }

    /// Style being cycled
    pub fn style(&self) -> ProtectionStyle {
        self.style
    }

    /// Steps already yielded
    pub fn position(&self) -> u32 {
        self.step
    }
}

impl Iterator for ProtectionPattern {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.step >= self.total {
            return None;
        }
        let value = self.style.value(self.step);
        self.step += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProtectionPattern {}
