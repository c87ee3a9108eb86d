//! Wall-clock time as shown on the tubes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MAX_TUBES;

/// Seconds in a day
pub const SECONDS_PER_DAY: u32 = 24 * 3600;

/// Validated time of day
///
/// Deserializing goes through [`WallTime::new`], so an out-of-range field
/// is a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawWallTime")
)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    /// Midnight
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Create a time, or None if any field is out of range
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Hour (0-23)
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute (0-59)
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second (0-59)
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Tube digits `[hT, hU, mT, mU, sT, sU]`
    pub const fn digits(&self) -> [u8; MAX_TUBES] {
        [
            self.hour / 10,
            self.hour % 10,
            self.minute / 10,
            self.minute % 10,
            self.second / 10,
            self.second % 10,
        ]
    }

    /// Seconds since midnight
    pub const fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Seconds from `self` forward to `later`, wrapping at midnight
    pub const fn seconds_until(&self, later: WallTime) -> u32 {
        (later.seconds_of_day() + SECONDS_PER_DAY - self.seconds_of_day()) % SECONDS_PER_DAY
    }
}

/// Unchecked wire form of [`WallTime`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawWallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWallTime> for WallTime {
    type Error = &'static str;

    fn try_from(raw: RawWallTime) -> Result<Self, Self::Error> {
        WallTime::new(raw.hour, raw.minute, raw.second).ok_or("time of day out of range")
    }
}
