//! When to run protection
//!
//! Polled from the clock loop with the current wall time. A rule fires once
//! when it starts matching and stays quiet until the time moves out of it.
//! A daily rule whose second was skipped (the loop was busy or late) still
//! fires on the next poll, as long as that poll comes within
//! [`DAILY_CATCH_UP_S`] of the previous one.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pattern::ProtectionStyle;
use super::routine::ProtectionRequest;
use crate::error::DisplayError;
use crate::time::WallTime;

/// Maximum daily rules per schedule
pub const MAX_DAILY_RULES: usize = 4;

/// Longest gap between polls over which a skipped daily rule is caught up
///
/// A longer gap is taken as the clock being set, and only an exact match
/// fires.
pub const DAILY_CATCH_UP_S: u32 = 300;

/// Run protection every `period_min` minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeriodicRule {
    /// Period in minutes (1-60)
    pub period_min: u8,
    /// Minute within the period the rule matches
    pub minute_offset: u8,
    /// What to run
    pub request: ProtectionRequest,
}

impl PeriodicRule {
    /// Create a rule, or None if the offset does not fit the period
    pub fn new(period_min: u8, minute_offset: u8, request: ProtectionRequest) -> Option<Self> {
        if period_min == 0 || period_min > 60 || minute_offset >= period_min {
            return None;
        }
        Some(Self {
            period_min,
            minute_offset,
            request,
        })
    }

    /// Check if `now` falls in the rule's minute
    pub fn matches(&self, now: WallTime) -> bool {
        self.period_min > 0 && now.minute() % self.period_min == self.minute_offset
    }
}

/// Run protection once a day at a fixed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyRule {
    /// Time of day, to the second
    pub at: WallTime,
    /// What to run
    pub request: ProtectionRequest,
}

/// Protection schedule with edge-triggered rules
#[derive(Debug, Clone, Default)]
pub struct ProtectionSchedule {
    periodic: Option<PeriodicRule>,
    daily: Vec<DailyRule, MAX_DAILY_RULES>,
    periodic_latched: bool,
    last_poll: Option<WallTime>,
}

impl ProtectionSchedule {
    /// Create an empty schedule that never fires
    pub fn new() -> Self {
        Self::default()
    }

    /// Six-digit clock schedule
    ///
    /// A short sequential run at minute 6 of every ten, and two long slot
    /// runs in the small hours.
    pub fn clock_default() -> Self {
        let mut schedule = Self::new();

        let frequent = ProtectionRequest::new(ProtectionStyle::Sequential, 5_000);
        schedule.periodic = PeriodicRule::new(10, 6, frequent);

        let nightly = ProtectionRequest::new(ProtectionStyle::Slot, 120_000).with_dwell(50);
        for (hour, minute) in [(3, 15), (3, 45)] {
            if let Some(at) = WallTime::new(hour, minute, 0) {
                let _ = schedule.add_daily(DailyRule {
                    at,
                    request: nightly,
                });
            }
        }

        schedule
    }

    /// Replace the periodic rule
    pub fn set_periodic(&mut self, rule: Option<PeriodicRule>) {
        self.periodic = rule;
        self.periodic_latched = false;
    }

    /// Get the periodic rule
    pub fn periodic(&self) -> Option<&PeriodicRule> {
        self.periodic.as_ref()
    }

    /// Add a daily rule
    ///
    /// Gives the rule back if the schedule is full.
    pub fn add_daily(&mut self, rule: DailyRule) -> Result<(), DailyRule> {
        self.daily.push(rule)
    }

    /// Get the daily rules
    pub fn daily(&self) -> &[DailyRule] {
        &self.daily
    }

    /// Validate every request in the schedule
    pub fn validate(&self) -> Result<(), DisplayError> {
        if let Some(rule) = &self.periodic {
            rule.request.validate()?;
        }
        for rule in &self.daily {
            rule.request.validate()?;
        }
        Ok(())
    }

    /// Check the schedule against the current time
    ///
    /// Returns a request at most once per matching window. Daily rules win
    /// over the periodic rule when both match. If several daily rules fell
    /// between two polls only the first is returned.
    pub fn poll(&mut self, now: WallTime) -> Option<ProtectionRequest> {
        let last_poll = self.last_poll.replace(now);

        let periodic_match = self.periodic.filter(|rule| rule.matches(now));
        if periodic_match.is_none() {
            self.periodic_latched = false;
        }

        if let Some(rule) = self.daily.iter().find(|rule| daily_due(rule.at, last_poll, now)) {
            // Don't chain a periodic run straight after a daily one
            self.periodic_latched = periodic_match.is_some();

            #[cfg(feature = "defmt")]
            defmt::debug!("Daily protection due at {} (polled {})", rule.at, now);
            return Some(rule.request);
        }

        match periodic_match {
            Some(rule) if !self.periodic_latched => {
                self.periodic_latched = true;

                #[cfg(feature = "defmt")]
                defmt::debug!("Periodic protection due at {}", now);
                Some(rule.request)
            }
            _ => None,
        }
    }
}

/// Check if `at` lies in `(last_poll, now]`
fn daily_due(at: WallTime, last_poll: Option<WallTime>, now: WallTime) -> bool {
    match last_poll {
        Some(last) if last == now => false,
        Some(last) if last.seconds_until(now) <= DAILY_CATCH_UP_S => {
            let since = last.seconds_until(at);
            since > 0 && since <= last.seconds_until(now)
        }
        _ => at == now,
    }
}
