//! Cathode poisoning protection
//!
//! Patterns, the blocking protection routine on [`NixieDisplay`], and the
//! schedule that decides when the clock loop should run it.
//!
//! [`NixieDisplay`]: crate::display::NixieDisplay

pub mod pattern;
pub mod routine;
pub mod schedule;

pub use pattern::{ProtectionPattern, ProtectionStyle, VALUES_PER_ITERATION};
pub use routine::{ProtectionRequest, DEFAULT_DWELL_MS};
pub use schedule::{
    DailyRule, PeriodicRule, ProtectionSchedule, DAILY_CATCH_UP_S, MAX_DAILY_RULES,
};
