//! Cancellation for long-running display routines

use core::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop flag
///
/// Checked between protection steps, never in the middle of a transition.
/// Only loads and stores are used, so this works on cores without
/// compare-and-swap (Cortex-M0).
///
/// ```ignore
/// static STOP_PROTECTION: CancelToken = CancelToken::new();
///
/// // Button task
/// STOP_PROTECTION.cancel();
///
/// // Display task
/// display.run_protection(request, &STOP_PROTECTION)?;
/// ```
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clear a previous cancellation so the token can be reused
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}
