//! Display shared between tasks
//!
//! Wraps a [`NixieDisplay`] in an embassy-sync async mutex so a clock loop
//! and a protection worker can both hold a `&SharedDisplay`. The raw mutex
//! is only taken to check and flip the lock state, never while the display
//! is being driven, so `CriticalSectionRawMutex` does not mask interrupts
//! for the length of a protection run.
//!
//! The `try_*` methods never wait: while another task holds the display
//! they return `Busy`, which suits a clock loop that can skip one update.
//! `lock` waits for the holder to finish.
//!
//! ```ignore
//! static DISPLAY: SharedDisplay<CriticalSectionRawMutex, Expander, Delay> = ...;
//!
//! // Clock loop, once per second
//! match DISPLAY.try_write_time(12, 34, 56) {
//!     Err(DisplayError::Busy) => {} // protection running
//!     other => other?,
//! }
//!
//! // Protection worker
//! DISPLAY.run_protection(&request, &STOP_PROTECTION).await?;
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal::delay::DelayNs;
use nixie_core::{CancelToken, DisplayError, NixieDisplay, ProtectionRequest, WallTime};
use nixie_hal::PinWriter;

/// Mutex-guarded display
pub struct SharedDisplay<M: RawMutex, W, D> {
    inner: Mutex<M, NixieDisplay<W, D>>,
}

impl<M: RawMutex, W: PinWriter, D: DelayNs> SharedDisplay<M, W, D> {
    /// Wrap a display
    pub const fn new(display: NixieDisplay<W, D>) -> Self {
        Self {
            inner: Mutex::new(display),
        }
    }

    /// Run `f` with exclusive access, waiting for the current holder
    pub async fn lock<R>(
        &self,
        f: impl FnOnce(&mut NixieDisplay<W, D>) -> Result<R, DisplayError>,
    ) -> Result<R, DisplayError> {
        let mut display = self.inner.lock().await;
        f(&mut display)
    }

    /// Run `f` with exclusive access if the display is free
    ///
    /// Returns `Busy` while any other caller holds the display, including
    /// a protection run in progress.
    pub fn try_lock<R>(
        &self,
        f: impl FnOnce(&mut NixieDisplay<W, D>) -> Result<R, DisplayError>,
    ) -> Result<R, DisplayError> {
        let mut display = self.inner.try_lock().map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::debug!("Display busy");
            DisplayError::Busy
        })?;
        f(&mut display)
    }

    /// Show a number, or `Busy`
    pub fn try_write(&self, value: u32) -> Result<(), DisplayError> {
        self.try_lock(|display| display.write(value))
    }

    /// Show a time of day, or `Busy`
    pub fn try_write_time(&self, hour: u8, minute: u8, second: u8) -> Result<(), DisplayError> {
        self.try_lock(|display| display.write_time(hour, minute, second))
    }

    /// Show an already validated time of day, or `Busy`
    pub fn try_write_wall_time(&self, time: WallTime) -> Result<(), DisplayError> {
        self.try_lock(|display| display.write_wall_time(time))
    }

    /// Show a number once the display is free
    pub async fn write(&self, value: u32) -> Result<(), DisplayError> {
        self.lock(|display| display.write(value)).await
    }

    /// Run the protection routine once the display is free
    ///
    /// Holds the display for the whole run; `try_*` callers get `Busy`
    /// until it ends.
    pub async fn run_protection(
        &self,
        request: &ProtectionRequest,
        cancel: &CancelToken,
    ) -> Result<(), DisplayError> {
        self.lock(|display| display.run_protection(request, cancel))
            .await
    }

    /// Unwrap the display
    pub fn into_inner(self) -> NixieDisplay<W, D> {
        self.inner.into_inner()
    }
}
