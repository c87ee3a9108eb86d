//! Property-based tests for the display surface.
//! Drives a recording expander and checks what the tubes end up showing.

use embedded_hal::delay::DelayNs;
use nixie_core::protection::ProtectionStyle;
use nixie_core::{
    CancelToken, DisplayConfig, DisplayError, Effects, Level, NixieDisplay, PinId, PinWriter,
    ProtectionRequest,
};
use proptest::prelude::*;

/// Expander with 60 pins that remembers levels and every write
struct Expander {
    levels: Vec<Level>,
    writes: Vec<(PinId, Level)>,
}

impl Expander {
    fn new() -> Self {
        Self {
            levels: vec![Level::Low; 60],
            writes: Vec::new(),
        }
    }

    /// Lit pins of one tube wired at `base..base + 10`
    fn lit(&self, base: usize) -> Vec<usize> {
        (0..10).filter(|d| self.levels[base + d].is_high()).collect()
    }
}

impl PinWriter for Expander {
    type Error = ();

    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), ()> {
        self.levels[pin as usize] = level;
        self.writes.push((pin, level));
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn window() -> impl Strategy<Value = (u8, u8)> {
    (1u8..=6).prop_flat_map(|active| (Just(active), 0..=(6 - active)))
}

fn display(active: u8, offset: u8, effects: Effects) -> NixieDisplay<Expander, NoDelay> {
    let mut config = DisplayConfig::default()
        .with_crossfade(effects.crossfade)
        .with_scrollback(effects.scrollback);
    config.active = active;
    config.offset = offset;
    NixieDisplay::new(config, Expander::new(), NoDelay).unwrap()
}

/// Digits of `value` a window of `active` tubes shifted by `offset` shows
fn expected(value: u32, active: u8, offset: u8) -> Vec<u8> {
    let shifted = value / 10u32.pow(offset as u32);
    (0..active as u32)
        .rev()
        .map(|place| (shifted / 10u32.pow(place) % 10) as u8)
        .collect()
}

fn effects() -> impl Strategy<Value = Effects> {
    (any::<bool>(), any::<bool>()).prop_map(|(crossfade, scrollback)| Effects {
        crossfade,
        scrollback,
    })
}

proptest! {
    /// The window always shows the right digits, one lit cathode per tube.
    #[test]
    fn write_lights_one_cathode_per_tube(
        (active, offset) in window(),
        effects in effects(),
        first in 0u32..=999_999,
        second in 0u32..=999_999,
    ) {
        let mut display = display(active, offset, effects);
        display.write(first).unwrap();
        display.write(second).unwrap();

        let digits = expected(second, active, offset);
        prop_assert_eq!(display.digits(), digits.as_slice());

        for (tube, &digit) in digits.iter().enumerate() {
            let lit = display.writer().lit(tube * 10);
            prop_assert_eq!(lit, vec![digit as usize]);
        }
    }

    /// Values above 999999 never reach the hardware.
    #[test]
    fn write_rejects_large_values(value in 1_000_000u32..=u32::MAX) {
        let mut display = display(6, 0, Effects::ALL);
        prop_assert_eq!(display.write(value), Err(DisplayError::InvalidParameter));
        prop_assert!(display.writer().writes.is_empty());
        prop_assert_eq!(display.buffer().value(), 999_999);
    }

    /// Writing the same value again only refreshes each active tube.
    #[test]
    fn repeated_write_only_refreshes(
        (active, offset) in window(),
        effects in effects(),
        value in 0u32..=999_999,
    ) {
        let mut display = display(active, offset, effects);
        display.write(value).unwrap();
        display.writer_mut().writes.clear();

        display.write(value).unwrap();
        let writes = &display.writer().writes;
        prop_assert_eq!(writes.len(), active as usize);
        prop_assert!(writes.iter().all(|(_, level)| level.is_high()));
    }

    /// A time update drives nothing for tubes that keep their digit.
    #[test]
    fn write_time_touches_changed_tubes_only(
        hour in 0u8..24,
        minute in 0u8..60,
        second in 0u8..59,
    ) {
        let mut display = display(6, 0, Effects::NONE);
        display.write_time(hour, minute, second).unwrap();
        display.writer_mut().writes.clear();

        display.write_time(hour, minute, second + 1).unwrap();
        let changed = if (second + 1) % 10 == 0 { 2 } else { 1 };
        prop_assert_eq!(display.writer().writes.len(), changed * 2);
    }

    /// Out-of-range time fields are rejected before any write.
    #[test]
    fn write_time_rejects_bad_fields(hour in 24u8.., minute in 60u8.., second in 60u8..) {
        let mut display = display(6, 0, Effects::ALL);
        prop_assert_eq!(display.write_time(hour, 0, 0), Err(DisplayError::InvalidParameter));
        prop_assert_eq!(display.write_time(0, minute, 0), Err(DisplayError::InvalidParameter));
        prop_assert_eq!(display.write_time(0, 0, second), Err(DisplayError::InvalidParameter));
        prop_assert!(display.writer().writes.is_empty());
    }

    /// Protection always hands back the digits and effects it found.
    #[test]
    fn protection_restores_display(
        value in 0u32..=999_999,
        effects in effects(),
        style in prop_oneof![
            Just(ProtectionStyle::Wave),
            Just(ProtectionStyle::Slot),
            Just(ProtectionStyle::Sequential),
        ],
        iterations in 1u32..4,
    ) {
        let mut display = display(6, 0, effects);
        display.write(value).unwrap();

        let request = ProtectionRequest::new(style, iterations * 150);
        display.run_protection(&request, &CancelToken::new()).unwrap();

        prop_assert_eq!(display.buffer().value(), value);
        prop_assert_eq!(display.effects(), effects);
        for (tube, &digit) in expected(value, 6, 0).iter().enumerate() {
            prop_assert_eq!(display.writer().lit(tube * 10), vec![digit as usize]);
        }
    }

    /// Protection shorter than one cycle is refused without side effects.
    #[test]
    fn protection_rejects_short_duration(dwell in 1u32..1000, short in 0u32..10) {
        let mut display = display(6, 0, Effects::ALL);
        let request = ProtectionRequest::new(ProtectionStyle::Slot, dwell * short).with_dwell(dwell);
        prop_assert_eq!(
            display.run_protection(&request, &CancelToken::new()),
            Err(DisplayError::InvalidParameter)
        );
        prop_assert!(display.writer().writes.is_empty());
    }
}
