//! End-to-end tests over the simulated expander.
//! Checks which cathodes are lit after whole display operations.

use nixie_core::protection::ProtectionSchedule;
use nixie_core::{
    CancelToken, DisplayConfig, DisplayError, Effects, Level, NixieDisplay, PinId, PinWriter,
    ProtectionRequest, ProtectionStyle, WallTime,
};
use nixie_drivers::{SimClock, SimError, SimExpander};

type Display = NixieDisplay<SimExpander<60>, SimClock>;

fn display(active: u8, offset: u8, effects: Effects) -> Display {
    let mut config = DisplayConfig::default()
        .with_crossfade(effects.crossfade)
        .with_scrollback(effects.scrollback);
    config.active = active;
    config.offset = offset;
    NixieDisplay::new(config, SimExpander::new(), SimClock::new()).unwrap()
}

/// Digits the tubes physically show, leftmost first
fn shown(display: &Display) -> Vec<Option<u8>> {
    let config = display.config();
    config.wiring[..config.active as usize]
        .iter()
        .map(|wiring| display.writer().shown_digit(wiring))
        .collect()
}

#[test]
fn three_tube_counter_changes_only_hundreds() {
    let mut display = display(
        3,
        0,
        Effects {
            crossfade: false,
            scrollback: true,
        },
    );

    display.write(5).unwrap();
    assert_eq!(shown(&display), vec![Some(0), Some(0), Some(5)]);
    display.writer_mut().reset_counters();
    let before = display.delay().elapsed_ms();

    display.write(105).unwrap();
    assert_eq!(shown(&display), vec![Some(1), Some(0), Some(5)]);

    // Hundreds: switch 0 -> 1. Tens and units: one refresh each.
    let history: Vec<(PinId, Level)> = display.writer().history().copied().collect();
    assert_eq!(
        history,
        vec![(1, Level::High), (0, Level::Low), (10, Level::High), (25, Level::High)]
    );
    assert_eq!(display.delay().elapsed_ms(), before);
}

#[test]
fn init_shows_all_nines() {
    let mut display = display(6, 0, Effects::ALL);
    display.init().unwrap();
    assert_eq!(shown(&display), vec![Some(9); 6]);
}

#[test]
fn effects_end_on_single_cathode() {
    let mut display = display(6, 0, Effects::ALL);
    display.write(987_654).unwrap();
    display.write(100_000).unwrap();

    assert_eq!(
        shown(&display),
        vec![Some(1), Some(0), Some(0), Some(0), Some(0), Some(0)]
    );
    // First write: five crossfades from the power-on nines
    let first_ms = 140 * 5;
    // Second write: one crossfade (9 -> 1), five scrollbacks (8, 7, 6, 5, 4 -> 0)
    let second_ms = 140 + 20 * (8 + 7 + 6 + 5 + 4);
    assert_eq!(display.delay().elapsed_ms(), first_ms + second_ms);
}

#[test]
fn clock_runs_scheduled_protection() {
    let mut display = display(6, 0, Effects::ALL);
    let mut schedule = ProtectionSchedule::clock_default();
    let cancel = CancelToken::new();
    let mut runs = 0;

    for second in 55..60 {
        let now = WallTime::new(12, 15, second).unwrap();
        display.write_wall_time(now).unwrap();
        assert!(schedule.poll(now).is_none());
    }

    for second in 0..5 {
        let now = WallTime::new(12, 16, second).unwrap();
        display.write_wall_time(now).unwrap();
        if let Some(request) = schedule.poll(now) {
            assert_eq!(request.style, ProtectionStyle::Sequential);
            let before = display.delay().elapsed_ms();
            display.run_protection(&request, &cancel).unwrap();
            // 330 dwells, then back from 666666 with effects on:
            // three crossfades and two scrollbacks from 6
            let way_back_ms = 3 * 140 + 2 * 6 * 20;
            assert_eq!(display.delay().elapsed_ms() - before, 4_950 + way_back_ms);
            runs += 1;
        }
        assert_eq!(display.digits(), &now.digits());
    }

    assert_eq!(runs, 1);
    assert_eq!(display.effects(), Effects::ALL);
    assert_eq!(
        shown(&display),
        vec![Some(1), Some(2), Some(1), Some(6), Some(0), Some(4)]
    );
}

static STOP: CancelToken = CancelToken::new();

/// Expander that requests cancellation after a number of writes
struct CancellingExpander {
    sim: SimExpander<60>,
    remaining: u32,
}

impl PinWriter for CancellingExpander {
    type Error = SimError;

    fn write_pin(&mut self, pin: PinId, level: Level) -> Result<(), SimError> {
        if self.remaining == 0 {
            STOP.cancel();
        } else {
            self.remaining -= 1;
        }
        self.sim.write_pin(pin, level)
    }
}

#[test]
fn cancelled_protection_restores_digits() {
    let config = DisplayConfig::default().with_crossfade(false);
    let expander = CancellingExpander {
        sim: SimExpander::new(),
        remaining: 100,
    };
    let mut display = NixieDisplay::new(config, expander, SimClock::new()).unwrap();
    display.write(246_813).unwrap();

    STOP.reset();
    let request = ProtectionRequest::new(ProtectionStyle::Wave, 60_000);
    assert_eq!(
        display.run_protection(&request, &STOP),
        Err(DisplayError::Cancelled)
    );

    // Stopped long before the full minute
    assert!(display.delay().elapsed_ms() < 1_000);
    assert_eq!(display.buffer().value(), 246_813);
    assert_eq!(
        display.effects(),
        Effects {
            crossfade: false,
            scrollback: true
        }
    );

    let sim = &display.writer().sim;
    let shown: Vec<Option<u8>> = display
        .config()
        .wiring
        .iter()
        .map(|wiring| sim.shown_digit(wiring))
        .collect();
    assert_eq!(
        shown,
        vec![Some(2), Some(4), Some(6), Some(8), Some(1), Some(3)]
    );
    STOP.reset();
}

#[test]
fn failed_write_can_be_retried() {
    let mut display = display(6, 0, Effects::NONE);
    display.write(111_111).unwrap();

    display.writer_mut().fail_on(Some(45));
    assert_eq!(
        display.write(555_555),
        Err(DisplayError::Internal { tube: 4, pin: 45 })
    );
    assert_eq!(display.buffer().value(), 111_111);

    display.writer_mut().fail_on(None);
    display.write(555_555).unwrap();
    assert_eq!(shown(&display), vec![Some(5); 6]);
}

#[test]
fn shutdown_darkens_tubes() {
    let mut display = display(4, 2, Effects::ALL);
    display.write_time(23, 59, 0).unwrap();
    assert_eq!(display.digits(), &[2, 3, 5, 9]);

    display.shutdown().unwrap();
    let (sim, _) = display.release();
    assert!((0..40).all(|pin| sim.level(pin) == Level::Low));
}
