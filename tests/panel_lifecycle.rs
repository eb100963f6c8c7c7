use std::cell::RefCell;
use std::rc::Rc;

use vj_console::clock::ManualClock;
use vj_console::panel::{Animating, PanelKind, PanelManager, PanelState, Phase};

fn state(active: Option<PanelKind>, animating: Option<Animating>) -> PanelState {
    PanelState {
        active_panel: active,
        animating,
    }
}

#[test]
fn save_panel_open_close_scenario() {
    let clock = ManualClock::new();
    let mut m = PanelManager::new(clock.clone());
    assert_eq!(m.state(), state(None, None));

    m.open_panel(PanelKind::Save);
    assert_eq!(
        m.state(),
        state(
            Some(PanelKind::Save),
            Some(Animating::Opening(PanelKind::Save))
        )
    );

    clock.advance_ms(300);
    m.tick();
    assert_eq!(m.state(), state(Some(PanelKind::Save), None));

    m.close_panel();
    assert_eq!(
        m.state(),
        state(Some(PanelKind::Save), Some(Animating::Closing))
    );

    clock.advance_ms(250);
    m.tick();
    assert_eq!(m.state(), state(None, None));
}

#[test]
fn active_is_none_iff_closed_over_call_sequences() {
    // deterministic pseudo-random walk over operations and clock steps
    let clock = ManualClock::new();
    let mut m = PanelManager::new(clock.clone());
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..2_000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let kind = PanelKind::ALL[(seed as usize >> 3) % PanelKind::ALL.len()];
        match seed % 5 {
            0 => m.open_panel(kind),
            1 => m.close_panel(),
            2 => m.toggle_panel(kind),
            _ => {
                clock.advance_ms(u64::from(seed % 400));
                m.tick();
            }
        }
        let s = m.state();
        assert_eq!(s.active_panel.is_none(), m.phase() == Phase::Closed);
        assert!(m.pending_timers() <= 1);
        if s.animating.is_none() {
            assert_eq!(m.pending_timers(), 0);
        }
    }
}

#[test]
fn superseded_open_never_fires() {
    let clock = ManualClock::new();
    let mut m = PanelManager::new(clock.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    m.subscribe(move |s: &PanelState| log.borrow_mut().push(*s));

    m.open_panel(PanelKind::Controls);
    clock.advance_ms(100);
    m.open_panel(PanelKind::Audio);
    assert_eq!(m.pending_timers(), 1);

    clock.advance_ms(250);
    m.tick();
    clock.advance_ms(50);
    m.tick();

    let states = seen.borrow();
    assert_eq!(states.len(), 3);
    assert_eq!(states[2], state(Some(PanelKind::Audio), None));
}

#[test]
fn toggle_twice_before_timer_closes() {
    let clock = ManualClock::new();
    let mut m = PanelManager::new(clock.clone());
    m.toggle_panel(PanelKind::Events);
    assert_eq!(m.phase(), Phase::Opening(PanelKind::Events));
    clock.advance_ms(120);
    m.tick();
    m.toggle_panel(PanelKind::Events);
    assert_eq!(m.phase(), Phase::Closing(PanelKind::Events));
    assert_eq!(m.pending_timers(), 1);
}

#[test]
fn no_callbacks_after_teardown() {
    let clock = ManualClock::new();
    let calls = Rc::new(RefCell::new(0usize));
    {
        let mut m = PanelManager::new(clock.clone());
        let counter = calls.clone();
        m.subscribe(move |_| *counter.borrow_mut() += 1);
        m.open_panel(PanelKind::Notifications);
        m.close_panel();
        assert_eq!(*calls.borrow(), 2);
        // dropped here with the close timer armed
    }
    clock.advance_ms(1_000);
    assert_eq!(*calls.borrow(), 2);

    let mut m = PanelManager::new(clock.clone());
    let counter = calls.clone();
    m.subscribe(move |_| *counter.borrow_mut() += 1);
    m.open_panel(PanelKind::Audio);
    m.teardown();
    clock.advance_ms(1_000);
    m.tick();
    m.close_panel();
    assert_eq!(*calls.borrow(), 3);
}
