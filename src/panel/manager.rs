//! src/panel/manager.rs
//!
//! Panel lifecycle coordinator: which side panel is active and whether it is
//! mid-transition.
//!
//! # State machine
//!
//! | phase     | `active_panel` | `animating`        |
//! |-----------|----------------|--------------------|
//! | `Closed`  | `None`         | `None`             |
//! | `Opening` | `Some(k)`      | `Some(Opening(k))` |
//! | `Open`    | `Some(k)`      | `None`             |
//! | `Closing` | `Some(k)`      | `Some(Closing)`    |
//!
//! `open_panel` always lands in `Opening` and arms the open timer
//! ([`OPEN_ANIMATION`]). `close_panel` lands in `Closing` and arms the close
//! timer ([`CLOSE_ANIMATION`]). Starting either transition cancels the pending
//! timer of both kinds first, so at most one timer is outstanding.
//!
//! Timers are plain deadlines. The owner calls [`PanelManager::tick`] from its
//! frame loop; a due deadline is consumed and its transition applied there.
//! This keeps every mutation on the owning thread.

use std::time::{Duration, Instant};

use tracing::debug;

use super::kind::PanelKind;
use super::timing::{self, CLOSE_ANIMATION, OPEN_ANIMATION};
use crate::clock::{Clock, SystemClock};

/// Transition currently playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animating {
    Opening(PanelKind),
    Closing,
}

impl Animating {
    /// CSS-style class name the renderer keys its styling on.
    pub fn class(self) -> &'static str {
        match self {
            Animating::Opening(_) => "animating",
            Animating::Closing => "closing",
        }
    }
}

/// Observable panel state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    pub active_panel: Option<PanelKind>,
    pub animating: Option<Animating>,
}

/// Derived view of [`PanelState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening(PanelKind),
    Open(PanelKind),
    Closing(PanelKind),
}

impl PanelState {
    pub fn phase(&self) -> Phase {
        match (self.active_panel, self.animating) {
            (None, _) => Phase::Closed,
            (Some(k), None) => Phase::Open(k),
            (Some(k), Some(Animating::Opening(_))) => Phase::Opening(k),
            (Some(k), Some(Animating::Closing)) => Phase::Closing(k),
        }
    }

    /// The token selector overlay follows the tokens panel.
    pub fn token_selector_open(&self) -> bool {
        self.active_panel == Some(PanelKind::Tokens)
    }

    pub fn is_active(&self, kind: PanelKind) -> bool {
        self.active_panel == Some(kind)
    }
}

type Observer = Box<dyn FnMut(&PanelState)>;

pub struct PanelManager<C: Clock = SystemClock> {
    clock: C,
    state: PanelState,
    open_deadline: Option<Instant>,
    close_deadline: Option<Instant>,
    transition_started: Option<Instant>,
    observers: Vec<Observer>,
    torn_down: bool,
}

impl<C: Clock> PanelManager<C> {
    /// Start `Closed`.
    pub fn new(clock: C) -> Self {
        Self::with_initial(clock, None)
    }

    /// Start `Open` on `initial` without animating, or `Closed` when `None`.
    pub fn with_initial(clock: C, initial: Option<PanelKind>) -> Self {
        Self {
            clock,
            state: PanelState {
                active_panel: initial,
                animating: None,
            },
            open_deadline: None,
            close_deadline: None,
            transition_started: None,
            observers: Vec::new(),
            torn_down: false,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&PanelState) + 'static) {
        if !self.torn_down {
            self.observers.push(Box::new(observer));
        }
    }

    pub fn open_panel(&mut self, kind: PanelKind) {
        if self.torn_down {
            return;
        }
        self.cancel_timers();
        let now = self.clock.now();
        debug!(panel = %kind, from = ?self.state.phase(), "open panel");
        self.set_state(PanelState {
            active_panel: Some(kind),
            animating: Some(Animating::Opening(kind)),
        });
        self.transition_started = Some(now);
        self.open_deadline = Some(now + OPEN_ANIMATION);
    }

    /// Begin closing the active panel. On an already closing panel the close
    /// window restarts; on a closed machine nothing happens.
    pub fn close_panel(&mut self) {
        if self.torn_down || self.state.active_panel.is_none() {
            return;
        }
        self.cancel_timers();
        let now = self.clock.now();
        debug!(from = ?self.state.phase(), "close panel");
        self.set_state(PanelState {
            active_panel: self.state.active_panel,
            animating: Some(Animating::Closing),
        });
        self.transition_started = Some(now);
        self.close_deadline = Some(now + CLOSE_ANIMATION);
    }

    pub fn toggle_panel(&mut self, kind: PanelKind) {
        if self.state.active_panel == Some(kind) {
            self.close_panel();
        } else {
            self.open_panel(kind);
        }
    }

    /// Fire due timers. Returns true when the state changed.
    pub fn tick(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let now = self.clock.now();
        let mut changed = false;

        if self.open_deadline.is_some_and(|d| now >= d) {
            self.open_deadline = None;
            self.transition_started = None;
            self.set_state(PanelState {
                active_panel: self.state.active_panel,
                animating: None,
            });
            changed = true;
        }

        if self.close_deadline.is_some_and(|d| now >= d) {
            self.close_deadline = None;
            self.transition_started = None;
            if let Some(previous) = self.state.active_panel {
                debug!(previous = %previous, "active panel cleared");
            }
            self.set_state(PanelState::default());
            changed = true;
        }

        changed
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.open_deadline, self.close_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Time left until the next timer fires.
    pub fn time_to_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|d| d.saturating_duration_since(self.clock.now()))
    }

    /// Number of armed timers (0 or 1 while the invariants hold).
    pub fn pending_timers(&self) -> usize {
        usize::from(self.open_deadline.is_some()) + usize::from(self.close_deadline.is_some())
    }

    /// Progress of the running transition in `[0, 1]`.
    pub fn transition_progress(&self) -> Option<(Animating, f64)> {
        let animating = self.state.animating?;
        let started = self.transition_started?;
        let total = match animating {
            Animating::Opening(_) => OPEN_ANIMATION,
            Animating::Closing => CLOSE_ANIMATION,
        };
        let elapsed = self.clock.now().saturating_duration_since(started);
        Some((animating, timing::progress(elapsed, total)))
    }

    /// Cancel both timers and drop all observers. Nothing fires afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_timers();
        self.transition_started = None;
        self.observers.clear();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn cancel_timers(&mut self) {
        self.open_deadline = None;
        self.close_deadline = None;
    }

    fn set_state(&mut self, next: PanelState) {
        self.state = next;
        for observer in self.observers.iter_mut() {
            observer(&next);
        }
    }
}

impl<C: Clock> Drop for PanelManager<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
