//! src/console.rs
//!
//! Everything the UI loop owns: the panel manager plus the data the side
//! panels display. Producer threads never see this; they send `Command`s and
//! the loop applies them here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::debug;

use crate::activity::{EventLog, Notifications, unix_millis};
use crate::clock::{Clock, SystemClock};
use crate::command::{Command, StatusSnapshot};
use crate::feed::AudioLevels;
use crate::panel::{LayerTab, PanelKind, PanelManager, PanelState, Phase};
use crate::profile::ProfileData;

pub struct Console<C: Clock + Clone = SystemClock> {
    pub panels: PanelManager<C>,
    pub tab: LayerTab,
    pub notifications: Notifications,
    pub events: EventLog,
    pub audio: AudioLevels,
    pub profile: Option<(String, ProfileData)>,
    pub running: bool,
}

impl<C: Clock + Clone> Console<C> {
    pub fn new(clock: C, initial_panel: Option<PanelKind>) -> Self {
        let mut panels = PanelManager::with_initial(clock, initial_panel);
        panels.subscribe(|state: &PanelState| {
            debug!(phase = ?state.phase(), "panel state changed");
        });
        Self {
            panels,
            tab: LayerTab::default(),
            notifications: Notifications::default(),
            events: EventLog::default(),
            audio: AudioLevels::default(),
            profile: None,
            running: true,
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            panel: self.panels.state(),
            tab: self.tab,
        }
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Open(kind) => self.open(kind),
            Command::Close => self.panels.close_panel(),
            Command::Toggle(kind) => {
                self.panels.toggle_panel(kind);
                if self.panels.phase() == Phase::Opening(PanelKind::Notifications) {
                    self.notifications.mark_all_read();
                }
            }
            Command::SelectTab(tab) => self.tab = tab,
            Command::QueryState(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::ShowProfile { address, data } => {
                if data.failed {
                    self.notify(format!("profile lookup failed for {address}"));
                }
                self.profile = Some((address, data));
            }
            Command::Notify(text) => self.notify(text),
            Command::MarkRead(id) => {
                if !self.notifications.mark_read(id) {
                    debug!(id, "mark read: no such notification");
                }
            }
            Command::ClearNotifications => self.notifications.clear(),
            Command::Activity(line) => self.events.push(line),
            Command::Audio(levels) => self.audio = levels,
            Command::Quit => self.running = false,
        }
    }

    /// Fire due panel timers. Returns true when something changed.
    pub fn tick(&mut self) -> bool {
        self.panels.tick()
    }

    /// Stop the loop and cancel pending transitions.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.panels.teardown();
    }

    fn open(&mut self, kind: PanelKind) {
        self.panels.open_panel(kind);
        if kind == PanelKind::Notifications {
            self.notifications.mark_all_read();
        }
    }

    fn notify(&mut self, text: String) {
        self.notifications.push(text, unix_millis());
        if self.panels.state().is_active(PanelKind::Notifications) {
            self.notifications.mark_all_read();
        }
    }
}

/// Translate a key press into a console command.
pub fn key_command(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Close),
        KeyCode::Char(c @ '1'..='3') => c
            .to_digit(10)
            .and_then(|n| LayerTab::from_number(n as u8))
            .map(Command::SelectTab),
        KeyCode::Char(c) => PanelKind::from_hotkey(c.to_ascii_lowercase()).map(Command::Toggle),
        _ => None,
    }
}
