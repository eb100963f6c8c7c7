//! src/midi/mapping.rs
//!
//! Controller bindings: which notes and CCs drive panels and layer tabs.

use std::collections::HashMap;

use super::message::MidiMessage;
use crate::panel::{LayerTab, PanelKind};

/// What a mapped control does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiAction {
    Toggle(PanelKind),
    Close,
    SelectTab(LayerTab),
}

#[derive(Clone, Debug)]
pub struct MidiMap {
    /// 0 listens on every channel, otherwise only on this 1-based channel.
    pub channel: u8,
    pub notes: HashMap<u8, MidiAction>,
    pub controllers: HashMap<u8, MidiAction>,
}

/// CC value at or above which a controller counts as pressed.
const CC_PRESS: u8 = 64;

impl MidiMap {
    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            notes: HashMap::new(),
            controllers: HashMap::new(),
        }
    }

    /// Pads 36..=41 toggle the panels in order, 42 closes; CC 20..=22 pick tabs.
    pub fn default_for_channel(channel: u8) -> Self {
        let mut map = Self::new(channel);
        for (note, kind) in (36u8..).zip(PanelKind::ALL) {
            map.notes.insert(note, MidiAction::Toggle(kind));
        }
        map.notes.insert(42, MidiAction::Close);
        map.controllers
            .insert(20, MidiAction::SelectTab(LayerTab::Tab1));
        map.controllers
            .insert(21, MidiAction::SelectTab(LayerTab::Tab2));
        map.controllers
            .insert(22, MidiAction::SelectTab(LayerTab::Tab3));
        map
    }

    /// Whether `msg` passes the channel filter.
    pub fn accepts(&self, msg: &MidiMessage) -> bool {
        self.channel == 0 || msg.channel().is_none_or(|c| c == self.channel)
    }

    pub fn action_for(&self, msg: &MidiMessage) -> Option<MidiAction> {
        if !self.accepts(msg) {
            return None;
        }
        match *msg {
            MidiMessage::NoteOn { note, .. } => self.notes.get(&note).copied(),
            MidiMessage::ControlChange {
                controller, value, ..
            } if value >= CC_PRESS => self.controllers.get(&controller).copied(),
            _ => None,
        }
    }
}
