//! src/panel/kind.rs
//!
//! The closed set of side panels and the layer tabs shown in the controls panel.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A side panel. Only one is shown at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Controls,
    Notifications,
    Events,
    Save,
    Audio,
    Tokens,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Controls,
        PanelKind::Notifications,
        PanelKind::Events,
        PanelKind::Save,
        PanelKind::Audio,
        PanelKind::Tokens,
    ];

    /// Lowercase wire name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Controls => "controls",
            PanelKind::Notifications => "notifications",
            PanelKind::Events => "events",
            PanelKind::Save => "save",
            PanelKind::Audio => "audio",
            PanelKind::Tokens => "tokens",
        }
    }

    /// Title shown on the panel border.
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Controls => "Controls",
            PanelKind::Notifications => "Notifications",
            PanelKind::Events => "Events",
            PanelKind::Save => "Save",
            PanelKind::Audio => "Audio",
            PanelKind::Tokens => "Tokens",
        }
    }

    /// Keyboard shortcut toggling this panel.
    pub fn hotkey(self) -> char {
        match self {
            PanelKind::Controls => 'c',
            PanelKind::Notifications => 'n',
            PanelKind::Events => 'e',
            PanelKind::Save => 's',
            PanelKind::Audio => 'a',
            PanelKind::Tokens => 't',
        }
    }

    pub fn from_hotkey(c: char) -> Option<PanelKind> {
        Self::ALL.into_iter().find(|k| k.hotkey() == c)
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown panel {0}")]
pub struct UnknownPanel(pub String);

impl FromStr for PanelKind {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPanel(wanted.to_string()))
    }
}

/// Layer tab selected in the controls panel. Tab 1 addresses the top layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerTab {
    #[default]
    Tab1,
    Tab2,
    Tab3,
}

impl LayerTab {
    /// Canvas layer id addressed by this tab (3 is the top layer).
    pub fn layer_id(self) -> u8 {
        match self {
            LayerTab::Tab1 => 3,
            LayerTab::Tab2 => 2,
            LayerTab::Tab3 => 1,
        }
    }

    /// 1-based tab number as shown to the user.
    pub fn number(self) -> u8 {
        match self {
            LayerTab::Tab1 => 1,
            LayerTab::Tab2 => 2,
            LayerTab::Tab3 => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<LayerTab> {
        match n {
            1 => Some(LayerTab::Tab1),
            2 => Some(LayerTab::Tab2),
            3 => Some(LayerTab::Tab3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Audio".parse::<PanelKind>(), Ok(PanelKind::Audio));
        assert_eq!(" tokens ".parse::<PanelKind>(), Ok(PanelKind::Tokens));
        assert_eq!(
            "mixer".parse::<PanelKind>(),
            Err(UnknownPanel("mixer".into()))
        );
    }

    #[test]
    fn hotkeys_are_unique() {
        for k in PanelKind::ALL {
            assert_eq!(PanelKind::from_hotkey(k.hotkey()), Some(k));
        }
    }

    #[test]
    fn tabs_map_to_reversed_layer_ids() {
        assert_eq!(LayerTab::default().layer_id(), 3);
        assert_eq!(LayerTab::from_number(3).map(LayerTab::layer_id), Some(1));
        assert_eq!(LayerTab::from_number(4), None);
    }
}
