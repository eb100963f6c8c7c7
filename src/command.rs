//! src/command.rs
//!
//! Messages delivered to the UI loop, and the line grammar remote clients use
//! to produce them.
//!
//! Every producer thread (remote clients, MIDI reader, audio feed) talks to
//! the UI loop through an `mpsc::Sender<Command>`. Only the UI loop touches
//! the panel manager.

use std::fmt;
use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::feed::AudioLevels;
use crate::panel::{Animating, LayerTab, PanelKind, PanelState, UnknownPanel};
use crate::profile::ProfileData;

/// State reported back to a remote `state` query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub panel: PanelState,
    pub tab: LayerTab,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.panel.active_panel.map_or("none", PanelKind::name);
        let animating = match self.panel.animating {
            None => "none",
            Some(Animating::Opening(k)) => k.name(),
            Some(Animating::Closing) => "closing",
        };
        write!(
            f,
            "active={} animating={} tab={}",
            active,
            animating,
            self.tab.number()
        )
    }
}

pub enum Command {
    Open(PanelKind),
    Close,
    Toggle(PanelKind),
    SelectTab(LayerTab),
    QueryState(Sender<StatusSnapshot>),
    ShowProfile { address: String, data: ProfileData },
    Notify(String),
    MarkRead(u64),
    ClearNotifications,
    /// One line for the events log.
    Activity(String),
    Audio(AudioLevels),
    Quit,
}

/// A parsed remote control line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Open(PanelKind),
    Close,
    Toggle(PanelKind),
    Tab(LayerTab),
    State,
    Profile(String),
    /// Cache-only profile lookup.
    Cached(String),
    /// Drop the cached profile so the next lookup refetches.
    Forget(String),
    Notify(String),
    Read(u64),
    Clear,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty")]
    Empty,

    #[error("unknown {0}")]
    UnknownCommand(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("{0}")]
    Panel(#[from] UnknownPanel),

    #[error("tab")]
    Tab,

    #[error("id")]
    Id,
}

/// Parse one whitespace-separated command line.
///
/// Commands:
/// - `open <panel>`
/// - `close`
/// - `toggle <panel>`
/// - `tab <1|2|3>`
/// - `state`
/// - `profile <address>`
/// - `cached <address>`
/// - `forget <address>`
/// - `notify <text...>`
/// - `read <id>`
/// - `clear`
/// - `quit`
pub fn parse_request(line: &str) -> Result<Request, ParseError> {
    let mut parts = line.split_whitespace();
    let head = parts.next().ok_or(ParseError::Empty)?;
    let arg = parts.next();

    match head.to_ascii_lowercase().as_str() {
        "open" => Ok(Request::Open(arg.ok_or(ParseError::Missing("panel"))?.parse()?)),
        "toggle" => Ok(Request::Toggle(
            arg.ok_or(ParseError::Missing("panel"))?.parse()?,
        )),
        "close" => Ok(Request::Close),
        "state" => Ok(Request::State),
        "quit" => Ok(Request::Quit),
        "tab" => {
            let n = arg
                .ok_or(ParseError::Missing("tab"))?
                .parse::<u8>()
                .map_err(|_| ParseError::Tab)?;
            LayerTab::from_number(n)
                .map(Request::Tab)
                .ok_or(ParseError::Tab)
        }
        "profile" => Ok(Request::Profile(
            arg.ok_or(ParseError::Missing("address"))?.to_string(),
        )),
        "cached" => Ok(Request::Cached(
            arg.ok_or(ParseError::Missing("address"))?.to_string(),
        )),
        "forget" => Ok(Request::Forget(
            arg.ok_or(ParseError::Missing("address"))?.to_string(),
        )),
        "read" => arg
            .ok_or(ParseError::Missing("id"))?
            .parse()
            .map(Request::Read)
            .map_err(|_| ParseError::Id),
        "clear" => Ok(Request::Clear),
        "notify" => {
            let first = arg.ok_or(ParseError::Missing("text"))?;
            let text = std::iter::once(first)
                .chain(parts)
                .collect::<Vec<_>>()
                .join(" ");
            Ok(Request::Notify(text))
        }
        _ => Err(ParseError::UnknownCommand(line.trim().to_string())),
    }
}
