//! src/activity.rs
//!
//! Bounded notification list and events log shown by the side panels.
//!
//! Notifications outlive the process: they are saved to a JSON state file on
//! exit and loaded again at startup. The events log is per session.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_NOTIFICATIONS: usize = 100;
pub const MAX_EVENTS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub read: bool,
    /// Wall-clock creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed state file: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk layout of the state file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    notifications: Vec<Notification>,
}

/// Milliseconds since the Unix epoch, 0 if the system clock is before it.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Notifications, oldest at front. Memory stays bounded by dropping the oldest.
#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
    next_id: u64,
}

impl Notifications {
    /// Rebuild from stored entries, keeping the newest and continuing ids
    /// after the largest one seen.
    pub fn from_entries(entries: impl IntoIterator<Item = Notification>) -> Self {
        let mut items: VecDeque<Notification> = entries.into_iter().collect();
        while items.len() > MAX_NOTIFICATIONS {
            items.pop_front();
        }
        let next_id = items.iter().map(|n| n.id).max().unwrap_or(0);
        Self { items, next_id }
    }

    /// Load from `path`. A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let state: PersistedState = serde_json::from_str(&text)?;
        Ok(Self::from_entries(state.notifications))
    }

    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let state = PersistedState {
            notifications: self.items.iter().cloned().collect(),
        };
        fs::write(path, serde_json::to_string_pretty(&state)?)?;
        Ok(())
    }

    pub fn push(&mut self, message: impl Into<String>, timestamp: u64) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push_back(Notification {
            id,
            message: message.into(),
            read: false,
            timestamp,
        });
        while self.items.len() > MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        id
    }

    /// Returns false when `id` is unknown.
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        self.items.iter_mut().for_each(|n| n.read = true);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Activity lines from MIDI and remote clients, newest last.
#[derive(Debug, Default)]
pub struct EventLog {
    lines: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > MAX_EVENTS {
            self.lines.pop_front();
        }
    }

    /// The last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &String> {
        self.lines.iter().skip(self.lines.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_track_read_state() {
        let now = unix_millis();
        let mut n = Notifications::default();
        let a = n.push("saved", now);
        n.push("minted", now);
        assert_eq!(n.unread_count(), 2);
        assert!(n.mark_read(a));
        assert!(!n.mark_read(99));
        assert_eq!(n.unread_count(), 1);
        n.mark_all_read();
        assert_eq!(n.unread_count(), 0);
        n.clear();
        assert!(n.is_empty());
    }

    #[test]
    fn notifications_are_bounded() {
        let now = unix_millis();
        let mut n = Notifications::default();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            n.push(format!("n{i}"), now);
        }
        assert_eq!(n.len(), MAX_NOTIFICATIONS);
        assert_eq!(n.iter().next().map(|x| x.message.as_str()), Some("n5"));
    }

    #[test]
    fn notifications_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut n = Notifications::default();
        let first = n.push("layer saved", 1_700_000_000_000);
        n.push("token minted", 1_700_000_000_500);
        n.mark_read(first);
        n.save(&path).unwrap();

        let mut loaded = Notifications::load(&path).unwrap();
        assert_eq!(loaded.iter().collect::<Vec<_>>(), n.iter().collect::<Vec<_>>());
        assert_eq!(loaded.unread_count(), 1);
        assert_eq!(loaded.push("after restart", 0), 3);
    }

    #[test]
    fn missing_state_file_is_empty_and_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Notifications::load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Notifications::load(&path), Err(StateError::Json(_))));
    }

    #[test]
    fn event_log_tail() {
        let mut log = EventLog::default();
        for i in 0..(MAX_EVENTS + 1) {
            log.push(format!("e{i}"));
        }
        assert_eq!(log.len(), MAX_EVENTS);
        let tail: Vec<_> = log.tail(2).cloned().collect();
        assert_eq!(tail, vec![format!("e{}", MAX_EVENTS - 1), format!("e{MAX_EVENTS}")]);
    }
}
