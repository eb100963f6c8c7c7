//! src/midi/serial.rs
//!
//! Serial MIDI reader thread: reads raw bytes from a serial device (e.g. a
//! USB-MIDI bridge at 31250 baud), parses them, and forwards mapped actions
//! to the UI loop.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use super::mapping::{MidiAction, MidiMap};
use super::message::MidiMessage;
use super::parser::MidiParser;
use crate::command::Command;

pub const DEFAULT_BAUD: u32 = 31_250;

/// Commands produced by one accepted message: a monitor line for the events
/// log, then the mapped action if any.
pub fn commands_for(map: &MidiMap, msg: &MidiMessage) -> Vec<Command> {
    if !map.accepts(msg) {
        return Vec::new();
    }
    let mut out = vec![Command::Activity(format!("MIDI {msg}"))];
    match map.action_for(msg) {
        Some(MidiAction::Toggle(kind)) => out.push(Command::Toggle(kind)),
        Some(MidiAction::Close) => out.push(Command::Close),
        Some(MidiAction::SelectTab(tab)) => out.push(Command::SelectTab(tab)),
        None => {}
    }
    out
}

/// Pump bytes from `reader` until EOF, a hard IO error, or the UI hangs up.
pub fn pump<R: Read>(mut reader: R, map: &MidiMap, tx: &Sender<Command>) {
    let mut parser = MidiParser::new();
    let mut buf = [0u8; 64];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::TimedOut => continue,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "midi read failed");
                break;
            }
        };
        for msg in parser.feed(&buf[..n]) {
            for cmd in commands_for(map, &msg) {
                if tx.send(cmd).is_err() {
                    return;
                }
            }
        }
    }
}

/// Spawn the reader thread for `port_name`.
pub fn start_serial_reader(port_name: &str, baud_rate: u32, map: MidiMap, tx: Sender<Command>) {
    let port_name = port_name.to_string();
    thread::spawn(move || {
        info!(port = %port_name, baud_rate, "opening midi port");
        let port = match serialport::new(&port_name, baud_rate)
            .timeout(Duration::from_secs(10))
            .open()
        {
            Ok(p) => p,
            Err(e) => {
                warn!(port = %port_name, error = %e, "failed to open midi port");
                let _ = tx.send(Command::Notify(format!("MIDI port {port_name} unavailable")));
                return;
            }
        };
        let _ = tx.send(Command::Activity(format!("MIDI connected on {port_name}")));
        pump(port, &map, &tx);
        info!(port = %port_name, "midi reader exiting");
    });
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::mpsc;

    use super::*;
    use crate::panel::PanelKind;

    #[test]
    fn pump_forwards_monitor_lines_and_actions() {
        let (tx, rx) = mpsc::channel();
        let map = MidiMap::default_for_channel(0);
        pump(Cursor::new(vec![0x90, 40, 100, 0x80, 40, 0]), &map, &tx);
        drop(tx);

        let got: Vec<Command> = rx.iter().collect();
        assert_eq!(got.len(), 3);
        assert!(matches!(&got[0], Command::Activity(l) if l == "MIDI ch1 Note 40 vel 100"));
        assert!(matches!(got[1], Command::Toggle(PanelKind::Audio)));
        assert!(matches!(&got[2], Command::Activity(l) if l.contains("NoteOff")));
    }

    #[test]
    fn filtered_channel_produces_nothing() {
        let map = MidiMap::default_for_channel(3);
        let msg = MidiMessage::NoteOn {
            channel: 1,
            note: 36,
            velocity: 1,
        };
        assert!(commands_for(&map, &msg).is_empty());
    }
}
