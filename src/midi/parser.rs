//! src/midi/parser.rs
//!
//! Byte-stream MIDI parser with running status.

use super::message::MidiMessage;

/// Incremental parser: feed bytes as they arrive from the wire.
#[derive(Debug, Default)]
pub struct MidiParser {
    status: Option<u8>,
    data: [u8; 2],
    have: usize,
    in_sysex: bool,
}

impl MidiParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one byte, returning a message once one completes.
    pub fn push(&mut self, byte: u8) -> Option<MidiMessage> {
        // realtime bytes may appear anywhere, even inside other messages
        if byte >= 0xf8 {
            return None;
        }

        if byte & 0x80 != 0 {
            match byte {
                0xf0 => {
                    self.in_sysex = true;
                    self.status = None;
                }
                0xf7 => self.in_sysex = false,
                0xf1..=0xf6 => {
                    // system common cancels running status; payload is ignored
                    self.in_sysex = false;
                    self.status = None;
                }
                _ => {
                    self.in_sysex = false;
                    self.status = Some(byte);
                }
            }
            self.have = 0;
            return None;
        }

        if self.in_sysex {
            return None;
        }
        let status = self.status?;
        self.data[self.have] = byte;
        self.have += 1;

        if self.have < MidiMessage::data_len(status) {
            return None;
        }
        self.have = 0;
        let data2 = if MidiMessage::data_len(status) == 2 {
            self.data[1]
        } else {
            0
        };
        Some(MidiMessage::decode(status, self.data[0], data2))
    }

    /// Feed a buffer, collecting every completed message.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<MidiMessage> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }
}
