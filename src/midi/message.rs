//! src/midi/message.rs
//!
//! Channel voice messages the console reacts to.

use std::fmt;

/// A decoded channel message. `channel` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: u16 },
    Other { status: u8, data1: u8, data2: u8 },
}

impl MidiMessage {
    /// Decode a status byte with its data bytes. Note-on with velocity 0 is a
    /// note-off.
    pub fn decode(status: u8, data1: u8, data2: u8) -> MidiMessage {
        let channel = (status & 0x0f) + 1;
        match status & 0xf0 {
            0x90 if data2 > 0 => MidiMessage::NoteOn {
                channel,
                note: data1,
                velocity: data2,
            },
            0x90 | 0x80 => MidiMessage::NoteOff {
                channel,
                note: data1,
            },
            0xb0 => MidiMessage::ControlChange {
                channel,
                controller: data1,
                value: data2,
            },
            0xe0 => MidiMessage::PitchBend {
                channel,
                value: u16::from(data1 & 0x7f) | (u16::from(data2 & 0x7f) << 7),
            },
            _ => MidiMessage::Other {
                status,
                data1,
                data2,
            },
        }
    }

    pub fn channel(&self) -> Option<u8> {
        match *self {
            MidiMessage::NoteOn { channel, .. }
            | MidiMessage::NoteOff { channel, .. }
            | MidiMessage::ControlChange { channel, .. }
            | MidiMessage::PitchBend { channel, .. } => Some(channel),
            MidiMessage::Other { .. } => None,
        }
    }

    /// Number of data bytes following `status` (running status included).
    pub fn data_len(status: u8) -> usize {
        match status & 0xf0 {
            0xc0 | 0xd0 => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => write!(f, "ch{channel} Note {note} vel {velocity}"),
            MidiMessage::NoteOff { channel, note } => write!(f, "ch{channel} NoteOff {note}"),
            MidiMessage::ControlChange {
                channel,
                controller,
                value,
            } => write!(f, "ch{channel} CC {controller} = {value}"),
            MidiMessage::PitchBend { channel, value } => write!(f, "ch{channel} Pitch {value}"),
            MidiMessage::Other {
                status,
                data1,
                data2,
            } => write!(f, "Other {status:02x} {data1:02x} {data2:02x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_voice_messages() {
        assert_eq!(
            MidiMessage::decode(0x91, 36, 100),
            MidiMessage::NoteOn {
                channel: 2,
                note: 36,
                velocity: 100
            }
        );
        assert_eq!(
            MidiMessage::decode(0x90, 36, 0),
            MidiMessage::NoteOff { channel: 1, note: 36 }
        );
        assert_eq!(
            MidiMessage::decode(0xbf, 20, 127),
            MidiMessage::ControlChange {
                channel: 16,
                controller: 20,
                value: 127
            }
        );
        assert_eq!(
            MidiMessage::decode(0xe0, 0x00, 0x40),
            MidiMessage::PitchBend {
                channel: 1,
                value: 8192
            }
        );
    }

    #[test]
    fn program_change_takes_one_data_byte() {
        assert_eq!(MidiMessage::data_len(0xc3), 1);
        assert_eq!(MidiMessage::data_len(0xb0), 2);
    }
}
