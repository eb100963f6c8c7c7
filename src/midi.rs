//! src/midi.rs
//!
//! MIDI controller input.

pub mod mapping;
pub mod message;
pub mod parser;
pub mod serial;

pub use mapping::{MidiAction, MidiMap};
pub use message::MidiMessage;
pub use parser::MidiParser;
