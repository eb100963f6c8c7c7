//! Panel lifecycle coordinator and terminal console for a visual synth.
//!
//! The [`panel`] module is the core: a single-threaded state machine that
//! decides which side panel is shown and sequences its open/close
//! transitions. Everything else feeds it (keyboard, remote control, MIDI) or
//! draws it.

pub mod activity;
pub mod app;
pub mod cache;
pub mod clock;
pub mod command;
pub mod config;
pub mod console;
pub mod feed;
pub mod midi;
pub mod net;
pub mod panel;
pub mod panels;
pub mod profile;
pub mod ui;
