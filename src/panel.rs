//! src/panel.rs
//!
//! Panel lifecycle: kinds, shared transition timing, and the manager.

pub mod kind;
pub mod manager;
pub mod timing;

pub use kind::{LayerTab, PanelKind, UnknownPanel};
pub use manager::{Animating, PanelManager, PanelState, Phase};
