//! src/ui.rs
//!
//! Per-frame layout tree and the `Panel` drawing trait.

pub mod node;

pub use node::{Node, Panel, group, leaf};
