//! src/panels.rs
//!
//! Renderable surfaces and re-exports.

pub mod footer;
pub mod host;
pub mod log;
pub mod status;
pub mod title;

pub use footer::FooterPanel;
pub use host::{HostPanel, slide_width};
pub use log::LogPanel;
pub use status::StatusPanel;
pub use title::TitlePanel;
