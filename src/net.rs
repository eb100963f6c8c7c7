//! src/net.rs
//!
//! Network-facing control surfaces.

pub mod remote;

pub use remote::{RemoteContext, remote_server};
