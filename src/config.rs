//! src/config.rs
//!
//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::midi::serial::DEFAULT_BAUD;
use crate::panel::PanelKind;
use crate::profile::DEFAULT_IPFS_GATEWAY;

/// Terminal panel console for the visual synth.
#[derive(Debug, Clone, Parser)]
#[command(name = "vj-console", version, about)]
pub struct Args {
    /// Remote control bind address.
    #[arg(long, env = "VJ_REMOTE", default_value = "127.0.0.1:4000")]
    pub remote: String,

    /// Serial MIDI device (e.g. /dev/ttyACM0). MIDI input is off when unset.
    #[arg(long, env = "VJ_MIDI_PORT")]
    pub midi_port: Option<String>,

    #[arg(long, env = "VJ_MIDI_BAUD", default_value_t = DEFAULT_BAUD)]
    pub midi_baud: u32,

    /// MIDI channel to listen on, 0 for all.
    #[arg(long, env = "VJ_MIDI_CHANNEL", default_value_t = 0,
          value_parser = clap::value_parser!(u8).range(0..=16))]
    pub midi_channel: u8,

    /// Panel shown at startup, without an opening animation.
    #[arg(long, env = "VJ_INITIAL_PANEL")]
    pub initial_panel: Option<PanelKind>,

    /// Directory holding `<address>.json` profile records.
    #[arg(long, env = "VJ_PROFILES_DIR")]
    pub profiles_dir: Option<PathBuf>,

    #[arg(long, env = "VJ_IPFS_GATEWAY", default_value = DEFAULT_IPFS_GATEWAY)]
    pub ipfs_gateway: String,

    #[arg(long, env = "VJ_PROFILE_TTL_SECS", default_value_t = 300)]
    pub profile_ttl_secs: u64,

    /// UI frame period in milliseconds.
    #[arg(long, env = "VJ_FRAME_MS", default_value_t = 50)]
    pub frame_ms: u64,

    #[arg(long, env = "VJ_LOG_FILE", default_value = "vj-console.log")]
    pub log_file: PathBuf,

    /// JSON file notifications are kept in between sessions.
    #[arg(long, env = "VJ_STATE_FILE", default_value = "vj-console.state.json")]
    pub state_file: PathBuf,

    /// Feed the audio panel with synthetic levels.
    #[arg(long, env = "VJ_DEMO_AUDIO")]
    pub demo_audio: bool,
}

impl Args {
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_secs)
    }
}
