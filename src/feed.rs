//! src/feed.rs
//!
//! Audio level feed. The console does no analysis of its own: levels arrive
//! from a producer thread and are only displayed by the audio panel.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::info;

use crate::command::Command;

/// Band levels, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioLevels {
    pub bass: f64,
    pub mid: f64,
    pub treble: f64,
}

impl AudioLevels {
    /// Exponential smoothing toward `target`; `alpha` 1.0 snaps.
    pub fn approach(self, target: AudioLevels, alpha: f64) -> AudioLevels {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |c: f64, t: f64| (c * (1.0 - a) + t * a).clamp(0.0, 1.0);
        AudioLevels {
            bass: mix(self.bass, target.bass),
            mid: mix(self.mid, target.mid),
            treble: mix(self.treble, target.treble),
        }
    }
}

/// Spawn a thread emitting smoothed random levels every `period` until the
/// receiving side goes away.
pub fn start_demo_feed(tx: Sender<Command>, period: Duration) {
    thread::spawn(move || {
        info!("demo audio feed started");
        let mut rng = rand::rng();
        let mut levels = AudioLevels::default();
        loop {
            let target = AudioLevels {
                bass: rng.random_range(0.0..1.0),
                mid: rng.random_range(0.0..0.8),
                treble: rng.random_range(0.0..0.6),
            };
            levels = levels.approach(target, 0.35);
            if tx.send(Command::Audio(levels)).is_err() {
                break;
            }
            thread::sleep(period);
        }
        info!("demo audio feed exiting");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_interpolates_and_clamps() {
        let start = AudioLevels::default();
        let target = AudioLevels {
            bass: 1.0,
            mid: 0.5,
            treble: 2.0,
        };
        let half = start.approach(target, 0.5);
        assert_eq!(half.bass, 0.5);
        assert_eq!(half.mid, 0.25);
        assert_eq!(half.treble, 1.0);
        assert_eq!(start.approach(target, 7.0).treble, 1.0);
    }
}
