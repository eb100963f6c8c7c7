//! src/panel/timing.rs
//!
//! Transition durations shared by the sequencer and the renderer.
//!
//! The host panel derives its slide progress from these same constants, so the
//! rendered animation always ends exactly when the sequencer's timer fires.

use std::time::Duration;

/// Time from `open_panel` until the entry animation is considered done.
pub const OPEN_ANIMATION: Duration = Duration::from_millis(300);

/// Time from `close_panel` until the panel is removed.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(250);

/// Fraction in `[0, 1]` of `total` covered by `elapsed`.
pub fn progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}
