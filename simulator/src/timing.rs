//! Simulated clock. The panel engine only sees `f32` seconds; the
//! `Duration` used for pacing stays on the host side.

use std::time::Duration;

/// Simulated time between frames (20 FPS). With `--realtime` the main loop
/// also sleeps out the remainder of each frame.
pub const FRAME_TIME: Duration = Duration::from_millis(50);

/// Simulated timestamp of `frame`, in seconds.
pub fn frame_timestamp(frame: u32) -> f32 { frame as f32 * FRAME_TIME.as_secs_f32() }
