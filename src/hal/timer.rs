//! Timer Abstractions
//!
//! Clock and delay backed by the embassy time driver. The control loop is
//! blocking; [`Delay`] spins on the driver's tick counter.

use embassy_time::Instant;

use crate::time::Clock;

/// Blocking `DelayNs` over the embassy time driver
pub use embassy_time::Delay;

/// Millisecond clock over [`Instant::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation is the intended wrap
        Instant::now().as_millis() as u32
    }
}
