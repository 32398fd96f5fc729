//! Time Abstractions
//!
//! The core reads a free-running millisecond counter and never assumes it
//! starts at zero. All comparisons use `wrapping_sub`, so the ~49 day wrap
//! of a `u32` counter is harmless.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, tolerant of counter wrap
#[must_use]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Check whether `deadline` has been reached at `now`
///
/// A deadline is considered reached when it lies at most half the counter
/// range in the past.
#[must_use]
pub const fn deadline_reached(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) < u32::MAX / 2
}
