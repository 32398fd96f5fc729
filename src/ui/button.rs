//! Push Buttons
//!
//! Both buttons are wired active-low to ground with the MCU pull-up, so the
//! idle level is high and a press is a high→low edge.

use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::config::{ALERT_MESSAGE, BUTTON_SETTLE_MS, SOS_MESSAGE};
use crate::time::elapsed_ms;

/// Press-edge detector for one active-low input
///
/// The previous level is recorded on every sample, so contact bounce never
/// leaves the detector out of step with the pin. An edge is only reported
/// once the settle window has passed since the last reported edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct EdgeDetector {
    last_level: bool,
    last_edge_ms: Option<u32>,
    settle_ms: u32,
}

impl EdgeDetector {
    /// Create a detector that starts at the idle (high) level
    #[must_use]
    pub const fn new(settle_ms: u32) -> Self {
        Self {
            last_level: true,
            last_edge_ms: None,
            settle_ms,
        }
    }

    /// Feed one sample; returns `true` on an accepted press edge
    pub fn update(&mut self, level: bool, now_ms: u32) -> bool {
        let falling = self.last_level && !level;
        self.last_level = level;

        if !falling {
            return false;
        }

        let settled = self
            .last_edge_ms
            .map_or(true, |last| elapsed_ms(now_ms, last) >= self.settle_ms);
        if settled {
            self.last_edge_ms = Some(now_ms);
        }
        settled
    }

    /// Level recorded by the last sample
    #[must_use]
    pub const fn last_level(&self) -> bool {
        self.last_level
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(BUTTON_SETTLE_MS)
    }
}

/// Debounced active-low button on a GPIO input
pub struct Button<I> {
    pin: I,
    detector: EdgeDetector,
}

impl<I: InputPin> Button<I> {
    /// Create a button with the default settle window
    #[must_use]
    pub fn new(pin: I) -> Self {
        Self {
            pin,
            detector: EdgeDetector::default(),
        }
    }

    /// Create a button with a custom settle window
    #[must_use]
    pub fn with_settle(pin: I, settle_ms: u32) -> Self {
        Self {
            pin,
            detector: EdgeDetector::new(settle_ms),
        }
    }

    /// Sample the pin; returns `true` on a press edge
    ///
    /// A read error counts as the idle level.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let level = self.pin.is_high().unwrap_or(true);
        self.detector.update(level, now_ms)
    }

    /// Check if the button was held down at the last sample
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        !self.detector.last_level()
    }
}

/// Which button fired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Trigger {
    /// ALERT button
    Alert,
    /// SOS button
    Sos,
}

impl Trigger {
    /// Message text sent for this button
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Alert => ALERT_MESSAGE,
            Self::Sos => SOS_MESSAGE,
        }
    }
}

/// The beacon's two buttons
pub struct Buttons<A, S> {
    alert: Button<A>,
    sos: Button<S>,
}

impl<A: InputPin, S: InputPin> Buttons<A, S> {
    /// Pair up the ALERT and SOS buttons
    #[must_use]
    pub const fn new(alert: Button<A>, sos: Button<S>) -> Self {
        Self { alert, sos }
    }

    /// Sample both buttons; ALERT is reported first if both fire together
    pub fn poll(&mut self, now_ms: u32) -> Vec<Trigger, 2> {
        let mut fired = Vec::new();
        if self.alert.poll(now_ms) {
            let _ = fired.push(Trigger::Alert);
        }
        if self.sos.poll(now_ms) {
            let _ = fired.push(Trigger::Sos);
        }
        fired
    }
}
