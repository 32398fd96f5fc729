//! Status Indicator Controller
//!
//! ```text
//!            set_mode(Waiting)          send failed
//!   Idle ───────────────────► Waiting ─────────────► Fail
//!    ▲                         (blink)                 │
//!    │                           │ send ok             │ retry
//!    │   hold expired            ▼                     ▼
//!    └──────────────────────── Success            Waiting ...
//! ```
//!
//! Only the blink toggles and the Success→Idle expiry depend on time;
//! everything else happens on an explicit [`Indicator::set_mode`].

use crate::config::{SUCCESS_HOLD_MS, WAIT_BLINK_MS};
use crate::time::{deadline_reached, elapsed_ms};
use crate::types::Color;

/// LED collaborator: shows one color on every pixel
pub trait Pixel {
    /// Display `color` until told otherwise
    fn show(&mut self, color: Color);
}

impl<P: Pixel + ?Sized> Pixel for &mut P {
    fn show(&mut self, color: Color) {
        (**self).show(color);
    }
}

/// Indicator mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum IndicatorMode {
    /// Dark
    #[default]
    Idle,
    /// Blinking yellow while the modem works
    Waiting,
    /// Steady red
    Fail,
    /// Steady green for the hold period
    Success,
}

impl IndicatorMode {
    /// Short name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Waiting => "waiting",
            Self::Fail => "fail",
            Self::Success => "success",
        }
    }
}

/// Indicator state machine driving a [`Pixel`]
#[derive(Debug)]
pub struct Indicator<P> {
    pixel: P,
    mode: IndicatorMode,
    color: Color,
    blink_on: bool,
    last_toggle_ms: u32,
    success_until: Option<u32>,
    blink_ms: u32,
    hold_ms: u32,
}

impl<P: Pixel> Indicator<P> {
    /// Create an idle indicator with the default timing
    ///
    /// The pixel is not touched until the first [`set_mode`](Self::set_mode).
    #[must_use]
    pub const fn new(pixel: P) -> Self {
        Self::with_timing(pixel, WAIT_BLINK_MS, SUCCESS_HOLD_MS)
    }

    /// Create an idle indicator with custom blink half-period and hold
    #[must_use]
    pub const fn with_timing(pixel: P, blink_ms: u32, hold_ms: u32) -> Self {
        Self {
            pixel,
            mode: IndicatorMode::Idle,
            color: Color::Off,
            blink_on: false,
            last_toggle_ms: 0,
            success_until: None,
            blink_ms,
            hold_ms,
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> IndicatorMode {
        self.mode
    }

    /// Color last sent to the pixel
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Blink phase (only meaningful while Waiting)
    #[must_use]
    pub const fn blink_on(&self) -> bool {
        self.blink_on
    }

    /// Time the Success hold ends, if in Success
    #[must_use]
    pub const fn success_until(&self) -> Option<u32> {
        self.success_until
    }

    /// Borrow the pixel collaborator
    #[must_use]
    pub const fn pixel(&self) -> &P {
        &self.pixel
    }

    /// Enter a mode and update the output immediately
    pub fn set_mode(&mut self, mode: IndicatorMode, now_ms: u32) {
        if mode != self.mode {
            debug!("indicator {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
        self.blink_on = false;
        self.success_until = None;

        match mode {
            IndicatorMode::Idle => self.show(Color::Off),
            IndicatorMode::Waiting => {
                self.last_toggle_ms = now_ms;
                self.show(Color::Off);
            }
            IndicatorMode::Fail => self.show(Color::Alert),
            IndicatorMode::Success => {
                self.success_until = Some(now_ms.wrapping_add(self.hold_ms));
                self.show(Color::Confirm);
            }
        }
    }

    /// Advance the blink; no-op outside Waiting
    ///
    /// Safe to call at any rate, including from inside the modem's blocking
    /// call. Never blocks.
    pub fn tick(&mut self, now_ms: u32) {
        if self.mode != IndicatorMode::Waiting {
            return;
        }
        if elapsed_ms(now_ms, self.last_toggle_ms) < self.blink_ms {
            return;
        }

        self.blink_on = !self.blink_on;
        self.last_toggle_ms = now_ms;
        self.show(if self.blink_on { Color::Waiting } else { Color::Off });
    }

    /// End the Success hold once it has expired
    ///
    /// Called once per control loop iteration. Returns `true` if the
    /// indicator went back to Idle.
    pub fn check_success_hold(&mut self, now_ms: u32) -> bool {
        match (self.mode, self.success_until) {
            (IndicatorMode::Success, Some(until)) if deadline_reached(now_ms, until) => {
                self.set_mode(IndicatorMode::Idle, now_ms);
                true
            }
            _ => false,
        }
    }

    fn show(&mut self, color: Color) {
        self.color = color;
        self.pixel.show(color);
    }
}
