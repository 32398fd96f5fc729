//! SBD Beacon Firmware Library
//!
//! Core logic for a two-button satellite beacon built around a RockBLOCK
//! (Iridium 9602/9603) modem and a single RGB status indicator. Pressing a
//! button sends a short fixed message ("ALERT" or "SOS") over Short Burst
//! Data and retries until the gateway accepts it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Beacon (button edges → send/retry loop)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │          PROTOCOL LAYER           │       UI LAYER           │
//! │  Transcript classifier │ +SBDIX   │  Indicator │ Buttons     │
//! │  parser │ MO payload              │                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 COLLABORATOR INTERFACES                      │
//! │  Modem (AT engine) │ Pixel │ InputPin │ Clock │ DelayNs      │
//! ├─────────────────────────────────────────────────────────────┤
//! │            HAL (embedded only: embassy-stm32/time)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The AT command engine itself lives behind the [`modem::Modem`] trait; this
//! crate only consumes the transcript it produces and the outcome it returns.
//!
//! # Design Principles
//!
//! - **One owned core**: all mutable state lives in [`beacon::Beacon`] and is
//!   borrowed into the modem's progress callback, never in statics
//! - **Closed enums**: commands, indicator modes and errors are matched
//!   exhaustively
//! - **Injected time**: [`time::Clock`] and `embedded_hal::delay::DelayNs`
//!   keep the retry loop testable on the host
//! - **No unsafe in application code**

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod macros;

/// Hardware Abstraction Layer
///
/// Board bring-up and adapters from STM32 peripherals to the collaborator
/// traits used by the core.
#[cfg(feature = "embedded")]
pub mod hal;

/// Modem collaborator interface
///
/// The `Modem` trait, the session hooks it calls back into, and the error
/// taxonomy of a send/receive.
pub mod modem;

/// SBD protocol helpers
///
/// Status record parsing, transcript classification, MO payload framing.
pub mod protocol;

/// User Interface
///
/// Status indicator state machine and button edge detection.
pub mod ui;

/// Button-triggered send/retry driver
pub mod beacon;

/// Time abstractions
pub mod time;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::beacon::{Beacon, SendReport};
    pub use crate::config::*;
    pub use crate::modem::{Modem, ModemSettings, SbdError, SessionHooks};
    pub use crate::protocol::status::SessionResult;
    pub use crate::protocol::transcript::Transcript;
    pub use crate::time::Clock;
    pub use crate::types::*;
    pub use crate::ui::button::{Button, Buttons, Trigger};
    pub use crate::ui::indicator::{Indicator, Pixel};

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::digital::InputPin;
}
