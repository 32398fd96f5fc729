//! Shared types used across the beacon firmware
//!
//! Small closed enums that several modules agree on: how chatty the
//! transcript is, which side a protocol line came from, and which color the
//! indicator should show.

use core::fmt;

/// Transcript verbosity
///
/// Fixed when the [`Transcript`](crate::protocol::transcript::Transcript) is
/// built; nothing mutates it afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Verbosity {
    /// No transcript output at all
    Quiet,
    /// Grouped one-liners
    #[default]
    Compact,
    /// Raw TX/RX/DBG lines
    Verbose,
}

impl Verbosity {
    /// Short name for banners and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Compact => "compact",
            Self::Verbose => "verbose",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a console transcript line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Direction {
    /// Written by the host to the modem
    Tx,
    /// Received from the modem
    Rx,
}

impl Direction {
    /// Tag used when echoing raw lines
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Tx => "TX",
            Self::Rx => "RX",
        }
    }
}

/// Indicator color
///
/// The LED collaborator decides how each of these is produced
/// electrically; the core only ever names one of the four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Color {
    /// Dark
    #[default]
    Off,
    /// Red, send failed
    Alert,
    /// Yellow, blink phase while a session runs
    Waiting,
    /// Green, message delivered
    Confirm,
}

impl Color {
    /// Nominal RGB value at full brightness
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Off => (0, 0, 0),
            Self::Alert => (255, 0, 0),
            Self::Waiting => (255, 200, 0),
            Self::Confirm => (0, 255, 0),
        }
    }

    /// Check if the color lights the LED
    #[must_use]
    pub const fn is_lit(self) -> bool {
        !matches!(self, Self::Off)
    }
}
