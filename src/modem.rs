//! Modem collaborator interface
//!
//! The RockBLOCK's AT command engine (power sequencing, `+SBDWB` framing,
//! `+SBDIX` session retries, MSSTM pacing) is provided by an external
//! driver. This module is the narrow contract the core talks to it through.
//!
//! Every blocking operation receives a [`SessionHooks`] object. The driver
//! calls [`SessionHooks::progress`] repeatedly while it waits on the radio,
//! and hands every complete transcript line to the line sinks as it
//! happens. The hooks run synchronously inside the blocking call.

use core::ops::ControlFlow;

use heapless::String;
use thiserror::Error;

use crate::config::FIRMWARE_VERSION_LEN;
use crate::types::Direction;

/// Callbacks invoked by the modem driver during a blocking operation
///
/// Implementations must return quickly: no waiting I/O, no sleeping, and no
/// calls back into the modem. A blocked hook freezes the whole device with no
/// way to abort.
pub trait SessionHooks {
    /// Periodic progress callback; `Break` asks the driver to cancel
    fn progress(&mut self) -> ControlFlow<()>;

    /// One complete line of the AT console transcript
    fn console_line(&mut self, direction: Direction, line: &str);

    /// One complete line of the driver's own diagnostic output
    fn diagnostic_line(&mut self, line: &str);
}

/// Hooks that ignore everything and never cancel
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl SessionHooks for NoHooks {
    fn progress(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn console_line(&mut self, _direction: Direction, _line: &str) {}

    fn diagnostic_line(&mut self, _line: &str) {}
}

/// Modem firmware revision (`AT+CGMR`)
pub type FirmwareVersion = String<FIRMWARE_VERSION_LEN>;

/// Iridium SBD modem driver
pub trait Modem {
    /// Power up and verify the modem responds
    ///
    /// # Errors
    ///
    /// Any error here is treated as fatal by the beacon.
    fn begin(&mut self, hooks: &mut dyn SessionHooks) -> Result<(), SbdError>;

    /// Apply timeouts and power profile
    fn configure(&mut self, settings: &ModemSettings);

    /// Read the firmware revision
    ///
    /// # Errors
    ///
    /// Returns the driver error if the query fails.
    fn firmware_version(
        &mut self,
        hooks: &mut dyn SessionHooks,
    ) -> Result<FirmwareVersion, SbdError>;

    /// Read signal quality, 0 (none) to 5 (best)
    ///
    /// # Errors
    ///
    /// Returns the driver error if the query fails.
    fn signal_quality(&mut self, hooks: &mut dyn SessionHooks) -> Result<u8, SbdError>;

    /// Send one MO message and collect any queued MT message
    ///
    /// Blocks for the whole exchange (seconds to minutes). On success returns
    /// the number of MT bytes written into `inbound`.
    ///
    /// # Errors
    ///
    /// Returns the reason the exchange failed.
    fn send_receive(
        &mut self,
        payload: &[u8],
        inbound: &mut [u8],
        hooks: &mut dyn SessionHooks,
    ) -> Result<usize, SbdError>;
}

/// Modem power profile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum PowerProfile {
    /// Supply can deliver the 9603's transmit bursts directly
    #[default]
    Default,
    /// Low-current supply (e.g. USB), driver throttles session retries
    LowCurrent,
}

/// Driver tuning applied once at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct ModemSettings {
    /// Power profile
    pub power_profile: PowerProfile,
    /// Timeout for a single AT command
    pub at_timeout_secs: u16,
    /// Timeout for the whole send/receive
    pub send_receive_timeout_secs: u16,
    /// Timeout for modem power-up
    pub startup_timeout_secs: u16,
    /// Timeout for one `+SBDIX` session
    pub session_timeout_secs: u16,
    /// Use `-MSSTM` system time to pace session attempts
    pub msstm_workaround: bool,
    /// Listen for ring alerts (needs the RI pin wired)
    pub ring_alerts: bool,
}

impl Default for ModemSettings {
    fn default() -> Self {
        crate::config::default_modem_settings()
    }
}

/// How the beacon reacts to an error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Severity {
    /// Wait the retry delay and send again
    Retryable,
    /// Cannot resolve itself; stop and show red forever
    Fatal,
}

/// Send/receive failure reported by the modem driver
///
/// Numeric codes match the IridiumSBD Arduino library so transcripts can be
/// compared against its documentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum SbdError {
    /// Modem was already powered when `begin` ran
    #[error("Already awake.")]
    AlreadyAwake,
    /// UART read/write failed
    #[error("Serial failure.")]
    SerialFailure,
    /// Unexpected response to an AT command
    #[error("Protocol error.")]
    ProtocolError,
    /// Progress callback asked to cancel
    #[error("Cancelled by callback.")]
    Cancelled,
    /// Nothing answered on the UART
    #[error("No modem detected.")]
    NoModemDetected,
    /// `+SBDIX` reported a non-retryable status
    #[error("SBDIX fatal error.")]
    SbdixFatal,
    /// Session did not complete in time
    #[error("Timeout.")]
    Timeout,
    /// MT message did not fit the receive buffer
    #[error("Receive overflow.")]
    RxOverflow,
    /// Driver entered from inside its own callback
    #[error("Reentrant call.")]
    Reentrant,
    /// Modem is powered down
    #[error("Modem is asleep.")]
    IsAsleep,
    /// Sleep requested without a sleep pin
    #[error("No sleep pin configured.")]
    NoSleepPin,
    /// No satellite network service
    #[error("No network service.")]
    NoNetwork,
    /// MO payload exceeds the modem limit
    #[error("Message too long.")]
    MessageTooLong,
    /// Code this firmware does not know
    #[error("Unknown error.")]
    Unknown(i32),
}

impl SbdError {
    /// Map an IridiumSBD numeric code; `None` for success (0)
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        let err = match code {
            0 => return None,
            1 => Self::AlreadyAwake,
            2 => Self::SerialFailure,
            3 => Self::ProtocolError,
            4 => Self::Cancelled,
            5 => Self::NoModemDetected,
            6 => Self::SbdixFatal,
            7 => Self::Timeout,
            8 => Self::RxOverflow,
            9 => Self::Reentrant,
            10 => Self::IsAsleep,
            11 => Self::NoSleepPin,
            12 => Self::NoNetwork,
            13 => Self::MessageTooLong,
            other => Self::Unknown(other),
        };
        Some(err)
    }

    /// IridiumSBD numeric code
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::AlreadyAwake => 1,
            Self::SerialFailure => 2,
            Self::ProtocolError => 3,
            Self::Cancelled => 4,
            Self::NoModemDetected => 5,
            Self::SbdixFatal => 6,
            Self::Timeout => 7,
            Self::RxOverflow => 8,
            Self::Reentrant => 9,
            Self::IsAsleep => 10,
            Self::NoSleepPin => 11,
            Self::NoNetwork => 12,
            Self::MessageTooLong => 13,
            Self::Unknown(code) => code,
        }
    }

    /// Whether retrying can help
    ///
    /// Missing hardware and wiring problems are fatal. Everything else,
    /// including an oversize message (already truncated before the call),
    /// is retried unchanged.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::NoModemDetected | Self::NoSleepPin => Severity::Fatal,
            Self::AlreadyAwake
            | Self::SerialFailure
            | Self::ProtocolError
            | Self::Cancelled
            | Self::SbdixFatal
            | Self::Timeout
            | Self::RxOverflow
            | Self::Reentrant
            | Self::IsAsleep
            | Self::NoNetwork
            | Self::MessageTooLong
            | Self::Unknown(_) => Severity::Retryable,
        }
    }

    /// Check if the beacon should give up
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self.severity(), Severity::Fatal)
    }
}
