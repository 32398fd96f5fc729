//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the beacon hardware.
//! All pin mappings, timing and buffer sizes are centralized here.

use crate::modem::{ModemSettings, PowerProfile};
use crate::types::Verbosity;

/// Transcript verbosity selected at build time
#[cfg(feature = "log-quiet")]
pub const VERBOSITY: Verbosity = Verbosity::Quiet;

/// Transcript verbosity selected at build time
#[cfg(all(feature = "log-verbose", not(feature = "log-quiet")))]
pub const VERBOSITY: Verbosity = Verbosity::Verbose;

/// Transcript verbosity selected at build time
#[cfg(not(any(feature = "log-quiet", feature = "log-verbose")))]
pub const VERBOSITY: Verbosity = Verbosity::Compact;

/// Delay between failed send attempts in milliseconds (indicator stays red)
pub const RETRY_DELAY_MS: u32 = 10_000;

/// How long the indicator stays green after a delivered message
pub const SUCCESS_HOLD_MS: u32 = 10_000;

/// Half-period of the yellow blink while a session runs
pub const WAIT_BLINK_MS: u32 = 250;

/// Button settle window in milliseconds
pub const BUTTON_SETTLE_MS: u32 = 30;

/// Granularity of the retry delay; the indicator is serviced once per slice
pub const RETRY_SLICE_MS: u32 = 10;

/// Main loop poll interval in milliseconds
pub const POLL_INTERVAL_MS: u32 = 5;

/// Maximum message bytes in one MO payload (after the length byte)
pub const MAX_MESSAGE_LEN: usize = 110;

/// Full MO buffer: length byte plus message
pub const MO_BUFFER_SIZE: usize = 1 + MAX_MESSAGE_LEN;

/// MT receive buffer size (9603 MT limit is 270 bytes)
pub const MT_BUFFER_SIZE: usize = 270;

/// Longest transcript line kept by the line assembler
pub const LINE_BUFFER_SIZE: usize = 128;

/// Firmware revision string capacity
pub const FIRMWARE_VERSION_LEN: usize = 16;

/// Highest value reported by `AT+CSQ`
pub const MAX_SIGNAL_QUALITY: u8 = 5;

/// Operator console baud rate
pub const CONSOLE_BAUD: u32 = 115_200;

/// RockBLOCK UART baud rate
pub const MODEM_BAUD: u32 = 19_200;

/// Indicator brightness (0-255), kept dim for battery life
pub const PIXEL_BRIGHTNESS: u8 = 8;

/// Message sent by the ALERT button
pub const ALERT_MESSAGE: &str = "ALERT";

/// Message sent by the SOS button
pub const SOS_MESSAGE: &str = "SOS";

/// AT command timeout in seconds
pub const AT_TIMEOUT_SECS: u16 = 10;

/// Whole send/receive timeout in seconds
pub const SEND_RECEIVE_TIMEOUT_SECS: u16 = 120;

/// Modem power-up timeout in seconds
pub const STARTUP_TIMEOUT_SECS: u16 = 60;

/// Single `+SBDIX` session timeout in seconds
pub const SBD_SESSION_TIMEOUT_SECS: u16 = 180;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// ALERT button (active low, pull-up)
    pub const BTN_ALERT: &str = "PA9";

    /// SOS button (active low, pull-up)
    pub const BTN_SOS: &str = "PA8";

    /// Status LED red channel
    pub const LED_RED: &str = "PB0";

    /// Status LED green channel
    pub const LED_GREEN: &str = "PB1";

    /// Status LED blue channel
    pub const LED_BLUE: &str = "PB2";

    /// Console UART TX (ST-LINK virtual COM port)
    pub const CONSOLE_TX: &str = "PA2";

    /// Console UART RX (ST-LINK virtual COM port)
    pub const CONSOLE_RX: &str = "PA3";

    /// RockBLOCK UART TX
    pub const MODEM_TX: &str = "PC4";

    /// RockBLOCK UART RX
    pub const MODEM_RX: &str = "PC5";
}

/// Build the default modem settings profile
#[must_use]
pub const fn default_modem_settings() -> ModemSettings {
    ModemSettings {
        power_profile: PowerProfile::Default,
        at_timeout_secs: AT_TIMEOUT_SECS,
        send_receive_timeout_secs: SEND_RECEIVE_TIMEOUT_SECS,
        startup_timeout_secs: STARTUP_TIMEOUT_SECS,
        session_timeout_secs: SBD_SESSION_TIMEOUT_SECS,
        msstm_workaround: true,
        ring_alerts: false,
    }
}
