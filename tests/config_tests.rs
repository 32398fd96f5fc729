//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --test config_tests

use sbd_beacon::config::*;
use sbd_beacon::modem::{ModemSettings, PowerProfile};
use sbd_beacon::protocol::payload::{printable, MoPayload};
use sbd_beacon::types::{Color, Direction, Verbosity};

// =============================================================================
// Timing Tests
// =============================================================================

#[test]
fn retry_and_hold_are_ten_seconds() {
    assert_eq!(RETRY_DELAY_MS, 10_000);
    assert_eq!(SUCCESS_HOLD_MS, 10_000);
}

#[test]
fn blink_is_visible() {
    // Slower than flicker fusion, faster than a session
    assert!(WAIT_BLINK_MS >= 100);
    assert!(WAIT_BLINK_MS <= 1_000);
}

#[test]
fn retry_slices_divide_delay() {
    assert_eq!(RETRY_DELAY_MS % RETRY_SLICE_MS, 0);
    assert!(RETRY_SLICE_MS < WAIT_BLINK_MS);
}

#[test]
fn polling_faster_than_settle() {
    assert!(POLL_INTERVAL_MS < BUTTON_SETTLE_MS);
}

// =============================================================================
// Buffer Size Tests
// =============================================================================

#[test]
fn mo_buffer_holds_length_byte() {
    assert_eq!(MO_BUFFER_SIZE, MAX_MESSAGE_LEN + 1);
    // Length must fit in the prefix byte
    assert!(MAX_MESSAGE_LEN <= usize::from(u8::MAX));
}

#[test]
fn mt_buffer_matches_modem_limit() {
    assert_eq!(MT_BUFFER_SIZE, 270);
}

#[test]
fn line_buffer_fits_status_record() {
    let longest = "+SBDIX: 32, 65535, 2, 65535, 270, 50";
    assert!(longest.len() <= LINE_BUFFER_SIZE);
}

#[test]
fn button_messages_fit_payload() {
    assert!(ALERT_MESSAGE.len() <= MAX_MESSAGE_LEN);
    assert!(SOS_MESSAGE.len() <= MAX_MESSAGE_LEN);
    assert_ne!(ALERT_MESSAGE, SOS_MESSAGE);
}

// =============================================================================
// Modem Settings Tests
// =============================================================================

#[test]
fn default_settings_profile() {
    let settings = ModemSettings::default();
    assert_eq!(settings, default_modem_settings());
    assert_eq!(settings.power_profile, PowerProfile::Default);
    assert_eq!(settings.at_timeout_secs, 10);
    assert_eq!(settings.send_receive_timeout_secs, 120);
    assert_eq!(settings.startup_timeout_secs, 60);
    assert_eq!(settings.session_timeout_secs, 180);
    assert!(settings.msstm_workaround);
    assert!(!settings.ring_alerts);
}

#[test]
fn serial_rates() {
    assert_eq!(MODEM_BAUD, 19_200);
    assert_eq!(CONSOLE_BAUD, 115_200);
}

#[test]
fn pins_are_distinct() {
    let all = [
        pins::BTN_ALERT,
        pins::BTN_SOS,
        pins::LED_RED,
        pins::LED_GREEN,
        pins::LED_BLUE,
        pins::CONSOLE_TX,
        pins::CONSOLE_RX,
        pins::MODEM_TX,
        pins::MODEM_RX,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// =============================================================================
// Verbosity Tests
// =============================================================================

#[test]
#[cfg(not(any(feature = "log-quiet", feature = "log-verbose")))]
fn default_build_is_compact() {
    assert_eq!(VERBOSITY, Verbosity::Compact);
    assert_eq!(Verbosity::default(), Verbosity::Compact);
}

#[test]
fn verbosity_names() {
    assert_eq!(Verbosity::Quiet.to_string(), "quiet");
    assert_eq!(Verbosity::Compact.to_string(), "compact");
    assert_eq!(Verbosity::Verbose.to_string(), "verbose");
}

// =============================================================================
// Shared Type Tests
// =============================================================================

#[test]
fn direction_tags() {
    assert_eq!(Direction::Tx.tag(), "TX");
    assert_eq!(Direction::Rx.tag(), "RX");
}

#[test]
fn only_off_is_dark() {
    assert!(!Color::Off.is_lit());
    assert_eq!(Color::Off.rgb(), (0, 0, 0));
    for color in [Color::Alert, Color::Waiting, Color::Confirm] {
        assert!(color.is_lit());
    }
    assert_eq!(Color::Alert.rgb().0, 255);
    assert_eq!(Color::Confirm.rgb().1, 255);
}

// =============================================================================
// Payload Tests
// =============================================================================

#[test]
fn oversize_text_truncated_to_max() {
    let text: String = (0..MAX_MESSAGE_LEN + 17)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect();
    let payload = MoPayload::from_text(&text);

    assert_eq!(payload.message_len(), MAX_MESSAGE_LEN);
    assert_eq!(payload.as_bytes().len(), MO_BUFFER_SIZE);
    assert_eq!(payload.message(), &text.as_bytes()[..MAX_MESSAGE_LEN]);
}

#[test]
fn printable_replaces_control_bytes() {
    let rendered: String = printable(b"OK\r\n\x00~\x7f").collect();
    assert_eq!(rendered, "OK...~.");
}
