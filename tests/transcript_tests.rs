//! Transcript Classifier Tests
//!
//! Tests for the QUIET / COMPACT / VERBOSE renderings of the modem's AT
//! console transcript.
//! Run with: cargo test --test transcript_tests

use sbd_beacon::protocol::transcript::{ActiveCommand, Transcript, TranscriptContext};
use sbd_beacon::types::{Direction, Verbosity};

/// Feed `(direction, line)` pairs and return the printed output
fn feed(transcript: &mut Transcript, lines: &[(Direction, &str)]) -> String {
    let mut out = String::new();
    for (direction, line) in lines {
        transcript.console_line(*direction, line, &mut out);
    }
    out
}

fn compact() -> Transcript {
    Transcript::new(Verbosity::Compact)
}

use Direction::{Rx, Tx};

// =============================================================================
// Compact: Binary Write Grouping
// =============================================================================

#[test]
fn write_binary_sequence_is_grouped() {
    let mut transcript = compact();
    let out = feed(
        &mut transcript,
        &[
            (Tx, "AT+SBDWB=6"),
            (Rx, "AT+SBDWB=6"),
            (Rx, "READY"),
            (Tx, "[05 41 4C 45 52 54] csum=0x0181"),
            (Rx, "0"),
            (Rx, ""),
            (Rx, "OK"),
        ],
    );

    assert_eq!(
        out,
        "\nbegin binary write (6 bytes)\n\
         write ready, expecting 6 bytes\n\
         checksum accepted\n\
         write complete\n"
    );
}

#[test]
fn write_binary_completion_resets_context() {
    let mut transcript = compact();
    feed(&mut transcript, &[(Tx, "AT+SBDWB=6")]);

    let ctx = transcript.context();
    assert_eq!(ctx.active, ActiveCommand::WriteBinary);
    assert_eq!(ctx.expected_bytes, Some(6));
    assert!(!ctx.write_ready);

    feed(&mut transcript, &[(Rx, "READY")]);
    assert!(transcript.context().write_ready);

    feed(&mut transcript, &[(Rx, "0"), (Rx, "OK")]);
    assert_eq!(transcript.context(), TranscriptContext::INITIAL);
    assert_eq!(transcript.context(), TranscriptContext::default());
}

#[test]
fn ok_before_ready_is_suppressed() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Tx, "AT+SBDWB=3"), (Rx, "OK")]);

    assert_eq!(out, "\nbegin binary write (3 bytes)\n");
    assert_eq!(transcript.context().active, ActiveCommand::WriteBinary);
}

#[test]
fn ready_outside_write_falls_through() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Tx, "AT+CSQ"), (Rx, "READY"), (Rx, "0")]);

    assert_eq!(out, "query signal quality\nREADY\n0\n");
}

#[test]
fn new_command_replaces_context() {
    let mut transcript = compact();
    feed(&mut transcript, &[(Tx, "AT+SBDWB=6"), (Rx, "READY")]);
    feed(&mut transcript, &[(Tx, "AT+SBDIX")]);

    let ctx = transcript.context();
    assert_eq!(ctx.active, ActiveCommand::Session);
    assert_eq!(ctx.expected_bytes, None);
    assert!(!ctx.write_ready);
}

// =============================================================================
// Compact: Command Descriptions
// =============================================================================

#[test]
fn outbound_commands_are_described() {
    let mut transcript = compact();
    let out = feed(
        &mut transcript,
        &[
            (Tx, "AT"),
            (Tx, "ATE1"),
            (Tx, "AT&K0"),
            (Tx, "AT+CGMR"),
            (Tx, "AT+CSQF"),
            (Tx, "AT-MSSTM"),
            (Tx, "AT+SBDRB"),
            (Tx, "AT+XYZ=1"),
        ],
    );

    assert_eq!(
        out,
        "attention check\n\
         enable echo\n\
         disable flow control\n\
         query firmware version\n\
         query signal quality (fast)\n\
         tick read\n\
         read MT message\n\
         command AT+XYZ=1\n"
    );
}

#[test]
fn commands_match_case_insensitively() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Tx, "at+sbdix")]);

    assert_eq!(out, "\nbegin session (send/receive)\n");
    assert_eq!(transcript.context().active, ActiveCommand::Session);
}

#[test]
fn tick_read_sets_context() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Tx, "AT-MSSTM"), (Rx, "-MSSTM: 7a1c3e02")]);

    assert_eq!(out, "tick read\npacing tick read\n");
    assert_eq!(transcript.context().active, ActiveCommand::TickRead);
}

// =============================================================================
// Compact: Responses
// =============================================================================

#[test]
fn echoes_are_suppressed() {
    let mut transcript = compact();
    for command in ["AT+SBDIX", "AT+CSQ", "AT+SBDWB=6", "AT"] {
        transcript.console_line(Tx, command, &mut String::new());
        let out = feed(&mut transcript, &[(Rx, command)]);
        assert!(out.is_empty(), "{command}");
    }
}

#[test]
fn signal_quality_value_only() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Rx, "+CSQ:4"), (Rx, "+CSQF: 2")]);

    assert_eq!(out, "signal quality: 4\nsignal quality: 2\n");
}

#[test]
fn bracket_dumps_and_blank_lines_are_suppressed() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Rx, "[41 4C]"), (Rx, ""), (Rx, "   ")]);

    assert!(out.is_empty());
}

#[test]
fn error_is_reworded() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Rx, "ERROR")]);

    assert_eq!(out, "command error\n");
}

#[test]
fn unknown_lines_are_printed() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Rx, "SBDRING"), (Rx, "+CIER:1,0,1,0")]);

    assert_eq!(out, "SBDRING\n+CIER:1,0,1,0\n");
}

#[test]
fn malformed_status_record_is_printed() {
    let mut transcript = compact();
    let out = feed(&mut transcript, &[(Rx, "+SBDIX: 0, 12")]);

    assert_eq!(out, "+SBDIX: 0, 12\n");
    assert!(!transcript.session().seen);
}

#[test]
fn session_scenario_prints_one_summary() {
    let mut transcript = compact();
    let out = feed(
        &mut transcript,
        &[(Tx, "AT+SBDIX"), (Rx, "+SBDIX: 0, 12, 1, 7, 50, 0")],
    );

    let summaries: Vec<_> = out.lines().filter(|l| l.starts_with("SBDIX:")).collect();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].contains("(success)"));
    assert!(!out.contains("+SBDIX"));

    let session = transcript.session();
    assert!(session.seen);
    assert_eq!(session.fields(), [0, 12, 1, 7, 50, 0]);
}

#[test]
fn malformed_record_keeps_previous_session() {
    let mut transcript = compact();
    feed(&mut transcript, &[(Rx, "+SBDIX: 0, 12, 1, 7, 50, 0")]);
    feed(&mut transcript, &[(Rx, "+SBDIX: 9, 9, 9")]);

    assert_eq!(transcript.session().fields(), [0, 12, 1, 7, 50, 0]);
}

#[test]
fn take_session_clears_it() {
    let mut transcript = compact();
    feed(&mut transcript, &[(Rx, "+SBDIX: 0, 12, 1, 7, 50, 0")]);

    assert!(transcript.take_session().seen);
    assert!(!transcript.session().seen);
}

// =============================================================================
// Compact: Diagnostic Channel
// =============================================================================

#[test]
fn diagnostics_follow_response_rules() {
    let mut transcript = compact();
    let mut out = String::new();
    for line in [
        "AT+SBDIX",
        "Waiting for response +SBDIX",
        "",
        "+SBDIX: 32, 4, 0, 0, 0, 0",
        "SBDIX session attempt failed",
    ] {
        transcript.diagnostic_line(line, &mut out);
    }

    assert_eq!(
        out,
        "SBDIX: MO=32 (no network service), MOMSN=4, MT=0 (no message), MTMSN=0, MT-length=0, MTQ=0\n\
         SBDIX session attempt failed\n"
    );
    assert_eq!(transcript.session().mo_status, 32);
}

#[test]
fn text_starting_with_at_is_not_an_echo() {
    let mut transcript = compact();
    let mut out = String::new();
    transcript.diagnostic_line("Attempting SBDIX session", &mut out);
    out += &feed(
        &mut transcript,
        &[(Rx, "attention: ring alert"), (Tx, "AT+CSQ"), (Rx, "ATTN")],
    );

    assert_eq!(
        out,
        "Attempting SBDIX session\n\
         attention: ring alert\n\
         query signal quality\n\
         ATTN\n"
    );
}

// =============================================================================
// Quiet
// =============================================================================

#[test]
fn quiet_prints_nothing_but_records_status() {
    let mut transcript = Transcript::new(Verbosity::Quiet);
    let mut out = feed(
        &mut transcript,
        &[
            (Tx, "AT+SBDWB=6"),
            (Rx, "READY"),
            (Rx, "ERROR"),
            (Rx, "+SBDIX: 0, 12, 1, 7, 50, 0"),
        ],
    );
    transcript.diagnostic_line("something odd", &mut out);

    assert!(out.is_empty());
    assert!(transcript.session().seen);
    assert_eq!(transcript.context(), TranscriptContext::INITIAL);
}

#[test]
fn quiet_records_status_from_diagnostics() {
    let mut transcript = Transcript::new(Verbosity::Quiet);
    let mut out = String::new();
    transcript.diagnostic_line("+SBDIX: 2, 5, 0, 0, 0, 0", &mut out);

    assert!(out.is_empty());
    assert_eq!(transcript.session().fields(), [2, 5, 0, 0, 0, 0]);
}

// =============================================================================
// Verbose
// =============================================================================

#[test]
fn verbose_echoes_with_tags() {
    let mut transcript = Transcript::new(Verbosity::Verbose);
    let mut out = feed(&mut transcript, &[(Tx, "AT+CSQ"), (Rx, "+CSQ:3"), (Rx, "OK")]);
    transcript.diagnostic_line("powering on", &mut out);
    transcript.diagnostic_line("  ", &mut out);

    assert_eq!(out, "TX: AT+CSQ\nRX: +CSQ:3\nRX: OK\nDBG: powering on\n");
    assert_eq!(transcript.context(), TranscriptContext::INITIAL);
}

#[test]
fn verbose_diagnostic_status_is_tagged_only() {
    let mut transcript = Transcript::new(Verbosity::Verbose);
    let mut out = String::new();
    transcript.diagnostic_line("+SBDIX: 0, 12, 1, 7, 50, 0", &mut out);

    assert_eq!(out, "DBG: +SBDIX: 0, 12, 1, 7, 50, 0\n");
    assert!(!transcript.legend_shown());
    assert_eq!(transcript.session().fields(), [0, 12, 1, 7, 50, 0]);
}

#[test]
fn verbose_status_record_adds_legend_and_summary() {
    let mut transcript = Transcript::new(Verbosity::Verbose);
    let out = feed(
        &mut transcript,
        &[
            (Rx, "+SBDIX: 0, 12, 1, 7, 50, 0"),
            (Rx, "+SBDIX: 0, 13, 0, 0, 0, 0"),
        ],
    );

    assert!(out.starts_with("RX: +SBDIX: 0, 12, 1, 7, 50, 0\n"));
    assert_eq!(out.matches("SBDIX fields:").count(), 1);
    assert_eq!(out.matches("SBDIX -> MO-status=0 [success]").count(), 2);
    assert!(transcript.legend_shown());
    assert_eq!(transcript.session().mo_msn, 13);
}

// =============================================================================
// Legend
// =============================================================================

#[test]
fn legend_prints_once() {
    let mut transcript = compact();
    let mut out = String::new();

    assert!(!transcript.legend_shown());
    assert!(transcript.print_legend(&mut out));
    let first = out.clone();
    assert!(!transcript.print_legend(&mut out));

    assert!(first.contains("SBDIX fields:"));
    assert_eq!(out, first);
    assert!(transcript.legend_shown());
}

#[test]
fn legend_flag_is_per_instance() {
    let mut a = compact();
    let mut b = compact();
    let mut out = String::new();

    a.print_legend(&mut out);
    assert!(a.legend_shown());
    assert!(!b.legend_shown());
    assert!(b.print_legend(&mut out));
}

#[test]
fn verbosity_is_fixed() {
    assert_eq!(Transcript::new(Verbosity::Verbose).verbosity(), Verbosity::Verbose);
    assert_eq!(compact().verbosity(), Verbosity::Compact);
}
