//! `+SBDIX` Session Status Record
//!
//! After every SBD session the modem answers with
//!
//! ```text
//! +SBDIX: <MO status>, <MOMSN>, <MT status>, <MTMSN>, <MT length>, <MT queued>
//! ```
//!
//! This module parses that line and decodes the two status codes.

use core::fmt::{self, Write};

/// Prefix of the session status record
pub const SBDIX_PREFIX: &str = "+SBDIX:";

/// Number of integer fields in the record
pub const SBDIX_FIELDS: usize = 6;

/// Field legend printed once for operators
pub const LEGEND: &[&str] = &[
    "SBDIX fields:",
    "  MO         = Mobile Originated (outbound) status code",
    "  MOMSN      = Mobile Originated Message Sequence Number (increments with each send)",
    "  MT         = Mobile Terminated (inbound) status code",
    "  MTMSN      = Mobile Terminated Message Sequence Number",
    "  MT-length  = length in bytes of the received MT message",
    "  MTQ        = MT messages still queued at the gateway",
];

/// Latest parsed session status
///
/// When `seen` is false the numeric fields are stale and are never
/// rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct SessionResult {
    /// MO (outbound) status code
    pub mo_status: i32,
    /// MO message sequence number
    pub mo_msn: i32,
    /// MT (inbound) status code
    pub mt_status: i32,
    /// MT message sequence number
    pub mt_msn: i32,
    /// MT message length in bytes
    pub mt_length: i32,
    /// MT messages still queued at the gateway
    pub mt_queued: i32,
    /// A record has been parsed since the last clear
    pub seen: bool,
}

impl SessionResult {
    /// Nothing parsed yet
    pub const UNSEEN: Self = Self {
        mo_status: -1,
        mo_msn: -1,
        mt_status: -1,
        mt_msn: -1,
        mt_length: -1,
        mt_queued: -1,
        seen: false,
    };

    /// Build a seen record from its six fields, in wire order
    #[must_use]
    pub const fn from_fields(fields: [i32; SBDIX_FIELDS]) -> Self {
        Self {
            mo_status: fields[0],
            mo_msn: fields[1],
            mt_status: fields[2],
            mt_msn: fields[3],
            mt_length: fields[4],
            mt_queued: fields[5],
            seen: true,
        }
    }

    /// The six fields in wire order
    #[must_use]
    pub const fn fields(&self) -> [i32; SBDIX_FIELDS] {
        [
            self.mo_status,
            self.mo_msn,
            self.mt_status,
            self.mt_msn,
            self.mt_length,
            self.mt_queued,
        ]
    }

    /// Take the current value and leave `UNSEEN` behind
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::UNSEEN)
    }

    /// Forget the current record
    pub fn clear(&mut self) {
        *self = Self::UNSEEN;
    }

    /// One-line summary: codes with reasons, sequence numbers, length, queue
    ///
    /// Writes nothing when no record has been seen.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn write_compact<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        if !self.seen {
            return Ok(());
        }
        writeln!(
            out,
            "SBDIX: MO={} ({}), MOMSN={}, MT={} ({}), MTMSN={}, MT-length={}, MTQ={}",
            self.mo_status,
            mo_status_reason(self.mo_status),
            self.mo_msn,
            self.mt_status,
            mt_status_reason(self.mt_status),
            self.mt_msn,
            self.mt_length,
            self.mt_queued,
        )
    }

    /// Long-form summary with spelled-out field names
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn write_verbose<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        if !self.seen {
            return Ok(());
        }
        writeln!(
            out,
            "SBDIX -> MO-status={} [{}], MOMSN={}, MT-status={} [{}], MTMSN={}, MT-length={}, MT-queued={}",
            self.mo_status,
            mo_status_reason(self.mo_status),
            self.mo_msn,
            self.mt_status,
            mt_status_reason(self.mt_status),
            self.mt_msn,
            self.mt_length,
            self.mt_queued,
        )
    }
}

impl Default for SessionResult {
    fn default() -> Self {
        Self::UNSEEN
    }
}

/// Parse a `+SBDIX:` line
///
/// Returns `None` for any other line, and for a record that does not hold
/// exactly six integers. A `None` is the common case and not an error.
#[must_use]
pub fn parse_sbdix(line: &str) -> Option<SessionResult> {
    let rest = line.strip_prefix(SBDIX_PREFIX)?;

    let mut fields = [0i32; SBDIX_FIELDS];
    let mut parts = rest.split(',');
    for slot in &mut fields {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }

    Some(SessionResult::from_fields(fields))
}

/// Human-readable MO status
#[must_use]
pub const fn mo_status_reason(code: i32) -> &'static str {
    match code {
        0 => "success",
        1 => "success, MT pending",
        2 => "cancelled",
        3 => "RF link lost",
        4 => "retry limit reached",
        5 => "message too large",
        6 => "protocol error",
        7 => "IMEI blocked",
        8 => "ring queue full",
        10 => "SBD option not subscribed",
        12 => "invalid input",
        13 => "radio disabled",
        14 => "ISU busy",
        16 => "network failure",
        32 => "no network service",
        _ => "unknown",
    }
}

/// Human-readable MT status
#[must_use]
pub const fn mt_status_reason(code: i32) -> &'static str {
    match code {
        0 => "no message",
        1 => "message received",
        2 => "error during retrieval",
        _ => "unknown",
    }
}
