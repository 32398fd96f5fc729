//! Button-Triggered Send/Retry Driver
//!
//! Owns every piece of mutable state in the firmware and runs the control
//! loop:
//!
//! 1. poll both buttons; on a press edge frame the button's message,
//! 2. set the indicator to Waiting and hand the payload to the modem, which
//!    blocks for the whole SBD exchange while calling back into
//!    [`CoreState`] for blink ticks and transcript lines,
//! 3. on success show green; on failure show red, wait the retry delay and
//!    go back to 2. There is no attempt limit and no backoff.
//!
//! Only configuration errors (no modem, no sleep pin) stop the loop; the
//! beacon then holds red forever.

use core::fmt::{self, Write};
use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::config::{MT_BUFFER_SIZE, POLL_INTERVAL_MS, RETRY_DELAY_MS, RETRY_SLICE_MS};
use crate::modem::{Modem, ModemSettings, SbdError, SessionHooks};
use crate::protocol::payload::{printable, MoPayload};
use crate::protocol::status::SessionResult;
use crate::protocol::transcript::Transcript;
use crate::time::{elapsed_ms, Clock};
use crate::types::{Direction, Verbosity};
use crate::ui::button::Buttons;
use crate::ui::indicator::{Indicator, IndicatorMode, Pixel};

/// Banner printed at startup
pub const BANNER: &str = "SBD beacon (WAIT=blink yellow, FAIL=red, SUCCESS=green)";

/// Prompt printed once the modem is up
pub const PROMPT: &str = "Press ALERT or SOS to send.";

/// State shared with the modem's callbacks
///
/// This is what the modem driver sees while it blocks: the indicator (for
/// blink ticks), the transcript classifier and the console it writes to.
pub struct CoreState<P, C, W> {
    indicator: Indicator<P>,
    transcript: Transcript,
    clock: C,
    console: W,
}

impl<P: Pixel, C: Clock, W: Write> CoreState<P, C, W> {
    /// Bundle the shared state
    #[must_use]
    pub const fn new(indicator: Indicator<P>, transcript: Transcript, clock: C, console: W) -> Self {
        Self {
            indicator,
            transcript,
            clock,
            console,
        }
    }

    /// Indicator controller
    #[must_use]
    pub const fn indicator(&self) -> &Indicator<P> {
        &self.indicator
    }

    /// Transcript classifier
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Console sink
    #[must_use]
    pub const fn console(&self) -> &W {
        &self.console
    }

    /// Current time from the injected clock
    #[must_use]
    pub fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    fn set_mode(&mut self, mode: IndicatorMode) {
        let now = self.clock.now_ms();
        self.indicator.set_mode(mode, now);
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.console.write_fmt(args);
        let _ = self.console.write_char('\n');
    }
}

impl<P: Pixel, C: Clock, W: Write> SessionHooks for CoreState<P, C, W> {
    fn progress(&mut self) -> ControlFlow<()> {
        let now = self.clock.now_ms();
        self.indicator.tick(now);
        // Cancellation is never requested
        ControlFlow::Continue(())
    }

    fn console_line(&mut self, direction: Direction, line: &str) {
        self.transcript.console_line(direction, line, &mut self.console);
    }

    fn diagnostic_line(&mut self, line: &str) {
        self.transcript.diagnostic_line(line, &mut self.console);
    }
}

/// Outcome of a delivered message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct SendReport {
    /// Attempts taken, including the successful one
    pub attempts: u32,
    /// MT bytes received with the final session
    pub inbound_len: usize,
    /// Status record of the final session, if the modem reported one
    pub session: SessionResult,
}

/// The beacon: modem, delay provider and shared core state
pub struct Beacon<M, D, P, C, W> {
    modem: M,
    delay: D,
    core: CoreState<P, C, W>,
    settings: ModemSettings,
    retry_delay_ms: u32,
    attempts: u32,
    fatal: Option<SbdError>,
}

impl<M, D, P, C, W> Beacon<M, D, P, C, W>
where
    M: Modem,
    D: DelayNs,
    P: Pixel,
    C: Clock,
    W: Write,
{
    /// Assemble a beacon with the build-time verbosity and default timing
    #[must_use]
    pub fn new(modem: M, pixel: P, clock: C, delay: D, console: W) -> Self {
        Self {
            modem,
            delay,
            core: CoreState::new(Indicator::new(pixel), Transcript::default(), clock, console),
            settings: ModemSettings::default(),
            retry_delay_ms: RETRY_DELAY_MS,
            attempts: 0,
            fatal: None,
        }
    }

    /// Replace the transcript verbosity
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.core.transcript = Transcript::new(verbosity);
        self
    }

    /// Replace the indicator (e.g. with custom timing)
    #[must_use]
    pub fn with_indicator(mut self, indicator: Indicator<P>) -> Self {
        self.core.indicator = indicator;
        self
    }

    /// Replace the modem settings applied by [`start`](Self::start)
    #[must_use]
    pub fn with_settings(mut self, settings: ModemSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the delay between failed attempts
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay_ms: u32) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Shared core state
    #[must_use]
    pub const fn core(&self) -> &CoreState<P, C, W> {
        &self.core
    }

    /// Indicator controller
    #[must_use]
    pub const fn indicator(&self) -> &Indicator<P> {
        &self.core.indicator
    }

    /// Transcript classifier
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.core.transcript
    }

    /// Console sink
    #[must_use]
    pub const fn console(&self) -> &W {
        &self.core.console
    }

    /// Modem driver
    #[must_use]
    pub const fn modem(&self) -> &M {
        &self.modem
    }

    /// Attempts made by the current (or last) send
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Configuration error that stopped the beacon, if any
    #[must_use]
    pub const fn fatal(&self) -> Option<SbdError> {
        self.fatal
    }

    /// Bring up the modem and print its identity
    ///
    /// # Errors
    ///
    /// Any `begin` failure is returned as fatal; the indicator is left red.
    pub fn start(&mut self) -> Result<(), SbdError> {
        self.core.line(format_args!("{BANNER}"));
        self.core.set_mode(IndicatorMode::Idle);

        if let Err(err) = self.modem.begin(&mut self.core) {
            error!("modem begin failed: {}", err.code());
            self.core.line(format_args!("modem begin failed, err={}", err.code()));
            self.core.line(format_args!("{err}"));
            return Err(self.stop(err));
        }
        info!("modem up");

        self.modem.configure(&self.settings);

        match self.modem.firmware_version(&mut self.core) {
            Ok(version) => self.core.line(format_args!("FW: {version}")),
            Err(err) => warn!("firmware version query failed: {}", err.code()),
        }

        match self.modem.signal_quality(&mut self.core) {
            Ok(csq) => self.core.line(format_args!("Signal quality (0-5): {csq}")),
            Err(err) => warn!("signal quality query failed: {}", err.code()),
        }

        if self.core.transcript.verbosity() == Verbosity::Verbose {
            self.core.transcript.print_legend(&mut self.core.console);
        }

        self.core.line(format_args!("{PROMPT}"));
        self.core.line(format_args!(""));
        Ok(())
    }

    /// One control loop iteration: expire the success hold, then poll buttons
    ///
    /// # Errors
    ///
    /// Returns a fatal modem error raised by a triggered send.
    pub fn service<A, S>(&mut self, buttons: &mut Buttons<A, S>) -> Result<(), SbdError>
    where
        A: InputPin,
        S: InputPin,
    {
        let now = self.core.now_ms();
        self.core.indicator.check_success_hold(now);

        for trigger in buttons.poll(now) {
            info!("button {}", trigger.message());
            self.core
                .line(format_args!("{} button pressed.", trigger.message()));
            self.send_with_retry(trigger.message())?;
        }
        Ok(())
    }

    /// Run the control loop forever
    ///
    /// Halts with the indicator red after a fatal error.
    pub fn run<A, S>(&mut self, buttons: &mut Buttons<A, S>) -> !
    where
        A: InputPin,
        S: InputPin,
    {
        loop {
            if self.service(buttons).is_err() {
                self.halt();
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
        }
    }

    /// Send `text` until the gateway accepts it
    ///
    /// Text longer than the payload limit is truncated before the first
    /// attempt.
    ///
    /// # Errors
    ///
    /// Only a fatal configuration error ends the loop early.
    pub fn send_with_retry(&mut self, text: &str) -> Result<SendReport, SbdError> {
        let payload = MoPayload::from_text(text);
        self.attempts = 0;

        loop {
            self.attempts += 1;
            debug!("send attempt {}", self.attempts);

            match self.attempt(text, &payload) {
                Ok((inbound_len, session)) => {
                    return Ok(SendReport {
                        attempts: self.attempts,
                        inbound_len,
                        session,
                    });
                }
                Err(err) if err.is_fatal() => {
                    error!("fatal modem error: {}", err.code());
                    return Err(self.stop(err));
                }
                Err(_) => {
                    self.core.line(format_args!("Retrying after delay...\n"));
                    self.hold_retry_delay();
                }
            }
        }
    }

    /// Hold red forever
    pub fn halt(&mut self) -> ! {
        self.core.set_mode(IndicatorMode::Fail);
        loop {
            self.delay.delay_ms(1_000);
        }
    }

    /// One send/receive, with console summary and indicator update
    fn attempt(&mut self, text: &str, payload: &MoPayload) -> Result<(usize, SessionResult), SbdError> {
        let mut inbound = [0u8; MT_BUFFER_SIZE];

        self.core.line(format_args!("Sending \"{text}\"..."));
        self.core.set_mode(IndicatorMode::Waiting);

        let result = self
            .modem
            .send_receive(payload.as_bytes(), &mut inbound, &mut self.core);
        let session = self.core.transcript.take_session();

        match result {
            Ok(len) => {
                let received = &inbound[..len.min(inbound.len())];
                self.core.line(format_args!("Send OK."));
                if received.is_empty() {
                    self.core.line(format_args!("No MT message queued."));
                } else {
                    self.core
                        .line(format_args!("Received {} byte(s):", received.len()));
                    for c in printable(received) {
                        let _ = self.core.console.write_char(c);
                    }
                    self.core.line(format_args!(""));
                }
                self.core.set_mode(IndicatorMode::Success);
                Ok((received.len(), session))
            }
            Err(err) => {
                warn!("send/receive failed: {}", err.code());
                self.core.line(format_args!(
                    "SBD send/receive failed, err={}. Reason: {err}",
                    err.code()
                ));
                self.core.set_mode(IndicatorMode::Fail);
                Err(err)
            }
        }
    }

    /// Wait out the retry delay while keeping the indicator serviced
    fn hold_retry_delay(&mut self) {
        let start = self.core.now_ms();
        self.core.set_mode(IndicatorMode::Fail);

        loop {
            let now = self.core.now_ms();
            if elapsed_ms(now, start) >= self.retry_delay_ms {
                break;
            }
            self.core.indicator.check_success_hold(now);
            self.core.indicator.tick(now);
            self.delay.delay_ms(RETRY_SLICE_MS);
        }
    }

    fn stop(&mut self, err: SbdError) -> SbdError {
        self.fatal = Some(err);
        self.core.set_mode(IndicatorMode::Fail);
        err
    }
}
