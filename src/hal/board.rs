//! Board Bring-up
//!
//! NUCLEO-G474RE wiring (see [`crate::config::pins`]):
//!
//! | Function      | Pin       | Mode                   |
//! |---------------|-----------|------------------------|
//! | ALERT button  | PA9       | input, pull-up         |
//! | SOS button    | PA8       | input, pull-up         |
//! | LED R/G/B     | PB0-PB2   | push-pull, low         |
//! | Console       | PA2/PA3   | USART2, 115200 8N1     |
//! | RockBLOCK     | PC4/PC5   | USART1, 19200 8N1      |

use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, Uart};
use thiserror::Error;

use super::gpio::RgbLed;
use super::serial::SerialConsole;
use crate::config::{CONSOLE_BAUD, MODEM_BAUD};
use crate::ui::button::{Button, Buttons};

/// Board bring-up failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, defmt::Format)]
pub enum BoardError {
    /// Console UART rejected its configuration
    #[error("console UART configuration rejected")]
    Console,
    /// Modem UART rejected its configuration
    #[error("modem UART configuration rejected")]
    Modem,
}

/// Status LED type on this board
pub type StatusLed = RgbLed<Output<'static>, Output<'static>, Output<'static>>;

/// Everything the firmware needs from the MCU
pub struct Board {
    /// ALERT and SOS buttons
    pub buttons: Buttons<Input<'static>, Input<'static>>,
    /// Status LED
    pub led: StatusLed,
    /// Operator console UART
    pub console: SerialConsole<Uart<'static, Blocking>>,
    /// RockBLOCK UART, handed to the modem driver
    pub modem: Uart<'static, Blocking>,
}

impl Board {
    /// Initialize clocks and peripherals
    ///
    /// # Errors
    ///
    /// Returns which UART refused its baud rate.
    pub fn init() -> Result<Self, BoardError> {
        let p = embassy_stm32::init(embassy_stm32::Config::default());
        defmt::info!("board init");

        let alert = Input::new(p.PA9, Pull::Up);
        let sos = Input::new(p.PA8, Pull::Up);

        let led = RgbLed::new(
            Output::new(p.PB0, Level::Low, Speed::Low),
            Output::new(p.PB1, Level::Low, Speed::Low),
            Output::new(p.PB2, Level::Low, Speed::Low),
        );

        let mut console_config = usart::Config::default();
        console_config.baudrate = CONSOLE_BAUD;
        let console = Uart::new_blocking(p.USART2, p.PA3, p.PA2, console_config)
            .map_err(|_| BoardError::Console)?;

        let mut modem_config = usart::Config::default();
        modem_config.baudrate = MODEM_BAUD;
        let modem = Uart::new_blocking(p.USART1, p.PC5, p.PC4, modem_config)
            .map_err(|_| BoardError::Modem)?;

        defmt::info!("console {} baud, modem {} baud", CONSOLE_BAUD, MODEM_BAUD);

        Ok(Self {
            buttons: Buttons::new(Button::new(alert), Button::new(sos)),
            led,
            console: SerialConsole::new(console),
            modem,
        })
    }
}
