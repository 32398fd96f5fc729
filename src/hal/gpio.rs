//! GPIO Abstractions
//!
//! The status indicator is a common-cathode RGB LED on three push-pull
//! outputs. Plain GPIO cannot dim, so a channel is either on or off.

use embedded_hal::digital::OutputPin;

use crate::types::Color;
use crate::ui::indicator::Pixel;

/// Three-pin RGB LED
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    color: Color,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbLed<R, G, B> {
    /// Wrap the three channel pins and switch the LED off
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            color: Color::Off,
        };
        led.show(Color::Off);
        led
    }

    /// Color currently shown
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> Pixel for RgbLed<R, G, B> {
    fn show(&mut self, color: Color) {
        let (r, g, b) = color.rgb();
        // Pin errors are infallible on this MCU
        let _ = self.red.set_state((r > 0).into());
        let _ = self.green.set_state((g > 0).into());
        let _ = self.blue.set_state((b > 0).into());
        self.color = color;
    }
}
