//! LED implementations for PWM channels.
//!
//! These wrap any `embedded_hal::pwm::SetDutyCycle` channel, converting the
//! engine's values to duty cycles and handling active-low wiring.
//! [`PwmLed`] and [`PwmRgbLed`] decline fades, so fade steps are interpolated
//! by the blinker in software. [`FadingPwmLed`] hands fades to channels that
//! implement [`FadeDutyCycle`].

use crate::led::Led;
use crate::value::{Color, Level};
use embedded_hal::pwm::SetDutyCycle;

/// Which output level lights the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pin drives the LED anode; high duty means bright.
    High,
    /// Pin drives the LED cathode; high duty means dark.
    Low,
}

/// Monochrome LED on a single PWM channel.
pub struct PwmLed<P: SetDutyCycle> {
    pwm: P,
    active: ActiveLevel,
}

impl<P: SetDutyCycle> PwmLed<P> {
    /// Wraps a PWM channel.
    pub fn new(pwm: P, active: ActiveLevel) -> Self {
        Self { pwm, active }
    }

    /// Returns the wrapped channel.
    pub fn release(self) -> P {
        self.pwm
    }

    fn duty_for_level(&self, level: Level) -> u16 {
        let level = match self.active {
            ActiveLevel::High => level,
            ActiveLevel::Low => Level::MAX - level,
        };
        ((level as u32 * (self.pwm.max_duty_cycle() as u32 + 1)) >> 16) as u16
    }
}

impl<P: SetDutyCycle> Led<Level> for PwmLed<P> {
    fn set_value(&mut self, level: Level) {
        let duty = self.duty_for_level(level);
        let _ = self.pwm.set_duty_cycle(duty);
    }
}

/// PWM channel with a hardware fade unit, such as the ESP32 LEDC peripheral.
pub trait FadeDutyCycle: SetDutyCycle {
    /// Starts ramping the duty cycle to `duty` over `duration_millis` and
    /// returns without waiting for the ramp to finish.
    fn fade_duty_cycle(&mut self, duty: u16, duration_millis: u16) -> Result<(), Self::Error>;
}

/// Monochrome LED on a PWM channel that fades in hardware.
///
/// Fade steps are handed to the channel, so the blinker only waits for the
/// fade duration instead of interpolating. A channel that reports an error
/// declines the fade and the blinker falls back to software.
pub struct FadingPwmLed<P: FadeDutyCycle> {
    led: PwmLed<P>,
}

impl<P: FadeDutyCycle> FadingPwmLed<P> {
    /// Wraps a fade-capable PWM channel.
    pub fn new(pwm: P, active: ActiveLevel) -> Self {
        Self {
            led: PwmLed::new(pwm, active),
        }
    }

    /// Returns the wrapped channel.
    pub fn release(self) -> P {
        self.led.release()
    }
}

impl<P: FadeDutyCycle> Led<Level> for FadingPwmLed<P> {
    fn set_value(&mut self, level: Level) {
        self.led.set_value(level);
    }

    fn fade(&mut self, target: Level, duration_millis: u16) -> bool {
        let duty = self.led.duty_for_level(target);
        self.led.pwm.fade_duty_cycle(duty, duration_millis).is_ok()
    }
}

/// RGB LED on three PWM channels.
pub struct PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    red: R,
    green: G,
    blue: B,
    common_anode: bool,
}

impl<R, G, B> PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Creates an RGB LED controller.
    ///
    /// # Arguments
    /// * `red` - PWM channel for red LED
    /// * `green` - PWM channel for green LED
    /// * `blue` - PWM channel for blue LED
    /// * `common_anode` - true for common anode LED (inverted logic), false for common cathode
    pub fn new(red: R, green: G, blue: B, common_anode: bool) -> Self {
        Self {
            red,
            green,
            blue,
            common_anode,
        }
    }

    /// Returns the wrapped channels.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn component_duty<C: SetDutyCycle>(channel: &C, value: u8, common_anode: bool) -> u16 {
    let max_duty = channel.max_duty_cycle() as u32;
    let duty = (value as u32 * max_duty / 255) as u16;
    if common_anode {
        max_duty as u16 - duty
    } else {
        duty
    }
}

impl<R, G, B> Led<Color> for PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_value(&mut self, color: Color) {
        let red = component_duty(&self.red, color.red, self.common_anode);
        let green = component_duty(&self.green, color.green, self.common_anode);
        let blue = component_duty(&self.blue, color.blue, self.common_anode);

        let _ = self.red.set_duty_cycle(red);
        let _ = self.green.set_duty_cycle(green);
        let _ = self.blue.set_duty_cycle(blue);
    }
}
