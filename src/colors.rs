//! Color space conversion helpers.
//!
//! HSV (Hue, Saturation, Value) is often the more intuitive way to pick LED
//! colors. These helpers convert to the 8-bit [`Color`] used by RGB blinkers.

use crate::value::Color;
use palette::{FromColor, Hsv, Srgb};

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
///
/// `hue` is in degrees; `saturation` and `value` are in the range 0.0-1.0.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Color {
    let hsv: Hsv = Hsv::new(hue, saturation, value);
    let rgb: Srgb = Srgb::from_color(hsv);
    rgb.into_format()
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Color {
    hsv(hue, 1.0, 1.0)
}
