//! Output value types driven by the engine.
//!
//! A monochrome LED is driven by a [`Level`] (0 = off, 65535 = maximum), an
//! RGB LED by a [`Color`] with three 8-bit components. Both implement
//! [`Value`], which is all the engine needs to run sequences and software
//! fades over them.

use palette::Srgb;

/// Monochrome brightness level, from 0 (off) to 65535 (maximum).
pub type Level = u16;

/// 24-bit RGB color.
pub type Color = Srgb<u8>;

/// Monochrome LED turned off.
pub const LEVEL_OFF: Level = 0;

/// Monochrome LED at maximum brightness.
pub const LEVEL_MAX: Level = u16::MAX;

/// RGB LED turned off.
pub const COLOR_OFF: Color = Srgb::new(0, 0, 0);

/// A value that can be pushed to an LED and linearly interpolated.
pub trait Value: Copy + PartialEq {
    /// The value that represents a dark LED.
    const OFF: Self;

    /// Interpolates between `start` and `target`.
    ///
    /// `progress` is in the range 0.0-1.0. Each component is computed as
    /// `start + (target - start) * progress` and truncated toward zero.
    fn lerp(start: Self, target: Self, progress: f32) -> Self;
}

#[inline]
fn lerp_component(start: f32, target: f32, progress: f32) -> f32 {
    start + (target - start) * progress
}

impl Value for Level {
    const OFF: Self = LEVEL_OFF;

    fn lerp(start: Self, target: Self, progress: f32) -> Self {
        lerp_component(start as f32, target as f32, progress) as Level
    }
}

impl Value for Color {
    const OFF: Self = COLOR_OFF;

    fn lerp(start: Self, target: Self, progress: f32) -> Self {
        Srgb::new(
            lerp_component(start.red as f32, target.red as f32, progress) as u8,
            lerp_component(start.green as f32, target.green as f32, progress) as u8,
            lerp_component(start.blue as f32, target.blue as f32, progress) as u8,
        )
    }
}
