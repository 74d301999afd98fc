//! Duty-cycle pattern builders.
//!
//! A pattern is one period split into an "on" segment and an "off" segment.
//! Each segment starts with a ramp (a fade, or an instant set when the ramp is
//! empty) and ends with a hold for whatever time the ramp left over.
//!
//! All arithmetic is integer milliseconds with truncating division:
//!
//! ```text
//! on      = duty * period / 100
//! on_ramp = ramp_on * on / 100
//! off     = period - on
//! off_ramp = ramp_off * off / 100
//! ```
//!
//! so the emitted durations always sum to exactly `period`.

use crate::sequence::BlinkSequence;
use crate::time::TimeDuration;
use crate::types::Step;
use crate::value::{Color, LEVEL_MAX, LEVEL_OFF, Level, Value};

/// Creates a symmetric blink pattern between two arbitrary values.
///
/// # Panics
/// Panics if any percentage exceeds 100, if a segment exceeds 65535 ms, or if
/// the pattern does not fit into `N` steps (it needs at most 4).
pub fn duty_cycle<V: Value, D: TimeDuration, const N: usize>(
    period: D,
    on: V,
    off: V,
    duty_percent: u8,
    ramp_on_percent: u8,
    ramp_off_percent: u8,
) -> BlinkSequence<V, N> {
    assert!(duty_percent <= 100, "duty_percent must be in 0..=100");
    assert!(ramp_on_percent <= 100, "ramp_on_percent must be in 0..=100");
    assert!(ramp_off_percent <= 100, "ramp_off_percent must be in 0..=100");

    let millis = period.as_millis();
    let on_millis = duty_percent as u64 * millis / 100;
    let on_ramp_millis = ramp_on_percent as u64 * on_millis / 100;
    let off_millis = millis - on_millis;
    let off_ramp_millis = ramp_off_percent as u64 * off_millis / 100;

    let mut result = BlinkSequence::new();
    result = segment::<V, D, N>(result, on, on_millis, on_ramp_millis);
    result = segment::<V, D, N>(result, off, off_millis, off_ramp_millis);
    result
}

fn segment<V: Value, D: TimeDuration, const N: usize>(
    sequence: BlinkSequence<V, N>,
    value: V,
    millis: u64,
    ramp_millis: u64,
) -> BlinkSequence<V, N> {
    let sequence = if ramp_millis > 0 {
        sequence.then(Step::fade(value, D::from_millis(ramp_millis)))
    } else {
        sequence.then(Step::set(value))
    };
    if ramp_millis < millis {
        sequence.then(Step::hold(D::from_millis(millis - ramp_millis)))
    } else {
        sequence
    }
}

/// Creates a monochrome blink pattern between maximum brightness and off.
///
/// `blink(1000ms, 50, 0, 0)` yields `[Set(65535), Hold(500), Set(0), Hold(500)]`.
///
/// # Panics
/// See [`duty_cycle`].
pub fn blink<D: TimeDuration, const N: usize>(
    period: D,
    duty_percent: u8,
    ramp_on_percent: u8,
    ramp_off_percent: u8,
) -> BlinkSequence<Level, N> {
    duty_cycle(
        period,
        LEVEL_MAX,
        LEVEL_OFF,
        duty_percent,
        ramp_on_percent,
        ramp_off_percent,
    )
}

/// Creates an RGB blink pattern between `color` and black.
///
/// # Panics
/// See [`duty_cycle`].
pub fn rgb_blink<D: TimeDuration, const N: usize>(
    period: D,
    color: Color,
    duty_percent: u8,
    ramp_on_percent: u8,
    ramp_off_percent: u8,
) -> BlinkSequence<Color, N> {
    duty_cycle(
        period,
        color,
        Color::OFF,
        duty_percent,
        ramp_on_percent,
        ramp_off_percent,
    )
}
