//! Core types for sequence construction.

use crate::time::{TimeDuration, step_millis};
use crate::value::{LEVEL_MAX, LEVEL_OFF, Level, Value};

/// A single action in a blink sequence.
///
/// Durations are stored as whole milliseconds in 16 bits; constructors taking
/// a [`TimeDuration`] panic if the duration exceeds 65535 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<V> {
    /// Instantly set the output to a value.
    Set(V),

    /// Keep the current output for a number of milliseconds.
    Hold {
        /// Hold duration in milliseconds.
        millis: u16,
    },

    /// Linearly fade from the current output to a target value.
    Fade {
        /// Value reached at the end of the fade.
        target: V,
        /// Fade duration in milliseconds.
        millis: u16,
    },
}

impl<V: Value> Step<V> {
    /// Creates a step that sets the output to `value` instantly.
    #[inline]
    pub const fn set(value: V) -> Self {
        Step::Set(value)
    }

    /// Creates a step that turns the output off instantly.
    #[inline]
    pub const fn off() -> Self {
        Step::Set(V::OFF)
    }

    /// Creates a step that holds the current output for `duration`.
    #[inline]
    pub fn hold<D: TimeDuration>(duration: D) -> Self {
        Step::Hold {
            millis: step_millis(duration),
        }
    }

    /// Creates a step that fades linearly to `target` over `duration`.
    #[inline]
    pub fn fade<D: TimeDuration>(target: V, duration: D) -> Self {
        Step::Fade {
            target,
            millis: step_millis(duration),
        }
    }

    /// Creates a step that fades the output off over `duration`.
    #[inline]
    pub fn fade_off<D: TimeDuration>(duration: D) -> Self {
        Self::fade(V::OFF, duration)
    }

    /// Returns the time this step occupies, in milliseconds.
    ///
    /// `Set` steps take no time.
    pub fn duration_millis(&self) -> u16 {
        match self {
            Step::Set(_) => 0,
            Step::Hold { millis } | Step::Fade { millis, .. } => *millis,
        }
    }
}

/// Creates a step that sets the LED to the maximum brightness instantly.
pub const fn turn_on() -> Step<Level> {
    Step::Set(LEVEL_MAX)
}

/// Creates a step that turns the LED completely off instantly.
pub const fn turn_off() -> Step<Level> {
    Step::Set(LEVEL_OFF)
}

/// Creates a step that sets the LED to the specified brightness instantly.
pub const fn set_to(level: Level) -> Step<Level> {
    Step::Set(level)
}

/// Creates a step that fades linearly to `level` over the duration.
pub fn fade_to<D: TimeDuration>(level: Level, duration: D) -> Step<Level> {
    Step::fade(level, duration)
}

/// Creates a step that fades linearly to the maximum brightness.
pub fn fade_on<D: TimeDuration>(duration: D) -> Step<Level> {
    Step::fade(LEVEL_MAX, duration)
}

/// Creates a step that fades linearly down to off.
pub fn fade_off<D: TimeDuration>(duration: D) -> Step<Level> {
    Step::fade(LEVEL_OFF, duration)
}

/// Creates a step that maintains the current brightness for the duration.
pub fn hold<D: TimeDuration>(duration: D) -> Step<Level> {
    Step::hold(duration)
}

/// Remaining repetitions of the active sequence.
///
/// `Finite(n)` counts the passes still to play after the current one, so
/// `Finite(0)` stops once the current pass ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopCount {
    /// Play `n` more passes after the current one.
    Finite(u32),

    /// Repeat indefinitely.
    Infinite,
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(0)
    }
}

/// Sequence construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
