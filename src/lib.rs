#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Step`**: A single action: `Set` a value, `Hold` it, or `Fade` to a new one
//! - **`BlinkSequence`**: An ordered list of steps played as one pass
//! - **`blink` / `rgb_blink`**: Build duty-cycle patterns from a period and percentages
//! - **`Blinker`**: Plays sequences on one LED, driven by a scheduler
//! - **`Led`**: Trait to implement for your LED hardware
//! - **`Scheduler`**: Trait to implement for your task scheduler
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`BlinkerAction`**: Submissions that can be queued and sent to blinkers
//!
//! Monochrome LEDs use a 16-bit [`Level`]; RGB LEDs use an 8-bit per channel
//! [`Color`]. Both share the same engine through the [`Value`] trait.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod time;
pub mod value;
pub mod types;
pub mod sequence;
pub mod pattern;
pub mod led;
pub mod pwm;
pub mod scheduler;
pub mod blinker;
pub mod command;
pub mod colors;
#[cfg(feature = "std")]
pub mod thread_scheduler;

pub use blinker::{Blinker, BlinkerState, FADE_TICK_MILLIS};
pub use command::{BlinkerAction, BlinkerCommand};
pub use led::Led;
pub use pattern::{blink, duty_cycle, rgb_blink};
pub use pwm::{ActiveLevel, FadeDutyCycle, FadingPwmLed, PwmLed, PwmRgbLed};
pub use scheduler::{Priority, Scheduler};
pub use sequence::{BlinkSequence, BlinkSequence8, BlinkSequence16};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{
    LoopCount, SequenceError, Step, fade_off, fade_on, fade_to, hold, set_to, turn_off, turn_on,
};
pub use value::{COLOR_OFF, Color, LEVEL_MAX, LEVEL_OFF, Level, Value};

#[cfg(feature = "std")]
pub use thread_scheduler::{
    SchedulerConfig, SchedulerError, StdBlinker, Task, ThreadScheduler, default_scheduler,
};
#[cfg(feature = "std")]
pub use time::{STD_CLOCK, StdClock, StdDuration, StdInstant};
