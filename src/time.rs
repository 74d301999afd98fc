//! Time abstraction traits for platform-agnostic timing.
//!
//! The engine only needs to read the current instant (for software fades) and
//! to express delays in whole milliseconds. Implement these traits for your
//! platform's timer, or use [`StdClock`] when the `std` feature is enabled.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy + PartialOrd {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Converts a duration into the 16-bit millisecond encoding used by steps.
///
/// # Panics
/// Panics if the duration exceeds `u16::MAX` milliseconds.
pub(crate) fn step_millis<D: TimeDuration>(duration: D) -> u16 {
    let millis = duration.as_millis();
    assert!(
        millis <= u16::MAX as u64,
        "step duration of {} ms exceeds the 65535 ms limit",
        millis
    );
    millis as u16
}

#[cfg(feature = "std")]
pub use self::std_clock::{STD_CLOCK, StdClock, StdDuration, StdInstant};

#[cfg(feature = "std")]
mod std_clock {
    use super::{TimeDuration, TimeInstant, TimeSource};

    /// `std::time::Duration` wrapper implementing [`TimeDuration`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct StdDuration(pub std::time::Duration);

    impl TimeDuration for StdDuration {
        fn as_millis(&self) -> u64 {
            self.0.as_millis() as u64
        }

        fn from_millis(millis: u64) -> Self {
            StdDuration(std::time::Duration::from_millis(millis))
        }
    }

    /// `std::time::Instant` wrapper implementing [`TimeInstant`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct StdInstant(pub std::time::Instant);

    impl TimeInstant for StdInstant {
        type Duration = StdDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            StdDuration(self.0.saturating_duration_since(earlier.0))
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            self.0.checked_add(duration.0).map(StdInstant)
        }
    }

    /// Monotonic clock backed by `std::time::Instant`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdClock;

    /// Shared clock instance for engines bound to the thread scheduler.
    pub static STD_CLOCK: StdClock = StdClock;

    impl TimeSource<StdInstant> for StdClock {
        fn now(&self) -> StdInstant {
            StdInstant(std::time::Instant::now())
        }
    }
}
