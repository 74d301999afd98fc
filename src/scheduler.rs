//! Scheduler abstraction.
//!
//! A blinker never sleeps. Instead it asks a [`Scheduler`] to call
//! [`Blinker::advance`](crate::Blinker::advance) again after a delay. The
//! scheduler handle given to a blinker is bound to that blinker's callback and
//! keeps at most one invocation pending at a time.

use crate::time::TimeDuration;

/// Dispatch priority for scheduled invocations.
///
/// Orders invocations that become due at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    /// Work that tolerates delays.
    Background,
    /// Default priority.
    #[default]
    Normal,
    /// Latency-sensitive work, such as visible LED updates.
    Elevated,
}

/// Handle for scheduling invocations of one bound callback.
///
/// Requesting an invocation while one is already pending is a contract
/// violation; callers check [`is_scheduled`](Scheduler::is_scheduled) first.
pub trait Scheduler<D: TimeDuration> {
    /// Returns true if an invocation is currently pending.
    fn is_scheduled(&self) -> bool;

    /// Arranges for the callback to run as soon as possible.
    fn schedule_now(&self, priority: Priority);

    /// Arranges for the callback to run after `delay`.
    fn schedule_after(&self, delay: D, priority: Priority);
}

impl<D: TimeDuration, S: Scheduler<D> + ?Sized> Scheduler<D> for &S {
    fn is_scheduled(&self) -> bool {
        (**self).is_scheduled()
    }

    fn schedule_now(&self, priority: Priority) {
        (**self).schedule_now(priority)
    }

    fn schedule_after(&self, delay: D, priority: Priority) {
        (**self).schedule_after(delay, priority)
    }
}
