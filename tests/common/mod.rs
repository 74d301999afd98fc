//! Shared test infrastructure for led-blinker integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use led_blinker::{Blinker, Led, Priority, Scheduler, TimeDuration, TimeInstant, TimeSource};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: AtomicU64,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: AtomicU64::new(0),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        self.current_time.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.load(Ordering::SeqCst)
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        TestInstant(self.current_time.load(Ordering::SeqCst))
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every value and fade request
pub struct MockLed<V> {
    history: Arc<Mutex<Vec<V>>>,
    fades: Arc<Mutex<Vec<(V, u16)>>>,
    hardware_fade: bool,
}

/// Test-side view of a `MockLed` after it has been moved into a blinker
pub struct LedProbe<V> {
    history: Arc<Mutex<Vec<V>>>,
    fades: Arc<Mutex<Vec<(V, u16)>>>,
}

impl<V: Clone> MockLed<V> {
    /// LED without hardware fading
    pub fn new() -> (Self, LedProbe<V>) {
        Self::build(false)
    }

    /// LED that accepts every fade request
    pub fn with_hardware_fade() -> (Self, LedProbe<V>) {
        Self::build(true)
    }

    fn build(hardware_fade: bool) -> (Self, LedProbe<V>) {
        let history = Arc::new(Mutex::new(Vec::new()));
        let fades = Arc::new(Mutex::new(Vec::new()));
        let probe = LedProbe {
            history: Arc::clone(&history),
            fades: Arc::clone(&fades),
        };
        (
            Self {
                history,
                fades,
                hardware_fade,
            },
            probe,
        )
    }
}

impl<V> Led<V> for MockLed<V> {
    fn set_value(&mut self, value: V) {
        self.history.lock().unwrap().push(value);
    }

    fn fade(&mut self, target: V, duration_millis: u16) -> bool {
        self.fades.lock().unwrap().push((target, duration_millis));
        self.hardware_fade
    }
}

impl<V: Clone> LedProbe<V> {
    pub fn history(&self) -> Vec<V> {
        self.history.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<V> {
        self.history.lock().unwrap().last().cloned()
    }

    pub fn fades(&self) -> Vec<(V, u16)> {
        self.fades.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.history.lock().unwrap().clear();
    }
}

// ============================================================================
// Manual Scheduler
// ============================================================================

/// A pending invocation recorded by `ManualScheduler`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub delay: u64,
    pub priority: Priority,
}

/// Deterministic scheduler: records the pending invocation, the test fires it
pub struct ManualScheduler {
    pending: Mutex<Option<Pending>>,
    requests: AtomicUsize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    /// Removes the pending invocation, as the scheduler does just before
    /// running the callback
    pub fn take(&self) -> Option<Pending> {
        self.pending.lock().unwrap().take()
    }

    pub fn pending(&self) -> Option<Pending> {
        *self.pending.lock().unwrap()
    }

    /// Total number of schedule requests received
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn request(&self, delay: u64, priority: Priority) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.pending.lock().unwrap() = Some(Pending { delay, priority });
    }
}

impl Scheduler<TestDuration> for ManualScheduler {
    fn is_scheduled(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }

    fn schedule_now(&self, priority: Priority) {
        self.request(0, priority);
    }

    fn schedule_after(&self, delay: TestDuration, priority: Priority) {
        self.request(delay.0, priority);
    }
}

// ============================================================================
// Blinker helpers
// ============================================================================

pub type TestBlinker<'t, V> =
    Blinker<'t, V, TestInstant, MockLed<V>, ManualScheduler, MockTimeSource, 8>;

/// Fires pending invocations, advancing the clock by each requested delay,
/// until the blinker stops scheduling or `max_wakeups` is reached.
///
/// Returns the number of wakeups performed.
pub fn drive<V: led_blinker::Value, L: Led<V>>(
    blinker: &Blinker<'_, V, TestInstant, L, ManualScheduler, MockTimeSource, 8>,
    clock: &MockTimeSource,
    max_wakeups: usize,
) -> usize {
    let mut wakeups = 0;
    while wakeups < max_wakeups {
        let Some(pending) = blinker.scheduler().take() else {
            break;
        };
        clock.advance(pending.delay);
        blinker.advance();
        wakeups += 1;
    }
    wakeups
}
