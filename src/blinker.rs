//! Sequence execution engine.
//!
//! Provides [`Blinker`], which plays [`BlinkSequence`]s on a single LED. The
//! blinker owns the active sequence, the playback position, the remaining
//! repetitions and any in-flight software fade. It never blocks: every call
//! to [`Blinker::advance`] executes the steps that are due and asks the
//! scheduler to call back when the next one is.
//!
//! All state lives behind one lock, so sequences can be submitted from any
//! context while the scheduler is advancing. The last submission to take the
//! lock wins.

use crate::command::BlinkerAction;
use crate::led::Led;
use crate::scheduler::{Priority, Scheduler};
use crate::sequence::BlinkSequence;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{LoopCount, Step};
use crate::value::{LEVEL_MAX, Level, Value};
use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use heapless::Vec;

/// Interval between updates of a software fade, in milliseconds.
pub const FADE_TICK_MILLIS: u16 = 20;

/// The current state of a blinker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkerState {
    /// No sequence. LED shows the terminal value.
    Idle,
    /// Stepping through the sequence.
    Playing,
    /// Interpolating a fade the LED could not perform in hardware.
    SoftFading,
}

#[derive(Debug, Clone, Copy)]
struct SoftwareFade<V, I> {
    start: V,
    target: V,
    start_time: I,
    end_time: I,
}

struct Inner<V, I, L, const N: usize> {
    led: L,
    sequence: Vec<Step<V>, N>,
    pos: usize,
    repetitions: LoopCount,
    current: V,
    terminal: V,
    fade: Option<SoftwareFade<V, I>>,
}

impl<V: Value, I, L: Led<V>, const N: usize> Inner<V, I, L, N> {
    fn apply(&mut self, value: V) {
        self.current = value;
        self.led.set_value(value);
    }
}

/// Plays blink sequences on a single LED.
///
/// The blinker is bound to one LED and one scheduler handle. Submitting a
/// sequence ([`repeat_forever`](Self::repeat_forever), [`repeat`](Self::repeat),
/// [`execute`](Self::execute), [`set`](Self::set)) replaces whatever was
/// playing and returns immediately; the scheduler then drives playback by
/// calling [`advance`](Self::advance).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `V` - Output value type ([`Level`] or [`Color`](crate::Color))
/// * `I` - Time instant type
/// * `L` - LED implementation type
/// * `S` - Scheduler handle bound to this blinker
/// * `T` - Time source implementation type
/// * `N` - Maximum number of steps in sequences
/// * `R` - Raw mutex guarding the blinker state
pub struct Blinker<'t, V, I, L, S, T, const N: usize, R = CriticalSectionRawMutex>
where
    V: Value,
    I: TimeInstant,
    L: Led<V>,
    S: Scheduler<I::Duration>,
    T: TimeSource<I>,
    R: RawMutex,
{
    inner: Mutex<R, RefCell<Inner<V, I, L, N>>>,
    scheduler: S,
    time_source: &'t T,
}

impl<'t, V, I, L, S, T, const N: usize, R> Blinker<'t, V, I, L, S, T, N, R>
where
    V: Value,
    I: TimeInstant,
    L: Led<V>,
    S: Scheduler<I::Duration>,
    T: TimeSource<I>,
    R: RawMutex,
{
    /// Creates an idle blinker.
    ///
    /// Nothing is written to the LED until the first submission.
    pub fn new(led: L, scheduler: S, time_source: &'t T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                led,
                sequence: Vec::new(),
                pos: 0,
                repetitions: LoopCount::Finite(0),
                current: V::OFF,
                terminal: V::OFF,
                fade: None,
            })),
            scheduler,
            time_source,
        }
    }

    /// Repeats the sequence indefinitely.
    pub fn repeat_forever(&self, sequence: BlinkSequence<V, N>) {
        self.update_sequence(sequence, LoopCount::Infinite, V::OFF);
    }

    /// Plays the sequence `times` times, then shows `terminal`.
    ///
    /// `times == 0` plays nothing and shows `terminal` right away.
    pub fn repeat(&self, sequence: BlinkSequence<V, N>, times: u32, terminal: V) {
        match times.checked_sub(1) {
            Some(remaining) => {
                self.update_sequence(sequence, LoopCount::Finite(remaining), terminal)
            }
            None => self.update_sequence(BlinkSequence::new(), LoopCount::Finite(0), terminal),
        }
    }

    /// Plays the sequence once, then shows `terminal`.
    pub fn execute(&self, sequence: BlinkSequence<V, N>, terminal: V) {
        self.update_sequence(sequence, LoopCount::Finite(0), terminal);
    }

    /// Stops any sequence and shows `value`.
    pub fn set(&self, value: V) {
        self.update_sequence(BlinkSequence::new(), LoopCount::Finite(0), value);
    }

    /// Stops any sequence and turns the LED off.
    pub fn turn_off(&self) {
        self.set(V::OFF);
    }

    /// Dispatches a [`BlinkerAction`] to the matching submission method.
    pub fn handle_action(&self, action: BlinkerAction<V, N>) {
        match action {
            BlinkerAction::RepeatForever(sequence) => self.repeat_forever(sequence),
            BlinkerAction::Repeat {
                sequence,
                times,
                terminal,
            } => self.repeat(sequence, times, terminal),
            BlinkerAction::Execute { sequence, terminal } => self.execute(sequence, terminal),
            BlinkerAction::Set(value) => self.set(value),
            BlinkerAction::TurnOff => self.turn_off(),
        }
    }

    fn update_sequence(&self, sequence: BlinkSequence<V, N>, repetitions: LoopCount, terminal: V) {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            inner.sequence = sequence.into_steps();
            inner.pos = 0;
            inner.repetitions = repetitions;
            inner.terminal = terminal;
            inner.fade = None;

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "blinker: installed {} steps, repetitions {}",
                inner.sequence.len(),
                repetitions
            );

            // A pending invocation will pick up the new sequence; until then
            // the LED shows the terminal value.
            if !inner.sequence.is_empty() && !self.scheduler.is_scheduled() {
                self.scheduler.schedule_now(Priority::Elevated);
            } else {
                inner.apply(terminal);
            }
        });
    }

    /// Executes the steps that are due and re-arms the scheduler.
    ///
    /// Called by the scheduler; not meant to be called while an invocation is
    /// pending.
    pub fn advance(&self) {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            match self.run_due_steps(&mut inner) {
                None => {}
                Some(0) => self.scheduler.schedule_now(Priority::Elevated),
                Some(delay) => self.scheduler.schedule_after(
                    I::Duration::from_millis(delay as u64),
                    Priority::Elevated,
                ),
            }
        });
    }

    /// Returns the delay in milliseconds until the next invocation, or `None`
    /// once the sequence is exhausted.
    fn run_due_steps(&self, inner: &mut Inner<V, I, L, N>) -> Option<u16> {
        if let Some(fade) = inner.fade {
            let now = self.time_source.now();
            if now >= fade.end_time {
                inner.fade = None;
                inner.apply(fade.target);
            } else {
                let elapsed = now.duration_since(fade.start_time).as_millis() as f32;
                let total = fade.end_time.duration_since(fade.start_time).as_millis() as f32;
                inner.apply(V::lerp(fade.start, fade.target, elapsed / total));
                return Some(FADE_TICK_MILLIS);
            }
        }

        let mut executed = 0;
        loop {
            if inner.pos >= inner.sequence.len() {
                #[cfg(feature = "defmt")]
                defmt::debug!("blinker: sequence exhausted");

                inner.sequence.clear();
                inner.pos = 0;
                let terminal = inner.terminal;
                inner.apply(terminal);
                return None;
            }

            let step = inner.sequence[inner.pos];
            let delay = match step {
                Step::Set(value) => {
                    inner.apply(value);
                    0
                }
                Step::Hold { millis } => millis,
                Step::Fade { target, millis } => {
                    if inner.led.fade(target, millis) {
                        inner.current = target;
                        millis
                    } else {
                        #[cfg(feature = "defmt")]
                        defmt::trace!("blinker: software fade over {} ms", millis);

                        let now = self.time_source.now();
                        let end_time = now
                            .checked_add(I::Duration::from_millis(millis as u64))
                            .unwrap_or(now);
                        inner.fade = Some(SoftwareFade {
                            start: inner.current,
                            target,
                            start_time: now,
                            end_time,
                        });
                        FADE_TICK_MILLIS
                    }
                }
            };

            inner.pos += 1;
            executed += 1;
            if inner.pos == inner.sequence.len() {
                match inner.repetitions {
                    LoopCount::Infinite => inner.pos = 0,
                    LoopCount::Finite(0) => {}
                    LoopCount::Finite(remaining) => {
                        inner.repetitions = LoopCount::Finite(remaining - 1);
                        inner.pos = 0;
                    }
                }
            }

            if delay > 0 {
                return Some(delay);
            }
            // A full pass of zero-delay steps: yield instead of spinning.
            if executed >= inner.sequence.len() && inner.pos < inner.sequence.len() {
                return Some(0);
            }
        }
    }

    fn with_inner<U>(&self, f: impl FnOnce(&Inner<V, I, L, N>) -> U) -> U {
        self.inner.lock(|inner| f(&inner.borrow()))
    }

    /// Returns the current state of the blinker.
    pub fn state(&self) -> BlinkerState {
        self.with_inner(|inner| {
            if inner.fade.is_some() {
                BlinkerState::SoftFading
            } else if inner.sequence.is_empty() {
                BlinkerState::Idle
            } else {
                BlinkerState::Playing
            }
        })
    }

    /// Returns the value most recently written to the LED.
    ///
    /// After an accepted hardware fade this is the fade target.
    pub fn current_value(&self) -> V {
        self.with_inner(|inner| inner.current)
    }

    /// Returns the value shown once the active sequence ends.
    pub fn terminal_value(&self) -> V {
        self.with_inner(|inner| inner.terminal)
    }

    /// Returns the index of the next step to execute.
    pub fn position(&self) -> usize {
        self.with_inner(|inner| inner.pos)
    }

    /// Returns the repetitions left after the current pass.
    pub fn remaining_repetitions(&self) -> LoopCount {
        self.with_inner(|inner| inner.repetitions)
    }

    /// Returns the number of steps in the active sequence.
    pub fn sequence_len(&self) -> usize {
        self.with_inner(|inner| inner.sequence.len())
    }

    /// Returns the scheduler handle bound to this blinker.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<'t, I, L, S, T, const N: usize, R> Blinker<'t, Level, I, L, S, T, N, R>
where
    I: TimeInstant,
    L: Led<Level>,
    S: Scheduler<I::Duration>,
    T: TimeSource<I>,
    R: RawMutex,
{
    /// Stops any sequence and sets the LED to maximum brightness.
    pub fn turn_on(&self) {
        self.set(LEVEL_MAX);
    }
}
