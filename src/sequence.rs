use crate::types::{SequenceError, Step};
use crate::value::Value;
use heapless::Vec;

/// An ordered list of steps played back by a [`Blinker`](crate::Blinker).
///
/// Sequences are plain values: build one, then hand it to the blinker, which
/// takes ownership and plays the steps in insertion order.
///
/// # Type Parameters
/// * `V` - The output value type ([`Level`](crate::Level) or [`Color`](crate::Color))
/// * `N` - Maximum number of steps this sequence can hold
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkSequence<V, const N: usize> {
    steps: Vec<Step<V>, N>,
}

impl<V: Value, const N: usize> BlinkSequence<V, N> {
    /// Creates an empty sequence.
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates a sequence from a slice of steps.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The slice holds more than `N` steps
    pub fn from_steps(steps: &[Step<V>]) -> Result<Self, SequenceError> {
        let mut sequence = Self::new();
        for step in steps {
            sequence.add(*step)?;
        }
        Ok(sequence)
    }

    /// Appends a step to the end of the sequence.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` steps
    pub fn add(&mut self, step: Step<V>) -> Result<(), SequenceError> {
        self.steps
            .push(step)
            .map_err(|_| SequenceError::CapacityExceeded)
    }

    /// Appends a step, consuming and returning the sequence for chaining.
    ///
    /// # Panics
    /// Panics if the sequence capacity is exceeded.
    pub fn then(mut self, step: Step<V>) -> Self {
        if self.steps.push(step).is_err() {
            panic!("sequence capacity exceeded");
        }
        self
    }

    /// Returns the number of steps in this sequence.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the sequence has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the steps in playback order.
    pub fn steps(&self) -> &[Step<V>] {
        &self.steps
    }

    /// Returns a reference to the step at the given index.
    pub fn get_step(&self, index: usize) -> Option<&Step<V>> {
        self.steps.get(index)
    }

    /// Sum of all step durations, in milliseconds.
    ///
    /// This is the length of one pass when the LED accelerates fades in
    /// hardware; software fades may overrun by up to one fade tick.
    pub fn total_duration_millis(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_millis() as u32).sum()
    }

    pub(crate) fn into_steps(self) -> Vec<Step<V>, N> {
        self.steps
    }
}

impl<V: Value, const N: usize> Default for BlinkSequence<V, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequence holding up to 8 steps.
pub type BlinkSequence8<V> = BlinkSequence<V, 8>;

/// Sequence holding up to 16 steps.
pub type BlinkSequence16<V> = BlinkSequence<V, 16>;
