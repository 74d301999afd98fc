//! Command-based control for blinkers.
//!
//! Firmware often owns its blinkers in one task and receives requests from
//! others over a channel. These types carry a submission as a value so it can
//! be queued and later applied with [`Blinker::handle_action`](crate::Blinker::handle_action).

use crate::sequence::BlinkSequence;

/// Submissions that can be sent to a blinker.
#[derive(Debug, Clone, PartialEq)]
pub enum BlinkerAction<V, const N: usize> {
    /// Repeat sequence indefinitely.
    RepeatForever(BlinkSequence<V, N>),
    /// Play sequence a number of times, then show the terminal value.
    Repeat {
        sequence: BlinkSequence<V, N>,
        times: u32,
        terminal: V,
    },
    /// Play sequence once, then show the terminal value.
    Execute {
        sequence: BlinkSequence<V, N>,
        terminal: V,
    },
    /// Show a fixed value.
    Set(V),
    /// Turn the LED off.
    TurnOff,
}

/// Command targeting a specific LED.
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkerCommand<Id, V, const N: usize> {
    pub led_id: Id,
    pub action: BlinkerAction<V, N>,
}

impl<Id, V, const N: usize> BlinkerCommand<Id, V, N> {
    /// Creates command.
    pub fn new(led_id: Id, action: BlinkerAction<V, N>) -> Self {
        Self { led_id, action }
    }
}
