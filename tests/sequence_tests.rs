//! Integration tests for steps, sequences and pattern builders

mod common;
use common::*;

use led_blinker::{
    BlinkSequence, BlinkSequence8, COLOR_OFF, Color, LEVEL_MAX, LEVEL_OFF, Level, SequenceError,
    Srgb, Step, blink, duty_cycle, fade_off, fade_on, fade_to, hold, rgb_blink, set_to, turn_off,
    turn_on,
};

fn total_millis<V: led_blinker::Value, const N: usize>(sequence: &BlinkSequence<V, N>) -> u64 {
    sequence
        .steps()
        .iter()
        .map(|s| s.duration_millis() as u64)
        .sum()
}

// ============================================================================
// Steps
// ============================================================================

#[test]
fn monochrome_step_constructors() {
    assert_eq!(turn_on(), Step::Set(LEVEL_MAX));
    assert_eq!(turn_off(), Step::Set(LEVEL_OFF));
    assert_eq!(set_to(1234), Step::Set(1234));
    assert_eq!(
        fade_to(500, TestDuration(250)),
        Step::Fade {
            target: 500,
            millis: 250
        }
    );
    assert_eq!(
        fade_on(TestDuration(10)),
        Step::Fade {
            target: LEVEL_MAX,
            millis: 10
        }
    );
    assert_eq!(
        fade_off(TestDuration(10)),
        Step::Fade {
            target: LEVEL_OFF,
            millis: 10
        }
    );
    assert_eq!(hold(TestDuration(700)), Step::Hold { millis: 700 });
}

#[test]
fn generic_step_constructors_use_value_off() {
    assert_eq!(Step::<Color>::off(), Step::Set(COLOR_OFF));
    assert_eq!(
        Step::<Color>::fade_off(TestDuration(40)),
        Step::Fade {
            target: COLOR_OFF,
            millis: 40
        }
    );
}

#[test]
fn set_steps_take_no_time() {
    assert_eq!(turn_on().duration_millis(), 0);
    assert_eq!(hold(TestDuration(300)).duration_millis(), 300);
    assert_eq!(fade_on(TestDuration(120)).duration_millis(), 120);
}

#[test]
fn step_accepts_maximum_16_bit_duration() {
    assert_eq!(hold(TestDuration(65535)), Step::Hold { millis: 65535 });
}

#[test]
#[should_panic(expected = "exceeds the 65535 ms limit")]
fn step_rejects_duration_beyond_16_bits() {
    let _ = hold(TestDuration(70_000));
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn sequence_preserves_insertion_order() {
    let mut sequence = BlinkSequence8::<Level>::new();
    sequence.add(turn_on()).unwrap();
    sequence.add(hold(TestDuration(100))).unwrap();
    sequence.add(turn_off()).unwrap();

    assert_eq!(sequence.len(), 3);
    assert_eq!(
        sequence.steps(),
        &[turn_on(), Step::Hold { millis: 100 }, turn_off()]
    );
    assert_eq!(sequence.get_step(1), Some(&Step::Hold { millis: 100 }));
    assert_eq!(sequence.get_step(3), None);
}

#[test]
fn add_reports_capacity_exceeded() {
    let mut sequence = BlinkSequence::<Level, 2>::new();
    assert!(sequence.add(turn_on()).is_ok());
    assert!(sequence.add(turn_off()).is_ok());
    assert_eq!(sequence.add(turn_on()), Err(SequenceError::CapacityExceeded));
    assert_eq!(sequence.len(), 2);
}

#[test]
fn from_steps_checks_capacity() {
    let steps = [turn_on(), turn_off(), turn_on()];
    assert!(BlinkSequence::<Level, 3>::from_steps(&steps).is_ok());
    assert_eq!(
        BlinkSequence::<Level, 2>::from_steps(&steps),
        Err(SequenceError::CapacityExceeded)
    );
}

#[test]
#[should_panic(expected = "sequence capacity exceeded")]
fn chaining_past_capacity_panics() {
    let _ = BlinkSequence::<Level, 1>::new().then(turn_on()).then(turn_off());
}

#[test]
fn default_sequence_is_empty() {
    let sequence = BlinkSequence8::<Color>::default();
    assert!(sequence.is_empty());
    assert_eq!(sequence.total_duration_millis(), 0);
}

#[test]
fn total_duration_sums_holds_and_fades() {
    let sequence = BlinkSequence8::<Level>::new()
        .then(fade_on(TestDuration(200)))
        .then(hold(TestDuration(300)))
        .then(turn_off())
        .then(hold(TestDuration(500)));
    assert_eq!(sequence.total_duration_millis(), 1000);
}

#[test]
fn sequence_error_displays_message() {
    assert_eq!(
        format!("{}", SequenceError::CapacityExceeded),
        "sequence capacity exceeded"
    );
}

// ============================================================================
// Pattern builder
// ============================================================================

#[test]
fn square_wave_pattern() {
    let sequence: BlinkSequence8<Level> = blink(TestDuration(1000), 50, 0, 0);
    assert_eq!(
        sequence.steps(),
        &[
            Step::Set(65535),
            Step::Hold { millis: 500 },
            Step::Set(0),
            Step::Hold { millis: 500 },
        ]
    );
}

#[test]
fn ramps_replace_instant_sets() {
    let sequence: BlinkSequence8<Level> = blink(TestDuration(1000), 40, 25, 50);
    assert_eq!(
        sequence.steps(),
        &[
            Step::Fade {
                target: LEVEL_MAX,
                millis: 100
            },
            Step::Hold { millis: 300 },
            Step::Fade {
                target: LEVEL_OFF,
                millis: 300
            },
            Step::Hold { millis: 300 },
        ]
    );
}

#[test]
fn full_ramps_omit_holds() {
    let sequence: BlinkSequence8<Level> = blink(TestDuration(2000), 50, 100, 100);
    assert_eq!(
        sequence.steps(),
        &[
            Step::Fade {
                target: LEVEL_MAX,
                millis: 1000
            },
            Step::Fade {
                target: LEVEL_OFF,
                millis: 1000
            },
        ]
    );
}

#[test]
fn zero_duty_still_sets_on_value() {
    let sequence: BlinkSequence8<Level> = blink(TestDuration(800), 0, 0, 0);
    assert_eq!(
        sequence.steps(),
        &[Step::Set(LEVEL_MAX), Step::Set(LEVEL_OFF), Step::Hold { millis: 800 }]
    );
}

#[test]
fn full_duty_has_no_off_hold() {
    let sequence: BlinkSequence8<Level> = blink(TestDuration(800), 100, 0, 0);
    assert_eq!(
        sequence.steps(),
        &[Step::Set(LEVEL_MAX), Step::Hold { millis: 800 }, Step::Set(LEVEL_OFF)]
    );
}

#[test]
fn truncation_is_absorbed_by_the_off_segment() {
    // on = 33 * 999 / 100 = 329, on ramp = 50 * 329 / 100 = 164
    // off = 670, off ramp = 10 * 670 / 100 = 67
    let sequence: BlinkSequence8<Level> = blink(TestDuration(999), 33, 50, 10);
    assert_eq!(
        sequence.steps(),
        &[
            Step::Fade {
                target: LEVEL_MAX,
                millis: 164
            },
            Step::Hold { millis: 165 },
            Step::Fade {
                target: LEVEL_OFF,
                millis: 67
            },
            Step::Hold { millis: 603 },
        ]
    );
}

#[test]
fn segment_durations_always_sum_to_period() {
    for period in [0u64, 1, 7, 99, 100, 333, 1000, 1999, 65535] {
        for duty in (0..=100).step_by(7) {
            for ramp_on in (0..=100).step_by(13) {
                for ramp_off in (0..=100).step_by(17) {
                    let sequence: BlinkSequence8<Level> =
                        blink(TestDuration(period), duty, ramp_on, ramp_off);
                    assert_eq!(
                        total_millis(&sequence),
                        period,
                        "period {} duty {} ramps {}/{}",
                        period,
                        duty,
                        ramp_on,
                        ramp_off
                    );
                }
            }
        }
    }
}

#[test]
fn rgb_pattern_alternates_color_and_black() {
    let red = Srgb::new(255, 0, 0);
    let sequence: BlinkSequence8<Color> = rgb_blink(TestDuration(400), red, 25, 0, 50);
    assert_eq!(
        sequence.steps(),
        &[
            Step::Set(red),
            Step::Hold { millis: 100 },
            Step::Fade {
                target: COLOR_OFF,
                millis: 150
            },
            Step::Hold { millis: 150 },
        ]
    );
}

#[test]
fn duty_cycle_between_arbitrary_levels() {
    let sequence: BlinkSequence8<Level> = duty_cycle(TestDuration(100), 4000, 1000, 50, 0, 0);
    assert_eq!(
        sequence.steps(),
        &[
            Step::Set(4000),
            Step::Hold { millis: 50 },
            Step::Set(1000),
            Step::Hold { millis: 50 },
        ]
    );
}

#[test]
#[should_panic(expected = "duty_percent")]
fn duty_above_100_panics() {
    let _: BlinkSequence8<Level> = blink(TestDuration(1000), 101, 0, 0);
}

#[test]
#[should_panic(expected = "ramp_on_percent")]
fn ramp_on_above_100_panics() {
    let _: BlinkSequence8<Level> = blink(TestDuration(1000), 50, 150, 0);
}

#[test]
#[should_panic(expected = "ramp_off_percent")]
fn ramp_off_above_100_panics() {
    let _: BlinkSequence8<Level> = blink(TestDuration(1000), 50, 0, 101);
}
