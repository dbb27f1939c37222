//! Unit tests for DelayedPipeline

use async_runtime::{EventLoop, ManualClock, PromiseState};
use core_types::{ErrorKind, Value};
use parking_lot::Mutex;
use pipeline::{Console, DelayedPipeline, PipelineConfig, NULL_RESULT_MESSAGE, WAITING_MESSAGE};
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    clock: Arc<ManualClock>,
    event_loop: EventLoop,
    pipeline: DelayedPipeline,
    lines: Arc<Mutex<Vec<String>>>,
}

fn harness(config: PipelineConfig) -> Harness {
    let clock = Arc::new(ManualClock::new());
    let event_loop = EventLoop::with_clock(clock.clone());
    let (console, lines) = Console::capture();
    let pipeline = DelayedPipeline::new(event_loop.scheduler(), console).with_config(config);
    Harness {
        clock,
        event_loop,
        pipeline,
        lines,
    }
}

fn smis(values: &[i32]) -> Value {
    Value::Array(values.iter().copied().map(Value::Smi).collect())
}

#[test]
fn doubles_one_two_three() {
    let mut h = harness(PipelineConfig::default());
    let outcome = h.pipeline.run_and_report(smis(&[1, 2, 3]));

    h.event_loop.run_until_done().unwrap();
    assert_eq!(outcome.result(), Some(smis(&[2, 4, 6])));
    assert_eq!(*h.lines.lock(), vec!["[ 2, 4, 6 ]", WAITING_MESSAGE]);
}

#[test]
fn doubles_every_sequence_in_order() {
    let cases: Vec<Vec<f64>> = vec![
        vec![],
        vec![0.0],
        vec![-1.0, 0.5, 3.0],
        vec![1e300, -2.25, 7.0, 7.0],
        (1..=50_i32).map(f64::from).rev().collect(),
    ];

    for case in cases {
        let mut h = harness(PipelineConfig::default());
        let input = Value::Array(case.iter().copied().map(Value::from_number).collect());
        let outcome = h.pipeline.run(input);
        h.event_loop.run_until_done().unwrap();

        let Some(Value::Array(doubled)) = outcome.result() else {
            panic!("Expected fulfilled array for {:?}", case);
        };
        assert_eq!(doubled.len(), case.len());
        for (out, x) in doubled.iter().zip(&case) {
            assert_eq!(out.as_number(), Some(x * 2.0));
        }
    }
}

#[test]
fn non_sequence_rejects_with_fixed_message() {
    for input in [
        Value::Undefined,
        Value::Null,
        Value::Smi(3),
        Value::from("1,2,3"),
        Value::Array(vec![Value::Smi(1), Value::from("two")]),
    ] {
        let mut h = harness(PipelineConfig::default());
        let outcome = h.pipeline.run_and_report(input);
        h.event_loop.run_until_done().unwrap();

        let error = outcome.error().expect("outcome should reject");
        assert_eq!(error.message, NULL_RESULT_MESSAGE);
        assert!(matches!(error.kind, ErrorKind::Error));
        assert_eq!(*h.lines.lock(), vec![NULL_RESULT_MESSAGE, WAITING_MESSAGE]);
    }
}

#[test]
fn run_does_not_wait_for_delay() {
    let mut h = harness(PipelineConfig::default());
    let outcome = h.pipeline.run(smis(&[1]));
    assert_eq!(outcome.state(), PromiseState::Pending);
    assert_eq!(h.event_loop.now(), Duration::ZERO);
}

#[test]
fn run_does_not_wait_for_delay_on_bad_input() {
    let mut h = harness(PipelineConfig::default());
    let outcome = h.pipeline.run(Value::from("x"));
    assert_eq!(outcome.state(), PromiseState::Pending);
    assert_eq!(h.event_loop.now(), Duration::ZERO);
    assert!(h.lines.lock().is_empty());

    h.event_loop.run_until_done().unwrap();
    assert_eq!(outcome.state(), PromiseState::Rejected);
}

#[test]
fn doubled_numbers_print_in_console_notation() {
    let mut h = harness(PipelineConfig::default());
    let input = Value::Array(vec![
        Value::from_number(-0.0),
        Value::from_number(1e21),
        Value::from_number(1e-7),
    ]);
    h.pipeline.run_and_report(input);

    h.event_loop.run_until_done().unwrap();
    assert_eq!(*h.lines.lock(), vec!["[ -0, 2e+21, 2e-7 ]", WAITING_MESSAGE]);
}

#[test]
fn waiting_follows_settlement_by_log_delay() {
    let config = PipelineConfig::default()
        .with_settle_delay(Duration::from_millis(100))
        .with_log_delay(Duration::from_millis(300));
    let mut h = harness(config);
    let outcome = h.pipeline.run_and_report(smis(&[5]));

    h.clock.advance(Duration::from_millis(99));
    h.event_loop.process_one_cycle().unwrap();
    assert!(!outcome.is_settled());

    h.clock.advance(Duration::from_millis(1));
    h.event_loop.process_one_cycle().unwrap();
    assert!(outcome.is_settled());
    assert_eq!(*h.lines.lock(), vec!["[ 10 ]"]);
    assert_eq!(h.event_loop.pending_timers(), 1);

    h.event_loop.run_until_done().unwrap();
    assert_eq!(h.event_loop.now(), Duration::from_millis(400));
    assert_eq!(*h.lines.lock(), vec!["[ 10 ]", WAITING_MESSAGE]);
}

#[test]
fn zero_delays_keep_outcome_before_waiting() {
    let config = PipelineConfig::default()
        .with_settle_delay(Duration::ZERO)
        .with_log_delay(Duration::ZERO);
    let mut h = harness(config);
    h.pipeline.run_and_report(Value::Null);

    h.event_loop.run_until_done().unwrap();
    assert_eq!(*h.lines.lock(), vec![NULL_RESULT_MESSAGE, WAITING_MESSAGE]);
}

#[test]
fn exactly_one_waiting_per_run() {
    let mut event_loop = EventLoop::with_clock(Arc::new(ManualClock::new()));
    let (console, lines) = Console::capture();

    for input in [smis(&[1]), Value::Null, smis(&[2, 3])] {
        DelayedPipeline::new(event_loop.scheduler(), console.clone()).run_and_report(input);
    }
    event_loop.run_until_done().unwrap();

    let lines = lines.lock();
    let waiting = lines.iter().filter(|l| *l == WAITING_MESSAGE).count();
    assert_eq!(waiting, 3);
    // All three settle at t=2000 before any Waiting at t=4000
    assert!(lines[..3].iter().all(|l| l != WAITING_MESSAGE));
}

#[test]
fn settling_outcome_again_has_no_effect() {
    let mut h = harness(PipelineConfig::default());
    let outcome = h.pipeline.run(smis(&[4]));
    h.event_loop.run_until_done().unwrap();

    assert!(!outcome.resolve(Value::Null));
    assert!(!outcome.reject(core_types::JsError::error("late")));
    assert_eq!(outcome.result(), Some(smis(&[8])));
}
