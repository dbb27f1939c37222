//! Unit tests for Promise

use async_runtime::{
    EventLoop, FulfillHandler, ManualClock, Promise, PromiseState, RejectHandler, Settlement, Task,
};
use core_types::{ErrorKind, JsError, Value};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

fn manual_loop() -> EventLoop {
    EventLoop::with_clock(Arc::new(ManualClock::new()))
}

#[test]
fn new_promise_is_pending() {
    let el = manual_loop();
    let promise = el.scheduler().new_promise();
    assert_eq!(promise.state(), PromiseState::Pending);
    assert!(!promise.is_settled());
    assert!(promise.settlement().is_none());
}

#[test]
fn resolve_sets_result_value() {
    let el = manual_loop();
    let promise = el.scheduler().new_promise();
    assert!(promise.resolve(Value::Smi(42)));
    assert_eq!(promise.state(), PromiseState::Fulfilled);
    assert_eq!(promise.result(), Some(Value::Smi(42)));
    assert!(promise.error().is_none());
}

#[test]
fn reject_sets_error() {
    let el = manual_loop();
    let promise = el.scheduler().new_promise();
    assert!(promise.reject(JsError::type_error("test")));
    assert_eq!(promise.state(), PromiseState::Rejected);
    assert!(matches!(promise.error().unwrap().kind, ErrorKind::TypeError));
    assert!(promise.result().is_none());
}

#[test]
fn cannot_resolve_already_fulfilled_promise() {
    let el = manual_loop();
    let promise = el.scheduler().new_promise();
    promise.resolve(Value::Smi(42));
    assert!(!promise.resolve(Value::Smi(100)));
    assert_eq!(promise.result(), Some(Value::Smi(42)));
}

#[test]
fn cannot_reject_already_fulfilled_promise() {
    let el = manual_loop();
    let promise = el.scheduler().new_promise();
    promise.resolve(Value::Smi(42));
    assert!(!promise.reject(JsError::error("late")));
    assert_eq!(promise.state(), PromiseState::Fulfilled);
}

#[test]
fn cannot_resolve_already_rejected_promise() {
    let el = manual_loop();
    let promise = el.scheduler().new_promise();
    promise.reject(JsError::error("first"));
    assert!(!promise.resolve(Value::Smi(1)));
    assert_eq!(
        promise.settlement(),
        Some(Settlement::Rejected(JsError::error("first")))
    );
}

#[test]
fn repeated_settlement_runs_reactions_once() {
    let mut el = manual_loop();
    let promise = el.scheduler().new_promise();
    let calls = Arc::new(Mutex::new(0));

    let c = calls.clone();
    promise.then(
        Some(FulfillHandler::new(move |v| {
            *c.lock() += 1;
            Ok(v)
        })),
        None,
    );

    promise.resolve(Value::Smi(1));
    promise.resolve(Value::Smi(2));
    el.run_until_done().unwrap();
    assert_eq!(*calls.lock(), 1);
}

#[test]
fn reactions_wait_for_settlement() {
    let mut el = manual_loop();
    let promise = el.scheduler().new_promise();
    let seen = Arc::new(Mutex::new(None));

    let s = seen.clone();
    promise.then(
        Some(FulfillHandler::new(move |v| {
            *s.lock() = Some(v);
            Ok(Value::Undefined)
        })),
        None,
    );
    assert!(promise.has_pending_reactions());

    el.run_until_done().unwrap();
    assert!(seen.lock().is_none());

    promise.resolve(Value::from("done"));
    assert!(!promise.has_pending_reactions());
    el.run_until_done().unwrap();
    assert_eq!(*seen.lock(), Some(Value::from("done")));
}

#[test]
fn rejection_passes_through_then_to_catch() {
    let mut el = manual_loop();
    let promise = Promise::rejected(el.scheduler(), JsError::error("Callback Function Returned Null"));
    let caught = Arc::new(Mutex::new(None));

    let c = caught.clone();
    let end = promise
        .then(Some(FulfillHandler::new(|v| Ok(v))), None)
        .catch(RejectHandler::new(move |e| {
            *c.lock() = Some(e.message);
            Ok(Value::Undefined)
        }));

    el.run_until_done().unwrap();
    assert_eq!(caught.lock().as_deref(), Some("Callback Function Returned Null"));
    assert_eq!(end.state(), PromiseState::Fulfilled);
}

#[test]
fn handler_error_rejects_derived_promise() {
    let mut el = manual_loop();
    let promise = Promise::resolved(el.scheduler(), Value::Smi(1));
    let derived = promise.then(
        Some(FulfillHandler::new(|_| Err(JsError::range_error("too big")))),
        None,
    );

    el.run_until_done().unwrap();
    assert_eq!(derived.error(), Some(JsError::range_error("too big")));
}

#[test]
fn fulfilled_value_skips_reject_handler() {
    let mut el = manual_loop();
    let promise = Promise::resolved(el.scheduler(), Value::Smi(5));
    let derived = promise.catch(RejectHandler::new(|_| Ok(Value::Null)));

    el.run_until_done().unwrap();
    assert_eq!(derived.result(), Some(Value::Smi(5)));
}

#[test]
fn and_then_adopts_inner_promise() {
    let mut el = manual_loop();
    let scheduler = el.scheduler();
    let first = Promise::resolved(scheduler.clone(), Value::from("place"));

    let chained = first.and_then(move |place| {
        let inner = scheduler.new_promise();
        let settle = inner.clone();
        scheduler.set_timeout(
            Duration::from_millis(500),
            Task::new(move || {
                settle.resolve(Value::Array(vec![place, Value::Boolean(true)]));
                Ok(Value::Undefined)
            }),
        );
        inner
    });

    el.run_until_done().unwrap();
    assert_eq!(
        chained.result(),
        Some(Value::Array(vec![Value::from("place"), Value::Boolean(true)]))
    );
    assert_eq!(el.now(), Duration::from_millis(500));
}

#[test]
fn and_then_is_skipped_on_rejection() {
    let mut el = manual_loop();
    let scheduler = el.scheduler();
    let first = Promise::rejected(scheduler.clone(), JsError::error("not found"));
    let ran = Arc::new(Mutex::new(false));

    let r = ran.clone();
    let chained = first.and_then(move |_| {
        *r.lock() = true;
        scheduler.new_promise()
    });

    el.run_until_done().unwrap();
    assert!(!*ran.lock());
    assert_eq!(chained.error(), Some(JsError::error("not found")));
}
