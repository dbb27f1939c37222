//! Lookup Chain Integration Tests
//!
//! Sequential lookups share the event loop with a running pipeline.

use async_runtime::{EventLoop, ManualClock};
use core_types::Value;
use pipeline::{Console, DelayedPipeline, DirectoryLookup, LookupChain, WAITING_MESSAGE};
use std::sync::Arc;
use std::time::Duration;

/// Test: chain and pipeline interleave by deadline
#[test]
fn test_chain_interleaves_with_pipeline() {
    let mut event_loop = EventLoop::with_clock(Arc::new(ManualClock::new()));
    let (console, lines) = Console::capture();

    let lookup = DirectoryLookup::new(event_loop.scheduler())
        .with_delay(Duration::from_millis(1500))
        .with_place("downtown", "Main St Pharmacy")
        .with_open("Main St Pharmacy", false);

    // Lookups answer at 1500 and 3000; pipeline settles at 2000, logs at 4000
    let chain = LookupChain::new(lookup, console.clone()).run("downtown");
    DelayedPipeline::new(event_loop.scheduler(), console)
        .run_and_report(Value::Array(vec![Value::Smi(5)]));

    event_loop.run_until_done().expect("Execution failed");

    assert_eq!(chain.result(), Some(Value::Boolean(false)));
    assert_eq!(
        *lines.lock(),
        vec!["Main St Pharmacy", "[ 10 ]", "false", WAITING_MESSAGE]
    );
    assert_eq!(event_loop.now(), Duration::from_millis(4000));
}
