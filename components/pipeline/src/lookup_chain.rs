//! Two dependent asynchronous lookups chained with one failure handler.
//!
//! The first lookup finds a place near a location; the second asks whether
//! that place is open. The second step starts only after the first
//! fulfills, and a failure in either step lands in the same handler.

use crate::config::DEFAULT_SETTLE_DELAY;
use crate::console::Console;
use async_runtime::{FulfillHandler, Promise, RejectHandler, Scheduler, Task};
use core_types::{JsError, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Asynchronous lookups used by [`LookupChain`].
pub trait Lookup: Send + Sync {
    /// Resolves to the place found near `location`.
    fn find_place(&self, location: &str) -> Promise;

    /// Resolves to whether `place` is currently open.
    fn open_times(&self, place: &str) -> Promise;
}

/// In-memory [`Lookup`] answering after a fixed delay.
///
/// Unknown keys reject.
#[derive(Debug, Clone)]
pub struct DirectoryLookup {
    scheduler: Scheduler,
    delay: Duration,
    places: HashMap<String, String>,
    open: HashMap<String, bool>,
}

impl DirectoryLookup {
    /// Creates an empty directory answering on `scheduler`'s loop.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            delay: DEFAULT_SETTLE_DELAY,
            places: HashMap::new(),
            open: HashMap::new(),
        }
    }

    /// Set the answer delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Register the place found near `location`
    pub fn with_place(mut self, location: impl Into<String>, place: impl Into<String>) -> Self {
        self.places.insert(location.into(), place.into());
        self
    }

    /// Register whether `place` is open
    pub fn with_open(mut self, place: impl Into<String>, open: bool) -> Self {
        self.open.insert(place.into(), open);
        self
    }

    fn answer_later(&self, label: &'static str, answer: Result<Value, JsError>) -> Promise {
        let promise = self.scheduler.new_promise();
        let settle = promise.clone();
        self.scheduler.set_timeout(
            self.delay,
            Task::labeled(label, move || {
                settle.settle(answer.into());
                Ok(Value::Undefined)
            }),
        );
        promise
    }
}

impl Lookup for DirectoryLookup {
    fn find_place(&self, location: &str) -> Promise {
        let answer = self
            .places
            .get(location)
            .map(|place| Value::String(place.clone()))
            .ok_or_else(|| JsError::error(format!("No place found near {}", location)));
        self.answer_later("lookup-place", answer)
    }

    fn open_times(&self, place: &str) -> Promise {
        let answer = self
            .open
            .get(place)
            .map(|open| Value::Boolean(*open))
            .ok_or_else(|| JsError::error(format!("No opening times for {}", place)));
        self.answer_later("lookup-open-times", answer)
    }
}

/// Finds a place, then checks whether it is open, logging each answer.
pub struct LookupChain {
    lookup: Arc<dyn Lookup>,
    console: Console,
}

impl LookupChain {
    /// Creates a chain over `lookup`, logging to `console`.
    pub fn new<L: Lookup + 'static>(lookup: L, console: Console) -> Self {
        Self {
            lookup: Arc::new(lookup),
            console,
        }
    }

    /// Runs both lookups in sequence.
    ///
    /// The place is logged when found, then the open answer. If either
    /// lookup rejects, only the error message is logged and the second
    /// lookup is skipped when the first failed. The returned promise fulfills
    /// with the open answer, or `Undefined` after a failure.
    pub fn run(&self, location: &str) -> Promise {
        debug!(location, "starting lookup chain");
        let lookup = Arc::clone(&self.lookup);
        let on_place = self.console.clone();
        let on_open = self.console.clone();
        let on_error = self.console.clone();

        self.lookup
            .find_place(location)
            .and_then(move |place| {
                on_place.log(&place);
                lookup.open_times(&place.to_string())
            })
            .then(
                Some(FulfillHandler::new(move |is_open| {
                    on_open.log(&is_open);
                    Ok(is_open)
                })),
                None,
            )
            .catch(RejectHandler::new(move |error| {
                on_error.log_str(&error.message);
                Ok(Value::Undefined)
            }))
    }
}

impl fmt::Debug for LookupChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupChain")
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}
