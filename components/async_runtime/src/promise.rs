//! Promise implementation.
//!
//! A [`Promise`] is a write-once container for the outcome of an
//! asynchronous operation. It starts pending and settles exactly once to
//! either a value or an error; later settlement attempts are ignored.
//! Handlers registered with [`Promise::then`] run as microtasks on the
//! event loop that created the promise.

use crate::event_loop::Scheduler;
use crate::task_queue::MicroTask;
use core_types::{JsError, Value};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The state of a Promise.
///
/// Once settled (Fulfilled or Rejected), a Promise cannot change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    /// The initial state; the promise is neither fulfilled nor rejected.
    Pending,
    /// The promise has been resolved with a value.
    Fulfilled,
    /// The promise has been rejected with an error.
    Rejected,
}

/// The outcome a promise settled to.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Resolved with a value
    Fulfilled(Value),
    /// Rejected with an error
    Rejected(JsError),
}

impl Settlement {
    /// The matching [`PromiseState`].
    pub fn state(&self) -> PromiseState {
        match self {
            Settlement::Fulfilled(_) => PromiseState::Fulfilled,
            Settlement::Rejected(_) => PromiseState::Rejected,
        }
    }

    /// Converts into a `Result`.
    pub fn into_result(self) -> Result<Value, JsError> {
        match self {
            Settlement::Fulfilled(value) => Ok(value),
            Settlement::Rejected(error) => Err(error),
        }
    }
}

impl From<Result<Value, JsError>> for Settlement {
    fn from(result: Result<Value, JsError>) -> Self {
        match result {
            Ok(value) => Settlement::Fulfilled(value),
            Err(error) => Settlement::Rejected(error),
        }
    }
}

/// Handler run when a promise fulfills.
pub struct FulfillHandler {
    callback: Box<dyn FnOnce(Value) -> Result<Value, JsError> + Send>,
}

impl FulfillHandler {
    /// Creates a new handler from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Value) -> Result<Value, JsError> + Send + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Calls the handler with the fulfillment value.
    pub fn call(self, value: Value) -> Result<Value, JsError> {
        (self.callback)(value)
    }
}

impl fmt::Debug for FulfillHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FulfillHandler {{ .. }}")
    }
}

/// Handler run when a promise rejects.
///
/// Returning `Ok` recovers: the derived promise fulfills with that value.
pub struct RejectHandler {
    callback: Box<dyn FnOnce(JsError) -> Result<Value, JsError> + Send>,
}

impl RejectHandler {
    /// Creates a new handler from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(JsError) -> Result<Value, JsError> + Send + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Calls the handler with the rejection error.
    pub fn call(self, error: JsError) -> Result<Value, JsError> {
        (self.callback)(error)
    }
}

impl fmt::Debug for RejectHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RejectHandler {{ .. }}")
    }
}

type Step = Box<dyn FnOnce(Value) -> Promise + Send>;

enum ReactionHandler {
    Then {
        on_fulfilled: Option<FulfillHandler>,
        on_rejected: Option<RejectHandler>,
    },
    AndThen(Step),
    Forward,
}

/// A reaction to be triggered when a Promise settles.
///
/// Pairs a handler registered via `then`, `catch` or `and_then` with the
/// derived promise that receives the handler's outcome.
pub struct PromiseReaction {
    derived: Promise,
    handler: ReactionHandler,
}

impl PromiseReaction {
    fn run(self, settlement: Settlement) {
        let PromiseReaction { derived, handler } = self;
        match (handler, settlement) {
            (
                ReactionHandler::Then {
                    on_fulfilled: Some(handler),
                    ..
                },
                Settlement::Fulfilled(value),
            ) => {
                derived.settle(handler.call(value).into());
            }
            (
                ReactionHandler::Then {
                    on_rejected: Some(handler),
                    ..
                },
                Settlement::Rejected(error),
            ) => {
                derived.settle(handler.call(error).into());
            }
            (ReactionHandler::AndThen(step), Settlement::Fulfilled(value)) => {
                step(value).forward_to(&derived);
            }
            // Missing handler, rejected `and_then` or a forward: pass through.
            (_, settlement) => {
                derived.settle(settlement);
            }
        }
    }
}

impl fmt::Debug for PromiseReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.handler {
            ReactionHandler::Then { .. } => "then",
            ReactionHandler::AndThen(_) => "and_then",
            ReactionHandler::Forward => "forward",
        };
        f.debug_struct("PromiseReaction")
            .field("kind", &kind)
            .field("derived", &self.derived)
            .finish()
    }
}

#[derive(Default)]
struct PromiseInner {
    settlement: Option<Settlement>,
    reactions: Vec<PromiseReaction>,
}

/// A promise bound to an event loop.
///
/// `Promise` is a handle: clones share the same state, so a clone moved into
/// a timer callback settles the promise the caller holds.
///
/// # Examples
///
/// ```
/// use async_runtime::{EventLoop, ManualClock, PromiseState};
/// use core_types::Value;
/// use std::sync::Arc;
///
/// let event_loop = EventLoop::with_clock(Arc::new(ManualClock::new()));
/// let promise = event_loop.scheduler().new_promise();
/// assert_eq!(promise.state(), PromiseState::Pending);
///
/// assert!(promise.resolve(Value::Smi(42)));
/// assert!(!promise.resolve(Value::Smi(7)));
/// assert_eq!(promise.state(), PromiseState::Fulfilled);
/// assert_eq!(promise.result(), Some(Value::Smi(42)));
/// ```
#[derive(Clone)]
pub struct Promise {
    inner: Arc<Mutex<PromiseInner>>,
    scheduler: Scheduler,
}

impl Promise {
    /// Creates a new pending Promise whose reactions run on `scheduler`'s
    /// loop.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PromiseInner::default())),
            scheduler,
        }
    }

    /// Creates a Promise already fulfilled with `value`.
    pub fn resolved(scheduler: Scheduler, value: Value) -> Self {
        let promise = Self::new(scheduler);
        promise.resolve(value);
        promise
    }

    /// Creates a Promise already rejected with `error`.
    pub fn rejected(scheduler: Scheduler, error: JsError) -> Self {
        let promise = Self::new(scheduler);
        promise.reject(error);
        promise
    }

    /// Current state.
    pub fn state(&self) -> PromiseState {
        self.inner
            .lock()
            .settlement
            .as_ref()
            .map_or(PromiseState::Pending, Settlement::state)
    }

    /// Returns true once fulfilled or rejected.
    pub fn is_settled(&self) -> bool {
        self.inner.lock().settlement.is_some()
    }

    /// The settled outcome, if any.
    pub fn settlement(&self) -> Option<Settlement> {
        self.inner.lock().settlement.clone()
    }

    /// The fulfillment value, if fulfilled.
    pub fn result(&self) -> Option<Value> {
        match self.settlement() {
            Some(Settlement::Fulfilled(value)) => Some(value),
            _ => None,
        }
    }

    /// The rejection error, if rejected.
    pub fn error(&self) -> Option<JsError> {
        match self.settlement() {
            Some(Settlement::Rejected(error)) => Some(error),
            _ => None,
        }
    }

    /// Checks if reactions are waiting for settlement.
    pub fn has_pending_reactions(&self) -> bool {
        !self.inner.lock().reactions.is_empty()
    }

    /// Resolves the Promise with a value.
    ///
    /// Returns false (and changes nothing) if already settled.
    pub fn resolve(&self, value: Value) -> bool {
        self.settle(Settlement::Fulfilled(value))
    }

    /// Rejects the Promise with an error.
    ///
    /// Returns false (and changes nothing) if already settled.
    pub fn reject(&self, error: JsError) -> bool {
        self.settle(Settlement::Rejected(error))
    }

    /// Settles the Promise and queues its reactions as microtasks.
    ///
    /// Only the first call has an effect.
    pub fn settle(&self, settlement: Settlement) -> bool {
        let reactions = {
            let mut inner = self.inner.lock();
            if inner.settlement.is_some() {
                trace!("ignoring repeated settlement");
                return false;
            }
            inner.settlement = Some(settlement.clone());
            std::mem::take(&mut inner.reactions)
        };

        trace!(state = ?settlement.state(), reactions = reactions.len(), "promise settled");
        for reaction in reactions {
            self.queue_reaction(reaction, settlement.clone());
        }
        true
    }

    /// Adds handlers for fulfillment and/or rejection.
    ///
    /// Returns a new Promise settled with the outcome of whichever handler
    /// runs. A missing handler passes the settlement through unchanged.
    pub fn then(
        &self,
        on_fulfilled: Option<FulfillHandler>,
        on_rejected: Option<RejectHandler>,
    ) -> Promise {
        self.react(ReactionHandler::Then {
            on_fulfilled,
            on_rejected,
        })
    }

    /// Adds a rejection handler only.
    pub fn catch(&self, on_rejected: RejectHandler) -> Promise {
        self.then(None, Some(on_rejected))
    }

    /// Chains a dependent asynchronous step.
    ///
    /// `step` runs only after this promise fulfills; the returned promise
    /// adopts the settlement of the promise `step` returns. A rejection skips
    /// `step` and flows straight to the returned promise.
    pub fn and_then<F>(&self, step: F) -> Promise
    where
        F: FnOnce(Value) -> Promise + Send + 'static,
    {
        self.react(ReactionHandler::AndThen(Box::new(step)))
    }

    fn forward_to(&self, target: &Promise) {
        self.register(PromiseReaction {
            derived: target.clone(),
            handler: ReactionHandler::Forward,
        });
    }

    fn react(&self, handler: ReactionHandler) -> Promise {
        let derived = self.scheduler.new_promise();
        self.register(PromiseReaction {
            derived: derived.clone(),
            handler,
        });
        derived
    }

    fn register(&self, reaction: PromiseReaction) {
        let mut inner = self.inner.lock();
        let settled = inner.settlement.clone();
        match settled {
            Some(settlement) => {
                drop(inner);
                self.queue_reaction(reaction, settlement);
            }
            None => inner.reactions.push(reaction),
        }
    }

    fn queue_reaction(&self, reaction: PromiseReaction, settlement: Settlement) {
        self.scheduler.enqueue_microtask(MicroTask::new(move || {
            reaction.run(settlement);
            Ok(Value::Undefined)
        }));
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("settlement", &self.settlement())
            .finish()
    }
}
