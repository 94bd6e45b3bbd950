//! Async value state machine.
//!
//! An async value is a one-way-settling container for a result that is not
//! yet available. Settlement schedules every registered reaction, in
//! registration order, onto the deferred continuation queue; reactions are
//! never run synchronously in the frame that registers or settles.

use crate::event_loop::Scheduler;
use crate::queue::Continuation;
use core_types::{Fault, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// Handler invoked with the fulfilled value of an async value.
pub type FulfillHandler = Box<dyn FnOnce(Value) -> Result<Value, Fault> + Send>;

/// Handler invoked with the rejection fault of an async value.
pub type RejectHandler = Box<dyn FnOnce(Fault) -> Result<Value, Fault> + Send>;

/// The externally observable state of an async value.
///
/// The transition out of `Pending` is one-way and irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncValueState {
    /// Not yet settled
    Pending,
    /// Settled with a value
    Fulfilled,
    /// Settled with a fault
    Rejected,
}

/// A settlement outcome, shared by every reaction it fans out to.
#[derive(Debug, Clone)]
enum Outcome {
    Fulfilled(Value),
    Rejected(Fault),
}

enum Settlement {
    Pending,
    Settled(Outcome),
}

/// One registered reaction pair and the settler of its derived value.
struct Reaction {
    on_fulfilled: Option<FulfillHandler>,
    on_rejected: Option<RejectHandler>,
    derived: Settler,
}

impl Reaction {
    /// Runs the matching handler and settles the derived value.
    ///
    /// A handler fault rejects the derived value rather than escaping to
    /// the top level; a missing fulfil handler passes the value through,
    /// and a missing reject handler re-rejects with the same fault.
    fn fire(self, outcome: Outcome) -> Result<Value, Fault> {
        let Reaction {
            on_fulfilled,
            on_rejected,
            derived,
        } = self;
        match outcome {
            Outcome::Fulfilled(value) => match on_fulfilled {
                Some(handler) => match handler(value) {
                    Ok(out) => derived.resolve(out),
                    Err(fault) => derived.reject(fault),
                },
                None => derived.resolve(value),
            },
            Outcome::Rejected(fault) => match on_rejected {
                Some(handler) => match handler(fault) {
                    Ok(out) => derived.resolve(out),
                    Err(fault) => derived.reject(fault),
                },
                None => derived.reject(fault),
            },
        }
        Ok(Value::Undefined)
    }
}

struct AsyncValueInner {
    settlement: Settlement,
    reactions: Vec<Reaction>,
}

impl AsyncValueInner {
    /// Registers a reaction, or hands it back with the outcome when the
    /// value has already settled.
    fn register(&mut self, reaction: Reaction) -> Option<(Reaction, Outcome)> {
        match &self.settlement {
            Settlement::Pending => {
                self.reactions.push(reaction);
                None
            }
            Settlement::Settled(outcome) => Some((reaction, outcome.clone())),
        }
    }
}

/// A value not yet available.
///
/// Consumers register reactions with [`on_settle`](AsyncValue::on_settle)
/// (or the [`when_fulfilled`](AsyncValue::when_fulfilled) /
/// [`when_rejected`](AsyncValue::when_rejected) shorthands); the producer
/// settles through the paired [`Settler`]. Cloning shares the same
/// underlying value.
///
/// Suspension is expressed through registration: the remainder of a
/// suspended computation is the closure passed to `on_settle`, resumed as
/// a new root frame once the value settles and its turn on the deferred
/// continuation queue is reached.
#[derive(Clone)]
pub struct AsyncValue {
    inner: Arc<Mutex<AsyncValueInner>>,
    scheduler: Scheduler,
}

impl AsyncValue {
    /// Returns the current state.
    pub fn state(&self) -> AsyncValueState {
        match &self.inner.lock().settlement {
            Settlement::Pending => AsyncValueState::Pending,
            Settlement::Settled(Outcome::Fulfilled(_)) => AsyncValueState::Fulfilled,
            Settlement::Settled(Outcome::Rejected(_)) => AsyncValueState::Rejected,
        }
    }

    /// Returns the fulfilled value, if settled that way.
    pub fn settled_value(&self) -> Option<Value> {
        match &self.inner.lock().settlement {
            Settlement::Settled(Outcome::Fulfilled(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns the rejection fault, if settled that way.
    pub fn settled_fault(&self) -> Option<Fault> {
        match &self.inner.lock().settlement {
            Settlement::Settled(Outcome::Rejected(fault)) => Some(fault.clone()),
            _ => None,
        }
    }

    /// Registers a reaction pair and returns the derived chain value.
    ///
    /// The derived value settles with the return value of whichever
    /// handler ran, rejects with the handler's fault if it raised one, and
    /// propagates the original outcome when the matching handler is
    /// missing. If this value has already settled, the reaction is
    /// scheduled immediately, still via the deferred continuation queue.
    pub fn on_settle(
        &self,
        on_fulfilled: Option<FulfillHandler>,
        on_rejected: Option<RejectHandler>,
    ) -> AsyncValue {
        let (derived, settler) = self.scheduler.create_async_value();
        let reaction = Reaction {
            on_fulfilled,
            on_rejected,
            derived: settler,
        };
        let already_settled = self.inner.lock().register(reaction);
        if let Some((reaction, outcome)) = already_settled {
            schedule_reaction(&self.scheduler, reaction, outcome);
        }
        derived
    }

    /// Registers a fulfilment handler only.
    pub fn when_fulfilled<F>(&self, f: F) -> AsyncValue
    where
        F: FnOnce(Value) -> Result<Value, Fault> + Send + 'static,
    {
        self.on_settle(Some(Box::new(f)), None)
    }

    /// Registers a rejection handler only.
    pub fn when_rejected<F>(&self, f: F) -> AsyncValue
    where
        F: FnOnce(Fault) -> Result<Value, Fault> + Send + 'static,
    {
        self.on_settle(None, Some(Box::new(f)))
    }
}

impl std::fmt::Debug for AsyncValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AsyncValue {{ state: {:?} }}", self.state())
    }
}

/// The producer half of an async value pair.
///
/// `resolve` and `reject` are the only ways to settle the paired value.
/// Settlement is idempotent: after the first call, later calls are silent
/// no-ops.
#[derive(Clone)]
pub struct Settler {
    inner: Arc<Mutex<AsyncValueInner>>,
    scheduler: Scheduler,
}

impl Settler {
    /// Fulfils the paired value.
    pub fn resolve(&self, value: Value) {
        self.settle(Outcome::Fulfilled(value));
    }

    /// Rejects the paired value.
    pub fn reject(&self, fault: Fault) {
        self.settle(Outcome::Rejected(fault));
    }

    fn settle(&self, outcome: Outcome) {
        let reactions = {
            let mut inner = self.inner.lock();
            if !matches!(inner.settlement, Settlement::Pending) {
                return;
            }
            inner.settlement = Settlement::Settled(outcome.clone());
            std::mem::take(&mut inner.reactions)
        };
        for reaction in reactions {
            schedule_reaction(&self.scheduler, reaction, outcome.clone());
        }
    }
}

impl std::fmt::Debug for Settler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Settler {{ ... }}")
    }
}

/// Creates a pending async value bound to `scheduler`.
pub(crate) fn new_pair(scheduler: Scheduler) -> (AsyncValue, Settler) {
    let inner = Arc::new(Mutex::new(AsyncValueInner {
        settlement: Settlement::Pending,
        reactions: Vec::new(),
    }));
    let value = AsyncValue {
        inner: Arc::clone(&inner),
        scheduler: scheduler.clone(),
    };
    let settler = Settler { inner, scheduler };
    (value, settler)
}

fn schedule_reaction(scheduler: &Scheduler, reaction: Reaction, outcome: Outcome) {
    scheduler.enqueue_continuation(Continuation::named("reaction", move || {
        reaction.fire(outcome)
    }));
}
