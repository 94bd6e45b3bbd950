//! Scheduler loop implementation.
//!
//! This module provides the scheduler that drives the call stack and the
//! two deferred-work queues. Each cycle drains the deferred continuation
//! queue completely, then executes exactly one due timer entry, advancing
//! the virtual clock when none is due. Continuations therefore have strict
//! priority over timer callbacks.

use crate::async_value::{self, AsyncValue, Settler};
use crate::call_stack::{CallStack, Frame, DEFAULT_MAX_DEPTH};
use crate::clock::VirtualClock;
use crate::queue::{Continuation, ContinuationQueue, TimerCallback, TimerId, TimerQueue};
use core_types::{Fault, FrameTrace, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// The phase the scheduler loop is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// The loop has not started
    Idle,
    /// A root frame is executing
    Running,
    /// The continuation queue is being drained
    Draining,
    /// The next due timer entry is being selected
    TimerPick,
    /// Both queues and the stack are empty; the loop has stopped
    Halted,
}

/// A fault that escaped a root frame unhandled.
///
/// Reported to the caller of [`Scheduler::run`]; execution of remaining
/// queued work continues undisturbed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnhandledFault {
    /// The fault that escaped
    pub fault: Fault,
    /// The root frame it escaped from
    pub frame: FrameTrace,
}

/// Outcome of a [`Scheduler::run`] call.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Unhandled top-level faults, in the order they were encountered
    pub unhandled: Vec<UnhandledFault>,
}

impl RunReport {
    /// Returns true if no unhandled faults were encountered.
    pub fn is_clean(&self) -> bool {
        self.unhandled.is_empty()
    }
}

/// Handle to a scheduled timer entry.
///
/// Cancelling a still-queued entry removes it before it can fire;
/// cancelling an entry already dequeued for execution does not prevent
/// that execution, but stops a repeating entry from re-inserting.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: TimerId,
    scheduler: Scheduler,
}

impl TimerHandle {
    /// Returns the timer entry's identifier.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancels the entry.
    pub fn cancel(&self) {
        self.scheduler.inner.lock().timers.cancel(self.id);
    }
}

struct SchedulerInner {
    continuations: ContinuationQueue,
    timers: TimerQueue,
    clock: VirtualClock,
    stack: CallStack,
    phase: LoopPhase,
    shutdown: bool,
}

/// The deterministic cooperative scheduler.
///
/// A `Scheduler` is a cheaply cloneable handle; clones share the same
/// queues, clock, and call stack, so callbacks can capture one to schedule
/// further work. Exactly one logical thread drives execution: the internal
/// lock is never held while a user callback runs.
///
/// # Examples
///
/// ```
/// use scheduler::Scheduler;
/// use core_types::Value;
///
/// let scheduler = Scheduler::new();
/// scheduler.schedule_continuation(|| Ok(Value::Undefined));
/// let report = scheduler.run();
/// assert!(report.is_clean());
/// ```
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl Scheduler {
    /// Creates a scheduler with empty queues and the default stack depth.
    pub fn new() -> Self {
        Self::with_max_stack_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates a scheduler whose call stack is limited to `max_depth`.
    pub fn with_max_stack_depth(max_depth: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                continuations: ContinuationQueue::new(),
                timers: TimerQueue::new(),
                clock: VirtualClock::new(),
                stack: CallStack::with_max_depth(max_depth),
                phase: LoopPhase::Idle,
                shutdown: false,
            })),
        }
    }

    /// Enqueues a continuation onto the deferred continuation queue.
    ///
    /// Never fails; the queue is unbounded.
    pub fn schedule_continuation<F>(&self, f: F)
    where
        F: FnOnce() -> Result<Value, Fault> + Send + 'static,
    {
        self.enqueue_continuation(Continuation::new(f));
    }

    /// Enqueues an already-built continuation.
    pub fn enqueue_continuation(&self, continuation: Continuation) {
        self.inner.lock().continuations.enqueue(continuation);
    }

    /// Schedules a timer callback due in `delay_ms` virtual milliseconds.
    ///
    /// With `repeating` set, the entry re-inserts itself at `now + delay_ms`
    /// after each firing completes, until cancelled through the returned
    /// handle.
    pub fn schedule_timer<F>(&self, f: F, delay_ms: u64, repeating: bool) -> TimerHandle
    where
        F: FnMut() -> Result<Value, Fault> + Send + 'static,
    {
        let id = {
            let mut inner = self.inner.lock();
            let deadline = inner.clock.now_ms().saturating_add(delay_ms);
            let period = repeating.then_some(delay_ms);
            inner.timers.insert(TimerCallback::new(f), deadline, period)
        };
        TimerHandle {
            id,
            scheduler: self.clone(),
        }
    }

    /// Creates a pending async value bound to this scheduler.
    ///
    /// The [`Settler`] is the only way to settle the paired value.
    pub fn create_async_value(&self) -> (AsyncValue, Settler) {
        async_value::new_pair(self.clone())
    }

    /// Executes `f` in a nested synchronous frame.
    ///
    /// The frame is pushed before `f` runs and popped after; pushing past
    /// the configured maximum depth fails with a stack overflow fault
    /// carrying the current trace. A fault raised by `f` propagates to the
    /// caller via the returned `Result`.
    pub fn call<F>(&self, name: impl Into<String>, f: F) -> Result<Value, Fault>
    where
        F: FnOnce() -> Result<Value, Fault>,
    {
        {
            let mut inner = self.inner.lock();
            inner.stack.push(Frame::call(name))?;
        }
        let result = f();
        self.inner.lock().stack.pop();
        result
    }

    /// Requests a shutdown of the loop.
    ///
    /// [`run`](Self::run) stops at the next phase boundary, returning the
    /// faults collected so far; queued work is left in place.
    pub fn request_shutdown(&self) {
        self.inner.lock().shutdown = true;
    }

    /// Drives the loop until both queues are empty or shutdown is
    /// requested.
    ///
    /// Each queue entry executes as a new root frame. A fault escaping a
    /// root frame is recorded in the report and the loop continues with
    /// the remaining queued work.
    pub fn run(&self) -> RunReport {
        let mut report = RunReport::default();
        loop {
            self.set_phase(LoopPhase::Draining);
            self.drain_continuations(&mut report);

            if self.inner.lock().shutdown {
                break;
            }

            self.set_phase(LoopPhase::TimerPick);
            if !self.fire_next_timer(&mut report) && self.inner.lock().continuations.is_empty() {
                break;
            }
        }
        {
            let mut inner = self.inner.lock();
            inner.shutdown = false;
            inner.phase = LoopPhase::Halted;
        }
        report
    }

    /// Returns the current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.lock().clock.now_ms()
    }

    /// Returns the loop's current phase.
    pub fn phase(&self) -> LoopPhase {
        self.inner.lock().phase
    }

    /// Returns the current call stack depth.
    pub fn stack_depth(&self) -> usize {
        self.inner.lock().stack.depth()
    }

    /// Returns true if the continuation queue is empty.
    pub fn is_continuation_queue_empty(&self) -> bool {
        self.inner.lock().continuations.is_empty()
    }

    /// Returns true if the timer queue is empty.
    pub fn is_timer_queue_empty(&self) -> bool {
        self.inner.lock().timers.is_empty()
    }

    /// Drains the continuation queue completely.
    ///
    /// Entries enqueued while the drain is in progress are drained within
    /// the same phase; the phase ends only when the queue is observed
    /// empty.
    fn drain_continuations(&self, report: &mut RunReport) {
        loop {
            let next = self.inner.lock().continuations.dequeue();
            let Some(continuation) = next else {
                break;
            };
            let frame = Frame::continuation(continuation.name().map(str::to_string));
            self.execute_root(frame, report, || continuation.run());
        }
    }

    /// Executes at most one due timer entry; returns whether one fired.
    ///
    /// When the queue is non-empty but nothing is due, the virtual clock
    /// advances to the next deadline first (simulated wait).
    fn fire_next_timer(&self, report: &mut RunReport) -> bool {
        let entry = {
            let mut inner = self.inner.lock();
            match inner.timers.next_deadline() {
                None => return false,
                Some(deadline) => inner.clock.advance_to(deadline),
            }
            let now = inner.clock.now_ms();
            inner.timers.pop_due(now)
        };
        let Some(mut entry) = entry else {
            return false;
        };

        let frame = Frame::timer(entry.id());
        self.execute_root(frame, report, || entry.run());

        // Re-insertion happens only after the firing completes, so
        // overlapping firings of one entry cannot occur.
        let mut inner = self.inner.lock();
        let now = inner.clock.now_ms();
        inner.timers.reschedule(entry, now);
        true
    }

    /// Runs one queue entry as a new root frame.
    ///
    /// An `Err` escaping the entry is recorded as an unhandled top-level
    /// fault against the root frame's trace.
    fn execute_root<F>(&self, frame: Frame, report: &mut RunReport, f: F)
    where
        F: FnOnce() -> Result<Value, Fault>,
    {
        let trace = frame.trace_at(0);
        {
            let mut inner = self.inner.lock();
            if let Err(fault) = inner.stack.push(frame) {
                report.unhandled.push(UnhandledFault {
                    fault,
                    frame: trace,
                });
                return;
            }
            inner.phase = LoopPhase::Running;
        }
        let result = f();
        let mut inner = self.inner.lock();
        inner.stack.pop();
        if let Err(fault) = result {
            report.unhandled.push(UnhandledFault {
                fault,
                frame: trace,
            });
        }
    }

    fn set_phase(&self, phase: LoopPhase) {
        self.inner.lock().phase = phase;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Scheduler")
            .field("phase", &inner.phase)
            .field("continuations", &inner.continuations.len())
            .field("timers", &inner.timers.len())
            .field("now_ms", &inner.clock.now_ms())
            .field("stack_depth", &inner.stack.depth())
            .finish()
    }
}
