//! Deferred continuation and timer queue management.
//!
//! This module provides the two queues driven by the scheduler loop.
//! Continuations are drained completely between timer firings; timer
//! entries execute one per loop cycle, ordered by (deadline, insertion
//! sequence).

use core_types::{Fault, Value};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};

/// Identifier of a timer queue entry, stable across re-insertions of a
/// repeating entry.
pub type TimerId = u64;

/// A deferred continuation awaiting its turn on the fast queue.
///
/// Continuations are invoke-once: running one consumes it.
pub struct Continuation {
    name: Option<String>,
    callback: Box<dyn FnOnce() -> Result<Value, Fault> + Send>,
}

impl Continuation {
    /// Creates an anonymous continuation from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Value, Fault> + Send + 'static,
    {
        Self {
            name: None,
            callback: Box::new(f),
        }
    }

    /// Creates a named continuation; the name appears in fault reports.
    pub fn named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> Result<Value, Fault> + Send + 'static,
    {
        Self {
            name: Some(name.into()),
            callback: Box::new(f),
        }
    }

    /// Returns the continuation's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Executes the continuation, consuming it.
    pub fn run(self) -> Result<Value, Fault> {
        (self.callback)()
    }
}

impl std::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Continuation {{ name: {:?} }}", self.name)
    }
}

/// FIFO queue of deferred continuations.
///
/// Mutated only by `enqueue` (producers) and `dequeue` (the scheduler
/// loop's drain phase).
#[derive(Debug, Default)]
pub struct ContinuationQueue {
    queue: VecDeque<Continuation>,
}

impl ContinuationQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a continuation to the back of the queue.
    pub fn enqueue(&mut self, continuation: Continuation) {
        self.queue.push_back(continuation);
    }

    /// Removes and returns the front continuation.
    pub fn dequeue(&mut self) -> Option<Continuation> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued continuations.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// A timer callback.
///
/// Unlike [`Continuation`], a timer callback may fire more than once when
/// its entry repeats, so it is `FnMut` and runs by mutable reference.
pub struct TimerCallback {
    callback: Box<dyn FnMut() -> Result<Value, Fault> + Send>,
}

impl TimerCallback {
    /// Creates a timer callback from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() -> Result<Value, Fault> + Send + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Executes the callback for one firing.
    pub fn run(&mut self) -> Result<Value, Fault> {
        (self.callback)()
    }
}

impl std::fmt::Debug for TimerCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimerCallback {{ ... }}")
    }
}

/// One entry in the timer queue.
///
/// Ordering is by `(deadline_ms, seq)` only: entries due at the same
/// virtual time fire in insertion order. A repeating entry keeps its id
/// but takes a fresh sequence number on each re-insertion.
pub struct TimerEntry {
    deadline_ms: u64,
    seq: u64,
    id: TimerId,
    callback: TimerCallback,
    period: Option<u64>,
}

impl TimerEntry {
    /// Returns the entry's identifier.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Returns the virtual deadline of this entry.
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    /// Returns the repeat period, or None for a one-shot entry.
    pub fn period(&self) -> Option<u64> {
        self.period
    }

    /// Executes the entry's callback for one firing.
    pub fn run(&mut self) -> Result<Value, Fault> {
        self.callback.run()
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        (self.deadline_ms, self.seq) == (other.deadline_ms, other.seq)
    }
}

impl Eq for TimerEntry {}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline_ms, self.seq).cmp(&(other.deadline_ms, other.seq))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for TimerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEntry")
            .field("id", &self.id)
            .field("deadline_ms", &self.deadline_ms)
            .field("seq", &self.seq)
            .field("period", &self.period)
            .finish()
    }
}

/// Priority queue of timer entries with cancellation support.
///
/// Cancelling a still-queued entry removes it before it can fire; the
/// cancelled id is also remembered so an entry that was already dequeued
/// for execution does not re-insert itself when repeating. Cancellation
/// is checked again at the moment of intended execution in [`pop_due`].
///
/// [`pop_due`]: TimerQueue::pop_due
#[derive(Debug)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<TimerEntry>>,
    cancelled: HashSet<TimerId>,
    next_id: TimerId,
    next_seq: u64,
}

impl TimerQueue {
    /// Creates a new empty timer queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            cancelled: HashSet::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Inserts an entry due at `deadline_ms`, returning its id.
    ///
    /// A `Some` period makes the entry repeating: after each firing it is
    /// re-inserted at `now + period` via [`reschedule`](Self::reschedule).
    pub fn insert(
        &mut self,
        callback: TimerCallback,
        deadline_ms: u64,
        period: Option<u64>,
    ) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(TimerEntry {
            deadline_ms,
            seq,
            id,
            callback,
            period,
        }));
        id
    }

    /// Cancels the entry with the given id.
    ///
    /// A queued entry is removed immediately. An entry already dequeued
    /// for execution still fires, but a repeating one will not re-insert.
    pub fn cancel(&mut self, id: TimerId) {
        self.cancelled.insert(id);
        self.heap.retain(|Reverse(entry)| entry.id != id);
    }

    /// Returns true if the id was cancelled and not yet acknowledged.
    pub fn was_cancelled(&self, id: TimerId) -> bool {
        self.cancelled.contains(&id)
    }

    /// Returns the smallest deadline currently queued.
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline_ms)
    }

    /// Removes and returns the next due entry, skipping cancelled ones.
    ///
    /// Returns None when the queue is empty or the front entry is not yet
    /// due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimerEntry> {
        loop {
            let due = match self.heap.peek() {
                Some(Reverse(front)) => front.deadline_ms <= now_ms,
                None => false,
            };
            if !due {
                return None;
            }
            let Reverse(entry) = self.heap.pop()?;
            if self.cancelled.remove(&entry.id) {
                continue;
            }
            return Some(entry);
        }
    }

    /// Re-inserts a repeating entry for its next firing at `now + period`.
    ///
    /// Returns false (dropping the entry) for one-shot entries and for
    /// entries cancelled since they were dequeued.
    pub fn reschedule(&mut self, entry: TimerEntry, now_ms: u64) -> bool {
        let Some(period) = entry.period else {
            return false;
        };
        if self.cancelled.remove(&entry.id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(TimerEntry {
            deadline_ms: now_ms.saturating_add(period),
            seq,
            ..entry
        }));
        true
    }

    /// Returns true if no entries are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}
