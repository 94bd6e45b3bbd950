//! Unit tests for TimerQueue ordering and cancellation

use core_types::Value;
use scheduler::{TimerCallback, TimerQueue, VirtualClock};
use std::sync::{Arc, Mutex};

fn noop() -> TimerCallback {
    TimerCallback::new(|| Ok(Value::Undefined))
}

#[test]
fn ids_are_distinct_and_stable() {
    let mut queue = TimerQueue::new();
    let a = queue.insert(noop(), 0, None);
    let b = queue.insert(noop(), 0, None);
    assert_ne!(a, b);
}

#[test]
fn next_deadline_is_the_smallest() {
    let mut queue = TimerQueue::new();
    queue.insert(noop(), 30, None);
    queue.insert(noop(), 10, None);
    queue.insert(noop(), 20, None);
    assert_eq!(queue.next_deadline(), Some(10));
}

#[test]
fn pop_due_drains_in_deadline_then_insertion_order() {
    let mut queue = TimerQueue::new();
    let late = queue.insert(noop(), 20, None);
    let first_at_ten = queue.insert(noop(), 10, None);
    let second_at_ten = queue.insert(noop(), 10, None);

    assert_eq!(queue.pop_due(20).unwrap().id(), first_at_ten);
    assert_eq!(queue.pop_due(20).unwrap().id(), second_at_ten);
    assert_eq!(queue.pop_due(20).unwrap().id(), late);
    assert!(queue.pop_due(20).is_none());
}

#[test]
fn cancel_is_checked_at_execution_time() {
    // Cancelling a due entry after insertion but before pop must still
    // prevent the firing.
    let mut queue = TimerQueue::new();
    let id = queue.insert(noop(), 0, None);
    let other = queue.insert(noop(), 0, None);
    queue.cancel(id);

    assert_eq!(queue.pop_due(0).unwrap().id(), other);
    assert!(queue.pop_due(0).is_none());
}

#[test]
fn cancelled_repeating_entry_stops_after_current_firing() {
    let mut queue = TimerQueue::new();
    let id = queue.insert(noop(), 0, Some(10));

    let entry = queue.pop_due(0).unwrap();
    // Cancelled while dequeued for execution: the firing proceeds, the
    // re-insert does not.
    queue.cancel(id);
    assert!(!queue.reschedule(entry, 0));
    assert!(queue.is_empty());
    assert!(!queue.was_cancelled(id));
}

#[test]
fn rescheduled_entry_keeps_id_and_callback_state() {
    let count = Arc::new(Mutex::new(0u32));
    let c = count.clone();
    let callback = TimerCallback::new(move || {
        *c.lock().unwrap() += 1;
        Ok(Value::Int(0))
    });

    let mut queue = TimerQueue::new();
    let id = queue.insert(callback, 0, Some(5));

    let mut entry = queue.pop_due(0).unwrap();
    entry.run().unwrap();
    assert!(queue.reschedule(entry, 0));

    let mut entry = queue.pop_due(5).unwrap();
    assert_eq!(entry.id(), id);
    entry.run().unwrap();
    assert_eq!(*count.lock().unwrap(), 2);
}

#[test]
fn reinsertion_goes_behind_existing_equal_deadline() {
    let mut queue = TimerQueue::new();
    let repeating = queue.insert(noop(), 0, Some(10));
    let other = queue.insert(noop(), 10, None);

    let entry = queue.pop_due(0).unwrap();
    assert_eq!(entry.id(), repeating);
    queue.reschedule(entry, 0);

    // Both are now due at 10; the older insertion fires first
    assert_eq!(queue.pop_due(10).unwrap().id(), other);
    assert_eq!(queue.pop_due(10).unwrap().id(), repeating);
}

#[test]
fn clock_orders_virtual_waits() {
    let mut clock = VirtualClock::new();
    let mut queue = TimerQueue::new();
    queue.insert(noop(), 40, None);

    // Nothing due yet: the loop would advance the clock to the deadline
    assert!(queue.pop_due(clock.now_ms()).is_none());
    if let Some(deadline) = queue.next_deadline() {
        clock.advance_to(deadline);
    }
    assert_eq!(clock.now_ms(), 40);
    assert!(queue.pop_due(clock.now_ms()).is_some());
}
