//! Demonstration scenarios for the scheduler.
//!
//! Each scenario builds a scheduler, schedules some work through the
//! public API, drives the loop to completion, and returns the ordered
//! trace of events it produced, one line per event.

use crate::error::{CliError, CliResult};
use core_types::{Fault, Value};
use scheduler::{Scheduler, TimerHandle};
use std::sync::{Arc, Mutex};

type Trace = Arc<Mutex<Vec<String>>>;

/// Returns the names of the available scenarios.
pub fn list_scenarios() -> &'static [&'static str] {
    &["ordering", "chain", "interval", "race"]
}

/// Runs the named scenario and returns its trace lines.
pub fn run_scenario(name: &str, max_depth: usize) -> CliResult<Vec<String>> {
    let scheduler = Scheduler::with_max_stack_depth(max_depth);
    let trace: Trace = Arc::new(Mutex::new(vec![]));

    match name {
        "ordering" => ordering(&scheduler, &trace),
        "chain" => chain(&scheduler, &trace),
        "interval" => interval(&scheduler, &trace),
        "race" => race(&scheduler, &trace),
        other => return Err(CliError::UnknownScenario(other.to_string())),
    }

    let report = scheduler.run();
    let mut lines = trace.lock().unwrap().clone();
    for unhandled in &report.unhandled {
        lines.push(format!(
            "unhandled fault in {}: {}",
            unhandled.frame, unhandled.fault
        ));
    }
    Ok(lines)
}

fn push(trace: &Trace, line: impl Into<String>) {
    trace.lock().unwrap().push(line.into());
}

/// Continuations retain strict priority over a zero-delay timer.
fn ordering(scheduler: &Scheduler, trace: &Trace) {
    let t = trace.clone();
    scheduler.schedule_continuation(move || {
        push(&t, "continuation A");
        Ok(Value::Undefined)
    });

    let t = trace.clone();
    scheduler.schedule_timer(
        move || {
            push(&t, "timer B (delay 0)");
            Ok(Value::Undefined)
        },
        0,
        false,
    );

    let t = trace.clone();
    scheduler.schedule_continuation(move || {
        push(&t, "continuation C");
        Ok(Value::Undefined)
    });
}

/// An async value chain with a faulting handler and a recovery step.
fn chain(scheduler: &Scheduler, trace: &Trace) {
    let (value, settler) = scheduler.create_async_value();

    let t = trace.clone();
    let doubled = value.when_fulfilled(move |v| {
        push(&t, format!("step 1 received {:?}", v));
        match v {
            Value::Int(n) => Ok(Value::Int(n * 2)),
            other => Ok(other),
        }
    });

    let t = trace.clone();
    let failed = doubled.when_fulfilled(move |v| {
        push(&t, format!("step 2 received {:?}, faulting", v));
        Err(Fault::synchronous("step 2 cannot proceed"))
    });

    let t = trace.clone();
    failed.when_rejected(move |fault| {
        push(&t, format!("step 3 recovered from: {}", fault));
        Ok(Value::Str("recovered".to_string()))
    });

    settler.resolve(Value::Int(21));
}

/// A repeating timer that cancels itself after three firings.
fn interval(scheduler: &Scheduler, trace: &Trace) {
    let count = Arc::new(Mutex::new(0u32));
    let handle: Arc<Mutex<Option<TimerHandle>>> = Arc::new(Mutex::new(None));

    let t = trace.clone();
    let sched = scheduler.clone();
    let c = count.clone();
    let h = handle.clone();
    let installed = scheduler.schedule_timer(
        move || {
            let mut count = c.lock().unwrap();
            *count += 1;
            push(&t, format!("tick {} at {}ms", *count, sched.now_ms()));
            if *count == 3 {
                if let Some(handle) = h.lock().unwrap().as_ref() {
                    handle.cancel();
                    push(&t, "interval cancelled".to_string());
                }
            }
            Ok(Value::Undefined)
        },
        25,
        true,
    );
    *handle.lock().unwrap() = Some(installed);
}

/// A frame races an async value against a timeout timer and keeps
/// whichever settles first.
fn race(scheduler: &Scheduler, trace: &Trace) {
    let winner = Arc::new(Mutex::new(None::<&'static str>));
    let (reply, settler) = scheduler.create_async_value();

    let t = trace.clone();
    let w = winner.clone();
    reply.when_fulfilled(move |v| {
        let mut winner = w.lock().unwrap();
        if winner.is_none() {
            *winner = Some("reply");
            push(&t, format!("reply won with {:?}", v));
        }
        Ok(Value::Undefined)
    });

    let t = trace.clone();
    let w = winner.clone();
    scheduler.schedule_timer(
        move || {
            let mut winner = w.lock().unwrap();
            if winner.is_none() {
                *winner = Some("timeout");
                push(&t, "timeout won");
            }
            Ok(Value::Undefined)
        },
        100,
        false,
    );

    // The host delivers the reply before the timeout deadline
    scheduler.schedule_timer(
        move || {
            settler.resolve(Value::Str("pong".to_string()));
            Ok(Value::Undefined)
        },
        40,
        false,
    );
}
