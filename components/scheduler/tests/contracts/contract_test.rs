//! Contract tests for the scheduler component
//!
//! These tests pin the public API surface: the operations exposed to
//! external collaborators and the shapes of their arguments and results.

use core_types::{Fault, Value};
use scheduler::{
    AsyncValue, AsyncValueState, Continuation, LoopPhase, RunReport, Scheduler, Settler,
    TimerHandle,
};

mod scheduler_contract {
    use super::*;

    #[test]
    fn scheduler_new_returns_self() {
        let scheduler = Scheduler::new();
        let _ = scheduler;
    }

    #[test]
    fn schedule_continuation_accepts_closure_and_returns_unit() {
        let scheduler = Scheduler::new();
        scheduler.schedule_continuation(|| Ok(Value::Undefined));
        // schedule_continuation never fails and returns ()
    }

    #[test]
    fn enqueue_continuation_accepts_built_continuation() {
        let scheduler = Scheduler::new();
        let continuation = Continuation::named("prebuilt", || Ok(Value::Undefined));
        scheduler.enqueue_continuation(continuation);
        assert!(!scheduler.is_continuation_queue_empty());
    }

    #[test]
    fn schedule_timer_returns_cancellable_handle() {
        let scheduler = Scheduler::new();
        let handle: TimerHandle = scheduler.schedule_timer(|| Ok(Value::Undefined), 5, false);
        handle.cancel();
        assert!(scheduler.is_timer_queue_empty());
    }

    #[test]
    fn run_returns_report_of_unhandled_faults() {
        let scheduler = Scheduler::new();
        scheduler.schedule_continuation(|| Err(Fault::synchronous("x")));
        let report: RunReport = scheduler.run();
        assert!(!report.is_clean());
        assert_eq!(report.unhandled.len(), 1);
    }

    #[test]
    fn scheduler_is_cloneable_and_clones_share_state() {
        let scheduler = Scheduler::new();
        let clone = scheduler.clone();
        clone.schedule_continuation(|| Ok(Value::Undefined));
        assert!(!scheduler.is_continuation_queue_empty());
    }

    #[test]
    fn phase_reaches_halted_terminal_state() {
        let scheduler = Scheduler::new();
        scheduler.run();
        assert_eq!(scheduler.phase(), LoopPhase::Halted);
    }
}

mod async_value_contract {
    use super::*;

    #[test]
    fn create_async_value_returns_pair() {
        let scheduler = Scheduler::new();
        let (value, settler): (AsyncValue, Settler) = scheduler.create_async_value();
        assert_eq!(value.state(), AsyncValueState::Pending);
        let _ = settler;
    }

    #[test]
    fn settler_resolve_takes_value() {
        let scheduler = Scheduler::new();
        let (value, settler) = scheduler.create_async_value();
        settler.resolve(Value::Int(42));
        assert_eq!(value.state(), AsyncValueState::Fulfilled);
    }

    #[test]
    fn settler_reject_takes_fault() {
        let scheduler = Scheduler::new();
        let (value, settler) = scheduler.create_async_value();
        settler.reject(Fault::rejection("nope"));
        assert_eq!(value.state(), AsyncValueState::Rejected);
    }

    #[test]
    fn on_settle_returns_new_async_value() {
        let scheduler = Scheduler::new();
        let (value, _settler) = scheduler.create_async_value();
        let derived: AsyncValue = value.on_settle(None, None);
        assert_eq!(derived.state(), AsyncValueState::Pending);
    }

    #[test]
    fn async_value_is_cloneable_and_shares_settlement() {
        let scheduler = Scheduler::new();
        let (value, settler) = scheduler.create_async_value();
        let shared = value.clone();
        settler.resolve(Value::Int(1));
        assert_eq!(shared.state(), AsyncValueState::Fulfilled);
    }
}

mod host_boundary_contract {
    use super::*;

    // External collaborators interact only through schedule_timer's
    // callback and the Settler; this models a host I/O layer resolving
    // an async value when a completion is detected.
    #[test]
    fn host_completion_flows_through_settler_only() {
        let scheduler = Scheduler::new();
        let (reply, settler) = scheduler.create_async_value();

        let received = reply.when_fulfilled(|v| Ok(v));

        // Host signals the completion via a timer callback
        scheduler.schedule_timer(
            move || {
                settler.resolve(Value::Str("response".to_string()));
                Ok(Value::Undefined)
            },
            3,
            false,
        );

        assert!(scheduler.run().is_clean());
        assert_eq!(
            received.settled_value(),
            Some(Value::Str("response".to_string()))
        );
    }
}
