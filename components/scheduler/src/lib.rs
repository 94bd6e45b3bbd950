//! Deterministic cooperative task scheduler.
//!
//! This crate provides a single-threaded cooperative scheduler with two
//! prioritized deferred-work queues and a call stack for synchronous
//! frames:
//! - [`Scheduler`] - The loop driving the call stack and both queues
//! - [`AsyncValue`] / [`Settler`] - One-way-settling deferred result
//! - [`ContinuationQueue`] / [`TimerQueue`] - The fast and slow queues
//! - [`CallStack`] - Frame bookkeeping with overflow detection
//! - [`VirtualClock`] - Deterministic time source for timer ordering
//!
//! # Ordering contract
//!
//! Each loop cycle drains the deferred continuation queue completely
//! (including entries enqueued during the drain), then executes exactly
//! one due timer entry, then drains again. Deferred continuations
//! therefore have strict priority over timer callbacks, continuations of
//! one async value fire in registration order, and timer entries with
//! equal deadlines fire in insertion order.
//!
//! # Examples
//!
//! ```
//! use scheduler::Scheduler;
//! use core_types::Value;
//!
//! let scheduler = Scheduler::new();
//!
//! let handle = scheduler.schedule_timer(|| Ok(Value::Undefined), 10, false);
//! scheduler.schedule_continuation(|| Ok(Value::Undefined));
//!
//! let report = scheduler.run();
//! assert!(report.is_clean());
//! assert_eq!(scheduler.now_ms(), 10);
//! # let _ = handle;
//! ```
//!
//! ## Async values
//!
//! ```
//! use scheduler::Scheduler;
//! use core_types::Value;
//!
//! let scheduler = Scheduler::new();
//! let (value, settler) = scheduler.create_async_value();
//!
//! let doubled = value.when_fulfilled(|v| match v {
//!     Value::Int(n) => Ok(Value::Int(n * 2)),
//!     other => Ok(other),
//! });
//!
//! settler.resolve(Value::Int(21));
//! scheduler.run();
//! assert_eq!(doubled.settled_value(), Some(Value::Int(42)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod async_value;
pub mod call_stack;
pub mod clock;
pub mod event_loop;
pub mod queue;

// Re-export main types at crate root
pub use async_value::{AsyncValue, AsyncValueState, FulfillHandler, RejectHandler, Settler};
pub use call_stack::{CallStack, Frame, DEFAULT_MAX_DEPTH};
pub use clock::VirtualClock;
pub use event_loop::{LoopPhase, RunReport, Scheduler, TimerHandle, UnhandledFault};
pub use queue::{Continuation, ContinuationQueue, TimerCallback, TimerEntry, TimerId, TimerQueue};
