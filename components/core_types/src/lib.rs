//! Core value, fault, and trace types for the scheduler.
//!
//! This crate provides the foundational types shared by every component of
//! the Cadence cooperative scheduler, including the value representation
//! returned by scheduled callbacks, the fault taxonomy, and frame trace
//! information for diagnostics.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of callback results
//! - [`Fault`] - Faults raised inside frames, with trace information
//! - [`FaultKind`] - Classes of fault
//! - [`FrameTrace`] - Snapshot of one call stack frame
//! - [`FrameOrigin`] - How a frame came to be on the stack
//!
//! # Examples
//!
//! ```
//! use core_types::{Value, Fault, FaultKind};
//!
//! // Create callback result values
//! let num = Value::Int(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_name(), "int");
//!
//! // Create a fault
//! let fault = Fault::synchronous("division by zero");
//! assert_eq!(fault.kind, FaultKind::Synchronous);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod fault;
mod trace;
mod value;

pub use fault::{Fault, FaultKind};
pub use trace::{FrameOrigin, FrameTrace};
pub use value::Value;
