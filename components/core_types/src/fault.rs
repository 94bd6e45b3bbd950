//! Fault types and fault handling.
//!
//! Faults are the error currency of the scheduler. A fault raised inside a
//! frame propagates to the enclosing frame as an `Err`; one that escapes a
//! root frame is reported by the scheduler loop as an unhandled top-level
//! fault without halting the loop.

use crate::FrameTrace;
use std::fmt;
use thiserror::Error;

/// The class of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Raised synchronously inside a frame
    Synchronous,
    /// Pushing a frame past the configured maximum stack depth
    StackOverflow,
    /// The rejection outcome of an async value
    Rejection,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaultKind::Synchronous => "synchronous fault",
            FaultKind::StackOverflow => "stack overflow",
            FaultKind::Rejection => "rejection",
        };
        write!(f, "{}", s)
    }
}

/// A fault with message and frame trace.
///
/// Faults are `Clone` because a single rejection outcome may fan out to
/// several registered reactions.
///
/// # Examples
///
/// ```
/// use core_types::{Fault, FaultKind};
///
/// let fault = Fault::synchronous("lookup failed");
/// assert_eq!(fault.kind, FaultKind::Synchronous);
/// assert_eq!(fault.message, "lookup failed");
/// assert!(fault.frames.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct Fault {
    /// The class of the fault
    pub kind: FaultKind,
    /// Human-readable fault message
    pub message: String,
    /// Frame trace captured when the fault was raised
    pub frames: Vec<FrameTrace>,
}

impl Fault {
    /// Creates a synchronous fault with the given message.
    pub fn synchronous(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Synchronous,
            message: message.into(),
            frames: Vec::new(),
        }
    }

    /// Creates a stack overflow fault for the given depth limit.
    pub fn stack_overflow(max_depth: usize) -> Self {
        Self {
            kind: FaultKind::StackOverflow,
            message: format!("call stack exceeded maximum depth of {}", max_depth),
            frames: Vec::new(),
        }
    }

    /// Creates a rejection fault with the given message.
    pub fn rejection(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Rejection,
            message: message.into(),
            frames: Vec::new(),
        }
    }

    /// Attaches a frame trace to the fault.
    pub fn with_frames(mut self, frames: Vec<FrameTrace>) -> Self {
        self.frames = frames;
        self
    }
}
