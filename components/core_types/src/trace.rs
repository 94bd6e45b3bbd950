//! Frame trace types for fault reporting.
//!
//! This module provides types for describing call stack frames in fault
//! reports, so a fault that escapes to top level can name the frame chain
//! that produced it.

use std::fmt;

/// How a frame came to be on the call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrigin {
    /// Pushed directly by the host before the loop started
    Root,
    /// Pushed by the drain phase for a deferred continuation
    Continuation,
    /// Pushed by the timer phase for a timer callback
    Timer,
    /// Pushed by a nested synchronous call inside another frame
    Call,
}

impl fmt::Display for FrameOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameOrigin::Root => "root",
            FrameOrigin::Continuation => "continuation",
            FrameOrigin::Timer => "timer",
            FrameOrigin::Call => "call",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of a single frame, recorded into fault reports.
///
/// # Examples
///
/// ```
/// use core_types::{FrameTrace, FrameOrigin};
///
/// let trace = FrameTrace {
///     name: Some("fetch-reply".to_string()),
///     origin: FrameOrigin::Continuation,
///     depth: 0,
/// };
///
/// assert_eq!(trace.origin, FrameOrigin::Continuation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTrace {
    /// Name of the frame, or None for anonymous frames
    pub name: Option<String>,
    /// How the frame was pushed
    pub origin: FrameOrigin,
    /// Position of the frame on the stack (root is 0)
    pub depth: usize,
}

impl fmt::Display for FrameTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({}, depth {})", name, self.origin, self.depth),
            None => write!(f, "<anonymous> ({}, depth {})", self.origin, self.depth),
        }
    }
}
