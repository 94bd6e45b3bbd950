//! Call stack and frame bookkeeping.
//!
//! Frames form a strict stack: last pushed, first popped. Pushing beyond
//! the configured maximum depth fails with a stack overflow fault, which
//! is fatal to the offending root frame only.

use crate::queue::TimerId;
use core_types::{Fault, FrameOrigin, FrameTrace};

/// Default maximum call stack depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A synchronous unit of execution on the call stack.
///
/// The caller is implicit in stack order: a frame's caller is the frame
/// below it, or none for a root frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    name: Option<String>,
    origin: FrameOrigin,
}

impl Frame {
    /// Creates a root frame pushed directly by the host.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            origin: FrameOrigin::Root,
        }
    }

    /// Creates a frame for a drained continuation.
    pub fn continuation(name: Option<String>) -> Self {
        Self {
            name,
            origin: FrameOrigin::Continuation,
        }
    }

    /// Creates a frame for a fired timer entry.
    pub fn timer(id: TimerId) -> Self {
        Self {
            name: Some(format!("timer-{}", id)),
            origin: FrameOrigin::Timer,
        }
    }

    /// Creates a frame for a nested synchronous call.
    pub fn call(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            origin: FrameOrigin::Call,
        }
    }

    /// Returns the frame's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns how the frame was pushed.
    pub fn origin(&self) -> FrameOrigin {
        self.origin
    }

    /// Builds a trace record for this frame at the given stack position.
    pub fn trace_at(&self, depth: usize) -> FrameTrace {
        FrameTrace {
            name: self.name.clone(),
            origin: self.origin,
            depth,
        }
    }
}

/// The call stack.
///
/// # Examples
///
/// ```
/// use scheduler::{CallStack, Frame};
///
/// let mut stack = CallStack::new();
/// stack.push(Frame::root("main")).unwrap();
/// assert_eq!(stack.depth(), 1);
///
/// stack.pop();
/// assert!(stack.is_empty());
/// ```
#[derive(Debug)]
pub struct CallStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl CallStack {
    /// Creates an empty stack with the default depth limit.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates an empty stack with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            frames: Vec::with_capacity(max_depth.min(64)),
            max_depth,
        }
    }

    /// Pushes a frame.
    ///
    /// Fails with a stack overflow fault carrying the current trace when
    /// the stack is already at its maximum depth.
    pub fn push(&mut self, frame: Frame) -> Result<(), Fault> {
        if self.frames.len() >= self.max_depth {
            return Err(Fault::stack_overflow(self.max_depth).with_frames(self.trace()));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pops and returns the top frame.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Returns the currently executing (top) frame.
    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Returns true if no frames are on the stack.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the configured maximum depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns a trace of the whole stack, root first.
    pub fn trace(&self) -> Vec<FrameTrace> {
        self.frames
            .iter()
            .enumerate()
            .map(|(depth, frame)| frame.trace_at(depth))
            .collect()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
