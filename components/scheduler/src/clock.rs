//! Virtual clock for deterministic timer ordering.
//!
//! The clock is a monotonic millisecond counter. It never reads wall time;
//! the scheduler loop advances it to the next timer deadline when no entry
//! is due, simulating the wait an embedding host would perform.

/// A monotonically non-decreasing millisecond counter.
///
/// # Examples
///
/// ```
/// use scheduler::VirtualClock;
///
/// let mut clock = VirtualClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance_to(100);
/// assert_eq!(clock.now_ms(), 100);
///
/// // The clock never moves backwards
/// clock.advance_to(50);
/// assert_eq!(clock.now_ms(), 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    /// Creates a new clock at time zero.
    pub fn new() -> Self {
        Self { now_ms: 0 }
    }

    /// Returns the current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advances the clock to `deadline_ms`.
    ///
    /// Deadlines in the past are ignored; the clock only moves forward.
    pub fn advance_to(&mut self, deadline_ms: u64) {
        if deadline_ms > self.now_ms {
            self.now_ms = deadline_ms;
        }
    }
}
