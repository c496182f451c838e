//! Frame scheduling capability.
//!
//! The engine never re-schedules itself. After each frame the driver asks a
//! [`FrameScheduler`] for exactly one more callback, tagged with the spin's
//! [`FrameTicket`]. The browser host backs this with `requestAnimationFrame`;
//! the CLI and the tests use [`ManualFrames`] and pump frames themselves.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use serde::Serialize;

/// Identifies which spin a scheduled frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameTicket {
    spin: u64,
}

impl FrameTicket {
    #[must_use]
    pub fn new(spin: u64) -> Self {
        Self { spin }
    }

    /// Sequence number of the spin, starting at 1.
    #[must_use]
    pub fn spin(self) -> u64 {
        self.spin
    }
}

pub trait FrameScheduler {
    /// Request one callback on the next display frame carrying `ticket`.
    fn schedule_next_frame(&mut self, ticket: FrameTicket);

    /// Drop any pending request. A callback that still fires must be ignored
    /// by the receiver.
    fn cancel_pending(&mut self);
}

/// Scheduler that only records the request; the owner pumps frames.
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    pending: Option<FrameTicket>,
    requested: usize,
}

impl ManualFrames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending ticket, if any.
    pub fn take(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Total frames requested over the scheduler's lifetime.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl FrameScheduler for ManualFrames {
    fn schedule_next_frame(&mut self, ticket: FrameTicket) {
        self.pending = Some(ticket);
        self.requested += 1;
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
    }
}

/// Millisecond clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualClock {
    now_ms: f64,
}

impl VirtualClock {
    #[must_use]
    pub fn starting_at(now_ms: f64) -> Self {
        Self { now_ms }
    }

    #[must_use]
    pub fn now_ms(self) -> f64 {
        self.now_ms
    }

    /// Move forward by `step_ms` and return the new time.
    pub fn advance(&mut self, step_ms: f64) -> f64 {
        self.now_ms += step_ms.max(0.0);
        self.now_ms
    }
}
