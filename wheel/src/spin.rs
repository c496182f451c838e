//! Spin engine: rotation state, eased animation, tick detection, and winner
//! resolution.
//!
//! `SpinEngine` is a plain state machine driven from outside. The host asks it
//! to [`SpinEngine::start`] a spin, then feeds it one
//! [`SpinEngine::advance`] call per display frame with a monotonic timestamp.
//! Each spin carries a [`FrameTicket`]; frames presented with a ticket from a
//! cancelled or superseded spin are reported as [`FrameStep::Stale`] and leave
//! state untouched.
//!
//! Rotation accumulates across spins and is never reset, so each spin starts
//! from wherever the previous one came to rest.

#[cfg(test)]
#[path = "spin_test.rs"]
mod spin_test;

use crate::consts::{FULL_TURN_DEG, MIN_SPIN_SEGMENTS, MIN_SPINS};
use crate::error::WheelError;
use crate::frame::FrameTicket;
use crate::geometry::{angle_per_segment, pointer_segment_index};

/// Cubic ease-out: fast start, zero velocity at `progress == 1`.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// State captured when a spin starts. Immutable apart from the `last_*`
/// tracking fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSpin {
    pub ticket: FrameTicket,
    pub started_at_ms: f64,
    pub duration_ms: f64,
    pub start_rotation: f64,
    pub target_rotation: f64,
    /// Segment list as it was when the spin started.
    pub segments: Vec<String>,
    /// Segment most recently under the pointer; `None` until the first frame.
    pub last_crossed: Option<usize>,
    /// Rotation at the previous frame.
    pub last_rotation: f64,
}

impl ActiveSpin {
    /// Record a move to `rotation` and return the segments entered on the way.
    ///
    /// The first call also reports the segment under the pointer at the start
    /// rotation.
    fn track_pointer(&mut self, rotation: f64) -> Vec<usize> {
        let count = self.segments.len();
        let (from_index, mut ticks) = match self.last_crossed {
            Some(index) => (index, Vec::new()),
            None => {
                let index = pointer_segment_index(self.start_rotation, count).unwrap_or(0);
                (index, vec![index])
            }
        };
        ticks.extend(segments_entered(self.last_rotation, rotation, from_index, count));
        self.last_crossed = Some(ticks.last().copied().unwrap_or(from_index));
        self.last_rotation = rotation;
        ticks
    }
}

/// Segments the pointer enters, in order, as the wheel turns forward from
/// `from` to `to` degrees with segment `from_index` under the pointer at
/// `from`.
///
/// Each boundary crossed yields one entry, so a fast frame that sweeps past
/// several segments reports all of them. Indices step downward because
/// clockwise rotation moves the pointer backwards through the wheel. The last
/// entry always matches [`pointer_segment_index`] at `to`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn segments_entered(from: f64, to: f64, from_index: usize, count: usize) -> Vec<usize> {
    let (Ok(span), Some(to_index)) = (angle_per_segment(count), pointer_segment_index(to, count)) else {
        return Vec::new();
    };
    let from_index = from_index.min(count - 1);
    // Index distance fixes the crossings modulo `count`; the swept angle
    // supplies the whole turns.
    let partial = (from_index + count - to_index) % count;
    let turns = (((to - from).max(0.0) / span - partial as f64) / count as f64).round();
    let whole = if turns.is_finite() && turns > 0.0 { turns as usize } else { 0 };
    (1..=partial + whole * count).map(|step| (from_index + count - step % count) % count).collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning(ActiveSpin),
    /// The last spin finished; behaves like `Idle` for the next start.
    Settled { winner_index: usize, winner: String },
}

/// What a spin start committed to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub ticket: FrameTicket,
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartOutcome {
    Started(SpinPlan),
    /// A spin is already running; nothing changed.
    AlreadySpinning,
}

/// Result of presenting one frame to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStep {
    /// Mid-spin. `ticks` lists the segments the pointer entered since the
    /// previous frame, in order; empty when it stayed put.
    Moving { rotation: f64, ticks: Vec<usize> },
    /// Terminal frame: rotation snapped to the target and the winner resolved.
    /// `ticks` covers the final stretch up to the target.
    Settled { rotation: f64, winner_index: usize, winner: String, ticks: Vec<usize> },
    /// The ticket does not belong to a running spin.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct SpinEngine {
    rotation: f64,
    phase: SpinPhase,
    spins_started: u64,
}

impl SpinEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine resting at `rotation` degrees.
    #[must_use]
    pub fn with_rotation(rotation: f64) -> Self {
        Self { rotation, ..Self::default() }
    }

    /// Current accumulated rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning(_))
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveSpin> {
        match &self.phase {
            SpinPhase::Spinning(active) => Some(active),
            _ => None,
        }
    }

    /// Begin a spin over `segments` lasting `duration_ms`.
    ///
    /// The target is the current rotation plus [`MIN_SPINS`] full turns plus
    /// `offset_deg` (reduced into `[0, 360)`). Starting while a spin is running
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::InsufficientSegments`] when fewer than two
    /// segments are given; state is unchanged.
    pub fn start(
        &mut self,
        segments: &[String],
        duration_ms: f64,
        offset_deg: f64,
        now_ms: f64,
    ) -> Result<StartOutcome, WheelError> {
        if self.is_spinning() {
            return Ok(StartOutcome::AlreadySpinning);
        }
        if segments.len() < MIN_SPIN_SEGMENTS {
            return Err(WheelError::InsufficientSegments { count: segments.len(), required: MIN_SPIN_SEGMENTS });
        }

        let offset = if offset_deg.is_finite() { offset_deg.rem_euclid(FULL_TURN_DEG) } else { 0.0 };
        let start_rotation = self.rotation;
        let target_rotation = start_rotation + FULL_TURN_DEG * f64::from(MIN_SPINS) + offset;
        let duration_ms = if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 };

        self.spins_started += 1;
        let ticket = FrameTicket::new(self.spins_started);
        self.phase = SpinPhase::Spinning(ActiveSpin {
            ticket,
            started_at_ms: now_ms,
            duration_ms,
            start_rotation,
            target_rotation,
            segments: segments.to_vec(),
            last_crossed: None,
            last_rotation: start_rotation,
        });

        log::debug!(
            "spin {} started: {} segments, {start_rotation:.2}° -> {target_rotation:.2}° over {duration_ms:.0} ms",
            ticket.spin(),
            segments.len()
        );
        Ok(StartOutcome::Started(SpinPlan { ticket, start_rotation, target_rotation, duration_ms }))
    }

    /// Advance the running spin to `now_ms`.
    pub fn advance(&mut self, ticket: FrameTicket, now_ms: f64) -> FrameStep {
        let SpinPhase::Spinning(active) = &mut self.phase else {
            return FrameStep::Stale;
        };
        if active.ticket != ticket {
            return FrameStep::Stale;
        }

        let elapsed = (now_ms - active.started_at_ms).max(0.0);
        if elapsed < active.duration_ms {
            let eased = ease_out_cubic(elapsed / active.duration_ms);
            let rotation = active.start_rotation + (active.target_rotation - active.start_rotation) * eased;
            self.rotation = rotation;
            let ticks = active.track_pointer(rotation);
            return FrameStep::Moving { rotation, ticks };
        }

        let rotation = active.target_rotation;
        let ticks = active.track_pointer(rotation);
        let winner_index = pointer_segment_index(rotation, active.segments.len()).unwrap_or(0);
        let winner = active.segments.get(winner_index).cloned().unwrap_or_default();
        log::info!("spin {} settled at {rotation:.2}°: winner #{winner_index} {winner:?}", ticket.spin());

        self.rotation = rotation;
        self.phase = SpinPhase::Settled { winner_index, winner: winner.clone() };
        FrameStep::Settled { rotation, winner_index, winner, ticks }
    }

    /// Abort a running spin without resolving a winner.
    ///
    /// Rotation stays wherever the last frame left it. Returns whether a spin
    /// was actually running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_spinning() {
            return false;
        }
        if let Some(active) = self.active() {
            log::debug!("spin {} cancelled at {:.2}°", active.ticket.spin(), self.rotation);
        }
        self.phase = SpinPhase::Idle;
        true
    }
}
