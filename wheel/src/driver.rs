//! Wheel driver: the spin engine wired to its collaborators.
//!
//! `WheelDriver` owns the [`SpinEngine`], the live [`Roster`] and its cached
//! [`WheelLayout`], the [`SpinSettings`], and three capabilities supplied by
//! the host: a [`FrameScheduler`], a [`SoundBoard`], and an [`OffsetSource`].
//! It holds no browser types, so the browser host, the CLI, and the tests all
//! drive the same code.
//!
//! Operations return [`WheelEvent`]s rather than invoking callbacks. The host
//! dispatches them after it has released any borrow on the driver, so a
//! callback may safely call back in (for example, to start the next spin).

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use serde::Serialize;

use crate::consts::{SPIN_ANNOUNCEMENT, WINNER_ANNOUNCEMENT_PREFIX};
use crate::error::WheelError;
use crate::frame::{FrameScheduler, FrameTicket};
use crate::geometry::WheelLayout;
use crate::random::OffsetSource;
use crate::roster::Roster;
use crate::settings::SpinSettings;
use crate::sound::SoundBoard;
use crate::spin::{FrameStep, SpinEngine, SpinPhase, StartOutcome};

/// Events produced for the host to act on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WheelEvent {
    #[serde(rename_all = "camelCase")]
    SpinStarted { spin: u64, start_rotation: f64, target_rotation: f64 },
    /// New rotation to render, in degrees.
    Rotated { rotation: f64 },
    /// The pointer entered `segment`.
    Tick { segment: usize },
    SpinCompleted { winner: String, index: usize, rotation: f64 },
    SpinCancelled { rotation: f64 },
}

pub struct WheelDriver<S, A, R> {
    engine: SpinEngine,
    roster: Roster,
    layout: WheelLayout,
    settings: SpinSettings,
    scheduler: S,
    sound: A,
    offsets: R,
    last_winner: Option<String>,
}

impl<S, A, R> WheelDriver<S, A, R>
where
    S: FrameScheduler,
    A: SoundBoard,
    R: OffsetSource,
{
    /// Create a driver resting at rotation 0.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from building the initial layout.
    pub fn new(roster: Roster, settings: SpinSettings, scheduler: S, sound: A, offsets: R) -> Result<Self, WheelError> {
        let layout = WheelLayout::build(&roster.display_segments())?;
        Ok(Self {
            engine: SpinEngine::new(),
            roster,
            layout,
            settings: settings.clamped(),
            scheduler,
            sound,
            offsets,
            last_winner: None,
        })
    }

    // --- Spin lifecycle ---

    /// Start a spin at `now_ms` and schedule its first frame.
    ///
    /// Returns no events when a spin is already running.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::InsufficientSegments`] when the roster holds fewer
    /// than two entries.
    pub fn start_spin(&mut self, now_ms: f64) -> Result<Vec<WheelEvent>, WheelError> {
        if self.engine.is_spinning() {
            return Ok(Vec::new());
        }
        let offset = self.offsets.next_offset();
        let outcome = self.engine.start(self.roster.entries(), self.settings.duration_ms(), offset, now_ms)?;
        let StartOutcome::Started(plan) = outcome else {
            return Ok(Vec::new());
        };

        self.last_winner = None;
        if self.settings.sound_enabled {
            self.sound.announce(SPIN_ANNOUNCEMENT);
        }
        self.scheduler.schedule_next_frame(plan.ticket);

        Ok(vec![WheelEvent::SpinStarted {
            spin: plan.ticket.spin(),
            start_rotation: plan.start_rotation,
            target_rotation: plan.target_rotation,
        }])
    }

    /// Handle a scheduled frame. Frames for stale tickets are dropped.
    pub fn on_frame(&mut self, ticket: FrameTicket, now_ms: f64) -> Vec<WheelEvent> {
        match self.engine.advance(ticket, now_ms) {
            FrameStep::Stale => {
                log::trace!("dropping stale frame for spin {}", ticket.spin());
                Vec::new()
            }
            FrameStep::Moving { rotation, ticks } => {
                let mut events = vec![WheelEvent::Rotated { rotation }];
                self.push_ticks(&ticks, &mut events);
                self.scheduler.schedule_next_frame(ticket);
                events
            }
            FrameStep::Settled { rotation, winner_index, winner, ticks } => {
                let mut events = vec![WheelEvent::Rotated { rotation }];
                self.push_ticks(&ticks, &mut events);
                self.sound.play_win();
                if self.settings.sound_enabled {
                    self.sound.announce(&format!("{WINNER_ANNOUNCEMENT_PREFIX}{winner}"));
                }
                self.last_winner = Some(winner.clone());
                events.push(WheelEvent::SpinCompleted { winner, index: winner_index, rotation });
                events
            }
        }
    }

    fn push_ticks(&mut self, ticks: &[usize], events: &mut Vec<WheelEvent>) {
        for &segment in ticks {
            if self.settings.sound_enabled {
                self.sound.play_tick();
            }
            events.push(WheelEvent::Tick { segment });
        }
    }

    /// Abort the running spin, if any. No winner is produced.
    pub fn cancel(&mut self) -> Vec<WheelEvent> {
        if !self.engine.cancel() {
            return Vec::new();
        }
        self.scheduler.cancel_pending();
        vec![WheelEvent::SpinCancelled { rotation: self.engine.rotation() }]
    }

    /// Dismiss the last winner, removing it from the roster when the
    /// remove-winner setting is on. Returns the dismissed winner.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from rebuilding the layout.
    pub fn acknowledge_winner(&mut self) -> Result<Option<String>, WheelError> {
        let Some(winner) = self.last_winner.take() else {
            return Ok(None);
        };
        if self.settings.remove_winner && !self.engine.is_spinning() {
            let removed = self.roster.remove_winner(&winner);
            log::debug!("removed {removed} entries matching winner {winner:?}");
            self.relayout()?;
        }
        Ok(Some(winner))
    }

    // --- Roster / settings ---

    /// Replace the live roster. A running spin keeps resolving against the
    /// list it started with.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from rebuilding the layout.
    pub fn set_roster(&mut self, roster: Roster) -> Result<(), WheelError> {
        self.roster = roster;
        self.relayout()
    }

    /// Remove duplicate entries. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from rebuilding the layout.
    pub fn dedupe(&mut self) -> Result<usize, WheelError> {
        let removed = self.roster.dedupe();
        if removed > 0 {
            self.relayout()?;
        }
        Ok(removed)
    }

    /// Replace settings. A running spin keeps the duration it started with.
    pub fn set_settings(&mut self, settings: SpinSettings) {
        self.settings = settings.clamped();
    }

    fn relayout(&mut self) -> Result<(), WheelError> {
        self.layout = WheelLayout::build(&self.roster.display_segments())?;
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.engine.rotation()
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    #[must_use]
    pub fn phase(&self) -> &SpinPhase {
        self.engine.phase()
    }

    #[must_use]
    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn settings(&self) -> SpinSettings {
        self.settings
    }

    #[must_use]
    pub fn last_winner(&self) -> Option<&str> {
        self.last_winner.as_deref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub fn sound(&self) -> &A {
        &self.sound
    }
}
