//! Headless spin loops for the command line.
//!
//! Both loops pull tickets from [`ManualFrames`] and feed them back to the
//! driver until nothing is pending. The virtual loop steps a
//! [`VirtualClock`] and finishes instantly; the realtime loop paces frames
//! with a tokio interval.

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;

use std::time::Duration;

use rand::rngs::SmallRng;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use wheel::driver::{WheelDriver, WheelEvent};
use wheel::frame::{ManualFrames, VirtualClock};
use wheel::random::{FixedOffset, OffsetSource};
use wheel::sound::SoundBoard;

use crate::error::CliError;

/// Offsets chosen on the command line.
pub enum Offsets {
    Fixed(FixedOffset),
    Seeded(SmallRng),
}

impl OffsetSource for Offsets {
    fn next_offset(&mut self) -> f64 {
        match self {
            Self::Fixed(fixed) => fixed.next_offset(),
            Self::Seeded(rng) => rng.next_offset(),
        }
    }
}

/// Routes sounds to the log, since a terminal has no speaker worth using.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSound;

impl SoundBoard for TerminalSound {
    fn play_tick(&mut self) {
        tracing::trace!("tick");
    }

    fn play_win(&mut self) {
        tracing::debug!("win chime");
    }

    fn announce(&mut self, text: &str) {
        tracing::info!(%text, "announce");
    }
}

/// Outcome of one spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinReport {
    pub spin: u64,
    pub winner: String,
    pub index: usize,
    pub ticks: usize,
    pub frames: usize,
    pub rotation: f64,
    pub elapsed_ms: f64,
}

#[derive(Default)]
struct Tally {
    spin: u64,
    started_at_ms: f64,
    ticks: usize,
    frames: usize,
    rotation: f64,
    winner: Option<(String, usize)>,
}

impl Tally {
    fn absorb(&mut self, events: Vec<WheelEvent>) {
        for event in events {
            match event {
                WheelEvent::SpinStarted { spin, start_rotation, .. } => {
                    self.spin = spin;
                    self.rotation = start_rotation;
                }
                WheelEvent::Rotated { rotation } => {
                    self.frames += 1;
                    self.rotation = rotation;
                }
                WheelEvent::Tick { .. } => self.ticks += 1,
                WheelEvent::SpinCompleted { winner, index, rotation } => {
                    self.rotation = rotation;
                    self.winner = Some((winner, index));
                }
                WheelEvent::SpinCancelled { rotation } => self.rotation = rotation,
            }
        }
    }

    fn finish(self, now_ms: f64) -> Result<SpinReport, CliError> {
        let Some((winner, index)) = self.winner else {
            return Err(CliError::Unsettled(self.spin));
        };
        Ok(SpinReport {
            spin: self.spin,
            winner,
            index,
            ticks: self.ticks,
            frames: self.frames,
            rotation: self.rotation,
            elapsed_ms: now_ms - self.started_at_ms,
        })
    }
}

/// Milliseconds between frames at `fps`.
pub fn frame_interval_ms(fps: u32) -> Result<f64, CliError> {
    if fps == 0 {
        return Err(CliError::InvalidFps);
    }
    Ok(1000.0 / f64::from(fps))
}

/// Run one spin to completion on a virtual clock.
pub fn run_virtual<A, R>(
    driver: &mut WheelDriver<ManualFrames, A, R>,
    clock: &mut VirtualClock,
    frame_ms: f64,
) -> Result<SpinReport, CliError>
where
    A: SoundBoard,
    R: OffsetSource,
{
    let mut tally = Tally { started_at_ms: clock.now_ms(), ..Tally::default() };
    tally.absorb(driver.start_spin(clock.now_ms())?);
    while let Some(ticket) = driver.scheduler_mut().take() {
        let now = clock.advance(frame_ms);
        tally.absorb(driver.on_frame(ticket, now));
    }
    tally.finish(clock.now_ms())
}

/// Run one spin to completion in real time.
pub async fn run_realtime<A, R>(driver: &mut WheelDriver<ManualFrames, A, R>, frame_ms: f64) -> Result<SpinReport, CliError>
where
    A: SoundBoard,
    R: OffsetSource,
{
    let origin = Instant::now();
    let elapsed_ms = || origin.elapsed().as_secs_f64() * 1000.0;

    let mut interval = tokio::time::interval(Duration::from_secs_f64(frame_ms / 1000.0));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;

    let mut tally = Tally::default();
    tally.absorb(driver.start_spin(elapsed_ms())?);
    while let Some(ticket) = driver.scheduler_mut().take() {
        interval.tick().await;
        tally.absorb(driver.on_frame(ticket, elapsed_ms()));
    }
    tally.finish(elapsed_ms())
}
