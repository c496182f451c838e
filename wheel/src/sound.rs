//! Sound capability consumed by the driver.
//!
//! Calls are fire-and-forget: implementations must not block the frame loop
//! and swallow their own failures.

pub trait SoundBoard {
    /// Short click as the pointer enters a new segment.
    fn play_tick(&mut self);

    /// Celebration chime when a winner is revealed.
    fn play_win(&mut self);

    /// Speak `text` aloud, replacing anything still being spoken.
    fn announce(&mut self, text: &str);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl SoundBoard for Muted {
    fn play_tick(&mut self) {}

    fn play_win(&mut self) {}

    fn announce(&mut self, _text: &str) {}
}
