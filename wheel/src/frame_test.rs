#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn manual_frames_keeps_latest_request() {
    let mut frames = ManualFrames::new();
    frames.schedule_next_frame(FrameTicket::new(1));
    frames.schedule_next_frame(FrameTicket::new(2));
    assert_eq!(frames.pending(), Some(FrameTicket::new(2)));
    assert_eq!(frames.requested(), 2);
}

#[test]
fn manual_frames_take_empties_queue() {
    let mut frames = ManualFrames::new();
    frames.schedule_next_frame(FrameTicket::new(7));
    assert_eq!(frames.take(), Some(FrameTicket::new(7)));
    assert_eq!(frames.take(), None);
}

#[test]
fn manual_frames_cancel_drops_pending() {
    let mut frames = ManualFrames::new();
    frames.schedule_next_frame(FrameTicket::new(1));
    frames.cancel_pending();
    assert!(frames.pending().is_none());
    assert_eq!(frames.requested(), 1);
}

#[test]
fn virtual_clock_only_moves_forward() {
    let mut clock = VirtualClock::starting_at(100.0);
    assert_eq!(clock.advance(16.0), 116.0);
    assert_eq!(clock.advance(-50.0), 116.0);
    assert_eq!(clock.now_ms(), 116.0);
}

#[test]
fn ticket_exposes_spin_number() {
    assert_eq!(FrameTicket::new(3).spin(), 3);
    assert_ne!(FrameTicket::new(3), FrameTicket::new(4));
}
