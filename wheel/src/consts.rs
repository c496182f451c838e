//! Shared numeric and display constants for the wheel crate.

// ── Rotation ────────────────────────────────────────────────────

/// Degrees in one full turn.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Full rotations added to every spin before the random offset.
pub const MIN_SPINS: u32 = 5;

/// Fewest entries a spin may start with.
pub const MIN_SPIN_SEGMENTS: usize = 2;

// ── Timing ──────────────────────────────────────────────────────

pub const MIN_SPIN_DURATION_SECS: f64 = 1.0;
pub const MAX_SPIN_DURATION_SECS: f64 = 30.0;
pub const DEFAULT_SPIN_DURATION_SECS: f64 = 10.0;

// ── Geometry ────────────────────────────────────────────────────

/// The wheel is drawn in a 100 × 100 view box.
pub const WHEEL_CENTER: f64 = 50.0;
pub const WHEEL_RADIUS: f64 = 50.0;

/// Replaces the dropped tail of a truncated label.
pub const LABEL_ELLIPSIS: &str = "..";

/// Neon palette cycled across segments.
pub const WHEEL_COLORS: [&str; 8] = [
    "#f43f5e", // rose
    "#3b82f6", // blue
    "#8b5cf6", // violet
    "#10b981", // emerald
    "#f59e0b", // amber
    "#ec4899", // pink
    "#06b6d4", // cyan
    "#84cc16", // lime
];

// ── Roster ──────────────────────────────────────────────────────

/// Hard cap on roster size.
pub const MAX_ENTRIES: usize = 100;

/// Shown in place of an empty roster so the wheel still has two slices.
pub const PLACEHOLDER_SEGMENTS: [&str; 2] = ["Add Names", "To Spin"];

pub const DEFAULT_PARTICIPANTS: [&str; 8] = ["Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Heidi"];

// ── Announcements ───────────────────────────────────────────────

pub const SPIN_ANNOUNCEMENT: &str = "Spinning!";
pub const WINNER_ANNOUNCEMENT_PREFIX: &str = "The winner is ";
