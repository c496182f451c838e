//! Error type shared by the wheel engine, geometry builder, and hosts.

/// Errors surfaced by wheel operations.
///
/// Stale frame callbacks are deliberately absent: they are reported as
/// [`crate::spin::FrameStep::Stale`] and dropped by the driver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WheelError {
    #[error("need at least {required} entries to spin, have {count}")]
    InsufficientSegments { count: usize, required: usize },
    #[error("cannot build wheel geometry from an empty segment list")]
    DegenerateGeometry,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid entry list: {0}")]
    InvalidEntries(String),
}
