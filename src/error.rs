use wheel::error::WheelError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Wheel(#[from] WheelError),
    #[error("failed to read entries: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("--fps must be at least 1")]
    InvalidFps,
    #[error("spin {0} stopped without picking a winner")]
    Unsettled(u64),
}
