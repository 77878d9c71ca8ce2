use thiserror::Error;

/// Errors raised while setting up a maze.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("Failed to parse maze config RON: {0}")]
    ConfigParse(String),

    #[error("Invalid maze config: {0}")]
    InvalidConfig(String),
}
