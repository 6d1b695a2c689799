//! Error types for the punchbox engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("pose estimation error: {0}")]
    PoseEstimation(String),

    #[error("frame source error: {0}")]
    FrameSource(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
