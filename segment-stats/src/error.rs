use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    pub fn render<S: Into<String>>(msg: S) -> Self {
        StatsError::Render(msg.into())
    }
}
