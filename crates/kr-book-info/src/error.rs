use book_common::error::CommonError;

use crate::parser::ExtractError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    #[error("render error: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Note(String),
}
