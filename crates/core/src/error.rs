use thiserror::Error;

pub type BranchResult<T> = Result<T, BranchError>;

#[derive(Error, Debug)]
pub enum BranchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
