use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid account '{id}': {reason}")]
    InvalidAccount { id: String, reason: String },

    #[error("Duplicate account id '{id}'")]
    DuplicateAccount { id: String },

    #[error("Unknown dimension '{key}'")]
    UnknownDimension { key: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
