use thiserror::Error;

/// Result type local to tabsample-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid storage configuration: {0}")]
    Config(String),

    #[error("object store for {kind} not implemented{detail}")]
    NotImplemented { kind: String, detail: String },
}
