use thiserror::Error;

/// Result type local to tabsample-sampler.
pub type Result<T> = std::result::Result<T, SampleError>;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to list objects under '{dir}': {source}")]
    List {
        dir: String,
        #[source]
        source: tabsample_io::error::Error,
    },

    #[error("failed to download '{path}': {source}")]
    Download {
        path: String,
        #[source]
        source: tabsample_io::error::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: tabsample_io::error::Error,
    },

    #[error("no header record in '{path}'")]
    MissingHeader { path: String },

    #[error("record at line {line} of '{path}' has {found} fields, schema expects {expected}")]
    ShortRecord {
        path: String,
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("row consumer hung up before sampling finished")]
    OutputClosed,

    #[error("sampler producer thread failed to start or panicked")]
    Producer,

    #[error("sampler for {0} not implemented")]
    NotImplemented(String),

    #[error("storage setup failed: {0}")]
    Storage(#[from] tabsample_io::error::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<tabsample_core::error::Error> for SampleError {
    fn from(e: tabsample_core::error::Error) -> Self {
        SampleError::Config(e.to_string())
    }
}
