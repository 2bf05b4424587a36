//! Convenient re-exports for downstream crates.

pub use crate::config::{SamplerConfig, StorageConfig};
pub use crate::datasource::{
    CsvFilesFormatConfig, Delimiter, FormatConfig, FormatKind, LocationConfig, LocationKind,
    SourceDocument,
};
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::schema::{DataType, Field, Schema};
