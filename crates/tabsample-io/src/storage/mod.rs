//! Object storage adapters implementing [`Storage`].
//!
//! - `fs`: Local filesystem (default).
//! - `cloud`: Cloud object stores (S3/GCS/Azure) built on top of `object_store`.
//!
//! `build_storage` chooses the adapter for a datasource `LocationConfig`.

mod fs;
pub use fs::FsStorage;

#[cfg(any(feature = "s3", feature = "gcs", feature = "azure"))]
mod cloud;
#[cfg(feature = "azure")]
pub use cloud::AzureBlobStorage;
#[cfg(feature = "gcs")]
pub use cloud::GcsStorage;
#[cfg(feature = "s3")]
pub use cloud::S3Storage;
#[cfg(any(feature = "s3", feature = "gcs", feature = "azure"))]
pub use cloud::CloudStorageBuilderError;

use std::io::Read;
use std::ops::Range;
use std::sync::Arc;

use tabsample_core::config::StorageConfig;
use tabsample_core::datasource::LocationConfig;

use crate::error::Result;

/// Readable body of a downloaded object (or of a byte range of it).
pub type ByteStream = Box<dyn Read + Send>;

/// Read-only object storage interface.
///
/// Paths are the fully-qualified strings returned by `list`; adapters accept
/// them back verbatim in `download`.
pub trait Storage: Send + Sync {
    /// List every object under a directory path, in the store's listing order.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Open an object for reading. `range` is `[start, end)` in bytes; a range
    /// reaching past the end of the object yields the available bytes.
    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream>;
}

/// Build the storage backend that serves a datasource location.
pub fn build_storage(location: &LocationConfig, cfg: &StorageConfig) -> Result<Arc<dyn Storage>> {
    match location {
        LocationConfig::Local(_) => Ok(Arc::new(FsStorage::new())),
        LocationConfig::AwsS3(_) => {
            #[cfg(feature = "s3")]
            {
                let storage = S3Storage::new(&location.full_dir_path(), cfg)?;
                Ok(Arc::new(storage))
            }

            #[cfg(not(feature = "s3"))]
            {
                let _ = cfg;
                Err(not_built(location, "s3"))
            }
        }
        LocationConfig::Gcs(_) => {
            #[cfg(feature = "gcs")]
            {
                let storage = GcsStorage::new(&location.full_dir_path(), cfg)?;
                Ok(Arc::new(storage))
            }

            #[cfg(not(feature = "gcs"))]
            {
                let _ = cfg;
                Err(not_built(location, "gcs"))
            }
        }
        LocationConfig::AzureBlob(_) => {
            #[cfg(feature = "azure")]
            {
                let storage = AzureBlobStorage::new(&location.full_dir_path(), cfg)?;
                Ok(Arc::new(storage))
            }

            #[cfg(not(feature = "azure"))]
            {
                let _ = cfg;
                Err(not_built(location, "azure"))
            }
        }
    }
}

#[allow(dead_code)]
fn not_built(location: &LocationConfig, feature: &str) -> crate::error::Error {
    crate::error::Error::NotImplemented {
        kind: location.kind().to_string(),
        detail: format!(
            " (built without the `{feature}` feature; rebuild with `--features tabsample-io/{feature}`)"
        ),
    }
}
