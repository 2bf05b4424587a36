use std::ops::Range;
use std::sync::Arc;

use bytes::Buf;
use futures::StreamExt;
use object_store::path::Path as ObjectPath;
use object_store::{Error as ObjectStoreError, ObjectStore};
use tabsample_core::config::StorageConfig;
use tokio::runtime::Runtime;
use tracing::debug;
use url::Url;

#[cfg(feature = "s3")]
use object_store::aws::{AmazonS3, AmazonS3Builder};
#[cfg(feature = "azure")]
use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};
#[cfg(feature = "gcs")]
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};

use crate::error::{Error, Result};
use crate::storage::{ByteStream, Storage};

#[derive(Debug, thiserror::Error)]
pub enum CloudStorageBuilderError {
    #[error("directory URI '{uri}' is not a {scheme}:// URI")]
    WrongScheme { uri: String, scheme: &'static str },

    #[error("unsupported or malformed URI '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URI '{uri}' missing bucket/container component")]
    MissingBucket { uri: String },

    #[error("URI '{uri}' missing container segment")]
    MissingContainer { uri: String },

    #[error("failed to initialize async runtime: {0}")]
    Runtime(String),

    #[error("object_store builder error: {0}")]
    Builder(String),
}

type BuildResult<T> = std::result::Result<T, CloudStorageBuilderError>;

impl From<CloudStorageBuilderError> for Error {
    fn from(err: CloudStorageBuilderError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Bucket/container identity of a cloud directory, used to translate
/// between fully-qualified URIs and object keys.
#[derive(Debug, Clone)]
struct CloudIdentity {
    scheme: &'static str,
    account: String,
    bucket: String,
}

impl CloudIdentity {
    fn parse(uri: &str, schemes: &[&'static str]) -> BuildResult<(Url, &'static str)> {
        let parsed = Url::parse(uri).map_err(|source| CloudStorageBuilderError::InvalidUri {
            uri: uri.to_string(),
            source,
        })?;
        let scheme = schemes
            .iter()
            .copied()
            .find(|s| *s == parsed.scheme())
            .ok_or_else(|| CloudStorageBuilderError::WrongScheme {
                uri: uri.to_string(),
                scheme: schemes[0],
            })?;
        Ok((parsed, scheme))
    }

    fn new_bucket(uri: &str, schemes: &[&'static str]) -> BuildResult<Self> {
        let (parsed, scheme) = Self::parse(uri, schemes)?;
        let bucket = parsed
            .host_str()
            .ok_or_else(|| CloudStorageBuilderError::MissingBucket {
                uri: uri.to_string(),
            })?
            .to_string();
        Ok(Self {
            scheme,
            account: bucket.clone(),
            bucket,
        })
    }

    fn new_azure(uri: &str) -> BuildResult<Self> {
        let (parsed, scheme) = Self::parse(uri, &["azure", "azblob"])?;
        let account = parsed
            .host_str()
            .ok_or_else(|| CloudStorageBuilderError::MissingBucket {
                uri: uri.to_string(),
            })?
            .to_string();
        let container = parsed
            .path()
            .trim_matches('/')
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CloudStorageBuilderError::MissingContainer {
                uri: uri.to_string(),
            })?
            .to_string();
        Ok(Self {
            scheme,
            account,
            bucket: container,
        })
    }

    fn uri_for_key(&self, key: &str) -> String {
        let key = key.trim_start_matches('/');
        match self.scheme {
            "azure" | "azblob" => {
                format!("{}://{}/{}/{}", self.scheme, self.account, self.bucket, key)
            }
            _ => format!("{}://{}/{}", self.scheme, self.bucket, key),
        }
    }

    fn key_from_uri(&self, uri: &str) -> Result<String> {
        let root = match self.scheme {
            "azure" | "azblob" => format!("{}://{}/{}/", self.scheme, self.account, self.bucket),
            _ => format!("{}://{}/", self.scheme, self.bucket),
        };
        match uri.strip_prefix(&root) {
            Some(key) => Ok(key.trim_matches('/').to_string()),
            None if uri == root.trim_end_matches('/') => Ok(String::new()),
            None => Err(Error::Storage(format!(
                "path '{uri}' outside configured bucket '{root}'"
            ))),
        }
    }
}

/// Blocking facade over an async `object_store` client.
struct CloudStorage {
    runtime: Runtime,
    store: Arc<dyn ObjectStore>,
    identity: CloudIdentity,
}

impl CloudStorage {
    fn new(
        store: Arc<dyn ObjectStore>,
        identity: CloudIdentity,
    ) -> BuildResult<Self> {
        let runtime =
            Runtime::new().map_err(|e| CloudStorageBuilderError::Runtime(e.to_string()))?;
        Ok(Self {
            runtime,
            store,
            identity,
        })
    }
}

/// Clamp a requested byte range to an object of `size` bytes, so short
/// objects read in full. `None` when nothing is left to read.
fn clamp_range(range: &Range<u64>, size: usize) -> Option<Range<usize>> {
    let start = usize::try_from(range.start).unwrap_or(usize::MAX).min(size);
    let end = usize::try_from(range.end).unwrap_or(usize::MAX).min(size);
    (start < end).then_some(start..end)
}

fn map_store_error(path: &str, err: ObjectStoreError) -> Error {
    match err {
        ObjectStoreError::NotFound { .. } => Error::NotFound(path.to_string()),
        other => Error::Storage(format!("{path}: {other}")),
    }
}

impl Storage for CloudStorage {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let key = self.identity.key_from_uri(prefix)?;
        let prefix_path = (!key.is_empty()).then(|| ObjectPath::from(key));
        let store = Arc::clone(&self.store);
        let identity = self.identity.clone();
        self.runtime.block_on(async move {
            let mut stream = store.list(prefix_path.as_ref());
            let mut out = Vec::new();
            while let Some(item) = stream.next().await {
                let meta = item.map_err(|e| map_store_error(prefix, e))?;
                out.push(identity.uri_for_key(meta.location.as_ref()));
            }
            debug!(%prefix, objects = out.len(), "listed cloud objects");
            Ok(out)
        })
    }

    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream> {
        let obj_path = ObjectPath::from(self.identity.key_from_uri(path)?);
        let store = Arc::clone(&self.store);
        let result = self.runtime.block_on(async move {
            let bytes = match range {
                None => store.get(&obj_path).await?.bytes().await?,
                Some(range) => {
                    let size = store.head(&obj_path).await?.size;
                    match clamp_range(&range, size) {
                        Some(clamped) => {
                            debug!(path = %obj_path, ?range, ?clamped, size, "ranged get");
                            store.get_range(&obj_path, clamped).await?
                        }
                        None => {
                            debug!(path = %obj_path, ?range, size, "range starts past end of object");
                            bytes::Bytes::new()
                        }
                    }
                }
            };
            Ok::<_, ObjectStoreError>(bytes)
        });
        let bytes = result.map_err(|e| map_store_error(path, e))?;
        Ok(Box::new(bytes.reader()))
    }
}

#[cfg(feature = "s3")]
pub struct S3Storage {
    inner: CloudStorage,
}

#[cfg(feature = "s3")]
impl S3Storage {
    pub fn new(uri: &str, cfg: &StorageConfig) -> BuildResult<Self> {
        let identity = CloudIdentity::new_bucket(uri, &["s3"])?;
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(identity.bucket.clone());
        if let Some(region) = &cfg.aws_region {
            builder = builder.with_region(region.clone());
        }
        if let Some(access_key) = &cfg.aws_access_key_id {
            builder = builder.with_access_key_id(access_key.clone());
        }
        if let Some(secret_key) = &cfg.aws_secret_access_key {
            builder = builder.with_secret_access_key(secret_key.clone());
        }
        if let Some(token) = &cfg.aws_session_token {
            builder = builder.with_token(token.clone());
        }
        let store: AmazonS3 = builder
            .build()
            .map_err(|e| CloudStorageBuilderError::Builder(e.to_string()))?;
        let inner = CloudStorage::new(Arc::new(store), identity)?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "gcs")]
pub struct GcsStorage {
    inner: CloudStorage,
}

#[cfg(feature = "gcs")]
impl GcsStorage {
    pub fn new(uri: &str, cfg: &StorageConfig) -> BuildResult<Self> {
        let identity = CloudIdentity::new_bucket(uri, &["gs", "gcs"])?;
        let mut builder =
            GoogleCloudStorageBuilder::from_env().with_bucket_name(identity.bucket.clone());
        if let Some(sa_path) = &cfg.gcs_service_account_path {
            builder = builder.with_service_account_path(sa_path);
        }
        let store: GoogleCloudStorage = builder
            .build()
            .map_err(|e| CloudStorageBuilderError::Builder(e.to_string()))?;
        let inner = CloudStorage::new(Arc::new(store), identity)?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "azure")]
pub struct AzureBlobStorage {
    inner: CloudStorage,
}

#[cfg(feature = "azure")]
impl AzureBlobStorage {
    pub fn new(uri: &str, cfg: &StorageConfig) -> BuildResult<Self> {
        let identity = CloudIdentity::new_azure(uri)?;
        let mut builder = MicrosoftAzureBuilder::from_env()
            .with_account(identity.account.clone())
            .with_container_name(identity.bucket.clone());
        if let Some(key) = &cfg.azure_access_key {
            builder = builder.with_access_key(key.clone());
        }
        let store: MicrosoftAzure = builder
            .build()
            .map_err(|e| CloudStorageBuilderError::Builder(e.to_string()))?;
        let inner = CloudStorage::new(Arc::new(store), identity)?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "s3")]
impl Storage for S3Storage {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.list(prefix)
    }

    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream> {
        self.inner.download(path, range)
    }
}

#[cfg(feature = "gcs")]
impl Storage for GcsStorage {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.list(prefix)
    }

    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream> {
        self.inner.download(path, range)
    }
}

#[cfg(feature = "azure")]
impl Storage for AzureBlobStorage {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.list(prefix)
    }

    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream> {
        self.inner.download(path, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_identity_round_trips_keys() {
        let id = CloudIdentity::new_bucket("s3://data/raw/events", &["s3"]).unwrap();
        assert_eq!(id.bucket, "data");
        assert_eq!(id.key_from_uri("s3://data/raw/events").unwrap(), "raw/events");
        assert_eq!(
            id.uri_for_key("raw/events/a.csv"),
            "s3://data/raw/events/a.csv"
        );
        assert!(id.key_from_uri("s3://other/a.csv").is_err());
    }

    #[test]
    fn ranges_clamp_to_object_size() {
        assert_eq!(clamp_range(&(0..100_000), 42), Some(0..42));
        assert_eq!(clamp_range(&(10..20), 42), Some(10..20));
        assert_eq!(clamp_range(&(50..60), 42), None);
        assert_eq!(clamp_range(&(0..u64::MAX), 7), Some(0..7));
        assert_eq!(clamp_range(&(u64::MAX - 1..u64::MAX), 7), None);
    }

    #[test]
    fn azure_identity_requires_container() {
        assert!(CloudIdentity::new_azure("azure://acct/").is_err());
        let id = CloudIdentity::new_azure("azure://acct/raw/2024").unwrap();
        assert_eq!(id.bucket, "raw");
        assert_eq!(id.key_from_uri("azure://acct/raw/2024").unwrap(), "2024");
        assert_eq!(id.uri_for_key("2024/a.csv"), "azure://acct/raw/2024/a.csv");
    }
}
