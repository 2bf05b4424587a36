//! Sampler configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

/// Default number of rows sampled when the caller does not ask for a count.
pub const DEFAULT_NUM_ROWS: usize = 10;

/// Assumed upper bound for one encoded row; scales the per-file download cap.
pub const DEFAULT_BYTES_PER_ROW_ESTIMATE: u64 = 100_000;

/// Leading bytes downloaded to read a header. Headers are assumed to fit.
pub const DEFAULT_HEADER_PROBE_BYTES: u64 = 100_000;

/// Rows buffered between the sampling producer and its consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Rows sampled across all files when no explicit count is given.
    pub default_num_rows: usize,

    /// Per-row byte estimate used to cap partial downloads.
    /// Raising it fetches more bytes per file; lowering it risks truncated samples.
    pub bytes_per_row_estimate: u64,

    /// Byte range downloaded when reading a header for schema inference.
    pub header_probe_bytes: u64,

    /// Capacity of the bounded row channel used by `sample`.
    pub channel_capacity: usize,

    /// Cloud credential hints / overrides.
    pub aws_region: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
    pub gcs_service_account_path: Option<String>,
    pub azure_access_key: Option<String>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            default_num_rows: DEFAULT_NUM_ROWS,
            bytes_per_row_estimate: DEFAULT_BYTES_PER_ROW_ESTIMATE,
            header_probe_bytes: DEFAULT_HEADER_PROBE_BYTES,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            aws_region: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            gcs_service_account_path: None,
            azure_access_key: None,
        }
    }
}

/// Credential snapshot consumed by the object storage adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub aws_region: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
    pub gcs_service_account_path: Option<String>,
    pub azure_access_key: Option<String>,
}

impl SamplerConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TABSAMPLE_DEFAULT_NUM_ROWS`: rows sampled when no count is given
    /// - `TABSAMPLE_BYTES_PER_ROW`: per-row download estimate in bytes
    /// - `TABSAMPLE_HEADER_PROBE_BYTES`: bytes fetched to read a header
    /// - `TABSAMPLE_CHANNEL_CAPACITY`: bounded row channel capacity
    /// - `TABSAMPLE_AWS_REGION`, `TABSAMPLE_AWS_ACCESS_KEY_ID`,
    ///   `TABSAMPLE_AWS_SECRET_ACCESS_KEY`, `TABSAMPLE_AWS_SESSION_TOKEN`,
    ///   `TABSAMPLE_GCS_SA_PATH`, `TABSAMPLE_AZURE_ACCESS_KEY`: credentials
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SamplerConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("TABSAMPLE_DEFAULT_NUM_ROWS").and_then(|s| s.parse().ok()) {
            cfg.default_num_rows = v;
        }
        if let Some(v) = lookup("TABSAMPLE_BYTES_PER_ROW").and_then(|s| s.parse().ok()) {
            cfg.bytes_per_row_estimate = v;
        }
        if let Some(v) = lookup("TABSAMPLE_HEADER_PROBE_BYTES").and_then(|s| s.parse().ok()) {
            cfg.header_probe_bytes = v;
        }
        if let Some(v) = lookup("TABSAMPLE_CHANNEL_CAPACITY").and_then(|s| s.parse::<usize>().ok())
        {
            cfg.channel_capacity = v.max(1);
        }

        cfg.aws_region = lookup("TABSAMPLE_AWS_REGION");
        cfg.aws_access_key_id = lookup("TABSAMPLE_AWS_ACCESS_KEY_ID");
        cfg.aws_secret_access_key = lookup("TABSAMPLE_AWS_SECRET_ACCESS_KEY");
        cfg.aws_session_token = lookup("TABSAMPLE_AWS_SESSION_TOKEN");
        cfg.gcs_service_account_path = lookup("TABSAMPLE_GCS_SA_PATH");
        cfg.azure_access_key = lookup("TABSAMPLE_AZURE_ACCESS_KEY");

        cfg
    }

    /// Produce a storage configuration snapshot used by the IO layer.
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            aws_region: self.aws_region.clone(),
            aws_access_key_id: self.aws_access_key_id.clone(),
            aws_secret_access_key: self.aws_secret_access_key.clone(),
            aws_session_token: self.aws_session_token.clone(),
            gcs_service_account_path: self.gcs_service_account_path.clone(),
            azure_access_key: self.azure_access_key.clone(),
        }
    }
}
