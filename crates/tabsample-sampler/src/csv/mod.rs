//! Sampler for directories of CSV/TSV files.
//!
//! - `infer`: schema from the first eligible file's header.
//! - `rows`: per-file partial downloads and row emission.

mod infer;
mod rows;

pub use infer::{is_delimited_path, schema_from_header, DELIMITED_EXTENSIONS};
pub use rows::FileBudget;

use std::ops::Range;
use std::sync::Arc;

use tabsample_core::config::{
    SamplerConfig, DEFAULT_BYTES_PER_ROW_ESTIMATE, DEFAULT_HEADER_PROBE_BYTES, DEFAULT_NUM_ROWS,
};
use tabsample_core::datasource::Delimiter;
use tabsample_core::schema::Schema;
use tabsample_io::readers::delimited::RecordReader;
use tabsample_io::storage::{ByteStream, Storage};

use crate::error::{Result, SampleError};
use crate::options::SamplingOpt;
use crate::sampler::Sampler;
use crate::stream::RowSender;

/// Samples one directory of delimited text files.
pub struct CsvSampler {
    store: Arc<dyn Storage>,
    full_dir_path: String,
    delimiter: Delimiter,
    has_headers: bool,
    header_probe_bytes: u64,
    bytes_per_row: u64,
    default_num_rows: usize,
}

impl CsvSampler {
    pub fn new(
        store: Arc<dyn Storage>,
        full_dir_path: impl Into<String>,
        delimiter: Delimiter,
        has_headers: bool,
    ) -> Self {
        Self {
            store,
            full_dir_path: full_dir_path.into(),
            delimiter,
            has_headers,
            header_probe_bytes: DEFAULT_HEADER_PROBE_BYTES,
            bytes_per_row: DEFAULT_BYTES_PER_ROW_ESTIMATE,
            default_num_rows: DEFAULT_NUM_ROWS,
        }
    }

    /// Apply the tunables from a sampler configuration.
    pub fn with_config(self, cfg: &SamplerConfig) -> Self {
        self.with_header_probe_bytes(cfg.header_probe_bytes)
            .with_bytes_per_row(cfg.bytes_per_row_estimate)
            .with_default_num_rows(cfg.default_num_rows)
    }

    pub fn with_header_probe_bytes(mut self, bytes: u64) -> Self {
        self.header_probe_bytes = bytes;
        self
    }

    pub fn with_bytes_per_row(mut self, bytes: u64) -> Self {
        self.bytes_per_row = bytes;
        self
    }

    pub fn with_default_num_rows(mut self, num_rows: usize) -> Self {
        self.default_num_rows = num_rows;
        self
    }

    pub fn full_dir_path(&self) -> &str {
        &self.full_dir_path
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    fn list_objects(&self) -> Result<Vec<String>> {
        self.store
            .list(&self.full_dir_path)
            .map_err(|source| SampleError::List {
                dir: self.full_dir_path.clone(),
                source,
            })
    }

    fn open(&self, path: &str, range: Option<Range<u64>>) -> Result<RecordReader<ByteStream>> {
        let body = self
            .store
            .download(path, range)
            .map_err(|source| SampleError::Download {
                path: path.to_string(),
                source,
            })?;
        Ok(RecordReader::new(body, self.delimiter.as_byte()))
    }
}

impl Sampler for CsvSampler {
    fn sample_schema(&self) -> Result<Schema> {
        self.infer_schema()
    }

    fn sample_rows(&self, output: &RowSender, opts: &[SamplingOpt]) -> Result<()> {
        self.sample_rows_into(output, opts)
    }
}

impl std::fmt::Debug for CsvSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSampler")
            .field("full_dir_path", &self.full_dir_path)
            .field("delimiter", &self.delimiter)
            .field("has_headers", &self.has_headers)
            .field("header_probe_bytes", &self.header_probe_bytes)
            .field("bytes_per_row", &self.bytes_per_row)
            .field("default_num_rows", &self.default_num_rows)
            .finish()
    }
}
