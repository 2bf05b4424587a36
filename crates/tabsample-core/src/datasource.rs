//! Datasource configuration model: what format a directory holds and where it lives.
//!
//! Example source document:
//! ```yaml
//! format:
//!   kind: csv_files
//!   delimiter: comma
//!   header: true
//! location:
//!   kind: aws_s3
//!   bucket: my-bucket
//!   prefix: raw/events
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Single-byte field delimiter for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Delimiter(u8);

impl Delimiter {
    pub const COMMA: Self = Self(b',');
    pub const TAB: Self = Self(b'\t');
    pub const PIPE: Self = Self(b'|');
    pub const SEMICOLON: Self = Self(b';');

    /// Accepts any ASCII byte that cannot be confused with record or quote syntax.
    pub fn new(byte: u8) -> Result<Self> {
        if !byte.is_ascii() || matches!(byte, b'\n' | b'\r' | b'"') {
            return Err(Error::Delimiter((byte as char).escape_default().to_string()));
        }
        Ok(Self(byte))
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }

    pub fn name(self) -> String {
        match self.0 {
            b',' => "comma".into(),
            b'\t' => "tab".into(),
            b'|' => "pipe".into(),
            b';' => "semicolon".into(),
            other => (other as char).to_string(),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "comma" => Ok(Self::COMMA),
            "tab" | "\\t" => Ok(Self::TAB),
            "pipe" => Ok(Self::PIPE),
            "semicolon" => Ok(Self::SEMICOLON),
            other if other.len() == 1 => Self::new(other.as_bytes()[0]),
            other => Err(Error::Delimiter(other.to_string())),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Delimiter> for String {
    fn from(d: Delimiter) -> Self {
        d.name()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    CsvFiles,
    ParquetFiles,
    JsonLinesFiles,
}

impl FormatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatKind::CsvFiles => "csv_files",
            FormatKind::ParquetFiles => "parquet_files",
            FormatKind::JsonLinesFiles => "json_lines_files",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_header() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvFilesFormatConfig {
    #[serde(default)]
    pub delimiter: Delimiter,
    /// Whether the first record of every file is a header row.
    #[serde(default = "default_header")]
    pub header: bool,
}

impl Default for CsvFilesFormatConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::COMMA,
            header: true,
        }
    }
}

/// Declared data format of a datasource directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatConfig {
    CsvFiles(CsvFilesFormatConfig),
    ParquetFiles,
    JsonLinesFiles,
}

impl FormatConfig {
    pub fn kind(&self) -> FormatKind {
        match self {
            FormatConfig::CsvFiles(_) => FormatKind::CsvFiles,
            FormatConfig::ParquetFiles => FormatKind::ParquetFiles,
            FormatConfig::JsonLinesFiles => FormatKind::JsonLinesFiles,
        }
    }

    pub fn csv(delimiter: Delimiter, header: bool) -> Self {
        FormatConfig::CsvFiles(CsvFilesFormatConfig { delimiter, header })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    AwsS3,
    Gcs,
    AzureBlob,
    Local,
}

impl LocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::AwsS3 => "aws_s3",
            LocationKind::Gcs => "gcs",
            LocationKind::AzureBlob => "azure_blob",
            LocationKind::Local => "local",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLocationConfig {
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureBlobLocationConfig {
    pub account: String,
    pub container: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalLocationConfig {
    pub path: String,
}

/// Where a datasource directory lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationConfig {
    AwsS3(BucketLocationConfig),
    Gcs(BucketLocationConfig),
    AzureBlob(AzureBlobLocationConfig),
    Local(LocalLocationConfig),
}

impl LocationConfig {
    pub fn kind(&self) -> LocationKind {
        match self {
            LocationConfig::AwsS3(_) => LocationKind::AwsS3,
            LocationConfig::Gcs(_) => LocationKind::Gcs,
            LocationConfig::AzureBlob(_) => LocationKind::AzureBlob,
            LocationConfig::Local(_) => LocationKind::Local,
        }
    }

    pub fn s3(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        LocationConfig::AwsS3(BucketLocationConfig {
            bucket: bucket.into(),
            prefix: prefix.into(),
        })
    }

    pub fn local(path: impl Into<String>) -> Self {
        LocationConfig::Local(LocalLocationConfig { path: path.into() })
    }

    /// Fully-qualified directory path handed to the object store.
    pub fn full_dir_path(&self) -> String {
        match self {
            LocationConfig::AwsS3(cfg) => {
                format!("s3://{}/{}", cfg.bucket, cfg.prefix.trim_start_matches('/'))
            }
            LocationConfig::Gcs(cfg) => {
                format!("gs://{}/{}", cfg.bucket, cfg.prefix.trim_start_matches('/'))
            }
            LocationConfig::AzureBlob(cfg) => format!(
                "azure://{}/{}/{}",
                cfg.account,
                cfg.container,
                cfg.prefix.trim_start_matches('/')
            ),
            LocationConfig::Local(cfg) => cfg.path.clone(),
        }
    }
}

/// A format/location pair, as stored in a YAML source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub format: FormatConfig,
    pub location: LocationConfig,
}

impl SourceDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
