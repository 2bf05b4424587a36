//! Sampler construction from datasource configuration.
//!
//! A [`SamplerRegistry`] maps each [`FormatKind`] to a builder. New formats
//! are added by registering a builder; unregistered kinds fail with
//! [`SampleError::NotImplemented`].

use std::collections::HashMap;
use std::sync::Arc;

use tabsample_core::config::SamplerConfig;
use tabsample_core::datasource::{FormatConfig, FormatKind, LocationConfig};
use tabsample_io::storage::build_storage;
use tracing::debug;

use crate::csv::CsvSampler;
use crate::error::{Result, SampleError};
use crate::sampler::Sampler;

/// Builds a sampler for one format kind.
pub type SamplerBuilder =
    fn(&FormatConfig, &LocationConfig, &SamplerConfig) -> Result<Arc<dyn Sampler>>;

#[derive(Clone)]
pub struct SamplerRegistry {
    builders: HashMap<FormatKind, SamplerBuilder>,
}

impl SamplerRegistry {
    /// A registry with no formats registered.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// A registry with every built-in sampler registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(FormatKind::CsvFiles, build_csv_sampler);
        registry
    }

    /// Register (or replace) the builder for `kind`, returning the previous one.
    pub fn register(&mut self, kind: FormatKind, builder: SamplerBuilder) -> Option<SamplerBuilder> {
        self.builders.insert(kind, builder)
    }

    pub fn supports(&self, kind: FormatKind) -> bool {
        self.builders.contains_key(&kind)
    }

    pub fn create(
        &self,
        format: &FormatConfig,
        location: &LocationConfig,
        cfg: &SamplerConfig,
    ) -> Result<Arc<dyn Sampler>> {
        let kind = format.kind();
        let builder = self
            .builders
            .get(&kind)
            .ok_or_else(|| SampleError::NotImplemented(kind.to_string()))?;
        debug!(format = %kind, location = %location.kind(), "creating sampler");
        builder(format, location, cfg)
    }
}

impl Default for SamplerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Create a sampler with the built-in registry and environment configuration.
pub fn create_sampler(format: &FormatConfig, location: &LocationConfig) -> Result<Arc<dyn Sampler>> {
    SamplerRegistry::with_defaults().create(format, location, &SamplerConfig::from_env())
}

fn build_csv_sampler(
    format: &FormatConfig,
    location: &LocationConfig,
    cfg: &SamplerConfig,
) -> Result<Arc<dyn Sampler>> {
    let FormatConfig::CsvFiles(csv) = format else {
        return Err(SampleError::Config(format!(
            "csv sampler cannot read {} datasources",
            format.kind()
        )));
    };
    let store = build_storage(location, &cfg.storage_config())?;
    let sampler = CsvSampler::new(store, location.full_dir_path(), csv.delimiter, csv.header)
        .with_config(cfg);
    Ok(Arc::new(sampler))
}
