#![forbid(unsafe_code)]
//! tabsample: preview delimited text datasets in object storage.
//!
//! Re-exports the workspace crates under one roof:
//! - [`model`]: schema types and datasource configuration
//! - [`io`]: object storage adapters and record readers
//! - [`sampler`]: schema inference, row sampling, and the sampler factory

pub use tabsample_core as model;
pub use tabsample_io as io;
pub use tabsample_sampler as sampler;

pub mod prelude {
    pub use tabsample_core::prelude::*;
    pub use tabsample_io::{MemoryStorage, Storage};
    pub use tabsample_sampler::{
        create_sampler, sample, sample_all, with_num_rows, with_schema, CsvSampler, Row,
        SampleError, SampleResult, Sampler, SamplerRegistry, SamplingOpt,
    };
}
