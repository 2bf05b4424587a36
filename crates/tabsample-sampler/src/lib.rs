#![forbid(unsafe_code)]
//! tabsample-sampler: schema inference and bounded row sampling.
//!
//! A [`Sampler`] is bound to one directory of delimited text files. It can
//! infer a schema from the first eligible file's header and stream a capped
//! number of rows, spread across files, into a bounded [`RowSender`].
//! [`SamplerRegistry`] builds samplers from datasource configuration.

pub mod csv;
pub mod error;
pub mod factory;
pub mod options;
pub mod sampler;
pub mod stream;

pub use crate::csv::CsvSampler;
pub use error::{Result, SampleError};
pub use factory::{create_sampler, SamplerRegistry};
pub use options::{sample_all, with_num_rows, with_schema, SamplingOpt, SamplingOptions};
pub use sampler::Sampler;
pub use stream::{row_channel, sample, Row, RowReceiver, RowSender, RowStream, SampleResult};
