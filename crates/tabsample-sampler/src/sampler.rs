//! The sampler contract shared by every data format.

use tabsample_core::schema::Schema;

use crate::error::Result;
use crate::options::SamplingOpt;
use crate::stream::RowSender;

/// Infers a schema and emits a bounded row sample from one bound directory.
///
/// Implementations hold only read-only bindings (directory, store, format
/// settings); every call re-lists and re-downloads.
pub trait Sampler: Send + Sync {
    /// Derive a schema from the directory. An empty directory yields an empty
    /// schema rather than an error.
    fn sample_schema(&self) -> Result<Schema>;

    /// Push sampled rows into `output`, positionally aligned to the resolved
    /// schema. `output` is not closed here; the caller owns it.
    fn sample_rows(&self, output: &RowSender, opts: &[SamplingOpt]) -> Result<()>;
}
