use tabsample_core::schema::Schema;
use tabsample_io::error::Error as IoError;
use tabsample_io::readers::delimited::ByteRecord;
use tracing::debug;

use super::infer::is_delimited_path;
use super::CsvSampler;
use crate::error::{Result, SampleError};
use crate::options::{SamplingOpt, SamplingOptions};
use crate::stream::{Row, RowSender};

/// How much one file may contribute to a bounded sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileBudget {
    pub rows: usize,
    /// Download cap: `rows * bytes_per_row`.
    pub bytes: u64,
}

impl FileBudget {
    /// Split `num_rows` evenly over every listed object, eligible or not,
    /// dropping the remainder. `num_rows == 0` means no budget at all.
    pub fn for_listing(num_rows: usize, listed: usize, bytes_per_row: u64) -> Option<Self> {
        if num_rows == 0 {
            return None;
        }
        let rows = num_rows.checked_div(listed).unwrap_or(0);
        Some(Self {
            rows,
            bytes: (rows as u64).saturating_mul(bytes_per_row),
        })
    }
}

impl CsvSampler {
    pub(super) fn sample_rows_into(&self, output: &RowSender, opts: &[SamplingOpt]) -> Result<()> {
        let options = SamplingOptions::with_default_rows(self.default_num_rows).apply(opts);
        let paths = self.list_objects()?;

        let schema = match options.forced_schema() {
            Some(schema) => schema,
            None => self.infer_schema()?,
        };
        let budget = FileBudget::for_listing(options.num_rows, paths.len(), self.bytes_per_row);

        let mut total = 0usize;
        for path in &paths {
            if !is_delimited_path(path) {
                debug!(%path, "skipping non-delimited object");
                continue;
            }
            total += self.sample_file(path, &schema, budget, output)?;
        }

        debug!(dir = %self.full_dir_path, objects = paths.len(), rows = total, "sampled rows");
        Ok(())
    }

    /// Emit up to `budget.rows` rows from one object (all rows when unbounded).
    fn sample_file(
        &self,
        path: &str,
        schema: &Schema,
        budget: Option<FileBudget>,
        output: &RowSender,
    ) -> Result<usize> {
        let range = match budget {
            Some(budget) if budget.rows == 0 => {
                debug!(%path, "zero row budget; skipping download");
                return Ok(0);
            }
            Some(budget) => Some(0..budget.bytes),
            None => None,
        };

        debug!(%path, ?range, "downloading object");
        let mut reader = self.open(path, range)?;
        let parse_err = |source: IoError| SampleError::Parse {
            path: path.to_string(),
            source,
        };

        if self.has_headers && reader.read_record().map_err(parse_err)?.is_none() {
            return Err(SampleError::MissingHeader {
                path: path.to_string(),
            });
        }

        let limit = budget.map(|budget| budget.rows);
        let mut emitted = 0usize;
        while limit.map_or(true, |limit| emitted < limit) {
            let Some(record) = reader.read_record().map_err(parse_err)? else {
                break;
            };
            let row = assemble_row(record, schema, path)?;
            output.send(row)?;
            emitted += 1;
        }

        debug!(%path, rows = emitted, "finished object");
        Ok(emitted)
    }
}

/// Select, for every schema position, the record field at the same index.
fn assemble_row(record: &ByteRecord, schema: &Schema, path: &str) -> Result<Row> {
    if record.len() < schema.len() {
        return Err(SampleError::ShortRecord {
            path: path.to_string(),
            line: record.position().map_or(0, |p| p.line()),
            found: record.len(),
            expected: schema.len(),
        });
    }
    Ok(record.iter().take(schema.len()).map(<[u8]>::to_vec).collect())
}
