use tabsample_io::readers::delimited::ByteRecord;
use tabsample_core::schema::{Field, Schema};
use tracing::debug;

use super::CsvSampler;
use crate::error::{Result, SampleError};

/// Object suffixes treated as delimited text. Matching is case-sensitive.
pub const DELIMITED_EXTENSIONS: [&str; 2] = [".csv", ".tsv"];

pub fn is_delimited_path(path: &str) -> bool {
    DELIMITED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Build an all-string schema from a first record, naming columns from the
/// record itself or `col_<i>` when the file has no header.
pub fn schema_from_header(record: &ByteRecord, has_headers: bool) -> Schema {
    record
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if has_headers {
                Field::utf8(String::from_utf8_lossy(cell))
            } else {
                Field::utf8(Field::placeholder_name(i))
            }
        })
        .collect::<Vec<_>>()
        .into()
}

impl CsvSampler {
    /// Read only the leading bytes of the first eligible file and derive the
    /// schema from its first record. Files after the first are never inspected.
    pub(super) fn infer_schema(&self) -> Result<Schema> {
        let paths = self.list_objects()?;

        for path in &paths {
            if !is_delimited_path(path) {
                debug!(%path, "skipping non-delimited object");
                continue;
            }

            let mut reader = self.open(path, Some(0..self.header_probe_bytes))?;
            let record = reader
                .read_record()
                .map_err(|source| SampleError::Parse {
                    path: path.clone(),
                    source,
                })?
                .ok_or_else(|| SampleError::MissingHeader { path: path.clone() })?;

            let schema = schema_from_header(record, self.has_headers);
            debug!(%path, fields = schema.len(), "inferred schema from header");
            return Ok(schema);
        }

        debug!(dir = %self.full_dir_path, "no delimited objects; empty schema");
        Ok(Schema::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(is_delimited_path("s3://b/p/a.csv"));
        assert!(is_delimited_path("data/b.tsv"));
        assert!(!is_delimited_path("data/c.CSV"));
        assert!(!is_delimited_path("data/d.txt"));
        assert!(!is_delimited_path("data/e.csv.gz"));
    }

    #[test]
    fn header_cells_become_field_names() {
        let record = ByteRecord::from(vec!["id", "name"]);
        let schema = schema_from_header(&record, true);
        assert_eq!(schema.names(), vec!["id", "name"]);
    }

    #[test]
    fn headerless_files_get_placeholder_names() {
        let record = ByteRecord::from(vec!["1", "alice", "x"]);
        let schema = schema_from_header(&record, false);
        assert_eq!(schema.names(), vec!["col_0", "col_1", "col_2"]);
    }
}
