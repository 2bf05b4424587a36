//! Sampling options built from modifiers applied in call order.

use tabsample_core::config::DEFAULT_NUM_ROWS;
use tabsample_core::schema::{Field, Schema};

/// A single modifier. Later modifiers override earlier ones for the same setting.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingOpt {
    /// Sample every available row (`num_rows = 0`).
    SampleAll,
    /// Cap the total number of rows across all files.
    NumRows(usize),
    /// Use these fields instead of inferring a schema.
    Schema(Vec<Field>),
}

pub fn sample_all() -> SamplingOpt {
    SamplingOpt::SampleAll
}

pub fn with_num_rows(num_rows: usize) -> SamplingOpt {
    SamplingOpt::NumRows(num_rows)
}

pub fn with_schema(schema: Schema) -> SamplingOpt {
    SamplingOpt::Schema(schema.fields)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingOptions {
    /// Total rows to sample, or 0 to sample everything.
    pub num_rows: usize,
    /// Forced field definitions, or `None` to infer.
    pub schema_fields: Option<Vec<Field>>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::with_default_rows(DEFAULT_NUM_ROWS)
    }
}

impl SamplingOptions {
    pub fn with_default_rows(num_rows: usize) -> Self {
        Self {
            num_rows,
            schema_fields: None,
        }
    }

    /// Merge `opts` over `self`, last writer wins.
    pub fn apply(mut self, opts: &[SamplingOpt]) -> Self {
        for opt in opts {
            match opt {
                SamplingOpt::SampleAll => self.num_rows = 0,
                SamplingOpt::NumRows(n) => self.num_rows = *n,
                SamplingOpt::Schema(fields) => self.schema_fields = Some(fields.clone()),
            }
        }
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.num_rows == 0
    }

    /// Supplied schema, if any. An empty field list counts as not supplied.
    pub fn forced_schema(&self) -> Option<Schema> {
        self.schema_fields
            .as_ref()
            .filter(|fields| !fields.is_empty())
            .map(|fields| Schema::new(fields.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ten_rows_without_schema() {
        let opts = SamplingOptions::default().apply(&[]);
        assert_eq!(opts.num_rows, 10);
        assert!(opts.forced_schema().is_none());
    }

    #[test]
    fn later_modifiers_win() {
        let opts = SamplingOptions::default().apply(&[sample_all(), with_num_rows(7)]);
        assert_eq!(opts.num_rows, 7);
        let opts = SamplingOptions::default().apply(&[with_num_rows(7), sample_all()]);
        assert!(opts.is_unbounded());
    }

    #[test]
    fn last_schema_wins() {
        let first = Schema::new(vec![Field::utf8("a")]);
        let second = Schema::new(vec![Field::utf8("x"), Field::utf8("y")]);
        let opts = SamplingOptions::default().apply(&[with_schema(first), with_schema(second.clone())]);
        assert_eq!(opts.forced_schema(), Some(second));
    }

    #[test]
    fn empty_schema_falls_back_to_inference() {
        let opts = SamplingOptions::default().apply(&[with_schema(Schema::empty())]);
        assert!(opts.forced_schema().is_none());
    }
}
