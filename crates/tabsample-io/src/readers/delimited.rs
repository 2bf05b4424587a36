//! Lazy delimited-text record reader.
//!
//! Wraps `csv::Reader` with header handling turned off (callers decide what
//! the first record means) and flexible record lengths (callers validate
//! widths against their own schema).

use std::io::Read;

pub use csv::ByteRecord;
use csv::ReaderBuilder;

use crate::error::Result;

pub struct RecordReader<R: Read> {
    inner: csv::Reader<R>,
    record: ByteRecord,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        let inner = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            inner,
            record: ByteRecord::new(),
        }
    }

    /// Read the next record. `Ok(None)` signals end of data.
    pub fn read_record(&mut self) -> Result<Option<&ByteRecord>> {
        if self.inner.read_byte_record(&mut self.record)? {
            Ok(Some(&self.record))
        } else {
            Ok(None)
        }
    }
}
