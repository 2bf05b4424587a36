//! Bounded producer/consumer handoff for sampled rows.
//!
//! The sampler is the only producer and blocks while the channel is full;
//! the caller is the only consumer and blocks while it is empty. The stream
//! closes when the producer's [`RowSender`] is dropped.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tabsample_core::schema::Schema;

use crate::error::{Result, SampleError};
use crate::options::{with_schema, SamplingOpt, SamplingOptions};
use crate::sampler::Sampler;

/// One sampled row: raw field bytes, positionally aligned to the schema.
pub type Row = Vec<Vec<u8>>;

/// Producer half of the row channel.
pub struct RowSender {
    tx: SyncSender<Row>,
}

impl RowSender {
    /// Hand one row to the consumer, blocking while the channel is full.
    pub fn send(&self, row: Row) -> Result<()> {
        self.tx.send(row).map_err(|_| SampleError::OutputClosed)
    }
}

/// Consumer half of the row channel. Iteration ends once every sender is dropped.
pub struct RowReceiver {
    rx: Receiver<Row>,
}

impl RowReceiver {
    pub fn recv(&self) -> Option<Row> {
        self.rx.recv().ok()
    }
}

impl Iterator for RowReceiver {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.recv()
    }
}

/// Create a bounded row channel holding at most `capacity` rows in flight.
pub fn row_channel(capacity: usize) -> (RowSender, RowReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (RowSender { tx }, RowReceiver { rx })
}

/// Rows produced on a background thread, plus the producer's outcome.
pub struct RowStream {
    rows: Option<RowReceiver>,
    handle: Option<JoinHandle<Result<()>>>,
}

impl RowStream {
    /// Stop consuming, wait for the producer, and return its result.
    ///
    /// Unconsumed rows are discarded. A producer that stops only because the
    /// consumer went away is not reported as an error.
    pub fn finish(mut self) -> Result<()> {
        self.rows.take();
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(Err(SampleError::OutputClosed)) => Ok(()),
            Ok(result) => result,
            Err(_) => Err(SampleError::Producer),
        }
    }
}

impl Iterator for RowStream {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rows.as_mut()?.next()
    }
}

impl Drop for RowStream {
    fn drop(&mut self) {
        // Unblock a producer waiting on a full channel before joining it.
        self.rows.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A resolved schema paired with the stream of rows sampled under it.
pub struct SampleResult {
    pub schema: Schema,
    pub rows: RowStream,
}

/// Resolve the schema, then sample rows on a dedicated producer thread.
///
/// The schema is resolved up front (or taken from `opts`) and forced on the
/// producer so every row matches `SampleResult::schema`.
pub fn sample(
    sampler: Arc<dyn Sampler>,
    capacity: usize,
    mut opts: Vec<SamplingOpt>,
) -> Result<SampleResult> {
    let schema = match SamplingOptions::default().apply(&opts).forced_schema() {
        Some(schema) => schema,
        None => sampler.sample_schema()?,
    };
    opts.push(with_schema(schema.clone()));

    let (tx, rx) = row_channel(capacity);
    let handle = thread::Builder::new()
        .name("tabsample-producer".into())
        .spawn(move || {
            let result = sampler.sample_rows(&tx, &opts);
            // Closing the channel is the completion signal, on every path.
            drop(tx);
            result
        })
        .map_err(|_| SampleError::Producer)?;

    Ok(SampleResult {
        schema,
        rows: RowStream {
            rows: Some(rx),
            handle: Some(handle),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_closes_when_sender_dropped() {
        let (tx, rx) = row_channel(2);
        tx.send(vec![b"a".to_vec()]).unwrap();
        drop(tx);
        let rows: Vec<Row> = rx.collect();
        assert_eq!(rows, vec![vec![b"a".to_vec()]]);
    }

    #[test]
    fn send_fails_after_consumer_drops() {
        let (tx, rx) = row_channel(1);
        drop(rx);
        assert!(matches!(tx.send(vec![]), Err(SampleError::OutputClosed)));
    }

    #[test]
    fn full_channel_blocks_producer_until_consumed() {
        let (tx, rx) = row_channel(1);
        let producer = thread::spawn(move || {
            for i in 0..5u8 {
                tx.send(vec![vec![i]])?;
            }
            Ok::<_, SampleError>(())
        });
        let rows: Vec<Row> = rx.collect();
        producer.join().unwrap().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4], vec![vec![4u8]]);
    }
}
