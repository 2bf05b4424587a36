#![forbid(unsafe_code)]
//! tabsample-io: object storage adapters and delimited record readers.
//!
//! - `storage`: the `Storage` trait (list + ranged download) with local
//!   filesystem and feature-gated cloud implementations.
//! - `memory_storage`: in-memory `Storage` used by tests and benches.
//! - `readers`: lazy delimited-text record reader over any byte stream.

pub mod error;
pub mod memory_storage;
pub mod readers;
pub mod storage;

pub use memory_storage::MemoryStorage;
pub use readers::delimited::RecordReader;
pub use storage::{build_storage, ByteStream, FsStorage, Storage};
