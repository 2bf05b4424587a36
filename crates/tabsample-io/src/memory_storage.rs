//! In-memory storage backend for testing.
//!
//! Keys are listed in lexicographic order. Every download request is recorded
//! so tests can check which byte ranges a caller asked for.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::storage::{ByteStream, Storage};

/// A recorded `download` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub path: String,
    pub range: Option<Range<u64>>,
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<String, Vec<u8>>,
    downloads: Vec<DownloadRequest>,
}

/// Thread-safe in-memory object store.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the maps intact.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Pre-populate data for a path.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.lock().objects.insert(path.into(), bytes.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lock().objects.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().objects.is_empty()
    }

    /// Download requests seen so far, in call order.
    pub fn downloads(&self) -> Vec<DownloadRequest> {
        self.lock().downloads.clone()
    }
}

impl Storage for MemoryStorage {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .lock()
            .objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream> {
        let mut inner = self.lock();
        inner.downloads.push(DownloadRequest {
            path: path.to_string(),
            range: range.clone(),
        });
        let bytes = inner
            .objects
            .get(path)
            .ok_or_else(|| Error::NotFound(path.to_string()))?;

        let body = match range {
            None => bytes.clone(),
            Some(range) => {
                let len = bytes.len() as u64;
                let start = range.start.min(len) as usize;
                let end = range.end.min(len) as usize;
                bytes[start..end.max(start)].to_vec()
            }
        };
        Ok(Box::new(Cursor::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_all(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_memory_storage_download_range() {
        let storage = MemoryStorage::new();
        storage.insert("dir/file.csv", "hello world");

        let partial = read_all(storage.download("dir/file.csv", Some(6..11)).unwrap());
        assert_eq!(partial, b"world");
    }

    #[test]
    fn test_memory_storage_range_past_end_reads_available() {
        let storage = MemoryStorage::new();
        storage.insert("dir/file.csv", "abc");

        let body = read_all(storage.download("dir/file.csv", Some(0..100_000)).unwrap());
        assert_eq!(body, b"abc");
        let empty = read_all(storage.download("dir/file.csv", Some(10..20)).unwrap());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_memory_storage_list_is_sorted_and_prefixed() {
        let storage = MemoryStorage::new();
        storage.insert("dir/c.csv", "3");
        storage.insert("dir/a.csv", "1");
        storage.insert("other/b.csv", "2");

        assert_eq!(
            storage.list("dir/").unwrap(),
            vec!["dir/a.csv".to_string(), "dir/c.csv".to_string()]
        );
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn test_memory_storage_records_downloads() {
        let storage = MemoryStorage::new();
        storage.insert("a.csv", "x");
        let _ = storage.download("a.csv", Some(0..5)).unwrap();
        assert!(storage.download("missing.csv", None).is_err());

        let seen = storage.downloads();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].range, Some(0..5));
        assert_eq!(seen[1].path, "missing.csv");
    }
}
