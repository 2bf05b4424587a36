use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::{ByteStream, Storage};

/// Local filesystem storage (rooted at the host filesystem).
#[derive(Debug, Clone, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix_path = Path::new(prefix);
        let mut results = Vec::new();

        if !prefix_path.exists() {
            debug!(%prefix, "directory does not exist; nothing to list");
            return Ok(results);
        }

        if prefix_path.is_file() {
            if let Some(s) = prefix_path.to_str() {
                results.push(s.to_string());
            }
            return Ok(results);
        }

        fn visit_dirs(dir: &Path, results: &mut Vec<String>) -> std::io::Result<()> {
            if dir.is_dir() {
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.is_dir() {
                        visit_dirs(&path, results)?;
                    } else if let Some(s) = path.to_str() {
                        results.push(s.to_string());
                    }
                }
            }
            Ok(())
        }

        visit_dirs(prefix_path, &mut results)
            .map_err(|e| Error::Storage(format!("list {prefix}: {e}")))?;

        // read_dir order is platform-defined
        results.sort();
        debug!(%prefix, objects = results.len(), "listed local files");
        Ok(results)
    }

    fn download(&self, path: &str, range: Option<Range<u64>>) -> Result<ByteStream> {
        let mut f = File::open(Path::new(path)).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(path.to_string()),
            _ => Error::Storage(format!("open {path}: {e}")),
        })?;
        match range {
            None => Ok(Box::new(f)),
            Some(range) => {
                f.seek(SeekFrom::Start(range.start))
                    .map_err(|e| Error::Storage(format!("seek {path}: {e}")))?;
                let len = range.end.saturating_sub(range.start);
                Ok(Box::new(f.take(len)))
            }
        }
    }
}
