//! Key-value persistence with file locking.
//!
//! Each key maps to one file under the data directory. Writes go through
//! a locked temp file and an atomic rename, so a reader never observes a
//! partial value and overlapping CLI invocations serialize on the lock.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Well-known key holding the active profile name
pub const KEY_CURRENT_PROFILE: &str = "current_profile";
/// Well-known key holding the serialized per-profile event mapping
pub const KEY_PROFILE_DATA: &str = "profile_data";

/// Persistence contract consumed by the store and tracker
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key store rooted at a data directory
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        // Shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old value
        temp.persist(self.key_path(key))
            .map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} bytes under key {:?}", value.len(), key);
        Ok(())
    }
}

/// In-memory store, the testing seam for the `KvStore` trait
#[derive(Debug, Default)]
pub struct MemKv {
    entries: HashMap<String, String>,
}

impl KvStore for MemKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        Ok(())
    }
}
