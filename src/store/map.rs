//! FileMap handle
//!
//! Binds a map to its backing directory and implements the record
//! operations on top of whole-file I/O.
//!
//! ## Concurrency:
//! - No locking and no in-process caching; every call is a direct sequence
//!   of blocking filesystem calls
//! - Safety under concurrent use comes only from the filesystem's per-file
//!   guarantees
//! - File handles never outlive the call that opened them

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::codec::encode_key;
use crate::config::{Config, ErrorPolicy};
use crate::error::Result;

use super::io::{read_value, write_value};
use super::iterator::{Entries, Entry, Keys};

/// A persistent map stored as one file per key in a directory
///
/// The directory must be used exclusively by this map: any foreign file
/// inside it is interpreted as an entry.
///
/// Dropping the handle leaves the directory in place; call
/// [`destroy`](FileMap::destroy) to remove it.
#[derive(Debug)]
pub struct FileMap {
    /// Backing directory; each regular file inside is one entry
    root: PathBuf,

    /// Handle configuration
    config: Config,
}

impl FileMap {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a map in a fresh, uniquely named temporary directory
    ///
    /// Uses the default config.
    pub fn create_temp() -> Result<Self> {
        Self::create_temp_with(Config::default())
    }

    /// Create a map in a fresh, uniquely named directory under
    /// `config.temp_root`
    ///
    /// The name is `config.temp_prefix` plus a random suffix, and the
    /// directory is created exclusively, so an existing path (or a planted
    /// symlink) is never reused.
    pub fn create_temp_with(config: Config) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&config.temp_prefix)
            .tempdir_in(&config.temp_root)?;

        // Lifetime of the directory is managed by `destroy`, not by drop
        let root = dir.keep();
        tracing::debug!("Created temporary store at {:?}", root);

        Ok(Self { root, config })
    }

    /// Bind a map to an existing directory
    ///
    /// Nothing is checked or created here; if the directory is missing, the
    /// first operation that touches it fails with an I/O error.
    pub fn create_in(path: impl Into<PathBuf>) -> Self {
        Self::create_in_with(path, Config::default())
    }

    /// Bind a map to an existing directory with the given config
    pub fn create_in_with(path: impl Into<PathBuf>, config: Config) -> Self {
        let root = path.into();
        tracing::debug!("Bound store to {:?}", root);
        Self { root, config }
    }

    /// Remove every entry and then the directory itself
    ///
    /// Under `ErrorPolicy::BestEffort`, files that cannot be removed are
    /// logged and skipped, and a directory that cannot be listed is left
    /// alone without an error. Under `ErrorPolicy::Strict` the first failure
    /// is returned.
    pub fn destroy(self) -> Result<()> {
        let strict = self.config.error_policy == ErrorPolicy::Strict;

        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if !strict => {
                tracing::debug!("Cannot list {:?} for destroy: {}", self.root, e);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        for dir_entry in dir {
            if let Err(e) = dir_entry.and_then(|dir_entry| fs::remove_file(dir_entry.path())) {
                if strict {
                    return Err(e.into());
                }
                tracing::warn!("Failed to remove entry in {:?}: {}", self.root, e);
            }
        }

        match fs::remove_dir(&self.root) {
            Ok(()) => tracing::debug!("Destroyed store at {:?}", self.root),
            Err(e) if !strict => {
                tracing::warn!("Failed to remove store directory {:?}: {}", self.root, e)
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Insert or overwrite the value for `key`
    ///
    /// Not an atomic replace: if the write fails part way, the entry is left
    /// truncated and the error is returned.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let path = self.entry_path(key);
        tracing::trace!("put {:?} ({} bytes)", path, value.len());
        write_value(&path, value, self.config.sync_writes)
    }

    /// Get the value for `key`
    ///
    /// Returns:
    /// - `Ok(Some(value))` — the full file contents
    /// - `Ok(None)` — key not present
    /// - `Err(Io)` — the store directory itself is missing
    /// - `Err(ShortRead)` — the entry was rewritten while being read
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        tracing::trace!("get {:?}", path);
        match read_value(&path)? {
            Some(value) => Ok(Some(value)),
            None => self.check_root().map(|()| None),
        }
    }

    /// Remove `key`; removing an absent key is a no-op
    ///
    /// Fails if the store directory itself is missing.
    pub fn remove(&self, key: &[u8]) -> Result<()> {
        let path = self.entry_path(key);
        tracing::trace!("remove {:?}", path);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => self.check_root(),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether `key` is present without reading its value
    pub fn contains(&self, key: &[u8]) -> Result<bool> {
        if self.entry_path(key).try_exists()? {
            return Ok(true);
        }
        self.check_root().map(|()| false)
    }

    /// Number of entries in the directory
    pub fn len(&self) -> Result<usize> {
        let mut count = 0;
        for dir_entry in fs::read_dir(&self.root)? {
            dir_entry?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool> {
        match fs::read_dir(&self.root)?.next() {
            None => Ok(true),
            Some(dir_entry) => dir_entry.map(|_| false).map_err(Into::into),
        }
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Visit every entry once, in directory listing order
    ///
    /// Under `ErrorPolicy::BestEffort` a failing entry (undecodable name or
    /// unreadable value) is handed to `visit` as an `Err` and the traversal
    /// continues. Under `ErrorPolicy::Strict` the first failure stops the
    /// traversal and is returned.
    ///
    /// Fails without visiting anything if the directory cannot be listed.
    pub fn for_each<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Result<Entry>),
    {
        for item in self.iter()? {
            match item {
                Ok(entry) => visit(Ok(entry)),
                Err(e) if self.config.error_policy == ErrorPolicy::BestEffort => {
                    tracing::warn!(
                        "Reporting unreadable entry in {:?} to visitor: {}",
                        self.root,
                        e
                    );
                    visit(Err(e));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Iterate over all entries, reading each value lazily
    pub fn iter(&self) -> Result<Entries> {
        Ok(Entries::new(fs::read_dir(&self.root)?))
    }

    /// Iterate over all keys without reading values
    pub fn keys(&self) -> Result<Keys> {
        Ok(Keys::new(fs::read_dir(&self.root)?))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing directory path
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fail with `Io(NotFound)` if the store directory does not exist
    ///
    /// Tells a missing entry apart from a missing store.
    fn check_root(&self) -> Result<()> {
        fs::metadata(&self.root)?;
        Ok(())
    }

    /// File that holds the value for `key`
    fn entry_path(&self, key: &[u8]) -> PathBuf {
        self.root.join(encode_key(key))
    }
}
