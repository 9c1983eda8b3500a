//! Store iterators
//!
//! Lazy traversal of a store directory. Visitation order is whatever the
//! filesystem's directory listing yields and must not be relied upon.

use std::fs::{DirEntry, ReadDir};

use crate::codec::decode_key;
use crate::error::{FileMapError, Result};

use super::io::read_value;

/// A key-value pair materialized from one entry file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl Entry {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the value in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.key, self.value)
    }
}

/// Iterator over all entries of a store
///
/// Each item is decoded and read independently, so a failure on one entry
/// does not end the iteration. Files removed between listing and reading
/// are skipped.
pub struct Entries {
    dir: ReadDir,
}

impl Entries {
    pub(super) fn new(dir: ReadDir) -> Self {
        Self { dir }
    }
}

impl Iterator for Entries {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // read_dir never yields "." or ".."
            let dir_entry = match self.dir.next()? {
                Ok(dir_entry) => dir_entry,
                Err(e) => return Some(Err(e.into())),
            };

            let key = match decode_entry_name(&dir_entry) {
                Ok(key) => key,
                Err(e) => return Some(Err(e)),
            };

            match read_value(&dir_entry.path()) {
                Ok(Some(value)) => return Some(Ok(Entry { key, value })),
                Ok(None) => {
                    tracing::trace!("Entry {:?} vanished during iteration", dir_entry.path());
                    continue;
                }
                Err(e) => {
                    return Some(Err(FileMapError::EntryRead {
                        key,
                        source: Box::new(e),
                    }))
                }
            }
        }
    }
}

/// Iterator over the keys of a store, without reading any values
pub struct Keys {
    dir: ReadDir,
}

impl Keys {
    pub(super) fn new(dir: ReadDir) -> Self {
        Self { dir }
    }
}

impl Iterator for Keys {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let dir_entry = match self.dir.next()? {
            Ok(dir_entry) => dir_entry,
            Err(e) => return Some(Err(e.into())),
        };
        Some(decode_entry_name(&dir_entry))
    }
}

/// Decode the key a directory entry's file name stands for
fn decode_entry_name(dir_entry: &DirEntry) -> Result<Vec<u8>> {
    let name = dir_entry.file_name();
    let name = name
        .to_str()
        .ok_or_else(|| FileMapError::Decode(format!("Non UTF-8 name {:?}", name)))?;
    decode_key(name)
}
