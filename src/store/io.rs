//! Whole-file value I/O
//!
//! Shared by point lookups and iteration so both follow the same read-loop
//! semantics.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

use crate::error::{FileMapError, Result};

/// Permission bits for newly created value files (owner read/write)
#[cfg(unix)]
const VALUE_FILE_MODE: u32 = 0o600;

/// Read a value file in full
///
/// The length is sampled with `stat` before the file is opened and exactly
/// that many bytes are read. A writer racing with this call can shrink the
/// file in between, which surfaces as `ShortRead`; growth past the sampled
/// length is not observed.
///
/// Returns `Ok(None)` if the file does not exist.
pub(crate) fn read_value(path: &Path) -> Result<Option<Vec<u8>>> {
    match open_sized(path)? {
        Some((mut file, expected)) => read_sized(&mut file, expected).map(Some),
        None => Ok(None),
    }
}

/// Sample the length of a value file and open it
///
/// Returns `Ok(None)` if the file does not exist.
fn open_sized(path: &Path) -> Result<Option<(File, u64)>> {
    let expected = match std::fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match File::open(path) {
        Ok(file) => Ok(Some((file, expected))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read exactly `expected` bytes, failing with `ShortRead` on early EOF
fn read_sized(reader: &mut impl Read, expected: u64) -> Result<Vec<u8>> {
    let len = usize::try_from(expected)
        .map_err(|_| io::Error::new(ErrorKind::InvalidData, "value does not fit in memory"))?;
    let mut buf = vec![0u8; len];
    let mut filled = 0;

    // Keep retrying short reads until the sampled length is reached
    while filled < len {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(FileMapError::ShortRead {
                    expected,
                    actual: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(buf)
}

/// Create or truncate a value file and write `value` to it
///
/// Not an atomic replace: a failure part way leaves a truncated file behind,
/// and the error is returned to the caller.
pub(crate) fn write_value(path: &Path, value: &[u8], sync: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(VALUE_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(value)?;

    if sync {
        file.sync_all()?;
    }

    Ok(())
}
