//! Store Module
//!
//! Directory-as-table persistence: one regular file per entry.
//!
//! ## Responsibilities
//! - Bind a map to a fresh temporary directory or an existing one
//! - Map each key to a file through the key codec
//! - Whole-file put/get/remove
//! - Enumerate entries by listing the directory (there is no other index)
//!
//! ## Directory Layout
//! ```text
//! {root}/
//!   ├── F16          ("a")
//!   ├── F2616        ("ba")
//!   └── F            ("")
//! ```
//! File contents are the raw value bytes with no header, length prefix or
//! checksum; the file size is the only length record.

mod io;
mod iterator;
mod map;

pub use iterator::{Entries, Entry, Keys};
pub use map::FileMap;
