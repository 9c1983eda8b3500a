//! # FileMap
//!
//! A minimal persistent key-value map backed by a filesystem directory:
//! - One regular file per entry, holding the raw value bytes
//! - File names are a reversible encoding of the key
//! - Enumeration is a directory listing; no index, cache or locking
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FileMap                               │
//! │     put / get / remove / len / for_each / destroy            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ key
//!                       ▼
//!               ┌───────────────┐
//!               │   Key Codec   │   "ab" → "F1626"
//!               └───────┬───────┘
//!                       │ file name
//!                       ▼
//!               ┌───────────────┐
//!               │   Directory   │   {root}/F1626 = value bytes
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filemap::FileMap;
//!
//! # fn main() -> filemap::Result<()> {
//! let map = FileMap::create_temp()?;
//! map.put(b"a", b"hello")?;
//! assert_eq!(map.get(b"a")?, Some(b"hello".to_vec()));
//! map.destroy()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FileMapError, Result};
pub use config::{Config, ErrorPolicy};
pub use store::{Entry, FileMap};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FileMap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
