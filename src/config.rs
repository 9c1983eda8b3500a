//! Configuration for FileMap
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a FileMap handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Temporary Store Configuration
    // -------------------------------------------------------------------------
    /// Parent directory for stores made by `FileMap::create_temp`
    pub temp_root: PathBuf,

    /// Name prefix for temporary store directories; a random suffix follows
    pub temp_prefix: String,

    // -------------------------------------------------------------------------
    // Failure Handling
    // -------------------------------------------------------------------------
    /// What traversals (`for_each`, `destroy`) do when a single entry fails
    pub error_policy: ErrorPolicy,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// fsync each value file after `put`
    pub sync_writes: bool,
}

/// Per-entry failure handling for whole-directory traversals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Report the failure (to the visitor or the log) and move on
    #[default]
    BestEffort,

    /// Stop at the first failure and return it
    Strict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_root: std::env::temp_dir(),
            temp_prefix: "tmpdir.".to_string(),
            error_policy: ErrorPolicy::BestEffort,
            sync_writes: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the parent directory for temporary stores
    pub fn temp_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_root = path.into();
        self
    }

    /// Set the name prefix for temporary store directories
    pub fn temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.temp_prefix = prefix.into();
        self
    }

    /// Set the traversal error policy
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    /// Enable or disable fsync after every put
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
