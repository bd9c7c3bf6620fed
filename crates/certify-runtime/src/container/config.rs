//! # Runtime Configuration
//!
//! Defaults, overridden by `BC_*` environment variables, overridden in turn
//! by command-line flags.
//!
//! | Variable | Flag | Default |
//! |----------|------|---------|
//! | `BC_DATA_DIR` | `--data-dir` | `./data` |
//! | `BC_STORAGE_BACKEND` | `--backend` | `file` |
//! | `BC_GENESIS_OWNER` | `--owner` | unset |
//! | `BC_LOG_LEVEL` | `--log-level` | `info` |

use shared_types::{Principal, PrincipalParseError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_DATA_DIR: &str = "BC_DATA_DIR";
pub const ENV_STORAGE_BACKEND: &str = "BC_STORAGE_BACKEND";
pub const ENV_GENESIS_OWNER: &str = "BC_GENESIS_OWNER";
pub const ENV_LOG_LEVEL: &str = "BC_LOG_LEVEL";

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Owner installed when the store holds no registry yet.
    pub genesis_owner: Option<Principal>,
    /// Default tracing level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            genesis_owner: None,
            log_level: "info".to_string(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the registry files.
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            backend: StorageBackend::File,
        }
    }
}

/// Key-value backend the registry persists to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Single file with an exclusive lock.
    #[default]
    File,
    /// Process-local; nothing survives exit.
    Memory,
    /// RocksDB, requires the `rocksdb` feature.
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Memory => "memory",
            Self::RocksDb => "rocksdb",
        };
        f.write_str(name)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown storage backend '{0}' (expected file, memory or rocksdb)")]
    UnknownBackend(String),

    #[error("invalid {var}: {source}")]
    InvalidPrincipal {
        var: &'static str,
        #[source]
        source: PrincipalParseError,
    },

    #[error("genesis owner must not be the null principal")]
    NullGenesisOwner,

    #[error("data directory must not be empty")]
    EmptyDataDir,

    #[error("storage backend '{backend}' is not compiled in")]
    BackendUnavailable { backend: &'static str },
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_STORAGE_BACKEND) {
            config.storage.backend = backend.parse()?;
        }
        if let Some(owner) = lookup(ENV_GENESIS_OWNER) {
            let owner = owner
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPrincipal {
                    var: ENV_GENESIS_OWNER,
                    source,
                })?;
            config.genesis_owner = Some(owner);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Reject settings the registry cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.genesis_owner.is_some_and(|owner| owner.is_zero()) {
            return Err(ConfigError::NullGenesisOwner);
        }
        if self.storage.backend != StorageBackend::Memory
            && self.storage.data_dir.as_os_str().is_empty()
        {
            return Err(ConfigError::EmptyDataDir);
        }
        if self.storage.backend == StorageBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable { backend: "rocksdb" });
        }
        Ok(())
    }
}
