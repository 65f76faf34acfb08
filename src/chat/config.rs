//! Configuration for the storage adapters.
//!
//! Deployment-level tuning lives here rather than in the adapters so the
//! read/write consistency trade-off is exposed, not hardcoded.

use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};

/// Commit durability requested from the storage engine for writes.
///
/// This is the deployment-chosen consistency knob: whether a write is
/// acknowledged once it is durable on the local node only, or once the
/// configured replica set has confirmed it. A page read immediately after
/// a write is guaranteed to include that write only under
/// [`CommitDurability::Replicated`] against the same replica set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitDurability {
    /// Acknowledge once the local node has made the write durable.
    Local,

    /// Acknowledge once the replica set has confirmed the write.
    #[default]
    Replicated,
}

impl CommitDurability {
    /// The value applied to the `PostgreSQL` `synchronous_commit` session
    /// setting.
    #[must_use]
    pub const fn as_synchronous_commit(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Replicated => "on",
        }
    }
}

/// Configuration for the `PostgreSQL` adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Connection URL of the storage cluster.
    pub database_url: String,

    /// Maximum number of pooled connections.
    pub max_pool_size: u32,

    /// Write acknowledgement level applied to every pooled connection.
    pub commit_durability: CommitDurability,
}

impl StorageConfig {
    /// Default pool size when `COURIER_DB_POOL_SIZE` is unset.
    pub const DEFAULT_POOL_SIZE: u32 = 10;

    /// Creates a configuration with defaults for everything but the URL.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: Self::DEFAULT_POOL_SIZE,
            commit_durability: CommitDurability::default(),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// `DATABASE_URL` is required; `COURIER_DB_POOL_SIZE` and
    /// `COURIER_COMMIT_DURABILITY` (`local` or `replicated`) are optional.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidArgument`] if `DATABASE_URL` is
    /// unset or an optional variable holds an unparseable value.
    pub fn from_env() -> StorageResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| StorageError::invalid_argument("DATABASE_URL is not set"))?;

        let max_pool_size = match std::env::var("COURIER_DB_POOL_SIZE") {
            Ok(raw) => raw.parse().map_err(|_| {
                StorageError::invalid_argument(format!("invalid COURIER_DB_POOL_SIZE: {raw}"))
            })?,
            Err(_) => Self::DEFAULT_POOL_SIZE,
        };

        let commit_durability = match std::env::var("COURIER_COMMIT_DURABILITY") {
            Ok(raw) => match raw.as_str() {
                "local" => CommitDurability::Local,
                "replicated" => CommitDurability::Replicated,
                other => {
                    return Err(StorageError::invalid_argument(format!(
                        "invalid COURIER_COMMIT_DURABILITY: {other}"
                    )));
                }
            },
            Err(_) => CommitDurability::default(),
        };

        Ok(Self {
            database_url,
            max_pool_size,
            commit_durability,
        })
    }

    /// Overrides the commit durability level.
    #[must_use]
    pub const fn with_commit_durability(mut self, durability: CommitDurability) -> Self {
        self.commit_durability = durability;
        self
    }
}
