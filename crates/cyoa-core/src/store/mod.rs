//! Local key-value store for offline data access.
//!
//! The resolver keeps two string entries here: the serialized game data
//! and the outcome type. Two backends are provided:
//! - `MemoryStore`: process-local map, used in tests and for ephemeral runs
//! - `FileStore`: JSON map persisted under the cache directory

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Key holding the serialized game data
pub const DATA_KEY: &str = "data";

/// Key holding the outcome type
pub const OUTCOME_TYPE_KEY: &str = "outcomeType";

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}
