//! Content loaders for reading battle data from TOML files.

pub mod config;
pub mod factory;
pub mod rewards;
pub mod roster;

pub use config::{ConfigLoader, ConfigSpec};
pub use factory::ContentFactory;
pub use rewards::{RewardTableLoader, RewardTables};
pub use roster::{Roster, RosterEntry, RosterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
