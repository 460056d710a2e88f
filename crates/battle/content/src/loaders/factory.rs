//! Content factory for building engine inputs from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Mode, RewardTable};

use crate::loaders::{ConfigLoader, ConfigSpec, LoadResult, RewardTableLoader, RewardTables};
use crate::loaders::{Roster, RosterLoader};

/// Loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml    (optional)
/// ├── rewards.toml   (optional)
/// └── roster.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const REWARDS_FILE: &'static str = "rewards.toml";
    pub const ROSTER_FILE: &'static str = "roster.toml";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load config overrides from `config.toml`.
    ///
    /// A missing file means "no overrides".
    pub fn load_config_spec(&self) -> LoadResult<ConfigSpec> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using engine defaults");
            return Ok(ConfigSpec::default());
        }
        ConfigLoader::load(&path)
    }

    /// Engine configuration for `mode`.
    pub fn load_config(&self, mode: Mode) -> LoadResult<BattleConfig> {
        Ok(self.load_config_spec()?.build(mode))
    }

    /// Load reward tables from `rewards.toml`, or the built-in defaults when absent.
    pub fn load_rewards(&self) -> LoadResult<RewardTables> {
        let path = self.data_dir.join(Self::REWARDS_FILE);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "rewards file not found, using default table");
            return Ok(RewardTables::default());
        }
        RewardTableLoader::load(&path)
    }

    /// Reward table for a named battle context (or the default table).
    pub fn load_reward_table(&self, context: Option<&str>) -> LoadResult<RewardTable> {
        self.load_rewards()?.resolve(context)
    }

    /// Load the roster from `roster.toml`. The roster is required.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        let path = self.data_dir.join(Self::ROSTER_FILE);
        RosterLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
