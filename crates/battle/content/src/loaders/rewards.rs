//! Reward table loader.
//!
//! ```toml
//! [default]
//! winner = { currency = 100, exp = 200, rating_delta = 25 }
//! loser = { currency = 25, exp = 50, rating_delta = -10 }
//! draw = { currency = 50, exp = 100, rating_delta = 0 }
//!
//! [contexts.league]
//! winner = { currency = 250, exp = 300, rating_delta = 30 }
//! loser = { currency = 40, exp = 80, rating_delta = -15 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::RewardTable;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// The default table plus any named battle contexts.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewardTables {
    #[serde(default)]
    pub default: RewardTable,
    #[serde(default)]
    pub contexts: BTreeMap<String, RewardTable>,
}

impl Default for RewardTables {
    fn default() -> Self {
        Self {
            default: RewardTable::DEFAULT,
            contexts: BTreeMap::new(),
        }
    }
}

impl RewardTables {
    pub fn context(&self, name: &str) -> Option<&RewardTable> {
        self.contexts.get(name)
    }

    /// Table for `context`, or the default table when none is requested.
    pub fn resolve(&self, context: Option<&str>) -> LoadResult<RewardTable> {
        match context {
            None => Ok(self.default),
            Some(name) => self.context(name).copied().ok_or_else(|| {
                let known: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
                anyhow::anyhow!(
                    "Unknown reward context '{}' (known: {})",
                    name,
                    known.join(", ")
                )
            }),
        }
    }

    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

/// Loader for reward tables from TOML files.
pub struct RewardTableLoader;

impl RewardTableLoader {
    pub fn load(path: &Path) -> LoadResult<RewardTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RewardTables> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse rewards TOML: {}", e))
    }
}
