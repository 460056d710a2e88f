//! Environment-driven CLI configuration.
use std::env;
use std::path::PathBuf;

/// Settings read from the environment, overridable per command.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub reward_context: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            reward_context: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOLOBOT_DATA_DIR` - Directory holding roster/config/rewards TOML (default: `./data`)
    /// - `HOLOBOT_REWARD_CONTEXT` - Default reward context (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("HOLOBOT_DATA_DIR") {
            config.data_dir = dir;
        }
        config.reward_context = read_env::<String>("HOLOBOT_REWARD_CONTEXT")
            .filter(|context| !context.trim().is_empty());

        config
    }

    /// Command-line flag wins over the environment.
    pub fn data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.data_dir.clone())
    }

    pub fn reward_context(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.reward_context.clone())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
