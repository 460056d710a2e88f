//! Battle configuration loader.
//!
//! `config.toml` overrides the engine defaults. Every key is optional; an
//! empty file yields [`BattleConfig::for_mode`] unchanged.
//!
//! ```toml
//! max_holos_hacks = 3
//!
//! [gauges]
//! special_per_round = 10
//! hack_per_round = 5
//! defense_mode_multiplier = 1.5
//!
//! [auto_run]
//! round_cap = 50
//!
//! [stepped]
//! round_cap = 100
//! ```

use std::path::Path;

use battle_core::{BattleConfig, Mode, Ruleset};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Gauge accrual overrides shared by both modes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaugeSpec {
    pub special_per_round: Option<u32>,
    pub hack_per_round: Option<u32>,
    pub defense_mode_multiplier: Option<f64>,
}

/// Per-mode overrides.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModeSpec {
    pub round_cap: Option<u32>,
    /// Replaces the mode's preset coefficients wholesale.
    pub ruleset: Option<Ruleset>,
}

/// Parsed contents of `config.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigSpec {
    pub max_holos_hacks: Option<u8>,
    pub gauges: GaugeSpec,
    pub auto_run: ModeSpec,
    pub stepped: ModeSpec,
}

impl ConfigSpec {
    /// Engine configuration for `mode`, with this file's overrides applied.
    pub fn build(&self, mode: Mode) -> BattleConfig {
        let mut config = BattleConfig::for_mode(mode);
        let overrides = match mode {
            Mode::AutoRun => &self.auto_run,
            Mode::Stepped => &self.stepped,
        };

        if let Some(round_cap) = overrides.round_cap {
            config = config.with_round_cap(round_cap);
        }
        if let Some(ruleset) = overrides.ruleset {
            config = config.with_ruleset(ruleset);
        }
        let special = self
            .gauges
            .special_per_round
            .unwrap_or(config.special_gauge_per_round);
        let hack = self.gauges.hack_per_round.unwrap_or(config.hack_gauge_per_round);
        config = config.with_gauge_rates(special, hack);
        if let Some(multiplier) = self.gauges.defense_mode_multiplier {
            config = config.with_defense_mode_multiplier(multiplier);
        }
        if let Some(max) = self.max_holos_hacks {
            config = config.with_max_holos_hacks(max);
        }
        config
    }

    fn validate(&self) -> LoadResult<()> {
        if let Some(multiplier) = self.gauges.defense_mode_multiplier {
            if !multiplier.is_finite() || multiplier < 0.0 {
                anyhow::bail!("defense_mode_multiplier must be a non-negative number, got {multiplier}");
            }
        }
        for (mode, spec) in [("auto_run", &self.auto_run), ("stepped", &self.stepped)] {
            if spec.round_cap == Some(0) {
                anyhow::bail!("[{mode}] round_cap must be at least 1");
            }
        }
        Ok(())
    }
}

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config overrides from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ConfigSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config overrides from TOML text.
    pub fn parse(content: &str) -> LoadResult<ConfigSpec> {
        let spec: ConfigSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        spec.validate()?;
        Ok(spec)
    }
}
