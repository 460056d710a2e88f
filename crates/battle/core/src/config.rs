use crate::combat::Ruleset;
use crate::error::{EngineError, ErrorSeverity};

/// How a battle is driven.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    /// The caller resolves one round per call (live play).
    Stepped,
    /// The engine plays to a terminal state in one call.
    #[default]
    AutoRun,
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    pub mode: Mode,
    pub ruleset: Ruleset,
    /// Hard cap on rounds. Reaching it forces a terminal state.
    pub round_cap: u32,
    /// Special gauge gained by each side at the end of every round.
    pub special_gauge_per_round: u32,
    /// Hack gauge gained by each side at the end of every round.
    pub hack_gauge_per_round: u32,
    /// Multiplier on gauge gains while a side is in defense mode.
    pub defense_mode_multiplier: f64,
    /// Overcharges allowed per side per battle.
    pub max_holos_hacks: u8,
}

impl BattleConfig {
    // ===== gauge economy =====
    pub const GAUGE_MAX: f64 = 100.0;
    pub const PARTIAL_SPECIAL_COST: f64 = 50.0;
    pub const FULL_SPECIAL_COST: f64 = 100.0;
    pub const HACK_COST: f64 = 100.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_AUTO_RUN_ROUND_CAP: u32 = 50;
    pub const DEFAULT_STEPPED_ROUND_CAP: u32 = 100;
    pub const DEFAULT_SPECIAL_GAUGE_PER_ROUND: u32 = 10;
    pub const DEFAULT_HACK_GAUGE_PER_ROUND: u32 = 5;
    pub const DEFAULT_DEFENSE_MODE_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_MAX_HOLOS_HACKS: u8 = 3;

    pub fn for_mode(mode: Mode) -> Self {
        let round_cap = match mode {
            Mode::Stepped => Self::DEFAULT_STEPPED_ROUND_CAP,
            Mode::AutoRun => Self::DEFAULT_AUTO_RUN_ROUND_CAP,
        };
        Self {
            mode,
            ruleset: Ruleset::for_mode(mode),
            round_cap,
            special_gauge_per_round: Self::DEFAULT_SPECIAL_GAUGE_PER_ROUND,
            hack_gauge_per_round: Self::DEFAULT_HACK_GAUGE_PER_ROUND,
            defense_mode_multiplier: Self::DEFAULT_DEFENSE_MODE_MULTIPLIER,
            max_holos_hacks: Self::DEFAULT_MAX_HOLOS_HACKS,
        }
    }

    pub fn stepped() -> Self {
        Self::for_mode(Mode::Stepped)
    }

    pub fn auto_run() -> Self {
        Self::for_mode(Mode::AutoRun)
    }

    /// A cap of zero is raised to one so that a battle always makes progress.
    #[must_use]
    pub fn with_round_cap(mut self, round_cap: u32) -> Self {
        self.round_cap = round_cap.max(1);
        self
    }

    #[must_use]
    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    #[must_use]
    pub fn with_gauge_rates(mut self, special: u32, hack: u32) -> Self {
        self.special_gauge_per_round = special;
        self.hack_gauge_per_round = hack;
        self
    }

    #[must_use]
    pub fn with_defense_mode_multiplier(mut self, multiplier: f64) -> Self {
        self.defense_mode_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_max_holos_hacks(mut self, max: u8) -> Self {
        self.max_holos_hacks = max;
        self
    }
}

/// A configuration that cannot drive a battle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidConfig {
    #[error("round cap must be at least 1")]
    ZeroRoundCap,

    #[error("defense mode multiplier must be a finite non-negative number (got {value})")]
    DefenseModeMultiplier { value: f64 },
}

impl EngineError for InvalidConfig {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroRoundCap => "CONFIG_ZERO_ROUND_CAP",
            Self::DefenseModeMultiplier { .. } => "CONFIG_DEFENSE_MODE_MULTIPLIER",
        }
    }
}

impl BattleConfig {
    /// Checked by the runner before any combatant is prepared.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.round_cap == 0 {
            return Err(InvalidConfig::ZeroRoundCap);
        }
        let multiplier = self.defense_mode_multiplier;
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(InvalidConfig::DefenseModeMultiplier { value: multiplier });
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::auto_run()
    }
}
