//! Coefficient presets for the two battle modes.
//!
//! Interactive play and asynchronous auto-run resolution were calibrated
//! separately, and their probability formulas differ. Both are kept as named
//! presets; the scheduler's control flow is shared and only these constants
//! change.

use crate::config::Mode;

/// Evasion: `min(cap, base + max(0, defender.speed - attacker.speed) * per_speed)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvasionCoefficients {
    pub base: f64,
    pub per_speed: f64,
    pub cap: f64,
}

/// Counter chance: weighted sum of the defender's own stats, capped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterCoefficients {
    pub defense: f64,
    pub speed: f64,
    pub intelligence: f64,
    pub cap: f64,
}

/// How counter-attack damage is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CounterDamage {
    /// `attack * attack_weight + defense * defense_weight + speed * speed_weight`
    /// of the counterer, independent of the target.
    StatBlend {
        attack_weight: f64,
        defense_weight: f64,
        speed_weight: f64,
    },
    /// A scaled normal attack from the counterer against the target.
    ScaledAttack { factor: f64 },
}

/// When a side with at least a partial special gauge uses its special move.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SpecialTrigger {
    /// Only when the side's command asks for it.
    OnCommand,
    /// On command, or automatically with probability `chance` once the round
    /// number is strictly greater than `after_round`.
    Random { after_round: u32, chance: f64 },
}

/// The complete coefficient set injected into the turn scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ruleset {
    pub evasion: EvasionCoefficients,
    pub counter_chance: CounterCoefficients,
    pub counter_damage: CounterDamage,
    pub special_trigger: SpecialTrigger,
    /// Damage multiplier applied by the one-shot pending special attack.
    pub pending_special_multiplier: f64,
    /// Defense weight in the attack damage formula.
    pub defense_factor: f64,
}

impl Ruleset {
    /// Coefficients used for live, stepped play.
    pub const INTERACTIVE: Ruleset = Ruleset {
        evasion: EvasionCoefficients {
            base: 0.05,
            per_speed: 0.015,
            cap: 0.40,
        },
        counter_chance: CounterCoefficients {
            defense: 0.025,
            speed: 0.02,
            intelligence: 0.0,
            cap: 0.45,
        },
        counter_damage: CounterDamage::StatBlend {
            attack_weight: 0.8,
            defense_weight: 0.3,
            speed_weight: 0.2,
        },
        special_trigger: SpecialTrigger::OnCommand,
        pending_special_multiplier: 2.5,
        defense_factor: 0.5,
    };

    /// Coefficients used for asynchronous auto-run resolution.
    pub const AUTO_RUN: Ruleset = Ruleset {
        evasion: EvasionCoefficients {
            base: 0.05,
            per_speed: 0.01,
            cap: 0.30,
        },
        counter_chance: CounterCoefficients {
            defense: 0.02,
            speed: 0.0,
            intelligence: 0.01,
            cap: 0.25,
        },
        counter_damage: CounterDamage::ScaledAttack { factor: 0.7 },
        special_trigger: SpecialTrigger::Random {
            after_round: 2,
            chance: 0.20,
        },
        pending_special_multiplier: 2.5,
        defense_factor: 0.5,
    };

    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Stepped => Self::INTERACTIVE,
            Mode::AutoRun => Self::AUTO_RUN,
        }
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::AUTO_RUN
    }
}
