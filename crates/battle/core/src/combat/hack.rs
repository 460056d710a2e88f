//! Hack effects and holos-hack overcharges.
//!
//! Hacks draw on their own gauge, which must be full: every hack costs 100
//! and there is no partial tier. Holos hacks cost no gauge but are bounded
//! per battle by the combatant's overcharge cap. A refused action leaves both
//! gauges and every stat untouched.

use crate::config::BattleConfig;
use crate::combat::EffectRecord;
use crate::combat::calc::floor_damage;
use crate::error::{EngineError, ErrorSeverity};
use crate::state::CombatantState;

/// Fixed hack catalog.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HackEffect {
    /// +15 attack for 3 turns.
    Boost,
    /// Restore 40% of max health.
    Heal,
    /// Arm the one-shot damage multiplier and add +10 attack.
    SpecialAttack,
    /// +30% of base defense for 2 turns.
    RaiseDefense,
    /// +40% of base speed for 2 turns.
    RaiseSpeed,
}

impl HackEffect {
    pub const BOOST_ATTACK: f64 = 15.0;
    pub const BOOST_TURNS: u32 = 3;
    pub const HEAL_RATIO: f64 = 0.40;
    pub const SPECIAL_ATTACK_BOOST: f64 = 10.0;
    pub const RAISE_DEFENSE_RATIO: f64 = 0.30;
    pub const RAISE_SPEED_RATIO: f64 = 0.40;
    pub const RAISE_TURNS: u32 = 2;
}

/// Overcharge variants. Mutually exclusive per use.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HolosHack {
    /// Fill the special gauge to 100.
    FillSpecial,
    /// Fill the hack gauge to 100.
    FillHack,
    /// +20 attack, +30% defense and +30% speed for 3 turns.
    Overdrive,
}

impl HolosHack {
    pub const OVERDRIVE_ATTACK: f64 = 20.0;
    pub const OVERDRIVE_DEFENSE_RATIO: f64 = 0.30;
    pub const OVERDRIVE_SPEED_RATIO: f64 = 0.30;
    pub const OVERDRIVE_TURNS: u32 = 3;
}

/// A hack was requested without a full hack gauge.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HackError {
    #[error("{name} cannot hack: gauge at {gauge}, needs {required}")]
    GaugeNotFull {
        name: String,
        gauge: f64,
        required: f64,
    },
}

impl EngineError for HackError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GaugeNotFull { .. } => "HACK_GAUGE_NOT_FULL",
        }
    }
}

/// An overcharge was requested past the per-battle cap.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HolosHackError {
    #[error("{name} has used all {max} overcharges")]
    Exhausted { name: String, max: u8 },
}

impl EngineError for HolosHackError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "HOLOS_HACK_EXHAUSTED",
        }
    }
}

/// Spend a full hack gauge on `effect`.
pub fn apply_hack(user: &mut CombatantState, effect: HackEffect) -> Result<EffectRecord, HackError> {
    if !user.consume_hack_gauge(BattleConfig::HACK_COST) {
        return Err(HackError::GaugeNotFull {
            name: user.name().to_string(),
            gauge: user.hack_gauge(),
            required: BattleConfig::HACK_COST,
        });
    }

    let name = user.name().to_string();
    let record = match effect {
        HackEffect::Boost => {
            user.boost_attack(HackEffect::BOOST_ATTACK, HackEffect::BOOST_TURNS);
            EffectRecord::on_user(format!(
                "{name} gains +{} attack for {} turns",
                HackEffect::BOOST_ATTACK,
                HackEffect::BOOST_TURNS
            ))
        }
        HackEffect::Heal => {
            let amount = floor_damage(f64::from(user.max_health()) * HackEffect::HEAL_RATIO);
            let healed = user.heal(amount);
            EffectRecord {
                healed,
                ..EffectRecord::on_user(format!("{name} restores {healed} health"))
            }
        }
        HackEffect::SpecialAttack => {
            user.set_pending_special_attack(true);
            user.add_permanent_attack_boost(HackEffect::SPECIAL_ATTACK_BOOST);
            EffectRecord::on_user(format!(
                "{name} charges a special attack (+{} attack)",
                HackEffect::SPECIAL_ATTACK_BOOST
            ))
        }
        HackEffect::RaiseDefense => {
            let amount = user.baseline().defense * HackEffect::RAISE_DEFENSE_RATIO;
            user.boost_defense(amount, HackEffect::RAISE_TURNS);
            EffectRecord::on_user(format!(
                "{name} gains +{amount:.1} defense for {} turns",
                HackEffect::RAISE_TURNS
            ))
        }
        HackEffect::RaiseSpeed => {
            let amount = user.baseline().speed * HackEffect::RAISE_SPEED_RATIO;
            user.boost_speed(amount, HackEffect::RAISE_TURNS);
            EffectRecord::on_user(format!(
                "{name} gains +{amount:.1} speed for {} turns",
                HackEffect::RAISE_TURNS
            ))
        }
    };

    Ok(record)
}

/// Use one overcharge. Fails with [`HolosHackError::Exhausted`] and no state
/// change once the cap is reached.
pub fn apply_holos_hack(
    user: &mut CombatantState,
    variant: HolosHack,
) -> Result<EffectRecord, HolosHackError> {
    if !user.increment_holos_hack() {
        return Err(HolosHackError::Exhausted {
            name: user.name().to_string(),
            max: user.max_holos_hacks(),
        });
    }

    let name = user.name().to_string();
    let record = match variant {
        HolosHack::FillSpecial => {
            user.fill_special_gauge();
            EffectRecord::on_user(format!("{name} overcharges the special gauge"))
        }
        HolosHack::FillHack => {
            user.fill_hack_gauge();
            EffectRecord::on_user(format!("{name} overcharges the hack gauge"))
        }
        HolosHack::Overdrive => {
            let defense = user.baseline().defense * HolosHack::OVERDRIVE_DEFENSE_RATIO;
            let speed = user.baseline().speed * HolosHack::OVERDRIVE_SPEED_RATIO;
            user.boost_attack(HolosHack::OVERDRIVE_ATTACK, HolosHack::OVERDRIVE_TURNS);
            user.boost_defense(defense, HolosHack::OVERDRIVE_TURNS);
            user.boost_speed(speed, HolosHack::OVERDRIVE_TURNS);
            EffectRecord::on_user(format!(
                "{name} enters overdrive for {} turns",
                HolosHack::OVERDRIVE_TURNS
            ))
        }
    };

    Ok(record)
}
