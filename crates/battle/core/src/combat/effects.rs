//! Special move catalog and resolver.
//!
//! Special moves form a closed set keyed by the combatant's special move id.
//! Using one consumes special gauge: a full gauge (100) spends 100 and grants
//! the full-strength effect, a partial gauge (at least 50) spends 50 and
//! grants half strength. An id outside the catalog resolves to a no-op
//! effect; it never fails the battle.

use crate::combat::calc::floor_damage;
use crate::config::BattleConfig;
use crate::state::CombatantState;

/// Closed catalog of special moves.
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
#[strum(ascii_case_insensitive)]
pub enum SpecialMove {
    /// Permanent attack boost for the rest of the battle.
    #[strum(to_string = "1st Strike", serialize = "first_strike")]
    #[cfg_attr(feature = "serde", serde(rename = "1st Strike"))]
    FirstStrike,

    /// Bleed damage that bypasses defense.
    #[strum(to_string = "Sharp Claws", serialize = "sharp_claws")]
    #[cfg_attr(feature = "serde", serde(rename = "Sharp Claws"))]
    SharpClaws,

    /// Permanently lowers the opponent's defense.
    #[strum(to_string = "Smokescreen", serialize = "smokescreen")]
    #[cfg_attr(feature = "serde", serde(rename = "Smokescreen"))]
    Smokescreen,
}

impl SpecialMove {
    pub const FIRST_STRIKE_ATTACK_BOOST: f64 = 5.0;
    pub const SHARP_CLAWS_BLEED_RATIO: f64 = 0.30;
    pub const SMOKESCREEN_DEFENSE_DROP: f64 = 2.0;
}

/// Strength a special move resolves at, decided by the gauge level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpecialTier {
    Partial,
    Full,
}

impl SpecialTier {
    /// Tier available at `gauge`, if any.
    pub fn for_gauge(gauge: f64) -> Option<Self> {
        if gauge >= BattleConfig::FULL_SPECIAL_COST {
            Some(Self::Full)
        } else if gauge >= BattleConfig::PARTIAL_SPECIAL_COST {
            Some(Self::Partial)
        } else {
            None
        }
    }

    pub const fn cost(self) -> f64 {
        match self {
            Self::Partial => BattleConfig::PARTIAL_SPECIAL_COST,
            Self::Full => BattleConfig::FULL_SPECIAL_COST,
        }
    }

    /// Effect strength multiplier.
    pub const fn scale(self) -> f64 {
        match self {
            Self::Partial => 0.5,
            Self::Full => 1.0,
        }
    }
}

/// Which side an effect landed on, relative to its user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    User,
    Opponent,
}

/// Descriptive result of one resolved effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub target: EffectTarget,
    /// Immediate damage dealt to the opponent.
    pub damage: u32,
    /// Health restored to the user.
    pub healed: u32,
    pub description: String,
}

impl EffectRecord {
    pub(crate) fn on_user(description: impl Into<String>) -> Self {
        Self {
            target: EffectTarget::User,
            damage: 0,
            healed: 0,
            description: description.into(),
        }
    }

    pub(crate) fn on_opponent(description: impl Into<String>) -> Self {
        Self {
            target: EffectTarget::Opponent,
            ..Self::on_user(description)
        }
    }
}

/// Resolve `user`'s special move against `opponent`.
///
/// Returns `None` without touching either side when the gauge is below the
/// partial threshold. Otherwise the gauge is charged for the tier and the
/// effect is applied; an uncatalogued move spends the gauge and does nothing.
pub fn resolve_special(
    user: &mut CombatantState,
    opponent: &mut CombatantState,
) -> Option<(SpecialTier, EffectRecord)> {
    let tier = SpecialTier::for_gauge(user.special_gauge())?;
    if !user.consume_special_gauge(tier.cost()) {
        return None;
    }
    let scale = tier.scale();

    let record = match user.special_move() {
        Some(SpecialMove::FirstStrike) => {
            let boost = SpecialMove::FIRST_STRIKE_ATTACK_BOOST * scale;
            user.add_permanent_attack_boost(boost);
            EffectRecord::on_user(format!("{} gains +{boost} attack", user.name()))
        }
        Some(SpecialMove::SharpClaws) => {
            let bleed = floor_damage(user.attack() * SpecialMove::SHARP_CLAWS_BLEED_RATIO * scale);
            let dealt = opponent.take_damage(bleed);
            EffectRecord {
                damage: dealt,
                ..EffectRecord::on_opponent(format!("{} bleeds for {dealt}", opponent.name()))
            }
        }
        Some(SpecialMove::Smokescreen) => {
            let drop = SpecialMove::SMOKESCREEN_DEFENSE_DROP * scale;
            opponent.shift_defense(-drop);
            EffectRecord::on_opponent(format!("{} loses {drop} defense", opponent.name()))
        }
        None => EffectRecord::on_user(format!(
            "'{}' has no effect",
            user.special_move_id()
        )),
    };

    Some((tier, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CombatantSetup;
    use crate::stats::BaseStats;

    fn pair(special_move: &str) -> (CombatantState, CombatantState) {
        let config = BattleConfig::default();
        let user = BaseStats::new("User", 40, 20, 20, 100).with_special_move(special_move);
        let foe = BaseStats::new("Foe", 40, 20, 20, 100);
        let (user, _) = CombatantState::prepare(&CombatantSetup::new(user), &config).expect("user");
        let (foe, _) = CombatantState::prepare(&CombatantSetup::new(foe), &config).expect("foe");
        (user, foe)
    }

    #[test]
    fn catalog_parses_display_names_and_ids() {
        assert_eq!("1st Strike".parse::<SpecialMove>().ok(), Some(SpecialMove::FirstStrike));
        assert_eq!("sharp claws".parse::<SpecialMove>().ok(), Some(SpecialMove::SharpClaws));
        assert_eq!("smokescreen".parse::<SpecialMove>().ok(), Some(SpecialMove::Smokescreen));
        assert_eq!(SpecialMove::FirstStrike.to_string(), "1st Strike");
        assert!("Laser Eyes".parse::<SpecialMove>().is_err());
    }

    #[test]
    fn gauge_below_partial_does_nothing() {
        let (mut user, mut foe) = pair("1st Strike");
        user.add_special_gauge(49.0);
        assert!(resolve_special(&mut user, &mut foe).is_none());
        assert_eq!(user.special_gauge(), 49.0);
    }

    #[test]
    fn first_strike_full_and_partial() {
        let (mut user, mut foe) = pair("1st Strike");
        user.fill_special_gauge();
        let (tier, _) = resolve_special(&mut user, &mut foe).expect("full");
        assert_eq!(tier, SpecialTier::Full);
        assert_eq!(user.attack_boost(), 5.0);
        assert_eq!(user.special_gauge(), 0.0);

        user.add_special_gauge(70.0);
        let (tier, _) = resolve_special(&mut user, &mut foe).expect("partial");
        assert_eq!(tier, SpecialTier::Partial);
        assert_eq!(user.attack_boost(), 7.5);
        assert_eq!(user.special_gauge(), 20.0);

        // Permanent: survives timer ticks.
        user.tick_boosts();
        assert_eq!(user.attack_boost(), 7.5);
    }

    #[test]
    fn sharp_claws_bypasses_defense() {
        let (mut user, mut foe) = pair("Sharp Claws");
        user.fill_special_gauge();
        let (_, record) = resolve_special(&mut user, &mut foe).expect("full");
        // 30% of 40
        assert_eq!(record.damage, 12);
        assert_eq!(foe.health(), 88);
        assert_eq!(record.target, EffectTarget::Opponent);

        user.add_special_gauge(50.0);
        let (_, record) = resolve_special(&mut user, &mut foe).expect("partial");
        assert_eq!(record.damage, 6);
    }

    #[test]
    fn smokescreen_lowers_defense_permanently() {
        let (mut user, mut foe) = pair("Smokescreen");
        user.fill_special_gauge();
        resolve_special(&mut user, &mut foe);
        assert_eq!(foe.defense(), 18.0);

        foe.boost_defense(6.0, 1);
        foe.tick_boosts();
        assert_eq!(foe.defense(), 18.0);
    }

    #[test]
    fn unknown_move_spends_gauge_without_effect() {
        let (mut user, mut foe) = pair("Laser Eyes");
        user.fill_special_gauge();
        let (_, record) = resolve_special(&mut user, &mut foe).expect("resolved");
        assert_eq!(record.damage, 0);
        assert!(record.description.contains("no effect"));
        assert_eq!(foe.health(), 100);
        assert_eq!(user.attack_boost(), 0.0);
    }
}
