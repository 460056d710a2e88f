//! Fitness bonus adapter.
//!
//! Maps a daily step count to a bundle of flat stat and gauge modifiers. The
//! tiers are cumulative: every threshold at or below the step count grants
//! its bonus independently.
//!
//! | steps  | bonus                                           |
//! |--------|-------------------------------------------------|
//! | ≥ 2000 | +5% of max health                               |
//! | ≥ 4000 | +3% of attack                                   |
//! | ≥ 6000 | +10 special gauge fill per round                |
//! | ≥ 8000 | +5% of attack added to attack, defense and speed|
//!
//! Percentages are taken from the snapshot the bonus is computed against and
//! floored, so evaluating the tiers in any order yields the same bundle. The
//! bundle is folded into a combatant exactly once, at construction.

/// A fitness threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FitnessTier {
    Vitality,
    Power,
    Charge,
    Peak,
}

impl FitnessTier {
    pub const fn threshold(self) -> u64 {
        match self {
            Self::Vitality => 2_000,
            Self::Power => 4_000,
            Self::Charge => 6_000,
            Self::Peak => 8_000,
        }
    }

    /// All tiers unlocked by `steps`.
    pub fn unlocked(steps: u64) -> impl Iterator<Item = FitnessTier> {
        <Self as strum::IntoEnumIterator>::iter().filter(move |tier| steps >= tier.threshold())
    }
}

/// Percent of max health granted by [`FitnessTier::Vitality`].
pub const HP_BONUS_PERCENT: i64 = 5;
/// Percent of attack granted by [`FitnessTier::Power`].
pub const ATTACK_BONUS_PERCENT: i64 = 3;
/// Flat special gauge fill bonus granted by [`FitnessTier::Charge`].
pub const SPECIAL_CHARGE_BONUS: u32 = 10;
/// Percent of attack added to attack, defense and speed by [`FitnessTier::Peak`].
pub const ALL_STATS_BONUS_PERCENT: i64 = 5;

/// Flat modifiers derived from one step count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessBonus {
    pub hp_bonus_flat: Option<u32>,
    pub attack_bonus_flat: Option<u32>,
    pub all_stats_bonus_flat: Option<u32>,
    pub special_charge_bonus_flat: Option<u32>,
}

impl FitnessBonus {
    /// Compute the bonus bundle for `steps` against a pre-fitness snapshot.
    ///
    /// Pure: the same inputs always produce the same bundle.
    pub fn from_steps(steps: u64, max_health: i32, attack: i32) -> Self {
        let mut bonus = Self::default();
        for tier in FitnessTier::unlocked(steps) {
            match tier {
                FitnessTier::Vitality => {
                    bonus.hp_bonus_flat = Some(percent_of(max_health, HP_BONUS_PERCENT));
                }
                FitnessTier::Power => {
                    bonus.attack_bonus_flat = Some(percent_of(attack, ATTACK_BONUS_PERCENT));
                }
                FitnessTier::Charge => {
                    bonus.special_charge_bonus_flat = Some(SPECIAL_CHARGE_BONUS);
                }
                FitnessTier::Peak => {
                    bonus.all_stats_bonus_flat = Some(percent_of(attack, ALL_STATS_BONUS_PERCENT));
                }
            }
        }
        bonus
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn max_health_delta(&self) -> i32 {
        to_i32(self.hp_bonus_flat)
    }

    pub fn attack_delta(&self) -> i32 {
        to_i32(self.attack_bonus_flat).saturating_add(to_i32(self.all_stats_bonus_flat))
    }

    pub fn defense_delta(&self) -> i32 {
        to_i32(self.all_stats_bonus_flat)
    }

    pub fn speed_delta(&self) -> i32 {
        to_i32(self.all_stats_bonus_flat)
    }

    pub fn special_charge_per_round(&self) -> u32 {
        self.special_charge_bonus_flat.unwrap_or(0)
    }
}

/// Interpret a raw step count. Negative counts are treated as zero steps.
///
/// Returns the usable count and whether the input had to be corrected.
pub fn sanitize_steps(raw: i64) -> (u64, bool) {
    if raw < 0 { (0, true) } else { (raw as u64, false) }
}

fn percent_of(value: i32, percent: i64) -> u32 {
    let value = i64::from(value.max(0));
    (value * percent / 100) as u32
}

fn to_i32(value: Option<u32>) -> i32 {
    value.map_or(0, |v| i32::try_from(v).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_steps_no_bonus() {
        assert!(FitnessBonus::from_steps(0, 100, 50).is_empty());
        assert!(FitnessBonus::from_steps(1_999, 100, 50).is_empty());
    }

    #[test]
    fn tiers_are_cumulative() {
        let bonus = FitnessBonus::from_steps(9_000, 100, 50);
        assert_eq!(bonus.hp_bonus_flat, Some(5));
        assert_eq!(bonus.attack_bonus_flat, Some(1));
        assert_eq!(bonus.special_charge_bonus_flat, Some(10));
        assert_eq!(bonus.all_stats_bonus_flat, Some(2));
    }

    #[test]
    fn each_threshold_is_inclusive() {
        assert!(FitnessBonus::from_steps(2_000, 100, 50).hp_bonus_flat.is_some());
        assert!(FitnessBonus::from_steps(4_000, 100, 50).attack_bonus_flat.is_some());
        assert!(
            FitnessBonus::from_steps(6_000, 100, 50)
                .special_charge_bonus_flat
                .is_some()
        );
        assert!(FitnessBonus::from_steps(8_000, 100, 50).all_stats_bonus_flat.is_some());
        assert!(FitnessBonus::from_steps(7_999, 100, 50).all_stats_bonus_flat.is_none());
    }

    #[test]
    fn percentages_are_floored() {
        // 3% of 99 = 2.97, 5% of 99 = 4.95
        let bonus = FitnessBonus::from_steps(8_000, 99, 99);
        assert_eq!(bonus.hp_bonus_flat, Some(4));
        assert_eq!(bonus.attack_bonus_flat, Some(2));
        assert_eq!(bonus.all_stats_bonus_flat, Some(4));
    }

    #[test]
    fn attack_tiers_compose_additively() {
        let bonus = FitnessBonus::from_steps(8_000, 100, 200);
        // 3% of 200 + 5% of 200
        assert_eq!(bonus.attack_delta(), 6 + 10);
        assert_eq!(bonus.defense_delta(), 10);
        assert_eq!(bonus.speed_delta(), 10);
    }

    #[test]
    fn negative_steps_are_sanitized() {
        assert_eq!(sanitize_steps(-5), (0, true));
        assert_eq!(sanitize_steps(4_200), (4_200, false));
    }

    #[test]
    fn unlocked_tiers_follow_thresholds() {
        let tiers: Vec<_> = FitnessTier::unlocked(6_500).collect();
        assert_eq!(
            tiers,
            vec![FitnessTier::Vitality, FitnessTier::Power, FitnessTier::Charge]
        );
    }
}
