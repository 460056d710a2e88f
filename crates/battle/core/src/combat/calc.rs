//! Damage and chance calculation.
//!
//! Pure functions over two combatant snapshots. Nothing here mutates state or
//! draws randomness; the scheduler rolls against the probabilities returned
//! here and applies the floored damage.

use crate::combat::{CounterDamage, Ruleset};
use crate::state::CombatantState;

// ============================================================================
// Attack Damage
// ============================================================================

/// Attack damage before the pending special multiplier.
///
/// ```text
/// max(0, (attack + attack_boost) - defender.defense * defense_factor)
/// ```
pub fn base_attack_damage(
    attacker: &CombatantState,
    defender: &CombatantState,
    ruleset: &Ruleset,
) -> f64 {
    (attacker.effective_attack() - defender.defense() * ruleset.defense_factor).max(0.0)
}

/// Damage of a normal attack, floored.
///
/// If the attacker holds the one-shot pending special flag the damage is
/// multiplied by [`Ruleset::pending_special_multiplier`]. Clearing the flag is
/// the scheduler's job.
pub fn attack_damage(
    attacker: &CombatantState,
    defender: &CombatantState,
    ruleset: &Ruleset,
) -> u32 {
    let mut damage = base_attack_damage(attacker, defender, ruleset);
    if attacker.pending_special_attack() {
        damage *= ruleset.pending_special_multiplier;
    }
    floor_damage(damage)
}

// ============================================================================
// Evasion
// ============================================================================

/// Probability that `defender` evades an attack from `attacker`.
///
/// Always within `[base, cap]` of the ruleset's evasion coefficients.
pub fn evasion_chance(
    defender: &CombatantState,
    attacker: &CombatantState,
    ruleset: &Ruleset,
) -> f64 {
    let coefficients = ruleset.evasion;
    let speed_diff = (defender.speed() - attacker.speed()).max(0.0);
    (coefficients.base + speed_diff * coefficients.per_speed).min(coefficients.cap)
}

// ============================================================================
// Counter-attack
// ============================================================================

/// Probability that `defender` counters after surviving a hit.
///
/// A weighted sum of the defender's own stats, within `[0, cap]`.
pub fn counter_chance(defender: &CombatantState, ruleset: &Ruleset) -> f64 {
    let c = ruleset.counter_chance;
    let weighted = defender.defense() * c.defense
        + defender.speed() * c.speed
        + defender.intelligence() * c.intelligence;
    weighted.clamp(0.0, c.cap)
}

/// Damage dealt by `counterer` when it counters `target`, floored.
pub fn counter_damage(
    counterer: &CombatantState,
    target: &CombatantState,
    ruleset: &Ruleset,
) -> u32 {
    let damage = match ruleset.counter_damage {
        CounterDamage::StatBlend {
            attack_weight,
            defense_weight,
            speed_weight,
        } => {
            counterer.effective_attack() * attack_weight
                + counterer.defense() * defense_weight
                + counterer.speed() * speed_weight
        }
        CounterDamage::ScaledAttack { factor } => {
            base_attack_damage(counterer, target, ruleset) * factor
        }
    };
    floor_damage(damage)
}

pub(crate) fn floor_damage(damage: f64) -> u32 {
    if damage.is_finite() && damage > 0.0 {
        damage.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::BattleConfig;
    use crate::state::CombatantSetup;
    use crate::stats::BaseStats;

    fn combatant(attack: i32, defense: i32, speed: i32) -> CombatantState {
        let stats = BaseStats::new("Bot", attack, defense, speed, 100).with_intelligence(10);
        let (state, _) = CombatantState::prepare(&CombatantSetup::new(stats), &BattleConfig::default())
            .expect("valid stats");
        state
    }

    #[test]
    fn attack_subtracts_half_defense() {
        let a = combatant(50, 30, 40);
        let b = combatant(40, 40, 30);
        assert_eq!(attack_damage(&a, &b, &Ruleset::INTERACTIVE), 30);
        assert_eq!(attack_damage(&b, &a, &Ruleset::AUTO_RUN), 25);
    }

    #[test]
    fn attack_never_goes_negative() {
        let weak = combatant(5, 10, 10);
        let wall = combatant(10, 200, 10);
        assert_eq!(attack_damage(&weak, &wall, &Ruleset::AUTO_RUN), 0);
    }

    #[test]
    fn pending_special_multiplies_damage() {
        let mut a = combatant(50, 30, 40);
        let b = combatant(40, 40, 30);
        a.set_pending_special_attack(true);
        assert_eq!(attack_damage(&a, &b, &Ruleset::INTERACTIVE), 75);
        // The calculator reads the flag but never clears it.
        assert!(a.pending_special_attack());
    }

    #[test]
    fn interactive_evasion_scales_with_speed_gap() {
        let slow = combatant(10, 10, 30);
        let fast = combatant(10, 10, 40);
        let chance = evasion_chance(&fast, &slow, &Ruleset::INTERACTIVE);
        assert!((chance - 0.20).abs() < 1e-9);
        // Slower defenders get only the base chance.
        let chance = evasion_chance(&slow, &fast, &Ruleset::INTERACTIVE);
        assert!((chance - 0.05).abs() < 1e-9);
    }

    #[test]
    fn counter_formulas_follow_ruleset() {
        let d = combatant(40, 40, 30);
        // 40 * 0.025 + 30 * 0.02 = 1.6 -> capped
        assert_eq!(counter_chance(&d, &Ruleset::INTERACTIVE), 0.45);

        let d = combatant(40, 5, 5);
        // 5 * 0.02 + 10 * 0.01
        assert!((counter_chance(&d, &Ruleset::AUTO_RUN) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn counter_damage_variants() {
        let counterer = combatant(40, 40, 30);
        let target = combatant(50, 30, 40);
        // 40*0.8 + 40*0.3 + 30*0.2 = 50
        assert_eq!(counter_damage(&counterer, &target, &Ruleset::INTERACTIVE), 50);
        // (40 - 15) * 0.7 = 17.5
        assert_eq!(counter_damage(&counterer, &target, &Ruleset::AUTO_RUN), 17);
    }

    proptest! {
        #[test]
        fn evasion_stays_within_bounds(
            d_speed in 0i32..500,
            a_speed in 0i32..500,
        ) {
            let defender = combatant(10, 10, d_speed);
            let attacker = combatant(10, 10, a_speed);
            for ruleset in [Ruleset::INTERACTIVE, Ruleset::AUTO_RUN] {
                let chance = evasion_chance(&defender, &attacker, &ruleset);
                prop_assert!(chance >= ruleset.evasion.base);
                prop_assert!(chance <= ruleset.evasion.cap);
            }
        }

        #[test]
        fn counter_chance_stays_within_bounds(
            defense in 0i32..500,
            speed in 0i32..500,
        ) {
            let defender = combatant(10, defense, speed);
            for ruleset in [Ruleset::INTERACTIVE, Ruleset::AUTO_RUN] {
                let chance = counter_chance(&defender, &ruleset);
                prop_assert!((0.0..=ruleset.counter_chance.cap).contains(&chance));
            }
        }
    }
}
