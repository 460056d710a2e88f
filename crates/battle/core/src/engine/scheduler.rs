//! Turn scheduler: one round as a pure reduction.
//!
//! [`resolve_round`] takes the current combatants and returns new ones plus
//! the events the round produced. It never mutates its input, so the stepped
//! runner and the auto-run loop share this exact code path.
//!
//! # Round order
//!
//! 1. The faster side acts first; side A wins ties.
//! 2. The acting side resolves its pre-attack command (hack, overcharge,
//!    defense mode), then attacks: evasion is rolled first, and an evaded
//!    attack deals nothing and cannot be countered. Otherwise it performs a
//!    special or a normal attack.
//! 3. A defender that survives rolls for a counter-attack.
//! 4. As soon as either side is defeated no further action is taken.
//! 5. Boost timers tick once; stats whose timer reaches zero revert.
//! 6. Both gauges accrue, scaled while in defense mode.

use crate::combat::{
    SpecialTrigger, apply_hack, apply_holos_hack, attack_damage, base_attack_damage,
    counter_chance, counter_damage, evasion_chance, resolve_special,
};
use crate::combat::calc::floor_damage;
use crate::config::BattleConfig;
use crate::engine::{Command, CommandRejected, Commands, Rejection};
use crate::env::{Clock, RngOracle};
use crate::log::{ActionKind, BattleLogEntry};
use crate::rewards::Outcome;
use crate::state::{Combatants, Side};

/// Why a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    /// A side's health reached zero.
    Knockout,
    /// The round cap was reached; remaining health decided.
    RoundCap,
}

/// Terminal state reached at the end of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terminal {
    pub outcome: Outcome,
    pub reason: EndReason,
}

/// Everything one round produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundOutcome {
    pub combatants: Combatants,
    pub entries: Vec<BattleLogEntry>,
    pub rejections: Vec<Rejection>,
    pub terminal: Option<Terminal>,
}

/// Resolve round number `round` (1-based) from `combatants`.
pub fn resolve_round(
    combatants: &Combatants,
    round: u32,
    commands: &Commands,
    config: &BattleConfig,
    rng: &mut (impl RngOracle + ?Sized),
    clock: &(impl Clock + ?Sized),
) -> RoundOutcome {
    let mut next = combatants.clone();
    let mut recorder = Recorder::new(round, clock);
    let mut rejections = Vec::new();

    for side in next.initiative() {
        if next.any_defeated() {
            break;
        }
        let command = commands.get(side);
        if let Err(error) = resolve_command(&mut next, side, command, &mut recorder) {
            rejections.push(Rejection { side, error });
        }
        resolve_attack(&mut next, side, command, round, config, rng, &mut recorder);
    }

    expire_boosts(&mut next, &mut recorder);
    accrue_gauges(&mut next, config);

    let terminal = terminal_state(&next, round, config.round_cap);
    tracing::debug!(
        round,
        health_a = next.a.health(),
        health_b = next.b.health(),
        terminal = terminal.is_some(),
        "round resolved"
    );

    RoundOutcome {
        combatants: next,
        entries: recorder.finish(),
        rejections,
        terminal,
    }
}

/// Decide whether the battle is over after `round`.
///
/// A knockout always ends the battle. At the round cap the side with more
/// health wins and equal health is a draw.
pub fn terminal_state(combatants: &Combatants, round: u32, round_cap: u32) -> Option<Terminal> {
    let (a, b) = (&combatants.a, &combatants.b);
    let knockout = match (a.is_defeated(), b.is_defeated()) {
        (true, true) => Some(Outcome::Draw),
        (false, true) => Some(Outcome::Winner(Side::A)),
        (true, false) => Some(Outcome::Winner(Side::B)),
        (false, false) => None,
    };
    if let Some(outcome) = knockout {
        return Some(Terminal {
            outcome,
            reason: EndReason::Knockout,
        });
    }

    if round < round_cap {
        return None;
    }
    let outcome = match a.health().cmp(&b.health()) {
        std::cmp::Ordering::Greater => Outcome::Winner(Side::A),
        std::cmp::Ordering::Less => Outcome::Winner(Side::B),
        std::cmp::Ordering::Equal => Outcome::Draw,
    };
    Some(Terminal {
        outcome,
        reason: EndReason::RoundCap,
    })
}

fn resolve_command(
    combatants: &mut Combatants,
    side: Side,
    command: Command,
    recorder: &mut Recorder<'_, impl Clock + ?Sized>,
) -> Result<(), CommandRejected> {
    let user = combatants.get_mut(side);
    match command {
        Command::Auto | Command::Special => Ok(()),
        Command::Hack(effect) => match apply_hack(user, effect) {
            Ok(record) => {
                let message = format!("{} hacks with {effect}: {}", user.name(), record.description);
                recorder.record(combatants, side, side, ActionKind::Hack, 0, message);
                Ok(())
            }
            Err(err) => {
                recorder.record(combatants, side, side, ActionKind::Hack, 0, err.to_string());
                Err(err.into())
            }
        },
        Command::HolosHack(variant) => match apply_holos_hack(user, variant) {
            Ok(record) => {
                let message = format!(
                    "{} ({} of {})",
                    record.description,
                    user.holos_hack_count(),
                    user.max_holos_hacks()
                );
                recorder.record(combatants, side, side, ActionKind::HolosHack, 0, message);
                Ok(())
            }
            Err(err) => {
                recorder.record(combatants, side, side, ActionKind::HolosHack, 0, err.to_string());
                Err(err.into())
            }
        },
        Command::DefenseMode(enabled) => {
            user.set_defense_mode(enabled);
            let message = format!(
                "{} {} defense mode",
                user.name(),
                if enabled { "enters" } else { "leaves" }
            );
            recorder.record(combatants, side, side, ActionKind::DefenseMode, 0, message);
            Ok(())
        }
    }
}

fn resolve_attack(
    combatants: &mut Combatants,
    side: Side,
    command: Command,
    round: u32,
    config: &BattleConfig,
    rng: &mut (impl RngOracle + ?Sized),
    recorder: &mut Recorder<'_, impl Clock + ?Sized>,
) {
    let ruleset = &config.ruleset;
    let target = side.other();

    let evade = evasion_chance(combatants.get(target), combatants.get(side), ruleset);
    if rng.chance(evade) {
        let message = format!(
            "{} evades {}'s attack",
            combatants.get(target).name(),
            combatants.get(side).name()
        );
        recorder.record(combatants, side, target, ActionKind::Evade, 0, message);
        return;
    }

    if wants_special(combatants, side, command, round, config, rng) {
        special_attack(combatants, side, recorder, config);
    } else {
        normal_attack(combatants, side, recorder, config);
    }

    if combatants.get(target).is_defeated() {
        return;
    }
    let chance = counter_chance(combatants.get(target), ruleset);
    if rng.chance(chance) {
        let damage = counter_damage(combatants.get(target), combatants.get(side), ruleset);
        let dealt = combatants.get_mut(side).take_damage(damage);
        let message = format!(
            "{} counters {} for {dealt}",
            combatants.get(target).name(),
            combatants.get(side).name()
        );
        recorder.record(combatants, target, side, ActionKind::Counter, dealt, message);
    }
}

/// Special eligibility: a special move equipped, at least a partial gauge,
/// and either an explicit command or the ruleset's random trigger.
fn wants_special(
    combatants: &Combatants,
    side: Side,
    command: Command,
    round: u32,
    config: &BattleConfig,
    rng: &mut (impl RngOracle + ?Sized),
) -> bool {
    let combatant = combatants.get(side);
    if combatant.special_move_id().trim().is_empty()
        || combatant.special_gauge() < BattleConfig::PARTIAL_SPECIAL_COST
    {
        return false;
    }
    if command == Command::Special {
        return true;
    }
    match config.ruleset.special_trigger {
        SpecialTrigger::OnCommand => false,
        SpecialTrigger::Random {
            after_round,
            chance,
        } => round > after_round && rng.chance(chance),
    }
}

fn special_attack(
    combatants: &mut Combatants,
    side: Side,
    recorder: &mut Recorder<'_, impl Clock + ?Sized>,
    config: &BattleConfig,
) {
    let (user, opponent) = combatants.split_mut(side);
    let Some((tier, record)) = resolve_special(user, opponent) else {
        normal_attack(combatants, side, recorder, config);
        return;
    };

    let damage = floor_damage(base_attack_damage(user, opponent, &config.ruleset));
    let dealt = opponent.take_damage(damage);
    let total = record.damage + dealt;
    let label = user
        .special_move()
        .map_or_else(|| user.special_move_id().to_string(), |m| m.to_string());
    let message = format!(
        "{} uses {label} ({tier}): {}; hits {} for {dealt}",
        user.name(),
        record.description,
        opponent.name()
    );
    recorder.record(combatants, side, side.other(), ActionKind::Special, total, message);
}

fn normal_attack(
    combatants: &mut Combatants,
    side: Side,
    recorder: &mut Recorder<'_, impl Clock + ?Sized>,
    config: &BattleConfig,
) {
    let (attacker, defender) = combatants.split_mut(side);
    let damage = attack_damage(attacker, defender, &config.ruleset);
    let charged = attacker.take_pending_special_attack();
    let dealt = defender.take_damage(damage);
    let message = if charged {
        format!("{} unleashes a charged attack on {} for {dealt}", attacker.name(), defender.name())
    } else {
        format!("{} attacks {} for {dealt}", attacker.name(), defender.name())
    };
    recorder.record(combatants, side, side.other(), ActionKind::Attack, dealt, message);
}

fn expire_boosts(combatants: &mut Combatants, recorder: &mut Recorder<'_, impl Clock + ?Sized>) {
    for side in Side::BOTH {
        let expired = combatants.get_mut(side).tick_boosts();
        for stat in expired {
            let message = format!("{}'s {stat} boost expired", combatants.get(side).name());
            recorder.record(combatants, side, side, ActionKind::BoostExpired, 0, message);
        }
    }
}

fn accrue_gauges(combatants: &mut Combatants, config: &BattleConfig) {
    for side in Side::BOTH {
        let combatant = combatants.get_mut(side);
        let multiplier = if combatant.is_defense_mode() {
            config.defense_mode_multiplier
        } else {
            1.0
        };
        let special = config.special_gauge_per_round + combatant.special_charge_bonus();
        combatant.add_special_gauge(f64::from(special) * multiplier);
        combatant.add_hack_gauge(f64::from(config.hack_gauge_per_round) * multiplier);
    }
}

/// Stamps entries with the round, both healths and the clock.
pub(crate) struct Recorder<'c, C: Clock + ?Sized> {
    round: u32,
    clock: &'c C,
    entries: Vec<BattleLogEntry>,
}

impl<'c, C: Clock + ?Sized> Recorder<'c, C> {
    pub(crate) fn new(round: u32, clock: &'c C) -> Self {
        Self {
            round,
            clock,
            entries: Vec::new(),
        }
    }

    pub(crate) fn record(
        &mut self,
        combatants: &Combatants,
        actor: Side,
        target: Side,
        kind: ActionKind,
        damage: u32,
        message: String,
    ) {
        let entry = self.entry(combatants, actor, target, kind, damage, message);
        self.entries.push(entry);
    }

    pub(crate) fn entry(
        &self,
        combatants: &Combatants,
        actor: Side,
        target: Side,
        kind: ActionKind,
        damage: u32,
        message: String,
    ) -> BattleLogEntry {
        BattleLogEntry {
            round: self.round,
            actor: combatants.get(actor).name().to_string(),
            target: combatants.get(target).name().to_string(),
            kind,
            damage,
            message,
            health: combatants.health(),
            timestamp: self.clock.now(),
        }
    }

    pub(crate) fn finish(self) -> Vec<BattleLogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{HackEffect, HolosHack, Ruleset};
    use crate::env::{ConstantRng, FixedClock, SequenceRng};
    use crate::state::{CombatantSetup, CombatantState};
    use crate::stats::BaseStats;

    fn combatants(config: &BattleConfig, a: BaseStats, b: BaseStats) -> Combatants {
        let (a, _) = CombatantState::prepare(&CombatantSetup::new(a), config).expect("a");
        let (b, _) = CombatantState::prepare(&CombatantSetup::new(b), config).expect("b");
        Combatants::new(a, b)
    }

    fn scenario(config: &BattleConfig) -> Combatants {
        combatants(
            config,
            BaseStats::new("A", 50, 30, 40, 100),
            BaseStats::new("B", 40, 40, 30, 100),
        )
    }

    #[test]
    fn first_round_of_reference_scenario() {
        let config = BattleConfig::auto_run();
        let start = scenario(&config);
        let outcome = resolve_round(
            &start,
            1,
            &Commands::AUTO,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );

        let first = &outcome.entries[0];
        assert_eq!(first.kind, ActionKind::Attack);
        assert_eq!(first.actor, "A");
        assert_eq!(first.damage, 30);
        assert_eq!(first.health.b, 70);
        // B strikes back on its own turn: 40 - 30 * 0.5
        assert_eq!(outcome.entries[1].damage, 25);
        assert_eq!(outcome.combatants.b.health(), 70);
        assert_eq!(outcome.combatants.a.health(), 75);
        // Input untouched.
        assert_eq!(start.a.health(), 100);
        assert!(outcome.terminal.is_none());
    }

    #[test]
    fn speed_ties_go_to_side_a() {
        let config = BattleConfig::auto_run();
        let start = combatants(
            &config,
            BaseStats::new("A", 10, 10, 20, 100),
            BaseStats::new("B", 10, 10, 20, 100),
        );
        assert_eq!(start.initiative(), [Side::A, Side::B]);

        let start = combatants(
            &config,
            BaseStats::new("A", 10, 10, 19, 100),
            BaseStats::new("B", 10, 10, 20, 100),
        );
        assert_eq!(start.initiative(), [Side::B, Side::A]);
    }

    #[test]
    fn evaded_attack_skips_damage_and_counter() {
        let config = BattleConfig::auto_run();
        let start = scenario(&config);
        // A's attack evaded, then B's attack lands and A does not counter.
        let mut rng = SequenceRng::new([0.0, 0.99, 0.99]);
        let outcome = resolve_round(&start, 1, &Commands::AUTO, &config, &mut rng, &FixedClock::epoch());

        assert_eq!(outcome.entries[0].kind, ActionKind::Evade);
        assert_eq!(outcome.entries[0].damage, 0);
        assert_eq!(outcome.entries[1].kind, ActionKind::Attack);
        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn counter_hits_the_attacker() {
        let config = BattleConfig::stepped();
        let start = scenario(&config);
        // A hits, B counters; then B is evaded.
        let mut rng = SequenceRng::new([0.99, 0.0, 0.0]);
        let outcome = resolve_round(&start, 1, &Commands::AUTO, &config, &mut rng, &FixedClock::epoch());

        let counter = &outcome.entries[1];
        assert_eq!(counter.kind, ActionKind::Counter);
        assert_eq!(counter.actor, "B");
        assert_eq!(counter.target, "A");
        // 40*0.8 + 40*0.3 + 30*0.2
        assert_eq!(counter.damage, 50);
        assert_eq!(counter.health.a, 50);
    }

    #[test]
    fn knockout_stops_the_round() {
        let config = BattleConfig::auto_run();
        let start = combatants(
            &config,
            BaseStats::new("A", 200, 30, 40, 100),
            BaseStats::new("B", 40, 40, 30, 100),
        );
        let outcome = resolve_round(
            &start,
            1,
            &Commands::AUTO,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.combatants.b.health(), 0);
        assert_eq!(
            outcome.terminal,
            Some(Terminal {
                outcome: Outcome::Winner(Side::A),
                reason: EndReason::Knockout
            })
        );
    }

    #[test]
    fn gauges_accrue_with_defense_mode_multiplier() {
        let config = BattleConfig::auto_run();
        let start = scenario(&config);
        let commands = Commands::AUTO.with(Side::B, Command::DefenseMode(true));
        let outcome = resolve_round(
            &start,
            1,
            &commands,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );
        assert_eq!(outcome.combatants.a.special_gauge(), 10.0);
        assert_eq!(outcome.combatants.a.hack_gauge(), 5.0);
        assert_eq!(outcome.combatants.b.special_gauge(), 15.0);
        assert_eq!(outcome.combatants.b.hack_gauge(), 7.5);
        assert_eq!(outcome.entries[1].kind, ActionKind::DefenseMode);
    }

    #[test]
    fn interactive_special_fires_only_on_command() {
        let config = BattleConfig::stepped();
        let mut start = combatants(
            &config,
            BaseStats::new("A", 50, 30, 40, 100).with_special_move("Sharp Claws"),
            BaseStats::new("B", 40, 40, 30, 100),
        );
        start.a.fill_special_gauge();

        let auto = resolve_round(
            &start,
            5,
            &Commands::AUTO,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );
        assert_eq!(auto.entries[0].kind, ActionKind::Attack);
        assert_eq!(auto.combatants.a.special_gauge(), 100.0);

        let commands = Commands::AUTO.with(Side::A, Command::Special);
        let outcome = resolve_round(
            &start,
            1,
            &commands,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );
        let special = &outcome.entries[0];
        assert_eq!(special.kind, ActionKind::Special);
        // bleed 15 + attack 30
        assert_eq!(special.damage, 45);
        assert_eq!(special.health.b, 55);
    }

    #[test]
    fn auto_run_special_waits_for_round_three() {
        let config = BattleConfig::auto_run();
        let mut start = combatants(
            &config,
            BaseStats::new("A", 50, 30, 40, 100).with_special_move("1st Strike"),
            BaseStats::new("B", 40, 40, 30, 100),
        );
        start.a.fill_special_gauge();

        // 0.1 clears B's 5% evasion and sits under the 20% trigger.
        let mut rng = ConstantRng::new(0.1);
        let early = resolve_round(&start, 2, &Commands::AUTO, &config, &mut rng, &FixedClock::epoch());
        assert_eq!(early.entries[0].kind, ActionKind::Attack);

        let late = resolve_round(&start, 3, &Commands::AUTO, &config, &mut rng, &FixedClock::epoch());
        assert_eq!(late.entries[0].kind, ActionKind::Special);
        // 55 - 20
        assert_eq!(late.entries[0].damage, 35);
    }

    #[test]
    fn rejected_hack_is_logged_and_reported() {
        let config = BattleConfig::stepped();
        let start = scenario(&config);
        let commands = Commands::AUTO.with(Side::A, Command::Hack(HackEffect::Heal));
        let outcome = resolve_round(
            &start,
            1,
            &commands,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );
        assert_eq!(outcome.rejections.len(), 1);
        assert_eq!(outcome.rejections[0].side, Side::A);
        assert_eq!(outcome.entries[0].kind, ActionKind::Hack);
        assert_eq!(outcome.combatants.a.hack_gauge(), 5.0);
    }

    #[test]
    fn charged_attack_consumes_pending_flag() {
        let config = BattleConfig::stepped();
        let mut start = scenario(&config);
        start.a.fill_hack_gauge();
        let commands = Commands::AUTO.with(Side::A, Command::Hack(HackEffect::SpecialAttack));
        let outcome = resolve_round(
            &start,
            1,
            &commands,
            &config,
            &mut ConstantRng::never(),
            &FixedClock::epoch(),
        );
        // (50 + 10 - 20) * 2.5
        assert_eq!(outcome.entries[1].damage, 100);
        assert!(!outcome.combatants.a.pending_special_attack());
        assert_eq!(outcome.terminal.map(|t| t.outcome), Some(Outcome::Winner(Side::A)));
    }

    #[test]
    fn overdrive_expiry_is_logged() {
        let config = BattleConfig::stepped();
        let mut state = scenario(&config);
        let mut commands = Commands::AUTO.with(Side::A, Command::HolosHack(HolosHack::Overdrive));
        let mut expired = 0;
        for round in 1..=3 {
            let outcome = resolve_round(
                &state,
                round,
                &commands,
                &config.clone().with_ruleset(Ruleset {
                    defense_factor: 10.0,
                    ..Ruleset::INTERACTIVE
                }),
                &mut ConstantRng::never(),
                &FixedClock::epoch(),
            );
            expired += outcome
                .entries
                .iter()
                .filter(|e| e.kind == ActionKind::BoostExpired)
                .count();
            state = outcome.combatants;
            commands = Commands::AUTO;
        }
        assert_eq!(expired, 3);
        assert_eq!(state.a.speed(), 40.0);
    }

    #[test]
    fn round_cap_prefers_higher_health_and_ties_draw() {
        let config = BattleConfig::auto_run();
        let mut state = scenario(&config);
        state.a.take_damage(60);
        state.b.take_damage(90);
        let terminal = terminal_state(&state, 50, 50).expect("cap reached");
        assert_eq!(terminal.outcome, Outcome::Winner(Side::A));
        assert_eq!(terminal.reason, EndReason::RoundCap);

        state.a.take_damage(30);
        assert_eq!(terminal_state(&state, 50, 50).map(|t| t.outcome), Some(Outcome::Draw));
        assert!(terminal_state(&state, 49, 50).is_none());
    }
}
