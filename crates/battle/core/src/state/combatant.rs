//! Per-battle combatant state.
//!
//! A [`CombatantState`] is built fresh for every battle from a
//! [`CombatantSetup`], mutated only by the turn scheduler and the effect
//! resolver, and discarded once the battle result is returned. Callers that
//! need to carry something across battles (final health, an interactive
//! battle's boosts) export it through [`CombatantState::resume_state`].
//!
//! # Invariants
//!
//! - `0 <= health <= max_health`
//! - both gauges stay within `0..=100`
//! - `holos_hack_count <= max_holos_hacks`
//! - live defense and speed revert to `baseline + permanent shift` when their
//!   timer reaches zero

use crate::combat::SpecialMove;
use crate::config::BattleConfig;
use crate::error::{EngineError, ErrorSeverity};
use crate::log::Diagnostic;
use crate::stats::{BaseStats, FitnessBonus, PartModifiers, sanitize_steps};

/// Construction-time invariant violations. The only fatal error class.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidCombatant {
    #[error("combatant name must not be empty")]
    EmptyName,

    #[error("{name}: {stat} must not be negative (got {value})")]
    NegativeStat {
        name: String,
        stat: &'static str,
        value: i32,
    },

    #[error("{name}: max health must be positive (got {value})")]
    NonPositiveMaxHealth { name: String, value: i32 },

    #[error("{name}: resumed health {health} exceeds max health {max_health}")]
    ResumeHealthOutOfRange {
        name: String,
        health: u32,
        max_health: u32,
    },

    #[error("{name}: resumed {gauge} gauge {value} is outside 0..=100")]
    ResumeGaugeOutOfRange {
        name: String,
        gauge: &'static str,
        value: f64,
    },

    #[error("{name}: resumed overcharge count {count} exceeds cap {max}")]
    ResumeHolosHackOverCap { name: String, count: u8, max: u8 },
}

impl EngineError for InvalidCombatant {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "COMBATANT_EMPTY_NAME",
            Self::NegativeStat { .. } => "COMBATANT_NEGATIVE_STAT",
            Self::NonPositiveMaxHealth { .. } => "COMBATANT_NON_POSITIVE_MAX_HEALTH",
            Self::ResumeHealthOutOfRange { .. } => "COMBATANT_RESUME_HEALTH",
            Self::ResumeGaugeOutOfRange { .. } => "COMBATANT_RESUME_GAUGE",
            Self::ResumeHolosHackOverCap { .. } => "COMBATANT_RESUME_HOLOS_HACK",
        }
    }
}

/// Everything the caller supplies for one side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSetup {
    pub stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parts: PartModifiers,
    /// Raw daily step count. Negative values are treated as zero.
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Option<i64>,
    /// Persisted state from an earlier step of the same interactive battle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resume: Option<ResumeState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense_mode: bool,
    /// Fallbacks applied while resolving the stats (e.g. unknown identity).
    #[cfg_attr(feature = "serde", serde(default))]
    pub diagnostics: Vec<Diagnostic>,
}

impl CombatantSetup {
    pub fn new(stats: BaseStats) -> Self {
        Self {
            stats,
            parts: PartModifiers::default(),
            steps: None,
            resume: None,
            defense_mode: false,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_steps(mut self, steps: i64) -> Self {
        self.steps = Some(steps);
        self
    }

    #[must_use]
    pub fn with_parts(mut self, parts: PartModifiers) -> Self {
        self.parts = parts;
        self
    }

    #[must_use]
    pub fn with_resume(mut self, resume: ResumeState) -> Self {
        self.resume = Some(resume);
        self
    }

    #[must_use]
    pub fn with_defense_mode(mut self, enabled: bool) -> Self {
        self.defense_mode = enabled;
        self
    }

    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// Immutable baseline after parts and fitness bonuses. Boosts revert here.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub max_health: u32,
    pub intelligence: f64,
}

/// Remaining turns on each timed boost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostTimers {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BoostTimers {
    pub fn any_active(&self) -> bool {
        self.attack > 0 || self.defense > 0 || self.speed > 0
    }
}

/// Persisted mid-battle state used to resume an interactive battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResumeState {
    pub health: u32,
    pub special_gauge: f64,
    pub hack_gauge: f64,
    pub defense_mode: bool,
    pub holos_hack_count: u8,
    pub pending_special_attack: bool,
    pub attack_boost: f64,
    pub timed_attack_boost: f64,
    pub defense: f64,
    pub defense_shift: f64,
    pub speed: f64,
    pub timers: BoostTimers,
}

/// Mutable per-battle record for one side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    name: String,
    level: u32,
    base: Baseline,
    special_move_id: String,
    special_move: Option<SpecialMove>,
    special_charge_bonus: u32,

    health: u32,
    defense: f64,
    speed: f64,
    /// Permanent additive attack boost (special moves, hacks).
    attack_boost: f64,
    /// Attack boost that lapses when `timers.attack` reaches zero.
    timed_attack_boost: f64,
    /// Permanent defense change (e.g. from an opponent's smokescreen).
    defense_shift: f64,
    timers: BoostTimers,

    special_gauge: f64,
    hack_gauge: f64,
    defense_mode: bool,
    holos_hack_count: u8,
    max_holos_hacks: u8,
    pending_special_attack: bool,
}

impl CombatantState {
    /// Build a combatant from its setup, folding in parts and fitness once.
    ///
    /// Returns the state plus every defensive fallback that was applied, in
    /// the order they occurred.
    pub fn prepare(
        setup: &CombatantSetup,
        config: &BattleConfig,
    ) -> Result<(Self, Vec<Diagnostic>), InvalidCombatant> {
        let mut diagnostics = setup.diagnostics.clone();
        let stats = setup.stats.clone().with_parts(&setup.parts);
        validate_stats(&stats)?;

        let steps = match setup.steps {
            Some(raw) => {
                let (steps, corrected) = sanitize_steps(raw);
                if corrected {
                    tracing::warn!(name = %stats.name, raw, "negative step count treated as zero");
                    diagnostics.push(Diagnostic::new(
                        &stats.name,
                        format!("negative step count {raw} treated as 0"),
                    ));
                }
                steps
            }
            None => 0,
        };
        let fitness = FitnessBonus::from_steps(steps, stats.max_health, stats.attack);

        let special_move = match stats.special_move.trim().parse::<SpecialMove>() {
            Ok(special_move) => Some(special_move),
            Err(_) if stats.special_move.trim().is_empty() => None,
            Err(_) => {
                tracing::warn!(
                    name = %stats.name,
                    special_move = %stats.special_move,
                    "special move not in catalog, resolving to no effect"
                );
                diagnostics.push(Diagnostic::new(
                    &stats.name,
                    format!(
                        "special move '{}' is not in the catalog; it will have no effect",
                        stats.special_move
                    ),
                ));
                None
            }
        };

        let base = Baseline {
            attack: f64::from(stats.attack.saturating_add(fitness.attack_delta())),
            defense: f64::from(stats.defense.saturating_add(fitness.defense_delta())),
            speed: f64::from(stats.speed.saturating_add(fitness.speed_delta())),
            max_health: stats.max_health.saturating_add(fitness.max_health_delta()) as u32,
            intelligence: f64::from(stats.intelligence),
        };

        let mut state = Self {
            name: stats.name.clone(),
            level: stats.level,
            base,
            special_move_id: stats.special_move.clone(),
            special_move,
            special_charge_bonus: fitness.special_charge_per_round(),
            health: base.max_health,
            defense: base.defense,
            speed: base.speed,
            attack_boost: 0.0,
            timed_attack_boost: 0.0,
            defense_shift: 0.0,
            timers: BoostTimers::default(),
            special_gauge: 0.0,
            hack_gauge: 0.0,
            defense_mode: setup.defense_mode,
            holos_hack_count: 0,
            max_holos_hacks: config.max_holos_hacks,
            pending_special_attack: false,
        };

        if let Some(resume) = &setup.resume {
            state.restore(resume)?;
        }

        Ok((state, diagnostics))
    }

    fn restore(&mut self, resume: &ResumeState) -> Result<(), InvalidCombatant> {
        if resume.health > self.base.max_health {
            return Err(InvalidCombatant::ResumeHealthOutOfRange {
                name: self.name.clone(),
                health: resume.health,
                max_health: self.base.max_health,
            });
        }
        for (gauge, value) in [("special", resume.special_gauge), ("hack", resume.hack_gauge)] {
            if !(0.0..=BattleConfig::GAUGE_MAX).contains(&value) {
                return Err(InvalidCombatant::ResumeGaugeOutOfRange {
                    name: self.name.clone(),
                    gauge,
                    value,
                });
            }
        }
        if resume.holos_hack_count > self.max_holos_hacks {
            return Err(InvalidCombatant::ResumeHolosHackOverCap {
                name: self.name.clone(),
                count: resume.holos_hack_count,
                max: self.max_holos_hacks,
            });
        }

        self.health = resume.health;
        self.special_gauge = resume.special_gauge;
        self.hack_gauge = resume.hack_gauge;
        self.defense_mode = resume.defense_mode;
        self.holos_hack_count = resume.holos_hack_count;
        self.pending_special_attack = resume.pending_special_attack;
        self.attack_boost = resume.attack_boost;
        self.timed_attack_boost = resume.timed_attack_boost;
        self.defense = resume.defense.max(0.0);
        self.defense_shift = resume.defense_shift;
        self.speed = resume.speed.max(0.0);
        self.timers = resume.timers;
        Ok(())
    }

    /// Export the mutable part of the state for a later resume.
    pub fn resume_state(&self) -> ResumeState {
        ResumeState {
            health: self.health,
            special_gauge: self.special_gauge,
            hack_gauge: self.hack_gauge,
            defense_mode: self.defense_mode,
            holos_hack_count: self.holos_hack_count,
            pending_special_attack: self.pending_special_attack,
            attack_boost: self.attack_boost,
            timed_attack_boost: self.timed_attack_boost,
            defense: self.defense,
            defense_shift: self.defense_shift,
            speed: self.speed,
            timers: self.timers,
        }
    }

    // ===== identity and baseline =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn baseline(&self) -> &Baseline {
        &self.base
    }

    pub fn special_move(&self) -> Option<SpecialMove> {
        self.special_move
    }

    pub fn special_move_id(&self) -> &str {
        &self.special_move_id
    }

    // ===== live stats =====

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.base.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_defeated(&self) -> bool {
        !self.is_alive()
    }

    /// Base attack, without boosts.
    pub fn attack(&self) -> f64 {
        self.base.attack
    }

    /// Total additive attack boost currently active.
    pub fn attack_boost(&self) -> f64 {
        self.attack_boost + self.timed_attack_boost
    }

    pub fn effective_attack(&self) -> f64 {
        self.attack() + self.attack_boost()
    }

    pub fn defense(&self) -> f64 {
        self.defense
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn intelligence(&self) -> f64 {
        self.base.intelligence
    }

    pub fn timers(&self) -> BoostTimers {
        self.timers
    }

    // ===== gauges and flags =====

    pub fn special_gauge(&self) -> f64 {
        self.special_gauge
    }

    pub fn hack_gauge(&self) -> f64 {
        self.hack_gauge
    }

    pub fn special_charge_bonus(&self) -> u32 {
        self.special_charge_bonus
    }

    pub fn is_defense_mode(&self) -> bool {
        self.defense_mode
    }

    pub fn holos_hack_count(&self) -> u8 {
        self.holos_hack_count
    }

    pub fn max_holos_hacks(&self) -> u8 {
        self.max_holos_hacks
    }

    pub fn holos_hacks_remaining(&self) -> u8 {
        self.max_holos_hacks.saturating_sub(self.holos_hack_count)
    }

    pub fn pending_special_attack(&self) -> bool {
        self.pending_special_attack
    }

    // ===== mutation (scheduler and effect resolver only) =====

    /// Apply damage, clamped at zero. Returns the damage actually taken.
    pub(crate) fn take_damage(&mut self, damage: u32) -> u32 {
        let taken = damage.min(self.health);
        self.health -= taken;
        taken
    }

    /// Heal, clamped at max health. Returns the amount actually restored.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.base.max_health - self.health);
        self.health += restored;
        restored
    }

    pub(crate) fn add_special_gauge(&mut self, amount: f64) {
        self.special_gauge = clamp_gauge(self.special_gauge + amount);
    }

    pub(crate) fn add_hack_gauge(&mut self, amount: f64) {
        self.hack_gauge = clamp_gauge(self.hack_gauge + amount);
    }

    pub(crate) fn fill_special_gauge(&mut self) {
        self.special_gauge = BattleConfig::GAUGE_MAX;
    }

    pub(crate) fn fill_hack_gauge(&mut self) {
        self.hack_gauge = BattleConfig::GAUGE_MAX;
    }

    /// Subtract `cost` from the special gauge if it holds at least that much.
    pub(crate) fn consume_special_gauge(&mut self, cost: f64) -> bool {
        if self.special_gauge < cost {
            return false;
        }
        self.special_gauge = clamp_gauge(self.special_gauge - cost);
        true
    }

    pub(crate) fn consume_hack_gauge(&mut self, cost: f64) -> bool {
        if self.hack_gauge < cost {
            return false;
        }
        self.hack_gauge = clamp_gauge(self.hack_gauge - cost);
        true
    }

    pub(crate) fn set_defense_mode(&mut self, enabled: bool) {
        self.defense_mode = enabled;
    }

    pub(crate) fn set_pending_special_attack(&mut self, pending: bool) {
        self.pending_special_attack = pending;
    }

    /// Take the pending one-shot flag, clearing it.
    pub(crate) fn take_pending_special_attack(&mut self) -> bool {
        std::mem::take(&mut self.pending_special_attack)
    }

    pub(crate) fn increment_holos_hack(&mut self) -> bool {
        if self.holos_hack_count >= self.max_holos_hacks {
            return false;
        }
        self.holos_hack_count += 1;
        true
    }

    pub(crate) fn add_permanent_attack_boost(&mut self, amount: f64) {
        self.attack_boost += amount;
    }

    /// Permanently shift defense (negative for debuffs). Floors at zero.
    pub(crate) fn shift_defense(&mut self, amount: f64) {
        self.defense_shift += amount;
        self.defense = (self.defense + amount).max(0.0);
    }

    pub(crate) fn boost_attack(&mut self, amount: f64, turns: u32) {
        self.timed_attack_boost += amount;
        self.timers.attack = self.timers.attack.max(turns);
    }

    pub(crate) fn boost_defense(&mut self, amount: f64, turns: u32) {
        self.defense += amount;
        self.timers.defense = self.timers.defense.max(turns);
    }

    pub(crate) fn boost_speed(&mut self, amount: f64, turns: u32) {
        self.speed += amount;
        self.timers.speed = self.timers.speed.max(turns);
    }

    /// Advance every boost timer by one tick, reverting stats whose timer
    /// reaches zero. Returns the stats that reverted.
    pub(crate) fn tick_boosts(&mut self) -> Vec<BoostedStat> {
        let mut expired = Vec::new();

        if tick(&mut self.timers.attack) {
            self.timed_attack_boost = 0.0;
            expired.push(BoostedStat::Attack);
        }
        if tick(&mut self.timers.defense) {
            self.defense = (self.base.defense + self.defense_shift).max(0.0);
            expired.push(BoostedStat::Defense);
        }
        if tick(&mut self.timers.speed) {
            self.speed = self.base.speed;
            expired.push(BoostedStat::Speed);
        }

        expired
    }
}

/// A stat that can carry a timed boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BoostedStat {
    Attack,
    Defense,
    Speed,
}

/// Decrement a running timer; true when it just reached zero.
fn tick(timer: &mut u32) -> bool {
    if *timer == 0 {
        return false;
    }
    *timer -= 1;
    *timer == 0
}

fn clamp_gauge(value: f64) -> f64 {
    value.clamp(0.0, BattleConfig::GAUGE_MAX)
}

fn validate_stats(stats: &BaseStats) -> Result<(), InvalidCombatant> {
    if stats.name.trim().is_empty() {
        return Err(InvalidCombatant::EmptyName);
    }
    for (stat, value) in [
        ("attack", stats.attack),
        ("defense", stats.defense),
        ("speed", stats.speed),
        ("intelligence", stats.intelligence),
    ] {
        if value < 0 {
            return Err(InvalidCombatant::NegativeStat {
                name: stats.name.clone(),
                stat,
                value,
            });
        }
    }
    if stats.max_health <= 0 {
        return Err(InvalidCombatant::NonPositiveMaxHealth {
            name: stats.name.clone(),
            value: stats.max_health,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepare(setup: CombatantSetup) -> (CombatantState, Vec<Diagnostic>) {
        CombatantState::prepare(&setup, &BattleConfig::auto_run()).expect("valid setup")
    }

    fn ace() -> BaseStats {
        BaseStats::new("Ace", 50, 30, 40, 100).with_special_move("1st Strike")
    }

    #[test]
    fn fresh_combatant_starts_full_and_empty() {
        let (state, diagnostics) = prepare(CombatantSetup::new(ace()));

        assert!(diagnostics.is_empty());
        assert_eq!(state.health(), 100);
        assert_eq!(state.special_gauge(), 0.0);
        assert_eq!(state.hack_gauge(), 0.0);
        assert_eq!(state.special_move(), Some(SpecialMove::FirstStrike));
        assert_eq!(state.max_holos_hacks(), 3);
        assert!(state.is_alive());
    }

    #[test]
    fn nine_thousand_steps_raise_every_stat() {
        let (plain, _) = prepare(CombatantSetup::new(ace()));
        let (fit, _) = prepare(CombatantSetup::new(ace()).with_steps(9_000));

        assert!(fit.max_health() > plain.max_health());
        assert!(fit.attack() > plain.attack());
        assert!(fit.defense() > plain.defense());
        assert!(fit.speed() > plain.speed());
        assert_eq!(fit.special_charge_bonus(), 10);
        // 100 + 5% ; 50 + 3% (1) + 5% (2)
        assert_eq!(fit.max_health(), 105);
        assert_eq!(fit.attack(), 53.0);
        assert_eq!(fit.defense(), 32.0);
        assert_eq!(fit.speed(), 42.0);
    }

    #[test]
    fn negative_steps_are_reported_not_fatal() {
        let (state, diagnostics) = prepare(CombatantSetup::new(ace()).with_steps(-300));
        assert_eq!(state.max_health(), 100);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("negative step count"));
    }

    #[test]
    fn unknown_special_move_is_a_diagnostic() {
        let stats = ace().with_special_move("Laser Eyes");
        let (state, diagnostics) = prepare(CombatantSetup::new(stats));
        assert_eq!(state.special_move(), None);
        assert_eq!(state.special_move_id(), "Laser Eyes");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn negative_max_health_is_fatal() {
        let stats = BaseStats::new("Broken", 10, 10, 10, -5);
        let err = CombatantState::prepare(&CombatantSetup::new(stats), &BattleConfig::auto_run())
            .unwrap_err();
        assert!(matches!(err, InvalidCombatant::NonPositiveMaxHealth { value: -5, .. }));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn negative_attack_is_fatal() {
        let stats = BaseStats::new("Broken", -1, 10, 10, 50);
        let err = CombatantState::prepare(&CombatantSetup::new(stats), &BattleConfig::auto_run())
            .unwrap_err();
        assert!(matches!(err, InvalidCombatant::NegativeStat { stat: "attack", .. }));
    }

    #[test]
    fn parts_count_toward_validation() {
        let stats = BaseStats::new("Patched", 10, 10, 10, 10);
        let parts = PartModifiers {
            max_health: -10,
            ..PartModifiers::default()
        };
        let result = CombatantState::prepare(
            &CombatantSetup::new(stats).with_parts(parts),
            &BattleConfig::auto_run(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn damage_and_heal_are_clamped() {
        let (mut state, _) = prepare(CombatantSetup::new(ace()));
        assert_eq!(state.take_damage(250), 100);
        assert_eq!(state.health(), 0);
        assert!(state.is_defeated());
        assert_eq!(state.heal(500), 100);
        assert_eq!(state.health(), 100);
    }

    #[test]
    fn gauges_clamp_and_consume_leaves_remainder() {
        let (mut state, _) = prepare(CombatantSetup::new(ace()));
        state.add_special_gauge(70.0);
        assert!(state.consume_special_gauge(50.0));
        assert_eq!(state.special_gauge(), 20.0);
        assert!(!state.consume_special_gauge(50.0));
        state.add_special_gauge(500.0);
        assert_eq!(state.special_gauge(), 100.0);
    }

    #[test]
    fn boosts_revert_to_baseline_plus_shift() {
        let (mut state, _) = prepare(CombatantSetup::new(ace()));
        state.shift_defense(-2.0);
        state.boost_defense(9.0, 2);
        assert_eq!(state.defense(), 37.0);

        assert!(state.tick_boosts().is_empty());
        assert_eq!(state.tick_boosts(), vec![BoostedStat::Defense]);
        assert_eq!(state.defense(), 28.0);
        assert_eq!(state.timers().defense, 0);
        assert!(state.tick_boosts().is_empty());
    }

    #[test]
    fn timed_attack_boost_lapses_but_permanent_stays() {
        let (mut state, _) = prepare(CombatantSetup::new(ace()));
        state.add_permanent_attack_boost(5.0);
        state.boost_attack(15.0, 1);
        assert_eq!(state.attack_boost(), 20.0);
        assert_eq!(state.tick_boosts(), vec![BoostedStat::Attack]);
        assert_eq!(state.attack_boost(), 5.0);
    }

    #[test]
    fn resume_round_trips_and_validates() {
        let (mut state, _) = prepare(CombatantSetup::new(ace()));
        state.take_damage(35);
        state.add_special_gauge(60.0);
        state.boost_speed(16.0, 2);
        assert!(state.increment_holos_hack());

        let resume = state.resume_state();
        let (restored, _) = prepare(CombatantSetup::new(ace()).with_resume(resume.clone()));
        assert_eq!(restored.resume_state(), resume);
        assert_eq!(restored.health(), 65);
        assert_eq!(restored.speed(), 56.0);

        let bad = ResumeState {
            health: 101,
            ..resume
        };
        let err = CombatantState::prepare(
            &CombatantSetup::new(ace()).with_resume(bad),
            &BattleConfig::auto_run(),
        )
        .unwrap_err();
        assert!(matches!(err, InvalidCombatant::ResumeHealthOutOfRange { .. }));
    }

    #[test]
    fn holos_hack_counter_stops_at_cap() {
        let (mut state, _) = prepare(CombatantSetup::new(ace()));
        for _ in 0..3 {
            assert!(state.increment_holos_hack());
        }
        assert!(!state.increment_holos_hack());
        assert_eq!(state.holos_hack_count(), 3);
        assert_eq!(state.holos_hacks_remaining(), 0);
    }
}
