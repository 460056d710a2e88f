//! Deterministic Holobot battle resolution.
//!
//! `battle-core` turns two stat snapshots into a finished battle: combatant
//! preparation (equipped parts, fitness bonuses, resume state), the turn
//! scheduler, special and hack effects, the append-only battle log, and the
//! reward payout. It performs no I/O. Randomness and time are injected
//! through [`env::RngOracle`] and [`env::Clock`], so a battle is replayable
//! from its seed.
//!
//! Battles run in one of two [`Mode`]s that share a single round resolver and
//! differ only in the injected [`Ruleset`](combat::Ruleset):
//!
//! - stepped: the caller drives [`Battle::step`] one round at a time
//! - auto-run: [`Battle::run_to_completion`] (or [`simulate`]) plays to a
//!   terminal state and returns a [`BattleResult`]
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod rewards;
pub mod state;
pub mod stats;

pub use combat::{
    EffectRecord, HackEffect, HackError, HolosHack, HolosHackError, Ruleset, SpecialMove,
    SpecialTier,
};
pub use config::{BattleConfig, InvalidConfig, Mode};
pub use engine::{
    Battle, BattleError, BattleResult, Command, CommandRejected, Commands, EndReason,
    InterruptReason, Rejection, RunBudget, RunInterrupted, StepOutcome, Terminal, simulate,
};
pub use env::{
    Clock, ConstantRng, FixedClock, PcgRng, RandRng, RngOracle, SequenceRng, StatLookup,
    SystemClock, resolve_base_stats,
};
pub use error::{EngineError, ErrorSeverity};
pub use log::{ActionKind, BattleLog, BattleLogEntry, Diagnostic, HealthSnapshot};
pub use rewards::{Outcome, RewardPayout, RewardTable, SidePayouts, calculate_rewards};
pub use state::{CombatantSetup, CombatantState, Combatants, InvalidCombatant, ResumeState, Side};
pub use stats::{BaseStats, FitnessBonus, FitnessTier, PartModifiers};
