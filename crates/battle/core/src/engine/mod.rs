//! Battle runner.
//!
//! A [`Battle`] owns two freshly prepared combatants, the log, and the
//! injected randomness and clock. It can be driven one round at a time with
//! [`Battle::step`] (stepped play) or to completion with [`Battle::run`] /
//! [`Battle::run_to_completion`] (auto-run). Every path goes through
//! [`resolve_round`], so the two modes cannot drift apart.

mod command;
mod errors;
mod scheduler;

use std::time::Instant;

pub use command::{Command, Commands};
pub use errors::{BattleError, CommandRejected, InterruptReason, Rejection, RunInterrupted};
pub use scheduler::{EndReason, RoundOutcome, Terminal, resolve_round, terminal_state};

use scheduler::Recorder;

use crate::config::BattleConfig;
use crate::env::{Clock, RngOracle, SystemClock};
use crate::log::{ActionKind, BattleLog, BattleLogEntry, Diagnostic, HealthSnapshot};
use crate::rewards::{Outcome, RewardTable, SidePayouts, calculate_rewards};
use crate::state::{CombatantSetup, CombatantState, Combatants, ResumeState, Side};

/// Result of one stepped round.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub round: u32,
    /// Entries appended by this round, including the closing entry when the
    /// battle ended.
    pub entries: Vec<BattleLogEntry>,
    pub rejections: Vec<Rejection>,
    pub health: HealthSnapshot,
    pub terminal: Option<Terminal>,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }
}

/// Final, immutable record of a finished battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub outcome: Outcome,
    pub reason: EndReason,
    /// Name of the winning combatant, `None` on a draw.
    pub winner: Option<String>,
    pub final_health: HealthSnapshot,
    pub rounds: u32,
    pub combatants: Combatants,
    pub rewards: SidePayouts,
    pub diagnostics: Vec<Diagnostic>,
    pub log: BattleLog,
}

/// External limit on an auto-run, independent of the round cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunBudget {
    /// Maximum rounds to resolve in this call.
    pub max_rounds: Option<u32>,
    pub deadline: Option<Instant>,
}

impl RunBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// One battle between side A and side B.
pub struct Battle<R, C = SystemClock> {
    config: BattleConfig,
    rewards: RewardTable,
    combatants: Combatants,
    round: u32,
    log: BattleLog,
    diagnostics: Vec<Diagnostic>,
    terminal: Option<Terminal>,
    rng: R,
    clock: C,
}

impl<R: RngOracle> Battle<R, SystemClock> {
    /// Prepare both combatants and open the log, stamping with the system
    /// clock.
    pub fn new(
        config: BattleConfig,
        a: &CombatantSetup,
        b: &CombatantSetup,
        rng: R,
    ) -> Result<Self, BattleError> {
        Self::with_clock(config, a, b, rng, SystemClock)
    }

    /// Continue a stepped battle after `rounds_played` rounds, stamping with
    /// the system clock. See [`Battle::resume_with_clock`].
    pub fn resume(
        config: BattleConfig,
        a: &CombatantSetup,
        b: &CombatantSetup,
        rounds_played: u32,
        rng: R,
    ) -> Result<Self, BattleError> {
        Self::resume_with_clock(config, a, b, rounds_played, rng, SystemClock)
    }
}

impl<R: RngOracle, C: Clock> Battle<R, C> {
    /// Prepare both combatants and open the log.
    ///
    /// Fails when the config is unusable or a combatant violates a
    /// construction invariant; no round has executed in that case.
    pub fn with_clock(
        config: BattleConfig,
        a: &CombatantSetup,
        b: &CombatantSetup,
        rng: R,
        clock: C,
    ) -> Result<Self, BattleError> {
        Self::resume_with_clock(config, a, b, 0, rng, clock)
    }

    /// Continue a battle whose first `rounds_played` rounds were resolved
    /// earlier, typically with both setups carrying a [`ResumeState`].
    ///
    /// Round numbering and the round cap carry on from `rounds_played`, so a
    /// battle split across sessions still ends at the cap. Resuming at or past
    /// the cap is rejected: that battle was already terminal.
    pub fn resume_with_clock(
        config: BattleConfig,
        a: &CombatantSetup,
        b: &CombatantSetup,
        rounds_played: u32,
        rng: R,
        clock: C,
    ) -> Result<Self, BattleError> {
        config.validate()?;
        if rounds_played >= config.round_cap {
            return Err(BattleError::ResumeRoundAtCap {
                round: rounds_played,
                round_cap: config.round_cap,
            });
        }
        let (state_a, diagnostics_a) = CombatantState::prepare(a, &config)?;
        let (state_b, diagnostics_b) = CombatantState::prepare(b, &config)?;
        let combatants = Combatants::new(state_a, state_b);

        let mut recorder = Recorder::new(rounds_played, &clock);
        let mut message = format!(
            "{} vs {} ({} mode, cap {} rounds)",
            combatants.a.name(),
            combatants.b.name(),
            config.mode,
            config.round_cap
        );
        if rounds_played > 0 {
            message.push_str(&format!(", resumed after round {rounds_played}"));
        }
        recorder.record(&combatants, Side::A, Side::B, ActionKind::BattleStart, 0, message);
        let tagged = diagnostics_a
            .iter()
            .map(|d| (Side::A, d))
            .chain(diagnostics_b.iter().map(|d| (Side::B, d)));
        for (side, diagnostic) in tagged {
            recorder.record(
                &combatants,
                side,
                side,
                ActionKind::Diagnostic,
                0,
                diagnostic.message.clone(),
            );
        }
        let diagnostics: Vec<Diagnostic> = diagnostics_a.into_iter().chain(diagnostics_b).collect();
        let mut log = BattleLog::new();
        log.extend(recorder.finish());

        tracing::info!(
            a = combatants.a.name(),
            b = combatants.b.name(),
            mode = %config.mode,
            round_cap = config.round_cap,
            rounds_played,
            diagnostics = diagnostics.len(),
            "battle started"
        );

        Ok(Self {
            config,
            rewards: RewardTable::DEFAULT,
            combatants,
            round: rounds_played,
            log,
            diagnostics,
            terminal: None,
            rng,
            clock,
        })
    }

    /// Pay out from `rewards` instead of [`RewardTable::DEFAULT`].
    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardTable) -> Self {
        self.rewards = rewards;
        self
    }

    /// Resolve exactly one round with the given commands.
    pub fn step(&mut self, commands: &Commands) -> Result<StepOutcome, BattleError> {
        if self.terminal.is_some() {
            return Err(BattleError::AlreadyFinished { rounds: self.round });
        }
        Ok(self.advance(commands))
    }

    /// Play to a terminal state with both sides on [`Command::Auto`].
    ///
    /// The round cap guarantees termination.
    pub fn run_to_completion(&mut self) -> BattleResult {
        while self.terminal.is_none() {
            self.advance(&Commands::AUTO);
        }
        self.build_result()
    }

    /// Like [`run_to_completion`](Self::run_to_completion), but stop early
    /// when `budget` runs out. An interrupted battle can be run again.
    pub fn run(&mut self, budget: RunBudget) -> Result<BattleResult, RunInterrupted> {
        let mut resolved = 0u32;
        while self.terminal.is_none() {
            if budget.max_rounds.is_some_and(|max| resolved >= max) {
                return Err(self.interrupted(InterruptReason::RoundBudget));
            }
            if budget.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(self.interrupted(InterruptReason::Deadline));
            }
            self.advance(&Commands::AUTO);
            resolved += 1;
        }
        Ok(self.build_result())
    }

    /// The finished result, once the battle is terminal.
    pub fn result(&self) -> Option<BattleResult> {
        self.terminal.map(|_| self.build_result())
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn combatants(&self) -> &Combatants {
        &self.combatants
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        self.combatants.get(side)
    }

    pub fn resume_state(&self, side: Side) -> ResumeState {
        self.combatants.get(side).resume_state()
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    pub fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }

    fn advance(&mut self, commands: &Commands) -> StepOutcome {
        let round = self.round + 1;
        let RoundOutcome {
            combatants,
            mut entries,
            rejections,
            terminal,
        } = resolve_round(
            &self.combatants,
            round,
            commands,
            &self.config,
            &mut self.rng,
            &self.clock,
        );
        self.combatants = combatants;
        self.round = round;

        for rejection in &rejections {
            tracing::debug!(round, side = %rejection.side, error = %rejection.error, "command rejected");
        }

        if let Some(terminal) = terminal {
            entries.push(self.closing_entry(terminal));
            self.terminal = Some(terminal);
            tracing::info!(
                rounds = round,
                outcome = ?terminal.outcome,
                reason = %terminal.reason,
                health_a = self.combatants.a.health(),
                health_b = self.combatants.b.health(),
                "battle finished"
            );
        }
        self.log.extend(entries.iter().cloned());

        StepOutcome {
            round,
            entries,
            rejections,
            health: self.combatants.health(),
            terminal,
        }
    }

    fn closing_entry(&self, terminal: Terminal) -> BattleLogEntry {
        let (actor, target, message) = match terminal.outcome {
            Outcome::Winner(side) => (
                side,
                side.other(),
                format!(
                    "{} defeats {} ({})",
                    self.combatants.get(side).name(),
                    self.combatants.get(side.other()).name(),
                    terminal.reason
                ),
            ),
            Outcome::Draw => (Side::A, Side::B, format!("draw ({})", terminal.reason)),
        };
        Recorder::new(self.round, &self.clock).entry(
            &self.combatants,
            actor,
            target,
            ActionKind::BattleEnd,
            0,
            message,
        )
    }

    fn build_result(&self) -> BattleResult {
        let terminal = self.terminal.unwrap_or(Terminal {
            outcome: Outcome::Draw,
            reason: EndReason::RoundCap,
        });
        BattleResult {
            outcome: terminal.outcome,
            reason: terminal.reason,
            winner: terminal
                .outcome
                .winner()
                .map(|side| self.combatants.get(side).name().to_string()),
            final_health: self.combatants.health(),
            rounds: self.round,
            combatants: self.combatants.clone(),
            rewards: calculate_rewards(terminal.outcome, &self.rewards),
            diagnostics: self.diagnostics.clone(),
            log: self.log.clone(),
        }
    }

    fn interrupted(&self, reason: InterruptReason) -> RunInterrupted {
        tracing::warn!(rounds = self.round, %reason, "auto-run interrupted");
        RunInterrupted {
            reason,
            rounds: self.round,
            log: self.log.clone(),
        }
    }
}

/// Auto-run a battle to completion in one call.
pub fn simulate<R: RngOracle, C: Clock>(
    config: BattleConfig,
    a: &CombatantSetup,
    b: &CombatantSetup,
    rewards: RewardTable,
    rng: R,
    clock: C,
) -> Result<BattleResult, BattleError> {
    let mut battle = Battle::with_clock(config, a, b, rng, clock)?.with_rewards(rewards);
    Ok(battle.run_to_completion())
}
