//! Errors surfaced by the battle runner.

use crate::combat::{HackError, HolosHackError};
use crate::config::InvalidConfig;
use crate::error::{EngineError, ErrorSeverity};
use crate::log::BattleLog;
use crate::state::{InvalidCombatant, Side};

/// Errors from constructing or stepping a [`Battle`](super::Battle).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BattleError {
    #[error("invalid combatant: {0}")]
    InvalidCombatant(#[from] InvalidCombatant),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] InvalidConfig),

    /// A resumed battle must still have rounds left to play.
    #[error("cannot resume after round {round}: the round cap is {round_cap}")]
    ResumeRoundAtCap { round: u32, round_cap: u32 },

    #[error("battle already finished after {rounds} rounds")]
    AlreadyFinished { rounds: u32 },
}

impl EngineError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCombatant(err) => err.severity(),
            Self::InvalidConfig(err) => err.severity(),
            Self::AlreadyFinished { .. } | Self::ResumeRoundAtCap { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCombatant(err) => err.error_code(),
            Self::InvalidConfig(err) => err.error_code(),
            Self::AlreadyFinished { .. } => "BATTLE_ALREADY_FINISHED",
            Self::ResumeRoundAtCap { .. } => "BATTLE_RESUME_ROUND_AT_CAP",
        }
    }
}

/// A command that was refused. The battle continued without it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommandRejected {
    #[error(transparent)]
    Hack(#[from] HackError),

    #[error(transparent)]
    HolosHack(#[from] HolosHackError),
}

impl EngineError for CommandRejected {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Hack(err) => err.error_code(),
            Self::HolosHack(err) => err.error_code(),
        }
    }
}

/// A refused command and the side that issued it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    pub side: Side,
    pub error: CommandRejected,
}

/// Why an auto-run stopped short of a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InterruptReason {
    RoundBudget,
    Deadline,
}

/// Auto-run aborted by the caller's budget. The battle itself is intact and
/// can be continued.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("battle interrupted after {rounds} rounds ({reason})")]
pub struct RunInterrupted {
    pub reason: InterruptReason,
    pub rounds: u32,
    /// Log up to the interruption.
    pub log: BattleLog,
}

impl EngineError for RunInterrupted {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self.reason {
            InterruptReason::RoundBudget => "RUN_ROUND_BUDGET",
            InterruptReason::Deadline => "RUN_DEADLINE",
        }
    }
}
