//! Battle log: the ordered, append-only audit trail of a battle.
//!
//! Every resolved event produces exactly one [`BattleLogEntry`], stamped with
//! both sides' health at that instant. The log is the only artifact a UI or a
//! persistence layer needs to reconstruct what happened, and
//! [`BattleLog::health_trajectory`] replays the health curve exactly.

use chrono::{DateTime, Utc};

/// What kind of event an entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Special,
    Hack,
    HolosHack,
    Counter,
    Evade,
    DefenseMode,
    BoostExpired,
    Diagnostic,
    BattleStart,
    BattleEnd,
}

impl ActionKind {
    /// Entries that can change a health value.
    pub const fn is_damaging(self) -> bool {
        matches!(self, Self::Attack | Self::Special | Self::Counter)
    }
}

/// Remaining health of both sides, in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthSnapshot {
    pub a: u32,
    pub b: u32,
}

/// One immutable log line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLogEntry {
    pub round: u32,
    pub actor: String,
    pub target: String,
    pub kind: ActionKind,
    /// Damage dealt by this event, 0 when not applicable.
    pub damage: u32,
    pub message: String,
    pub health: HealthSnapshot,
    pub timestamp: DateTime<Utc>,
}

/// A defensive fallback that was applied instead of failing the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Identity the fallback applies to.
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Append-only sequence of log entries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BattleLog {
    entries: Vec<BattleLogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: BattleLogEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = BattleLogEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[BattleLogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&BattleLogEntry> {
        self.entries.last()
    }

    pub fn entries_for_round(&self, round: u32) -> impl Iterator<Item = &BattleLogEntry> {
        self.entries.iter().filter(move |entry| entry.round == round)
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// Health of both sides after each entry, in order.
    pub fn health_trajectory(&self) -> Vec<HealthSnapshot> {
        self.entries.iter().map(|entry| entry.health).collect()
    }

    /// Total damage recorded against the entries whose actor is `name`.
    pub fn damage_dealt_by(&self, name: &str) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.actor == name && entry.kind.is_damaging())
            .map(|entry| u64::from(entry.damage))
            .sum()
    }

    pub fn into_entries(self) -> Vec<BattleLogEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a BattleLog {
    type Item = &'a BattleLogEntry;
    type IntoIter = std::slice::Iter<'a, BattleLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
