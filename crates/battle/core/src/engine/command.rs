use crate::combat::{HackEffect, HolosHack};
use crate::state::Side;

/// What a side asks to do on its turn.
///
/// Everything except [`Command::Auto`] and [`Command::Special`] resolves
/// before the side's attack, on the side's own turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    /// Normal attack; special when the ruleset's trigger fires.
    #[default]
    Auto,
    /// Use the special move if the gauge holds at least a partial charge.
    Special,
    /// Spend a full hack gauge, then attack.
    Hack(HackEffect),
    /// Use one overcharge, then attack.
    HolosHack(HolosHack),
    /// Toggle defense mode, then attack.
    DefenseMode(bool),
}

/// One command per side for a single round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commands {
    pub a: Command,
    pub b: Command,
}

impl Commands {
    /// Both sides on [`Command::Auto`]. The auto-run policy.
    pub const AUTO: Commands = Commands {
        a: Command::Auto,
        b: Command::Auto,
    };

    pub fn get(&self, side: Side) -> Command {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    #[must_use]
    pub fn with(mut self, side: Side, command: Command) -> Self {
        match side {
            Side::A => self.a = command,
            Side::B => self.b = command,
        }
        self
    }
}
