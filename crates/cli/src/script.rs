//! Command-line syntax for per-round battle commands.
//!
//! | Text               | Command                               |
//! |--------------------|---------------------------------------|
//! | `auto`             | normal attack                         |
//! | `special`          | special move                          |
//! | `hack:<effect>`    | e.g. `hack:heal`, `hack:raise_speed`  |
//! | `holos:<variant>`  | e.g. `holos:fill_special`             |
//! | `defense:on/off`   | toggle defense mode                   |

use std::str::FromStr;

use anyhow::anyhow;
use battle_core::{Command, Commands, HackEffect, HolosHack};

/// A [`Command`] parsed from its command-line spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedCommand(pub Command);

impl FromStr for ScriptedCommand {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_ascii_lowercase();
        let (head, arg) = match text.split_once(':') {
            Some((head, arg)) => (head, Some(arg)),
            None => (text.as_str(), None),
        };

        let command = match (head, arg) {
            ("auto", None) => Command::Auto,
            ("special", None) => Command::Special,
            ("hack", Some(effect)) => Command::Hack(
                HackEffect::from_str(effect)
                    .map_err(|_| anyhow!("unknown hack effect '{effect}'"))?,
            ),
            ("holos", Some(variant)) => Command::HolosHack(
                HolosHack::from_str(variant)
                    .map_err(|_| anyhow!("unknown holos hack '{variant}'"))?,
            ),
            ("defense", Some("on")) => Command::DefenseMode(true),
            ("defense", Some("off")) => Command::DefenseMode(false),
            _ => return Err(anyhow!("unrecognized command '{text}'")),
        };
        Ok(Self(command))
    }
}

/// Commands for `round` (1-based); sides with a shorter script fall back to auto.
pub fn commands_for_round(a: &[ScriptedCommand], b: &[ScriptedCommand], round: u32) -> Commands {
    let index = round.saturating_sub(1) as usize;
    Commands {
        a: a.get(index).map(|c| c.0).unwrap_or_default(),
        b: b.get(index).map(|c| c.0).unwrap_or_default(),
    }
}
