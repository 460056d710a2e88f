//! Resolve a stepped battle round by round.
//!
//! Live state between invocations is carried by a resume file: `--save`
//! writes both sides' [`ResumeState`] after the last round, `--resume` feeds
//! it back into the next battle.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{Battle, Mode, PcgRng, ResumeState, Side};
use clap::Parser;
use console::style;
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;
use crate::output::{print_entry, print_summary};
use crate::script::{ScriptedCommand, commands_for_round};

/// Resolve a battle round by round with scripted commands
#[derive(Parser)]
pub struct Step {
    /// Roster name of side A
    #[arg(value_name = "A")]
    a: String,

    /// Roster name of side B
    #[arg(value_name = "B")]
    b: String,

    /// Number of rounds to resolve in this invocation
    #[arg(short, long, default_value_t = 1)]
    rounds: u32,

    /// Side A's command for each round, in order (e.g. special, hack:heal, holos:overdrive)
    #[arg(short = 'a', long = "command-a", value_name = "CMD")]
    commands_a: Vec<ScriptedCommand>,

    /// Side B's command for each round, in order
    #[arg(short = 'b', long = "command-b", value_name = "CMD")]
    commands_b: Vec<ScriptedCommand>,

    /// RNG seed (defaults to one derived from the clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Reward context from rewards.toml (e.g. league, pool, quest)
    #[arg(short, long)]
    context: Option<String>,

    /// Resume file written by a previous `--save`
    #[arg(long, value_name = "FILE")]
    resume: Option<PathBuf>,

    /// Write both sides' live state here after the last round
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Data directory (defaults to HOLOBOT_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

/// On-disk form of both sides' live state.
#[derive(Debug, Serialize, Deserialize)]
struct ResumeFile {
    /// Rounds already resolved; the next invocation continues from here.
    #[serde(default)]
    round: u32,
    a: ResumeState,
    b: ResumeState,
}

impl Step {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let factory = ContentFactory::new(config.data_dir(self.data_dir.clone()));
        let roster = factory.load_roster()?;
        let battle_config = factory.load_config(Mode::Stepped)?;
        let context = config.reward_context(self.context.clone());
        let rewards = factory.load_reward_table(context.as_deref())?;

        let mut a = roster.setup(&self.a);
        let mut b = roster.setup(&self.b);
        let mut rounds_played = 0;
        if let Some(path) = &self.resume {
            let saved = read_resume(path)?;
            rounds_played = saved.round;
            a = a.with_resume(saved.a);
            b = b.with_resume(saved.b);
        }

        let seed = super::seed_or_now(self.seed);
        tracing::info!(a = %self.a, b = %self.b, seed, rounds_played, "stepping battle");
        let mut battle = Battle::resume(battle_config, &a, &b, rounds_played, PcgRng::new(seed))?
            .with_rewards(rewards);

        for entry in battle.log().iter() {
            print_entry(entry);
        }

        for _ in 0..self.rounds {
            if battle.is_finished() {
                break;
            }
            let commands = commands_for_round(&self.commands_a, &self.commands_b, battle.round() + 1);
            let outcome = battle.step(&commands)?;

            println!("{}", style(format!("--- Round {} ---", outcome.round)).bold().green());
            for entry in &outcome.entries {
                print_entry(entry);
            }
            for rejection in &outcome.rejections {
                println!(
                    "  {} side {}: {}",
                    style("Refused").yellow().bold(),
                    rejection.side,
                    rejection.error
                );
            }
        }

        if let Some(result) = battle.result() {
            println!();
            print_summary(&result);
        }

        let state = ResumeFile {
            round: battle.round(),
            a: battle.resume_state(Side::A),
            b: battle.resume_state(Side::B),
        };
        match &self.save {
            Some(path) => {
                write_resume(path, &state)?;
                println!("{} {}", style("Saved:").bold().cyan(), path.display());
            }
            None => {
                println!();
                println!("{}", style("Resume state:").bold().yellow());
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
        }
        Ok(())
    }
}

fn read_resume(path: &Path) -> Result<ResumeFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read resume file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse resume file: {}", path.display()))
}

fn write_resume(path: &Path, state: &ResumeFile) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write resume file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BaseStats, BattleConfig, BattleError, CombatantSetup, CombatantState};

    #[test]
    fn resume_file_survives_disk() {
        let setup = CombatantSetup::new(BaseStats::new("Ace", 50, 30, 40, 100));
        let (state, _) =
            CombatantState::prepare(&setup, &BattleConfig::stepped()).expect("valid setup");
        let file = ResumeFile {
            round: 7,
            a: ResumeState {
                health: 42,
                ..state.resume_state()
            },
            b: state.resume_state(),
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pair.json");
        write_resume(&path, &file).expect("write");
        let loaded = read_resume(&path).expect("read");

        assert_eq!(loaded.round, 7);
        assert_eq!(loaded.a, file.a);
        assert_eq!(loaded.b.health, 100);
    }

    #[test]
    fn resume_file_without_round_starts_from_zero() {
        let setup = CombatantSetup::new(BaseStats::new("Ace", 50, 30, 40, 100));
        let (state, _) =
            CombatantState::prepare(&setup, &BattleConfig::stepped()).expect("valid setup");
        let pair = serde_json::json!({
            "a": state.resume_state(),
            "b": state.resume_state(),
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("legacy.json");
        std::fs::write(&path, pair.to_string()).expect("write");

        assert_eq!(read_resume(&path).expect("read").round, 0);
    }

    #[test]
    fn saved_round_carries_the_cap_across_sessions() {
        let setup = CombatantSetup::new(BaseStats::new("Ace", 50, 30, 40, 100));
        let config = BattleConfig::stepped().with_round_cap(4);
        let (state, _) = CombatantState::prepare(&setup, &config).expect("valid setup");
        let saved = ResumeFile {
            round: 4,
            a: state.resume_state(),
            b: state.resume_state(),
        };

        let a = setup.clone().with_resume(saved.a);
        let b = setup.with_resume(saved.b);
        let result = Battle::resume(config, &a, &b, saved.round, PcgRng::new(1));
        assert!(matches!(
            result,
            Err(BattleError::ResumeRoundAtCap { round: 4, round_cap: 4 })
        ));
    }
}
