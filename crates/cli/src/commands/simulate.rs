//! Auto-run a battle to completion.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use battle_content::ContentFactory;
use battle_core::{Battle, Mode, PcgRng, RunBudget};
use clap::Parser;
use console::style;

use crate::config::CliConfig;
use crate::output::{OutputFormat, print_json, print_summary};

/// Run a battle to completion and print the result
#[derive(Parser)]
pub struct Simulate {
    /// Roster name of side A
    #[arg(value_name = "A")]
    a: String,

    /// Roster name of side B
    #[arg(value_name = "B")]
    b: String,

    /// RNG seed (defaults to one derived from the clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Daily step count for side A
    #[arg(long, value_name = "STEPS", allow_negative_numbers = true)]
    steps_a: Option<i64>,

    /// Daily step count for side B
    #[arg(long, value_name = "STEPS", allow_negative_numbers = true)]
    steps_b: Option<i64>,

    /// Reward context from rewards.toml (e.g. league, pool, quest)
    #[arg(short, long)]
    context: Option<String>,

    /// Stop after this many rounds even if the battle is undecided
    #[arg(long, value_name = "ROUNDS")]
    max_rounds: Option<u32>,

    /// Stop after this many milliseconds even if the battle is undecided
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Data directory (defaults to HOLOBOT_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Simulate {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let factory = ContentFactory::new(config.data_dir(self.data_dir));
        let roster = factory.load_roster()?;
        let battle_config = factory.load_config(Mode::AutoRun)?;
        let context = config.reward_context(self.context);
        let rewards = factory.load_reward_table(context.as_deref())?;

        let mut a = roster.setup(&self.a);
        if let Some(steps) = self.steps_a {
            a = a.with_steps(steps);
        }
        let mut b = roster.setup(&self.b);
        if let Some(steps) = self.steps_b {
            b = b.with_steps(steps);
        }

        let seed = super::seed_or_now(self.seed);
        tracing::info!(a = %self.a, b = %self.b, seed, context = ?context, "simulating battle");

        let mut battle =
            Battle::new(battle_config, &a, &b, PcgRng::new(seed))?.with_rewards(rewards);

        let mut budget = RunBudget::unlimited();
        if let Some(rounds) = self.max_rounds {
            budget = budget.with_max_rounds(rounds);
        }
        if let Some(ms) = self.timeout_ms {
            budget = budget.with_deadline(Instant::now() + Duration::from_millis(ms));
        }

        let result = match battle.run(budget) {
            Ok(result) => result,
            Err(interrupted) => {
                eprintln!(
                    "{} stopped after {} rounds ({}), battle undecided",
                    style("Interrupted:").bold().yellow(),
                    interrupted.rounds,
                    interrupted.reason
                );
                return match self.format {
                    OutputFormat::Json => print_json(&interrupted.log),
                    OutputFormat::Summary => {
                        for entry in interrupted.log.iter() {
                            crate::output::print_entry(entry);
                        }
                        Ok(())
                    }
                };
            }
        };

        match self.format {
            OutputFormat::Summary => {
                println!("{} {}", style("Seed:").bold().cyan(), seed);
                println!();
                print_summary(&result);
                Ok(())
            }
            OutputFormat::Json => print_json(&result),
        }
    }
}
