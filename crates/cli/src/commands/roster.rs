//! List the Holobots in the roster.

use std::path::PathBuf;

use anyhow::Result;
use battle_content::ContentFactory;
use clap::Parser;
use console::style;

use crate::config::CliConfig;
use crate::output::{OutputFormat, print_json};

/// List the Holobots in the roster
#[derive(Parser)]
pub struct RosterList {
    /// Data directory (defaults to HOLOBOT_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl RosterList {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let factory = ContentFactory::new(config.data_dir(self.data_dir));
        let roster = factory.load_roster()?;

        if let OutputFormat::Json = self.format {
            let entries: Vec<_> = roster.entries().map(|entry| &entry.stats).collect();
            return print_json(&entries);
        }

        println!(
            "{} {} ({} Holobots)",
            style("Roster:").bold().cyan(),
            factory.data_dir().display(),
            roster.len()
        );
        println!();
        println!(
            "  {:<12} {:>3} {:>5} {:>5} {:>5} {:>5} {:>4}  {}",
            "NAME", "LV", "ATK", "DEF", "SPD", "HP", "INT", "SPECIAL"
        );
        for entry in roster.entries() {
            let stats = &entry.stats;
            println!(
                "  {:<12} {:>3} {:>5} {:>5} {:>5} {:>5} {:>4}  {}",
                stats.name,
                stats.level,
                stats.attack,
                stats.defense,
                stats.speed,
                stats.max_health,
                stats.intelligence,
                if stats.special_move.is_empty() { "-" } else { stats.special_move.as_str() }
            );
            if !entry.parts.is_empty() {
                println!("  {:<12} {}", "", style(format!("parts: {:?}", entry.parts)).dim());
            }
        }
        Ok(())
    }
}
