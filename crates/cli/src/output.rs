//! Terminal rendering for battle logs and results.

use anyhow::Result;
use battle_core::{ActionKind, BattleLogEntry, BattleResult, Outcome, Side};
use console::style;
use serde::Serialize;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_entry(entry: &BattleLogEntry) {
    let kind = match entry.kind {
        ActionKind::Attack | ActionKind::Special | ActionKind::Counter => {
            style(entry.kind.as_ref()).red().bold()
        }
        ActionKind::Hack | ActionKind::HolosHack | ActionKind::DefenseMode => {
            style(entry.kind.as_ref()).magenta()
        }
        ActionKind::Diagnostic => style(entry.kind.as_ref()).yellow(),
        ActionKind::BattleStart | ActionKind::BattleEnd => style(entry.kind.as_ref()).cyan().bold(),
        ActionKind::Evade | ActionKind::BoostExpired => style(entry.kind.as_ref()).dim(),
    };
    println!(
        "  [{:>3}] {:<12} {}  {}",
        entry.round,
        kind,
        entry.message,
        style(format!("(A {} / B {})", entry.health.a, entry.health.b)).dim()
    );
}

pub fn print_summary(result: &BattleResult) {
    println!("{}", style("=== Battle Log ===").bold().green());
    for entry in result.log.iter() {
        print_entry(entry);
    }
    println!();

    println!("{}", style("=== Result ===").bold().green());
    let verdict = match (result.outcome, &result.winner) {
        (Outcome::Winner(side), Some(name)) => format!("{name} (side {side}) wins"),
        (Outcome::Winner(side), None) => format!("side {side} wins"),
        (Outcome::Draw, _) => "draw".to_string(),
    };
    println!("  {} {} by {}", style("Outcome:").bold().cyan(), verdict, result.reason);
    println!("  {} {}", style("Rounds:").bold().cyan(), result.rounds);
    println!(
        "  {} A {} / B {}",
        style("Final health:").bold().cyan(),
        result.final_health.a,
        result.final_health.b
    );
    println!();

    println!("{}", style("Rewards:").bold().yellow());
    for side in Side::BOTH {
        let payout = result.rewards.get(side);
        println!(
            "  {} {:<12} currency {:>5}  exp {:>5}  rating {:+}",
            side,
            result.combatants.get(side).name(),
            payout.currency,
            payout.exp,
            payout.rating_delta
        );
    }

    if !result.diagnostics.is_empty() {
        println!();
        println!("{}", style("Diagnostics:").bold().yellow());
        for diagnostic in &result.diagnostics {
            println!("  {}: {}", diagnostic.subject, diagnostic.message);
        }
    }
}
