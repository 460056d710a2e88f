//! Roster loader: the stat lookup table keyed by Holobot name.
//!
//! ```toml
//! [[holobot]]
//! name = "Ace"
//! level = 4
//! attack = 50
//! defense = 30
//! speed = 40
//! max_health = 100
//! special_move = "1st Strike"
//! intelligence = 8
//! parts = { attack = 5, defense = 2 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::{BaseStats, CombatantSetup, PartModifiers, StatLookup, resolve_base_stats};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One roster row: a stat snapshot and the parts it has equipped.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub stats: BaseStats,
    #[serde(default)]
    pub parts: PartModifiers,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RosterFile {
    #[serde(default)]
    holobot: Vec<RosterEntry>,
}

/// Read-only stat table. Lookups are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: BTreeMap<String, RosterEntry>,
}

impl Roster {
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> LoadResult<Self> {
        let mut roster = Self::default();
        for entry in entries {
            let key = roster_key(&entry.stats.name);
            if key.is_empty() {
                anyhow::bail!("Roster entry with an empty name");
            }
            if roster.entries.insert(key, entry.clone()).is_some() {
                anyhow::bail!("Duplicate roster entry '{}'", entry.stats.name);
            }
        }
        Ok(roster)
    }

    pub fn get(&self, name: &str) -> Option<&RosterEntry> {
        self.entries.get(&roster_key(name))
    }

    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Battle setup for `name`, with its parts equipped.
    ///
    /// Unknown names fall back to the neutral stat set and carry a
    /// diagnostic into the battle log.
    pub fn setup(&self, name: &str) -> CombatantSetup {
        let (stats, diagnostic) = resolve_base_stats(self, name);
        let parts = self.get(name).map(|entry| entry.parts).unwrap_or_default();
        let setup = CombatantSetup::new(stats).with_parts(parts);
        match diagnostic {
            Some(diagnostic) => setup.with_diagnostic(diagnostic),
            None => setup,
        }
    }
}

impl StatLookup for Roster {
    fn lookup(&self, id: &str) -> Option<BaseStats> {
        self.get(id).map(|entry| entry.stats.clone())
    }
}

fn roster_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Loader for the roster from TOML files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let file: RosterFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster TOML: {}", e))?;
        Roster::from_entries(file.holobot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"
        [[holobot]]
        name = "Ace"
        attack = 50
        defense = 30
        speed = 40
        max_health = 100
        special_move = "1st Strike"
        parts = { attack = 5 }

        [[holobot]]
        name = "Kuma"
        level = 3
        attack = 40
        defense = 40
        speed = 30
        max_health = 120
    "#;

    #[test]
    fn parses_rows_with_defaults() {
        let roster = RosterLoader::parse(ROSTER).expect("valid roster");
        assert_eq!(roster.len(), 2);

        let ace = roster.get("ace").expect("case-insensitive lookup");
        assert_eq!(ace.stats.level, 1);
        assert_eq!(ace.parts.attack, 5);

        let kuma = roster.lookup("Kuma").expect("present");
        assert_eq!(kuma.level, 3);
        assert_eq!(kuma.special_move, "");
        assert_eq!(kuma.intelligence, 0);
    }

    #[test]
    fn unknown_name_falls_back_with_diagnostic() {
        let roster = RosterLoader::parse(ROSTER).expect("valid roster");
        let setup = roster.setup("Ghost");
        assert_eq!(setup.stats, BaseStats::fallback("Ghost"));
        assert_eq!(setup.diagnostics.len(), 1);

        let setup = roster.setup("Ace");
        assert!(setup.diagnostics.is_empty());
        assert_eq!(setup.parts.attack, 5);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let doubled = format!("{ROSTER}\n[[holobot]]\nname = \"ACE\"\nattack = 1\ndefense = 1\nspeed = 1\nmax_health = 1\n");
        let err = RosterLoader::parse(&doubled).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }
}
