//! Stat lookup oracle.
//!
//! The engine never fetches combatant data itself. Callers that resolve
//! identities through a table (a roster file, a database snapshot) implement
//! [`StatLookup`] and use [`resolve_base_stats`], which falls back to a
//! neutral stat set instead of failing the battle.

use std::collections::BTreeMap;

use crate::log::Diagnostic;
use crate::stats::BaseStats;

/// Read-only, pre-battle stat table keyed by combatant identity.
pub trait StatLookup {
    fn lookup(&self, id: &str) -> Option<BaseStats>;
}

impl StatLookup for BTreeMap<String, BaseStats> {
    fn lookup(&self, id: &str) -> Option<BaseStats> {
        self.get(id).cloned()
    }
}

/// Resolve `id`, substituting [`BaseStats::fallback`] when it is unknown.
///
/// The returned diagnostic should be attached to the combatant's setup so it
/// lands in the battle log.
pub fn resolve_base_stats(
    lookup: &(impl StatLookup + ?Sized),
    id: &str,
) -> (BaseStats, Option<Diagnostic>) {
    match lookup.lookup(id) {
        Some(stats) => (stats, None),
        None => {
            tracing::warn!(id, "unknown combatant identity, using fallback stats");
            (
                BaseStats::fallback(id),
                Some(Diagnostic::new(
                    id,
                    format!("unknown combatant '{id}', using default stat set"),
                )),
            )
        }
    }
}
