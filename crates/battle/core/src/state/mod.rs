//! Per-battle combatant state and side identity.

mod combatant;
mod pair;
mod side;

pub use combatant::{
    Baseline, BoostTimers, BoostedStat, CombatantSetup, CombatantState, InvalidCombatant,
    ResumeState,
};
pub use pair::Combatants;
pub use side::Side;
