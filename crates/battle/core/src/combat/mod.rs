//! Combat rules: coefficient presets, damage and chance math, and the
//! special/hack effect catalogs.

pub mod calc;
mod effects;
mod hack;
mod ruleset;

pub use calc::{attack_damage, base_attack_damage, counter_chance, counter_damage, evasion_chance};
pub use effects::{EffectRecord, EffectTarget, SpecialMove, SpecialTier, resolve_special};
pub use hack::{HackEffect, HackError, HolosHack, HolosHackError, apply_hack, apply_holos_hack};
pub use ruleset::{CounterCoefficients, CounterDamage, EvasionCoefficients, Ruleset, SpecialTrigger};
