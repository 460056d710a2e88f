//! Pre-battle stat inputs.
//!
//! Everything here is computed before the first round and never touched
//! again: the caller's base snapshot, equipped-part modifiers, and the
//! fitness bonus bundle derived from a daily step count.

pub mod base;
pub mod fitness;

pub use base::{BaseStats, PartModifiers};
pub use fitness::{FitnessBonus, FitnessTier, sanitize_steps};
