//! Data-driven battle content.
//!
//! Loaders for the files that feed the battle engine from outside:
//! - the roster (stat lookup table keyed by Holobot name)
//! - reward tables, one default plus named battle contexts
//! - battle configuration overrides per mode
//!
//! Content is read before a battle starts and never appears in battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ConfigSpec, ContentFactory, RewardTableLoader, RewardTables, Roster,
    RosterEntry, RosterLoader,
};
