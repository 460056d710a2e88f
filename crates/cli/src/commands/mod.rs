//! Command implementations for the battle driver.
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod roster;
mod simulate;
mod step;

pub use roster::RosterList;
pub use simulate::Simulate;
pub use step::Step;

use std::time::{SystemTime, UNIX_EPOCH};

/// Seed for runs that did not ask for one. Logged so the run can be replayed.
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        tracing::info!(seed, "no seed given, derived one from the clock");
        seed
    })
}
