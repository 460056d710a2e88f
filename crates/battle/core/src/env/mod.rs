//! Injectable collaborators: randomness, time, and stat lookup.
//!
//! The engine owns no global state. Each of these is passed in by the caller
//! so that concurrent battles stay independent and tests stay deterministic.

mod clock;
mod lookup;
mod rng;

pub use clock::{Clock, FixedClock, SystemClock};
pub use lookup::{StatLookup, resolve_base_stats};
pub use rng::{ConstantRng, PcgRng, RandRng, RngOracle, SequenceRng};
