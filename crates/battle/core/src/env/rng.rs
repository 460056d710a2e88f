//! RNG oracle for deterministic battle resolution.
//!
//! Every probability draw in the engine (evasion, counter-attacks, the
//! auto-run special trigger) goes through an [`RngOracle`] passed in by the
//! caller. Nothing in the crate touches a process-wide generator, so two
//! battles running side by side never share hidden state, and a battle is
//! replayable from its seed.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed they produce
//! the same sequence. [`PcgRng`] is the default generator; [`RandRng`] adapts
//! any `rand::RngCore` (for example a seeded ChaCha stream).

/// Source of random rolls for a battle.
pub trait RngOracle {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform roll in `[0, 1)`.
    fn roll(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Returns `true` with probability `p`.
    ///
    /// A draw succeeds iff `roll < p`, so `p <= 0` never succeeds and
    /// `p >= 1` always does.
    fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn roll(&mut self) -> f64 {
        (**self).roll()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a generator from a seed.
    ///
    /// The seed is advanced once so that nearby seeds do not share a first
    /// output.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::step(seed.wrapping_add(Self::INCREMENT)),
        }
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::step(old);
        Self::output(old)
    }
}

/// Adapter that lets any `rand::RngCore` drive a battle.
///
/// ```
/// # use battle_core::env::{RandRng, RngOracle};
/// # use rand::rngs::mock::StepRng;
/// let mut rng = RandRng::new(StepRng::new(0, 1));
/// assert!(rng.roll() < 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct RandRng<R> {
    inner: R,
}

impl<R: rand::RngCore> RandRng<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: rand::RngCore> RngOracle for RandRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

/// Test double that returns the same roll forever.
///
/// `ConstantRng::new(0.99)` never evades, never counters and never fires the
/// random special trigger under either preset ruleset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRng {
    roll: f64,
}

impl ConstantRng {
    pub fn new(roll: f64) -> Self {
        Self {
            roll: roll.clamp(0.0, 1.0 - f64::EPSILON),
        }
    }

    /// Every chance-based draw fails.
    pub fn never() -> Self {
        Self::new(1.0)
    }

    /// Every chance-based draw with a positive probability succeeds.
    pub fn always() -> Self {
        Self::new(0.0)
    }
}

impl RngOracle for ConstantRng {
    fn next_u32(&mut self) -> u32 {
        (self.roll * (f64::from(u32::MAX) + 1.0)) as u32
    }

    fn roll(&mut self) -> f64 {
        self.roll
    }
}

/// Test double that replays a scripted list of rolls, then repeats the last.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRng {
    rolls: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of rolls consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RngOracle for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.roll() * (f64::from(u32::MAX) + 1.0)) as u32
    }

    fn roll(&mut self) -> f64 {
        let value = match self.rolls.get(self.cursor) {
            Some(value) => *value,
            None => self.rolls.last().copied().unwrap_or(0.0),
        };
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn pcg_seeds_diverge() {
        let mut a = PcgRng::new(1);
        let mut b = PcgRng::new(2);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn rolls_stay_in_unit_interval() {
        let mut rng = PcgRng::new(7);
        for _ in 0..1_000 {
            let roll = rng.roll();
            assert!((0.0..1.0).contains(&roll), "roll out of range: {roll}");
        }
    }

    #[test]
    fn constant_never_and_always() {
        let mut never = ConstantRng::never();
        let mut always = ConstantRng::always();
        assert!(!never.chance(0.45));
        assert!(always.chance(0.05));
        assert!(!always.chance(0.0));
    }

    #[test]
    fn sequence_replays_then_repeats_last() {
        let mut rng = SequenceRng::new([0.1, 0.9]);
        assert_eq!(rng.roll(), 0.1);
        assert_eq!(rng.roll(), 0.9);
        assert_eq!(rng.roll(), 0.9);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn rand_adapter_is_reproducible() {
        let mut a = RandRng::new(rand_chacha::ChaCha8Rng::seed_from_u64(9));
        let mut b = RandRng::new(rand_chacha::ChaCha8Rng::seed_from_u64(9));
        for _ in 0..16 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
