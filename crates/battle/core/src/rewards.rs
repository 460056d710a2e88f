//! Reward calculator.
//!
//! Payouts depend only on who won. Battle contexts that pay differently
//! (league, pool, quest) pass their own [`RewardTable`].

use crate::state::Side;

/// Terminal outcome of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Winner(Side),
    /// Round cap reached with both sides on equal health.
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            Self::Winner(side) => Some(side),
            Self::Draw => None,
        }
    }

    pub fn loser(self) -> Option<Side> {
        self.winner().map(Side::other)
    }

    pub fn is_draw(self) -> bool {
        matches!(self, Self::Draw)
    }
}

/// What one side receives for a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardPayout {
    pub currency: u32,
    pub exp: u32,
    pub rating_delta: i32,
}

impl RewardPayout {
    pub const fn new(currency: u32, exp: u32, rating_delta: i32) -> Self {
        Self {
            currency,
            exp,
            rating_delta,
        }
    }
}

/// Payout magnitudes for one battle context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTable {
    pub winner: RewardPayout,
    pub loser: RewardPayout,
    #[cfg_attr(feature = "serde", serde(default = "default_draw"))]
    pub draw: RewardPayout,
}

#[cfg(feature = "serde")]
fn default_draw() -> RewardPayout {
    RewardTable::DEFAULT.draw
}

impl RewardTable {
    pub const DEFAULT: RewardTable = RewardTable {
        winner: RewardPayout::new(100, 200, 25),
        loser: RewardPayout::new(25, 50, -10),
        draw: RewardPayout::new(50, 100, 0),
    };
}

impl Default for RewardTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Payout for each side, in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidePayouts {
    pub a: RewardPayout,
    pub b: RewardPayout,
}

impl SidePayouts {
    pub fn get(&self, side: Side) -> RewardPayout {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

pub fn calculate_rewards(outcome: Outcome, table: &RewardTable) -> SidePayouts {
    match outcome {
        Outcome::Winner(Side::A) => SidePayouts {
            a: table.winner,
            b: table.loser,
        },
        Outcome::Winner(Side::B) => SidePayouts {
            a: table.loser,
            b: table.winner,
        },
        Outcome::Draw => SidePayouts {
            a: table.draw,
            b: table.draw,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_favours_the_winner() {
        let payouts = calculate_rewards(Outcome::Winner(Side::B), &RewardTable::DEFAULT);
        assert_eq!(payouts.b, RewardPayout::new(100, 200, 25));
        assert_eq!(payouts.a, RewardPayout::new(25, 50, -10));
        assert!(payouts.b.currency > payouts.a.currency);
        assert!(payouts.b.exp > payouts.a.exp);
    }

    #[test]
    fn draw_pays_both_sides_equally() {
        let payouts = calculate_rewards(Outcome::Draw, &RewardTable::DEFAULT);
        assert_eq!(payouts.a, payouts.b);
        assert_eq!(payouts.a.rating_delta, 0);
    }

    #[test]
    fn caller_table_overrides_magnitudes() {
        let league = RewardTable {
            winner: RewardPayout::new(500, 400, 40),
            loser: RewardPayout::new(50, 80, -20),
            ..RewardTable::DEFAULT
        };
        let payouts = calculate_rewards(Outcome::Winner(Side::A), &league);
        assert_eq!(payouts.get(Side::A).currency, 500);
        assert_eq!(payouts.get(Side::B).rating_delta, -20);
    }

    #[test]
    fn outcome_accessors() {
        assert_eq!(Outcome::Winner(Side::A).loser(), Some(Side::B));
        assert_eq!(Outcome::Draw.winner(), None);
        assert!(Outcome::Draw.is_draw());
    }
}
