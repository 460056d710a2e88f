use crate::log::HealthSnapshot;
use crate::state::{CombatantState, Side};

/// Both sides of a battle, addressed by [`Side`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatants {
    pub a: CombatantState,
    pub b: CombatantState,
}

impl Combatants {
    pub fn new(a: CombatantState, b: CombatantState) -> Self {
        Self { a, b }
    }

    pub fn get(&self, side: Side) -> &CombatantState {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut CombatantState {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Borrow `side` and its opponent mutably at once.
    pub fn split_mut(&mut self, side: Side) -> (&mut CombatantState, &mut CombatantState) {
        match side {
            Side::A => (&mut self.a, &mut self.b),
            Side::B => (&mut self.b, &mut self.a),
        }
    }

    /// Side that acts first this round. Side A wins speed ties.
    pub fn initiative(&self) -> [Side; 2] {
        if self.a.speed() >= self.b.speed() {
            [Side::A, Side::B]
        } else {
            [Side::B, Side::A]
        }
    }

    pub fn health(&self) -> HealthSnapshot {
        HealthSnapshot {
            a: self.a.health(),
            b: self.b.health(),
        }
    }

    pub fn any_defeated(&self) -> bool {
        self.a.is_defeated() || self.b.is_defeated()
    }
}
