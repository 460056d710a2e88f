//! Base stat snapshots and equipped-part modifiers.
//!
//! A [`BaseStats`] record is what the caller hands the engine for one side:
//! the combatant's identity plus its raw numbers. Values are signed so that a
//! corrupt snapshot (negative health, negative attack) can be detected and
//! rejected before any round executes rather than silently wrapping.

/// Stat snapshot for one Holobot, as provided by the caller's lookup table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub max_health: i32,
    /// Catalog key of the special move (e.g. `"1st Strike"`).
    ///
    /// Unrecognized keys are not an error; the move resolves to a no-op.
    #[cfg_attr(feature = "serde", serde(default))]
    pub special_move: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub intelligence: i32,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl BaseStats {
    pub const FALLBACK_ATTACK: i32 = 10;
    pub const FALLBACK_DEFENSE: i32 = 10;
    pub const FALLBACK_SPEED: i32 = 10;
    pub const FALLBACK_MAX_HEALTH: i32 = 100;
    pub const FALLBACK_INTELLIGENCE: i32 = 5;

    pub fn new(
        name: impl Into<String>,
        attack: i32,
        defense: i32,
        speed: i32,
        max_health: i32,
    ) -> Self {
        Self {
            name: name.into(),
            level: 1,
            attack,
            defense,
            speed,
            max_health,
            special_move: String::new(),
            intelligence: 0,
        }
    }

    /// Neutral stat set used when an identity is missing from the lookup table.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Self::FALLBACK_ATTACK,
            Self::FALLBACK_DEFENSE,
            Self::FALLBACK_SPEED,
            Self::FALLBACK_MAX_HEALTH,
        )
        .with_intelligence(Self::FALLBACK_INTELLIGENCE)
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_special_move(mut self, special_move: impl Into<String>) -> Self {
        self.special_move = special_move.into();
        self
    }

    #[must_use]
    pub fn with_intelligence(mut self, intelligence: i32) -> Self {
        self.intelligence = intelligence;
        self
    }

    /// Fold pre-summed equipped-part modifiers into the snapshot.
    ///
    /// The result becomes the baseline that timed boosts revert to.
    #[must_use]
    pub fn with_parts(mut self, parts: &PartModifiers) -> Self {
        self.attack = self.attack.saturating_add(parts.attack);
        self.defense = self.defense.saturating_add(parts.defense);
        self.speed = self.speed.saturating_add(parts.speed);
        self.max_health = self.max_health.saturating_add(parts.max_health);
        self.intelligence = self.intelligence.saturating_add(parts.intelligence);
        self
    }
}

/// Flat stat modifiers from equipped parts, already summed by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartModifiers {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub max_health: i32,
    pub intelligence: i32,
}

impl PartModifiers {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
