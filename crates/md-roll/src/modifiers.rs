//! Roll modifiers and the pool-size formula.

use serde::{Deserialize, Serialize};

/// Which rating the roll is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// The trained skill.
    Skill,
    /// The base attribute, halved.
    BeginnersLuck,
    /// Nature, on a test within the character's nature.
    NatureWith,
    /// Nature, on a test against the character's nature. Taxed.
    NatureAgainst,
}

impl Strategy {
    /// Returns true for either nature strategy.
    pub fn uses_nature(self) -> bool {
        matches!(self, Self::NatureWith | Self::NatureAgainst)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::BeginnersLuck => write!(f, "beginner's luck"),
            Self::NatureWith => write!(f, "nature (with)"),
            Self::NatureAgainst => write!(f, "nature (against)"),
        }
    }
}

/// How a relevant trait bears on the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TraitEffect {
    /// +1 die.
    Help,
    /// No change.
    #[default]
    Neutral,
    /// -1 die, and the character earns a check.
    Hinder,
}

impl TraitEffect {
    /// Dice added or removed.
    pub fn delta(self) -> i32 {
        match self {
            Self::Help => 1,
            Self::Neutral => 0,
            Self::Hinder => -1,
        }
    }
}

/// Everything the builder has learned about the roll so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// The character has the required skill.
    pub has_skill: bool,
    /// Skill level, or base attribute level when the skill is missing.
    pub skill_level: u8,
    /// The test falls within the character's nature.
    pub is_mousy: bool,
    /// Nature level.
    pub nature_level: u8,
    /// The chosen rating, once picked.
    pub strategy: Option<Strategy>,
    /// Using appropriate gear.
    pub with_gear: bool,
    /// Number of helpers.
    pub helpers: u8,
    /// Tapping nature for extra dice.
    pub tapping_nature: bool,
    /// Persona points spent on dice.
    pub persona: u8,
    /// Trait bearing.
    pub trait_effect: TraitEffect,
}

impl Modifiers {
    /// The rating the chosen strategy rolls, before any bonus.
    pub fn base(&self) -> u32 {
        match self.strategy {
            Some(Strategy::Skill | Strategy::BeginnersLuck) => u32::from(self.skill_level),
            Some(Strategy::NatureWith | Strategy::NatureAgainst) => u32::from(self.nature_level),
            None => 0,
        }
    }

    /// Returns true when beginner's luck halves the pool.
    pub fn using_luck(&self) -> bool {
        self.strategy == Some(Strategy::BeginnersLuck)
    }

    /// Number of dice to roll.
    ///
    /// Gear and helpers are added to the base before beginner's luck halves
    /// it (rounding half up); nature, persona, and trait dice come after.
    pub fn pool_size(&self) -> u32 {
        let mut total = self.base();
        if self.with_gear {
            total += 1;
        }
        total += u32::from(self.helpers);
        if self.using_luck() {
            total = halve_round_half_up(total);
        }
        if self.tapping_nature {
            total += u32::from(self.nature_level);
        }
        total += u32::from(self.persona);
        let adjusted = i64::from(total) + i64::from(self.trait_effect.delta());
        u32::try_from(adjusted.max(0)).unwrap_or(0)
    }

    /// Dice actually thrown: the pool size, floored at one die and capped
    /// at `max_dice`.
    pub fn dice_to_roll(&self, max_dice: u32) -> u32 {
        self.pool_size().clamp(1, max_dice.max(1))
    }
}

/// Halve a count, rounding 0.5 up: 3 becomes 2, 4 becomes 2, 5 becomes 3.
pub fn halve_round_half_up(n: u32) -> u32 {
    n / 2 + n % 2
}
