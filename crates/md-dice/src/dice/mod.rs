//! Dice, faces, and pools.
//!
//! A [`Die`] keeps every face it has ever shown. All of its predicates are
//! derived from that history, which only ever grows.

pub mod history;
pub mod pool;

pub use history::{HistoryEntry, Operation};
pub use pool::DicePool;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

/// The face reported by a die that has never been rolled.
pub const UNROLLED: u8 = 0;

/// How a face reads at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceKind {
    /// Not rolled yet.
    Unrolled,
    /// A failure (1-3).
    Snake,
    /// A plain success (4-5).
    Sword,
    /// A success that can explode (6).
    Axe,
}

impl FaceKind {
    /// Classify a raw face value.
    pub fn of(face: u8) -> Self {
        match face {
            1..=3 => Self::Snake,
            4 | 5 => Self::Sword,
            6 => Self::Axe,
            _ => Self::Unrolled,
        }
    }

    /// Returns true for swords and axes.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Sword | Self::Axe)
    }
}

impl std::fmt::Display for FaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrolled => write!(f, "unrolled"),
            Self::Snake => write!(f, "snake"),
            Self::Sword => write!(f, "sword"),
            Self::Axe => write!(f, "axe"),
        }
    }
}

/// A single d6 and every face it has shown, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    history: Vec<u8>,
}

impl Die {
    /// Create an unrolled die.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a die from previously recorded faces.
    pub fn from_history(faces: impl IntoIterator<Item = u8>) -> DiceResult<Self> {
        let history: Vec<u8> = faces.into_iter().collect();
        if let Some(&bad) = history.iter().find(|f| !(1..=6).contains(*f)) {
            return Err(DiceError::InvalidFace(bad));
        }
        Ok(Self { history })
    }

    /// Roll the die, appending and returning the new face.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u8 {
        let face = rng.random_range(1..=6);
        self.history.push(face);
        face
    }

    /// Every face this die has shown, oldest first.
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// The most recent face, or [`UNROLLED`].
    pub fn face(&self) -> u8 {
        self.history.last().copied().unwrap_or(UNROLLED)
    }

    /// Classification of the most recent face.
    pub fn kind(&self) -> FaceKind {
        FaceKind::of(self.face())
    }

    /// Returns true once the die has been rolled at least once.
    pub fn is_rolled(&self) -> bool {
        !self.history.is_empty()
    }

    /// Showing 4, 5, or 6.
    pub fn is_success(&self) -> bool {
        self.kind().is_success()
    }

    /// Showing 1, 2, or 3.
    pub fn is_snake(&self) -> bool {
        self.kind() == FaceKind::Snake
    }

    /// Showing 6.
    pub fn is_axe(&self) -> bool {
        self.kind() == FaceKind::Axe
    }

    /// A snake may be rerolled only straight off its first roll.
    pub fn can_reroll(&self) -> bool {
        self.is_snake() && self.history.len() == 1
    }

    /// Any die currently showing an axe may explode, however it got there.
    pub fn can_explode(&self) -> bool {
        self.is_axe()
    }

    /// Successes this die has banked across its whole history.
    pub fn value(&self) -> u32 {
        self.history.iter().filter(|&&f| f >= 4).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn face_kinds() {
        assert_eq!(FaceKind::of(0), FaceKind::Unrolled);
        assert_eq!(FaceKind::of(1), FaceKind::Snake);
        assert_eq!(FaceKind::of(3), FaceKind::Snake);
        assert_eq!(FaceKind::of(4), FaceKind::Sword);
        assert_eq!(FaceKind::of(5), FaceKind::Sword);
        assert_eq!(FaceKind::of(6), FaceKind::Axe);
        assert!(FaceKind::Axe.is_success());
        assert!(!FaceKind::Unrolled.is_success());
    }

    #[test]
    fn unrolled_die() {
        let die = Die::new();
        assert_eq!(die.face(), UNROLLED);
        assert!(!die.is_rolled());
        assert!(!die.is_success());
        assert!(!die.is_snake());
        assert!(!die.can_reroll());
        assert!(!die.can_explode());
        assert_eq!(die.value(), 0);
    }

    #[test]
    fn from_history_rejects_bad_faces() {
        assert_eq!(Die::from_history([3, 7]), Err(DiceError::InvalidFace(7)));
        assert_eq!(Die::from_history([0]), Err(DiceError::InvalidFace(0)));
        assert!(Die::from_history([1, 6]).is_ok());
    }

    #[test]
    fn snake_rerolls_only_from_first_roll() {
        let die = Die::from_history([2]).unwrap();
        assert!(die.can_reroll());

        let rerolled = Die::from_history([2, 3]).unwrap();
        assert!(rerolled.is_snake());
        assert!(!rerolled.can_reroll());

        let exploded_then_snake = Die::from_history([6, 1]).unwrap();
        assert!(!exploded_then_snake.can_reroll());
    }

    #[test]
    fn axe_explodes_regardless_of_history() {
        assert!(Die::from_history([6]).unwrap().can_explode());
        assert!(Die::from_history([6, 6]).unwrap().can_explode());
        assert!(Die::from_history([2, 6]).unwrap().can_explode());
        assert!(!Die::from_history([6, 5]).unwrap().can_explode());
    }

    #[test]
    fn value_counts_every_success() {
        assert_eq!(Die::from_history([6, 6, 4]).unwrap().value(), 3);
        assert_eq!(Die::from_history([6, 2]).unwrap().value(), 1);
        assert_eq!(Die::from_history([3, 5]).unwrap().value(), 1);
    }

    #[test]
    fn roll_appends_a_valid_face() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut die = Die::new();
        for n in 1..=20 {
            let face = die.roll(&mut rng);
            assert!((1..=6).contains(&face));
            assert_eq!(die.face(), face);
            assert_eq!(die.history().len(), n);
        }
    }

    #[test]
    fn face_kind_display() {
        assert_eq!(FaceKind::Snake.to_string(), "snake");
        assert_eq!(FaceKind::Axe.to_string(), "axe");
    }
}
