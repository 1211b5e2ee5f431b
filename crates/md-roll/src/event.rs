//! Side effects a roll asks the character sheet to apply.
//!
//! The builder never touches a sheet itself. It reports what happened and
//! leaves bookkeeping to whoever owns the character.

use serde::{Deserialize, Serialize};

use crate::modifiers::Strategy;

/// Why nature was taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCause {
    /// Nature was rolled on a test against the character's nature.
    ActedAgainstNature,
    /// Nature was tapped for extra dice outside the character's nature.
    TappedNature,
}

/// A side effect for the character-sheet collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollEvent {
    /// Reduce nature.
    NatureTaxed {
        /// Points of tax.
        amount: u32,
        /// What incurred it.
        cause: TaxCause,
    },
    /// Deduct persona points.
    PersonaSpent {
        /// Points spent.
        points: u32,
    },
    /// Deduct fate points.
    FateSpent {
        /// Points spent.
        points: u32,
    },
    /// A hindering trait earned the character a check.
    CheckEarned,
    /// A rating was tested and may log advancement.
    SkillTested {
        /// Which rating was rolled.
        strategy: Strategy,
    },
}

impl std::fmt::Display for RollEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NatureTaxed { amount, cause } => match cause {
                TaxCause::ActedAgainstNature => {
                    write!(f, "nature taxed by {amount} (acted against nature)")
                }
                TaxCause::TappedNature => write!(f, "nature taxed by {amount} (tapped nature)"),
            },
            Self::PersonaSpent { points } => write!(f, "spent {points} persona"),
            Self::FateSpent { points } => write!(f, "spent {points} fate"),
            Self::CheckEarned => write!(f, "earned a check"),
            Self::SkillTested { strategy } => write!(f, "tested {strategy}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            RollEvent::NatureTaxed {
                amount: 1,
                cause: TaxCause::TappedNature
            }
            .to_string(),
            "nature taxed by 1 (tapped nature)"
        );
        assert_eq!(RollEvent::FateSpent { points: 1 }.to_string(), "spent 1 fate");
        assert_eq!(RollEvent::CheckEarned.to_string(), "earned a check");
        assert_eq!(
            RollEvent::SkillTested {
                strategy: Strategy::BeginnersLuck
            }
            .to_string(),
            "tested beginner's luck"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let event = RollEvent::PersonaSpent { points: 2 };
        let json = serde_json::to_string(&event).unwrap();
        let back: RollEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
