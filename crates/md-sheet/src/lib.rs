//! Character skill ratings for MiceDice.
//!
//! The roll engine never reads a character sheet directly. Anything that can
//! answer "what is this character's rating in that skill?" implements
//! [`SkillProvider`]; [`CharacterSheet`] is the in-memory implementation.

pub mod error;
pub mod rating;
pub mod sheet;

pub use error::{SheetError, SheetResult};
pub use rating::{Rating, SkillRating};
pub use sheet::{BASE_STATS, CharacterSheet, SKILLS, SkillProvider, is_known_skill, rating_report};
