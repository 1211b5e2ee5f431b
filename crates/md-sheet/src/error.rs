//! Error types for character sheets.

use thiserror::Error;

/// Result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Errors that can occur while reading or updating a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The name is neither a base stat nor a known skill.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A rating could not be parsed.
    #[error("invalid rating: {0:?}")]
    InvalidRating(String),

    /// The character has no rating for a known skill.
    #[error("{character} has no rating in {skill}")]
    Unrated {
        /// Character name.
        character: String,
        /// Skill name.
        skill: String,
    },
}
