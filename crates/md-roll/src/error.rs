//! Error types for the roll builder.

use thiserror::Error;

use crate::ids::MessageId;

/// Result type for roll operations.
pub type RollResult<T> = Result<T, RollError>;

/// Errors surfaced to the caller. None of them leave state half-changed.
#[derive(Debug, Error)]
pub enum RollError {
    /// The dice count or obstacle was rejected.
    #[error(transparent)]
    Dice(#[from] md_dice::DiceError),

    /// A rating query named an unknown or unrated skill.
    #[error(transparent)]
    Sheet(#[from] md_sheet::SheetError),

    /// No open roll is rendered into that message.
    #[error("no open roll for message {0}")]
    UnknownSession(MessageId),
}

impl RollError {
    /// Returns true for bad user input, as opposed to a stale message.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Dice(_) | Self::Sheet(_))
    }
}
