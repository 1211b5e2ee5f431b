//! Response tokens fed into an interactive roll.
//!
//! The transport turns whatever the user clicked into a [`ResponseToken`]
//! before it reaches the builder. [`ResponseToken::from_emoji`] and
//! [`ResponseToken::emoji`] give the default reaction mapping.

use serde::{Deserialize, Serialize};

const KEYCAP_SUFFIX: &str = "\u{fe0f}\u{20e3}";

/// A named option, used where yes/no or a number does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Roll the trained skill.
    Skill,
    /// Roll the base attribute with beginner's luck.
    Luck,
    /// Roll nature instead.
    Nature,
    /// The trait helps (+1 die).
    Help,
    /// The trait does not come into play.
    Neutral,
    /// The trait hampers (-1 die, earns a check).
    Hinder,
    /// Explode every axe.
    Explode,
    /// Reroll one snake.
    RerollOne,
    /// Reroll every snake.
    RerollAll,
}

/// One response to the current prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseToken {
    /// Affirmative answer.
    Yes,
    /// Negative answer.
    No,
    /// A number (level, helper count, persona points).
    Numeric(u8),
    /// A named option.
    Named(Choice),
    /// Commit the built pool and roll it.
    Confirm,
    /// Accept the result and close the roll.
    Finish,
    /// Abandon the roll. Honored at every step.
    Cancel,
    /// Show help for the current step.
    Info,
    /// Show the full roll log.
    Audit,
}

impl ResponseToken {
    /// The reaction that stands for this token.
    pub fn emoji(&self) -> String {
        match self {
            Self::Yes => "👍".to_string(),
            Self::No => "👎".to_string(),
            Self::Numeric(n) => format!("{n}{KEYCAP_SUFFIX}"),
            Self::Named(choice) => match choice {
                Choice::Skill => "🎯",
                Choice::Luck => "🍀",
                Choice::Nature => "🐭",
                Choice::Help => "😊",
                Choice::Neutral => "😐",
                Choice::Hinder => "😩",
                Choice::Explode => "💥",
                Choice::RerollOne => "🔮",
                Choice::RerollAll => "🎭",
            }
            .to_string(),
            Self::Confirm => "🎲".to_string(),
            Self::Finish => "🏁".to_string(),
            Self::Cancel => "❌".to_string(),
            Self::Info => "ℹ️".to_string(),
            Self::Audit => "🔎".to_string(),
        }
    }

    /// Read a reaction. Unrecognized reactions yield `None`.
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        let token = match emoji {
            "👍" => Self::Yes,
            "👎" => Self::No,
            "🎯" => Self::Named(Choice::Skill),
            "🍀" => Self::Named(Choice::Luck),
            "🐭" => Self::Named(Choice::Nature),
            "😊" => Self::Named(Choice::Help),
            "😐" => Self::Named(Choice::Neutral),
            "😩" => Self::Named(Choice::Hinder),
            "💥" => Self::Named(Choice::Explode),
            "🔮" => Self::Named(Choice::RerollOne),
            "🎭" => Self::Named(Choice::RerollAll),
            "🎲" => Self::Confirm,
            "🏁" => Self::Finish,
            "❌" => Self::Cancel,
            "ℹ️" | "ℹ" => Self::Info,
            "🔎" | "❓" => Self::Audit,
            other => {
                let digit = other.strip_suffix(KEYCAP_SUFFIX)?;
                let mut chars = digit.chars();
                let n = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Numeric(n as u8)
            }
        };
        Some(token)
    }
}

impl std::fmt::Display for ResponseToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.emoji())
    }
}
