//! Skill ratings and their advancement tracks.
//!
//! A rating advances once a character has logged enough passed and failed
//! tests at it. A rated skill needs `rating` passes and `rating - 1` fails;
//! an untrained skill, tested with beginner's luck, only tracks passes
//! toward a fixed target of seven.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SheetError, SheetResult};

/// Passes an untrained skill needs before it can be learned.
const UNTRAINED_TARGET: u32 = 7;

/// Highest rating a nature or skill may reach.
const MAX_RATING: u8 = 7;

/// A character's rating in one skill or base stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    /// A trained rating (1-7).
    Level(u8),
    /// Not trained; tests use beginner's luck.
    Untrained,
}

impl Rating {
    /// The trained level, if any.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::Level(n) => Some(n),
            Self::Untrained => None,
        }
    }
}

impl FromStr for Rating {
    type Err = SheetError;

    fn from_str(s: &str) -> SheetResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("x") {
            return Ok(Self::Untrained);
        }
        match trimmed.parse::<u8>() {
            Ok(n) if (1..=MAX_RATING).contains(&n) => Ok(Self::Level(n)),
            _ => Err(SheetError::InvalidRating(s.to_string())),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Level(n) => write!(f, "{n}"),
            Self::Untrained => write!(f, "*"),
        }
    }
}

/// A rating together with its advancement progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRating {
    /// Current rating.
    pub rating: Rating,
    /// Passed tests logged toward advancement.
    pub success_count: u32,
    /// Failed tests logged toward advancement.
    pub fail_count: u32,
}

impl SkillRating {
    /// A rating with no progress logged.
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            success_count: 0,
            fail_count: 0,
        }
    }

    /// Set the logged progress.
    pub fn with_progress(mut self, success_count: u32, fail_count: u32) -> Self {
        self.success_count = success_count;
        self.fail_count = fail_count;
        self
    }

    /// Passes required to advance.
    pub fn successes_needed(&self) -> u32 {
        match self.rating {
            Rating::Level(n) => u32::from(n),
            Rating::Untrained => UNTRAINED_TARGET,
        }
    }

    /// Fails required to advance. Untrained skills do not track fails.
    pub fn fails_needed(&self) -> u32 {
        match self.rating {
            Rating::Level(n) => u32::from(n).saturating_sub(1),
            Rating::Untrained => 0,
        }
    }

    /// Returns true once both tracks are full.
    pub fn can_advance(&self) -> bool {
        self.success_count >= self.successes_needed() && self.fail_count >= self.fails_needed()
    }

    /// The pass track, filled then empty (`✓✓◯`).
    pub fn success_track(&self) -> String {
        track(self.success_count, self.successes_needed())
    }

    /// The fail track, filled then empty.
    pub fn fail_track(&self) -> String {
        match self.rating {
            Rating::Level(_) => track(self.fail_count, self.fails_needed()),
            Rating::Untrained => String::new(),
        }
    }

    /// One column-aligned progress line, skill label first.
    pub fn progress_line(&self, skill: &str) -> String {
        let label = format!("{}: {}", title_case(skill), self.rating);
        format!(
            "{label:<20}[ {:<10} | {:<9} ]",
            self.success_track(),
            self.fail_track()
        )
    }
}

fn track(filled: u32, needed: u32) -> String {
    let empty = needed.saturating_sub(filled);
    let mut out = "✓".repeat(filled as usize);
    out.push_str(&"◯".repeat(empty as usize));
    out
}

/// Capitalize each word: `weather watcher` becomes `Weather Watcher`.
pub(crate) fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
