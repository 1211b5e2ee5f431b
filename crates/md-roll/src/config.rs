//! Configuration for the roll manager.

use serde::{Deserialize, Serialize};

use md_dice::DEFAULT_MAX_DICE;

/// How die faces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceStyle {
    /// Snakes, swords, and axes.
    #[default]
    Icons,
    /// The raw numbers 1-6.
    Numbers,
}

/// Configuration for a [`crate::SessionManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollerConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Largest pool a basic roll may request.
    pub max_dice: u32,
    /// Highest helper count offered.
    pub max_helpers: u8,
    /// Most persona points that may be spent on dice.
    pub max_persona: u8,
    /// How faces are drawn.
    pub face_style: FaceStyle,
    /// Minutes an open roll may sit untouched before it is reaped.
    pub idle_timeout_mins: u32,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_dice: DEFAULT_MAX_DICE,
            max_helpers: 5,
            max_persona: 3,
            face_style: FaceStyle::Icons,
            idle_timeout_mins: 30,
        }
    }
}

impl RollerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the largest basic roll (at least 1).
    pub fn with_max_dice(mut self, max: u32) -> Self {
        self.max_dice = max.max(1);
        self
    }

    /// Set the highest helper count (clamped to 0-9).
    pub fn with_max_helpers(mut self, max: u8) -> Self {
        self.max_helpers = max.min(9);
        self
    }

    /// Set the persona spending cap (clamped to 0-9).
    pub fn with_max_persona(mut self, max: u8) -> Self {
        self.max_persona = max.min(9);
        self
    }

    /// Set the face style.
    pub fn with_face_style(mut self, style: FaceStyle) -> Self {
        self.face_style = style;
        self
    }

    /// Set the idle timeout in minutes (at least 1).
    pub fn with_idle_timeout_mins(mut self, mins: u32) -> Self {
        self.idle_timeout_mins = mins.max(1);
        self
    }
}
