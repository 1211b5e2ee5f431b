//! The ordered steps of an interactive roll.

use serde::{Deserialize, Serialize};

use crate::modifiers::Modifiers;

/// One step of the roll builder, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Does the character have the required skill?
    HasSkill,
    /// Skill level, or base attribute level without the skill.
    SkillLevel,
    /// Is the test within the character's nature?
    MousyNature,
    /// Nature level.
    NatureLevel,
    /// Which rating to roll.
    Strategy,
    /// Appropriate gear?
    Gear,
    /// How many helpers?
    Helpers,
    /// Tap nature for extra dice?
    TapNature,
    /// Persona points to spend on dice.
    Persona,
    /// Does a trait come into play?
    HasTrait,
    /// Does the trait help or hinder?
    TraitPolarity,
    /// Review the pool and roll it.
    ConfirmRoll,
    /// Is the character wise? Asked after the roll.
    Wise,
    /// Post-roll adjustments, repeated until finished.
    Nudge,
}

impl Step {
    /// Every step, in order.
    pub const ALL: [Step; 14] = [
        Self::HasSkill,
        Self::SkillLevel,
        Self::MousyNature,
        Self::NatureLevel,
        Self::Strategy,
        Self::Gear,
        Self::Helpers,
        Self::TapNature,
        Self::Persona,
        Self::HasTrait,
        Self::TraitPolarity,
        Self::ConfirmRoll,
        Self::Wise,
        Self::Nudge,
    ];

    /// The step after this one. The nudge loop returns itself.
    pub fn next(self) -> Self {
        match self {
            Self::HasSkill => Self::SkillLevel,
            Self::SkillLevel => Self::MousyNature,
            Self::MousyNature => Self::NatureLevel,
            Self::NatureLevel => Self::Strategy,
            Self::Strategy => Self::Gear,
            Self::Gear => Self::Helpers,
            Self::Helpers => Self::TapNature,
            Self::TapNature => Self::Persona,
            Self::Persona => Self::HasTrait,
            Self::HasTrait => Self::TraitPolarity,
            Self::TraitPolarity => Self::ConfirmRoll,
            Self::ConfirmRoll => Self::Wise,
            Self::Wise | Self::Nudge => Self::Nudge,
        }
    }

    /// Zero-based position in the pipeline.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Returns true once the running modifier summary is worth showing.
    pub fn shows_summary(self) -> bool {
        self.index() >= Self::Gear.index()
    }

    /// Returns true for steps reached only after the dice hit the table.
    pub fn is_post_roll(self) -> bool {
        matches!(self, Self::Wise | Self::Nudge)
    }

    /// The question put to the roller. Strategy and nudge options are
    /// listed separately by the builder.
    pub fn prompt(self, m: &Modifiers) -> String {
        match self {
            Self::HasSkill => "Do you have the required skill?".to_string(),
            Self::SkillLevel if m.has_skill => "What is your skill level?".to_string(),
            Self::SkillLevel => "What is your base attribute level?".to_string(),
            Self::MousyNature => "Is the test within your nature?".to_string(),
            Self::NatureLevel => "What is your nature level?".to_string(),
            Self::Strategy => "How would you like to roll?".to_string(),
            Self::Gear => "Do you have appropriate gear (+1 🎲)?".to_string(),
            Self::Helpers => "How many helpers do you have? (+1 🎲 each)".to_string(),
            Self::TapNature => format!(
                "Tap nature for a boost (-1 🎭, -1 nature, +{} 🎲)?",
                m.nature_level
            ),
            Self::Persona => {
                "Spend persona points for bonus dice (-1 🎭, +1 🎲 each)?".to_string()
            }
            Self::HasTrait => "Do you have a relevant trait?".to_string(),
            Self::TraitPolarity => {
                "Does that trait help you (+1 🎲), or hamper you (-1 🎲, +1 check)?".to_string()
            }
            Self::ConfirmRoll => {
                "Confirm the above looks correct. Click 🎲 when ready to roll, or ❌ to cancel."
                    .to_string()
            }
            Self::Wise => "Are you wise?".to_string(),
            Self::Nudge => "Nudge the result?".to_string(),
        }
    }

    /// Help text for the step, if it has any.
    pub fn tooltip(self, m: &Modifiers) -> Option<String> {
        let text = match self {
            Self::SkillLevel if !m.has_skill => {
                "For physical tests this is health. Otherwise it is wisdom.".to_string()
            }
            Self::MousyNature => {
                "Escaping, climbing, hiding, and foraging are all within a mouse's nature."
                    .to_string()
            }
            Self::Strategy => strategy_tooltip(m),
            Self::Gear => {
                "Gear is any tool or equipment that may help you. Lobby your GM!".to_string()
            }
            Self::Helpers => "Other players may help with a relevant skill or wise, \
                but helping with a skill ropes them into the consequences of failure."
                .to_string(),
            Self::TapNature => "Tapping nature adds dice equal to your nature level. \
                Outside your nature it taxes nature by 1 right away, and a failed roll \
                taxes it further by the margin of failure."
                .to_string(),
            Self::TraitPolarity => "Checks are your actions during the player turn. \
                If you will pass handily or fail regardless, hampering yourself earns \
                an easy check."
                .to_string(),
            Self::Wise => "Lobby your GM for a wise's relevance!".to_string(),
            Self::Nudge => "Exploding rolls a new face for every axe; a die showing a six \
                is always eligible. A snake can be rerolled only if that die has not \
                been touched since the first roll."
                .to_string(),
            _ => return None,
        };
        Some(text)
    }
}

fn strategy_tooltip(m: &Modifiers) -> String {
    let mut parts = vec!["This is the big decision!".to_string()];
    if m.has_skill {
        parts.push("Using your skill counts towards its advancement.".to_string());
    } else {
        parts.push(
            "Beginner's luck rolls your base attribute instead, halving the pool \
             before nature and persona dice are added. It still counts towards \
             learning the skill."
                .to_string(),
        );
    }
    if m.is_mousy || !m.has_skill {
        parts.push(
            "Nature can stand in for the skill. Within your nature there is no penalty; \
             against it you pay a tax and the skill does not advance."
                .to_string(),
        );
    }
    parts.join("\n\n")
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HasSkill => write!(f, "has skill"),
            Self::SkillLevel => write!(f, "skill level"),
            Self::MousyNature => write!(f, "within nature"),
            Self::NatureLevel => write!(f, "nature level"),
            Self::Strategy => write!(f, "strategy"),
            Self::Gear => write!(f, "gear"),
            Self::Helpers => write!(f, "helpers"),
            Self::TapNature => write!(f, "tap nature"),
            Self::Persona => write!(f, "persona"),
            Self::HasTrait => write!(f, "has trait"),
            Self::TraitPolarity => write!(f, "trait polarity"),
            Self::ConfirmRoll => write!(f, "confirm roll"),
            Self::Wise => write!(f, "wise"),
            Self::Nudge => write!(f, "nudge"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_is_linear() {
        for pair in Step::ALL.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert_eq!(Step::Nudge.next(), Step::Nudge);
    }

    #[test]
    fn indices_follow_order() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn summary_starts_at_gear() {
        assert!(!Step::Strategy.shows_summary());
        assert!(Step::Gear.shows_summary());
        assert!(Step::Nudge.shows_summary());
    }

    #[test]
    fn skill_level_prompt_follows_answer() {
        let skilled = Modifiers {
            has_skill: true,
            ..Modifiers::default()
        };
        assert_eq!(Step::SkillLevel.prompt(&skilled), "What is your skill level?");
        assert!(Step::SkillLevel.tooltip(&skilled).is_none());

        let unskilled = Modifiers::default();
        assert_eq!(
            Step::SkillLevel.prompt(&unskilled),
            "What is your base attribute level?"
        );
        assert!(Step::SkillLevel.tooltip(&unskilled).is_some());
    }

    #[test]
    fn tap_prompt_shows_nature_level() {
        let m = Modifiers {
            nature_level: 4,
            ..Modifiers::default()
        };
        assert!(Step::TapNature.prompt(&m).contains("+4 🎲"));
    }

    #[test]
    fn steps_without_help() {
        let m = Modifiers::default();
        for step in [
            Step::HasSkill,
            Step::NatureLevel,
            Step::Persona,
            Step::HasTrait,
            Step::ConfirmRoll,
        ] {
            assert!(step.tooltip(&m).is_none(), "{step} has a tooltip");
        }
    }

    #[test]
    fn strategy_help_matches_offered_options() {
        let skilled_outside_nature = Modifiers {
            has_skill: true,
            ..Modifiers::default()
        };
        let text = Step::Strategy.tooltip(&skilled_outside_nature).unwrap();
        assert!(text.contains("advancement"));
        assert!(!text.contains("Nature can stand in"));

        let unskilled = Modifiers::default();
        let text = Step::Strategy.tooltip(&unskilled).unwrap();
        assert!(text.contains("Beginner's luck"));
        assert!(text.contains("Nature can stand in"));
    }
}
