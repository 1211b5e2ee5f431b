//! Character sheets and the skill provider seam.
//!
//! Names are matched case-insensitively and stored lowercase. Only the base
//! stats and skills listed here exist; anything else is rejected.

use std::collections::HashMap;

use crate::error::{SheetError, SheetResult};
use crate::rating::{SkillRating, title_case};

/// Base stats every character has.
pub const BASE_STATS: &[&str] = &["nature", "health", "will", "circles", "resources"];

/// Skills a character may learn.
pub const SKILLS: &[&str] = &[
    "administrator",
    "apiarist",
    "archivist",
    "armorer",
    "baker",
    "boatcrafter",
    "brewer",
    "carpenter",
    "cartographer",
    "cook",
    "fighter",
    "glazier",
    "haggler",
    "harvester",
    "healer",
    "hunter",
    "insectrist",
    "instructor",
    "laborer",
    "loremouse",
    "manipulator",
    "militarist",
    "miller",
    "orator",
    "pathfinder",
    "persuader",
    "potter",
    "scientist",
    "scout",
    "smith",
    "stonemason",
    "survivalist",
    "weather watcher",
    "weaver",
];

const RULE: &str = "==============================================";

/// Returns true if `name` is a base stat or skill.
pub fn is_known_skill(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    BASE_STATS.contains(&lower.as_str()) || SKILLS.contains(&lower.as_str())
}

/// Anything that can look up a character's ratings.
pub trait SkillProvider {
    /// The character's display name.
    fn character_name(&self) -> &str;

    /// The rating for a base stat or skill, if the character has one.
    fn rating(&self, skill: &str) -> Option<SkillRating>;
}

/// An in-memory character sheet.
#[derive(Debug, Clone, Default)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    ratings: HashMap<String, SkillRating>,
}

impl CharacterSheet {
    /// Create a sheet with no ratings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ratings: HashMap::new(),
        }
    }

    /// Set a rating, rejecting unknown names.
    pub fn set_rating(&mut self, skill: &str, rating: SkillRating) -> SheetResult<()> {
        let key = canonical(skill)?;
        self.ratings.insert(key, rating);
        Ok(())
    }

    /// Builder form of [`CharacterSheet::set_rating`].
    pub fn with_rating(mut self, skill: &str, rating: SkillRating) -> SheetResult<Self> {
        self.set_rating(skill, rating)?;
        Ok(self)
    }

    /// Number of rated stats and skills.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true if nothing is rated.
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Render the profile table: every rated stat, then every rated skill.
    pub fn render_profile(&self) -> String {
        let lines: Vec<String> = BASE_STATS
            .iter()
            .chain(SKILLS)
            .filter_map(|skill| self.ratings.get(*skill).map(|r| r.progress_line(skill)))
            .collect();
        let border = "=".repeat(self.name.chars().count() + 2);
        format!(
            " {border}\n| {} |\n{RULE}\nSKILL                 SUCCESS      FAIL\n{}\n{}\n{RULE}",
            self.name,
            "-".repeat(RULE.len()),
            lines.join("\n"),
        )
    }
}

impl SkillProvider for CharacterSheet {
    fn character_name(&self) -> &str {
        &self.name
    }

    fn rating(&self, skill: &str) -> Option<SkillRating> {
        self.ratings.get(&skill.trim().to_lowercase()).copied()
    }
}

/// Answer a rating (or, with `progress`, an advancement) query for one skill.
pub fn rating_report<P: SkillProvider + ?Sized>(
    provider: &P,
    skill: &str,
    progress: bool,
) -> SheetResult<String> {
    let key = canonical(skill)?;
    let rating = provider.rating(&key).ok_or_else(|| SheetError::Unrated {
        character: provider.character_name().to_string(),
        skill: key.clone(),
    })?;

    if progress {
        let mut report = rating.progress_line(&key);
        if rating.can_advance() {
            report.push_str("  ready to advance!");
        }
        Ok(report)
    } else {
        Ok(format!(
            "{}'s {} rating: {}",
            provider.character_name(),
            title_case(&key),
            rating.rating
        ))
    }
}

fn canonical(skill: &str) -> SheetResult<String> {
    let key = skill.trim().to_lowercase();
    if is_known_skill(&key) {
        Ok(key)
    } else {
        Err(SheetError::UnknownSkill(skill.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Rating;

    fn saxon() -> CharacterSheet {
        CharacterSheet::new("Saxon")
            .with_rating("Nature", SkillRating::new(Rating::Level(4)))
            .unwrap()
            .with_rating("fighter", SkillRating::new(Rating::Level(3)).with_progress(2, 1))
            .unwrap()
            .with_rating("Weather Watcher", SkillRating::new(Rating::Untrained))
            .unwrap()
    }

    #[test]
    fn known_skills() {
        assert!(is_known_skill("nature"));
        assert!(is_known_skill("Fighter"));
        assert!(is_known_skill(" weather watcher "));
        assert!(!is_known_skill("basket weaving"));
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let sheet = saxon();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.rating("FIGHTER").unwrap().rating, Rating::Level(3));
        assert_eq!(sheet.rating("nature").unwrap().rating, Rating::Level(4));
        assert!(sheet.rating("healer").is_none());
    }

    #[test]
    fn unknown_skill_rejected() {
        let mut sheet = CharacterSheet::new("Kenzie");
        let err = sheet
            .set_rating("juggler", SkillRating::new(Rating::Level(2)))
            .unwrap_err();
        assert_eq!(err, SheetError::UnknownSkill("juggler".to_string()));
        assert!(sheet.is_empty());
    }

    #[test]
    fn rating_query() {
        let sheet = saxon();
        assert_eq!(
            rating_report(&sheet, "Fighter", false).unwrap(),
            "Saxon's Fighter rating: 3"
        );
        assert_eq!(
            rating_report(&sheet, "weather watcher", false).unwrap(),
            "Saxon's Weather Watcher rating: *"
        );
    }

    #[test]
    fn progress_query() {
        let sheet = saxon();
        let report = rating_report(&sheet, "fighter", true).unwrap();
        assert!(report.starts_with("Fighter: 3"));
        assert!(report.contains("✓✓◯"));
        assert!(!report.contains("ready to advance"));
    }

    #[test]
    fn progress_query_ready() {
        let sheet = CharacterSheet::new("Lieam")
            .with_rating("scout", SkillRating::new(Rating::Level(2)).with_progress(2, 1))
            .unwrap();
        let report = rating_report(&sheet, "scout", true).unwrap();
        assert!(report.ends_with("ready to advance!"));
    }

    #[test]
    fn query_errors() {
        let sheet = saxon();
        assert!(matches!(
            rating_report(&sheet, "juggler", false),
            Err(SheetError::UnknownSkill(_))
        ));
        assert_eq!(
            rating_report(&sheet, "Healer", false),
            Err(SheetError::Unrated {
                character: "Saxon".to_string(),
                skill: "healer".to_string(),
            })
        );
    }

    #[test]
    fn profile_lists_stats_before_skills() {
        let profile = saxon().render_profile();
        assert!(profile.starts_with(" =======\n| Saxon |\n"));
        let nature = profile.find("Nature: 4").unwrap();
        let fighter = profile.find("Fighter: 3").unwrap();
        let watcher = profile.find("Weather Watcher: *").unwrap();
        assert!(nature < fighter);
        assert!(fighter < watcher);
        assert!(profile.contains("SKILL                 SUCCESS      FAIL"));
    }

    #[test]
    fn provider_as_trait_object() {
        let sheet = saxon();
        let provider: &dyn SkillProvider = &sheet;
        assert_eq!(provider.character_name(), "Saxon");
        assert!(rating_report(provider, "nature", false).is_ok());
    }
}
