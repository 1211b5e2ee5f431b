//! Text rendering for pools, summaries, and audit logs.

use md_dice::{DicePool, FaceKind, Operation};

use crate::config::FaceStyle;
use crate::modifiers::{Modifiers, Strategy, TraitEffect};

const LUCK_RULE: &str = "------------------------------------------";

/// Draw one face.
pub fn face_symbol(face: u8, style: FaceStyle) -> String {
    match style {
        FaceStyle::Icons => match FaceKind::of(face) {
            FaceKind::Unrolled => "❓",
            FaceKind::Snake => "🐍",
            FaceKind::Sword => "⚔️",
            FaceKind::Axe => "🪓",
        }
        .to_string(),
        FaceStyle::Numbers => format!("{face}\u{fe0f}\u{20e3}"),
    }
}

/// Draw a row of faces separated by spaces.
pub fn render_faces(faces: &[u8], style: FaceStyle) -> String {
    faces
        .iter()
        .map(|&f| face_symbol(f, style))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw which dice an operation touched.
pub fn render_changes(changed: &[bool], operation: Operation) -> String {
    let hit = if operation == Operation::Explode {
        "💥"
    } else {
        "🔻"
    };
    changed
        .iter()
        .map(|&c| if c { hit } else { "▪️" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw the current result, or with `with_history` every step that led to it.
pub fn render_pool(pool: &DicePool, style: FaceStyle, with_history: bool) -> String {
    if !with_history {
        return format!(
            "{}    ➡️    `{}!`",
            render_faces(pool.current_result(), style),
            pool.num_successes()
        );
    }

    let mut out = String::new();
    for entry in pool.history() {
        let faces = render_faces(&entry.faces, style);
        if entry.operation == Operation::Roll {
            out.push_str(&format!("{faces}    ➡️    `{}!`", entry.successes));
            continue;
        }
        let breakdown = if entry.banked() > 0 {
            format!("{} + {} 🪓 = ", entry.successes, entry.banked())
        } else {
            String::new()
        };
        out.push_str(&format!(
            "\n{}\n{faces}    ➡️    `{breakdown}{}!`",
            render_changes(&entry.changed, entry.operation),
            entry.value
        ));
    }
    out
}

/// The running tally of modifiers, fenced as a code block.
pub fn render_summary(m: &Modifiers, max_dice: u32) -> String {
    let mut lines: Vec<String> = Vec::new();
    let luck = m.using_luck();

    if luck {
        lines.push(LUCK_RULE.to_string());
    }
    match m.strategy {
        Some(Strategy::Skill) => {
            lines.push(format!("Using their trained skill! +{}", m.skill_level));
        }
        Some(Strategy::NatureWith) => {
            lines.push(format!("Leaning into their nature! +{}", m.nature_level));
        }
        Some(Strategy::NatureAgainst) => {
            lines.push(format!(
                "Going against their nature! +{} (tax)",
                m.nature_level
            ));
        }
        Some(Strategy::BeginnersLuck) => {
            lines.push(format!(
                "Trying their luck with a base attribute! +{}",
                m.skill_level
            ));
        }
        None => {}
    }
    if m.with_gear {
        lines.push("Using the right tool for the job! +1".to_string());
    }
    if m.helpers > 0 {
        lines.push(format!("With some helping hands! +{}", m.helpers));
    }
    if luck {
        lines.push(LUCK_RULE.to_string());
        lines.push("            HALVED DUE TO LUCK".to_string());
    }
    if m.tapping_nature {
        let tax = if m.is_mousy { "" } else { " (tax)" };
        lines.push(format!(
            "Taps into their nature for a heroic boost! +{}{tax}",
            m.nature_level
        ));
    }
    if m.persona > 0 {
        lines.push(format!("Bustling with raw talent! +{}", m.persona));
    }
    match m.trait_effect {
        TraitEffect::Help => lines.push("Finding their traits to be helpful! +1".to_string()),
        TraitEffect::Hinder => {
            lines.push("Finding their traits to be harmful! -1 (gain a check)".to_string());
        }
        TraitEffect::Neutral => {}
    }

    format!(
        "```\n{}\n\nTotal pool: {}```",
        lines.join("\n"),
        m.dice_to_roll(max_dice)
    )
}

/// Every snapshot the pool has taken, for a transparent roll log.
pub fn render_audit(pool: &DicePool) -> String {
    let lines: Vec<String> = pool.history().map(|e| e.to_string()).collect();
    format!("Transparent roll log\n```\n{}\n```", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn icon_faces() {
        assert_eq!(render_faces(&[0, 2, 5, 6], FaceStyle::Icons), "❓ 🐍 ⚔️ 🪓");
    }

    #[test]
    fn numeric_faces() {
        assert_eq!(
            render_faces(&[1, 6], FaceStyle::Numbers),
            "1\u{fe0f}\u{20e3} 6\u{fe0f}\u{20e3}"
        );
    }

    #[test]
    fn change_markers() {
        assert_eq!(render_changes(&[true, false], Operation::Explode), "💥 ▪️");
        assert_eq!(render_changes(&[false, true], Operation::Reroll), "▪️ 🔻");
    }

    #[test]
    fn plain_pool() {
        let pool = DicePool::from_faces(&[1, 4, 6]).unwrap();
        assert_eq!(
            render_pool(&pool, FaceStyle::Icons, false),
            "🐍 ⚔️ 🪓    ➡️    `2!`"
        );
    }

    #[test]
    fn pool_history_shows_each_step() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = DicePool::from_faces(&[6, 2]).unwrap();
        pool.explode(&mut rng);
        let text = render_pool(&pool, FaceStyle::Icons, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "🪓 🐍    ➡️    `1!`");
        assert_eq!(lines[1], "💥 ▪️");
        // The exploded axe is banked whatever it rolled next.
        assert_eq!(pool.value() - pool.num_successes(), 1);
        assert!(lines[2].contains(" + 1 🪓 = "));
    }

    #[test]
    fn skill_summary() {
        let m = Modifiers {
            has_skill: true,
            skill_level: 4,
            with_gear: true,
            helpers: 2,
            strategy: Some(Strategy::Skill),
            trait_effect: TraitEffect::Hinder,
            ..Modifiers::default()
        };
        let text = render_summary(&m, 30);
        assert!(text.starts_with("```\nUsing their trained skill! +4"));
        assert!(text.contains("With some helping hands! +2"));
        assert!(text.contains("(gain a check)"));
        assert!(text.ends_with("Total pool: 6```"));
        assert!(!text.contains("HALVED"));
    }

    #[test]
    fn luck_summary_frames_halved_part() {
        let m = Modifiers {
            skill_level: 3,
            nature_level: 2,
            tapping_nature: true,
            strategy: Some(Strategy::BeginnersLuck),
            ..Modifiers::default()
        };
        let text = render_summary(&m, 30);
        let halved = text.find("HALVED DUE TO LUCK").unwrap();
        let tapped = text.find("heroic boost! +2 (tax)").unwrap();
        assert!(halved < tapped);
        assert!(text.ends_with("Total pool: 4```"));
    }

    #[test]
    fn audit_lists_every_operation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = DicePool::from_faces(&[3, 6]).unwrap();
        pool.reroll_one(&mut rng);
        let log = render_audit(&pool);
        assert!(log.starts_with("Transparent roll log\n```\nroll: [3, 6]"));
        assert!(log.contains("\nreroll: ["));
    }
}
