//! Per-operation history records.

use serde::{Deserialize, Serialize};

/// The kind of operation that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Every die in the pool was rolled.
    Roll,
    /// One or more snakes were rerolled.
    Reroll,
    /// Every axe rolled a bonus face.
    Explode,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roll => write!(f, "roll"),
            Self::Reroll => write!(f, "reroll"),
            Self::Explode => write!(f, "explode"),
        }
    }
}

/// A snapshot of the pool taken right after one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What was done.
    pub operation: Operation,
    /// Face of every die after the operation.
    pub faces: Vec<u8>,
    /// Dice showing a success after the operation.
    pub successes: u32,
    /// Pool value (current successes plus banked ones) after the operation.
    pub value: u32,
    /// Which dice the operation touched.
    pub changed: Vec<bool>,
}

impl HistoryEntry {
    /// Successes banked from earlier faces of exploded dice.
    pub fn banked(&self) -> u32 {
        self.value.saturating_sub(self.successes)
    }

    /// Number of dice the operation touched.
    pub fn num_changed(&self) -> usize {
        self.changed.iter().filter(|&&c| c).count()
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{}: [{}] -> {} ({} banked)",
            self.operation,
            faces.join(", "),
            self.value,
            self.banked()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(successes: u32, value: u32) -> HistoryEntry {
        HistoryEntry {
            operation: Operation::Explode,
            faces: vec![6, 2, 4],
            successes,
            value,
            changed: vec![true, false, false],
        }
    }

    #[test]
    fn banked_is_value_above_successes() {
        assert_eq!(entry(2, 3).banked(), 1);
        assert_eq!(entry(2, 2).banked(), 0);
    }

    #[test]
    fn counts_changed_dice() {
        assert_eq!(entry(2, 3).num_changed(), 1);
    }

    #[test]
    fn display() {
        assert_eq!(entry(2, 3).to_string(), "explode: [6, 2, 4] -> 3 (1 banked)");
    }

    #[test]
    fn operation_serde_roundtrip() {
        let json = serde_json::to_string(&Operation::Reroll).unwrap();
        let op: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, Operation::Reroll);
    }
}
