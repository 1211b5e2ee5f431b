//! Dice pool construction, rolling, and nudging.

use rand::Rng;

use super::history::{HistoryEntry, Operation};
use super::Die;
use crate::error::DiceResult;

/// An ordered set of d6 resolved together for one test.
///
/// Alongside the dice the pool keeps four parallel histories, one entry per
/// operation: the action taken, the faces afterwards, the (successes, value)
/// pair afterwards, and which dice were touched. They always have equal
/// length.
///
/// The nudge operations never fail. Calling one with nothing eligible still
/// records an entry in which no die changed, and returns 0.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    dice: Vec<Die>,
    actions: Vec<Operation>,
    results: Vec<Vec<u8>>,
    values: Vec<(u32, u32)>,
    changes: Vec<Vec<bool>>,
}

impl DicePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool of `n` unrolled dice.
    pub fn with_dice(n: u32) -> Self {
        let mut pool = Self::new();
        pool.add_dice(n);
        pool
    }

    /// Rebuild a pool whose initial roll showed `faces`.
    pub fn from_faces(faces: &[u8]) -> DiceResult<Self> {
        let dice = faces
            .iter()
            .map(|&f| Die::from_history([f]))
            .collect::<DiceResult<Vec<_>>>()?;
        let mut pool = Self {
            dice,
            ..Self::default()
        };
        let changed = vec![true; pool.size()];
        pool.record(Operation::Roll, changed);
        Ok(pool)
    }

    /// Number of dice in the pool.
    pub fn size(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// The dice, in pool order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Append `n` unrolled dice.
    pub fn add_dice(&mut self, n: u32) {
        self.dice.extend((0..n).map(|_| Die::new()));
    }

    /// Append a single unrolled die.
    pub fn add_die(&mut self) {
        self.add_dice(1);
    }

    /// Roll every die once.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for die in &mut self.dice {
            die.roll(rng);
        }
        let changed = vec![true; self.size()];
        self.record(Operation::Roll, changed);
    }

    /// Returns true if any die may explode.
    pub fn can_explode(&self) -> bool {
        self.dice.iter().any(Die::can_explode)
    }

    /// Number of dice that may explode.
    pub fn num_can_explode(&self) -> usize {
        self.dice.iter().filter(|d| d.can_explode()).count()
    }

    /// Roll a bonus face for every die currently showing an axe.
    ///
    /// A die that explodes into another axe is not rolled again within the
    /// same call; it stays eligible for the next one. Returns how many dice
    /// exploded.
    pub fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let changed: Vec<bool> = self.dice.iter().map(Die::can_explode).collect();
        for (die, &explodes) in self.dice.iter_mut().zip(&changed) {
            if explodes {
                die.roll(rng);
            }
        }
        let count = changed.iter().filter(|&&c| c).count();
        self.record(Operation::Explode, changed);
        count
    }

    /// Returns true if any snake may be rerolled.
    pub fn can_reroll(&self) -> bool {
        self.dice.iter().any(Die::can_reroll)
    }

    /// Number of snakes that may be rerolled.
    pub fn num_can_reroll(&self) -> usize {
        self.dice.iter().filter(|d| d.can_reroll()).count()
    }

    /// Reroll the first eligible snake. Returns how many dice were rerolled.
    pub fn reroll_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.reroll(1, rng)
    }

    /// Reroll every eligible snake once. Returns how many dice were rerolled.
    pub fn reroll_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.reroll(self.num_snakes(), rng)
    }

    fn reroll<R: Rng + ?Sized>(&mut self, limit: usize, rng: &mut R) -> usize {
        let mut changed = vec![false; self.size()];
        let mut count = 0;
        for (die, flag) in self.dice.iter_mut().zip(changed.iter_mut()) {
            if count == limit {
                break;
            }
            if die.can_reroll() {
                die.roll(rng);
                *flag = true;
                count += 1;
            }
        }
        self.record(Operation::Reroll, changed);
        count
    }

    /// Dice currently showing a success.
    pub fn num_successes(&self) -> u32 {
        self.dice.iter().filter(|d| d.is_success()).count() as u32
    }

    /// Current successes plus every success banked by exploded dice.
    pub fn value(&self) -> u32 {
        self.dice.iter().map(Die::value).sum()
    }

    /// Dice currently showing an axe.
    pub fn num_axes(&self) -> u32 {
        self.dice.iter().filter(|d| d.is_axe()).count() as u32
    }

    /// Dice not showing a success, unrolled dice included.
    pub fn num_snakes(&self) -> usize {
        self.size() - self.num_successes() as usize
    }

    /// Faces after the most recent operation, or nothing before the first roll.
    pub fn current_result(&self) -> &[u8] {
        self.results.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of operations performed so far.
    pub fn history_len(&self) -> usize {
        self.actions.len()
    }

    /// Every operation performed, oldest first.
    pub fn history(&self) -> impl Iterator<Item = HistoryEntry> + '_ {
        self.actions
            .iter()
            .zip(&self.results)
            .zip(&self.values)
            .zip(&self.changes)
            .map(
                |(((&operation, faces), &(successes, value)), changed)| HistoryEntry {
                    operation,
                    faces: faces.clone(),
                    successes,
                    value,
                    changed: changed.clone(),
                },
            )
    }

    /// Face snapshots only, oldest first.
    pub fn result_history(&self) -> &[Vec<u8>] {
        &self.results
    }

    fn record(&mut self, operation: Operation, changed: Vec<bool>) {
        self.actions.push(operation);
        self.results.push(self.dice.iter().map(Die::face).collect());
        self.values.push((self.num_successes(), self.value()));
        self.changes.push(changed);
    }
}
