//! Dice engine for MiceDice.
//!
//! Every die is a d6 read as a success-counting die: 4-6 are successes
//! ("swords"), 1-3 are failures ("snakes"), and a 6 is an "axe" that may be
//! exploded for a bonus die. A [`DicePool`] records every roll, reroll, and
//! explosion so a result can be replayed and audited after the fact.

pub mod dice;
pub mod error;
pub mod obstacle;

pub use dice::{DicePool, Die, FaceKind, HistoryEntry, Operation, UNROLLED};
pub use error::{DiceError, DiceResult};
pub use obstacle::{DEFAULT_MAX_DICE, ObstacleTest, Verdict, check_pool_size};
