//! Obstacle tests and pool-size bounds.
//!
//! An obstacle is the number of successes a test needs. The pool's value,
//! which includes successes banked from explosions, must meet or exceed it.

use serde::{Deserialize, Serialize};

use crate::dice::DicePool;
use crate::error::{DiceError, DiceResult};

/// The largest pool a single roll may use unless configured otherwise.
pub const DEFAULT_MAX_DICE: u32 = 30;

/// Reject pool sizes outside `1..=max`.
pub fn check_pool_size(requested: u32, max: u32) -> DiceResult<()> {
    if requested == 0 || requested > max {
        return Err(DiceError::PoolSize { requested, max });
    }
    Ok(())
}

/// A success threshold a roll must meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleTest {
    obstacle: u32,
}

impl ObstacleTest {
    /// Create an obstacle test.
    ///
    /// An obstacle of zero is rejected, not read as "no obstacle". A roll
    /// with nothing to beat carries no `ObstacleTest` at all.
    pub fn new(obstacle: u32) -> DiceResult<Self> {
        if obstacle == 0 {
            return Err(DiceError::InvalidObstacle(obstacle));
        }
        Ok(Self { obstacle })
    }

    /// The required number of successes.
    pub fn obstacle(&self) -> u32 {
        self.obstacle
    }

    /// Compare a pool against the obstacle.
    pub fn resolve(&self, pool: &DicePool) -> Verdict {
        let value = pool.value();
        if value >= self.obstacle {
            Verdict::Passed {
                margin: value - self.obstacle,
            }
        } else {
            Verdict::Failed {
                margin: self.obstacle - value,
            }
        }
    }
}

impl std::fmt::Display for ObstacleTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ob {}", self.obstacle)
    }
}

/// Whether a roll met its obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The pool met or beat the obstacle.
    Passed {
        /// Successes beyond the obstacle.
        margin: u32,
    },
    /// The pool fell short.
    Failed {
        /// Successes missing.
        margin: u32,
    },
}

impl Verdict {
    /// Returns true if the obstacle was met.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed { margin } => write!(f, "Passed (margin {margin})"),
            Self::Failed { margin } => write!(f, "Failed (margin {margin})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_bounds() {
        assert!(check_pool_size(1, DEFAULT_MAX_DICE).is_ok());
        assert!(check_pool_size(30, DEFAULT_MAX_DICE).is_ok());
        assert_eq!(
            check_pool_size(0, DEFAULT_MAX_DICE),
            Err(DiceError::PoolSize {
                requested: 0,
                max: 30
            })
        );
        assert!(check_pool_size(31, DEFAULT_MAX_DICE).is_err());
    }

    #[test]
    fn zero_obstacle_rejected() {
        assert_eq!(ObstacleTest::new(0), Err(DiceError::InvalidObstacle(0)));
    }

    #[test]
    fn meets_obstacle() {
        let pool = DicePool::from_faces(&[4, 5, 1]).unwrap();
        let test = ObstacleTest::new(2).unwrap();
        assert_eq!(test.resolve(&pool), Verdict::Passed { margin: 0 });
        assert!(test.resolve(&pool).is_pass());
    }

    #[test]
    fn beats_obstacle() {
        let pool = DicePool::from_faces(&[6, 6, 6]).unwrap();
        let test = ObstacleTest::new(1).unwrap();
        assert_eq!(test.resolve(&pool), Verdict::Passed { margin: 2 });
    }

    #[test]
    fn misses_obstacle() {
        let pool = DicePool::from_faces(&[1, 2, 5]).unwrap();
        let test = ObstacleTest::new(3).unwrap();
        assert_eq!(test.resolve(&pool), Verdict::Failed { margin: 2 });
        assert!(!test.resolve(&pool).is_pass());
    }

    #[test]
    fn display() {
        assert_eq!(ObstacleTest::new(4).unwrap().to_string(), "Ob 4");
        assert_eq!(Verdict::Failed { margin: 1 }.to_string(), "Failed (margin 1)");
    }
}
