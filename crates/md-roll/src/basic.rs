//! One-shot rolls: N dice, optionally against an obstacle.

use rand::Rng;

use md_dice::{DicePool, ObstacleTest, Verdict, check_pool_size};

use crate::config::FaceStyle;
use crate::error::RollResult;
use crate::ids::UserId;
use crate::render::render_pool;

/// A validated request for a non-interactive roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicRoll {
    dice: u32,
    obstacle: Option<ObstacleTest>,
    reason: Option<String>,
}

impl BasicRoll {
    /// Validate a request. Nothing is rolled until [`BasicRoll::resolve`].
    pub fn new(
        dice: u32,
        obstacle: Option<u32>,
        reason: Option<String>,
        max_dice: u32,
    ) -> RollResult<Self> {
        check_pool_size(dice, max_dice)?;
        let obstacle = obstacle.map(ObstacleTest::new).transpose()?;
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Ok(Self {
            dice,
            obstacle,
            reason,
        })
    }

    /// Number of dice to roll.
    pub fn dice(&self) -> u32 {
        self.dice
    }

    /// Roll the pool and judge it against the obstacle, if any.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> RollOutcome {
        let mut pool = DicePool::with_dice(self.dice);
        pool.roll(rng);
        let verdict = self.obstacle.map(|ob| ob.resolve(&pool));
        RollOutcome {
            dice: self.dice,
            pool,
            obstacle: self.obstacle,
            verdict,
            reason: self.reason.clone(),
        }
    }
}

/// A resolved one-shot roll.
#[derive(Debug, Clone)]
pub struct RollOutcome {
    /// Dice rolled.
    pub dice: u32,
    /// The rolled pool.
    pub pool: DicePool,
    /// The obstacle, if one was set.
    pub obstacle: Option<ObstacleTest>,
    /// Pass or fail against the obstacle.
    pub verdict: Option<Verdict>,
    /// What the roll was for.
    pub reason: Option<String>,
}

impl RollOutcome {
    /// Successes rolled.
    pub fn successes(&self) -> u32 {
        self.pool.num_successes()
    }

    /// Render the result as a reply line.
    pub fn render(&self, owner: UserId, style: FaceStyle) -> String {
        let noun = if self.dice == 1 { "die" } else { "dice" };
        let reason = self
            .reason
            .as_deref()
            .map(|r| format!(" **for {r}**"))
            .unwrap_or_default();
        let obstacle = match (self.obstacle, self.verdict) {
            (Some(ob), Some(verdict)) => {
                let mark = if verdict.is_pass() { "🎉" } else { "💀" };
                format!("        **({ob})**  {mark}")
            }
            _ => String::new(),
        };
        format!(
            "{owner} rolls **{}** {noun}{reason}!\n>>> {}{obstacle}",
            self.dice,
            render_pool(&self.pool, style, false)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RollError;
    use md_dice::{DEFAULT_MAX_DICE, DiceError};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_out_of_range_counts() {
        for n in [0, DEFAULT_MAX_DICE + 1] {
            let err = BasicRoll::new(n, None, None, DEFAULT_MAX_DICE).unwrap_err();
            assert!(matches!(
                err,
                RollError::Dice(DiceError::PoolSize { requested, .. }) if requested == n
            ));
            assert!(err.is_validation());
        }
    }

    #[test]
    fn rejects_zero_obstacle() {
        let err = BasicRoll::new(3, Some(0), None, DEFAULT_MAX_DICE).unwrap_err();
        assert!(matches!(err, RollError::Dice(DiceError::InvalidObstacle(0))));
    }

    #[test]
    fn resolves_requested_dice() {
        let roll = BasicRoll::new(5, None, None, DEFAULT_MAX_DICE).unwrap();
        let outcome = roll.resolve(&mut StdRng::seed_from_u64(1));
        assert_eq!(outcome.pool.size(), 5);
        assert_eq!(outcome.pool.history_len(), 1);
        assert!(outcome.verdict.is_none());
    }

    #[test]
    fn verdict_uses_pool_value() {
        let roll = BasicRoll::new(4, Some(2), None, DEFAULT_MAX_DICE).unwrap();
        let outcome = roll.resolve(&mut StdRng::seed_from_u64(8));
        let passed = outcome.pool.value() >= 2;
        assert_eq!(outcome.verdict.map(|v| v.is_pass()), Some(passed));
    }

    #[test]
    fn render_single_die_with_reason() {
        let roll = BasicRoll::new(1, None, Some("  sneaking ".to_string()), 30).unwrap();
        let outcome = roll.resolve(&mut StdRng::seed_from_u64(2));
        let text = outcome.render(UserId(5), FaceStyle::Icons);
        assert!(text.starts_with("<@5> rolls **1** die **for sneaking**!\n>>> "));
    }

    #[test]
    fn render_obstacle() {
        let roll = BasicRoll::new(6, Some(3), None, 30).unwrap();
        let outcome = roll.resolve(&mut StdRng::seed_from_u64(3));
        let text = outcome.render(UserId(5), FaceStyle::Numbers);
        assert!(text.starts_with("<@5> rolls **6** dice!"));
        assert!(text.contains("**(Ob 3)**"));
        let mark = if outcome.verdict.is_some_and(|v| v.is_pass()) {
            "🎉"
        } else {
            "💀"
        };
        assert!(text.ends_with(mark));
    }

    #[test]
    fn blank_reason_dropped() {
        let roll = BasicRoll::new(2, None, Some("   ".to_string()), 30).unwrap();
        let outcome = roll.resolve(&mut StdRng::seed_from_u64(2));
        assert!(outcome.reason.is_none());
        assert!(outcome.render(UserId(1), FaceStyle::Icons).contains("**2** dice!"));
    }
}
