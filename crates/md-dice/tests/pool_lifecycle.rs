//! End-to-end checks of a pool's roll, nudge, and audit lifecycle.

use md_dice::{DicePool, ObstacleTest, Operation, Verdict};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn cascading_explosions_bank_every_axe() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut pool = DicePool::from_faces(&[6, 6, 3]).unwrap();
    let mut rounds = 0;
    while pool.can_explode() {
        pool.explode(&mut rng);
        rounds += 1;
    }
    assert!(rounds >= 1);
    assert_eq!(pool.history_len(), rounds + 1);

    let axes_rolled: u32 = pool
        .dice()
        .iter()
        .map(|d| d.history().iter().filter(|&&f| f == 6).count() as u32)
        .sum();
    // Every axe ever rolled was exploded, so each one is banked.
    assert!(pool.value() >= axes_rolled);
    assert!(pool.value() - pool.num_successes() <= axes_rolled);
}

#[test]
fn audit_replays_every_snapshot_in_order() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut pool = DicePool::with_dice(5);
    pool.roll(&mut rng);
    pool.explode(&mut rng);
    pool.reroll_one(&mut rng);
    pool.reroll_all(&mut rng);

    let ops: Vec<Operation> = pool.history().map(|e| e.operation).collect();
    assert_eq!(
        ops,
        vec![
            Operation::Roll,
            Operation::Explode,
            Operation::Reroll,
            Operation::Reroll
        ]
    );

    let snapshots: Vec<Vec<u8>> = pool.history().map(|e| e.faces).collect();
    assert_eq!(snapshots, pool.result_history());
    assert_eq!(snapshots.last().unwrap(), pool.current_result());

    // Reading the history leaves the pool untouched.
    assert_eq!(pool.history_len(), 4);
}

#[test]
fn obstacle_counts_banked_successes() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut pool = DicePool::from_faces(&[6, 1]).unwrap();
    pool.explode(&mut rng);
    let test = ObstacleTest::new(1).unwrap();
    assert!(matches!(test.resolve(&pool), Verdict::Passed { .. }));
}
