//! Stress and model tests for the dual index priority queue.
//!
//! These tests verify:
//! 1. Every operation agrees with a naive vector model under random workloads
//! 2. Draining with `delete_min` / `delete_max` yields sorted values
//! 3. Identical seeded workloads build identical queues
//! 4. Large queues stay consistent under churn
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::time::Instant;

use dual_index_queue::{PriorityQueue, QueueError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Operations per model run
const MODEL_OPS: usize = 2_000;

/// Keys are drawn from 0..KEY_SPACE so duplicates are frequent
const KEY_SPACE: u32 = 40;

/// Entries for the large churn test
const STRESS_ENTRY_COUNT: usize = 200_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

type Queue = PriorityQueue<u32, i64>;

/// Build a queue holding exactly the model's entries.
fn from_model(model: &[(u32, i64)]) -> Queue {
    model.iter().copied().collect()
}

/// Remove one (key, value) occurrence from the model.
fn remove_one(model: &mut Vec<(u32, i64)>, entry: (u32, i64)) {
    let idx = model
        .iter()
        .position(|&e| e == entry)
        .unwrap_or_else(|| panic!("entry {:?} missing from model", entry));
    model.swap_remove(idx);
}

/// Check the accessors against the model.
fn check_against_model(queue: &Queue, model: &[(u32, i64)]) {
    assert_eq!(queue.len(), model.len());
    assert_eq!(queue.is_empty(), model.is_empty());

    if model.is_empty() {
        assert_eq!(queue.min_value(), Err(QueueError::EmptyQueue));
        assert_eq!(queue.max_key(), Err(QueueError::EmptyQueue));
        return;
    }

    let min = model.iter().map(|&(_, v)| v).min().unwrap();
    let max = model.iter().map(|&(_, v)| v).max().unwrap();
    assert_eq!(queue.min_value(), Ok(&min));
    assert_eq!(queue.max_value(), Ok(&max));
    assert!(min <= max);

    let min_key = *queue.min_key().unwrap();
    let max_key = *queue.max_key().unwrap();
    assert!(model.contains(&(min_key, min)));
    assert!(model.contains(&(max_key, max)));
}

/// Generate a deterministic list of entries.
fn generate_entries(count: usize, seed: u64) -> Vec<(u32, i64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.gen_range(0..KEY_SPACE), rng.gen_range(-1_000..1_000)))
        .collect()
}

/// Run a seeded random workload against the queue and the model.
fn run_model(seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut queue = Queue::new();
    let mut model: Vec<(u32, i64)> = Vec::new();

    for step in 0..MODEL_OPS {
        let roll = rng.gen_range(0..100);
        match roll {
            0..=34 => {
                let key = rng.gen_range(0..KEY_SPACE);
                let value = rng.gen_range(-100..100);
                queue.insert(key, value);
                model.push((key, value));
            }
            35..=52 => match queue.delete_min() {
                Some((key, value)) => {
                    assert_eq!(Some(value), model.iter().map(|&(_, v)| v).min());
                    remove_one(&mut model, (key, value));
                }
                None => assert!(model.is_empty()),
            },
            53..=70 => match queue.delete_max() {
                Some((key, value)) => {
                    assert_eq!(Some(value), model.iter().map(|&(_, v)| v).max());
                    remove_one(&mut model, (key, value));
                }
                None => assert!(model.is_empty()),
            },
            71..=89 => {
                let key = rng.gen_range(0..KEY_SPACE);
                let value = rng.gen_range(-100..100);
                let candidates: Vec<i64> = model
                    .iter()
                    .filter(|&&(k, _)| k == key)
                    .map(|&(_, v)| v)
                    .collect();
                let before = queue.clone();

                match queue.change_value(&key, value) {
                    Ok(()) => {
                        assert!(!candidates.is_empty());
                        // Exactly one entry under `key` was replaced
                        let replaced = candidates.iter().copied().find(|&old| {
                            let mut trial = model.clone();
                            remove_one(&mut trial, (key, old));
                            trial.push((key, value));
                            from_model(&trial) == queue
                        });
                        let old = replaced.unwrap_or_else(|| {
                            panic!("step {}: change_value({}, {}) matched no entry", step, key, value)
                        });
                        remove_one(&mut model, (key, old));
                        model.push((key, value));
                    }
                    Err(err) => {
                        assert_eq!(err, QueueError::KeyNotFound);
                        assert!(candidates.is_empty());
                        assert_eq!(queue, before);
                    }
                }
            }
            90..=92 => {
                let extra = generate_entries(rng.gen_range(0..10), rng.gen());
                let mut other = from_model(&extra);
                queue.merge(&mut other);
                assert!(other.is_empty());
                model.extend(extra);
            }
            _ => {
                let copy = queue.clone();
                assert_eq!(copy, queue);
                assert_eq!(copy, from_model(&model));
            }
        }

        check_against_model(&queue, &model);
    }

    assert_eq!(queue, from_model(&model));
}

// ============================================================================
// MODEL TESTS
// ============================================================================

/// Random workloads agree with the vector model for several seeds.
#[test]
fn model_random_workloads() {
    for seed in [1, 7, 42, 1337, 9001] {
        run_model(seed);
    }
}

/// Draining from both ends yields sorted sequences.
#[test]
fn drain_is_sorted() {
    let entries = generate_entries(10_000, 3);

    let mut queue: Queue = entries.iter().copied().collect();
    let mut ascending = Vec::with_capacity(entries.len());
    while let Some((_, value)) = queue.delete_min() {
        ascending.push(value);
    }
    assert!(ascending.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(ascending.len(), entries.len());

    // Deleting past empty stays a no-op
    assert!(queue.delete_min().is_none());
    assert!(queue.is_empty());

    let mut queue: Queue = entries.iter().copied().collect();
    let mut descending = Vec::with_capacity(entries.len());
    while let Some((_, value)) = queue.delete_max() {
        descending.push(value);
    }
    assert!(descending.windows(2).all(|w| w[0] >= w[1]));
}

/// Same seed builds equal queues regardless of insertion order.
#[test]
fn verify_determinism() {
    const SEED: u64 = 12345;

    let entries = generate_entries(5_000, SEED);
    let forward: Queue = entries.iter().copied().collect();
    let backward: Queue = entries.iter().rev().copied().collect();
    assert_eq!(forward, backward);

    let other: Queue = generate_entries(5_000, SEED + 1).into_iter().collect();
    assert_ne!(forward, other);
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Insert, churn and drain a large queue.
#[test]
fn stress_churn() {
    println!("\n=== STRESS TEST: {} entries ===\n", STRESS_ENTRY_COUNT);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut queue: PriorityQueue<u32, u64> = PriorityQueue::with_capacity(STRESS_ENTRY_COUNT);

    let start = Instant::now();
    for i in 0..STRESS_ENTRY_COUNT {
        queue.insert(i as u32, rng.gen_range(0..1_000_000));
    }
    let insert_time = start.elapsed();

    let start = Instant::now();
    for _ in 0..STRESS_ENTRY_COUNT / 2 {
        let key = rng.gen_range(0..STRESS_ENTRY_COUNT as u32);
        queue
            .change_value(&key, rng.gen_range(0..1_000_000))
            .expect("every key below the entry count was inserted");
    }
    let change_time = start.elapsed();
    assert_eq!(queue.len(), STRESS_ENTRY_COUNT);

    let start = Instant::now();
    let mut last = 0;
    while let Some((_, value)) = queue.delete_min() {
        assert!(value >= last);
        last = value;
    }
    let drain_time = start.elapsed();

    println!("  Insert:       {:>12.2?}", insert_time);
    println!("  Change value: {:>12.2?}", change_time);
    println!("  Drain:        {:>12.2?}", drain_time);

    assert!(queue.is_empty());
    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Merging many small queues keeps every entry.
#[test]
fn stress_merges() {
    let mut total = Queue::new();
    let mut expected = 0;

    for seed in 0..200 {
        let entries = generate_entries(50, seed);
        expected += entries.len();
        let mut part: Queue = entries.into_iter().collect();
        total.merge(&mut part);
        assert!(part.is_empty());
    }

    assert_eq!(total.len(), expected);
}
