//! Diff engine integration tests
//!
//! Checks minimality against brute-force LCS lengths, patch semantics of the
//! produced scripts, and deterministic tie-breaking.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reorder::diff::{Change, diff};

/// Reference LCS length (plain dynamic programming).
fn lcs_len(a: &[u8], b: &[u8]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[a.len()][b.len()]
}

fn random_seq(rng: &mut StdRng, len: usize, alphabet: u8) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..alphabet)).collect()
}

#[test]
fn test_scripts_are_minimal_and_apply() {
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..300 {
        let old_len = rng.gen_range(0..12);
        let old = random_seq(&mut rng, old_len, 5);
        let new_len = rng.gen_range(0..12);
        let new = random_seq(&mut rng, new_len, 5);
        let script = diff(&old, &new);

        assert_eq!(script.apply(&old), new, "old={old:?} new={new:?}");
        let lcs = lcs_len(&old, &new);
        assert_eq!(script.removals().count(), old.len() - lcs);
        assert_eq!(script.insertions().count(), new.len() - lcs);
    }
}

#[test]
fn test_removals_precede_insertions() {
    let mut rng = StdRng::seed_from_u64(22);
    for _ in 0..100 {
        let old = random_seq(&mut rng, 10, 4);
        let new = random_seq(&mut rng, 10, 4);
        let script = diff(&old, &new);

        let first_insert = script
            .iter()
            .position(Change::is_insert)
            .unwrap_or(script.len());
        assert!(script.iter().skip(first_insert).all(Change::is_insert));

        let removal_offsets: Vec<_> = script.removals().map(Change::offset).collect();
        assert!(removal_offsets.windows(2).all(|w| w[0] > w[1]));
        let insert_offsets: Vec<_> = script.insertions().map(Change::offset).collect();
        assert!(insert_offsets.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_removal_offsets_point_at_original_elements() {
    let old = ["a", "b", "c", "d", "e"];
    let new = ["e", "c"];
    let script = diff(&old, &new);
    for change in script.removals() {
        assert_eq!(&old[change.offset()], change.item());
    }
}

#[test]
fn test_permutation_tie_break_prefers_old_prefix() {
    // Rotating left by one: keeping b..e is the unique best
    let script = diff(&['a', 'b', 'c', 'd', 'e'], &['b', 'c', 'd', 'e', 'a']);
    assert_eq!(
        script.changes(),
        &[
            Change::Remove { offset: 0, item: 'a' },
            Change::Insert { offset: 4, item: 'a' },
        ]
    );

    // Two equally short scripts: keep a fixed, move b
    let script = diff(&['a', 'b'], &['b', 'a']);
    assert_eq!(
        script.changes(),
        &[
            Change::Remove { offset: 1, item: 'b' },
            Change::Insert { offset: 0, item: 'b' },
        ]
    );
}

#[test]
fn test_moved_items() {
    let script = diff(&[1, 2, 3, 4], &[4, 1, 5, 2, 3]);
    assert_eq!(script.moved_items(), vec![&4]);
}

#[test]
fn test_single_move_in_large_sequence() {
    let old: Vec<u32> = (0..50_000).collect();
    let mut new = old.clone();
    new.rotate_right(1);

    let started = Instant::now();
    let script = diff(&old, &new);
    let elapsed = started.elapsed();

    assert_eq!(
        script.changes(),
        &[
            Change::Remove {
                offset: 49_999,
                item: 49_999
            },
            Change::Insert {
                offset: 0,
                item: 49_999
            },
        ]
    );
    assert!(
        elapsed < Duration::from_secs(5),
        "Single move took {elapsed:?}"
    );
}

#[test]
fn test_few_changes_in_large_sequence() {
    let old: Vec<u32> = (0..30_000).collect();
    let mut new = old.clone();
    let moved = new.remove(10);
    new.insert(20_000, moved);
    new.remove(25_000);
    new.push(99_999);

    let script = diff(&old, &new);

    assert_eq!(script.len(), 4);
    assert_eq!(script.apply(&old), new);
    assert_eq!(script.moved_items(), vec![&10]);
}
