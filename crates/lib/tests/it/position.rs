//! Key allocator integration tests
//!
//! Exercises allocation at head, tail and between keys, exhaustion of a gap
//! by repeated insertion, and the shape of full rebalances.

use rand::SeedableRng;
use rand::rngs::StdRng;
use reorder::{
    KeyAllocator,
    constants::{HEAD_BOUND, KMAX, TAIL_BOUND},
    position::NoGap,
};

#[test]
fn test_repeated_head_inserts_stay_ordered() {
    let mut alloc = KeyAllocator::seeded(11);
    // A random pick shrinks the gap by a factor of e on average, so the
    // half key space below 0 lasts for roughly 43 head inserts
    let mut head = 0;
    for _ in 0..16 {
        let key = alloc
            .allocate_between(None, Some(head))
            .expect("Gap should not run out this early");
        assert!(HEAD_BOUND < key && key < head);
        head = key;
    }
}

#[test]
fn test_repeated_tail_inserts_stay_ordered() {
    let mut alloc = KeyAllocator::seeded(12);
    let mut tail = 0;
    for _ in 0..16 {
        let key = alloc
            .allocate_between(Some(tail), None)
            .expect("Gap should not run out this early");
        assert!(tail < key && key < TAIL_BOUND);
        tail = key;
    }
}

#[test]
fn test_narrowing_gap_eventually_reports_no_gap() {
    let mut alloc = KeyAllocator::seeded(13);
    let (low, mut high) = (0, 1 << 20);
    let mut steps = 0;
    loop {
        match alloc.allocate_between(Some(low), Some(high)) {
            Ok(key) => {
                assert!(low < key && key < high);
                high = key;
                steps += 1;
            }
            Err(gap) => {
                assert_eq!(gap, NoGap { low, high: 1 });
                break;
            }
        }
        assert!(steps < 1 << 20, "Gap never ran out");
    }
    assert!(steps > 0);
}

#[test]
fn test_custom_rng_is_accepted() {
    let mut alloc = KeyAllocator::with_rng(StdRng::seed_from_u64(5));
    let key = alloc.allocate_between(Some(-3), Some(3)).unwrap();
    assert!((-2..=2).contains(&key));
}

#[test]
fn test_rebalance_leaves_headroom_for_next_inserts() {
    let mut alloc = KeyAllocator::seeded(14);
    let keys = alloc.rebalance_all(64);

    assert_eq!(keys[0], HEAD_BOUND);
    let spacing = KMAX / 63;
    assert!(keys.windows(2).all(|w| w[1] - w[0] == spacing));

    // The first key sits on the head bound, so a head insert rebalances again
    assert!(alloc.allocate_between(None, Some(keys[0])).is_err());
    // Gaps between keys and above the last one remain
    assert!(alloc.allocate_between(Some(keys[0]), Some(keys[1])).is_ok());
    assert!(
        alloc
            .allocate_between(Some(*keys.last().unwrap()), Some(KMAX))
            .is_ok()
    );
}

#[test]
fn test_no_gap_display() {
    let err = NoGap { low: 4, high: 5 };
    assert_eq!(err.to_string(), "no position key fits between 4 and 5");
}
