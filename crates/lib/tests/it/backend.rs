//! InMemory context tests

use reorder::backend::{Context, Mutation};
use reorder::collection::OrderedCollection;
use reorder::{InMemory, KeyAllocator};

use crate::helpers::*;

#[test]
fn test_contexts_have_distinct_ids() {
    let a: InMemory<String> = InMemory::new();
    let b: InMemory<String> = InMemory::default();
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_preload_does_not_log() {
    let (ctx, collection) = setup_keyed(&[("a", 1), ("b", 2)]);
    assert!(ctx.mutations().is_empty());
    assert_eq!(ctx.link_count(), 2);
    assert_eq!(ctx.item_count(), 2);
    assert_context_matches(&ctx, &collection);
}

#[test]
fn test_mutation_log_tracks_reorder() {
    let (mut ctx, mut alloc, mut collection) = setup(1);
    collection
        .set_order(&mut ctx, &mut alloc, names(&["a", "b"]))
        .unwrap();
    let log = ctx.take_mutations();
    assert_eq!(log.iter().filter(|m| m.is_link_inserted()).count(), 2);
    assert_eq!(
        log.iter()
            .filter(|m| matches!(m, Mutation::ItemAttached { .. }))
            .count(),
        2
    );
    assert!(ctx.mutations().is_empty());

    collection
        .set_order(&mut ctx, &mut alloc, names(&["b"]))
        .unwrap();
    let log = ctx.take_mutations();
    assert_eq!(log.len(), 2);
    assert!(matches!(&log[0], Mutation::LinkDeleted { item, .. } if item == "a"));
    assert_eq!(
        log[1],
        Mutation::ItemDeleted {
            item: "a".to_string()
        }
    );
    assert_eq!(ctx.item_count(), 1);
    assert_context_matches(&ctx, &collection);
}

#[test]
fn test_mutation_serializes_with_kind_tag() {
    let mutation: Mutation<String> = Mutation::ItemDeleted {
        item: "a".to_string(),
    };
    let json = serde_json::to_value(&mutation).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "item_deleted", "item": "a"}));
}

#[test]
fn test_shared_context_serves_two_collections() {
    let mut ctx = InMemory::new();
    let mut alloc = KeyAllocator::seeded(3);
    let mut left = OrderedCollection::new(test_config());
    let mut right = OrderedCollection::new(test_config());
    left.attach(&ctx).unwrap();
    right.attach(&ctx).unwrap();

    left.set_order(&mut ctx, &mut alloc, names(&["x", "y"]))
        .unwrap();
    right
        .set_order(&mut ctx, &mut alloc, names(&["y", "z"]))
        .unwrap();

    assert_eq!(ctx.link_count(), 4);
    assert_eq!(ctx.item_count(), 3);
}
