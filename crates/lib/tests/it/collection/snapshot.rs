//! Snapshot and configuration tests

use reorder::collection::{ConfigError, DeleteRule, OrderedCollection, Snapshot};
use reorder::{KeyAllocator, RelationshipConfig};

use crate::helpers::*;

#[test]
fn test_snapshot_survives_json() {
    let (mut ctx, mut alloc, mut collection) = setup(1);
    collection
        .set_order(&mut ctx, &mut alloc, names(&["a", "b", "c"]))
        .unwrap();

    let json = serde_json::to_string(&collection.snapshot()).unwrap();
    let snapshot: Snapshot<String> = serde_json::from_str(&json).unwrap();
    let restored = OrderedCollection::restore(snapshot).unwrap();

    assert_eq!(restored.items(), collection.items());
    assert_eq!(restored.owner(), collection.owner());
    assert_eq!(restored.config(), collection.config());
    for (left, right) in restored.links().iter().zip(collection.links()) {
        assert_eq!(left.id(), right.id());
        assert_eq!(left.key(), right.key());
    }
}

#[test]
fn test_restored_collection_continues_reordering() {
    let (_, mut alloc, mut collection) = setup(2);
    let mut ctx = reorder::InMemory::new();
    collection = OrderedCollection::restore(collection.snapshot()).unwrap();
    collection.attach(&ctx).unwrap();
    collection
        .set_order(&mut ctx, &mut alloc, names(&["x"]))
        .unwrap();

    let mut next = OrderedCollection::restore(collection.snapshot()).unwrap();
    let mut next_ctx = reorder::InMemory::new();
    next.attach(&next_ctx).unwrap();
    next_ctx.preload(next.links());
    next.set_order(&mut next_ctx, &mut alloc, names(&["y", "x"]))
        .unwrap();

    assert_eq!(next.items(), names(&["y", "x"]));
    assert_eq!(next.key_of(&"x".to_string()), Some(0));
}

#[test]
fn test_inferred_config() {
    let config = test_config();
    assert_eq!(config.owner_type(), "Item");
    assert_eq!(config.array_name(), "subItems");
    assert_eq!(config.item_type(), "SubItem");
    assert_eq!(config.link_type(), "OrderedSubItem");
    assert_eq!(config.inverse_name(), "superitem");
    assert_eq!(config.delete_rule(), DeleteRule::Cascade);
}

#[test]
fn test_config_errors_convert() {
    let err: reorder::Error = RelationshipConfig::infer("Item", "subitems", "OrderedSubItem")
        .unwrap_err()
        .into();
    assert!(err.is_config_error());
    assert_eq!(err.module(), "config");

    let err = RelationshipConfig::new("", "Card", "cards").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyName { what: "owner type" }));
}

#[test]
fn test_no_action_keeps_item_attached() {
    let mut ctx = reorder::InMemory::new();
    let mut alloc = KeyAllocator::seeded(3);
    let mut collection =
        OrderedCollection::new(test_config().with_delete_rule(DeleteRule::NoAction));
    collection.attach(&ctx).unwrap();
    collection
        .set_order(&mut ctx, &mut alloc, names(&["a", "b"]))
        .unwrap();

    collection
        .set_order(&mut ctx, &mut alloc, names(&["b"]))
        .unwrap();

    assert!(ctx.contains_item(&"a".to_string()));
    assert_eq!(ctx.link_count(), 1);
}
