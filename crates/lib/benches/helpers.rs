//! Shared helpers for benchmark tests

use reorder::{
    InMemory, KeyAllocator, OrderedCollection, RelationshipConfig,
    collection::{LinkId, LinkRecord, OwnerId, Snapshot},
};

pub fn items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item_{i}")).collect()
}

/// Creates an attached collection holding `count` evenly keyed items.
pub fn setup_collection(
    count: usize,
) -> (InMemory<String>, KeyAllocator, OrderedCollection<String>) {
    let config = RelationshipConfig::new("Board", "Card", "cards")
        .expect("Failed to build relationship config");
    let alloc = KeyAllocator::seeded(count as u64);
    let snapshot = Snapshot {
        owner: OwnerId::generate(),
        config,
        links: items(count)
            .into_iter()
            .zip(alloc.rebalance_all(count))
            .map(|(item, key)| LinkRecord {
                id: LinkId::generate(),
                item,
                key,
            })
            .collect(),
    };

    let mut ctx = InMemory::new();
    let mut collection = OrderedCollection::restore(snapshot).expect("Failed to restore");
    collection.attach(&ctx).expect("Failed to attach collection");
    ctx.preload(collection.links());
    (ctx, alloc, collection)
}
