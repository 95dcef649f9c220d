//! Ordered one-to-many relationships backed by position-keyed links.
//!
//! An [`OrderedCollection`] owns a bag of [`Link`]s. Each link pairs one item
//! with a [`PositionKey`]; the observable sequence is the items sorted by key.
//!
//! The only way to change the sequence is [`OrderedCollection::set_order`]: the
//! caller hands over the complete new sequence and the collection works out
//! the smallest set of link mutations that produces it:
//!
//! 1. Diff the old item sequence against the new one ([`crate::diff`]).
//! 2. Destroy the links of items that left the collection.
//! 3. Give inserted and moved items a key inside the gap between their new
//!    neighbours ([`KeyAllocator::allocate_between`]).
//! 4. When a gap is exhausted, rekey the whole collection once
//!    ([`KeyAllocator::rebalance_all`]) and stop.
//!
//! Every side effect goes through the [`Context`] passed in, after all
//! preconditions have been checked.
//!
//! ```
//! use reorder::backend::InMemory;
//! use reorder::collection::{OrderedCollection, RelationshipConfig};
//! use reorder::position::KeyAllocator;
//!
//! let config = RelationshipConfig::new("Board", "Card", "cards").unwrap();
//! let mut ctx = InMemory::new();
//! let mut alloc = KeyAllocator::seeded(1);
//!
//! let mut cards: OrderedCollection<String> = OrderedCollection::new(config);
//! cards.attach(&ctx).unwrap();
//!
//! let order = vec!["todo".to_string(), "doing".to_string(), "done".to_string()];
//! cards.set_order(&mut ctx, &mut alloc, order.clone()).unwrap();
//! assert_eq!(cards.items(), order);
//!
//! // Moving one card touches only that card's key
//! let report = cards
//!     .set_order(
//!         &mut ctx,
//!         &mut alloc,
//!         vec!["done".to_string(), "todo".to_string(), "doing".to_string()],
//!     )
//!     .unwrap();
//! assert_eq!(report.rekeyed, 1);
//! assert_eq!(cards.items(), vec!["done", "todo", "doing"]);
//! ```

mod config;
pub mod errors;
mod snapshot;

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::{Context, ContextId};
use crate::constants::FIRST_KEY;
use crate::diff::{Change, EditScript, diff};
use crate::item::Identified;
use crate::position::{KeyAllocator, PositionKey};

pub use config::{DeleteRule, RelationshipConfig};
pub use errors::{CollectionError, ConfigError};
pub use snapshot::{LinkRecord, Snapshot};

/// Identifies one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(Uuid);

impl LinkId {
    /// Generates a fresh random link ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for LinkId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the owner of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(Uuid);

impl OwnerId {
    /// Generates a fresh random owner ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for OwnerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join entity pairing one item with its position key.
///
/// A link is created when its item enters a collection, rekeyed when the item
/// moves, and destroyed when the item leaves. Only the collection mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<T> {
    id: LinkId,
    owner: OwnerId,
    item: T,
    key: PositionKey,
}

impl<T> Link<T> {
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Owner of the collection this link belongs to.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn key(&self) -> PositionKey {
        self.key
    }
}

/// Outcome of a successful [`OrderedCollection::set_order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderReport<I> {
    /// Edit script from the old to the new item sequence
    pub script: EditScript<I>,
    /// Whether the whole collection was rekeyed
    pub rebalanced: bool,
    /// Links created for items that entered the collection
    pub created: usize,
    /// Links destroyed for items that left the collection
    pub destroyed: usize,
    /// Surviving links whose key changed
    pub rekeyed: usize,
}

impl<I> ReorderReport<I> {
    /// True when nothing was mutated.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.destroyed == 0 && self.rekeyed == 0
    }
}

/// Owner-side view of an ordered relationship.
///
/// Links are kept sorted by key, so reads need no sorting.
#[derive(Debug, Clone)]
pub struct OrderedCollection<T> {
    owner: OwnerId,
    config: RelationshipConfig,
    context: Option<ContextId>,
    links: Vec<Link<T>>,
}

impl<T: Identified> OrderedCollection<T> {
    /// Creates an empty, unattached collection with a fresh owner ID.
    pub fn new(config: RelationshipConfig) -> Self {
        Self::with_owner(OwnerId::generate(), config)
    }

    /// Creates an empty, unattached collection for an existing owner.
    pub fn with_owner(owner: OwnerId, config: RelationshipConfig) -> Self {
        Self {
            owner,
            config,
            context: None,
            links: Vec::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn config(&self) -> &RelationshipConfig {
        &self.config
    }

    /// Context the collection is attached to, if any.
    pub fn context(&self) -> Option<ContextId> {
        self.context
    }

    /// Binds the collection to a persistence context.
    ///
    /// Attaching again to the same context is a no-op.
    pub fn attach<C: Context<T>>(&mut self, ctx: &C) -> Result<(), CollectionError> {
        match self.context {
            Some(current) if current != ctx.id() => Err(CollectionError::AlreadyAttached {
                owner: self.owner,
                context: current,
            }),
            _ => {
                self.context = Some(ctx.id());
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links in ascending key order.
    pub fn links(&self) -> &[Link<T>] {
        &self.links
    }

    /// Items in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.links.iter().map(|link| &link.item)
    }

    /// Key of the link holding `item`.
    pub fn key_of(&self, item: &T) -> Option<PositionKey> {
        self.link_of(item).map(Link::key)
    }

    /// Link holding `item`.
    pub fn link_of(&self, item: &T) -> Option<&Link<T>> {
        let id = item.id();
        self.links.iter().find(|link| link.item.id() == id)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.link_of(item).is_some()
    }

    /// Replaces the observable sequence with `new_items`.
    ///
    /// Links of items that stay in relative order keep their keys. Items that
    /// left get their link destroyed (and, under [`DeleteRule::Cascade`], are
    /// deleted from `ctx`). New and moved items get keys between their
    /// neighbours; if some gap is exhausted the whole sequence is rekeyed once.
    ///
    /// # Errors
    /// - [`CollectionError::NotAttached`] if the collection has no context
    /// - [`CollectionError::ContextMismatch`] if `ctx` is not its context
    /// - [`CollectionError::DuplicateItem`] if `new_items` repeats an item
    ///
    /// No side effect happens when an error is returned.
    pub fn set_order<C, R>(
        &mut self,
        ctx: &mut C,
        alloc: &mut KeyAllocator<R>,
        new_items: Vec<T>,
    ) -> Result<ReorderReport<T::Id>, CollectionError>
    where
        C: Context<T>,
        R: Rng,
    {
        match self.context {
            None => return Err(CollectionError::NotAttached { owner: self.owner }),
            Some(expected) if expected != ctx.id() => {
                return Err(CollectionError::ContextMismatch {
                    owner: self.owner,
                    expected,
                    actual: ctx.id(),
                });
            }
            Some(_) => {}
        }

        let new_ids: Vec<T::Id> = new_items.iter().map(Identified::id).collect();
        let mut wanted: HashMap<&T::Id, usize> = HashMap::with_capacity(new_ids.len());
        for (index, id) in new_ids.iter().enumerate() {
            if wanted.insert(id, index).is_some() {
                return Err(CollectionError::DuplicateItem {
                    index,
                    item: format!("{id:?}"),
                });
            }
        }

        // Old links first, in key order, then one new link per unknown item
        let old_ids: Vec<T::Id> = self.links.iter().map(|link| link.item.id()).collect();
        let existing: HashMap<&T::Id, usize> = old_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let mut slots: Vec<Slot<T>> = std::mem::take(&mut self.links)
            .into_iter()
            .map(|link| Slot {
                stored_key: Some(link.key),
                link,
            })
            .collect();

        let mut final_order = Vec::with_capacity(new_items.len());
        for (item, id) in new_items.into_iter().zip(&new_ids) {
            match existing.get(id) {
                Some(&slot) => final_order.push(slot),
                None => {
                    if !ctx.is_attached(&item) {
                        ctx.attach_item(&item);
                    }
                    final_order.push(slots.len());
                    slots.push(Slot {
                        stored_key: None,
                        link: Link {
                            id: LinkId::generate(),
                            owner: self.owner,
                            item,
                            key: FIRST_KEY,
                        },
                    });
                }
            }
        }

        let script = diff(&old_ids, &new_ids);
        tracing::debug!(
            owner = %self.owner,
            relationship = self.config.array_name(),
            old_len = old_ids.len(),
            new_len = new_ids.len(),
            changes = script.len(),
            "Reordering collection"
        );

        let mut destroyed = 0;
        let mut rebalanced = false;
        let mut working: Vec<usize> = (0..old_ids.len()).collect();
        for change in &script {
            match change {
                Change::Remove { offset, item } => {
                    let slot = working.remove(*offset);
                    if !wanted.contains_key(item) {
                        let link = &slots[slot].link;
                        tracing::debug!(owner = %self.owner, link = %link.id, "Destroying link");
                        ctx.delete_link(link);
                        if self.config.delete_rule().cascades() {
                            ctx.delete_item(&link.item);
                        }
                        destroyed += 1;
                    }
                }
                Change::Insert { offset, .. } => {
                    let slot = final_order[*offset];
                    let key = if working.is_empty() {
                        FIRST_KEY
                    } else {
                        let low = offset
                            .checked_sub(1)
                            .map(|before| slots[working[before]].link.key);
                        let high = working.get(*offset).map(|&at| slots[at].link.key);
                        match alloc.allocate_between(low, high) {
                            Ok(key) => key,
                            Err(gap) => {
                                tracing::info!(
                                    owner = %self.owner,
                                    low = gap.low,
                                    high = gap.high,
                                    links = final_order.len(),
                                    "Position gap exhausted, rebalancing collection"
                                );
                                let keys = alloc.rebalance_all(final_order.len());
                                for (&slot, key) in final_order.iter().zip(keys) {
                                    slots[slot].link.key = key;
                                }
                                rebalanced = true;
                                break;
                            }
                        }
                    };
                    slots[slot].link.key = key;
                    working.insert(*offset, slot);
                }
            }
        }

        let mut created = 0;
        let mut rekeyed = 0;
        for &slot in &final_order {
            let Slot { link, stored_key } = &slots[slot];
            match stored_key {
                None => {
                    ctx.insert_link(link);
                    created += 1;
                }
                Some(stored) if *stored != link.key => {
                    ctx.update_link(link);
                    rekeyed += 1;
                }
                Some(_) => {}
            }
        }

        let mut slots: Vec<Option<Link<T>>> = slots.into_iter().map(|s| Some(s.link)).collect();
        self.links = final_order
            .iter()
            .filter_map(|&slot| slots[slot].take())
            .collect();

        Ok(ReorderReport {
            script,
            rebalanced,
            created,
            destroyed,
            rekeyed,
        })
    }
}

impl<T: Identified + Clone> OrderedCollection<T> {
    /// Items in ascending key order.
    pub fn items(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// A link during replay, with the key it had before the reorder.
struct Slot<T> {
    link: Link<T>,
    stored_key: Option<PositionKey>,
}
