use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Context, ContextId};
use crate::collection::{Link, LinkId};
use crate::item::Identified;
use crate::position::PositionKey;

/// One call received by an [`InMemory`] context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation<I> {
    ItemAttached {
        item: I,
    },
    LinkInserted {
        link: LinkId,
        item: I,
        key: PositionKey,
    },
    LinkUpdated {
        link: LinkId,
        item: I,
        key: PositionKey,
    },
    LinkDeleted {
        link: LinkId,
        item: I,
    },
    ItemDeleted {
        item: I,
    },
}

impl<I> Mutation<I> {
    pub fn is_link_deleted(&self) -> bool {
        matches!(self, Mutation::LinkDeleted { .. })
    }

    pub fn is_link_inserted(&self) -> bool {
        matches!(self, Mutation::LinkInserted { .. })
    }

    pub fn is_link_updated(&self) -> bool {
        matches!(self, Mutation::LinkUpdated { .. })
    }
}

/// A simple in-memory context.
///
/// Suitable for tests, tooling, or as a staging area whose [`Mutation`] log is
/// replayed into a real store afterwards.
pub struct InMemory<T: Identified> {
    id: ContextId,
    /// Items attached to this context
    items: HashSet<T::Id>,
    /// Current key of every live link
    links: HashMap<LinkId, PositionKey>,
    /// Every call received, in order
    log: Vec<Mutation<T::Id>>,
}

impl<T: Identified> InMemory<T> {
    /// Creates a new, empty context with a fresh ID.
    pub fn new() -> Self {
        Self {
            id: ContextId::generate(),
            items: HashSet::new(),
            links: HashMap::new(),
            log: Vec::new(),
        }
    }

    /// Registers links that already exist in the store, without logging.
    ///
    /// Used after restoring a collection from a snapshot.
    pub fn preload<'a>(&mut self, links: impl IntoIterator<Item = &'a Link<T>>)
    where
        T: 'a,
    {
        for link in links {
            self.items.insert(link.item().id());
            self.links.insert(link.id(), link.key());
        }
    }

    /// Whether an item with this identity is attached.
    pub fn contains_item(&self, id: &T::Id) -> bool {
        self.items.contains(id)
    }

    /// Stored key of a live link.
    pub fn link_key(&self, link: &LinkId) -> Option<PositionKey> {
        self.links.get(link).copied()
    }

    /// Number of live links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of attached items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Calls received so far, oldest first.
    pub fn mutations(&self) -> &[Mutation<T::Id>] {
        &self.log
    }

    /// Drains the mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation<T::Id>> {
        std::mem::take(&mut self.log)
    }
}

impl<T: Identified> Default for InMemory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> fmt::Debug for InMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemory")
            .field("id", &self.id)
            .field("items", &self.items.len())
            .field("links", &self.links.len())
            .field("log", &self.log.len())
            .finish()
    }
}

impl<T: Identified> Context<T> for InMemory<T> {
    fn id(&self) -> ContextId {
        self.id
    }

    fn is_attached(&self, item: &T) -> bool {
        self.items.contains(&item.id())
    }

    fn attach_item(&mut self, item: &T) {
        let id = item.id();
        self.items.insert(id.clone());
        self.log.push(Mutation::ItemAttached { item: id });
    }

    fn insert_link(&mut self, link: &Link<T>) {
        self.links.insert(link.id(), link.key());
        self.log.push(Mutation::LinkInserted {
            link: link.id(),
            item: link.item().id(),
            key: link.key(),
        });
    }

    fn update_link(&mut self, link: &Link<T>) {
        self.links.insert(link.id(), link.key());
        self.log.push(Mutation::LinkUpdated {
            link: link.id(),
            item: link.item().id(),
            key: link.key(),
        });
    }

    fn delete_link(&mut self, link: &Link<T>) {
        self.links.remove(&link.id());
        self.log.push(Mutation::LinkDeleted {
            link: link.id(),
            item: link.item().id(),
        });
    }

    fn delete_item(&mut self, item: &T) {
        let id = item.id();
        self.items.remove(&id);
        self.log.push(Mutation::ItemDeleted { item: id });
    }
}
