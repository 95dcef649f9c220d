//! Backing-store capabilities used by the reconciler.
//!
//! The reconciler does not persist anything itself. Every observable side
//! effect of a reorder goes through a [`Context`]: attaching a new item,
//! inserting a freshly created link, rekeying a moved link, deleting a link
//! that left the collection and, under a cascading delete rule, deleting its
//! item.
//!
//! [`InMemory`] is the reference implementation. It keeps the registry of
//! attached items and the current key of every live link, and logs each call as
//! a [`Mutation`].

mod in_memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Link;
use crate::item::Identified;

pub use in_memory::{InMemory, Mutation};

/// Identifies one persistence context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextId(Uuid);

impl ContextId {
    /// Generates a fresh random context ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ContextId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutation sink of a backing store.
///
/// Calls are made only after all preconditions of a reorder have been checked,
/// so an implementation never sees a partially applied reorder that is later
/// rejected. The methods are infallible: a store that can fail must buffer the
/// calls and surface errors when its own transaction commits.
pub trait Context<T: Identified> {
    /// Identity of this context.
    fn id(&self) -> ContextId;

    /// Whether `item` is already known to this context.
    fn is_attached(&self, item: &T) -> bool;

    /// Registers an item that is not attached yet.
    fn attach_item(&mut self, item: &T);

    /// A link was created; called once with its final key.
    fn insert_link(&mut self, link: &Link<T>);

    /// An existing link received a new key.
    fn update_link(&mut self, link: &Link<T>);

    /// A link was destroyed because its item left the collection.
    fn delete_link(&mut self, link: &Link<T>);

    /// The item of a destroyed link is deleted as well (cascading delete rule).
    fn delete_item(&mut self, item: &T);
}
