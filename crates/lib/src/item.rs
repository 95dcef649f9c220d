//! Identity of the items held by an ordered collection.
//!
//! The reconciler never looks inside an item. It only needs to tell whether two
//! values denote the same item, which is what [`Identified`] provides.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use uuid::Uuid;

/// A value with a stable identity.
///
/// Two values with equal [`Identified::Id`]s are the same item, whatever their
/// other fields hold.
pub trait Identified {
    /// Identity type compared by the diff engine.
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

impl Identified for String {
    type Id = String;

    fn id(&self) -> String {
        self.clone()
    }
}

impl Identified for u64 {
    type Id = u64;

    fn id(&self) -> u64 {
        *self
    }
}

impl Identified for Uuid {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        *self
    }
}

/// Reference identity: two `Arc`s are the same item iff they share an allocation.
///
/// The identity is only meaningful while the allocation is alive, which holds
/// for every item owned by a link.
impl<T> Identified for Arc<T> {
    type Id = usize;

    fn id(&self) -> usize {
        Arc::as_ptr(self) as *const () as usize
    }
}
