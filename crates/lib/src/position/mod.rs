//! Sparse position keys for ordered collections.
//!
//! A collection is ordered by ascending [`PositionKey`]. Keys are sparse: a new
//! element receives a key somewhere inside the gap between its neighbours, so an
//! insertion or a move only touches the key of the element being placed.
//!
//! When a gap is used up the [`KeyAllocator`] reports [`NoGap`] and the caller
//! falls back to [`KeyAllocator::rebalance_all`], which spreads fresh keys over
//! the middle half of the key space.
//!
//! ```
//! use reorder::position::KeyAllocator;
//!
//! let mut alloc = KeyAllocator::seeded(7);
//! let key = alloc.allocate_between(Some(10), Some(20)).unwrap();
//! assert!(10 < key && key < 20);
//!
//! // Adjacent keys leave no room
//! assert!(alloc.allocate_between(Some(10), Some(11)).is_err());
//! ```

mod allocator;

pub use allocator::{KeyAllocator, NoGap};

/// Sort key of a link within its collection.
///
/// Keys within one collection are pairwise distinct; nothing is assumed across
/// collections.
pub type PositionKey = i64;
