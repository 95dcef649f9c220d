//! Constants used throughout the reorder library.
//!
//! This module provides central definitions for the position key space and the
//! default names used by relationship configurations.

use crate::position::PositionKey;

/// Smallest representable position key.
pub const KMIN: PositionKey = PositionKey::MIN;

/// Largest representable position key.
pub const KMAX: PositionKey = PositionKey::MAX;

/// Exclusive lower bound used when inserting at the head of a collection.
///
/// The quarter of the key space below this value is kept as headroom.
pub const HEAD_BOUND: PositionKey = KMIN / 2;

/// Exclusive upper bound used when inserting at the tail of a collection.
pub const TAIL_BOUND: PositionKey = KMAX / 2;

/// Key given to the first link of an empty collection.
pub const FIRST_KEY: PositionKey = 0;

/// Default name of the inverse relationship field on the item type.
pub const DEFAULT_INVERSE_NAME: &str = "superitem";

/// Prefix of generated link type names (`Ordered{ItemType}`).
pub const LINK_TYPE_PREFIX: &str = "Ordered";
