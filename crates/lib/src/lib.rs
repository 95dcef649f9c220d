//!
//! Reorder: persisted, user-reorderable one-to-many relationships.
//!
//! A list-valued relationship is stored as a bag of join entities ("links"),
//! each holding one item and a sparse integer position key. Reordering the list
//! rewrites only the keys of the items that actually moved.
//!
//! ## Core Concepts
//!
//! * **Position keys (`position::PositionKey`)**: Sparse `i64` sort keys. New keys are drawn at random from the gap between neighbours.
//! * **Key allocator (`position::KeyAllocator`)**: Picks keys inside gaps, and computes an even full assignment when a gap runs out.
//! * **Diff engine (`diff::diff`)**: Minimal, deterministic remove/insert scripts between two sequences.
//! * **Ordered collections (`collection::OrderedCollection`)**: The owner side of a relationship. `set_order` is its single mutation entry point.
//! * **Contexts (`backend::Context`)**: The backing-store capabilities a reorder needs: attach items, insert, rekey and delete links.

pub mod backend;
pub mod collection;
pub mod constants;
pub mod diff;
pub mod item;
pub mod position;

pub use backend::{Context, ContextId, InMemory};
pub use collection::{OrderedCollection, RelationshipConfig};
pub use item::Identified;
pub use position::{KeyAllocator, PositionKey};

/// Result type used throughout the reorder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the reorder library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured collection errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),

    /// Relationship configuration errors
    #[error(transparent)]
    Config(collection::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "collection",
            Error::Config(_) => "config",
        }
    }

    /// Check if this error indicates a missing or mismatched context.
    pub fn is_context_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_context_error(),
            _ => false,
        }
    }

    /// Check if this error was caused by inconsistent caller data.
    pub fn is_inconsistent_input(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_inconsistent_input(),
            _ => false,
        }
    }

    /// Check if this error is configuration-related.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
