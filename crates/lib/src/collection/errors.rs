//! Error types for ordered collections.
//!
//! Reorders either fail before any side effect or succeed; the variants below
//! are all precondition failures.

use thiserror::Error;

use super::OwnerId;
use crate::Error;
use crate::backend::ContextId;
use crate::position::PositionKey;

/// Errors that can occur while attaching, restoring or reordering a collection.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The collection has no persistence context yet.
    #[error("Collection {owner} is not attached to a context")]
    NotAttached {
        /// Owner of the collection
        owner: OwnerId,
    },

    /// The collection belongs to a different context than the one supplied.
    #[error("Collection {owner} belongs to context {expected}, not {actual}")]
    ContextMismatch {
        /// Owner of the collection
        owner: OwnerId,
        /// Context the collection is attached to
        expected: ContextId,
        /// Context passed to the operation
        actual: ContextId,
    },

    /// The collection is already attached to another context.
    #[error("Collection {owner} is already attached to context {context}")]
    AlreadyAttached {
        /// Owner of the collection
        owner: OwnerId,
        /// Context the collection is attached to
        context: ContextId,
    },

    /// An item occurs more than once in a sequence.
    #[error("Item {item} appears more than once (again at index {index})")]
    DuplicateItem {
        /// Index of the second occurrence
        index: usize,
        /// Debug rendering of the item identity
        item: String,
    },

    /// Two restored links share a position key.
    #[error("Position key {key} is used by more than one link")]
    DuplicateKey {
        /// The shared key
        key: PositionKey,
    },
}

impl CollectionError {
    /// Check if this error is about a missing or wrong context.
    pub fn is_context_error(&self) -> bool {
        matches!(
            self,
            CollectionError::NotAttached { .. }
                | CollectionError::ContextMismatch { .. }
                | CollectionError::AlreadyAttached { .. }
        )
    }

    /// Check if this error is about inconsistent input data.
    pub fn is_inconsistent_input(&self) -> bool {
        matches!(
            self,
            CollectionError::DuplicateItem { .. } | CollectionError::DuplicateKey { .. }
        )
    }

    /// Get the owner of the collection, if the error names one.
    pub fn owner(&self) -> Option<OwnerId> {
        match self {
            CollectionError::NotAttached { owner }
            | CollectionError::ContextMismatch { owner, .. }
            | CollectionError::AlreadyAttached { owner, .. } => Some(*owner),
            _ => None,
        }
    }
}

/// Errors raised while building a [`RelationshipConfig`](super::RelationshipConfig).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The raw field name does not have the `prefixName` shape.
    #[error("Cannot infer the array field name from {field:?}, set one explicitly")]
    CannotInferArrayName {
        /// The raw field name
        field: String,
    },

    /// The link type name does not have the `PrefixItemType` shape.
    #[error("Cannot infer the item type from link type {link_type:?}, set one explicitly")]
    CannotInferItemType {
        /// The link type name
        link_type: String,
    },

    /// A configured name is empty.
    #[error("Relationship {what} name must not be empty")]
    EmptyName {
        /// Which name was empty
        what: &'static str,
    },
}

impl ConfigError {
    /// Check if this error comes from name inference.
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            ConfigError::CannotInferArrayName { .. } | ConfigError::CannotInferItemType { .. }
        )
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for Error {
    fn from(err: CollectionError) -> Self {
        Error::Collection(err)
    }
}
