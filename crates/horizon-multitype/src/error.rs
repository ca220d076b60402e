//! Error types for the list model.
//!
//! Every error is a caller-usage error raised synchronously from the
//! offending call. None of them are retried or recovered internally.

use crate::model::TypeTag;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving a [`MultiTypeModel`](crate::model::MultiTypeModel).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A call arrived from outside the owning context. Nothing was changed.
    #[error("MultiTypeModel::{operation} must only be called from the owning (UI) thread")]
    NotOnOwningThread { operation: &'static str },

    /// A position was outside the valid bound for the operation.
    ///
    /// Insertion accepts `0..=count`; every other positional call accepts
    /// `0..count`.
    #[error("position {position} invalid. Item count is {count}")]
    IndexOutOfRange { position: usize, count: usize },

    /// No factory is registered for the tag.
    #[error("Unknown {tag}. Make sure a factory is registered with MultiTypeModelBuilder::factory()")]
    UnknownType { tag: TypeTag },

    /// A container does not have the capability the model needs.
    ///
    /// Raised when an item's binder expects a different container type than
    /// the factory registered for its tag, or when lifecycle hooks are
    /// required and the created container does not implement them.
    #[error("container for {tag} must be {expected}, found {found}")]
    ContainerCapabilityMismatch {
        tag: TypeTag,
        expected: &'static str,
        found: &'static str,
    },

    /// A container created for one tag was handed to an item of another.
    #[error("cannot bind item at position {position} ({item}) into a container created for {container}")]
    TagMismatch {
        position: usize,
        item: TypeTag,
        container: TypeTag,
    },
}

impl Error {
    /// Create a wrong-thread error for the named operation.
    pub fn not_on_owning_thread(operation: &'static str) -> Self {
        Self::NotOnOwningThread { operation }
    }

    /// Create an out-of-range error.
    pub fn index_out_of_range(position: usize, count: usize) -> Self {
        Self::IndexOutOfRange { position, count }
    }

    /// Create a capability mismatch error.
    pub fn capability_mismatch(tag: TypeTag, expected: &'static str, found: &'static str) -> Self {
        Self::ContainerCapabilityMismatch {
            tag,
            expected,
            found,
        }
    }
}
