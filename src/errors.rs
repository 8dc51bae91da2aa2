//! Error types for container operations.

use std::any::type_name;
use std::fmt;

use thiserror::Error;

/// The error type shared by every container contract in this crate.
///
/// Each variant corresponds to one failure kind of the container contracts.
/// Errors are returned at the point of detection and are never retried or
/// swallowed internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A mutating operation was attempted on a read-only container.
    #[error("Collection is read-only")]
    ReadOnly,

    /// A mutating operation was attempted after the container was sealed.
    #[error("Instance is sealed and can no longer be modified")]
    InstanceSealed,

    /// An argument was missing or ill-shaped.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// A sequence index fell outside the container bounds.
    #[error("Index {index} is out of range: collection has only {available} elements")]
    IndexOutOfRange { index: usize, available: usize },

    /// A keyed lookup missed.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A keyed insert collided with an existing key.
    #[error("An element with the key {0} already exists")]
    DuplicateKey(String),

    /// The operation has no defined semantics for this adapter.
    #[error("Operation not supported: {0}")]
    NotSupported(&'static str),

    /// A narrowing conversion failed.
    #[error("Cannot cast {from} to {to}")]
    InvalidCast { from: &'static str, to: &'static str },

    /// The container changed structurally while it was being enumerated.
    #[error("Collection was modified during enumeration")]
    ConcurrentModification,
}

impl CollectionError {
    pub fn key_not_found<K: fmt::Debug + ?Sized>(key: &K) -> Self {
        CollectionError::KeyNotFound(format!("{:?}", key))
    }

    pub fn duplicate_key<K: fmt::Debug + ?Sized>(key: &K) -> Self {
        CollectionError::DuplicateKey(format!("{:?}", key))
    }

    pub fn index_out_of_range(index: usize, available: usize) -> Self {
        CollectionError::IndexOutOfRange { index, available }
    }

    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        CollectionError::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Create a cast error from the source and target type names.
    pub fn invalid_cast<From: ?Sized, To: ?Sized>() -> Self {
        CollectionError::InvalidCast {
            from: type_name::<From>(),
            to: type_name::<To>(),
        }
    }

    /// Returns true for the errors raised because mutation is forbidden.
    pub fn is_write_rejection(&self) -> bool {
        matches!(
            self,
            CollectionError::ReadOnly | CollectionError::InstanceSealed
        )
    }
}

/// Result alias used throughout the container contracts.
pub type Result<T, E = CollectionError> = std::result::Result<T, E>;
