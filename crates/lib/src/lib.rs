//!
//! Doable: named, typed lists of ordered items, with user-controlled
//! reordering. This library provides the list/item data model, the
//! ordering engine, the persistence boundary, and the service that ties
//! them together.
//!
//! ## Core Concepts
//!
//! * **Items (`list::Item`)**: Single content entries carrying a zero-based
//!   `order` index within their list.
//! * **Lists (`list::List`)**: The aggregate root — a named, typed,
//!   user-owned collection of items, read and written as one unit.
//! * **Ordering engine (`ordering`)**: Pure logic for appending at the
//!   tail, validating reorder permutations, and the explicit policy for
//!   survivors' order values after a delete.
//! * **Stores (`store::ListStore`)**: A pluggable persistence layer for
//!   list aggregates; `store::InMemory` ships with JSON snapshot support.
//! * **Service (`service::ListService`)**: The public operations
//!   (create/get/update/delete lists, add/edit/delete/reorder items),
//!   enforcing ownership and the ordering invariants before persisting.

pub mod list;
pub mod ordering;
pub mod service;
pub mod store;

pub use list::{Item, ItemId, List, ListId, UserId};
pub use service::ListService;

/// Result type used throughout the Doable library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Doable library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured ordering errors from the ordering engine
    #[error(transparent)]
    Ordering(ordering::OrderingError),

    /// Structured storage errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured service errors from the service module
    #[error(transparent)]
    Service(service::ServiceError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Ordering(_) => "ordering",
            Error::Store(_) => "store",
            Error::Service(_) => "service",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a list or item was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Service(service_err) => service_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a malformed reorder sequence.
    pub fn is_invalid_order(&self) -> bool {
        matches!(self, Error::Ordering(_))
    }

    /// Check if this error indicates a denied mutation.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Error::Service(service_err) => service_err.is_permission_denied(),
            _ => false,
        }
    }

    /// Check if this error is an input validation failure.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Service(service_err) => service_err.is_validation_error(),
            Error::Ordering(_) => true,
            _ => false,
        }
    }

    /// Check if this error is a persistence failure.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Store(_) | Error::Io(_) | Error::Serialize(_))
    }
}
