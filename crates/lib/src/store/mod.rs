//! The list persistence boundary.
//!
//! This module provides the [`ListStore`] trait and the bundled
//! [`InMemory`] backend. The trait is the seam between the list service
//! and durable storage: the service reads and writes whole [`List`]
//! aggregates through it and never sees how they are persisted.

mod errors;
pub use errors::StoreError;

mod in_memory;
pub use in_memory::InMemory;

use std::any::Any;

use async_trait::async_trait;

use crate::Result;
use crate::list::{List, ListId, UserId};

/// Storage abstraction for [`List`] aggregates.
///
/// A store persists lists keyed by id and by owner id, always as whole
/// aggregates: `save` replaces the entire stored list in one upsert, so
/// other callers never observe a partially applied mutation. The store is
/// the only component permitted to assign identifiers — `save` fills in
/// the list id and any item ids that are still unassigned and returns the
/// persisted form.
///
/// Implementations must be `Send + Sync` to be shared across request
/// handlers, and implement `Any` to allow downcasting to a concrete
/// backend where needed (e.g. snapshot persistence on shutdown).
#[async_trait]
pub trait ListStore: Send + Sync + Any {
    /// Retrieves a list by id.
    ///
    /// Returns `Ok(None)` when no list with the given id exists; absence
    /// is not a store-level error.
    async fn find(&self, list_id: &ListId) -> Result<Option<List>>;

    /// Retrieves all lists owned by the given user.
    ///
    /// The result order is the store's natural order and is unspecified;
    /// callers must not rely on it.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<List>>;

    /// Persists a list as a whole-aggregate upsert and returns the
    /// persisted form.
    ///
    /// Assigns the list id on first save, and an id to every item that
    /// does not have one yet. Ids that are already assigned are preserved.
    async fn save(&self, list: List) -> Result<List>;

    /// Deletes a list by id.
    ///
    /// Returns `true` if a list existed and was deleted, `false` if the
    /// id was unknown. Deleting a list destroys all of its items.
    async fn delete(&self, list_id: &ListId) -> Result<bool>;

    /// Returns a reference to the store as a dynamic `Any` type.
    ///
    /// This allows downcasting to a concrete backend implementation to
    /// reach implementation-specific methods. Use with caution.
    fn as_any(&self) -> &dyn Any;
}
