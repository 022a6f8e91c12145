//! The list service: the public mutation and query surface.
//!
//! [`ListService`] orchestrates the store and the ordering engine to
//! implement the caller-facing operations: create/get/update/delete for
//! lists, and add/edit/delete/reorder for items. Every mutation follows
//! the same shape: load the whole aggregate from the store, check the
//! caller is authorized, apply the change (consulting the ordering engine
//! where order values are involved), and write the whole aggregate back.
//!
//! The service holds no list state between calls; each operation costs
//! exactly one store read plus (for mutations) one store write. Two
//! concurrent mutations of the same list therefore race with
//! last-write-wins semantics — an accepted limitation, see the store
//! documentation.

mod errors;
pub use errors::ServiceError;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::Result;
use crate::list::{Item, ItemId, List, ListId, UserId};
use crate::ordering::{self, DeletePolicy};
use crate::store::ListStore;

/// Capability check consulted before every mutating operation.
///
/// The caller identity is an opaque, already-authenticated user id; this
/// trait decides whether that identity may mutate the given list. Reads
/// by owner are inherently scoped and bypass it.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Returns true if `caller` may mutate `list`.
    async fn authorize(&self, caller: &UserId, list: &List) -> bool;
}

/// Default authorizer: only the list's owner may mutate it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOnly;

#[async_trait]
impl Authorizer for OwnerOnly {
    async fn authorize(&self, caller: &UserId, list: &List) -> bool {
        list.owner_id() == caller
    }
}

/// Orchestrates the store and the ordering engine to implement the public
/// list operations.
pub struct ListService {
    store: Arc<dyn ListStore>,
    authorizer: Arc<dyn Authorizer>,
    delete_policy: DeletePolicy,
}

impl ListService {
    /// Creates a service over the given store with the default
    /// [`OwnerOnly`] authorizer and [`DeletePolicy::RenumberSurvivors`].
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store,
            authorizer: Arc::new(OwnerOnly),
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Replaces the authorizer consulted before mutations.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Replaces the policy applied to survivors after an item delete.
    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    /// The store this service persists through.
    pub fn store(&self) -> &dyn ListStore {
        self.store.as_ref()
    }

    /// The delete policy this service applies.
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Creates a new, empty list for `owner_id`.
    ///
    /// The name must be non-empty; `list_type` defaults to
    /// [`DEFAULT_LIST_TYPE`](crate::list::DEFAULT_LIST_TYPE) when omitted.
    pub async fn create_list(
        &self,
        owner_id: &UserId,
        name: impl Into<String>,
        list_type: Option<String>,
    ) -> Result<List> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ServiceError::EmptyListName.into());
        }

        let list = self.store.save(List::new(owner_id.clone(), name, list_type)).await?;
        debug!(list_id = %list.id(), owner_id = %owner_id, "created list");
        Ok(list)
    }

    /// Retrieves all lists owned by `owner_id`, in the store's natural
    /// (unspecified) order.
    pub async fn lists_for_owner(&self, owner_id: &UserId) -> Result<Vec<List>> {
        self.store.find_by_owner(owner_id).await
    }

    /// Updates a list's name and/or type. Fields passed as `None` are
    /// left untouched.
    pub async fn update_list(
        &self,
        caller: &UserId,
        list_id: &ListId,
        name: Option<String>,
        list_type: Option<String>,
    ) -> Result<List> {
        if let Some(ref name) = name
            && name.trim().is_empty()
        {
            return Err(ServiceError::EmptyListName.into());
        }

        let mut list = self.load_authorized(caller, list_id).await?;
        if let Some(name) = name {
            list.set_name(name);
        }
        if let Some(list_type) = list_type {
            list.set_list_type(list_type);
        }

        let list = self.store.save(list).await?;
        debug!(list_id = %list_id, "updated list");
        Ok(list)
    }

    /// Deletes a list and all of its items.
    pub async fn delete_list(&self, caller: &UserId, list_id: &ListId) -> Result<()> {
        // Load first so a missing list and a denied caller are reported
        // distinctly instead of both reading as "nothing deleted".
        self.load_authorized(caller, list_id).await?;

        if !self.store.delete(list_id).await? {
            return Err(ServiceError::ListNotFound {
                list_id: list_id.clone(),
            }
            .into());
        }
        debug!(list_id = %list_id, "deleted list");
        Ok(())
    }

    /// Appends a new item at the tail of the list and returns the updated
    /// list.
    pub async fn add_item(
        &self,
        caller: &UserId,
        list_id: &ListId,
        content: impl Into<String>,
    ) -> Result<List> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ServiceError::EmptyItemContent.into());
        }

        let mut list = self.load_authorized(caller, list_id).await?;
        let order = ordering::append_index(&list);
        list.push_item(Item::new(content, order));

        let list = self.store.save(list).await?;
        debug!(list_id = %list_id, order, "appended item");
        Ok(list)
    }

    /// Replaces an item's content and returns the updated list.
    pub async fn edit_item(
        &self,
        caller: &UserId,
        list_id: &ListId,
        item_id: &ItemId,
        content: impl Into<String>,
    ) -> Result<List> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ServiceError::EmptyItemContent.into());
        }

        let mut list = self.load_authorized(caller, list_id).await?;
        match list.item_mut(item_id) {
            Some(item) => item.set_content(content),
            None => {
                return Err(ServiceError::ItemNotFound {
                    list_id: list_id.clone(),
                    item_id: item_id.clone(),
                }
                .into());
            }
        }

        let list = self.store.save(list).await?;
        debug!(list_id = %list_id, item_id = %item_id, "edited item");
        Ok(list)
    }

    /// Removes an item from the list and returns the updated list.
    ///
    /// What happens to the survivors' order values is governed by the
    /// service's [`DeletePolicy`].
    pub async fn delete_item(
        &self,
        caller: &UserId,
        list_id: &ListId,
        item_id: &ItemId,
    ) -> Result<List> {
        let mut list = self.load_authorized(caller, list_id).await?;
        if list.remove_item(item_id).is_none() {
            return Err(ServiceError::ItemNotFound {
                list_id: list_id.clone(),
                item_id: item_id.clone(),
            }
            .into());
        }
        self.delete_policy.compact(&mut list);

        let list = self.store.save(list).await?;
        debug!(list_id = %list_id, item_id = %item_id, "deleted item");
        Ok(list)
    }

    /// Reassigns every item's order value according to `proposed`, a
    /// permutation of the list's item ids, and returns the updated list.
    pub async fn reorder_items(
        &self,
        caller: &UserId,
        list_id: &ListId,
        proposed: &[ItemId],
    ) -> Result<List> {
        let mut list = self.load_authorized(caller, list_id).await?;
        let plan = ordering::validate_reorder(&list, proposed)?;
        plan.apply(&mut list);

        let list = self.store.save(list).await?;
        debug!(list_id = %list_id, "reordered items");
        Ok(list)
    }

    /// Loads a list and checks the caller may mutate it.
    async fn load_authorized(&self, caller: &UserId, list_id: &ListId) -> Result<List> {
        let list = self
            .store
            .find(list_id)
            .await?
            .ok_or_else(|| ServiceError::ListNotFound {
                list_id: list_id.clone(),
            })?;

        if !self.authorizer.authorize(caller, &list).await {
            return Err(ServiceError::PermissionDenied {
                user_id: caller.clone(),
                list_id: list_id.clone(),
            }
            .into());
        }
        Ok(list)
    }
}
