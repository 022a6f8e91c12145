//! List service specific errors.
//!
//! These cover the caller-visible failure modes of the public operations:
//! missing lists or items, denied mutations, and rejected inputs. Reorder
//! shape failures are raised by the ordering engine, not here.

use thiserror::Error;

use crate::list::{ItemId, ListId, UserId};

/// Errors that can occur during list service operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No list exists with the given id
    #[error("List not found: {list_id}")]
    ListNotFound { list_id: ListId },

    /// The list exists but does not contain the given item
    #[error("Item {item_id} not found in list {list_id}")]
    ItemNotFound { list_id: ListId, item_id: ItemId },

    /// The caller is not allowed to mutate the target list
    #[error("User {user_id} is not allowed to modify list {list_id}")]
    PermissionDenied { user_id: UserId, list_id: ListId },

    /// A list needs a non-empty display name
    #[error("List name must not be empty")]
    EmptyListName,

    /// An item needs non-empty content
    #[error("Item content must not be empty")]
    EmptyItemContent,
}

impl ServiceError {
    /// Check if this error indicates a resource was not found
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::ListNotFound { .. } | ServiceError::ItemNotFound { .. }
        )
    }

    /// Check if this error indicates a denied mutation
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ServiceError::PermissionDenied { .. })
    }

    /// Check if this error is an input validation failure
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ServiceError::EmptyListName | ServiceError::EmptyItemContent
        )
    }

    /// Get the list id this error is about
    pub fn list_id(&self) -> Option<&ListId> {
        match self {
            ServiceError::ListNotFound { list_id }
            | ServiceError::ItemNotFound { list_id, .. }
            | ServiceError::PermissionDenied { list_id, .. } => Some(list_id),
            _ => None,
        }
    }

    /// Get the item id if this error is about a specific item
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            ServiceError::ItemNotFound { item_id, .. } => Some(item_id),
            _ => None,
        }
    }
}

// Conversion from ServiceError to the main Error type
impl From<ServiceError> for crate::Error {
    fn from(err: ServiceError) -> Self {
        crate::Error::Service(err)
    }
}
