//! Ordering engine specific errors.
//!
//! Every variant describes a way a proposed reorder sequence can fail to
//! be a permutation of the list's current item ids. Callers that only
//! care about the class can use the predicates instead of matching.

use thiserror::Error;

use crate::list::ItemId;

/// Errors raised when a proposed reorder is not a valid permutation of
/// the current item set.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The proposed sequence has a different length than the item set
    #[error("Reorder sequence has {actual} ids but the list has {expected} items")]
    LengthMismatch { expected: usize, actual: usize },

    /// An item id appears more than once in the proposed sequence
    #[error("Reorder sequence lists item '{item_id}' more than once")]
    DuplicateItem { item_id: ItemId },

    /// The proposed sequence names an id that is not in the list
    #[error("Reorder sequence names unknown item '{item_id}'")]
    UnknownItem { item_id: ItemId },
}

impl OrderingError {
    /// Check if this error is a sequence-length mismatch
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, OrderingError::LengthMismatch { .. })
    }

    /// Check if this error reports a duplicated item id
    pub fn is_duplicate_item(&self) -> bool {
        matches!(self, OrderingError::DuplicateItem { .. })
    }

    /// Check if this error reports an id foreign to the list
    pub fn is_unknown_item(&self) -> bool {
        matches!(self, OrderingError::UnknownItem { .. })
    }

    /// Get the offending item id if this error carries one
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            OrderingError::DuplicateItem { item_id } | OrderingError::UnknownItem { item_id } => {
                Some(item_id)
            }
            _ => None,
        }
    }
}

// Conversion from OrderingError to the main Error type
impl From<OrderingError> for crate::Error {
    fn from(err: OrderingError) -> Self {
        crate::Error::Ordering(err)
    }
}
