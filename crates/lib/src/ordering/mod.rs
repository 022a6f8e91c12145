//! The ordering engine.
//!
//! Pure logic for assigning and validating item order indices. Nothing in
//! this module touches the store: the service loads a [`List`], asks this
//! module to compute or validate an ordering, and persists the result.
//!
//! New items are always appended at the tail ([`append_index`]). A reorder
//! replaces every order value at once: the caller submits the full item id
//! sequence, [`validate_reorder`] checks it is a permutation of the current
//! id set, and the resulting [`ReorderPlan`] assigns each item the position
//! of its id in the sequence. Deletes never reorder anything themselves;
//! what happens to the survivors' order values is an explicit
//! [`DeletePolicy`] decision.

mod errors;
pub use errors::OrderingError;

use std::collections::{HashMap, HashSet};

use crate::Result;
use crate::list::{ItemId, List};

/// Returns the order index for an item appended to `list`.
///
/// Order values are zero-based and contiguous at append time, so the next
/// trailing index is simply the current item count. Note that after a
/// delete under [`DeletePolicy::PreserveGaps`] this can collide with a
/// surviving order value; see [`DeletePolicy`] for why renumbering is the
/// default.
pub fn append_index(list: &List) -> usize {
    list.len()
}

/// Validates a proposed reorder sequence against the list's current items.
///
/// The sequence must be a permutation of the current item id set: same
/// length, no duplicates, no foreign ids. On success the returned
/// [`ReorderPlan`] maps each item id to its position in the sequence.
///
/// The check is a pure comparison of the two id sets, so it can be tested
/// without any store behind it.
pub fn validate_reorder(list: &List, proposed: &[ItemId]) -> Result<ReorderPlan> {
    if proposed.len() != list.len() {
        return Err(OrderingError::LengthMismatch {
            expected: list.len(),
            actual: proposed.len(),
        }
        .into());
    }

    let current: HashSet<&ItemId> = list.items().iter().map(|item| item.id()).collect();

    let mut positions = HashMap::with_capacity(proposed.len());
    for (index, item_id) in proposed.iter().enumerate() {
        if !current.contains(item_id) {
            return Err(OrderingError::UnknownItem {
                item_id: item_id.clone(),
            }
            .into());
        }
        if positions.insert(item_id.clone(), index).is_some() {
            return Err(OrderingError::DuplicateItem {
                item_id: item_id.clone(),
            }
            .into());
        }
    }

    // Equal length and no duplicates/unknowns means every current id is
    // covered, so the mapping is a full permutation.
    Ok(ReorderPlan { positions })
}

/// A validated `item id -> order index` assignment produced by
/// [`validate_reorder`].
///
/// Applying the plan assigns order values that are exactly `0..n`,
/// matching the positions of the submitted sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    positions: HashMap<ItemId, usize>,
}

impl ReorderPlan {
    /// The order index the plan assigns to `item_id`, if it is in the plan.
    pub fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.positions.get(item_id).copied()
    }

    /// Number of items covered by the plan.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the plan covers no items.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Assigns every item in `list` the order index the plan maps it to.
    ///
    /// The plan was validated against this list's id set, so every item
    /// receives a new value and the result is a dense `0..n` assignment.
    pub fn apply(&self, list: &mut List) {
        for item in list.items_mut() {
            if let Some(index) = self.positions.get(item.id()).copied() {
                item.set_order(index);
            }
        }
    }
}

/// What happens to surviving items' order values after a delete.
///
/// Deleting an item removes it from the sequence but does not, by itself,
/// touch any other item. Under [`PreserveGaps`](DeletePolicy::PreserveGaps)
/// the survivors keep their old values, leaving a gap until the next
/// reorder; a subsequent append then uses `len(items)` as the new tail
/// index, which can collide with a surviving value. Under
/// [`RenumberSurvivors`](DeletePolicy::RenumberSurvivors) (the default)
/// the survivors are immediately renumbered in sequence order, so the
/// dense `0..n` invariant holds at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Renumber survivors to `0..n` in their current sequence order.
    #[default]
    RenumberSurvivors,
    /// Leave survivors' order values untouched, tolerating gaps.
    PreserveGaps,
}

impl DeletePolicy {
    /// Applies the policy to a list that just lost an item.
    pub fn compact(&self, list: &mut List) {
        match self {
            DeletePolicy::RenumberSurvivors => {
                let ids_in_order: Vec<ItemId> = list
                    .items_in_order()
                    .into_iter()
                    .map(|item| item.id().clone())
                    .collect();
                for (index, item_id) in ids_in_order.into_iter().enumerate() {
                    if let Some(item) = list.item_mut(&item_id) {
                        item.set_order(index);
                    }
                }
            }
            DeletePolicy::PreserveGaps => {}
        }
    }
}
