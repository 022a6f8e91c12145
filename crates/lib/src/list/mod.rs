//! The list/item data model.
//!
//! A [`List`] is the aggregate root: a named, typed collection of ordered
//! [`Item`]s owned by a single user. Items are exclusively owned by their
//! list and carry a zero-based `order` index. The whole aggregate is read
//! and written as one unit by the store.

mod id;
pub use id::{ItemId, ListId, UserId};

use serde::{Deserialize, Serialize};

/// Category label applied to lists created without an explicit type.
pub const DEFAULT_LIST_TYPE: &str = "Miscellaneous";

/// A single content entry within a [`List`].
///
/// The `order` value is the item's zero-based position in the list's
/// user-controlled sequence. At append time and after every reorder the
/// order values of a list form exactly `0..n`; depending on the configured
/// [`DeletePolicy`](crate::ordering::DeletePolicy) a delete may leave gaps
/// until the next reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    content: String,
    order: usize,
}

impl Item {
    /// Creates a new item with an unassigned id.
    ///
    /// The store assigns the id when the owning list is saved.
    pub fn new(content: impl Into<String>, order: usize) -> Self {
        Self {
            id: ItemId::default(),
            content: content.into(),
            order,
        }
    }

    /// The item's identifier. Empty until the owning list has been saved.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// The item's text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The item's zero-based position in the list sequence.
    pub fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// A named, typed, ordered collection of [`Item`]s owned by one user.
///
/// `List` is the unit of persistence: every mutation loads the full
/// aggregate from the store, changes it, and writes it back whole, so no
/// partial update is ever observable by other callers. Two concurrent
/// mutations of the same list race with last-write-wins semantics; the
/// store boundary is where an optimistic version check would slot in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    id: ListId,
    owner_id: UserId,
    name: String,
    #[serde(rename = "type", default = "default_list_type")]
    list_type: String,
    #[serde(default)]
    items: Vec<Item>,
}

fn default_list_type() -> String {
    DEFAULT_LIST_TYPE.to_string()
}

impl List {
    /// Creates a new, empty list with an unassigned id.
    ///
    /// When `list_type` is `None` the list is filed under
    /// [`DEFAULT_LIST_TYPE`].
    pub fn new(
        owner_id: impl Into<UserId>,
        name: impl Into<String>,
        list_type: Option<String>,
    ) -> Self {
        Self {
            id: ListId::default(),
            owner_id: owner_id.into(),
            name: name.into(),
            list_type: list_type.unwrap_or_else(default_list_type),
            items: Vec::new(),
        }
    }

    /// The list's identifier. Empty until the list has been saved.
    pub fn id(&self) -> &ListId {
        &self.id
    }

    /// The id of the user who owns this list. Immutable after creation.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// The list's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The list's free-text category label.
    pub fn list_type(&self) -> &str {
        &self.list_type
    }

    /// The items in storage order (insertion order, not `order` order).
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items sorted by their `order` value.
    pub fn items_in_order(&self) -> Vec<&Item> {
        let mut sorted: Vec<&Item> = self.items.iter().collect();
        sorted.sort_by_key(|item| item.order());
        sorted
    }

    /// Looks up an item by id.
    pub fn item(&self, item_id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    /// Returns true if the list contains an item with the given id.
    pub fn contains_item(&self, item_id: &ItemId) -> bool {
        self.item(item_id).is_some()
    }

    /// The ids of all items, in storage order.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    /// The multiset of order values currently assigned to items.
    pub fn order_values(&self) -> Vec<usize> {
        let mut orders: Vec<usize> = self.items.iter().map(Item::order).collect();
        orders.sort_unstable();
        orders
    }

    pub(crate) fn set_id(&mut self, id: ListId) {
        self.id = id;
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_list_type(&mut self, list_type: impl Into<String>) {
        self.list_type = list_type.into();
    }

    pub(crate) fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn item_mut(&mut self, item_id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == item_id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Removes the item with the given id, returning it if present.
    pub(crate) fn remove_item(&mut self, item_id: &ItemId) -> Option<Item> {
        let position = self.items.iter().position(|item| item.id() == item_id)?;
        Some(self.items.remove(position))
    }
}
