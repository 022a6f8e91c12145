//! Shared test factories and assertions for the integration suite.

use std::sync::Arc;

use doable::{
    ItemId, List, ListService, UserId,
    ordering::DeletePolicy,
    store::{InMemory, ListStore},
};

/// Creates a service over a fresh in-memory store with default policy.
pub fn test_service() -> ListService {
    ListService::new(Arc::new(InMemory::new()) as Arc<dyn ListStore>)
}

/// Creates a service over a fresh in-memory store with the given delete
/// policy.
pub fn test_service_with_policy(policy: DeletePolicy) -> ListService {
    test_service().with_delete_policy(policy)
}

/// The default test caller/owner identity.
pub fn owner() -> UserId {
    UserId::from("user-1")
}

/// Creates a list for `owner()` and appends one item per entry in
/// `contents`, returning the final list state.
pub async fn seed_list(service: &ListService, name: &str, contents: &[&str]) -> List {
    let caller = owner();
    let mut list = service
        .create_list(&caller, name, None)
        .await
        .expect("Failed to create list");

    for content in contents {
        list = service
            .add_item(&caller, list.id(), *content)
            .await
            .expect("Failed to add item");
    }
    list
}

/// Looks up the id of the item with the given content, panicking if it is
/// not present exactly once.
pub fn item_id_by_content(list: &List, content: &str) -> ItemId {
    let mut matches = list.items().iter().filter(|item| item.content() == content);
    let found = matches.next().expect("No item with the given content");
    assert!(
        matches.next().is_none(),
        "Multiple items with content '{content}'"
    );
    found.id().clone()
}

/// Asserts the list's order values are exactly `0..n`.
pub fn assert_dense_orders(list: &List) {
    let orders = list.order_values();
    let expected: Vec<usize> = (0..list.len()).collect();
    assert_eq!(
        orders, expected,
        "Order values are not a dense 0..n assignment"
    );
}
