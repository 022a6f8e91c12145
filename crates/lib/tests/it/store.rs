//! ListStore trait and InMemory backend tests
//!
//! Covers id assignment on save, whole-aggregate round-trips, owner
//! queries, deletion, and JSON snapshot persistence.

use doable::{
    List, ListId, UserId,
    store::{InMemory, ListStore},
};

use super::helpers::*;

fn unsaved_list(name: &str) -> List {
    List::new(owner(), name, None)
}

#[tokio::test]
async fn test_save_assigns_ids_once() {
    let store = InMemory::new();

    let saved = store
        .save(unsaved_list("Groceries"))
        .await
        .expect("Failed to save list");
    assert!(!saved.id().is_empty(), "First save should assign an id");

    // Saving again preserves the assigned id.
    let resaved = store.save(saved.clone()).await.expect("Failed to resave");
    assert_eq!(resaved.id(), saved.id());
    assert_eq!(store.all_ids().await.len(), 1);
}

#[tokio::test]
async fn test_save_assigns_item_ids() {
    // Items enter a list without ids; the store fills them in when the
    // aggregate is saved, and keeps them stable afterwards.
    let service = test_service();
    let list = seed_list(&service, "Groceries", &["milk", "eggs"]).await;

    let ids = list.item_ids();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| !id.is_empty()));

    let resaved = service
        .store()
        .save(list.clone())
        .await
        .expect("Failed to resave");
    assert_eq!(resaved.item_ids(), ids, "Assigned item ids must be stable");
}

#[tokio::test]
async fn test_find_round_trips_deep_equal() {
    let service = test_service();
    let list = seed_list(&service, "Groceries", &["milk", "eggs", "bread"]).await;

    let fetched = service
        .store()
        .find(list.id())
        .await
        .expect("Failed to find list")
        .expect("List missing after save");
    assert_eq!(fetched, list);

    // Unknown ids are absence, not an error.
    let missing = service
        .store()
        .find(&ListId::from("no-such-list"))
        .await
        .expect("Find errored on unknown id");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_by_owner_filters() {
    let store = InMemory::new();
    let other = UserId::from("user-2");

    store
        .save(unsaved_list("Groceries"))
        .await
        .expect("Failed to save list");
    store
        .save(unsaved_list("Chores"))
        .await
        .expect("Failed to save list");
    store
        .save(List::new(other.clone(), "Reading", None))
        .await
        .expect("Failed to save list");

    let mine = store
        .find_by_owner(&owner())
        .await
        .expect("Failed to query by owner");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|list| list.owner_id() == &owner()));

    let none = store
        .find_by_owner(&UserId::from("user-3"))
        .await
        .expect("Failed to query by owner");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_delete_reports_existence() {
    let store = InMemory::new();
    let saved = store
        .save(unsaved_list("Groceries"))
        .await
        .expect("Failed to save list");

    assert!(store.delete(saved.id()).await.expect("Delete errored"));
    assert!(!store.delete(saved.id()).await.expect("Delete errored"));
    assert!(
        !store
            .delete(&ListId::from("no-such-list"))
            .await
            .expect("Delete errored")
    );
}

#[tokio::test]
async fn test_snapshot_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("doable.json");

    let service = test_service();
    let list = seed_list(&service, "Groceries", &["milk", "eggs", "bread"]).await;

    let store = service
        .store()
        .as_any()
        .downcast_ref::<InMemory>()
        .expect("Test service uses the InMemory store");
    store
        .save_to_file(&path)
        .await
        .expect("Failed to save snapshot");

    let reloaded = InMemory::load_from_file(&path)
        .await
        .expect("Failed to load snapshot");
    let fetched = reloaded
        .find(list.id())
        .await
        .expect("Failed to find list")
        .expect("List missing after reload");
    assert_eq!(fetched, list);
}

#[tokio::test]
async fn test_snapshot_missing_file_loads_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = InMemory::load_from_file(dir.path().join("absent.json"))
        .await
        .expect("Missing file should load as empty store");
    assert!(store.all_ids().await.is_empty());
}

#[tokio::test]
async fn test_snapshot_rejects_corrupt_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("doable.json");
    tokio::fs::write(&path, "not json at all")
        .await
        .expect("Failed to write file");

    let err = InMemory::load_from_file(&path)
        .await
        .expect_err("Corrupt snapshot loaded");
    assert!(err.is_storage_error());
}

#[tokio::test]
async fn test_snapshot_rejects_unknown_version() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("doable.json");
    tokio::fs::write(&path, r#"{"_v": 99, "lists": {}}"#)
        .await
        .expect("Failed to write file");

    let err = InMemory::load_from_file(&path)
        .await
        .expect_err("Future-versioned snapshot loaded");
    assert!(err.is_storage_error());
}
