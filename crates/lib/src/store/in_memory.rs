//! In-memory list store implementation.
//!
//! This module provides an in-memory implementation of the [`ListStore`]
//! trait, suitable for testing, development, or deployments where the
//! whole data set fits in memory and durability is handled by snapshot
//! files.

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::StoreError;
use crate::list::{ItemId, List, ListId, UserId};
use crate::store::ListStore;
use crate::{Error, Result};

/// The current snapshot file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const SNAPSHOT_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the snapshot version during deserialization.
fn validate_snapshot_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != SNAPSHOT_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported snapshot version {version}; only version {SNAPSHOT_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable form of the store for snapshot files.
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_snapshot_version"
    )]
    version: u8,
    lists: HashMap<ListId, List>,
}

/// A simple in-memory list store using a `HashMap` behind a read-write
/// lock.
///
/// Each trait call takes the lock once, so individual finds, saves, and
/// deletes are atomic with respect to each other; there is no cross-call
/// transaction, matching the read-modify-write contract of the service.
///
/// Basic durability is available via [`save_to_file`](InMemory::save_to_file)
/// and [`load_from_file`](InMemory::load_from_file), which serialize the
/// full map to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    lists: RwLock<HashMap<ListId, List>>,
}

impl InMemory {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the ids of all stored lists, in unspecified order.
    pub async fn all_ids(&self) -> Vec<ListId> {
        let lists = self.lists.read().await;
        lists.keys().cloned().collect()
    }

    /// Saves the entire store state to a file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the snapshot should be saved.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let lists = self.lists.read().await.clone();
        let serializable = SerializableStore {
            version: SNAPSHOT_VERSION,
            lists,
        };

        let json = serde_json::to_string_pretty(&serializable)
            .map_err(|e| -> Error { StoreError::SerializationFailed { source: e }.into() })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| -> Error { StoreError::FileIo { source: e }.into() })
    }

    /// Loads a store from a JSON snapshot file.
    ///
    /// If the file does not exist, a new, empty store is returned.
    ///
    /// # Arguments
    /// * `path` - The path to the file from which to load the snapshot.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => {
                let snapshot: SerializableStore = serde_json::from_str(&json)
                    .map_err(|e| -> Error { StoreError::DeserializationFailed { source: e }.into() })?;
                Ok(Self {
                    lists: RwLock::new(snapshot.lists),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(StoreError::FileIo { source: e }.into()),
        }
    }
}

#[async_trait]
impl ListStore for InMemory {
    async fn find(&self, list_id: &ListId) -> Result<Option<List>> {
        let lists = self.lists.read().await;
        Ok(lists.get(list_id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<List>> {
        let lists = self.lists.read().await;
        Ok(lists
            .values()
            .filter(|list| list.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn save(&self, mut list: List) -> Result<List> {
        if list.id().is_empty() {
            list.set_id(ListId::from(Uuid::new_v4().to_string()));
        }
        for item in list.items_mut() {
            if item.id().is_empty() {
                item.set_id(ItemId::from(Uuid::new_v4().to_string()));
            }
        }

        let mut lists = self.lists.write().await;
        lists.insert(list.id().clone(), list.clone());
        Ok(list)
    }

    async fn delete(&self, list_id: &ListId) -> Result<bool> {
        let mut lists = self.lists.write().await;
        Ok(lists.remove(list_id).is_some())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
