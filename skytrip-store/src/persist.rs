use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::blob_store::BlobStore;
use crate::StoreError;

/// Writes selected top-level fields of a state object to a [`BlobStore`]
/// and merges them back over defaults on startup.
///
/// Only fields on the allow-list ever reach the store. With an empty list
/// the persisted blob is an empty object.
#[derive(Clone)]
pub struct StatePersistor {
    store: Arc<dyn BlobStore>,
    root_key: String,
    allow_list: BTreeSet<String>,
}

impl StatePersistor {
    pub fn new(store: Arc<dyn BlobStore>, root_key: impl Into<String>, allow_list: impl IntoIterator<Item = String>) -> Self {
        Self {
            store,
            root_key: root_key.into(),
            allow_list: allow_list.into_iter().collect(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("persist:{}", self.root_key)
    }

    pub fn is_allowed(&self, field: &str) -> bool {
        self.allow_list.contains(field)
    }

    pub async fn save<T: Serialize>(&self, state: &T) -> Result<(), StoreError> {
        let fields = self.allowed_fields(serde_json::to_value(state)?)?;
        debug!("Persisting fields {:?} under {}", fields.keys().collect::<Vec<_>>(), self.storage_key());
        let blob = serde_json::to_string(&Value::Object(fields))?;
        self.store.put(&self.storage_key(), &blob).await
    }

    /// Overlay whatever allowed fields were stored on top of `defaults`.
    pub async fn rehydrate<T: Serialize + DeserializeOwned>(&self, defaults: T) -> Result<T, StoreError> {
        let Some(blob) = self.store.get(&self.storage_key()).await? else {
            return Ok(defaults);
        };

        let stored = self.allowed_fields(serde_json::from_str(&blob)?)?;
        if stored.is_empty() {
            return Ok(defaults);
        }

        let mut merged = match serde_json::to_value(&defaults)? {
            Value::Object(map) => map,
            other => return Err(StoreError::NotAnObject(kind(&other))),
        };
        info!("Rehydrating fields {:?} from {}", stored.keys().collect::<Vec<_>>(), self.storage_key());
        merged.extend(stored);

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    pub async fn purge(&self) -> Result<(), StoreError> {
        info!("Purging persisted state under {}", self.storage_key());
        self.store.remove(&self.storage_key()).await
    }

    fn allowed_fields(&self, value: Value) -> Result<Map<String, Value>, StoreError> {
        match value {
            Value::Object(mut map) => {
                map.retain(|key, _| self.allow_list.contains(key));
                Ok(map)
            }
            other => Err(StoreError::NotAnObject(kind(&other))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob_store::MemoryBlobStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        travelers: u32,
        saved: Vec<String>,
    }

    fn persistor(store: Arc<MemoryBlobStore>, allow: &[&str]) -> StatePersistor {
        StatePersistor::new(store, "root", allow.iter().map(|s| s.to_string()))
    }

    #[tokio::test]
    async fn test_empty_allow_list_persists_nothing() {
        let store = Arc::new(MemoryBlobStore::new());
        let persistor = persistor(store.clone(), &[]);
        let state = Snapshot { travelers: 3, saved: vec!["x".to_string()] };

        persistor.save(&state).await.unwrap();
        assert_eq!(store.get("persist:root").await.unwrap().as_deref(), Some("{}"));

        let restored = persistor.rehydrate(Snapshot::default()).await.unwrap();
        assert_eq!(restored, Snapshot::default());
    }

    #[tokio::test]
    async fn test_allowed_fields_round_trip() {
        let store = Arc::new(MemoryBlobStore::new());
        let persistor = persistor(store.clone(), &["saved"]);
        let state = Snapshot { travelers: 3, saved: vec!["x".to_string()] };

        persistor.save(&state).await.unwrap();
        let restored = persistor.rehydrate(Snapshot::default()).await.unwrap();
        assert_eq!(restored.saved, vec!["x".to_string()]);
        assert_eq!(restored.travelers, 0);
    }

    #[tokio::test]
    async fn test_fields_dropped_from_allow_list_are_ignored() {
        let store = Arc::new(MemoryBlobStore::new());
        store.put("persist:root", r#"{"travelers":4,"saved":["y"]}"#).await.unwrap();

        let restored = persistor(store, &["travelers"]).rehydrate(Snapshot::default()).await.unwrap();
        assert_eq!(restored, Snapshot { travelers: 4, saved: vec![] });
    }

    #[tokio::test]
    async fn test_purge_removes_blob() {
        let store = Arc::new(MemoryBlobStore::new());
        let persistor = persistor(store.clone(), &["saved"]);
        persistor.save(&Snapshot::default()).await.unwrap();

        persistor.purge().await.unwrap();
        assert_eq!(store.get("persist:root").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_object_state_is_rejected() {
        let store = Arc::new(MemoryBlobStore::new());
        let err = persistor(store, &[]).save(&vec![1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject("array")));
    }
}
