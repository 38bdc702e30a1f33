pub mod app_config;
pub mod blob_store;
pub mod persist;

pub use blob_store::{BlobStore, MemoryBlobStore, RedisBlobStore};
pub use persist::StatePersistor;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persisted state must serialize to an object, got {0}")]
    NotAnObject(&'static str),
}
