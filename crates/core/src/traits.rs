use crate::{ChunkMetadata, MemoryRecord, Message, StoreError};
use async_trait::async_trait;

/// Remote memory store the loader writes to and the inspector reads from.
#[async_trait]
pub trait MemoryStore {
    async fn add(
        &self,
        messages: &[Message],
        user_id: &str,
        metadata: &ChunkMetadata,
    ) -> Result<(), StoreError>;

    async fn get_all(&self, user_id: &str) -> Result<Vec<MemoryRecord>, StoreError>;

    async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, StoreError>;
}
