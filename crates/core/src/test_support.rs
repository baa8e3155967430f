use crate::traits::MemoryStore;
use crate::{ChunkMetadata, MemoryRecord, Message, StoreError};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct AddedMemory {
    pub messages: Vec<Message>,
    pub user_id: String,
    pub metadata: ChunkMetadata,
}

/// In-memory stand-in for the hosted store.
#[derive(Default)]
pub struct FakeStore {
    pub records: Vec<MemoryRecord>,
    pub fail_listing: bool,
    /// Zero-based `add` call numbers that should fail.
    pub failing_adds: HashSet<usize>,
    pub added: Mutex<Vec<AddedMemory>>,
    pub add_calls: Mutex<usize>,
}

impl FakeStore {
    pub fn with_sources(sources: &[Option<&str>]) -> Self {
        let records = sources
            .iter()
            .enumerate()
            .map(|(index, source)| MemoryRecord {
                id: Some(format!("m-{index}")),
                memory: Some(format!("memory {index}")),
                score: None,
                metadata: source.map(|name| json!({ "source": name })),
            })
            .collect();

        Self {
            records,
            ..Self::default()
        }
    }

    pub fn added(&self) -> Vec<AddedMemory> {
        self.added.lock().map(|added| added.clone()).unwrap_or_default()
    }

    fn backend_down() -> StoreError {
        StoreError::BackendResponse {
            backend: "fake".to_string(),
            status: 503,
            details: "unavailable".to_string(),
        }
    }
}

#[async_trait]
impl MemoryStore for FakeStore {
    async fn add(
        &self,
        messages: &[Message],
        user_id: &str,
        metadata: &ChunkMetadata,
    ) -> Result<(), StoreError> {
        let call = {
            let mut calls = self.add_calls.lock().expect("add counter lock");
            let call = *calls;
            *calls += 1;
            call
        };

        if self.failing_adds.contains(&call) {
            return Err(Self::backend_down());
        }

        self.added.lock().expect("added lock").push(AddedMemory {
            messages: messages.to_vec(),
            user_id: user_id.to_string(),
            metadata: metadata.clone(),
        });
        Ok(())
    }

    async fn get_all(&self, _user_id: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        if self.fail_listing {
            return Err(Self::backend_down());
        }
        Ok(self.records.clone())
    }

    async fn search(
        &self,
        _query: &str,
        _user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, StoreError> {
        if self.fail_listing {
            return Err(Self::backend_down());
        }
        Ok(self.records.iter().take(limit).cloned().collect())
    }
}
