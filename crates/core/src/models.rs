use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::path::PathBuf;

use crate::chunking::DEFAULT_CHUNK_SIZE;

pub const DEFAULT_NAMESPACE: &str = "mem0info";
pub const DEFAULT_KNOWLEDGE_DIR: &str = "knowledge";
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A single chat-style message sent to the memory store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Metadata attached to every uploaded chunk.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub source: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub file_type: String,
    pub project: String,
    pub checksum: Option<String>,
}

/// A record as returned by the store's list and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MemoryRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl MemoryRecord {
    pub fn source(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get("source"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub knowledge_dir: PathBuf,
    pub user_id: String,
    pub project: String,
    pub file_type: String,
    pub chunk_size: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            knowledge_dir: PathBuf::from(DEFAULT_KNOWLEDGE_DIR),
            user_id: DEFAULT_NAMESPACE.to_string(),
            project: DEFAULT_NAMESPACE.to_string(),
            file_type: "pdf".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Files with at least one chunk stored.
    pub processed: usize,
    /// Files whose name was already present in the store.
    pub skipped: usize,
    /// Files whose extracted text was blank.
    pub empty: usize,
    /// Files where every chunk upload failed.
    pub failed: usize,
    pub chunks_uploaded: usize,
    pub chunks_failed: usize,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    MissingDirectory(PathBuf),
    NoPdfFiles(PathBuf),
    Completed(LoadReport),
}
