use crate::traits::MemoryStore;
use crate::{ChunkMetadata, MemoryRecord, Message, StoreError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use url::Url;

pub const DEFAULT_MEM0_BASE_URL: &str = "https://api.mem0.ai";

const BACKEND: &str = "mem0";

/// Client for the hosted Mem0 platform REST API.
pub struct Mem0Client {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl Mem0Client {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, StoreError> {
        let api_key: String = api_key.into();
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(StoreError::InvalidConfig("api key is empty".to_string()));
        }

        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(&base)?,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Token {}", self.api_key))
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let details = response.text().await.unwrap_or_default();
        Err(StoreError::BackendResponse {
            backend: BACKEND.to_string(),
            status: status.as_u16(),
            details,
        })
    }
}

#[async_trait]
impl MemoryStore for Mem0Client {
    async fn add(
        &self,
        messages: &[Message],
        user_id: &str,
        metadata: &ChunkMetadata,
    ) -> Result<(), StoreError> {
        let url = self.endpoint("v1/memories/")?;
        let response = self
            .authorized(self.client.post(url))
            .json(&json!({
                "messages": messages,
                "user_id": user_id,
                "metadata": metadata,
            }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn get_all(&self, user_id: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        let mut url = self.endpoint("v1/memories/")?;
        url.query_pairs_mut().append_pair("user_id", user_id);

        let response = self.authorized(self.client.get(url)).send().await?;
        let parsed: Value = Self::check(response).await?.json().await?;
        parse_records(parsed)
    }

    async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, StoreError> {
        let url = self.endpoint("v1/memories/search/")?;
        let response = self
            .authorized(self.client.post(url))
            .json(&json!({
                "query": query,
                "user_id": user_id,
                "limit": limit,
            }))
            .send()
            .await?;

        let parsed: Value = Self::check(response).await?.json().await?;
        parse_records(parsed)
    }
}

/// Accepts either a bare array of records or an object wrapping them in `results`.
fn parse_records(payload: Value) -> Result<Vec<MemoryRecord>, StoreError> {
    let listed = match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(StoreError::BackendResponse {
                    backend: BACKEND.to_string(),
                    status: 200,
                    details: "response object has no `results` array".to_string(),
                })
            }
        },
        other => {
            return Err(StoreError::BackendResponse {
                backend: BACKEND.to_string(),
                status: 200,
                details: format!("unexpected response payload: {other}"),
            })
        }
    };

    listed
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(StoreError::from))
        .collect()
}
