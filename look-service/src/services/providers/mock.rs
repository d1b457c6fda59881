//! Mock provider implementation for testing.

use super::{ContentPart, ContentProvider, ProviderError};
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Mutex;

/// In-memory provider that records every call and replays a canned outcome.
pub struct MockContentProvider {
    outcome: Result<serde_json::Value, u16>,
    calls: Mutex<Vec<Vec<ContentPart>>>,
}

impl MockContentProvider {
    /// Answers every call with `body`.
    pub fn responding(body: serde_json::Value) -> Self {
        Self {
            outcome: Ok(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call as if the upstream returned `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            outcome: Err(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Parts received so far, one entry per call.
    pub fn calls(&self) -> Vec<Vec<ContentPart>> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    async fn generate_content(
        &self,
        _api_key: &SecretString,
        parts: Vec<ContentPart>,
    ) -> Result<serde_json::Value, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(parts);
        }

        match &self.outcome {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(ProviderError::Upstream { status: *status }),
        }
    }
}
