//! Generative AI provider abstraction.
//!
//! The handler only needs one capability: send an ordered list of content
//! parts and get the provider's JSON answer back. Gemini is the production
//! backend; the mock records calls for tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The upstream status is reported for diagnostics only; callers of the
    /// look endpoint always see a 500.
    #[error("Gemini API responded with status {status}")]
    Upstream { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One segment of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Raw encoded bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A backend able to answer a single-turn content generation request.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Send `parts` as one user turn and return the provider's JSON body as-is.
    async fn generate_content(
        &self,
        api_key: &SecretString,
        parts: Vec<ContentPart>,
    ) -> Result<serde_json::Value, ProviderError>;
}
