//! Gemini provider implementation.
//!
//! Calls `generateContent` once per request and hands back the response
//! body without interpreting it.

use super::{ContentPart, ContentProvider, ProviderError};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model: String,
}

impl From<&GeminiSettings> for GeminiConfig {
    fn from(settings: &GeminiSettings) -> Self {
        Self {
            api_base: settings.api_base.clone(),
            model: settings.model.clone(),
        }
    }
}

/// Gemini content provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        // No client timeout: the hosting platform bounds each invocation.
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given method. The key goes in as a query
    /// parameter separately so it never lands in log lines built from this.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method
        )
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn generate_content(
        &self,
        api_key: &SecretString,
        parts: Vec<ContentPart>,
    ) -> Result<serde_json::Value, ProviderError> {
        let part_count = parts.len();
        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            part_count,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose_secret().as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            match response.text().await {
                Ok(error_text) => tracing::error!(
                    status = status.as_u16(),
                    body = %error_text,
                    "Gemini API error"
                ),
                Err(e) => tracing::error!(
                    status = status.as_u16(),
                    read_error = %e.without_url(),
                    "Gemini API error, response body unreadable"
                ),
            }
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.without_url().to_string()))
    }
}

// ============================================================================
// Gemini API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<ContentPart>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-test";

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new(GeminiConfig {
            api_base: format!("{}/v1beta", server.uri()),
            model: MODEL.to_string(),
        })
        .unwrap()
    }

    fn key() -> SecretString {
        SecretString::new("test-key".to_string())
    }

    #[tokio::test]
    async fn posts_contents_and_returns_body_unchanged() {
        let server = MockServer::start().await;
        let upstream = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Kort fade." }] } }],
            "usageMetadata": { "totalTokenCount": 12 }
        });

        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "contents": [{ "parts": [
                    { "text": "hej" },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } }
                ] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let body = provider(&server)
            .generate_content(
                &key(),
                vec![
                    ContentPart::text("hej"),
                    ContentPart::inline_data("image/jpeg", "QUJD"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(body, upstream);
    }

    #[tokio::test]
    async fn non_success_status_becomes_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate_content(&key(), vec![ContentPart::text("hej")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Upstream { status: 503 }));
        assert_eq!(err.to_string(), "Gemini API responded with status 503");
    }

    #[tokio::test]
    async fn non_json_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate_content(&key(), vec![ContentPart::text("hej")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = GeminiProvider::new(GeminiConfig {
            api_base: "http://127.0.0.1:1/v1beta".to_string(),
            model: MODEL.to_string(),
        })
        .unwrap();

        let err = provider
            .generate_content(&key(), vec![ContentPart::text("hej")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Network(_)));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn truncated_error_body_still_reports_upstream_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        // Promises more body than it sends, so reading the error text fails.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 100\r\n\r\npartial",
                )
                .await;
        });

        let provider = GeminiProvider::new(GeminiConfig {
            api_base: format!("http://{}/v1beta", addr),
            model: MODEL.to_string(),
        })
        .unwrap();

        let err = provider
            .generate_content(&key(), vec![ContentPart::text("hej")])
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Upstream { status: 503 }));
    }
}
