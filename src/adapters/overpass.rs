use crate::domain::ports::{ConfigProvider, FeatureProvider};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Overpass API 用戶端，每次查詢都有逾時上限
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.feature_endpoint(), config.feature_timeout())
    }
}

#[async_trait]
impl FeatureProvider for OverpassClient {
    async fn query(&self, query: &str) -> Result<Value> {
        tracing::debug!("Making Overpass request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(timeout_aware)?;

        let status = response.status();
        tracing::debug!("Overpass response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("❌ Overpass returned {}: {}", status, message);
            return Err(GatewayError::UpstreamError {
                status: status.as_u16(),
                message: excerpt(&message),
            });
        }

        response.json().await.map_err(timeout_aware)
    }
}

fn timeout_aware(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        tracing::error!("⏱️ Overpass API timed out!");
        GatewayError::UpstreamTimeout
    } else {
        GatewayError::ApiError(e)
    }
}

// Overpass 錯誤頁是整份 HTML，只留前段
fn excerpt(message: &str) -> String {
    const LIMIT: usize = 200;
    match message.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}…", &message[..idx]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_query_is_form_encoded() {
        let server = MockServer::start();
        let elements = json!({"elements": [{"type": "node", "id": 42, "tags": {"shop": "convenience"}}]});

        let overpass_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/interpreter")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body("data=%5Bout%3Ajson%5D%3Bout+body%3B");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(elements.clone());
        });

        let client = OverpassClient::new(server.url("/api/interpreter"), DEFAULT_TIMEOUT);
        let result = client.query("[out:json];out body;").await.unwrap();

        overpass_mock.assert();
        assert_eq!(result, elements);
    }

    #[tokio::test]
    async fn test_slow_provider_maps_to_timeout() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/api/interpreter");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"elements": []}));
        });

        let client = OverpassClient::new(server.url("/api/interpreter"), Duration::from_millis(300));
        let err = client.query("[out:json];").await.unwrap_err();

        assert!(matches!(err, GatewayError::UpstreamTimeout));
        assert_eq!(err.user_friendly_message(), "Area too large, Overpass timed out");
    }

    #[tokio::test]
    async fn test_error_status_is_distinct_from_timeout() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/api/interpreter");
            then.status(429).body("rate_limited");
        });

        let client = OverpassClient::new(server.url("/api/interpreter"), DEFAULT_TIMEOUT);
        let err = client.query("[out:json];").await.unwrap_err();

        match err {
            GatewayError::UpstreamError { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate_limited");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_excerpt_truncates_long_messages() {
        let long = "x".repeat(500);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), 201);
        assert_eq!(excerpt("short"), "short");
    }
}
