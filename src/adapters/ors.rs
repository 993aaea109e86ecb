use crate::domain::model::{Coordinate, TravelMode};
use crate::domain::ports::{ConfigProvider, RoutingProvider};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct IsochroneRequest {
    locations: Vec<[f64; 2]>,
    range: Vec<i64>,
    range_type: &'static str,
}

impl IsochroneRequest {
    fn new(origin: Coordinate, minutes: i64) -> Self {
        Self {
            locations: vec![[origin.lng, origin.lat]],
            range: vec![minutes.saturating_mul(60)],
            range_type: "time",
        }
    }
}

/// OpenRouteService 用戶端
#[derive(Debug, Clone)]
pub struct OrsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    directions_timeout: Option<Duration>,
}

impl OrsClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            directions_timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.routing_base_url(),
            config.routing_api_key().map(str::to_string),
        )
        .with_directions_timeout(config.directions_timeout())
    }

    pub fn with_directions_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.directions_timeout = timeout;
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", key),
            None => request,
        }
    }
}

#[async_trait]
impl RoutingProvider for OrsClient {
    async fn isochrone(&self, origin: Coordinate, minutes: i64, mode: TravelMode) -> Result<Value> {
        let url = format!("{}/v2/isochrones/{}", self.base_url, mode.profile_id());
        let body = IsochroneRequest::new(origin, minutes);

        tracing::debug!("Making isochrone request to: {}", url);
        let response = self.authorize(self.client.post(&url)).json(&body).send().await?;
        tracing::debug!("Isochrone response status: {}", response.status());

        if !response.status().is_success() {
            let detail = response.text().await?;
            tracing::warn!("❌ ORS rejected isochrone request: {}", detail);
            return Err(GatewayError::UpstreamRejection { detail });
        }

        Ok(response.json().await?)
    }

    async fn directions(&self, start: Coordinate, end: Coordinate, mode: TravelMode) -> Result<Value> {
        let url = format!("{}/v2/directions/{}", self.base_url, mode.profile_id());

        let mut request = self.authorize(self.client.get(&url)).query(&[
            ("start", start.to_string()),
            ("end", end.to_string()),
        ]);

        if let Some(timeout) = self.directions_timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making directions request to: {} ({} -> {})", url, start, end);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // 服務商錯誤內容只寫入日誌
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!("❌ ORS directions failed ({}): {}", status, detail);
            return Err(GatewayError::RouteCalculationFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
