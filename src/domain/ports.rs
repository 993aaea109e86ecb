use crate::domain::model::{Coordinate, TravelMode};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn routing_base_url(&self) -> &str;
    fn routing_api_key(&self) -> Option<&str>;
    fn feature_endpoint(&self) -> &str;
    fn feature_timeout(&self) -> Duration;
    fn directions_timeout(&self) -> Option<Duration>;
    fn bulk_concurrency(&self) -> Option<usize>;
}

/// 路徑服務商（等時圈與路線）
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn isochrone(&self, origin: Coordinate, minutes: i64, mode: TravelMode) -> Result<Value>;
    async fn directions(&self, start: Coordinate, end: Coordinate, mode: TravelMode)
        -> Result<Value>;
}

/// 地圖要素查詢服務商
#[async_trait]
pub trait FeatureProvider: Send + Sync {
    async fn query(&self, query: &str) -> Result<Value>;
}
