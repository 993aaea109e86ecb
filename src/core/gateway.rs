use crate::core::mapper::search_radius;
use crate::core::query::{build_overpass_query, ANALYSIS_FILTERS, POI_FILTERS};
use crate::domain::model::{parse_targets, BulkResult, Coordinate, SpeedTable, TravelMode};
use crate::domain::ports::{FeatureProvider, RoutingProvider};
use crate::utils::error::Result;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub iso: Value,
    pub pois: Value,
}

/// 聚合路徑服務與要素查詢服務的閘道
pub struct Gateway<R: RoutingProvider, F: FeatureProvider> {
    routing: R,
    features: F,
    bulk_concurrency: Option<usize>,
}

impl<R: RoutingProvider, F: FeatureProvider> Gateway<R, F> {
    pub fn new(routing: R, features: F) -> Self {
        Self {
            routing,
            features,
            bulk_concurrency: None,
        }
    }

    /// Caps the number of in-flight bulk legs. `None` launches every leg at once.
    pub fn with_bulk_concurrency(mut self, limit: Option<usize>) -> Self {
        self.bulk_concurrency = limit.filter(|n| *n > 0);
        self
    }

    pub async fn isochrone(&self, origin: Coordinate, minutes: i64, mode: TravelMode) -> Result<Value> {
        tracing::debug!(
            "Isochrone request: origin={} minutes={} profile={}",
            origin,
            minutes,
            mode.profile_id()
        );
        self.routing.isochrone(origin, minutes, mode).await
    }

    pub async fn pois(&self, center: Coordinate, minutes: i64, mode: TravelMode) -> Result<Value> {
        let radius = search_radius(minutes, mode, SpeedTable::Poi);
        tracing::debug!("POI request: center={} radius={}m", center, radius);

        let query = build_overpass_query(POI_FILTERS, radius, center);
        self.features.query(&query).await
    }

    pub async fn directions(&self, start: Coordinate, end: Coordinate, mode: TravelMode) -> Result<Value> {
        tracing::debug!(
            "Directions request: {} -> {} profile={}",
            start,
            end,
            mode.profile_id()
        );
        self.routing.directions(start, end, mode).await
    }

    /// 對每個目標平行計算路線，失敗的目標直接略過
    pub async fn bulk_directions(&self, start: Coordinate, targets: &str, mode: TravelMode) -> BulkResult {
        let targets = parse_targets(targets);
        let total = targets.len();

        let legs = targets.into_iter().map(move |target| async move {
            let outcome = self.routing.directions(start, target.coordinate, mode).await;
            (target.key, outcome)
        });

        let outcomes: Vec<_> = match self.bulk_concurrency {
            Some(limit) => stream::iter(legs).buffer_unordered(limit).collect().await,
            None => join_all(legs).await,
        };

        let mut result = BulkResult::new();
        for (key, outcome) in outcomes {
            match outcome {
                Ok(route) => {
                    result.insert(key, route);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Dropping bulk leg {}: {}", key, e);
                }
            }
        }

        tracing::info!(
            "🧭 Bulk directions from {}: {}/{} legs succeeded",
            start,
            result.len(),
            total
        );
        result
    }

    /// 同時取得等時圈與周邊要素，任一失敗即整體失敗
    pub async fn analysis(&self, origin: Coordinate, minutes: i64, mode: TravelMode) -> Result<AnalysisResult> {
        let radius = search_radius(minutes, mode, SpeedTable::Analysis);
        let query = build_overpass_query(ANALYSIS_FILTERS, radius, origin);

        let (iso, pois) = tokio::try_join!(
            self.routing.isochrone(origin, minutes, mode),
            self.features.query(&query)
        )?;

        Ok(AnalysisResult { iso, pois })
    }
}
