//! Endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::core::{Coordinate, TravelMode};
use crate::utils::error::{ErrorSeverity, GatewayError};

fn default_minutes() -> i64 {
    10
}

/// Query params shared by the isochrone, POI and analysis endpoints.
#[derive(Debug, Deserialize)]
pub struct AreaParams {
    pub lng: f64,
    pub lat: f64,
    #[serde(default = "default_minutes")]
    pub minutes: i64,
    #[serde(default)]
    pub profile: TravelMode,
}

impl AreaParams {
    fn origin(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectionsParams {
    pub start_lng: f64,
    pub start_lat: f64,
    pub end_lng: f64,
    pub end_lat: f64,
    #[serde(default)]
    pub mode: TravelMode,
}

#[derive(Debug, Deserialize)]
pub struct BulkDirectionsParams {
    pub start_lng: f64,
    pub start_lat: f64,
    pub targets: String,
    #[serde(default)]
    pub mode: TravelMode,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.severity() {
            ErrorSeverity::Low => tracing::warn!(
                "Request failed with {}: {} (Category: {:?})",
                status,
                self,
                self.category()
            ),
            _ => tracing::error!(
                "Request failed with {}: {} (Category: {:?}, Severity: {:?})",
                status,
                self,
                self.category(),
                self.severity()
            ),
        }

        let body = serde_json::json!({ "detail": self.user_friendly_message() });
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn isochrone(
    State(state): State<AppState>,
    Query(params): Query<AreaParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let iso = state
        .gateway
        .isochrone(params.origin(), params.minutes, params.profile)
        .await?;
    Ok(Json(iso))
}

pub async fn pois(
    State(state): State<AppState>,
    Query(params): Query<AreaParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let features = state
        .gateway
        .pois(params.origin(), params.minutes, params.profile)
        .await?;
    Ok(Json(features))
}

pub async fn analysis(
    State(state): State<AppState>,
    Query(params): Query<AreaParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let result = state
        .gateway
        .analysis(params.origin(), params.minutes, params.profile)
        .await?;
    Ok(Json(result))
}

pub async fn directions(
    State(state): State<AppState>,
    Query(params): Query<DirectionsParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let route = state
        .gateway
        .directions(
            Coordinate::new(params.start_lng, params.start_lat),
            Coordinate::new(params.end_lng, params.end_lat),
            params.mode,
        )
        .await?;
    Ok(Json(route))
}

/// 失敗的目標不會出現在結果中，全部失敗時回傳空物件
pub async fn bulk_directions(
    State(state): State<AppState>,
    Query(params): Query<BulkDirectionsParams>,
) -> impl IntoResponse {
    let result = state
        .gateway
        .bulk_directions(
            Coordinate::new(params.start_lng, params.start_lat),
            &params.targets,
            params.mode,
        )
        .await;
    Json(result)
}
