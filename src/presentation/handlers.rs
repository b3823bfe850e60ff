// HTTP request handlers
use crate::application::export::{
    CSV_FILE_NAME, CSV_MEDIA_TYPE, GEOJSON_FILE_NAME, GEOJSON_MEDIA_TYPE, to_csv, to_geojson,
};
use crate::domain::dashboard::legend;
use crate::domain::error::DashboardError;
use crate::domain::hazard::ClassifiedPoint;
use crate::infrastructure::http_response::{accepts_brotli, export_response};
use crate::presentation::app_state::AppState;
use crate::presentation::filter_query::FilterQuery;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Failure rendered as a `{"error": ...}` JSON body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        let status = match &e {
            DashboardError::Fetch { .. }
            | DashboardError::MalformedRecord { .. }
            | DashboardError::MissingVesselData { .. } => StatusCode::BAD_GATEWAY,
            DashboardError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            DashboardError::InvalidColorFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            tracing::warn!("Rejected request ({}): {}", self.status, self.message);
        } else {
            tracing::error!("Request failed ({}): {}", self.status, self.message);
        }

        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

/// Export failures carry only a status; give them a JSON body too
fn export_failed(status: StatusCode) -> ApiError {
    ApiError::new(status, "failed to build export response")
}

/// Run one refresh cycle and apply the request's filters
async fn filtered_points(
    state: &AppState,
    query: &FilterQuery,
) -> Result<Vec<ClassifiedPoint>, ApiError> {
    let points = state.dashboard_service.refresh().await?;
    let criteria = query.resolve(&points)?;
    Ok(criteria.apply(&points))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_legend() -> impl IntoResponse {
    Json(legend())
}

/// Refresh and render the dashboard view for the requested filters
pub async fn get_dashboard(
    Query(query): Query<FilterQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let points = state.dashboard_service.refresh().await?;
    let criteria = query.resolve(&points)?;
    let dashboard = state
        .dashboard_service
        .build_dashboard(&points, criteria, chrono::Utc::now());

    Ok(Json(dashboard))
}

pub async fn export_csv(
    Query(query): Query<FilterQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let points = filtered_points(&state, &query).await?;
    let body = to_csv(&points).into_bytes();

    export_response(body, CSV_MEDIA_TYPE, CSV_FILE_NAME, accepts_brotli(&headers))
        .await
        .map_err(export_failed)
}

pub async fn export_geojson(
    Query(query): Query<FilterQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let points = filtered_points(&state, &query).await?;
    let body = to_geojson(&points)
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("GeoJSON serialization error: {}", e),
            )
        })?
        .into_bytes();

    export_response(
        body,
        GEOJSON_MEDIA_TYPE,
        GEOJSON_FILE_NAME,
        accepts_brotli(&headers),
    )
    .await
    .map_err(export_failed)
}
