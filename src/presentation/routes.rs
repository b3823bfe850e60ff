// Router wiring for the dashboard API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    export_csv, export_geojson, get_dashboard, get_legend, health_check,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/legend", get(get_legend))
        .route("/dashboard", get(get_dashboard))
        .route("/export/csv", get(export_csv))
        .route("/export/geojson", get(export_geojson))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::retry::RetryPolicy;
    use crate::application::vessel_source::{VesselPayload, VesselSource};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::time::Duration;

    struct StaticSource(Option<&'static str>);

    #[async_trait]
    impl VesselSource for StaticSource {
        async fn fetch(&self) -> anyhow::Result<VesselPayload> {
            match self.0 {
                Some(json) => Ok(serde_json::from_str(json)?),
                None => anyhow::bail!("upstream asleep"),
            }
        }
    }

    const PAYLOAD: &str = r#"{"vessels": [
        {"data": [
            {"vessel_id": 1, "latitude": 42.0, "longitude": -70.0, "depth": 20.0, "timestamp": "2024-01-01T00:00:00Z"},
            {"vessel_id": 1, "latitude": 42.1, "longitude": -70.5, "depth": 12.0, "timestamp": "2024-01-01T00:00:00Z"}
        ]},
        {"data": [
            {"vessel_id": 2, "latitude": 40.0, "longitude": -68.0, "depth": 4.0, "timestamp": "2024-01-01T01:00:00Z"}
        ]}
    ]}"#;

    async fn serve(source: StaticSource) -> String {
        let service = DashboardService::new(
            Arc::new(source),
            RetryPolicy::new(1, Duration::from_millis(1)),
            10.0,
        );
        let router = build_router(Arc::new(AppState {
            dashboard_service: service,
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_dashboard_endpoint() {
        let base = serve(StaticSource(Some(PAYLOAD))).await;

        let body: Value = reqwest::get(format!("{}/dashboard", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["rows"].as_array().unwrap().len(), 3);
        assert_eq!(body["rows"][0]["category"], "Restricted Zone");
        assert_eq!(body["rows"][1]["category"], "Safe Water");
        assert_eq!(body["rows"][2]["category"], "Shallow Water");
        assert_eq!(body["map"]["points"][1]["position"], serde_json::json!([-70.5, 42.1]));
        assert_eq!(body["legend"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_empty_vessel_selection_centers_at_origin() {
        let base = serve(StaticSource(Some(PAYLOAD))).await;

        let body: Value = reqwest::get(format!("{}/dashboard?vessels=", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert!(body["rows"].as_array().unwrap().is_empty());
        assert_eq!(body["map"]["latitude"], 0.0);
        assert_eq!(body["map"]["longitude"], 0.0);
    }

    #[tokio::test]
    async fn test_csv_export_is_filtered() {
        let base = serve(StaticSource(Some(PAYLOAD))).await;

        let response = reqwest::get(format!("{}/export/csv?vessels=2", base))
            .await
            .unwrap();
        assert_eq!(response.headers()["content-type"], "text/csv");

        let csv = response.text().await.unwrap();
        assert_eq!(
            csv,
            "vessel_id,latitude,longitude,depth,category,symbol,timestamp\n\
             2,40,-68,4,Shallow Water,⚠️,2024-01-01T01:00:00Z\n"
        );
    }

    #[tokio::test]
    async fn test_geojson_export() {
        let base = serve(StaticSource(Some(PAYLOAD))).await;

        let response = reqwest::get(format!("{}/export/geojson?categories=Safe%20Water", base))
            .await
            .unwrap();
        assert_eq!(response.headers()["content-type"], "application/geo+json");

        let body: Value = response.json().await.unwrap();
        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["coordinates"], serde_json::json!([-70.5, 42.1]));
        assert_eq!(features[0]["properties"]["category"], "Safe Water");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_bad_gateway() {
        let base = serve(StaticSource(None)).await;

        let response = reqwest::get(format!("{}/dashboard", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("2 attempt(s)"));
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_request() {
        let base = serve(StaticSource(Some(PAYLOAD))).await;

        let response = reqwest::get(format!("{}/export/csv?categories=Kraken", base))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_and_legend() {
        let base = serve(StaticSource(None)).await;

        let health = reqwest::get(format!("{}/healthz", base)).await.unwrap();
        assert_eq!(health.text().await.unwrap(), "ok");

        let legend: Value = reqwest::get(format!("{}/legend", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(legend[0]["category"], "Shallow Water");
        assert_eq!(legend[0]["symbol"], "⚠️");
    }
}
