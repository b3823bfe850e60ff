// Dashboard service - One refresh cycle and the views built from it
use crate::application::extraction::classify_payload;
use crate::application::retry::{RetryPolicy, fetch_with_retry};
use crate::application::vessel_source::VesselSource;
use crate::domain::dashboard::{
    DASHBOARD_TITLE, Dashboard, FilterOptions, MapPoint, MapView, TableRow, legend,
};
use crate::domain::error::DashboardError;
use crate::domain::filter::{
    FilterCriteria, TimeRange, category_options, map_center, vessel_options,
};
use crate::domain::hazard::ClassifiedPoint;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn VesselSource>,
    retry: RetryPolicy,
    min_safe_depth: f64,
}

impl DashboardService {
    pub fn new(source: Arc<dyn VesselSource>, retry: RetryPolicy, min_safe_depth: f64) -> Self {
        Self {
            source,
            retry,
            min_safe_depth,
        }
    }

    /// Fetch, flatten and classify. Nothing is cached between calls.
    pub async fn refresh(&self) -> Result<Vec<ClassifiedPoint>, DashboardError> {
        let payload = fetch_with_retry(self.source.as_ref(), self.retry).await?;
        let vessel_count = payload.vessels.len();
        let points = classify_payload(payload, self.min_safe_depth)?;

        tracing::info!(
            "Classified {} points from {} vessels",
            points.len(),
            vessel_count
        );
        Ok(points)
    }

    pub fn build_dashboard(
        &self,
        points: &[ClassifiedPoint],
        criteria: FilterCriteria,
        now: DateTime<Utc>,
    ) -> Dashboard {
        let filtered = criteria.apply(points);
        tracing::debug!("Filter kept {} of {} points", filtered.len(), points.len());

        let options = FilterOptions {
            vessels: vessel_options(points),
            categories: category_options(points),
            time_bounds: TimeRange::observed(points),
        };
        let map = MapView::new(
            map_center(&filtered),
            filtered.iter().map(MapPoint::from).collect(),
        );

        Dashboard {
            title: DASHBOARD_TITLE.to_string(),
            last_updated: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            options,
            applied: criteria,
            rows: filtered.iter().map(TableRow::from).collect(),
            map,
            legend: legend(),
        }
    }
}
