// Filter predicates over classified points
use super::hazard::{ClassifiedPoint, HazardCategory};
use super::point::VesselId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Inclusive time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts <= self.end
    }

    /// Observed min/max span, or `None` when there are no points.
    pub fn observed(points: &[ClassifiedPoint]) -> Option<Self> {
        let start = points.iter().map(|p| p.record.timestamp).min()?;
        let end = points.iter().map(|p| p.record.timestamp).max()?;
        Some(Self { start, end })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub vessels: BTreeSet<VesselId>,
    pub categories: BTreeSet<HazardCategory>,
    /// `None` only for an empty dataset, where there is no span to restrict.
    pub time_range: Option<TimeRange>,
}

impl FilterCriteria {
    /// Unfiltered criteria: every vessel, every category present, full time span.
    pub fn defaults_for(points: &[ClassifiedPoint]) -> Self {
        Self {
            vessels: points.iter().map(|p| p.record.vessel_id.clone()).collect(),
            categories: points.iter().map(|p| p.category).collect(),
            time_range: TimeRange::observed(points),
        }
    }

    pub fn matches(&self, point: &ClassifiedPoint) -> bool {
        self.vessels.contains(&point.record.vessel_id)
            && self.categories.contains(&point.category)
            && self
                .time_range
                .is_none_or(|range| range.contains(&point.record.timestamp))
    }

    /// Keep the points matching all predicates, in their original order.
    pub fn apply(&self, points: &[ClassifiedPoint]) -> Vec<ClassifiedPoint> {
        points.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Mean latitude/longitude of the points, `(0, 0)` when there are none.
pub fn map_center(points: &[ClassifiedPoint]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }

    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.record.latitude).sum::<f64>() / n;
    let lon = points.iter().map(|p| p.record.longitude).sum::<f64>() / n;
    (lat, lon)
}

/// Distinct vessel ids, sorted.
pub fn vessel_options(points: &[ClassifiedPoint]) -> Vec<VesselId> {
    points
        .iter()
        .map(|p| p.record.vessel_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories in order of first appearance.
pub fn category_options(points: &[ClassifiedPoint]) -> Vec<HazardCategory> {
    let mut seen = Vec::new();
    for point in points {
        if !seen.contains(&point.category) {
            seen.push(point.category);
        }
    }
    seen
}
