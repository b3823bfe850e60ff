// Dashboard view model handed to the front-end
use super::filter::{FilterCriteria, TimeRange};
use super::hazard::{ClassifiedPoint, HazardCategory};
use super::point::{VesselId, format_timestamp};
use serde::Serialize;

pub const DASHBOARD_TITLE: &str = "Bathymetry Hazard Dashboard";
const MAP_ZOOM: f64 = 6.0;
const MAP_PITCH: f64 = 30.0;
const MARKER_RADIUS: f64 = 200.0;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub last_updated: String,
    pub options: FilterOptions,
    pub applied: FilterCriteria,
    pub rows: Vec<TableRow>,
    pub map: MapView,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub vessels: Vec<VesselId>,
    pub categories: Vec<HazardCategory>,
    pub time_bounds: Option<TimeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub vessel_id: VesselId,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub category: HazardCategory,
    pub symbol: &'static str,
    pub timestamp: String,
}

impl From<&ClassifiedPoint> for TableRow {
    fn from(point: &ClassifiedPoint) -> Self {
        Self {
            vessel_id: point.record.vessel_id.clone(),
            latitude: point.record.latitude,
            longitude: point.record.longitude,
            depth: point.record.depth,
            category: point.category,
            symbol: point.symbol(),
            timestamp: format_timestamp(&point.record.timestamp),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub points: Vec<MapPoint>,
}

impl MapView {
    pub fn new(center: (f64, f64), points: Vec<MapPoint>) -> Self {
        Self {
            latitude: center.0,
            longitude: center.1,
            zoom: MAP_ZOOM,
            pitch: MAP_PITCH,
            points,
        }
    }
}

/// One scatter marker. `position` is `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub position: [f64; 2],
    pub fill_color: [u8; 4],
    pub radius: f64,
    pub tooltip: String,
}

impl From<&ClassifiedPoint> for MapPoint {
    fn from(point: &ClassifiedPoint) -> Self {
        Self {
            position: [point.record.longitude, point.record.latitude],
            fill_color: point.rgba,
            radius: MARKER_RADIUS,
            tooltip: format!(
                "Vessel: {} / Depth: {} m / Hazard: {} {}",
                point.record.vessel_id,
                point.record.depth,
                point.category,
                point.symbol()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub symbol: &'static str,
    pub category: HazardCategory,
    pub color: &'static str,
    pub description: &'static str,
}

/// IHO S-52 style legend, in display order.
pub fn legend() -> Vec<LegendEntry> {
    [
        (HazardCategory::ShallowWater, "Depth < minimum safe depth"),
        (HazardCategory::SafeWater, "Safe to navigate"),
        (HazardCategory::DeepWater, "Depth >= 30 m"),
        (HazardCategory::Rock, "Fixed hazards"),
        (HazardCategory::Wreck, "Shipwrecks"),
        (HazardCategory::RestrictedZone, "No-entry zones"),
    ]
    .into_iter()
    .map(|(category, description)| LegendEntry {
        symbol: category.symbol(),
        category,
        color: category.color(),
        description,
    })
    .collect()
}
