// CSV and GeoJSON exports of classified points
use crate::domain::hazard::{ClassifiedPoint, HazardCategory};
use crate::domain::point::{VesselId, format_timestamp};
use serde::Serialize;
use std::fmt::Write;

pub const CSV_MEDIA_TYPE: &str = "text/csv";
pub const CSV_FILE_NAME: &str = "bathymetry_data.csv";
pub const GEOJSON_MEDIA_TYPE: &str = "application/geo+json";
pub const GEOJSON_FILE_NAME: &str = "bathymetry_data.geojson";

const CSV_HEADER: [&str; 7] = [
    "vessel_id",
    "latitude",
    "longitude",
    "depth",
    "category",
    "symbol",
    "timestamp",
];

/// Render points as CSV with a header row. An empty slice gives only the header.
pub fn to_csv(points: &[ClassifiedPoint]) -> String {
    let mut out = String::new();
    push_csv_row(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));

    for point in points {
        let record = &point.record;
        push_csv_row(
            &mut out,
            [
                record.vessel_id.to_string(),
                record.latitude.to_string(),
                record.longitude.to_string(),
                record.depth.to_string(),
                point.category.to_string(),
                point.symbol().to_string(),
                format_timestamp(&record.timestamp),
            ],
        );
    }

    out
}

fn push_csv_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            let _ = write!(out, "\"{}\"", field.replace('"', "\"\""));
        } else {
            out.push_str(&field);
        }
    }
    out.push('\n');
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureProperties {
    pub vessel_id: VesselId,
    pub depth: f64,
    pub category: HazardCategory,
    pub timestamp: String,
}

impl From<&ClassifiedPoint> for Feature {
    fn from(point: &ClassifiedPoint) -> Self {
        let record = &point.record;
        Self {
            kind: "Feature",
            geometry: PointGeometry {
                kind: "Point",
                coordinates: [record.longitude, record.latitude],
            },
            properties: FeatureProperties {
                vessel_id: record.vessel_id.clone(),
                depth: record.depth,
                category: point.category,
                timestamp: format_timestamp(&record.timestamp),
            },
        }
    }
}

pub fn to_feature_collection(points: &[ClassifiedPoint]) -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection",
        features: points.iter().map(Feature::from).collect(),
    }
}

pub fn to_geojson(points: &[ClassifiedPoint]) -> serde_json::Result<String> {
    serde_json::to_string(&to_feature_collection(points))
}
