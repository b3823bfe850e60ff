// Bathymetry point domain model
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const ROCK_DEPTH: f64 = 1.5;
const WRECK_MIN_DEPTH: f64 = 3.0;
const WRECK_MAX_DEPTH: f64 = 5.0;
const WRECK_INDEX_STRIDE: usize = 7;
const RESTRICTED_INDEX_STRIDE: usize = 13;

/// Vessel identifier as sent upstream, either a number or a string.
///
/// Numbers sort before strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VesselId {
    Number(i64),
    Text(String),
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VesselId::Number(n) => write!(f, "{}", n),
            VesselId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HazardFlags {
    pub is_rock: bool,
    pub is_wreck: bool,
    pub is_restricted: bool,
}

impl HazardFlags {
    /// Derive flags from depth and the position in the flattened sequence.
    ///
    /// `index` is the global index across all vessels, not the per-vessel one.
    pub fn derive(depth: f64, index: usize) -> Self {
        Self {
            is_rock: depth < ROCK_DEPTH,
            is_wreck: (WRECK_MIN_DEPTH..WRECK_MAX_DEPTH).contains(&depth)
                && index % WRECK_INDEX_STRIDE == 0,
            is_restricted: index % RESTRICTED_INDEX_STRIDE == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub vessel_id: VesselId,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub timestamp: DateTime<Utc>,
    pub flags: HazardFlags,
}

impl PointRecord {
    pub fn new(
        vessel_id: VesselId,
        latitude: f64,
        longitude: f64,
        depth: f64,
        timestamp: DateTime<Utc>,
        index: usize,
    ) -> Self {
        Self {
            vessel_id,
            latitude,
            longitude,
            depth,
            timestamp,
            flags: HazardFlags::derive(depth, index),
        }
    }
}

/// Parse an ISO-8601-like timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Stable RFC 3339 rendering used by the table and both exports.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
