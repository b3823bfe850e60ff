// Hazard classification of bathymetry points
use super::color::hex_to_rgba;
use super::error::DashboardError;
use super::point::PointRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Depth at or beyond which open water counts as deep.
pub const DEEP_WATER_DEPTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HazardCategory {
    #[serde(rename = "Restricted Zone")]
    RestrictedZone,
    #[serde(rename = "Wreck")]
    Wreck,
    #[serde(rename = "Rock")]
    Rock,
    #[serde(rename = "Shallow Water")]
    ShallowWater,
    #[serde(rename = "Deep Water")]
    DeepWater,
    #[serde(rename = "Safe Water")]
    SafeWater,
}

impl HazardCategory {
    pub const ALL: [HazardCategory; 6] = [
        HazardCategory::RestrictedZone,
        HazardCategory::Wreck,
        HazardCategory::Rock,
        HazardCategory::ShallowWater,
        HazardCategory::DeepWater,
        HazardCategory::SafeWater,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HazardCategory::RestrictedZone => "Restricted Zone",
            HazardCategory::Wreck => "Wreck",
            HazardCategory::Rock => "Rock",
            HazardCategory::ShallowWater => "Shallow Water",
            HazardCategory::DeepWater => "Deep Water",
            HazardCategory::SafeWater => "Safe Water",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            HazardCategory::RestrictedZone => "⛔",
            HazardCategory::Wreck => "⚫",
            HazardCategory::Rock => "🔺",
            HazardCategory::ShallowWater => "⚠️",
            HazardCategory::DeepWater => "—",
            HazardCategory::SafeWater => "✓",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            HazardCategory::RestrictedZone => "#FF4500",
            HazardCategory::Wreck => "#000000",
            HazardCategory::Rock => "#FF0000",
            HazardCategory::ShallowWater => "#1E90FF",
            HazardCategory::DeepWater => "#FFFFFF",
            HazardCategory::SafeWater => "#32CD32",
        }
    }
}

impl fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HazardCategory {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HazardCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashboardError::InvalidFilter(format!("unknown hazard category {:?}", s)))
    }
}

/// Classify a point. Branches are checked in priority order and the first match wins,
/// so a rock in 20 m of water is still a rock.
pub fn classify(record: &PointRecord, min_safe_depth: f64) -> HazardCategory {
    if record.flags.is_restricted {
        HazardCategory::RestrictedZone
    } else if record.flags.is_wreck {
        HazardCategory::Wreck
    } else if record.flags.is_rock {
        HazardCategory::Rock
    } else if record.depth < min_safe_depth {
        HazardCategory::ShallowWater
    } else if record.depth >= DEEP_WATER_DEPTH {
        HazardCategory::DeepWater
    } else {
        HazardCategory::SafeWater
    }
}

/// A point together with its classification and marker color.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPoint {
    pub record: PointRecord,
    pub category: HazardCategory,
    pub rgba: [u8; 4],
}

impl ClassifiedPoint {
    pub fn new(record: PointRecord, min_safe_depth: f64) -> Result<Self, DashboardError> {
        let category = classify(&record, min_safe_depth);
        let rgba = hex_to_rgba(category.color())?;
        Ok(Self {
            record,
            category,
            rgba,
        })
    }

    pub fn symbol(&self) -> &'static str {
        self.category.symbol()
    }
}
