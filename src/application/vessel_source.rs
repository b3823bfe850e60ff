// Source trait for upstream vessel payloads
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Raw upstream payload. A missing `vessels` key is an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VesselPayload {
    #[serde(default)]
    pub vessels: Vec<RawVessel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVessel {
    #[serde(default)]
    pub vessel_id: Option<Value>,
    #[serde(default)]
    pub data: Option<Vec<RawPoint>>,
}

/// Point exactly as received, fields left untyped.
///
/// Presence and types are checked during extraction so a bad field fails with
/// the point's index instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub vessel_id: Option<Value>,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub depth: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

#[async_trait]
pub trait VesselSource: Send + Sync {
    /// Perform a single fetch attempt
    async fn fetch(&self) -> anyhow::Result<VesselPayload>;
}
