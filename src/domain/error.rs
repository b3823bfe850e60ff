// Error kinds surfaced by a refresh cycle
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Every fetch attempt failed; the refresh cycle stops here.
    #[error("failed to fetch vessel data after {attempts} attempt(s): {source}")]
    Fetch {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid color format: {0:?} (expected #RRGGBB)")]
    InvalidColorFormat(String),

    #[error("record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("vessel {vessel} has no data field")]
    MissingVesselData { vessel: usize },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}
