// Fixed-delay retry around a vessel source
use crate::application::vessel_source::{VesselPayload, VesselSource};
use crate::domain::error::DashboardError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, Duration::from_secs(7))
    }
}

/// Fetch with up to `retries` extra attempts, sleeping `delay` between them.
pub async fn fetch_with_retry(
    source: &dyn VesselSource,
    policy: RetryPolicy,
) -> Result<VesselPayload, DashboardError> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match source.fetch().await {
            Ok(payload) => {
                tracing::debug!("Fetched {} vessels on attempt {}", payload.vessels.len(), attempt);
                return Ok(payload);
            }
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    "Fetch attempt {}/{} failed: {:#}; retrying in {:?}",
                    attempt,
                    max_attempts,
                    e,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("Fetch failed after {} attempt(s): {:#}", attempt, e);
                return Err(DashboardError::Fetch {
                    attempts: attempt,
                    source: e,
                });
            }
        }
    }
}
