// HTTP vessel source backed by the simulation API
use crate::application::vessel_source::{VesselPayload, VesselSource};
use crate::infrastructure::config::UpstreamSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpVesselSource {
    client: reqwest::Client,
    url: String,
    vessel_count: u32,
    num_points: u32,
}

impl HttpVesselSource {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            vessel_count: settings.vessel_count,
            num_points: settings.num_points,
        })
    }
}

#[async_trait]
impl VesselSource for HttpVesselSource {
    async fn fetch(&self) -> Result<VesselPayload> {
        tracing::debug!("Requesting vessel data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("vessel_count", self.vessel_count),
                ("num_points", self.num_points),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to bathymetry API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Bathymetry API returned status {}: {}", status, body);
        }

        response
            .json::<VesselPayload>()
            .await
            .context("Failed to parse bathymetry API response")
    }
}
