use crate::application::retry::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub upstream: UpstreamSettings,
    pub hazard: HazardSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UpstreamSettings {
    pub url: String,
    pub vessel_count: u32,
    pub num_points: u32,
    pub timeout_secs: u64,
    pub retries: u32,
    pub retry_delay_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            url: "https://bathymetry-api.onrender.com/simulate-multi".to_string(),
            vessel_count: 5,
            num_points: 20,
            timeout_secs: 15,
            retries: 1,
            retry_delay_secs: 7,
        }
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_secs(self.retry_delay_secs))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HazardSettings {
    /// Minimum safe depth in meters (MBS).
    pub min_safe_depth: f64,
}

impl Default for HazardSettings {
    fn default() -> Self {
        Self {
            min_safe_depth: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Load `config/dashboard.*`. The file is optional and every key has a default.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    parse_config(config::File::with_name("config/dashboard").required(false))
}

fn parse_config<S>(source: S) -> anyhow::Result<DashboardConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder().add_source(source).build()?;

    Ok(settings.try_deserialize()?)
}
