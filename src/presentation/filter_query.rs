// Query-string filters resolved against a refreshed dataset
use crate::domain::error::DashboardError;
use crate::domain::filter::{FilterCriteria, TimeRange};
use crate::domain::hazard::{ClassifiedPoint, HazardCategory};
use crate::domain::point::parse_timestamp;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Comma-separated filter parameters. An absent parameter means "no restriction";
/// a present but empty one (`vessels=`) means "nothing selected".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub vessels: Option<String>,
    pub categories: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bound(raw: &str, name: &str) -> Result<chrono::DateTime<chrono::Utc>, DashboardError> {
    parse_timestamp(raw)
        .ok_or_else(|| DashboardError::InvalidFilter(format!("invalid {} time {:?}", name, raw)))
}

impl FilterQuery {
    pub fn resolve(&self, points: &[ClassifiedPoint]) -> Result<FilterCriteria, DashboardError> {
        let mut criteria = FilterCriteria::defaults_for(points);

        if let Some(raw) = &self.vessels {
            // Ids arrive as text, so match on their display form.
            let wanted: BTreeSet<&str> = split_list(raw).collect();
            criteria
                .vessels
                .retain(|id| wanted.contains(id.to_string().as_str()));
        }

        if let Some(raw) = &self.categories {
            criteria.categories = split_list(raw)
                .map(str::parse::<HazardCategory>)
                .collect::<Result<_, _>>()?;
        }

        let start = self.start.as_deref().map(|s| parse_bound(s, "start")).transpose()?;
        let end = self.end.as_deref().map(|s| parse_bound(s, "end")).transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DashboardError::InvalidFilter(format!(
                    "start {} is after end {}",
                    start, end
                )));
            }
        }

        if start.is_some() || end.is_some() {
            let observed = criteria.time_range;
            let (Some(start), Some(end)) = (
                start.or(observed.map(|r| r.start)),
                end.or(observed.map(|r| r.end)),
            ) else {
                // Open-ended bound on an empty dataset; nothing to restrict.
                return Ok(criteria);
            };
            // A single bound outside the observed span leaves start > end,
            // which matches no point.
            criteria.time_range = Some(TimeRange::new(start, end));
        }

        Ok(criteria)
    }
}
