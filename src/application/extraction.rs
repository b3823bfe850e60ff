// Flatten vessel payloads into typed, classified points
use crate::application::vessel_source::{RawPoint, VesselPayload};
use crate::domain::error::DashboardError;
use crate::domain::hazard::ClassifiedPoint;
use crate::domain::point::{PointRecord, VesselId, parse_timestamp};
use serde_json::Value;

/// Concatenate every vessel's `data` in payload order.
///
/// Points without their own `vessel_id` inherit the enclosing vessel's.
pub fn extract_points(payload: VesselPayload) -> Result<Vec<RawPoint>, DashboardError> {
    let mut points = Vec::new();

    for (vessel_idx, vessel) in payload.vessels.into_iter().enumerate() {
        let data = vessel
            .data
            .ok_or(DashboardError::MissingVesselData { vessel: vessel_idx })?;

        points.extend(data.into_iter().map(|mut point| {
            if point.vessel_id.is_none() {
                point.vessel_id = vessel.vessel_id.clone();
            }
            point
        }));
    }

    Ok(points)
}

/// Validate raw points and derive hazard flags from their global index.
pub fn build_records(points: Vec<RawPoint>) -> Result<Vec<PointRecord>, DashboardError> {
    points
        .into_iter()
        .enumerate()
        .map(|(index, point)| build_record(index, point))
        .collect()
}

fn build_record(index: usize, point: RawPoint) -> Result<PointRecord, DashboardError> {
    let malformed = |reason: String| DashboardError::MalformedRecord { index, reason };
    let required = |field: &str, value: Option<Value>| match value {
        None | Some(Value::Null) => Err(malformed(format!("missing field `{}`", field))),
        Some(value) => Ok(value),
    };
    let number = |field: &str, value: Option<Value>| {
        let value = required(field, value)?;
        value
            .as_f64()
            .ok_or_else(|| malformed(format!("field `{}` is not a number: {}", field, value)))
    };

    let raw_id = required("vessel_id", point.vessel_id)?;
    let vessel_id = serde_json::from_value::<VesselId>(raw_id.clone()).map_err(|_| {
        malformed(format!(
            "field `vessel_id` is not an integer or string: {}",
            raw_id
        ))
    })?;
    let latitude = number("latitude", point.latitude)?;
    let longitude = number("longitude", point.longitude)?;
    let depth = number("depth", point.depth)?;

    let raw_ts = required("timestamp", point.timestamp)?;
    let Some(ts_text) = raw_ts.as_str() else {
        return Err(malformed(format!(
            "field `timestamp` is not a string: {}",
            raw_ts
        )));
    };
    let timestamp = parse_timestamp(ts_text)
        .ok_or_else(|| malformed(format!("unparseable timestamp {:?}", ts_text)))?;

    Ok(PointRecord::new(
        vessel_id, latitude, longitude, depth, timestamp, index,
    ))
}

/// Full pipeline from payload to classified points.
pub fn classify_payload(
    payload: VesselPayload,
    min_safe_depth: f64,
) -> Result<Vec<ClassifiedPoint>, DashboardError> {
    let records = build_records(extract_points(payload)?)?;
    records
        .into_iter()
        .map(|record| ClassifiedPoint::new(record, min_safe_depth))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::retry::{RetryPolicy, fetch_with_retry};
    use crate::application::vessel_source::VesselSource;
    use crate::domain::hazard::HazardCategory;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn payload(json: &str) -> VesselPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flattening_preserves_order_and_global_index() {
        let records = build_records(
            extract_points(payload(
                r#"{"vessels": [
                    {"data": [
                        {"vessel_id": "A", "latitude": 1.0, "longitude": 1.0, "depth": 20.0, "timestamp": "2024-01-01T00:00:00Z"},
                        {"vessel_id": "A", "latitude": 2.0, "longitude": 2.0, "depth": 20.0, "timestamp": "2024-01-01T00:01:00Z"}
                    ]},
                    {"data": [
                        {"vessel_id": "B", "latitude": 3.0, "longitude": 3.0, "depth": 20.0, "timestamp": "2024-01-01T00:02:00Z"}
                    ]}
                ]}"#,
            ))
            .unwrap(),
        )
        .unwrap();

        let order: Vec<(String, f64)> = records
            .iter()
            .map(|r| (r.vessel_id.to_string(), r.latitude))
            .collect();
        assert_eq!(
            order,
            vec![("A".to_string(), 1.0), ("A".to_string(), 2.0), ("B".to_string(), 3.0)]
        );

        // B0 sits at global index 2, so it is not restricted even though it is
        // the first point of its vessel.
        let restricted: Vec<bool> = records.iter().map(|r| r.flags.is_restricted).collect();
        assert_eq!(restricted, vec![true, false, false]);
    }

    #[test]
    fn test_wreck_flag_uses_global_index() {
        let mut points: Vec<String> = (0..8)
            .map(|i| {
                format!(
                    r#"{{"vessel_id": 1, "latitude": 0.0, "longitude": 0.0, "depth": 20.0, "timestamp": "2024-01-01T00:0{}:00Z"}}"#,
                    i
                )
            })
            .collect();
        points[7] = r#"{"vessel_id": 2, "latitude": 0.0, "longitude": 0.0, "depth": 4.0, "timestamp": "2024-01-01T00:07:00Z"}"#.to_string();
        let json = format!(
            r#"{{"vessels": [{{"data": [{}]}}, {{"data": [{}]}}]}}"#,
            points[..7].join(","),
            points[7]
        );

        let classified = classify_payload(payload(&json), 10.0).unwrap();
        assert_eq!(classified.len(), 8);
        assert!(classified[7].record.flags.is_wreck);
        assert_eq!(classified[7].category, HazardCategory::Wreck);
    }

    #[test]
    fn test_missing_vessels_is_empty() {
        assert!(classify_payload(payload("{}"), 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_vessel_id_inherited_from_vessel() {
        let points = extract_points(payload(
            r#"{"vessels": [{"vessel_id": 9, "data": [{"latitude": 1.0}]}]}"#,
        ))
        .unwrap();
        assert_eq!(points[0].vessel_id, Some(json!(9)));
    }

    #[test]
    fn test_vessel_without_data_fails() {
        let err = extract_points(payload(r#"{"vessels": [{"data": []}, {"vessel_id": 2}]}"#))
            .unwrap_err();
        assert!(matches!(err, DashboardError::MissingVesselData { vessel: 1 }));
    }

    #[test]
    fn test_missing_field_fails_whole_cycle() {
        let err = classify_payload(
            payload(
                r#"{"vessels": [{"data": [
                    {"vessel_id": 1, "latitude": 1.0, "longitude": 1.0, "depth": 5.0, "timestamp": "2024-01-01T00:00:00Z"},
                    {"vessel_id": 1, "latitude": 1.0, "longitude": 1.0, "timestamp": "2024-01-01T00:00:00Z"}
                ]}]}"#,
            ),
            10.0,
        )
        .unwrap_err();

        match err {
            DashboardError::MalformedRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("depth"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_fails() {
        let err = classify_payload(
            payload(
                r#"{"vessels": [{"data": [
                    {"vessel_id": 1, "latitude": 1.0, "longitude": 1.0, "depth": 5.0, "timestamp": "soon"}
                ]}]}"#,
            ),
            10.0,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::MalformedRecord { index: 0, .. }));
    }

    fn single_point(fields: &str) -> VesselPayload {
        payload(&format!(r#"{{"vessels": [{{"data": [{{{}}}]}}]}}"#, fields))
    }

    #[test]
    fn test_wrong_typed_depth_is_malformed_record() {
        let err = classify_payload(
            single_point(
                r#""vessel_id": 1, "latitude": 1.0, "longitude": 1.0, "depth": "12", "timestamp": "2024-01-01T00:00:00Z""#,
            ),
            10.0,
        )
        .unwrap_err();

        match err {
            DashboardError::MalformedRecord { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("depth"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_timestamp_is_malformed_record() {
        let err = classify_payload(
            single_point(
                r#""vessel_id": 1, "latitude": 1.0, "longitude": 1.0, "depth": 12.0, "timestamp": 1704067200"#,
            ),
            10.0,
        )
        .unwrap_err();

        match err {
            DashboardError::MalformedRecord { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("timestamp"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let err = classify_payload(
            single_point(
                r#""vessel_id": null, "latitude": 1.0, "longitude": 1.0, "depth": 12.0, "timestamp": "2024-01-01T00:00:00Z""#,
            ),
            10.0,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::MalformedRecord { index: 0, .. }));
    }

    struct CountingSource {
        calls: AtomicU32,
    }

    #[async_trait]
    impl VesselSource for CountingSource {
        async fn fetch(&self) -> anyhow::Result<VesselPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(json!({
                "vessels": [{"data": [
                    {"vessel_id": 1, "latitude": 1.0, "longitude": 1.0, "depth": "12", "timestamp": "2024-01-01T00:00:00Z"}
                ]}]
            }))?)
        }
    }

    #[tokio::test]
    async fn test_wrong_typed_field_is_not_retried() {
        let source = CountingSource {
            calls: AtomicU32::new(0),
        };
        let payload = fetch_with_retry(&source, RetryPolicy::new(1, Duration::from_millis(1)))
            .await
            .unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            classify_payload(payload, 10.0),
            Err(DashboardError::MalformedRecord { index: 0, .. })
        ));
    }
}
