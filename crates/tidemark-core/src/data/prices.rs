use crate::types::PricePoint;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Default)]
pub struct DataQualityReport {
    pub duplicates: usize,
    pub out_of_order: usize,
    pub invalid_close: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PriceRecord {
    pub timestamp_utc: String,
    pub close: f64,
}

/// Load a `timestamp_utc,close` CSV into a price series.
///
/// Rows with a non-finite or non-positive close are dropped and counted.
/// Duplicate timestamps keep the last row seen; out-of-order rows are
/// counted but kept, leaving the decision to the caller.
pub fn load_csv(path: &Path) -> Result<(Vec<PricePoint>, DataQualityReport), String> {
    let file = File::open(path)
        .map_err(|err| format!("failed to open prices CSV {}: {}", path.display(), err))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut points: Vec<PricePoint> = Vec::new();
    let mut report = DataQualityReport::default();
    let mut last_ts: Option<i64> = None;

    for result in reader.deserialize::<PriceRecord>() {
        let record = result.map_err(|err| format!("failed to parse CSV row: {}", err))?;
        let timestamp = parse_timestamp(&record.timestamp_utc)?;

        if !record.close.is_finite() || record.close <= 0.0 {
            report.invalid_close += 1;
            continue;
        }

        if report.first_timestamp.is_none() {
            report.first_timestamp = Some(timestamp);
        }

        if let Some(prev) = last_ts {
            if timestamp < prev {
                report.out_of_order += 1;
            }
        }

        if last_ts == Some(timestamp) {
            report.duplicates += 1;
            if let Some(last) = points.last_mut() {
                last.price = record.close;
                report.last_timestamp = Some(timestamp);
                continue;
            }
        }

        last_ts = Some(timestamp);
        report.last_timestamp = Some(timestamp);
        points.push(PricePoint {
            timestamp,
            price: record.close,
        });
    }

    Ok((points, report))
}

fn parse_timestamp(value: &str) -> Result<i64, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%z") {
        return Ok(dt.timestamp());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        let dt: DateTime<Utc> = Utc.from_utc_datetime(&naive);
        return Ok(dt.timestamp());
    }

    Err(format!("unsupported timestamp format: {}", value))
}
