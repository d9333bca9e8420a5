use std::cmp::Reverse;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{EnvironmentalReading, HealthProfile, RiskAssessment};
use super::scoring::score;
use super::validation::{validate_reading, ReadingValidation};

/// One scored row of a readings export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
    pub reading: EnvironmentalReading,
    pub validation: ReadingValidation,
    /// Absent when the reading failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
}

/// Score every reading in a CSV export (`aqi,pm25,pm10` plus optional `location` and
/// `recorded_at` columns) against one profile. Invalid readings are kept but not scored.
pub fn score_readings<R: Read>(
    reader: R,
    profile: &HealthProfile,
) -> Result<Vec<BatchEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut entries = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        // Records span lines when a quoted field holds a newline.
        let line = record
            .position()
            .map_or(index + 2, |position| position.line() as usize);
        let row: ReadingRow = record.deserialize(Some(&headers))?;
        let reading = EnvironmentalReading {
            aqi: row.aqi,
            pm25: row.pm25,
            pm10: row.pm10,
        };
        let mut validation = validate_reading(&reading);
        let assessment = validation
            .is_valid()
            .then(|| score(profile, &reading));

        let recorded_at = match row.recorded_at.as_deref() {
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    validation.warnings.push(format!(
                        "recorded_at '{raw}' is not RFC 3339 or YYYY-MM-DD; timestamp dropped"
                    ));
                }
                parsed
            }
            None => None,
        };

        entries.push(BatchEntry {
            line,
            location: row.location,
            recorded_at,
            reading,
            validation,
            assessment,
        });
    }

    Ok(entries)
}

pub fn score_readings_from_path<P: AsRef<Path>>(
    path: P,
    profile: &HealthProfile,
) -> Result<Vec<BatchEntry>, csv::Error> {
    let file = std::fs::File::open(path)?;
    score_readings(file, profile)
}

/// Highest-scoring valid entry, earliest line on ties.
pub fn peak(entries: &[BatchEntry]) -> Option<&BatchEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .assessment
                .as_ref()
                .map(|assessment| (entry, assessment.risk_score))
        })
        .min_by_key(|(_, risk_score)| Reverse(*risk_score))
        .map(|(entry, _)| entry)
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    aqi: f64,
    pm25: f64,
    pm10: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    recorded_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
