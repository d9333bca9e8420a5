//! Sanitizes externally generated assessments before they are trusted.
//!
//! A generative model is asked for an object shaped like [`RiskAssessment`], but nothing about
//! its ranges or types is guaranteed. [`reconcile`] is the single boundary that turns such a
//! payload into a value obeying the same category bounds and level classification as the
//! rule-based scorer.

use serde_json::{Map, Value};
use tracing::debug;

use super::domain::{RiskAssessment, RiskBreakdown, RiskCategory, RiskLevel};

/// Keys every external assessment must carry.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "riskScore",
    "riskLevel",
    "breakdown",
    "recommendations",
    "insights",
];

/// Largest gap tolerated between the stated score and the breakdown sum.
pub const SCORE_TOLERANCE: u32 = 5;

/// Raised when the external payload is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedAssessmentError {
    #[error("assessment payload must be a JSON object")]
    NotAnObject,
    #[error("assessment payload is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Normalize an untrusted assessment.
///
/// Category values are clamped to their maxima, the total is replaced by the breakdown sum
/// when the two differ by more than [`SCORE_TOLERANCE`], and the level is always re-derived
/// from the final score.
pub fn reconcile(raw: &Value) -> Result<RiskAssessment, MalformedAssessmentError> {
    let object = raw.as_object().ok_or(MalformedAssessmentError::NotAnObject)?;
    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(MalformedAssessmentError::MissingField(field));
        }
    }

    let stated_score = parse_integer(&object["riskScore"]).map(|score| score.clamp(0, 100) as u32);

    let breakdown = clamp_breakdown(object["breakdown"].as_object());
    let calculated_score = breakdown.total();

    let risk_score = match stated_score {
        Some(stated) if stated.abs_diff(calculated_score) <= SCORE_TOLERANCE => stated,
        Some(stated) => {
            debug!(
                stated,
                calculated_score, "stated risk score disagrees with breakdown; using breakdown sum"
            );
            calculated_score.min(100)
        }
        None => {
            debug!(calculated_score, "risk score is not numeric; using breakdown sum");
            calculated_score.min(100)
        }
    };

    let derived_level = RiskLevel::from_score(risk_score);
    let stated_level = object["riskLevel"].as_str().and_then(RiskLevel::parse);
    let mut risk_level = stated_level.unwrap_or(derived_level);
    if risk_level != derived_level {
        debug!(
            stated = %risk_level,
            derived = %derived_level,
            risk_score,
            "risk level disagrees with score; classification wins"
        );
        risk_level = derived_level;
    }

    Ok(RiskAssessment {
        risk_score,
        risk_level,
        breakdown,
        recommendations: string_list(&object["recommendations"]),
        insights: string_list(&object["insights"]),
    })
}

fn clamp_breakdown(raw: Option<&Map<String, Value>>) -> RiskBreakdown {
    let mut breakdown = RiskBreakdown::default();
    for category in RiskCategory::ALL {
        let value = raw
            .and_then(|fields| fields.get(category.key()))
            .and_then(parse_integer)
            .unwrap_or(0);
        breakdown.set(category, value.clamp(0, i64::from(category.max())) as u32);
    }
    breakdown
}

/// Lenient integer parsing: numbers truncate toward zero, strings parse their leading
/// integer prefix (`"72.5 points"` is 72). Anything else is non-numeric.
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        }),
        Value::String(text) => parse_integer_prefix(text),
        _ => None,
    }
}

fn parse_integer_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
