use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::EnvironmentalReading;
use super::repository::AssessmentRecord;

/// How stale a stored assessment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentFreshness {
    VeryFresh,
    Fresh,
    Recent,
    Outdated,
    VeryOutdated,
}

impl AssessmentFreshness {
    pub fn from_age(assessed_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let hours = hours_between(assessed_at, now);
        if hours < 1.0 {
            AssessmentFreshness::VeryFresh
        } else if hours < 6.0 {
            AssessmentFreshness::Fresh
        } else if hours < 24.0 {
            AssessmentFreshness::Recent
        } else if hours < 72.0 {
            AssessmentFreshness::Outdated
        } else {
            AssessmentFreshness::VeryOutdated
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssessmentFreshness::VeryFresh => "Very Fresh",
            AssessmentFreshness::Fresh => "Fresh",
            AssessmentFreshness::Recent => "Recent",
            AssessmentFreshness::Outdated => "Outdated",
            AssessmentFreshness::VeryOutdated => "Very Outdated",
        }
    }
}

/// Thresholds that trigger a new assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReassessmentPolicy {
    pub max_age_hours: u32,
    pub aqi_delta: f64,
}

impl Default for ReassessmentPolicy {
    fn default() -> Self {
        Self {
            max_age_hours: 12,
            aqi_delta: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassessmentDecision {
    pub should_reassess: bool,
    pub reason: String,
}

impl ReassessmentPolicy {
    pub fn evaluate(
        &self,
        last: Option<&AssessmentRecord>,
        current: Option<&EnvironmentalReading>,
        now: DateTime<Utc>,
    ) -> ReassessmentDecision {
        let Some(last) = last else {
            return decision(true, "No previous assessment");
        };

        if hours_between(last.assessed_at, now) > f64::from(self.max_age_hours) {
            return decision(
                true,
                &format!("Assessment is over {} hours old", self.max_age_hours),
            );
        }

        if let Some(current) = current {
            if (current.aqi - last.reading.aqi).abs() > self.aqi_delta {
                return decision(true, "Air quality has changed significantly");
            }
        }

        decision(false, "Recent assessment is still valid")
    }
}

fn decision(should_reassess: bool, reason: &str) -> ReassessmentDecision {
    ReassessmentDecision {
        should_reassess,
        reason: reason.to_string(),
    }
}

fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}
