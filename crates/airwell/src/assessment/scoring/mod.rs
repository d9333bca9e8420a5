mod recommendations;
mod rules;

pub use recommendations::recommendations_for;

use super::domain::{EnvironmentalReading, HealthProfile, RiskAssessment, RiskBreakdown, RiskLevel};
use tracing::trace;

/// Rule-based risk assessment for a complete profile and a reading.
///
/// Pure and total: out-of-range inputs are scored as given. Only the health-conditions
/// component can exceed its category maximum, and the total is not clamped to 100.
pub fn score(profile: &HealthProfile, reading: &EnvironmentalReading) -> RiskAssessment {
    let breakdown = RiskBreakdown {
        environmental: rules::environmental_score(reading),
        age: rules::age_score(profile.age),
        health_conditions: rules::health_conditions_score(profile),
        lifestyle: rules::lifestyle_score(profile),
    };

    let risk_score = breakdown.total();
    let risk_level = RiskLevel::from_score(risk_score);
    trace!(risk_score, %risk_level, ?breakdown, "rule-based risk score computed");

    RiskAssessment {
        risk_score,
        risk_level,
        breakdown,
        recommendations: recommendations_for(risk_level, profile),
        insights: Vec::new(),
    }
}
