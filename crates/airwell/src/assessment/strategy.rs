use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::RiskAssessment;
use super::model::{AssessmentModel, AssessmentRequest};
use super::reconcile::reconcile;
use super::scoring::score;

/// Provenance recorded alongside every stored assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedBy {
    #[serde(rename = "Gemini AI")]
    GenerativeModel,
    #[serde(rename = "Rule-based (AI fallback)")]
    RuleBasedFallback,
    #[serde(rename = "Rule-based")]
    RuleBased,
}

impl GeneratedBy {
    pub fn label(&self) -> &'static str {
        match self {
            GeneratedBy::GenerativeModel => "Gemini AI",
            GeneratedBy::RuleBasedFallback => "Rule-based (AI fallback)",
            GeneratedBy::RuleBased => "Rule-based",
        }
    }

    pub fn is_model_generated(&self) -> bool {
        matches!(self, GeneratedBy::GenerativeModel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentOutcome {
    pub assessment: RiskAssessment,
    pub generated_by: GeneratedBy,
    pub fallback_reason: Option<String>,
}

/// Try the model first and fall back to the rule-based scorer when it fails or returns an
/// unusable payload. Without a model the scorer runs directly.
pub fn assess_with_fallback(
    model: Option<&dyn AssessmentModel>,
    request: &AssessmentRequest,
) -> AssessmentOutcome {
    let Some(model) = model else {
        return AssessmentOutcome {
            assessment: score(&request.profile, &request.reading),
            generated_by: GeneratedBy::RuleBased,
            fallback_reason: None,
        };
    };

    let reason = match model.generate(request) {
        Ok(raw) => match reconcile(&raw) {
            Ok(assessment) => {
                info!(
                    model = model.name(),
                    risk_score = assessment.risk_score,
                    risk_level = %assessment.risk_level,
                    "model assessment reconciled"
                );
                return AssessmentOutcome {
                    assessment,
                    generated_by: GeneratedBy::GenerativeModel,
                    fallback_reason: None,
                };
            }
            Err(err) => err.to_string(),
        },
        Err(err) => err.to_string(),
    };

    warn!(model = model.name(), %reason, "falling back to rule-based assessment");
    AssessmentOutcome {
        assessment: score(&request.profile, &request.reading),
        generated_by: GeneratedBy::RuleBasedFallback,
        fallback_reason: Some(reason),
    }
}
