use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EnvironmentalReading, RiskAssessment};
use super::freshness::AssessmentFreshness;
use super::strategy::GeneratedBy;

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier of the user an assessment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Persisted assessment with the environmental inputs and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub reading: EnvironmentalReading,
    pub assessment: RiskAssessment,
    pub generated_by: GeneratedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn freshness(&self, now: DateTime<Utc>) -> AssessmentFreshness {
        AssessmentFreshness::from_age(self.assessed_at, now)
    }

    pub fn summary_view(&self, now: DateTime<Utc>) -> AssessmentSummaryView {
        AssessmentSummaryView {
            assessment_id: self.id.clone(),
            risk_score: self.assessment.risk_score,
            risk_level: self.assessment.risk_level.label(),
            risk_color: self.assessment.risk_level.color(),
            generated_by: self.generated_by.label(),
            ai_generated: self.generated_by.is_model_generated(),
            freshness: self.freshness(now).label(),
            top_recommendations: self
                .assessment
                .recommendations
                .iter()
                .take(3)
                .cloned()
                .collect(),
        }
    }
}

/// Storage abstraction: an append-only history plus a "latest" snapshot per user.
pub trait AssessmentRepository: Send + Sync {
    fn append(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn latest(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Most recent first.
    fn history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Display-ready projection of a stored assessment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummaryView {
    pub assessment_id: AssessmentId,
    pub risk_score: u32,
    pub risk_level: &'static str,
    pub risk_color: &'static str,
    pub generated_by: &'static str,
    pub ai_generated: bool,
    pub freshness: &'static str,
    pub top_recommendations: Vec<String>,
}
