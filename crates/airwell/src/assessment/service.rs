use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::EnvironmentalReading;
use super::freshness::{ReassessmentDecision, ReassessmentPolicy};
use super::model::{AssessmentModel, AssessmentRequest};
use super::repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError, UserId,
};
use super::strategy::assess_with_fallback;
use super::validation::{
    validate_reading, IncompleteProfile, ProfileDraft, ProfileValidationError,
};

/// Service composing validation, the model/scorer strategy, and the repository.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    model: Option<Arc<dyn AssessmentModel>>,
    policy: ReassessmentPolicy,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: ReassessmentPolicy) -> Self {
        Self {
            repository,
            model: None,
            policy,
        }
    }

    pub fn with_model(mut self, model: Arc<dyn AssessmentModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn policy(&self) -> &ReassessmentPolicy {
        &self.policy
    }

    /// Validate inputs, assess, and append the result to the user's history.
    pub fn assess(
        &self,
        user_id: &UserId,
        draft: ProfileDraft,
        reading: EnvironmentalReading,
        location: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let validation = validate_reading(&reading);
        if !validation.is_valid() {
            return Err(AssessmentServiceError::InvalidReading {
                errors: validation.errors,
            });
        }
        for warning in &validation.warnings {
            warn!(user = %user_id.0, %warning, "environmental reading accepted with warning");
        }

        draft.validate()?;
        let profile = draft.into_profile()?;

        let request = AssessmentRequest {
            profile,
            reading,
            location,
        };
        let outcome = assess_with_fallback(self.model.as_deref(), &request);

        let record = AssessmentRecord {
            id: next_assessment_id(),
            user_id: user_id.clone(),
            reading,
            assessment: outcome.assessment,
            generated_by: outcome.generated_by,
            location: request.location,
            assessed_at: now,
        };

        let stored = self.repository.append(record)?;
        info!(
            user = %user_id.0,
            assessment = %stored.id.0,
            risk_score = stored.assessment.risk_score,
            generated_by = stored.generated_by.label(),
            "health risk assessment stored"
        );
        Ok(stored)
    }

    pub fn latest(&self, user_id: &UserId) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.repository
            .latest(user_id)?
            .ok_or(AssessmentServiceError::NoPreviousAssessment)
    }

    pub fn history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.history(user_id, limit)?)
    }

    /// Decide whether the latest stored assessment should be refreshed.
    pub fn reassessment(
        &self,
        user_id: &UserId,
        current: Option<&EnvironmentalReading>,
        now: DateTime<Utc>,
    ) -> Result<ReassessmentDecision, AssessmentServiceError> {
        let last = self.repository.latest(user_id)?;
        Ok(self.policy.evaluate(last.as_ref(), current, now))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("invalid environmental reading: {}", .errors.join("; "))]
    InvalidReading { errors: Vec<String> },
    #[error(transparent)]
    IncompleteProfile(#[from] IncompleteProfile),
    #[error(transparent)]
    InvalidProfile(#[from] ProfileValidationError),
    #[error("no previous assessment found")]
    NoPreviousAssessment,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
