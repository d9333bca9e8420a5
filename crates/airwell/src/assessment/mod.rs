//! Health-risk assessment: the deterministic scorer, the reconciler for model-generated
//! assessments, the AQI lookup table, and the caller layer built around them.
//!
//! `scoring`, `reconcile` and `aqi` are pure and perform no I/O. Everything that talks to a
//! model client or a repository goes through [`AssessmentService`] or
//! [`assess_with_fallback`].

pub mod aqi;
pub mod batch;
pub mod domain;
pub mod freshness;
pub mod model;
pub mod reconcile;
pub mod repository;
pub mod scoring;
pub mod service;
pub mod strategy;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aqi::{classify_aqi, AqiInfo, AqiSeverity};
pub use batch::{score_readings, score_readings_from_path, BatchEntry};
pub use domain::{
    EnvironmentalReading, Gender, HealthProfile, OutdoorExposure, RiskAssessment, RiskBreakdown,
    RiskCategory, RiskLevel,
};
pub use freshness::{AssessmentFreshness, ReassessmentDecision, ReassessmentPolicy};
pub use model::{extract_json_payload, AssessmentModel, AssessmentRequest, ModelError};
pub use reconcile::{reconcile, MalformedAssessmentError};
pub use repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentSummaryView,
    RepositoryError, UserId,
};
pub use scoring::{recommendations_for, score};
pub use service::{AssessmentService, AssessmentServiceError};
pub use strategy::{assess_with_fallback, AssessmentOutcome, GeneratedBy};
pub use validation::{
    validate_reading, IncompleteProfile, ProfileCompleteness, ProfileDraft,
    ProfileValidationError, ReadingValidation,
};
