use serde_json::json;

use super::common::*;
use crate::assessment::domain::RiskLevel;
use crate::assessment::model::{AssessmentModel, AssessmentRequest};
use crate::assessment::scoring::score;
use crate::assessment::strategy::{assess_with_fallback, GeneratedBy};

fn request() -> AssessmentRequest {
    AssessmentRequest {
        profile: asthmatic_senior(),
        reading: hazardous_air(),
        location: Some("Quezon City".to_string()),
    }
}

#[test]
fn without_model_scores_directly() {
    let request = request();

    let outcome = assess_with_fallback(None, &request);

    assert_eq!(outcome.generated_by, GeneratedBy::RuleBased);
    assert_eq!(outcome.assessment, score(&request.profile, &request.reading));
    assert!(outcome.fallback_reason.is_none());
}

#[test]
fn well_formed_model_reply_is_reconciled() {
    let model = ScriptedModel::replying(json!({
        "riskScore": 78,
        "riskLevel": "high",
        "breakdown": {"environmental": 40, "age": 20, "healthConditions": 8, "lifestyle": 12},
        "recommendations": ["Run an air purifier in the bedroom."],
        "insights": ["Your asthma raises sensitivity to PM2.5."],
    }));

    let outcome = assess_with_fallback(Some(&model as &dyn AssessmentModel), &request());

    assert_eq!(model.calls(), 1);
    assert_eq!(outcome.generated_by, GeneratedBy::GenerativeModel);
    assert_eq!(outcome.assessment.risk_score, 78);
    assert_eq!(outcome.assessment.risk_level, RiskLevel::VeryHigh);
    assert_eq!(outcome.assessment.insights.len(), 1);
}

#[test]
fn malformed_model_reply_falls_back() {
    let model = ScriptedModel::replying(json!({"riskScore": 78, "riskLevel": "high"}));
    let request = request();

    let outcome = assess_with_fallback(Some(&model as &dyn AssessmentModel), &request);

    assert_eq!(outcome.generated_by, GeneratedBy::RuleBasedFallback);
    assert_eq!(outcome.assessment, score(&request.profile, &request.reading));
    let reason = outcome.fallback_reason.expect("reason recorded");
    assert!(reason.contains("breakdown"), "unexpected reason: {reason}");
}

#[test]
fn model_failure_falls_back() {
    let model = ScriptedModel::failing("quota exhausted");

    let outcome = assess_with_fallback(Some(&model as &dyn AssessmentModel), &request());

    assert_eq!(outcome.generated_by, GeneratedBy::RuleBasedFallback);
    assert_eq!(outcome.assessment.risk_score, 75);
    assert!(outcome
        .fallback_reason
        .is_some_and(|reason| reason.contains("quota exhausted")));
}

#[test]
fn provenance_serializes_with_stored_labels() {
    let json = serde_json::to_string(&GeneratedBy::RuleBasedFallback).expect("serializes");
    assert_eq!(json, "\"Rule-based (AI fallback)\"");
    let parsed: GeneratedBy = serde_json::from_str("\"Gemini AI\"").expect("parses");
    assert!(parsed.is_model_generated());
}
