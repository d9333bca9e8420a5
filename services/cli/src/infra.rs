use airwell::assessment::{
    extract_json_payload, AssessmentModel, AssessmentRecord, AssessmentRepository,
    AssessmentRequest, AssessmentServiceError, EnvironmentalReading, Gender, HealthProfile,
    ModelError, OutdoorExposure, ProfileDraft, RepositoryError, RiskAssessment, UserId,
};
use airwell::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct ProfileArgs {
    /// JSON health profile (camelCase fields). Flags below override its values.
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Age in years (1-120)
    #[arg(long)]
    pub(crate) age: Option<u8>,
    /// male, female, other or prefer_not_to_say
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Option<Gender>,
    /// Outdoor exposure: low, moderate or high
    #[arg(long = "exposure", value_parser = parse_exposure)]
    pub(crate) outdoor_exposure: Option<OutdoorExposure>,
    #[arg(long)]
    pub(crate) pregnant: bool,
    #[arg(long)]
    pub(crate) smoker: bool,
    #[arg(long)]
    pub(crate) asthma: bool,
    #[arg(long)]
    pub(crate) heart_disease: bool,
    #[arg(long)]
    pub(crate) respiratory_issues: bool,
}

impl ProfileArgs {
    pub(crate) fn into_draft(self) -> Result<ProfileDraft, AppError> {
        let mut draft = match &self.profile {
            Some(path) => serde_json::from_str::<ProfileDraft>(&read_input(path)?)?,
            None => ProfileDraft::default(),
        };

        if self.age.is_some() {
            draft.age = self.age;
        }
        if self.gender.is_some() {
            draft.gender = self.gender;
        }
        if self.outdoor_exposure.is_some() {
            draft.outdoor_exposure = self.outdoor_exposure;
        }
        let flags = [
            (self.pregnant, &mut draft.is_pregnant),
            (self.smoker, &mut draft.is_smoker),
            (self.asthma, &mut draft.has_asthma),
            (self.heart_disease, &mut draft.has_heart_disease),
            (self.respiratory_issues, &mut draft.has_respiratory_issues),
        ];
        for (set, field) in flags {
            if set {
                *field = Some(true);
            }
        }

        Ok(draft)
    }

    /// Resolve to a scoreable profile, rejecting incomplete or out-of-range input.
    pub(crate) fn into_profile(self) -> Result<HealthProfile, AppError> {
        let draft = self.into_draft()?;
        draft.validate().map_err(AssessmentServiceError::from)?;
        Ok(draft
            .into_profile()
            .map_err(AssessmentServiceError::from)?)
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct ReadingArgs {
    /// US EPA air quality index (0-500)
    #[arg(long)]
    pub(crate) aqi: f64,
    /// PM2.5 concentration in µg/m³
    #[arg(long)]
    pub(crate) pm25: f64,
    /// PM10 concentration in µg/m³
    #[arg(long)]
    pub(crate) pm10: f64,
}

impl From<ReadingArgs> for EnvironmentalReading {
    fn from(args: ReadingArgs) -> Self {
        EnvironmentalReading {
            aqi: args.aqi,
            pm25: args.pm25,
            pm10: args.pm10,
        }
    }
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        "prefer_not_to_say" => Ok(Gender::PreferNotToSay),
        other => Err(format!("unknown gender '{other}'")),
    }
}

pub(crate) fn parse_exposure(raw: &str) -> Result<OutdoorExposure, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "low" => Ok(OutdoorExposure::Low),
        "moderate" | "medium" => Ok(OutdoorExposure::Moderate),
        "high" => Ok(OutdoorExposure::High),
        other => Err(format!("unknown outdoor exposure '{other}'")),
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}

/// Read a file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, std::io::Error> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "Risk score {} ({}, {})",
        assessment.risk_score,
        assessment.risk_level.label(),
        assessment.risk_level.color()
    );
    println!("Breakdown:");
    for category in airwell::assessment::RiskCategory::ALL {
        println!(
            "  - {}: {}/{}",
            category.key(),
            assessment.breakdown.get(category),
            category.max()
        );
    }
    println!("Recommendations:");
    for recommendation in &assessment.recommendations {
        println!("  - {recommendation}");
    }
    if !assessment.insights.is_empty() {
        println!("Insights:");
        for insight in &assessment.insights {
            println!("  - {insight}");
        }
    }
}

/// Process-local history store; the CLI keeps nothing between runs.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<UserId, Vec<AssessmentRecord>>>>,
}

impl InMemoryAssessmentRepository {
    fn with_records<T>(
        &self,
        f: impl FnOnce(&mut HashMap<UserId, Vec<AssessmentRecord>>) -> T,
    ) -> Result<T, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn append(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        self.with_records(|records| {
            let history = records.entry(record.user_id.clone()).or_default();
            if history.iter().any(|existing| existing.id == record.id) {
                return Err(RepositoryError::Conflict);
            }
            history.push(record.clone());
            Ok(record)
        })?
    }

    fn latest(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        self.with_records(|records| {
            records
                .get(user_id)
                .and_then(|history| history.last())
                .cloned()
        })
    }

    fn history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        self.with_records(|records| {
            records
                .get(user_id)
                .map(|history| history.iter().rev().take(limit).cloned().collect())
                .unwrap_or_default()
        })
    }
}

/// Model client that answers every request with a recorded reply.
pub(crate) struct ReplayModel {
    name: String,
    reply: String,
}

impl ReplayModel {
    pub(crate) fn new(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: reply.into(),
        }
    }

    pub(crate) fn from_path(name: impl Into<String>, path: &Path) -> Result<Self, AppError> {
        Ok(Self::new(name, read_input(path)?))
    }
}

impl AssessmentModel for ReplayModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, _request: &AssessmentRequest) -> Result<Value, ModelError> {
        extract_json_payload(&self.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwell::assessment::{assess_with_fallback, GeneratedBy};

    #[test]
    fn flags_override_profile_fields() {
        let args = ProfileArgs {
            age: Some(40),
            gender: Some(Gender::Female),
            outdoor_exposure: Some(OutdoorExposure::Moderate),
            smoker: true,
            ..ProfileArgs::default()
        };
        let profile = args.into_profile().expect("complete profile");
        assert_eq!(profile.age, 40);
        assert!(profile.is_smoker);
        assert!(!profile.has_asthma);
    }

    #[test]
    fn incomplete_profile_is_rejected() {
        let args = ProfileArgs {
            age: Some(40),
            ..ProfileArgs::default()
        };
        let err = args.into_profile().expect_err("gender and exposure missing");
        assert!(err.to_string().contains("gender, outdoorExposure"));
    }

    #[test]
    fn value_parsers_accept_common_spellings() {
        assert_eq!(parse_gender("Prefer-Not-To-Say"), Ok(Gender::PreferNotToSay));
        assert_eq!(parse_exposure("medium"), Ok(OutdoorExposure::Moderate));
        assert!(parse_exposure("constant").is_err());
        assert!(parse_timestamp("2025-11-01").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn replay_model_reply_goes_through_reconciler() {
        let model = ReplayModel::new(
            "replay",
            "```json\n{\"riskScore\": 20, \"riskLevel\": \"low\", \"breakdown\": {\"environmental\": 10, \"age\": 0, \"healthConditions\": 0, \"lifestyle\": 10}, \"recommendations\": [\"Stay hydrated\"], \"insights\": []}\n```",
        );
        let request = AssessmentRequest {
            profile: HealthProfile {
                age: 30,
                gender: Gender::Male,
                is_pregnant: false,
                is_smoker: false,
                has_asthma: false,
                has_heart_disease: false,
                has_respiratory_issues: false,
                outdoor_exposure: OutdoorExposure::Low,
            },
            reading: EnvironmentalReading {
                aqi: 60.0,
                pm25: 12.0,
                pm10: 20.0,
            },
            location: None,
        };

        let outcome = assess_with_fallback(Some(&model), &request);
        assert_eq!(outcome.generated_by, GeneratedBy::GenerativeModel);
        assert_eq!(outcome.assessment.risk_score, 20);
    }
}
