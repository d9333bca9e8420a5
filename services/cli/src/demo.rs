use crate::infra::{
    parse_timestamp, print_json, render_assessment, InMemoryAssessmentRepository, ProfileArgs,
    ReadingArgs, ReplayModel,
};
use airwell::assessment::{
    classify_aqi, AssessmentService, EnvironmentalReading, Gender, OutdoorExposure, ProfileDraft,
    UserId,
};
use airwell::config::AppConfig;
use airwell::error::AppError;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    #[command(flatten)]
    pub(crate) reading: ReadingArgs,
    /// Location label stored with the assessment
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// User the assessment is recorded for
    #[arg(long, default_value = "local")]
    pub(crate) user: String,
    /// Recorded model reply to use instead of the rule-based engine
    #[arg(long)]
    pub(crate) model_reply: Option<PathBuf>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Session start time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Skip the model-backed steps and use the rule-based engine throughout.
    #[arg(long)]
    pub(crate) skip_model: bool,
}

pub(crate) fn run_assess(args: AssessArgs, config: &AppConfig) -> Result<(), AppError> {
    let AssessArgs {
        profile,
        reading,
        location,
        user,
        model_reply,
        json,
    } = args;

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let mut service = AssessmentService::new(repository, config.reassessment);
    match model_reply {
        Some(path) if config.model.enabled => {
            let model = ReplayModel::from_path(config.model.name.clone(), &path)?;
            service = service.with_model(Arc::new(model));
        }
        Some(_) => debug!("model disabled by configuration; ignoring recorded reply"),
        None => debug!("no model reply supplied; using rule-based engine"),
    }

    let now = Utc::now();
    let record = service.assess(
        &UserId(user),
        profile.into_draft()?,
        EnvironmentalReading::from(reading),
        location,
        now,
    )?;

    if json {
        return print_json(&record);
    }
    println!(
        "Assessment {} for {} ({})",
        record.id.0,
        record.user_id.0,
        record.generated_by.label()
    );
    render_assessment(&record.assessment);
    Ok(())
}

const MODEL_REPLY: &str = r#"```json
{
  "riskScore": 96,
  "riskLevel": "high",
  "breakdown": {
    "environmental": 48,
    "age": 15,
    "healthConditions": "8 points",
    "lifestyle": 12.7
  },
  "recommendations": [
    "Stay indoors with windows closed until the evening reading improves",
    "Carry your reliever inhaler on any trip outside"
  ],
  "insights": [
    "PM2.5 is the dominant pollutant at your location today"
  ]
}
```"#;

const TRUNCATED_MODEL_REPLY: &str = r#"{"riskScore": 70, "riskLevel": "high", "breakdown": {}}"#;

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs { now, skip_model } = args;
    let start = now.unwrap_or_else(Utc::now);
    let use_model = config.model.enabled && !skip_model;

    let user = UserId("demo-user".to_string());
    let draft = ProfileDraft {
        age: Some(70),
        gender: Some(Gender::Female),
        has_asthma: Some(true),
        outdoor_exposure: Some(OutdoorExposure::High),
        ..ProfileDraft::default()
    };
    let morning = EnvironmentalReading {
        aqi: 312.0,
        pm25: 210.0,
        pm10: 260.0,
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let mut first_pass = AssessmentService::new(repository.clone(), config.reassessment);
    let mut second_pass = AssessmentService::new(repository.clone(), config.reassessment);
    if use_model {
        first_pass = first_pass.with_model(Arc::new(ReplayModel::new(
            config.model.name.clone(),
            MODEL_REPLY,
        )));
        second_pass = second_pass.with_model(Arc::new(ReplayModel::new(
            config.model.name.clone(),
            TRUNCATED_MODEL_REPLY,
        )));
    }

    println!("Air quality health-risk demo");
    let air = classify_aqi(morning.aqi);
    println!(
        "- Morning reading: AQI {} ({}), PM2.5 {}, PM10 {}",
        morning.aqi, air.level, morning.pm25, morning.pm10
    );
    let completeness = draft.completeness();
    println!(
        "- Profile: age 70, asthma, high outdoor exposure ({}% complete)",
        completeness.completion_percentage
    );

    let policy = first_pass.policy();
    println!(
        "- Reassess after {} hours or an AQI change above {}",
        policy.max_age_hours, policy.aqi_delta
    );

    let decision = first_pass.reassessment(&user, Some(&morning), start)?;
    println!("\nReassessment check: {}", decision.reason);

    let record = first_pass.assess(
        &user,
        draft.clone(),
        morning,
        Some("Delhi".to_string()),
        start,
    )?;
    println!(
        "\nAssessment {} ({})",
        record.id.0,
        record.generated_by.label()
    );
    render_assessment(&record.assessment);

    let later = start + Duration::hours(2);
    let decision = first_pass.reassessment(&user, Some(&morning), later)?;
    println!(
        "\nTwo hours later with the same reading: {}",
        decision.reason
    );
    let evening = EnvironmentalReading {
        aqi: 168.0,
        pm25: 88.0,
        pm10: 120.0,
    };
    let decision = first_pass.reassessment(&user, Some(&evening), later)?;
    println!(
        "Two hours later with AQI {}: {}",
        evening.aqi, decision.reason
    );

    let next_day = start + Duration::hours(14);
    let decision = second_pass.reassessment(&user, Some(&evening), next_day)?;
    println!("\nFourteen hours later: {}", decision.reason);
    let record = second_pass.assess(&user, draft, evening, Some("Delhi".to_string()), next_day)?;
    println!(
        "Assessment {} ({})",
        record.id.0,
        record.generated_by.label()
    );
    render_assessment(&record.assessment);

    let report_time = next_day + Duration::hours(30);
    println!("\nHistory as of {}", report_time.format("%Y-%m-%d %H:%M UTC"));
    for record in second_pass.history(&user, 10)? {
        let view = record.summary_view(report_time);
        println!(
            "  - {} | {} | score {} ({}) | {}{}",
            view.assessment_id.0,
            view.freshness,
            view.risk_score,
            view.risk_level,
            view.generated_by,
            if view.ai_generated { " [AI]" } else { "" }
        );
    }

    Ok(())
}
