use crate::infra::{print_json, read_input, render_assessment, ProfileArgs, ReadingArgs};
use airwell::assessment::batch::peak;
use airwell::assessment::{
    classify_aqi, extract_json_payload, reconcile, score, score_readings_from_path,
    validate_reading, AssessmentServiceError, EnvironmentalReading, ReadingValidation,
};
use airwell::error::AppError;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    #[command(flatten)]
    pub(crate) reading: ReadingArgs,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReconcileArgs {
    /// Model reply to sanitize; Markdown code fences are tolerated
    #[arg(default_value = "-")]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct AqiArgs {
    /// AQI value on the 0-500 scale
    pub(crate) aqi: f64,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    #[command(flatten)]
    pub(crate) reading: ReadingArgs,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with aqi, pm25 and pm10 columns (location and recorded_at optional)
    pub(crate) csv: PathBuf,
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let profile = args.profile.into_profile()?;
    let reading = EnvironmentalReading::from(args.reading);
    for warning in validate_reading(&reading).warnings {
        warn!(%warning, "scoring reading with warning");
    }

    let assessment = score(&profile, &reading);
    if args.json {
        return print_json(&assessment);
    }
    render_assessment(&assessment);
    Ok(())
}

pub(crate) fn run_reconcile(args: ReconcileArgs) -> Result<(), AppError> {
    let reply = read_input(&args.input)?;
    let raw = extract_json_payload(&reply)?;
    let assessment = reconcile(&raw)?;
    print_json(&assessment)
}

pub(crate) fn run_aqi(args: AqiArgs) -> Result<(), AppError> {
    let info = classify_aqi(args.aqi);
    if args.json {
        return print_json(&info);
    }
    println!("AQI {} -> {} ({})", args.aqi, info.level, info.color);
    println!("{}", info.health_implications);
    println!("Recommendation: {}", info.recommendations);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    reading: ReadingValidation,
    profile: airwell::assessment::ProfileCompleteness,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_error: Option<String>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let reading = EnvironmentalReading::from(args.reading);
    let draft = args.profile.into_draft()?;
    let report = ValidationReport {
        reading: validate_reading(&reading),
        profile: draft.completeness(),
        profile_error: draft.validate().err().map(|err| err.to_string()),
    };

    if args.json {
        print_json(&report)?;
    } else {
        render_validation(&report);
    }

    if !report.reading.is_valid() {
        return Err(AssessmentServiceError::InvalidReading {
            errors: report.reading.errors,
        }
        .into());
    }
    Ok(())
}

fn render_validation(report: &ValidationReport) {
    let status = if report.reading.is_valid() {
        "valid"
    } else {
        "invalid"
    };
    match report.reading.severity {
        Some(severity) => println!("Reading: {status} (AQI severity {})", severity.as_str()),
        None => println!("Reading: {status}"),
    }
    for error in &report.reading.errors {
        println!("  error: {error}");
    }
    for warning in &report.reading.warnings {
        println!("  warning: {warning}");
    }

    println!(
        "Profile: {}% complete",
        report.profile.completion_percentage
    );
    if !report.profile.missing_fields.is_empty() {
        println!("  missing: {}", report.profile.missing_fields.join(", "));
    }
    if let Some(error) = &report.profile_error {
        println!("  error: {error}");
    }
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let profile = args.profile.into_profile()?;
    let entries = score_readings_from_path(&args.csv, &profile)?;
    let scored = entries
        .iter()
        .filter(|entry| entry.assessment.is_some())
        .count();
    info!(
        path = %args.csv.display(),
        rows = entries.len(),
        scored,
        "readings export scored"
    );

    if args.json {
        return print_json(&entries);
    }

    println!("Scored {scored} of {} readings", entries.len());
    for entry in &entries {
        let when = entry
            .recorded_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let location = entry.location.as_deref().unwrap_or("-");
        match &entry.assessment {
            Some(assessment) => println!(
                "  line {:>3} | {when} | {location} | AQI {} -> {} ({})",
                entry.line,
                entry.reading.aqi,
                assessment.risk_score,
                assessment.risk_level.label()
            ),
            None => println!(
                "  line {:>3} | {when} | {location} | skipped: {}",
                entry.line,
                entry.validation.errors.join("; ")
            ),
        }
    }

    if let Some(worst) = peak(&entries) {
        if let Some(assessment) = &worst.assessment {
            println!(
                "Peak risk on line {}: {} ({})",
                worst.line,
                assessment.risk_score,
                assessment.risk_level.label()
            );
            for recommendation in &assessment.recommendations {
                println!("  - {recommendation}");
            }
        }
    }
    Ok(())
}
