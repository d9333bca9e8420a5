use crate::commands::{
    run_aqi, run_batch, run_reconcile, run_score, run_validate, AqiArgs, BatchArgs,
    ReconcileArgs, ScoreArgs, ValidateArgs,
};
use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use airwell::config::AppConfig;
use airwell::error::AppError;
use airwell::telemetry;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "airwell",
    about = "Score personal health risk from air-quality readings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a health profile against a reading with the rule-based engine
    Score(ScoreArgs),
    /// Sanitize a model-generated assessment (JSON file, or `-` for stdin)
    Reconcile(ReconcileArgs),
    /// Run the full assessment flow: validation, model with fallback, history
    Assess(AssessArgs),
    /// Classify an AQI value into its EPA category
    Aqi(AqiArgs),
    /// Check a reading and profile before scoring
    Validate(ValidateArgs),
    /// Score every reading in a CSV export for one profile
    Batch(BatchArgs),
    /// Walk through a scripted assessment session
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, model_enabled = config.model.enabled, "configuration loaded");

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Reconcile(args) => run_reconcile(args),
        Command::Assess(args) => run_assess(args, &config),
        Command::Aqi(args) => run_aqi(args),
        Command::Validate(args) => run_validate(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args, &config),
    }
}
