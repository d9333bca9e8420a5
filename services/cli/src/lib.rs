mod cli;
mod commands;
mod demo;
mod infra;

use airwell::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
