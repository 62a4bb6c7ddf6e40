mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logging;
mod output;
mod source;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use config::Config;
use error::AppError;

fn try_main() -> Result<(), AppError> {
    let loaded = Config::load();
    let cli = Cli::parse().with_config(&loaded.config);

    logging::init_logging(&cli.log_config())?;
    loaded.report();

    app::run(&cli)
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
