mod cli;
mod run;
mod settings;

use std::process::ExitCode;

use tracker_logging::{tracker_error, LogDestination};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match cli::parse(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{err}\n\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let (settings, settings_error) = settings::load_or_default(&invocation.config);
    let destination = match &settings.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    tracker_logging::initialize(destination, settings.log_level);
    settings::report_load(&invocation.config, settings_error.as_ref());

    match run::execute(invocation.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracker_error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
