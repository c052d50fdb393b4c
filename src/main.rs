use std::{env, io, path::PathBuf, process::ExitCode};

use log::{error, info};

use flight_profit_planner::{
    app,
    util::{
        config::load_config,
        logger,
        version::{version_label, APP_NAME},
    },
};

fn main() -> ExitCode {
    let data_dir = match env::args_os().nth(1) {
        Some(arg) if arg == "--version" || arg == "-V" => {
            println!("{APP_NAME} {}", version_label());
            return ExitCode::SUCCESS;
        }
        arg => arg.map(PathBuf::from),
    };

    let (config, source) = match load_config() {
        Ok(loaded) => loaded,
        Err(err) => {
            // The configured level is unknown here, so fall back to the env override or info.
            let _ = logger::init(logger::resolve_level(log::LevelFilter::Info));
            error!("Unusable configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    if let Err(err) = logger::init(logger::resolve_level(level)) {
        eprintln!("Failed to initialise logging: {err}");
    }

    info!("{APP_NAME} {}", version_label());
    match &source {
        Some(path) => info!("Using configuration from {}", path.display()),
        None => info!("Using default configuration"),
    }

    let config = match data_dir {
        Some(dir) => config.with_data_dir(&dir),
        None => config,
    };

    let stdout = io::stdout();
    match app::run(&config, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
