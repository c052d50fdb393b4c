use std::io::Write;

use log::{error, info};

use crate::{
    domain::{output_flight_details, RunSummary},
    infra::{load_aircraft, load_airports, load_flights},
    util::config::{ConfigError, PlannerConfig},
};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Loads airports, aircraft and flights, then reports every flight to `out`.
///
/// Returns `Ok(None)` when no flight data could be loaded; nothing is reported then.
pub fn run<W: Write>(config: &PlannerConfig, out: &mut W) -> Result<Option<RunSummary>, RunError> {
    let delimiter = config.delimiter_byte()?;

    let airports = load_airports(&config.airports_path, delimiter);
    let aircraft = load_aircraft(&config.aircraft_path, delimiter);
    let Some(flights) = load_flights(&config.flights_path, delimiter) else {
        error!("No valid flight data loaded.");
        return Ok(None);
    };
    info!("Loaded {} valid flights.", flights.len());

    let summary =
        output_flight_details(out, &flights, &airports, &aircraft, &config.currency_symbol)?;
    Ok(Some(summary))
}
