//! Console presentation of evaluated flights.

use std::io::{self, Write};

use super::entities::{AircraftTable, AirportTable, FlightRecord, SeatClass};
use super::evaluation::{evaluate_flight, profit_or_zero, FlightEvaluation, RunSummary};

/// Formats an amount with two decimals, sign in front of the currency symbol.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{symbol}{:.2}", amount.abs())
    } else {
        format!("{symbol}{amount:.2}")
    }
}

/// Text block describing a single flight and its expected profit.
pub fn format_flight_details(
    flight: &FlightRecord,
    evaluation: &FlightEvaluation,
    profit: f64,
    currency_symbol: &str,
) -> String {
    let mut details = format!(
        "Flight from {} to {} ({}):\n",
        flight.origin, flight.destination, flight.aircraft
    );
    for class in SeatClass::ALL {
        details.push_str(&format!(
            "    {} Seats Booked: {},\n",
            class.label(),
            flight.seats_booked(class)
        ));
    }
    details.push_str(&format!(
        "    Expected Profit: {}\n",
        format_currency(profit, currency_symbol)
    ));
    if let Err(rejection) = evaluation {
        details.push_str(&format!("    Not evaluated: {rejection}\n"));
    }
    details
}

/// Evaluates every flight in load order and writes one block per flight,
/// followed by a totals line.
pub fn output_flight_details<W: Write>(
    out: &mut W,
    flights: &[FlightRecord],
    airports: &AirportTable,
    aircraft: &AircraftTable,
    currency_symbol: &str,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for flight in flights {
        let evaluation = evaluate_flight(flight, airports, aircraft);
        let profit = profit_or_zero(flight, &evaluation);
        writeln!(
            out,
            "{}",
            format_flight_details(flight, &evaluation, profit, currency_symbol)
        )?;
        summary.record(&evaluation);
    }

    writeln!(
        out,
        "{} flights: {} evaluated, {} not evaluated. Total expected profit: {}",
        summary.flights,
        summary.evaluated,
        summary.rejected,
        format_currency(summary.total_profit, currency_symbol)
    )?;
    out.flush()?;

    Ok(summary)
}
