use log::warn;
use thiserror::Error;

use super::entities::{AircraftCode, AircraftTable, AirportCode, AirportTable, FlightRecord};

/// Reasons a flight is left out of the profit calculation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Rejection {
    #[error("unknown aircraft code {0}")]
    UnknownAircraft(AircraftCode),
    #[error("unknown destination airport code {0}")]
    UnknownAirport(AirportCode),
    #[error("overbooked: {booked} seats booked, aircraft holds {capacity}")]
    Overbooked { booked: u64, capacity: u32 },
    #[error("no distance known for destination airport {0}")]
    MissingDistance(AirportCode),
}

/// Intermediate figures of a successful profit calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfitBreakdown {
    pub revenue: f64,
    pub distance: f64,
    pub seats_booked: u64,
    pub total_cost: f64,
    /// Revenue minus total cost, rounded to whole cents.
    pub profit: f64,
}

pub type FlightEvaluation = Result<ProfitBreakdown, Rejection>;

/// Runs the full calculation and keeps the reason when a flight is rejected.
pub fn evaluate_flight(
    flight: &FlightRecord,
    airports: &AirportTable,
    aircraft: &AircraftTable,
) -> FlightEvaluation {
    let plane = aircraft
        .get(&flight.aircraft)
        .ok_or_else(|| Rejection::UnknownAircraft(flight.aircraft.clone()))?;
    let destination = airports
        .get(&flight.destination)
        .ok_or_else(|| Rejection::UnknownAirport(flight.destination.clone()))?;

    let revenue = flight.revenue();

    let seats_booked = flight.total_seats_booked();
    if seats_booked > u64::from(plane.total_seats) {
        return Err(Rejection::Overbooked {
            booked: seats_booked,
            capacity: plane.total_seats,
        });
    }

    let distance = destination
        .applicable_distance()
        .ok_or_else(|| Rejection::MissingDistance(destination.code.clone()))?;

    let total_cost = plane.cost_per_seat(distance) * seats_booked as f64;

    Ok(ProfitBreakdown {
        revenue,
        distance,
        seats_booked,
        total_cost,
        profit: round_to_cents(revenue - total_cost),
    })
}

/// Expected profit of a flight, or `0.0` when the flight cannot be evaluated.
pub fn calculate_profit(
    flight: &FlightRecord,
    airports: &AirportTable,
    aircraft: &AircraftTable,
) -> f64 {
    profit_or_zero(flight, &evaluate_flight(flight, airports, aircraft))
}

/// Collapses an evaluation to its profit, logging the rejection if there is one.
pub fn profit_or_zero(flight: &FlightRecord, evaluation: &FlightEvaluation) -> f64 {
    match evaluation {
        Ok(breakdown) => breakdown.profit,
        Err(rejection) => {
            warn!("Invalid flight {}: {rejection}", flight.route_label());
            0.0
        }
    }
}

pub fn round_to_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    // Avoid printing "-0.00" for tiny losses.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Totals over one reporting run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub flights: usize,
    pub evaluated: usize,
    pub rejected: usize,
    pub total_profit: f64,
}

impl RunSummary {
    pub fn record(&mut self, evaluation: &FlightEvaluation) {
        self.flights += 1;
        match evaluation {
            Ok(breakdown) => {
                self.evaluated += 1;
                self.total_profit = round_to_cents(self.total_profit + breakdown.profit);
            }
            Err(_) => self.rejected += 1,
        }
    }
}
