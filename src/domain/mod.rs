//! Flight data model, profit calculation and reporting.

pub mod entities;
pub mod evaluation;
pub mod report;

pub use entities::{
    Aircraft, AircraftCode, AircraftTable, Airport, AirportCode, AirportTable, FlightRecord,
    SeatClass,
};
pub use evaluation::{
    calculate_profit, evaluate_flight, FlightEvaluation, ProfitBreakdown, Rejection, RunSummary,
};
pub use report::{format_currency, format_flight_details, output_flight_details};
