//! Expected-profit planning for booked flights.
//!
//! Airports, aircraft and flight bookings are read from delimited text files;
//! each flight's profit is booking revenue minus the distance-based running cost.

pub mod app;
pub mod domain;
pub mod infra;
pub mod util;
