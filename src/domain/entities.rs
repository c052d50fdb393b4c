use std::collections::HashMap;

/// Identifier for airports as it appears in the data files (e.g. `JFK`).
pub type AirportCode = String;

/// Identifier for aircraft types (e.g. `A320`).
pub type AircraftCode = String;

/// Airports keyed by code. Later rows overwrite earlier ones with the same code.
pub type AirportTable = HashMap<AirportCode, Airport>;

/// Aircraft keyed by code. Later rows overwrite earlier ones with the same code.
pub type AircraftTable = HashMap<AircraftCode, Aircraft>;

#[derive(Clone, Debug, PartialEq)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    /// Distance from the first origin airport. `None` when the field was empty or unparsable.
    pub distance_from_origin_a: Option<f64>,
    /// Distance from the second origin airport. `None` when the field was empty or unparsable.
    pub distance_from_origin_b: Option<f64>,
}

impl Airport {
    /// Distance used for costing: origin A whenever it is known (zero included),
    /// origin B only when A is missing.
    pub fn applicable_distance(&self) -> Option<f64> {
        self.distance_from_origin_a.or(self.distance_from_origin_b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Aircraft {
    pub code: AircraftCode,
    /// Operating cost per 100 units of flight distance, per seat.
    pub running_cost: f64,
    pub max_range: f64,
    pub total_seats: u32,
}

impl Aircraft {
    /// Cost of carrying one booked seat over `distance`.
    pub fn cost_per_seat(&self, distance: f64) -> f64 {
        (self.running_cost / 100.0) * distance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatClass {
    Economy,
    Business,
    First,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [SeatClass::Economy, SeatClass::Business, SeatClass::First];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Business => "Business",
            Self::First => "First Class",
        }
    }
}

/// One booked flight as loaded from the flights file.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightRecord {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub aircraft: AircraftCode,
    pub economy_seats: u32,
    pub business_seats: u32,
    pub first_class_seats: u32,
    pub economy_price: f64,
    pub business_price: f64,
    pub first_class_price: f64,
}

impl FlightRecord {
    /// Booked seats and unit price for every seat class.
    pub fn seat_bookings(&self) -> [(SeatClass, u32, f64); 3] {
        [
            (SeatClass::Economy, self.economy_seats, self.economy_price),
            (SeatClass::Business, self.business_seats, self.business_price),
            (SeatClass::First, self.first_class_seats, self.first_class_price),
        ]
    }

    pub fn seats_booked(&self, class: SeatClass) -> u32 {
        match class {
            SeatClass::Economy => self.economy_seats,
            SeatClass::Business => self.business_seats,
            SeatClass::First => self.first_class_seats,
        }
    }

    /// Seats booked across all classes. Widened so large counts cannot overflow.
    pub fn total_seats_booked(&self) -> u64 {
        self.seat_bookings()
            .iter()
            .map(|(_, seats, _)| u64::from(*seats))
            .sum()
    }

    pub fn revenue(&self) -> f64 {
        self.seat_bookings()
            .iter()
            .map(|(_, seats, price)| f64::from(*seats) * price)
            .sum()
    }

    /// Short human-readable identifier used in diagnostics.
    pub fn route_label(&self) -> String {
        format!("{} -> {} ({})", self.origin, self.destination, self.aircraft)
    }
}
