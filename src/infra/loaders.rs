//! Builds the airport and aircraft lookup tables and the flight list from raw rows.

use std::{path::Path, str::FromStr};

use log::{debug, info, warn};
use thiserror::Error;

use super::delimited::{read_rows, Row};
use crate::domain::{Aircraft, AircraftTable, Airport, AirportTable, FlightRecord};

const AIRPORT_FIELDS: usize = 4;
const AIRCRAFT_FIELDS: usize = 4;
const FLIGHT_FIELDS: usize = 9;

/// Problems with a single data row. The row is dropped, loading continues.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RowError {
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Rows need at least `expected` fields. Extra trailing fields are ignored with a warning.
fn check_len(row: &Row, expected: usize) -> Result<(), RowError> {
    if row.len() < expected {
        return Err(RowError::FieldCount {
            expected,
            found: row.len(),
        });
    }
    if row.len() > expected {
        warn!(
            "Ignoring {} extra field(s) after column {expected}: {}",
            row.len() - expected,
            row.join(", ")
        );
    }
    Ok(())
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RowError> {
    value.parse().map_err(|_| RowError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Like [`parse_field`], but also refuses `NaN` and infinities.
fn parse_amount(field: &'static str, value: &str) -> Result<f64, RowError> {
    let amount: f64 = parse_field(field, value)?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(RowError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

/// Empty text is a missing value. Text that does not parse is also treated as
/// missing, with a warning so the bad value does not go unnoticed.
fn parse_optional_distance(field: &'static str, value: &str, code: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    match parse_amount(field, value) {
        Ok(distance) => Some(distance),
        Err(err) => {
            warn!("Airport {code}: {err}; treating the distance as missing");
            None
        }
    }
}

pub fn airport_from_row(row: &Row) -> Result<Airport, RowError> {
    check_len(row, AIRPORT_FIELDS)?;
    let code = row[1].clone();
    Ok(Airport {
        distance_from_origin_a: parse_optional_distance("distanceFromOriginA", &row[2], &code),
        distance_from_origin_b: parse_optional_distance("distanceFromOriginB", &row[3], &code),
        name: row[0].clone(),
        code,
    })
}

pub fn aircraft_from_row(row: &Row) -> Result<Aircraft, RowError> {
    check_len(row, AIRCRAFT_FIELDS)?;
    Ok(Aircraft {
        code: row[0].clone(),
        running_cost: parse_amount("runningCost", &row[1])?,
        max_range: parse_amount("maxRange", &row[2])?,
        total_seats: parse_field("totalSeats", &row[3])?,
    })
}

pub fn flight_from_row(row: &Row) -> Result<FlightRecord, RowError> {
    check_len(row, FLIGHT_FIELDS)?;
    Ok(FlightRecord {
        origin: row[0].clone(),
        destination: row[1].clone(),
        aircraft: row[2].clone(),
        economy_seats: parse_field("economySeats", &row[3])?,
        business_seats: parse_field("businessSeats", &row[4])?,
        first_class_seats: parse_field("firstClassSeats", &row[5])?,
        economy_price: parse_amount("economyPrice", &row[6])?,
        business_price: parse_amount("businessPrice", &row[7])?,
        first_class_price: parse_amount("firstClassPrice", &row[8])?,
    })
}

/// Converts rows, dropping the ones that fail with a warning naming the data line.
fn convert_rows<T>(
    path: &Path,
    rows: Vec<Row>,
    convert: impl Fn(&Row) -> Result<T, RowError>,
) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match convert(row) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(
                    "Skipping data row {} of {}: {err} ({})",
                    index + 1,
                    path.display(),
                    row.join(", ")
                );
                None
            }
        })
        .collect()
}

/// Loads airports keyed by code. An unreadable file yields an empty table.
pub fn load_airports(path: &Path, delimiter: u8) -> AirportTable {
    let mut airports = AirportTable::new();
    let Some(rows) = read_rows(path, delimiter) else {
        return airports;
    };

    for airport in convert_rows(path, rows, airport_from_row) {
        if let Some(previous) = airports.insert(airport.code.clone(), airport) {
            debug!("Airport {} defined more than once; keeping the last row", previous.code);
        }
    }
    info!("Loaded {} airports.", airports.len());
    airports
}

/// Loads aircraft keyed by code. An unreadable file yields an empty table.
pub fn load_aircraft(path: &Path, delimiter: u8) -> AircraftTable {
    let mut aircraft = AircraftTable::new();
    let Some(rows) = read_rows(path, delimiter) else {
        return aircraft;
    };

    for plane in convert_rows(path, rows, aircraft_from_row) {
        if let Some(previous) = aircraft.insert(plane.code.clone(), plane) {
            debug!("Aircraft {} defined more than once; keeping the last row", previous.code);
        }
    }
    info!("Loaded {} aircraft.", aircraft.len());
    aircraft
}

/// Loads flights in file order. `None` only when the file could not be read.
pub fn load_flights(path: &Path, delimiter: u8) -> Option<Vec<FlightRecord>> {
    let rows = read_rows(path, delimiter)?;
    Some(convert_rows(path, rows, flight_from_row))
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::infra::delimited::{test_support::write_fixture, DEFAULT_DELIMITER};
    use crate::util::logger::capture;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_three_airports_keyed_by_code() {
        let path = write_fixture(
            "Airport name,Airport code,Distance from MAN,Distance from LGW\n\
             John F Kennedy International,JFK,5376,5564\n\
             Paris-Orly,ORY,610,325\n\
             Madrid-Barajas,MAD,1446.5,1256\n",
        );

        let airports = load_airports(&path, DEFAULT_DELIMITER);

        assert_eq!(airports.len(), 3);
        let madrid = &airports["MAD"];
        assert_eq!(madrid.name, "Madrid-Barajas");
        assert_eq!(madrid.distance_from_origin_a, Some(1446.5));
        assert_eq!(madrid.distance_from_origin_b, Some(1256.0));
        assert!(airports.contains_key("JFK"));
        assert!(airports.contains_key("ORY"));
    }

    #[test]
    fn test_duplicate_airport_code_last_row_wins() {
        let path = write_fixture("name,code,a,b\nOld,JFK,1,2\nNew,JFK,3,4\n");

        let airports = load_airports(&path, DEFAULT_DELIMITER);

        assert_eq!(airports.len(), 1);
        assert_eq!(airports["JFK"].name, "New");
        assert_eq!(airports["JFK"].distance_from_origin_a, Some(3.0));
    }

    #[test]
    fn test_airport_distance_missing_or_unparsable_is_none() {
        let airport = airport_from_row(&row(&["Nowhere", "XXX", "", "far"])).unwrap();

        assert_eq!(airport.distance_from_origin_a, None);
        assert_eq!(airport.distance_from_origin_b, None);
    }

    #[test]
    fn test_airport_row_with_wrong_length_is_rejected() {
        assert_eq!(
            airport_from_row(&row(&["Paris-Orly", "ORY", "610"])),
            Err(RowError::FieldCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_trailing_delimiter_keeps_the_row() {
        capture::install();
        let path = write_fixture(
            "name,code,a,b\n\
             Paris-Orly,ORY,610,325\n\
             Dublin,DUB,,465,\n",
        );

        let airports = load_airports(&path, DEFAULT_DELIMITER);

        assert_eq!(airports.len(), 2);
        assert_eq!(airports["DUB"].distance_from_origin_a, None);
        assert_eq!(airports["DUB"].distance_from_origin_b, Some(465.0));
        assert!(!capture::records_matching(
            Level::Warn,
            &["Ignoring 1 extra field(s) after column 4", "Dublin, DUB, , 465, "]
        )
        .is_empty());
    }

    #[test]
    fn test_flight_with_extra_fields_uses_leading_columns() {
        let flight = flight_from_row(&row(&[
            "MAN", "ORY", "E190", "60", "10", "2", "120", "450", "900", "note",
        ]))
        .unwrap();

        assert_eq!(flight.first_class_seats, 2);
        assert!((flight.first_class_price - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aircraft_rows_parsed() {
        let path = write_fixture(
            "Type,Running cost per seat per 100km,Maximum flight range,Total seats\n\
             Medium narrow body,8,2650,180\n\
             Large narrow body,7,5600,220\n",
        );

        let aircraft = load_aircraft(&path, DEFAULT_DELIMITER);

        assert_eq!(aircraft.len(), 2);
        let medium = &aircraft["Medium narrow body"];
        assert!((medium.running_cost - 8.0).abs() < f64::EPSILON);
        assert!((medium.max_range - 2650.0).abs() < f64::EPSILON);
        assert_eq!(medium.total_seats, 180);
    }

    #[test]
    fn test_aircraft_with_bad_number_is_skipped() {
        assert_eq!(
            aircraft_from_row(&row(&["A320", "cheap", "6100", "180"])),
            Err(RowError::InvalidNumber {
                field: "runningCost",
                value: "cheap".to_string()
            })
        );

        let path = write_fixture("code,cost,range,seats\nA320,cheap,6100,180\nE190,1.5,4500,100\n");
        let aircraft = load_aircraft(&path, DEFAULT_DELIMITER);
        assert_eq!(aircraft.len(), 1);
        assert!(aircraft.contains_key("E190"));
    }

    #[test]
    fn test_flights_keep_file_order() {
        let path = write_fixture(
            "origin,destination,aircraft,eco,bus,first,eco price,bus price,first price\n\
             MAN,JFK,A320,100,20,5,100,300,600\n\
             LGW,ORY,E190,60,10,2,120,450,900\n",
        );

        let flights = load_flights(&path, DEFAULT_DELIMITER).unwrap();

        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].destination, "JFK");
        assert_eq!(flights[0].first_class_seats, 5);
        assert!((flights[0].first_class_price - 600.0).abs() < f64::EPSILON);
        assert_eq!(flights[1].origin, "LGW");
        assert_eq!(flights[1].aircraft, "E190");
    }

    #[test]
    fn test_malformed_flight_rows_are_dropped() {
        let path = write_fixture(
            "origin,destination,aircraft,eco,bus,first,eco price,bus price,first price\n\
             MAN,JFK,A320,lots,20,5,100,300,600\n\
             MAN,JFK,A320,100\n\
             MAN,ORY,E190,-1,0,0,100,0,0\n\
             MAN,ORY,E190,1,0,0,100,0,0\n",
        );

        let flights = load_flights(&path, DEFAULT_DELIMITER).unwrap();

        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].economy_seats, 1);
    }

    #[test]
    fn test_missing_files() {
        let path = std::env::temp_dir().join(format!("missing-{}.csv", uuid::Uuid::new_v4()));

        assert!(load_airports(&path, DEFAULT_DELIMITER).is_empty());
        assert!(load_aircraft(&path, DEFAULT_DELIMITER).is_empty());
        assert_eq!(load_flights(&path, DEFAULT_DELIMITER), None);
    }
}
