//! File input: delimited text reading and table construction.

pub mod delimited;
pub mod loaders;

pub use delimited::{read_delimited, read_rows, LoadError, Row, DEFAULT_DELIMITER};
pub use loaders::{load_aircraft, load_airports, load_flights, RowError};
