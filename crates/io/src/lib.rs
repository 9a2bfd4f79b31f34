//! # spint-io
//!
//! File-backed inputs and outputs. Reads the reference tables, the treatment
//! log and the weather series from delimited files, and writes reconciled
//! records and reports as JSON or CSV.
//!
//! The two input streams are reached through the [`TreatmentSource`] and
//! [`WeatherSource`] traits so other collectors can replace the file
//! adapters.

mod delimited;
mod error;
mod reference;
mod source;
mod treatments;
mod validate;
mod weather;
mod writer;

pub use delimited::{Encoding, TableFormat, read_table};
pub use error::IoError;
pub use reference::{ReferenceFiles, ReferenceTables, read_reference_tables};
pub use source::{TreatmentSource, WeatherSource};
pub use treatments::{CsvTreatmentSource, TreatmentColumns};
pub use weather::{CsvWeatherSource, STATION_TIMESTAMP_FORMAT, TimestampParser};
pub use writer::{write_json, write_records_csv};
