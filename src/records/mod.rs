pub mod csv_converter;
pub mod record;

pub use csv_converter::{csv_to_records, read_records};
pub use record::{Dataset, Record};
