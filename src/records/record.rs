use serde_json::{Map, Value};

/// One CSV row: column name to scalar value, in header order.
pub type Record = Map<String, Value>;

/// Rows of one CSV file, in file order.
pub type Dataset = Vec<Record>;
