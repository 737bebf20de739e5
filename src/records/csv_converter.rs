use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Number, Value};

use crate::error::{ErrorKind, ExtractError, Result, ResultExt};
use crate::records::record::{Dataset, Record};

/// Cell contents treated as missing, matching common tabular tooling.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_VALUES: &[&str] = &["True", "TRUE", "true"];
const FALSE_VALUES: &[&str] = &["False", "FALSE", "false"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnType {
    /// Narrowest type every present cell fits. An integer column with gaps
    /// is widened to float.
    fn infer(cells: &[Option<String>]) -> Self {
        let present: Vec<&str> = cells.iter().flatten().map(|s| s.trim()).collect();
        let has_missing = present.len() < cells.len();

        if present.iter().all(|s| s.parse::<i64>().is_ok()) {
            if has_missing {
                ColumnType::Float
            } else {
                ColumnType::Integer
            }
        } else if present.iter().all(|s| s.parse::<f64>().is_ok()) {
            ColumnType::Float
        } else if present.iter().all(|s| parse_bool(s).is_some()) {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    }

    fn convert(self, cell: Option<String>) -> Value {
        let Some(raw) = cell else {
            return Value::Null;
        };
        let trimmed = raw.trim();
        match self {
            ColumnType::Integer => trimmed.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            ColumnType::Float => trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnType::Boolean => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
            ColumnType::Text => Value::String(raw),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_VALUES.contains(&s) {
        Some(true)
    } else if FALSE_VALUES.contains(&s) {
        Some(false)
    } else {
        None
    }
}

fn is_missing(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

/// Blank names become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
fn column_names(headers: &StringRecord) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(headers.len());

    for (idx, raw) in headers.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        while used.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

/// Read a CSV file with a header row into one record per data row.
pub fn csv_to_records<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref()).wrap_err(ErrorKind::Io)?;
    read_records(file)
}

pub fn read_records<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().wrap_err(ErrorKind::Parse)?.clone();
    if headers.is_empty() {
        return Err(ExtractError::new(ErrorKind::Parse, "no columns to parse from file"));
    }
    let names = column_names(&headers);

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for result in rdr.records() {
        let row = result.wrap_err(ErrorKind::Parse)?;
        if row.len() > names.len() {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            return Err(ExtractError::new(
                ErrorKind::Parse,
                format!("expected {} fields in line {}, saw {}", names.len(), line, row.len()),
            ));
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = row.get(idx).filter(|c| !is_missing(c)).map(str::to_string);
            column.push(cell);
        }
    }

    let row_count = columns.first().map(Vec::len).unwrap_or(0);
    let mut records: Dataset = (0..row_count).map(|_| Record::new()).collect();

    for (name, cells) in names.into_iter().zip(columns) {
        let column_type = ColumnType::infer(&cells);
        for (record, cell) in records.iter_mut().zip(cells) {
            record.insert(name.clone(), column_type.convert(cell));
        }
    }

    Ok(records)
}
