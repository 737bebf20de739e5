use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::{ErrorKind, Result, ResultExt};
use crate::extract::DataExtractor;
use crate::store::DocumentStore;

/// Convert `file_path`, echo the records to `out`, insert them and report
/// the count.
pub fn run<S, W>(
    extractor: &DataExtractor<S>,
    file_path: &Path,
    database: &str,
    collection: &str,
    out: &mut W,
) -> Result<usize>
where
    S: DocumentStore,
    W: Write,
{
    info!("starting ingest of {} into {}.{}", file_path.display(), database, collection);

    let records = extractor.csv_to_records(file_path)?;
    serde_json::to_writer(&mut *out, &records).wrap_err(ErrorKind::Serialize)?;
    writeln!(out).wrap_err(ErrorKind::Io)?;

    let inserted = extractor.insert_records(records, database, collection)?;
    writeln!(out, "{} records inserted successfully!", inserted).wrap_err(ErrorKind::Io)?;
    out.flush().wrap_err(ErrorKind::Io)?;

    Ok(inserted)
}
