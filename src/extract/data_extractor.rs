use std::path::Path;

use log::info;
use mongodb::bson::{self, Document};

use crate::config::Settings;
use crate::error::{ErrorKind, Result, ResultExt};
use crate::records::{self, Dataset};
use crate::store::{DocumentStore, MongoStore};

/// Converts CSV files to records and pushes them into a document store.
pub struct DataExtractor<S: DocumentStore> {
    store: S,
}

impl DataExtractor<MongoStore> {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(MongoStore::from_settings(settings))
    }
}

impl<S: DocumentStore> DataExtractor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn csv_to_records<P: AsRef<Path>>(&self, file_path: P) -> Result<Dataset> {
        let file_path = file_path.as_ref();
        let records = records::csv_to_records(file_path)?;
        info!("converted {} rows from {}", records.len(), file_path.display());
        Ok(records)
    }

    /// Bulk-insert `records` in order. Whether an empty dataset is accepted
    /// is up to the store.
    pub fn insert_records(
        &self,
        records: Dataset,
        database: &str,
        collection: &str,
    ) -> Result<usize> {
        let documents = records
            .iter()
            .map(|record| bson::to_document(record).wrap_err(ErrorKind::Serialize))
            .collect::<Result<Vec<Document>>>()?;

        let inserted = self.store.insert_many(database, collection, documents)?;
        info!("inserted {} records into {}.{}", inserted, database, collection);
        Ok(inserted)
    }
}
