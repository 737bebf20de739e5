use std::path::PathBuf;

use log::{debug, info};
use mongodb::bson::Document;
use mongodb::error::{Error as MongoError, ErrorKind as MongoErrorKind};
use mongodb::options::{ClientOptions, Tls, TlsOptions};
use mongodb::sync::Client;

use crate::config::Settings;
use crate::error::{ErrorKind, ExtractError, Result, ResultExt};
use crate::store::DocumentStore;

const APP_NAME: &str = "csv_mongo_loader";

/// MongoDB-backed store. Every insert opens its own client, which is
/// dropped before the call returns.
#[derive(Debug, Clone, Default)]
pub struct MongoStore {
    url: Option<String>,
    ca_file: Option<PathBuf>,
}

impl MongoStore {
    pub fn new(url: Option<String>, ca_file: Option<PathBuf>) -> Self {
        Self { url, ca_file }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.mongo_db_url.clone(), settings.mongo_ca_file.clone())
    }

    fn client_options(&self) -> Result<ClientOptions> {
        let url = match self.url.as_deref() {
            Some(url) => url,
            None => {
                return Err(ExtractError::new(
                    ErrorKind::Connection,
                    "MONGO_DB_URL is not set",
                ));
            }
        };

        let mut options = ClientOptions::parse(url).run().wrap_err(ErrorKind::Connection)?;
        options.app_name = Some(APP_NAME.to_string());

        if let Some(ca_file) = &self.ca_file {
            debug!("verifying server certificate against {}", ca_file.display());
            let mut tls = TlsOptions::default();
            tls.ca_file_path = Some(ca_file.clone());
            options.tls = Some(Tls::Enabled(tls));
        }

        Ok(options)
    }

    fn connect(&self) -> Result<Client> {
        let options = self.client_options()?;
        Client::with_options(options).wrap_err(ErrorKind::Connection)
    }
}

/// The client connects lazily, so an unreachable server only shows up
/// once the insert runs.
fn classify(error: &MongoError) -> ErrorKind {
    match *error.kind {
        MongoErrorKind::ServerSelection { .. }
        | MongoErrorKind::Io(_)
        | MongoErrorKind::ConnectionPoolCleared { .. }
        | MongoErrorKind::DnsResolve { .. } => ErrorKind::Connection,
        _ => ErrorKind::Insert,
    }
}

impl DocumentStore for MongoStore {
    fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize> {
        let client = self.connect()?;
        let target = client.database(database).collection::<Document>(collection);

        info!("inserting {} documents into {}.{}", documents.len(), database, collection);
        match target.insert_many(documents).run() {
            Ok(result) => Ok(result.inserted_ids.len()),
            Err(e) => Err(ExtractError::new(classify(&e), e)),
        }
    }
}
