pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod orchestrator;
pub mod records;
pub mod store;

pub use config::Settings;
pub use error::{ErrorKind, ExtractError};
pub use extract::DataExtractor;
pub use orchestrator::run;
pub use records::{Dataset, Record};
pub use store::{DocumentStore, MongoStore};
