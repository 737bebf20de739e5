pub mod mongo_store;

pub use mongo_store::MongoStore;

use mongodb::bson::Document;

use crate::error::Result;

/// Somewhere documents can be bulk-inserted, addressed by database and
/// collection name.
pub trait DocumentStore {
    /// Insert all documents in order; returns how many were inserted.
    fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize>;
}
