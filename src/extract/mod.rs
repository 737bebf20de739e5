pub mod data_extractor;

pub use data_extractor::DataExtractor;
