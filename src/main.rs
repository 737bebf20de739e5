use std::env;
use std::io;
use std::path::Path;
use std::process;

use log::{error, info};

use csv_mongo_loader::logging::{self, LogConfig};
use csv_mongo_loader::{run, DataExtractor, Settings};

const FILE_PATH: &str = "Network_Data/phisingData.csv";
const DATABASE: &str = "KRISHAI";
const COLLECTION: &str = "NetworkData";

fn main() {
    // Optional positional overrides: [csv file] [database] [collection]
    let args: Vec<String> = env::args().collect();
    if args.len() > 4 {
        eprintln!("Usage: {} [file.csv] [database] [collection]", args[0]);
        process::exit(1);
    }
    let file_path = args.get(1).map(String::as_str).unwrap_or(FILE_PATH);
    let database = args.get(2).map(String::as_str).unwrap_or(DATABASE);
    let collection = args.get(3).map(String::as_str).unwrap_or(COLLECTION);

    // Load .env first so a RUST_LOG set there reaches the logger.
    let settings = Settings::from_env();

    let logger = match logging::init(&LogConfig::default()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("logging to {}", logger.log_file().display());

    let extractor = DataExtractor::from_settings(&settings);

    let mut stdout = io::stdout().lock();
    if let Err(e) = run(&extractor, Path::new(file_path), database, collection, &mut stdout) {
        error!("ingest failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
