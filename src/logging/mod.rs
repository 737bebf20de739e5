pub mod logger;

pub use logger::{init, log_file_name, log_file_path, LogConfig, LoggerHandle};
