pub mod extract_error;

pub use extract_error::{BoxError, ErrorKind, ExtractError, Result, ResultExt};
