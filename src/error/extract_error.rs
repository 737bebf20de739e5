use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Which stage of the ingest failed. Bad input and infrastructure failures
/// share the same error type; the kind only tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Connection,
    Insert,
    Serialize,
    Logging,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Io => "I/O",
            ErrorKind::Parse => "CSV parse",
            ErrorKind::Connection => "Connection",
            ErrorKind::Insert => "Insert",
            ErrorKind::Serialize => "Serialization",
            ErrorKind::Logging => "Logging",
        };
        f.write_str(name)
    }
}

/// Wraps the original failure together with the source location that
/// raised it.
#[derive(Debug, Error)]
#[error("{kind} error in [{}] line [{}]: {source}", .location.file(), .location.line())]
pub struct ExtractError {
    kind: ErrorKind,
    location: &'static Location<'static>,
    source: BoxError,
}

impl ExtractError {
    #[track_caller]
    pub fn new(kind: ErrorKind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            location: Location::caller(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// The underlying error, e.g. a `std::io::Error` or a driver error.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Try to view the underlying error as a concrete type.
    pub fn downcast_cause<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

pub trait ResultExt<T> {
    /// Wrap the error of a result, recording the caller's location.
    fn wrap_err(self, kind: ErrorKind) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn wrap_err(self, kind: ErrorKind) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(ExtractError::new(kind, e)),
        }
    }
}
