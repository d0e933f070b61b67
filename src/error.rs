use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a record was rejected by the validating scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// The line has no `;` between name and value.
    MissingSeparator,
    /// The line starts with `;`.
    EmptyName,
    /// The value does not match `-?d.d` or `-?dd.d`.
    BadValue,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::MissingSeparator => f.write_str("missing ';' separator"),
            MalformedKind::EmptyName => f.write_str("empty station name"),
            MalformedKind::BadValue => f.write_str("value is not a one-decimal temperature"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    StatFailed { path: PathBuf, source: io::Error },
    OpenFailed { path: PathBuf, source: io::Error },
    EmptyFile { path: PathBuf },
    MapFailed { path: PathBuf, source: io::Error },
    /// `offset` is the absolute byte offset of the record's first byte.
    MalformedRecord { offset: usize, kind: MalformedKind },
    TableFull { capacity: usize },
    InvalidConfig(String),
    WorkerPanicked { worker: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StatFailed { path, .. } => write!(f, "cannot stat {}", path.display()),
            Error::OpenFailed { path, .. } => write!(f, "cannot open {}", path.display()),
            Error::EmptyFile { path } => write!(f, "{} is empty", path.display()),
            Error::MapFailed { path, .. } => write!(f, "cannot map {}", path.display()),
            Error::MalformedRecord { offset, kind } => {
                write!(f, "malformed record at byte {offset}: {kind}")
            }
            Error::TableFull { capacity } => write!(
                f,
                "aggregation table is full ({capacity} slots); rerun with a larger capacity"
            ),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Error::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::StatFailed { source, .. }
            | Error::OpenFailed { source, .. }
            | Error::MapFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
