//! Parallel min/mean/max aggregation of `station;temperature` lines.
//!
//! The input is split into newline-aligned ranges, each range is scanned by
//! its own thread into a fixed-capacity open-addressing table, and the tables
//! are merged by name into a report sorted by station.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod merge;
pub mod parse;
pub mod partition;
pub mod report;
pub mod scan;
pub mod table;
pub mod worker;

pub use config::{Config, MergeStrategy, Release, Scan, Validation};
pub use engine::{aggregate, aggregate_with_hasher, Summary};
pub use error::{Error, MalformedKind, Result};
pub use input::Input;
pub use report::{Report, Station};
pub use table::{Polynomial31, Slot, StationTable};
