use std::hash::BuildHasher;
use std::ops::Range;

use crate::config::Validation;
use crate::error::{Error, MalformedKind, Result};
use crate::parse::{parse_tenths, parse_tenths_checked};
use crate::scan::{ByteFinder, Record, Records};
use crate::table::StationTable;

/// Output of one worker: its private table and how many records it dropped.
#[derive(Debug)]
pub struct Chunk<'a, S> {
    pub table: StationTable<'a, S>,
    pub skipped: usize,
}

/// Settings shared by every worker of a run.
#[derive(Debug, Clone)]
pub struct Worker<F, S> {
    pub capacity: usize,
    pub hasher: S,
    pub finder: F,
    pub validation: Validation,
}

fn checked_value(record: &Record<'_>) -> Result<i32> {
    let malformed = |kind| Error::MalformedRecord {
        offset: record.offset,
        kind,
    };
    if record.name.is_empty() {
        return Err(malformed(MalformedKind::EmptyName));
    }
    parse_tenths_checked(record.value).ok_or_else(|| malformed(MalformedKind::BadValue))
}

impl<F: ByteFinder, S: BuildHasher + Clone> Worker<F, S> {
    /// Aggregates every record in `input[range]` into a fresh table.
    ///
    /// `range` must start at a record boundary.
    pub fn run<'a>(&self, input: &'a [u8], range: Range<usize>) -> Result<Chunk<'a, S>> {
        let mut table = StationTable::with_hasher(self.capacity, self.hasher.clone());
        let mut skipped = 0;
        let base = range.start;
        let bytes = &input[range];

        match self.validation {
            Validation::Trusted => {
                for record in Records::new(bytes, base, self.finder) {
                    let record = record?;
                    table.update(record.name, parse_tenths(record.value))?;
                }
            }
            Validation::Strict => {
                for record in Records::checked(bytes, base, self.finder) {
                    let record = record?;
                    table.update(record.name, checked_value(&record)?)?;
                }
            }
            Validation::Skip => {
                for record in Records::checked(bytes, base, self.finder) {
                    match record.and_then(|r| checked_value(&r).map(|v| (r.name, v))) {
                        Ok((name, value)) => table.update(name, value)?,
                        Err(Error::MalformedRecord { .. }) => skipped += 1,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        Ok(Chunk { table, skipped })
    }
}
