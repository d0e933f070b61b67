//! Combining per-worker tables into one.
//!
//! Stations are re-inserted by name, so tables whose layouts differ (other
//! hasher, or names that collided in a different order) still merge correctly.

use std::hash::BuildHasher;

use rayon::prelude::*;

use crate::config::MergeStrategy;
use crate::error::Result;
use crate::table::StationTable;

pub fn merge<'a, S>(
    tables: Vec<StationTable<'a, S>>,
    strategy: MergeStrategy,
    capacity: usize,
    hasher: S,
) -> Result<StationTable<'a, S>>
where
    S: BuildHasher + Clone + Send + Sync,
{
    match strategy {
        MergeStrategy::Sequential => merge_sequential(&tables, capacity, hasher),
        MergeStrategy::Parallel => merge_parallel(tables, capacity, hasher),
    }
}

/// Left fold into an empty accumulator.
pub fn merge_sequential<'a, S: BuildHasher>(
    tables: &[StationTable<'a, S>],
    capacity: usize,
    hasher: S,
) -> Result<StationTable<'a, S>> {
    let mut accumulated = StationTable::with_hasher(capacity, hasher);
    for table in tables {
        accumulated.merge(table)?;
    }
    Ok(accumulated)
}

/// Tree reduction on the rayon pool.
pub fn merge_parallel<'a, S>(
    tables: Vec<StationTable<'a, S>>,
    capacity: usize,
    hasher: S,
) -> Result<StationTable<'a, S>>
where
    S: BuildHasher + Clone + Send + Sync,
{
    tables.into_par_iter().map(Ok).reduce(
        || Ok(StationTable::with_hasher(capacity, hasher.clone())),
        |left, right| {
            let (mut left, right) = (left?, right?);
            left.merge(&right)?;
            Ok(left)
        },
    )
}
