//! Runs one worker per range on scoped threads, then merges their tables.

use std::hash::BuildHasher;
use std::thread;

use crate::config::{Config, Scan};
use crate::error::{Error, Result};
use crate::merge::merge;
use crate::partition::partition;
use crate::report::Report;
use crate::scan::{ByteFinder, Memchr, Portable};
use crate::table::{Polynomial31, StationTable};
use crate::worker::Worker;

/// Result of a whole run.
#[derive(Debug)]
pub struct Summary<'a> {
    pub report: Report<'a>,
    /// Records dropped under [`Validation::Skip`](crate::Validation::Skip).
    pub skipped: usize,
}

/// Aggregates `input` with the reference polynomial hash.
pub fn aggregate<'a>(input: &'a [u8], config: &Config) -> Result<Summary<'a>> {
    aggregate_with_hasher(input, config, Polynomial31)
}

pub fn aggregate_with_hasher<'a, S>(input: &'a [u8], config: &Config, hasher: S) -> Result<Summary<'a>>
where
    S: BuildHasher + Clone + Send + Sync,
{
    config.validate()?;
    match config.scan {
        Scan::Portable => run(input, config, Portable, hasher),
        Scan::Memchr => run(input, config, Memchr, hasher),
    }
}

fn run<'a, F, S>(input: &'a [u8], config: &Config, finder: F, hasher: S) -> Result<Summary<'a>>
where
    F: ByteFinder,
    S: BuildHasher + Clone + Send + Sync,
{
    let worker = Worker {
        capacity: config.capacity,
        hasher: hasher.clone(),
        finder,
        validation: config.validation,
    };
    let ranges = partition(input, config.threads);

    // Every worker is joined before any table is read.
    let results = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let worker = &worker;
                scope.spawn(move || worker.run(input, range))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    });

    let mut tables: Vec<StationTable<'a, S>> = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for (index, result) in results.into_iter().enumerate() {
        let chunk = result.map_err(|_| Error::WorkerPanicked { worker: index })??;
        skipped += chunk.skipped;
        tables.push(chunk.table);
    }

    let merged = merge(tables, config.merge, config.capacity, hasher)?;
    Ok(Summary {
        report: Report::from_table(merged),
        skipped,
    })
}
