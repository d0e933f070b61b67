use std::num::NonZeroUsize;
use std::thread;

use crate::error::{Error, Result};

/// Slot count used when nothing else is asked for.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Which byte-finding routine the line scanner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scan {
    /// Plain byte-by-byte search.
    Portable,
    /// SIMD search through `memchr`.
    #[default]
    Memchr,
}

/// What happens to records that do not match `name;-?d?d.d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// No grammar checks. Output for malformed input is unspecified.
    Trusted,
    /// The first malformed record aborts the run.
    #[default]
    Strict,
    /// Malformed records are dropped and counted.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    #[default]
    Sequential,
    /// Tree reduction of the worker tables on the rayon pool.
    Parallel,
}

/// Whether the mapped input is unmapped before the process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Release {
    /// Unmap as soon as the report has been produced.
    #[default]
    Now,
    /// Leave the mapping in place and let process exit reclaim it.
    OnExit,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub threads: usize,
    pub capacity: usize,
    pub scan: Scan,
    pub validation: Validation,
    pub merge: MergeStrategy,
    pub release: Release,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            capacity: DEFAULT_CAPACITY,
            scan: Scan::default(),
            validation: Validation::default(),
            merge: MergeStrategy::default(),
            release: Release::default(),
        }
    }
}

impl Config {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_scan(mut self, scan: Scan) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_merge(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    pub fn with_release(mut self, release: Release) -> Self {
        self.release = release;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::InvalidConfig("thread count must be at least 1".into()));
        }
        if self.capacity < 2 || !self.capacity.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "table capacity must be a power of two >= 2, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}

/// One worker per available core, or a single worker if that cannot be queried.
pub fn default_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
