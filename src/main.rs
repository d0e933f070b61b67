use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use one_brc_scan::config::{default_threads, DEFAULT_CAPACITY};
use one_brc_scan::{
    aggregate, aggregate_with_hasher, Config, Input, MergeStrategy, Release, Scan, Validation,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScanArg {
    Portable,
    Memchr,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValidationArg {
    Trusted,
    Strict,
    Skip,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MergeArg {
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReleaseArg {
    Now,
    OnExit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HasherArg {
    Polynomial,
    Ahash,
}

#[derive(Debug, Parser)]
#[command(version, about = "Min/mean/max temperature per station", long_about = None)]
struct Cli {
    /// Measurements file, one `name;value` per line
    #[arg(default_value = "measurements.txt")]
    path: PathBuf,
    /// Worker threads [default: number of cores]
    threads: Option<usize>,
    /// Slots per aggregation table, a power of two
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    #[arg(long, value_enum, default_value_t = ScanArg::Memchr)]
    scan: ScanArg,
    /// What to do with lines that are not `name;-?d?d.d`
    #[arg(long, value_enum, default_value_t = ValidationArg::Strict)]
    validation: ValidationArg,
    #[arg(long, value_enum, default_value_t = MergeArg::Sequential)]
    merge: MergeArg,
    #[arg(long, value_enum, default_value_t = HasherArg::Polynomial)]
    hasher: HasherArg,
    /// `on-exit` skips unmapping and exits right after printing
    #[arg(long, value_enum, default_value_t = ReleaseArg::Now)]
    release: ReleaseArg,
    /// Do not print the report
    #[arg(long)]
    no_output: bool,
    /// Do not print the elapsed time
    #[arg(long)]
    no_timing: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            threads: self.threads.unwrap_or_else(default_threads),
            capacity: self.capacity,
            scan: match self.scan {
                ScanArg::Portable => Scan::Portable,
                ScanArg::Memchr => Scan::Memchr,
            },
            validation: match self.validation {
                ValidationArg::Trusted => Validation::Trusted,
                ValidationArg::Strict => Validation::Strict,
                ValidationArg::Skip => Validation::Skip,
            },
            merge: match self.merge {
                MergeArg::Sequential => MergeStrategy::Sequential,
                MergeArg::Parallel => MergeStrategy::Parallel,
            },
            release: match self.release {
                ReleaseArg::Now => Release::Now,
                ReleaseArg::OnExit => Release::OnExit,
            },
        }
    }
}

// Fixed seeds keep slot placement identical across runs.
fn ahash_state() -> ahash::RandomState {
    ahash::RandomState::with_seeds(
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    )
}

fn main() -> anyhow::Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();
    let config = cli.config();

    let input = Input::open(&cli.path)?;
    let summary = match cli.hasher {
        HasherArg::Polynomial => aggregate(input.bytes(), &config),
        HasherArg::Ahash => aggregate_with_hasher(input.bytes(), &config, ahash_state()),
    }
    .with_context(|| format!("failed to aggregate {}", cli.path.display()))?;

    if summary.skipped > 0 {
        eprintln!("Skipped {} malformed records", summary.skipped);
    }

    let mut stdout = io::stdout().lock();
    if !cli.no_output {
        writeln!(stdout, "{}", summary.report)?;
    }
    if !cli.no_timing {
        let elapsed = started.elapsed().as_secs_f64() * 1000.0;
        writeln!(stdout, "time: {elapsed:.3} ms")?;
    }
    stdout.flush()?;
    drop(summary);

    input.release(config.release);
    if config.release == Release::OnExit {
        process::exit(0);
    }
    Ok(())
}
