//! Worker count, scanner, hasher and merge order must never change results.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use one_brc_scan::merge::{merge_sequential, merge_parallel};
use one_brc_scan::partition::partition;
use one_brc_scan::scan::{Memchr, Portable, Records};
use one_brc_scan::worker::Worker;
use one_brc_scan::{aggregate, Config, Polynomial31, Report, Scan, StationTable, Validation};

const NAMES: &[&str] = &[
    "Abha", "Abidjan", "Accra", "Adelaide", "Bergen", "Berlin", "Bulawayo", "Cairo", "Dakar",
    "Hamburg", "Istanbul", "Kunming", "Lima", "Nuuk", "Oslo", "Palembang", "St. John's", "Tokyo",
    "Ürümqi", "Zanzibar City",
];

fn generate(seed: u64, records: usize, trailing_newline: bool) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for i in 0..records {
        let name = NAMES.choose(&mut rng).unwrap();
        let tenths: i32 = rng.gen_range(-999..=999);
        let sign = if tenths < 0 { "-" } else { "" };
        out.extend_from_slice(
            format!("{name};{sign}{}.{}", tenths.abs() / 10, tenths.abs() % 10).as_bytes(),
        );
        if trailing_newline || i + 1 < records {
            out.push(b'\n');
        }
    }
    out
}

/// Counts lines per name the slow way.
fn naive_counts(input: &[u8]) -> Vec<(Vec<u8>, u64)> {
    let mut counts = std::collections::BTreeMap::<Vec<u8>, u64>::new();
    for line in input.split(|&b| b == b'\n').filter(|l| !l.is_empty()) {
        let semi = line.iter().position(|&b| b == b';').unwrap();
        *counts.entry(line[..semi].to_vec()).or_default() += 1;
    }
    counts.into_iter().collect()
}

#[test]
fn worker_count_does_not_change_report() {
    for (seed, trailing) in [(1, true), (2, false), (3, true)] {
        let input = generate(seed, 2_000, trailing);
        let single = aggregate(&input, &Config::default().with_threads(1)).unwrap().report;
        for threads in 2..=17 {
            let config = Config::default().with_threads(threads);
            let report = aggregate(&input, &config).unwrap().report;
            assert_eq!(report, single, "seed {seed}, {threads} threads");
        }
    }
}

#[test]
fn counts_match_line_counts() {
    let input = generate(7, 5_000, true);
    let report = aggregate(&input, &Config::default().with_threads(6)).unwrap().report;
    let got: Vec<(Vec<u8>, u64)> = report
        .stations()
        .iter()
        .map(|s| (s.name.to_vec(), s.count))
        .collect();
    assert_eq!(got, naive_counts(&input));
    assert_eq!(report.records(), 5_000);
}

#[test]
fn report_is_strictly_sorted() {
    let input = generate(11, 1_000, true);
    let report = aggregate(&input, &Config::default().with_threads(4)).unwrap().report;
    for pair in report.stations().windows(2) {
        assert!(pair[0].name < pair[1].name);
    }
}

#[test]
fn portable_and_memchr_scans_agree() {
    let input = generate(5, 3_000, false);
    let portable: Vec<_> = Records::new(&input, 0, Portable).map(Result::unwrap).collect();
    let memchr: Vec<_> = Records::new(&input, 0, Memchr).map(Result::unwrap).collect();
    assert_eq!(portable, memchr);
    assert_eq!(portable.len(), 3_000);

    let trusted = Config::default().with_validation(Validation::Trusted);
    let a = aggregate(&input, &trusted.clone().with_scan(Scan::Portable)).unwrap();
    let b = aggregate(&input, &trusted.with_scan(Scan::Memchr)).unwrap();
    assert_eq!(a.report, b.report);
}

#[test]
fn no_record_is_lost_or_duplicated_at_range_edges() {
    let input = generate(13, 300, true);
    for parts in 1..=64 {
        let total: usize = partition(&input, parts)
            .into_iter()
            .map(|range| Records::new(&input[range.clone()], range.start, Memchr).count())
            .sum();
        assert_eq!(total, 300, "{parts} parts");
    }
}

#[test]
fn merge_order_does_not_matter() {
    let input = generate(17, 4_000, true);
    let worker = Worker {
        capacity: 4096,
        hasher: Polynomial31,
        finder: Memchr,
        validation: Validation::Strict,
    };
    let tables: Vec<StationTable<'_>> = partition(&input, 8)
        .into_iter()
        .map(|range| worker.run(&input, range).unwrap().table)
        .collect();

    let expected = Report::from_table(merge_sequential(&tables, 4096, Polynomial31).unwrap());
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10 {
        let mut shuffled = tables.clone();
        shuffled.shuffle(&mut rng);
        let sequential = merge_sequential(&shuffled, 4096, Polynomial31).unwrap();
        assert_eq!(Report::from_table(sequential), expected);
        let parallel = merge_parallel(shuffled, 4096, Polynomial31).unwrap();
        assert_eq!(Report::from_table(parallel), expected);
    }
}

#[test]
fn tiny_tables_still_merge_correctly() {
    // 20 names in 32 slots collide often; merging by name keeps them apart.
    let input = generate(23, 2_000, true);
    let config = Config::default().with_threads(5).with_capacity(32);
    let small = aggregate(&input, &config).unwrap().report;
    let large = aggregate(&input, &Config::default().with_threads(1)).unwrap().report;
    assert_eq!(small, large);
    assert_eq!(small.len(), NAMES.len());
}
