//! Name-sorted final statistics and their `{name=min/mean/max, ...}` rendering.

use std::fmt;

use crate::table::{Slot, StationTable};

/// Statistics for one station, temperatures in tenths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station<'a> {
    pub name: &'a [u8],
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl Station<'_> {
    /// Mean in degrees, unrounded.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / (self.count as f64 * 10.0)
    }
}

impl<'a> From<Slot<'a>> for Station<'a> {
    fn from(slot: Slot<'a>) -> Self {
        Self {
            name: slot.name,
            min: slot.min,
            max: slot.max,
            sum: slot.sum,
            count: slot.count,
        }
    }
}

/// Final statistics, sorted by name in byte order, one entry per station.
///
/// Names borrow the input buffer, so the report is only valid while the
/// buffer is mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<'a> {
    stations: Vec<Station<'a>>,
}

impl<'a> Report<'a> {
    pub fn from_table<S>(table: StationTable<'a, S>) -> Self {
        let mut stations: Vec<Station<'a>> = table.into_slots().map(Station::from).collect();
        // Names are unique within a table.
        stations.sort_unstable_by(|a, b| a.name.cmp(b.name));
        Self { stations }
    }

    pub fn stations(&self) -> &[Station<'a>] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, name: &[u8]) -> Option<&Station<'a>> {
        self.stations
            .binary_search_by(|s| s.name.cmp(name))
            .ok()
            .map(|i| &self.stations[i])
    }

    /// Total number of records aggregated.
    pub fn records(&self) -> u64 {
        self.stations.iter().map(|s| s.count).sum()
    }
}

/// Mean in tenths, rounded half-up.
pub fn mean_tenths(sum: i64, count: u64) -> i64 {
    let count = count as i64;
    (sum * 2 + count).div_euclid(count * 2)
}

struct Tenths(i64);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, s) in self.stations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{}={}/{}/{}",
                String::from_utf8_lossy(s.name),
                Tenths(s.min.into()),
                Tenths(mean_tenths(s.sum, s.count)),
                Tenths(s.max.into()),
            )?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(records: &[(&'static [u8], i32)]) -> Report<'static> {
        let mut table = StationTable::new(64);
        for &(name, value) in records {
            table.update(name, value).unwrap();
        }
        Report::from_table(table)
    }

    #[test]
    fn sorted_by_name() {
        let r = report(&[(b"Hamburg", 120), (b"Berlin", -35), (b"Hamburg", 82)]);
        assert_eq!(r.to_string(), "{Berlin=-3.5/-3.5/-3.5, Hamburg=8.2/10.1/12.0}");
        assert_eq!(r.records(), 3);
        assert_eq!(r.get(b"Hamburg").unwrap().count, 2);
        assert!(r.get(b"Paris").is_none());
    }

    #[test]
    fn byte_order_puts_uppercase_first() {
        let r = report(&[(b"b", 0), (b"B", 0), (b"a", 0), (b"ab", 0)]);
        let names: Vec<_> = r
            .stations()
            .iter()
            .map(|s| std::str::from_utf8(s.name).unwrap())
            .collect();
        assert_eq!(names, ["B", "a", "ab", "b"]);
    }

    #[test]
    fn unrounded_mean() {
        let r = report(&[(b"a", 10), (b"a", 15)]);
        assert_eq!(r.get(b"a").unwrap().mean(), 1.25);
    }

    #[test]
    fn empty_report() {
        assert_eq!(report(&[]).to_string(), "{}");
    }

    #[test]
    fn single_zero() {
        assert_eq!(report(&[(b"X", 0)]).to_string(), "{X=0.0/0.0/0.0}");
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(mean_tenths(3, 2), 2);
        assert_eq!(mean_tenths(-3, 2), -1);
        assert_eq!(mean_tenths(-1, 3), 0);
        assert_eq!(mean_tenths(202, 2), 101);
        assert_eq!(mean_tenths(10, 3), 3);
        assert_eq!(mean_tenths(20, 3), 7);
    }

    #[test]
    fn never_prints_negative_zero() {
        let r = report(&[(b"a", -1), (b"a", 0), (b"a", 0)]);
        assert_eq!(r.to_string(), "{a=-0.1/0.0/0.0}");
    }
}
