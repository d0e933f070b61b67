//! Fixed-capacity open-addressing table keyed by station name.

use std::hash::{BuildHasher, Hasher};

use crate::error::{Error, Result};

/// Rolling polynomial hash, `h = h * 31 + byte`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Polynomial31;

#[derive(Debug, Clone, Copy, Default)]
pub struct Polynomial31Hasher(u64);

impl BuildHasher for Polynomial31 {
    type Hasher = Polynomial31Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Polynomial31Hasher(0)
    }
}

impl Hasher for Polynomial31Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(b));
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Running statistics for one station.
///
/// `name` borrows the input buffer; a slot with an empty name is vacant.
/// Temperatures are in tenths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub name: &'a [u8],
    /// Where this name landed in the table that holds the slot.
    pub index: usize,
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl<'a> Slot<'a> {
    const VACANT: Slot<'static> = Slot {
        name: &[],
        index: usize::MAX,
        min: i32::MAX,
        max: i32::MIN,
        sum: 0,
        count: 0,
    };

    #[inline]
    pub fn is_occupied(&self) -> bool {
        !self.name.is_empty()
    }

    #[inline]
    fn record(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += i64::from(value);
        self.count += 1;
    }

    fn combine(&mut self, other: &Slot<'_>) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }
}

/// Per-worker aggregation table with linear probing.
///
/// Never grows: inserting into a full table fails with [`Error::TableFull`].
/// The table borrows every name from the input, so it cannot outlive it.
#[derive(Debug, Clone)]
pub struct StationTable<'a, S = Polynomial31> {
    slots: Box<[Slot<'a>]>,
    len: usize,
    hasher: S,
}

impl<'a> StationTable<'a> {
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, Polynomial31)
    }
}

impl<'a, S: BuildHasher> StationTable<'a, S> {
    /// # Panics
    ///
    /// If `capacity` is not a power of two.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "table capacity must be a power of two, got {capacity}"
        );
        Self {
            slots: vec![Slot::VACANT; capacity].into_boxed_slice(),
            len: 0,
            hasher,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of distinct names stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Slot a name starts probing from.
    #[inline]
    pub fn home(&self, name: &[u8]) -> usize {
        let mut state = self.hasher.build_hasher();
        state.write(name);
        state.finish() as usize & (self.slots.len() - 1)
    }

    /// Index of the slot holding `name`, or of the vacant slot it would take.
    /// `None` once every slot has been visited.
    #[inline]
    fn probe(&self, name: &[u8]) -> Option<usize> {
        let mask = self.slots.len() - 1;
        let mut index = self.home(name);
        for _ in 0..self.slots.len() {
            let slot = &self.slots[index];
            if !slot.is_occupied() || slot.name == name {
                return Some(index);
            }
            index = (index + 1) & mask;
        }
        None
    }

    fn full(&self) -> Error {
        Error::TableFull {
            capacity: self.capacity(),
        }
    }

    /// Records one measurement, in tenths, for `name`.
    #[inline]
    pub fn update(&mut self, name: &'a [u8], value: i32) -> Result<()> {
        let index = self.probe(name).ok_or_else(|| self.full())?;
        let slot = &mut self.slots[index];
        if slot.is_occupied() {
            slot.record(value);
        } else {
            *slot = Slot {
                name,
                index,
                min: value,
                max: value,
                sum: i64::from(value),
                count: 1,
            };
            self.len += 1;
        }
        Ok(())
    }

    /// Folds the statistics of `other` into the slot for the same name,
    /// looked up by name rather than by `other.index`.
    pub fn absorb(&mut self, other: &Slot<'a>) -> Result<()> {
        let index = self.probe(other.name).ok_or_else(|| self.full())?;
        let slot = &mut self.slots[index];
        if slot.is_occupied() {
            slot.combine(other);
        } else {
            *slot = Slot { index, ..*other };
            self.len += 1;
        }
        Ok(())
    }

    /// Folds every station of `other` into `self`.
    pub fn merge<T>(&mut self, other: &StationTable<'a, T>) -> Result<()> {
        other.iter().try_for_each(|slot| self.absorb(slot))
    }

    pub fn get(&self, name: &[u8]) -> Option<&Slot<'a>> {
        self.probe(name)
            .map(|index| &self.slots[index])
            .filter(|slot| slot.is_occupied())
    }
}

impl<'a, S> StationTable<'a, S> {
    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot<'a>> + '_ {
        self.slots.iter().filter(|slot| slot.is_occupied())
    }

    pub(crate) fn into_slots(self) -> impl Iterator<Item = Slot<'a>> {
        self.slots
            .into_vec()
            .into_iter()
            .filter(Slot::is_occupied)
    }
}
