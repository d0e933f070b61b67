//! Record boundary detection over a byte range.

use crate::error::{Error, MalformedKind, Result};

/// Finds the first occurrence of a byte in a haystack.
pub trait ByteFinder: Copy + Send + Sync {
    fn find(self, haystack: &[u8], needle: u8) -> Option<usize>;
}

/// Byte-by-byte search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

impl ByteFinder for Portable {
    #[inline]
    fn find(self, haystack: &[u8], needle: u8) -> Option<usize> {
        haystack.iter().position(|&b| b == needle)
    }
}

/// Vectorised search via `memchr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Memchr;

impl ByteFinder for Memchr {
    #[inline]
    fn find(self, haystack: &[u8], needle: u8) -> Option<usize> {
        memchr::memchr(needle, haystack)
    }
}

/// One `name;value` line. `offset` is absolute within the whole input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub offset: usize,
    pub name: &'a [u8],
    pub value: &'a [u8],
}

/// Forward-only iterator over the records of one range.
///
/// Each step looks for `;` first and then for `\n`. The last record may
/// lack its trailing newline.
pub struct Records<'a, F> {
    bytes: &'a [u8],
    base: usize,
    pos: usize,
    checked: bool,
    finder: F,
}

impl<'a, F: ByteFinder> Records<'a, F> {
    /// Scans `bytes`, which start at absolute offset `base` of the input.
    pub fn new(bytes: &'a [u8], base: usize, finder: F) -> Self {
        Self {
            bytes,
            base,
            pos: 0,
            checked: false,
            finder,
        }
    }

    /// Also reports lines that have no `;` instead of silently running into
    /// the next line.
    pub fn checked(bytes: &'a [u8], base: usize, finder: F) -> Self {
        Self {
            checked: true,
            ..Self::new(bytes, base, finder)
        }
    }
}

impl<'a, F: ByteFinder> Iterator for Records<'a, F> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.bytes[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let offset = self.base + self.pos;
        let missing = || Error::MalformedRecord {
            offset,
            kind: MalformedKind::MissingSeparator,
        };

        let Some(semi) = self.finder.find(rest, b';') else {
            if !self.checked {
                self.pos = self.bytes.len();
                return None;
            }
            self.pos += self.finder.find(rest, b'\n').map_or(rest.len(), |nl| nl + 1);
            return Some(Err(missing()));
        };
        if self.checked {
            if let Some(nl) = self.finder.find(&rest[..semi], b'\n') {
                self.pos += nl + 1;
                return Some(Err(missing()));
            }
        }

        let tail = &rest[semi + 1..];
        let (value, consumed) = match self.finder.find(tail, b'\n') {
            Some(nl) => (&tail[..nl], semi + nl + 2),
            None => (tail, rest.len()),
        };
        self.pos += consumed;
        Some(Ok(Record {
            offset,
            name: &rest[..semi],
            value,
        }))
    }
}
