//! Read-only memory-mapped view of the measurements file.

use std::fs::{self, File};
use std::mem;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::config::Release;
use crate::error::{Error, Result};

/// The whole input file, mapped read-only.
///
/// Tables and reports borrow from [`Input::bytes`], so they have to be
/// dropped before the input is released.
#[derive(Debug)]
pub struct Input {
    path: PathBuf,
    map: Mmap,
}

impl Input {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| Error::StatFailed {
            path: path.to_owned(),
            source,
        })?;
        if metadata.len() == 0 {
            return Err(Error::EmptyFile {
                path: path.to_owned(),
            });
        }
        let file = File::open(path).map_err(|source| Error::OpenFailed {
            path: path.to_owned(),
            source,
        })?;
        // SAFETY: the map is read-only. The file must not be truncated while
        // it is mapped, which the program never does itself.
        let map = unsafe { Mmap::map(&file) }.map_err(|source| Error::MapFailed {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self {
            path: path.to_owned(),
            map,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Unmaps now, or leaks the mapping so process exit reclaims it.
    pub fn release(self, release: Release) {
        match release {
            Release::Now => drop(self),
            Release::OnExit => mem::forget(self),
        }
    }
}
