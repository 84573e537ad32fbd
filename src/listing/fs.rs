//! Lister backed by the real filesystem

use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;
use std::vec;

use super::{DirectoryLister, EntryInfo};

/// Lists directories with `std::fs::read_dir`.
///
/// A directory's entries are read in full when it is opened and the OS
/// handle is closed before `open` returns, so a deep walk never holds more
/// than one directory handle at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl FsLister {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for FsLister {
    type Listing = FsListing;

    fn open(&self, path: &Path) -> io::Result<FsListing> {
        let entries = fs::read_dir(path)?;
        let entries: Vec<_> = entries
            .map(|entry| entry.and_then(|e| entry_info(&e)))
            .collect();
        Ok(FsListing {
            entries: entries.into_iter(),
        })
    }
}

/// Build an `EntryInfo` without following symlinks.
fn entry_info(entry: &DirEntry) -> io::Result<EntryInfo> {
    let file_type = entry.file_type()?;
    if file_type.is_dir() {
        return Ok(EntryInfo::directory(entry.file_name()));
    }
    let size = entry.metadata()?.len();
    Ok(EntryInfo::file(entry.file_name(), size))
}

/// Entries of one directory, in the order the OS returned them.
#[derive(Debug)]
pub struct FsListing {
    entries: vec::IntoIter<io::Result<EntryInfo>>,
}

impl Iterator for FsListing {
    type Item = io::Result<EntryInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}
