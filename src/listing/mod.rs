//! Directory enumeration
//!
//! The builder never touches the filesystem directly. It asks a
//! [`DirectoryLister`] to open a path and then drains the returned listing.
//! Dropping the listing closes it, so every opened handle is released on
//! every exit path.
//!
//! - `FsLister`: the real filesystem via `std::fs::read_dir`
//! - `MemoryFs`: a simulated filesystem with injectable failures

mod fs;
mod memory;

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;

pub use fs::{FsLister, FsListing};
pub use memory::{MemoryFs, MemoryListing};

/// Kind of a directory entry as reported by the lister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    /// Anything that is not a directory. Symlinks land here and are not followed.
    File,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: OsString,
    pub kind: EntryKind,
    /// Exact byte size for files, 0 for directories.
    pub size: u64,
}

impl EntryInfo {
    pub fn directory(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size: 0,
        }
    }

    pub fn file(name: impl Into<OsString>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// The "." and ".." pseudo-entries.
    pub fn is_pseudo(&self) -> bool {
        is_pseudo_name(&self.name)
    }

    /// Name for display; non-UTF-8 bytes are replaced.
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

pub(crate) fn is_pseudo_name(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// Enumerates the direct children of a directory.
pub trait DirectoryLister {
    type Listing: Iterator<Item = io::Result<EntryInfo>>;

    /// Begin listing `path`.
    ///
    /// Fails when the path does not exist, is not a directory, or cannot be
    /// read. Errors on individual entries are reported through the listing.
    fn open(&self, path: &Path) -> io::Result<Self::Listing>;
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for &L {
    type Listing = L::Listing;

    fn open(&self, path: &Path) -> io::Result<Self::Listing> {
        (**self).open(path)
    }
}
