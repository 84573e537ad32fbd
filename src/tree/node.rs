//! Node types stored in a `DirectoryTree`

use std::fmt;
use std::io;
use std::ops::AddAssign;
use std::path::PathBuf;

/// Handle to a directory in a [`DirectoryTree`](super::DirectoryTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirId(pub(crate) usize);

/// Handle to a file in a [`DirectoryTree`](super::DirectoryTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

impl fmt::Display for DirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dir#{}", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Inclusive aggregate of everything beneath a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub size: u64,
    pub files: u64,
    pub subdirs: u64,
}

impl Totals {
    pub fn add_file(&mut self, size: u64) {
        self.size = self.size.saturating_add(size);
        self.files = self.files.saturating_add(1);
    }

    /// Count one direct subdirectory, readable or not.
    pub fn add_subdir(&mut self) {
        self.subdirs = self.subdirs.saturating_add(1);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Folds a finished child's totals into its parent's running totals.
/// The child itself was already counted by `add_subdir`.
impl AddAssign for Totals {
    fn add_assign(&mut self, child: Totals) {
        self.size = self.size.saturating_add(child.size);
        self.files = self.files.saturating_add(child.files);
        self.subdirs = self.subdirs.saturating_add(child.subdirs);
    }
}

/// One directory of the scanned tree.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    pub(crate) id: DirId,
    pub(crate) name: String,
    pub(crate) totals: Totals,
    pub(crate) parent: Option<DirId>,
    pub(crate) attached: bool,
    pub(crate) subdirectories: Vec<DirId>,
    pub(crate) files: Vec<FileId>,
    pub(crate) unreadable: Vec<String>,
}

impl DirectoryNode {
    pub(crate) fn new(id: DirId, name: String, parent: Option<DirId>) -> Self {
        Self {
            id,
            name,
            totals: Totals::default(),
            parent,
            attached: false,
            subdirectories: Vec::new(),
            files: Vec::new(),
            unreadable: Vec::new(),
        }
    }

    pub fn id(&self) -> DirId {
        self.id
    }

    /// Entry name, or the path as given for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes in all files beneath this directory.
    pub fn size(&self) -> u64 {
        self.totals.size
    }

    /// Files beneath this directory, at any depth.
    pub fn file_count(&self) -> u64 {
        self.totals.files
    }

    /// Directories beneath this directory, at any depth, unreadable ones included.
    pub fn subdir_count(&self) -> u64 {
        self.totals.subdirs
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn subdirectory_ids(&self) -> &[DirId] {
        &self.subdirectories
    }

    pub fn file_ids(&self) -> &[FileId] {
        &self.files
    }

    /// Names of direct subdirectories that could not be listed.
    ///
    /// They count towards `subdir_count` but have no node of their own, so
    /// an empty readable directory and an unreadable one can be told apart.
    pub fn unreadable(&self) -> &[String] {
        &self.unreadable
    }

    /// Whether every direct subdirectory could be listed.
    pub fn is_complete(&self) -> bool {
        self.unreadable.is_empty()
    }
}

/// One file of the scanned tree.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub(crate) id: FileId,
    pub(crate) name: String,
    pub(crate) size: u64,
    pub(crate) parent: DirId,
    pub(crate) attached: bool,
}

impl FileEntry {
    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn parent(&self) -> DirId {
        self.parent
    }
}

/// A directory the scan could not list.
#[derive(Debug, Clone)]
pub struct SkippedDirectory {
    /// Directory whose listing contained the unreadable entry.
    pub parent: DirId,
    pub path: PathBuf,
    pub kind: io::ErrorKind,
}
