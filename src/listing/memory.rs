//! In-memory simulated filesystem

use std::cell::Cell;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::vec;

use super::{DirectoryLister, EntryInfo};

#[derive(Debug, Clone)]
enum MemoryNode {
    Dir { children: Vec<OsString>, denied: bool },
    File { size: u64 },
    /// An entry whose metadata cannot be read.
    Broken,
}

/// A simulated filesystem for driving the builder without touching disk.
///
/// Children are listed in insertion order. Directories can be marked as
/// denied, which makes `open` fail with `PermissionDenied`, and entries can
/// be marked broken, which makes them show up as an error inside their
/// parent's listing.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, MemoryNode>,
    open_handles: Rc<Cell<usize>>,
    opened_total: Cell<usize>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory, creating missing parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        self
    }

    /// Add a file of `size` bytes, creating missing parents.
    pub fn add_file(&mut self, path: impl AsRef<Path>, size: u64) -> &mut Self {
        self.insert_leaf(path.as_ref(), MemoryNode::File { size });
        self
    }

    /// Add an entry that fails when its parent is listed.
    pub fn add_broken(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.insert_leaf(path.as_ref(), MemoryNode::Broken);
        self
    }

    /// Make a directory unreadable, creating it if needed.
    pub fn deny(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        if let Some(MemoryNode::Dir { denied, .. }) = self.nodes.get_mut(path) {
            *denied = true;
        }
        self
    }

    /// Listings currently open.
    pub fn open_handles(&self) -> usize {
        self.open_handles.get()
    }

    /// Listings successfully opened since creation.
    pub fn opened_total(&self) -> usize {
        self.opened_total.get()
    }

    fn insert_leaf(&mut self, path: &Path, node: MemoryNode) {
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent);
        }
        self.link_to_parent(path);
        self.nodes.insert(path.to_path_buf(), node);
    }

    fn ensure_dir(&mut self, path: &Path) {
        let missing: Vec<&Path> = path
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !self.nodes.contains_key(*p))
            .collect();
        for dir in missing.into_iter().rev() {
            self.link_to_parent(dir);
            self.nodes.insert(
                dir.to_path_buf(),
                MemoryNode::Dir {
                    children: Vec::new(),
                    denied: false,
                },
            );
        }
    }

    fn link_to_parent(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if let Some(MemoryNode::Dir { children, .. }) = self.nodes.get_mut(parent) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_os_string());
            }
        }
    }

    fn entry(&self, dir: &Path, name: &OsString) -> io::Result<EntryInfo> {
        match self.nodes.get(&dir.join(name)) {
            Some(MemoryNode::Dir { .. }) => Ok(EntryInfo::directory(name.clone())),
            Some(MemoryNode::File { size }) => Ok(EntryInfo::file(name.clone(), *size)),
            Some(MemoryNode::Broken) | None => Err(io::Error::other(format!(
                "cannot stat '{}'",
                dir.join(name).display()
            ))),
        }
    }
}

impl DirectoryLister for MemoryFs {
    type Listing = MemoryListing;

    fn open(&self, path: &Path) -> io::Result<MemoryListing> {
        let children = match self.nodes.get(path) {
            None => return Err(io::ErrorKind::NotFound.into()),
            Some(MemoryNode::Dir { denied: true, .. }) => {
                return Err(io::ErrorKind::PermissionDenied.into());
            }
            Some(MemoryNode::Dir { children, .. }) => children,
            Some(_) => return Err(io::ErrorKind::NotADirectory.into()),
        };

        let entries: Vec<_> = children.iter().map(|name| self.entry(path, name)).collect();

        self.open_handles.set(self.open_handles.get() + 1);
        self.opened_total.set(self.opened_total.get() + 1);
        Ok(MemoryListing {
            entries: entries.into_iter(),
            open_handles: Rc::clone(&self.open_handles),
        })
    }
}

/// Listing handed out by [`MemoryFs`]; closes itself on drop.
#[derive(Debug)]
pub struct MemoryListing {
    entries: vec::IntoIter<io::Result<EntryInfo>>,
    open_handles: Rc<Cell<usize>>,
}

impl Iterator for MemoryListing {
    type Item = io::Result<EntryInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }
}

impl Drop for MemoryListing {
    fn drop(&mut self) {
        self.open_handles.set(self.open_handles.get().saturating_sub(1));
    }
}
