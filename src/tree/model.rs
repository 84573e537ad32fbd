//! Arena-backed directory tree
//!
//! Every directory and file lives in a slot of the tree's arena and is
//! addressed by a `DirId` or `FileId`. Ownership is expressed by membership
//! in a parent's child list; `parent` fields are plain ids used only to
//! walk upwards. Releasing a node empties its slot, so stale ids resolve to
//! `None` instead of dangling.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::TreeError;

use super::node::{DirId, DirectoryNode, FileEntry, FileId, SkippedDirectory, Totals};
use super::visit::Visited;

/// Counts of what a `release_subtree` call freed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Released {
    pub directories: usize,
    pub files: usize,
}

/// In-memory tree of directories and files with aggregate totals.
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    dirs: Vec<Option<DirectoryNode>>,
    files: Vec<Option<FileEntry>>,
    root: DirId,
    skipped: Vec<SkippedDirectory>,
}

impl DirectoryTree {
    /// Create a tree holding only an empty root directory.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = DirId(0);
        let mut node = DirectoryNode::new(root, root_name.into(), None);
        // The tree itself owns the root.
        node.attached = true;
        Self {
            dirs: vec![Some(node)],
            files: Vec::new(),
            root,
            skipped: Vec::new(),
        }
    }

    pub fn root_id(&self) -> DirId {
        self.root
    }

    /// The root directory, or `None` once it has been released.
    pub fn root(&self) -> Option<&DirectoryNode> {
        self.dir(self.root)
    }

    pub fn dir(&self, id: DirId) -> Option<&DirectoryNode> {
        self.dirs.get(id.0).and_then(Option::as_ref)
    }

    pub fn file(&self, id: FileId) -> Option<&FileEntry> {
        self.files.get(id.0).and_then(Option::as_ref)
    }

    pub fn parent_of(&self, id: DirId) -> Option<&DirectoryNode> {
        self.dir(id)
            .and_then(|d| d.parent)
            .and_then(|p| self.dir(p))
    }

    /// Direct subdirectories of `id`, in discovery order.
    pub fn subdirectories(&self, id: DirId) -> impl Iterator<Item = &DirectoryNode> + '_ {
        self.dir(id)
            .into_iter()
            .flat_map(|d| d.subdirectories.iter())
            .filter_map(|&c| self.dir(c))
    }

    /// Direct files of `id`, in discovery order.
    pub fn files(&self, id: DirId) -> impl Iterator<Item = &FileEntry> + '_ {
        self.dir(id)
            .into_iter()
            .flat_map(|d| d.files.iter())
            .filter_map(|&f| self.file(f))
    }

    /// Directories that could not be listed during the scan.
    pub fn skipped(&self) -> &[SkippedDirectory] {
        &self.skipped
    }

    /// Directories currently held by the tree, attached or not.
    pub fn live_directories(&self) -> usize {
        self.dirs.iter().filter(|d| d.is_some()).count()
    }

    /// Files currently held by the tree, attached or not.
    pub fn live_files(&self) -> usize {
        self.files.iter().filter(|f| f.is_some()).count()
    }

    /// Rebuild the filesystem path of a directory from the parent chain.
    pub fn path_of(&self, id: DirId) -> Option<PathBuf> {
        let mut names = Vec::new();
        let mut current = self.dir(id)?;
        loop {
            names.push(current.name.as_str());
            match current.parent.and_then(|p| self.dir(p)) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Some(names.iter().rev().collect())
    }

    /// Allocate an empty, unattached directory that will belong to `parent`.
    pub fn create_directory(
        &mut self,
        name: impl Into<String>,
        parent: DirId,
    ) -> Result<DirId, TreeError> {
        self.dir(parent).ok_or(TreeError::UnknownDirectory(parent))?;
        self.dirs
            .try_reserve(1)
            .map_err(|source| TreeError::Allocation {
                what: "the directory arena",
                source,
            })?;
        let id = DirId(self.dirs.len());
        self.dirs
            .push(Some(DirectoryNode::new(id, name.into(), Some(parent))));
        Ok(id)
    }

    /// Allocate an unattached file of a known size that will belong to `parent`.
    pub fn create_file(
        &mut self,
        name: impl Into<String>,
        parent: DirId,
        size: u64,
    ) -> Result<FileId, TreeError> {
        self.dir(parent).ok_or(TreeError::UnknownDirectory(parent))?;
        self.files
            .try_reserve(1)
            .map_err(|source| TreeError::Allocation {
                what: "the file arena",
                source,
            })?;
        let id = FileId(self.files.len());
        self.files.push(Some(FileEntry {
            id,
            name: name.into(),
            size,
            parent,
            attached: false,
        }));
        Ok(id)
    }

    /// Append `child` to `parent`'s subdirectories, handing ownership to `parent`.
    pub fn attach_subdirectory(&mut self, parent: DirId, child: DirId) -> Result<(), TreeError> {
        let node = self.dir(child).ok_or(TreeError::UnknownDirectory(child))?;
        let Some(expected) = node.parent else {
            return Err(TreeError::RootNotAttachable);
        };
        if node.attached {
            return Err(TreeError::DirectoryAlreadyAttached(child));
        }
        if expected != parent {
            return Err(TreeError::ParentMismatch {
                child: node.name.clone(),
                expected,
                actual: parent,
            });
        }

        let subdirectories = &mut self.dir_mut(parent)?.subdirectories;
        subdirectories
            .try_reserve(1)
            .map_err(|source| TreeError::Allocation {
                what: "a subdirectory list",
                source,
            })?;
        subdirectories.push(child);
        self.dir_mut(child)?.attached = true;
        Ok(())
    }

    /// Append `file` to `parent`'s files, handing ownership to `parent`.
    pub fn attach_file(&mut self, parent: DirId, file: FileId) -> Result<(), TreeError> {
        let entry = self.file(file).ok_or(TreeError::UnknownFile(file))?;
        if entry.attached {
            return Err(TreeError::FileAlreadyAttached(file));
        }
        if entry.parent != parent {
            return Err(TreeError::ParentMismatch {
                child: entry.name.clone(),
                expected: entry.parent,
                actual: parent,
            });
        }

        let files = &mut self.dir_mut(parent)?.files;
        files.try_reserve(1).map_err(|source| TreeError::Allocation {
            what: "a file list",
            source,
        })?;
        files.push(file);
        if let Some(entry) = self.files.get_mut(file.0).and_then(Option::as_mut) {
            entry.attached = true;
        }
        Ok(())
    }

    /// Release a directory and everything it owns.
    ///
    /// The node is first detached from its parent and its totals are taken
    /// out of every ancestor, then the subtree is freed with an explicit
    /// work-list so depth never reaches the native stack. Skipped-directory
    /// records under the subtree go with it. Releasing the root empties the
    /// tree, unattached nodes included.
    pub fn release_subtree(&mut self, id: DirId) -> Result<Released, TreeError> {
        let node = self.dir(id).ok_or(TreeError::UnknownDirectory(id))?;
        let removed = node.totals;
        let parent = node.parent.filter(|_| node.attached);

        if let Some(parent) = parent {
            let siblings = &mut self.dir_mut(parent)?.subdirectories;
            siblings.retain(|&c| c != id);
            self.subtract_from_ancestors(parent, removed);
        }

        let mut released = Released::default();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(node) = self.dirs.get_mut(next.0).and_then(Option::take) else {
                continue;
            };
            released.directories += 1;
            for file in node.files {
                if self.files.get_mut(file.0).and_then(Option::take).is_some() {
                    released.files += 1;
                }
            }
            pending.extend(node.subdirectories);
        }

        if id == self.root {
            for slot in &mut self.dirs {
                if slot.take().is_some() {
                    released.directories += 1;
                }
            }
            for slot in &mut self.files {
                if slot.take().is_some() {
                    released.files += 1;
                }
            }
            self.skipped.clear();
        } else {
            let dirs = &self.dirs;
            self.skipped
                .retain(|s| dirs.get(s.parent.0).is_some_and(Option::is_some));
        }
        Ok(released)
    }

    /// Recount a subtree from its files and structure, ignoring stored totals.
    pub fn recompute_totals(&self, id: DirId) -> Option<Totals> {
        let start = self.dir(id)?;
        let mut totals = Totals::default();
        for entry in self.visit(id) {
            match entry.item {
                Visited::Directory(dir) => {
                    if dir.id != start.id {
                        totals.add_subdir();
                    }
                    for _ in &dir.unreadable {
                        totals.add_subdir();
                    }
                }
                Visited::File(file) => totals.add_file(file.size),
            }
        }
        Some(totals)
    }

    pub(crate) fn set_totals(&mut self, id: DirId, totals: Totals) -> Result<(), TreeError> {
        self.dir_mut(id)?.totals = totals;
        Ok(())
    }

    /// Note that `name` under `parent` exists but could not be listed.
    pub(crate) fn record_unreadable(
        &mut self,
        parent: DirId,
        name: String,
        path: &Path,
        error: &io::Error,
    ) -> Result<(), TreeError> {
        self.skipped
            .try_reserve(1)
            .map_err(|source| TreeError::Allocation {
                what: "the skipped directory list",
                source,
            })?;
        let unreadable = &mut self.dir_mut(parent)?.unreadable;
        unreadable
            .try_reserve(1)
            .map_err(|source| TreeError::Allocation {
                what: "an unreadable list",
                source,
            })?;
        unreadable.push(name);
        self.skipped.push(SkippedDirectory {
            parent,
            path: path.to_path_buf(),
            kind: error.kind(),
        });
        Ok(())
    }

    fn dir_mut(&mut self, id: DirId) -> Result<&mut DirectoryNode, TreeError> {
        self.dirs
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownDirectory(id))
    }

    fn subtract_from_ancestors(&mut self, start: DirId, removed: Totals) {
        let mut current = Some(start);
        while let Some(id) = current {
            let Some(node) = self.dirs.get_mut(id.0).and_then(Option::as_mut) else {
                break;
            };
            let totals = &mut node.totals;
            totals.size = totals.size.saturating_sub(removed.size);
            totals.files = totals.files.saturating_sub(removed.files);
            totals.subdirs = totals.subdirs.saturating_sub(removed.subdirs.saturating_add(1));
            current = node.parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> dir_a -> file_x (100); root -> file_y (50)
    fn sample() -> (DirectoryTree, DirId, FileId, FileId) {
        let mut tree = DirectoryTree::new("root");
        let root = tree.root_id();
        let dir_a = tree.create_directory("dir_a", root).unwrap();
        tree.attach_subdirectory(root, dir_a).unwrap();
        let x = tree.create_file("file_x", dir_a, 100).unwrap();
        tree.attach_file(dir_a, x).unwrap();
        let y = tree.create_file("file_y", root, 50).unwrap();
        tree.attach_file(root, y).unwrap();
        tree.set_totals(
            dir_a,
            Totals {
                size: 100,
                files: 1,
                subdirs: 0,
            },
        )
        .unwrap();
        tree.set_totals(
            root,
            Totals {
                size: 150,
                files: 2,
                subdirs: 1,
            },
        )
        .unwrap();
        (tree, dir_a, x, y)
    }

    #[test]
    fn test_new_tree_has_empty_root() {
        let tree = DirectoryTree::new("/data");
        let root = tree.root().unwrap();
        assert_eq!(root.name(), "/data");
        assert!(root.is_root());
        assert_eq!(root.size(), 0);
        assert_eq!(root.file_count(), 0);
        assert_eq!(root.subdir_count(), 0);
        assert!(root.subdirectory_ids().is_empty());
        assert!(root.file_ids().is_empty());
    }

    #[test]
    fn test_attach_keeps_discovery_order() {
        let mut tree = DirectoryTree::new("root");
        let root = tree.root_id();
        for name in ["c", "a", "b"] {
            let id = tree.create_directory(name, root).unwrap();
            tree.attach_subdirectory(root, id).unwrap();
        }
        for (name, size) in [("z.txt", 1), ("y.txt", 2)] {
            let id = tree.create_file(name, root, size).unwrap();
            tree.attach_file(root, id).unwrap();
        }

        let dirs: Vec<_> = tree.subdirectories(root).map(|d| d.name()).collect();
        let files: Vec<_> = tree.files(root).map(|f| f.name()).collect();
        assert_eq!(dirs, vec!["c", "a", "b"]);
        assert_eq!(files, vec!["z.txt", "y.txt"]);
    }

    #[test]
    fn test_parent_navigation() {
        let (tree, dir_a, x, _) = sample();
        assert_eq!(tree.parent_of(dir_a).unwrap().name(), "root");
        assert_eq!(tree.file(x).unwrap().parent(), dir_a);
        assert!(tree.parent_of(tree.root_id()).is_none());
        assert_eq!(tree.path_of(dir_a).unwrap(), PathBuf::from("root/dir_a"));
    }

    #[test]
    fn test_attach_twice_is_rejected() {
        let mut tree = DirectoryTree::new("root");
        let root = tree.root_id();
        let child = tree.create_directory("child", root).unwrap();
        tree.attach_subdirectory(root, child).unwrap();
        assert!(matches!(
            tree.attach_subdirectory(root, child),
            Err(TreeError::DirectoryAlreadyAttached(_))
        ));

        let file = tree.create_file("f", root, 1).unwrap();
        tree.attach_file(root, file).unwrap();
        assert!(matches!(
            tree.attach_file(root, file),
            Err(TreeError::FileAlreadyAttached(_))
        ));
        assert_eq!(tree.root().unwrap().subdirectory_ids().len(), 1);
        assert_eq!(tree.root().unwrap().file_ids().len(), 1);
    }

    #[test]
    fn test_attach_to_wrong_parent_is_rejected() {
        let mut tree = DirectoryTree::new("root");
        let root = tree.root_id();
        let a = tree.create_directory("a", root).unwrap();
        let b = tree.create_directory("b", root).unwrap();
        tree.attach_subdirectory(root, a).unwrap();
        assert!(matches!(
            tree.attach_subdirectory(a, b),
            Err(TreeError::ParentMismatch { .. })
        ));
        assert!(matches!(
            tree.attach_subdirectory(a, root),
            Err(TreeError::RootNotAttachable)
        ));
    }

    #[test]
    fn test_create_under_unknown_parent_fails() {
        let mut tree = DirectoryTree::new("root");
        assert!(matches!(
            tree.create_directory("x", DirId(42)),
            Err(TreeError::UnknownDirectory(DirId(42)))
        ));
        assert!(matches!(
            tree.create_file("x", DirId(42), 1),
            Err(TreeError::UnknownDirectory(_))
        ));
    }

    #[test]
    fn test_release_subtree_makes_children_unreachable() {
        let (mut tree, dir_a, x, y) = sample();
        let released = tree.release_subtree(dir_a).unwrap();
        assert_eq!(
            released,
            Released {
                directories: 1,
                files: 1,
            }
        );
        assert!(tree.dir(dir_a).is_none());
        assert!(tree.file(x).is_none());
        assert!(tree.file(y).is_some());
        assert!(tree.root().unwrap().subdirectory_ids().is_empty());
        assert!(matches!(
            tree.release_subtree(dir_a),
            Err(TreeError::UnknownDirectory(_))
        ));
    }

    #[test]
    fn test_release_subtree_updates_ancestor_totals() {
        let (mut tree, dir_a, _, _) = sample();
        tree.release_subtree(dir_a).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.size(), 50);
        assert_eq!(root.file_count(), 1);
        assert_eq!(root.subdir_count(), 0);
        assert_eq!(tree.recompute_totals(tree.root_id()), Some(root.totals()));
    }

    #[test]
    fn test_release_root_empties_tree() {
        let (mut tree, _, _, _) = sample();
        let released = tree.release_subtree(tree.root_id()).unwrap();
        assert_eq!(released.directories, 2);
        assert_eq!(released.files, 2);
        assert!(tree.root().is_none());
        assert_eq!(tree.live_directories(), 0);
        assert_eq!(tree.live_files(), 0);
    }

    #[test]
    fn test_release_root_sweeps_unattached_nodes() {
        let (mut tree, dir_a, _, _) = sample();
        let loose = tree.create_directory("loose", dir_a).unwrap();
        let stray = tree.create_file("stray", tree.root_id(), 9).unwrap();

        let released = tree.release_subtree(tree.root_id()).unwrap();
        assert_eq!(released.directories, 3);
        assert_eq!(released.files, 3);
        assert!(tree.dir(loose).is_none());
        assert!(tree.file(stray).is_none());
        assert_eq!(tree.live_directories(), 0);
        assert_eq!(tree.live_files(), 0);
    }

    #[test]
    fn test_release_subtree_drops_its_skipped_records() {
        let (mut tree, dir_a, _, _) = sample();
        let root = tree.root_id();
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        tree.record_unreadable(dir_a, "locked".into(), Path::new("root/dir_a/locked"), &err)
            .unwrap();
        tree.record_unreadable(root, "private".into(), Path::new("root/private"), &err)
            .unwrap();
        assert_eq!(tree.skipped().len(), 2);

        tree.release_subtree(dir_a).unwrap();
        let paths: Vec<_> = tree.skipped().iter().map(|s| s.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("root/private")]);
        assert_eq!(tree.skipped()[0].parent, root);
    }

    #[test]
    fn test_release_empty_root() {
        let mut tree = DirectoryTree::new("empty");
        let released = tree.release_subtree(tree.root_id()).unwrap();
        assert_eq!(
            released,
            Released {
                directories: 1,
                files: 0,
            }
        );
    }

    #[test]
    fn test_release_very_deep_tree() {
        let mut tree = DirectoryTree::new("root");
        let mut parent = tree.root_id();
        for _ in 0..200_000 {
            let child = tree.create_directory("d", parent).unwrap();
            tree.attach_subdirectory(parent, child).unwrap();
            parent = child;
        }
        let released = tree.release_subtree(tree.root_id()).unwrap();
        assert_eq!(released.directories, 200_001);
    }

    #[test]
    fn test_recompute_counts_unreadable_children() {
        let mut tree = DirectoryTree::new("root");
        let root = tree.root_id();
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        tree.record_unreadable(root, "locked".into(), Path::new("root/locked"), &err)
            .unwrap();
        let totals = tree.recompute_totals(root).unwrap();
        assert_eq!(totals.subdirs, 1);
        assert_eq!(totals.size, 0);
        assert_eq!(tree.skipped().len(), 1);
        assert_eq!(tree.skipped()[0].kind, io::ErrorKind::PermissionDenied);
        assert!(!tree.root().unwrap().is_complete());
    }
}
