//! Pre-order traversal of a `DirectoryTree`
//!
//! Order at every level: the directory itself, then its files, then its
//! subdirectories, each in discovery order. The traversal keeps its own
//! work-list, so deep trees do not recurse natively.

use super::model::DirectoryTree;
use super::node::{DirId, DirectoryNode, FileEntry, FileId};

/// A node reached by a traversal.
#[derive(Debug, Clone, Copy)]
pub enum Visited<'a> {
    Directory(&'a DirectoryNode),
    File(&'a FileEntry),
}

impl<'a> Visited<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Visited::Directory(dir) => dir.name(),
            Visited::File(file) => file.name(),
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Visited::Directory(dir) => dir.size(),
            Visited::File(file) => file.size(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Visited::Directory(_))
    }
}

/// One step of a traversal.
#[derive(Debug, Clone, Copy)]
pub struct VisitEntry<'a> {
    pub item: Visited<'a>,
    pub depth: usize,
    /// Whether this is the last child printed under its parent.
    pub is_last: bool,
}

/// Callback driven by [`DirectoryTree::visit_with`].
pub trait TreeVisitor {
    type Error;

    fn visit(&mut self, entry: &VisitEntry<'_>) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Dir(DirId),
    File(FileId),
}

/// Lazy pre-order iterator returned by [`DirectoryTree::visit`].
pub struct Visit<'a> {
    tree: &'a DirectoryTree,
    stack: Vec<(Pending, usize, bool)>,
    max_depth: Option<usize>,
    files: bool,
}

impl<'a> Visit<'a> {
    fn new(tree: &'a DirectoryTree, start: DirId, depth: usize) -> Self {
        Self {
            tree,
            stack: vec![(Pending::Dir(start), depth, true)],
            max_depth: None,
            files: true,
        }
    }

    /// Do not descend below `depth`.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Yield directories only.
    pub fn dirs_only(mut self) -> Self {
        self.files = false;
        self
    }

    fn push_children(&mut self, dir: &DirectoryNode, depth: usize) {
        if self.max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        let child_depth = depth + 1;

        // Pushed in reverse so they pop in discovery order: files first.
        let subdirs = dir.subdirectory_ids();
        for (i, &id) in subdirs.iter().enumerate().rev() {
            let is_last = i + 1 == subdirs.len();
            self.stack.push((Pending::Dir(id), child_depth, is_last));
        }
        if self.files {
            let files = dir.file_ids();
            for (i, &id) in files.iter().enumerate().rev() {
                let is_last = i + 1 == files.len() && subdirs.is_empty();
                self.stack.push((Pending::File(id), child_depth, is_last));
            }
        }
    }
}

impl<'a> Iterator for Visit<'a> {
    type Item = VisitEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some((pending, depth, is_last)) = self.stack.pop() {
            let item = match pending {
                Pending::Dir(id) => {
                    let Some(dir) = tree.dir(id) else {
                        continue;
                    };
                    self.push_children(dir, depth);
                    Visited::Directory(dir)
                }
                Pending::File(id) => match tree.file(id) {
                    Some(file) => Visited::File(file),
                    None => continue,
                },
            };
            return Some(VisitEntry {
                item,
                depth,
                is_last,
            });
        }
        None
    }
}

impl DirectoryTree {
    /// Traverse the subtree at `start` in pre-order, starting at depth 0.
    pub fn visit(&self, start: DirId) -> Visit<'_> {
        Visit::new(self, start, 0)
    }

    /// Feed every node under `start` to `visitor`, `start` itself at `depth`.
    ///
    /// Stops at the first error the visitor returns.
    pub fn visit_with<V: TreeVisitor>(
        &self,
        start: DirId,
        depth: usize,
        visitor: &mut V,
    ) -> Result<(), V::Error> {
        for entry in Visit::new(self, start, depth) {
            visitor.visit(&entry)?;
        }
        Ok(())
    }
}
