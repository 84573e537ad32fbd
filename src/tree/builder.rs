//! TreeBuilder - walks a directory and builds the tree with aggregate totals

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::listing::{DirectoryLister, EntryKind, FsLister};

use super::config::ScanConfig;
use super::model::DirectoryTree;
use super::node::{DirId, Totals};
use super::utils::ExcludeSet;

/// One directory being enumerated.
///
/// The frame owns the directory's listing; popping the frame closes it.
struct Frame<I> {
    dir: DirId,
    path: PathBuf,
    listing: I,
    totals: Totals,
}

/// Builds a [`DirectoryTree`] from a [`DirectoryLister`].
///
/// The walk is depth-first in listing order and keeps an explicit stack of
/// frames instead of recursing, so directory depth is bounded by memory
/// rather than by the thread's stack.
pub struct TreeBuilder<L = FsLister> {
    config: ScanConfig,
    lister: L,
}

impl TreeBuilder<FsLister> {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_lister(config, FsLister::new())
    }
}

impl<L: DirectoryLister> TreeBuilder<L> {
    pub fn with_lister(config: ScanConfig, lister: L) -> Self {
        Self { config, lister }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Scan `root` and return the tree, or `None` if `root` cannot be listed.
    ///
    /// Subdirectories that cannot be listed are counted as directories,
    /// contribute nothing else, and are recorded on their parent and in
    /// [`DirectoryTree::skipped`]. Only allocation failures and invalid
    /// exclude patterns abort the scan.
    pub fn build(&self, root: &Path) -> Result<Option<DirectoryTree>, ScanError> {
        let exclude = ExcludeSet::new(&self.config.exclude_patterns)?;

        let listing = match self.lister.open(root) {
            Ok(listing) => listing,
            Err(err) => {
                warn!(path = %root.display(), error = %err, "cannot read root directory");
                return Ok(None);
            }
        };

        let mut tree = DirectoryTree::new(root.display().to_string());
        let mut stack = vec![Frame {
            dir: tree.root_id(),
            path: root.to_path_buf(),
            listing,
            totals: Totals::default(),
        }];
        let mut files_seen: u64 = 0;

        debug!(
            path = %root.display(),
            excludes = !exclude.is_empty(),
            "scan started"
        );

        while let Some(frame) = stack.last_mut() {
            let entry = match frame.listing.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    warn!(dir = %frame.path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
                None => {
                    let Some(done) = stack.pop() else { break };
                    tree.set_totals(done.dir, done.totals)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.totals += done.totals;
                    }
                    continue;
                }
            };

            if entry.is_pseudo() || exclude.matches(&entry.name) {
                continue;
            }

            let parent = frame.dir;
            let path = frame.path.join(&entry.name);
            let name = entry.display_name();

            match entry.kind {
                EntryKind::File => {
                    let file = tree.create_file(name, parent, entry.size)?;
                    tree.attach_file(parent, file)?;
                    frame.totals.add_file(entry.size);

                    files_seen += 1;
                    if self
                        .config
                        .progress_interval
                        .is_some_and(|every| every > 0 && files_seen % every == 0)
                    {
                        info!(files = files_seen, "scan progress");
                    }
                }
                EntryKind::Directory => {
                    frame.totals.add_subdir();
                    match self.lister.open(&path) {
                        Ok(listing) => {
                            let child = tree.create_directory(name, parent)?;
                            tree.attach_subdirectory(parent, child)?;
                            debug!(path = %path.display(), "descending");
                            stack.try_reserve(1)?;
                            stack.push(Frame {
                                dir: child,
                                path,
                                listing,
                                totals: Totals::default(),
                            });
                        }
                        Err(err) => {
                            warn!(path = %path.display(), error = %err, "skipping unreadable directory");
                            tree.record_unreadable(parent, name, &path, &err)?;
                        }
                    }
                }
            }
        }

        if let Some(root) = tree.root() {
            info!(
                bytes = root.size(),
                files = root.file_count(),
                directories = root.subdir_count(),
                skipped = tree.skipped().len(),
                "scan finished"
            );
        }
        Ok(Some(tree))
    }
}

/// Scan `root` on the real filesystem with the default configuration.
pub fn build_tree(root: impl AsRef<Path>) -> Result<Option<DirectoryTree>, ScanError> {
    TreeBuilder::new(ScanConfig::default()).build(root.as_ref())
}
