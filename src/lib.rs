//! Heft - directory size and content totals for large, deep trees
//!
//! The scanner lists a subtree into an arena-backed [`DirectoryTree`],
//! aggregating size, file and subdirectory counts bottom-up. Directories
//! that cannot be read are recorded and skipped rather than failing the
//! whole scan.

pub mod error;
pub mod listing;
pub mod output;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ScanError, TreeError};
pub use listing::{DirectoryLister, EntryInfo, EntryKind, FsLister, MemoryFs};
pub use output::{OutputConfig, TreeFormatter, print_json, to_json};
pub use stats::{ScanSummary, print_summary, write_summary};
pub use tree::{
    DirId, DirectoryNode, DirectoryTree, FileEntry, FileId, ScanConfig, TreeBuilder, build_tree,
};
