//! Directory tree model and builder
//!
//! This module holds the in-memory tree and the scan that fills it:
//!
//! - `DirectoryTree`: arena of directories and files with attach, release
//!   and traversal operations; knows nothing about the filesystem
//! - `TreeBuilder`: walks a `DirectoryLister` from a root path and computes
//!   inclusive size and count totals bottom-up

mod builder;
mod config;
mod model;
mod node;
mod utils;
mod visit;

// Re-export public types
pub use builder::{TreeBuilder, build_tree};
pub use config::{DEFAULT_PROGRESS_INTERVAL, ScanConfig};
pub use model::{DirectoryTree, Released};
pub use node::{DirId, DirectoryNode, FileEntry, FileId, SkippedDirectory, Totals};
pub use utils::ExcludeSet;
pub use visit::{TreeVisitor, Visit, VisitEntry, Visited};
