//! Error types for the tree model and the scanner

use std::collections::TryReserveError;

use thiserror::Error;

use crate::tree::{DirId, FileId};

/// Errors raised by [`DirectoryTree`](crate::tree::DirectoryTree) mutations.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("directory {0} does not exist or was released")]
    UnknownDirectory(DirId),

    #[error("file {0} does not exist or was released")]
    UnknownFile(FileId),

    #[error("directory {0} is already attached")]
    DirectoryAlreadyAttached(DirId),

    #[error("file {0} is already attached")]
    FileAlreadyAttached(FileId),

    #[error("{child} was created under {expected}, not {actual}")]
    ParentMismatch {
        child: String,
        expected: DirId,
        actual: DirId,
    },

    /// The root owns itself and cannot be attached anywhere.
    #[error("the root directory cannot be attached to another directory")]
    RootNotAttachable,

    #[error("out of memory while growing {what}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
}

/// Fatal errors that abort a scan.
///
/// Unreadable directories are not errors: they are recorded on the tree
/// and the scan carries on.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("out of memory while growing the scan stack")]
    Allocation(#[from] TryReserveError),

    #[error("invalid exclude pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
