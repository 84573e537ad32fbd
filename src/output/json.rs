//! JSON output formatting
//!
//! The tree is written as a flat, pre-order list of directory records. Each
//! record names its parent by position in the list, so the document stays
//! two levels deep whatever the depth of the scanned tree, and neither the
//! encoder nor a consumer's parser has to recurse per directory.

use std::io;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::stats::ScanSummary;
use crate::tree::{DirId, DirectoryTree, Visited};

use super::config::OutputConfig;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ScanSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<JsonTree<'a>>,
}

/// Directory records in pre-order, streamed from the tree's own traversal.
struct JsonTree<'a> {
    tree: &'a DirectoryTree,
    max_depth: Option<usize>,
    files: bool,
}

#[derive(Serialize)]
struct JsonDir<'a> {
    /// Position of this record in the list.
    id: usize,
    /// Position of the parent record; `None` for the root.
    parent: Option<usize>,
    depth: usize,
    name: &'a str,
    size: u64,
    file_count: u64,
    subdir_count: u64,
    #[serde(skip_serializing_if = "no_names")]
    unreadable: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<JsonFiles<'a>>,
}

fn no_names(names: &&[String]) -> bool {
    names.is_empty()
}

impl Serialize for JsonTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut visit = self.tree.visit(self.tree.root_id()).dirs_only();
        if let Some(depth) = self.max_depth {
            visit = visit.max_depth(depth);
        }

        let mut seq = serializer.serialize_seq(None)?;
        let mut ancestors: Vec<usize> = Vec::new();
        for (id, entry) in visit.enumerate() {
            let Visited::Directory(dir) = entry.item else {
                continue;
            };
            ancestors.truncate(entry.depth);
            let parent = ancestors.last().copied();
            ancestors.push(id);

            let list_files =
                self.files && self.max_depth.is_none_or(|max| entry.depth < max);
            seq.serialize_element(&JsonDir {
                id,
                parent,
                depth: entry.depth,
                name: dir.name(),
                size: dir.size(),
                file_count: dir.file_count(),
                subdir_count: dir.subdir_count(),
                unreadable: dir.unreadable(),
                files: list_files.then_some(JsonFiles {
                    tree: self.tree,
                    id: dir.id(),
                }),
            })?;
        }
        seq.end()
    }
}

struct JsonFiles<'a> {
    tree: &'a DirectoryTree,
    id: DirId,
}

impl Serialize for JsonFiles<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for file in self.tree.files(self.id) {
            seq.serialize_element(&JsonFile {
                name: file.name(),
                size: file.size(),
            })?;
        }
        seq.end()
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    name: &'a str,
    size: u64,
}

/// Render the report; the tree is included only when given.
pub fn to_json(
    summary: &ScanSummary,
    tree: Option<&DirectoryTree>,
    config: &OutputConfig,
) -> serde_json::Result<String> {
    let report = JsonReport {
        summary,
        tree: tree.map(|tree| JsonTree {
            tree,
            max_depth: config.max_depth,
            files: config.show_files,
        }),
    };
    serde_json::to_string_pretty(&report)
}

/// Print the report as pretty-printed JSON to stdout.
pub fn print_json(
    summary: &ScanSummary,
    tree: Option<&DirectoryTree>,
    config: &OutputConfig,
) -> io::Result<()> {
    let json = to_json(summary, tree, config).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
