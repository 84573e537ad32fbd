//! Tree formatter
//!
//! This module provides `TreeFormatter` which renders a `DirectoryTree` with
//! box-drawing connectors and per-directory totals. Rendering is driven by
//! the tree's own pre-order traversal, so it never recurses.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::tree::{DirectoryNode, DirectoryTree, TreeVisitor, VisitEntry, Visited};

use super::config::OutputConfig;
use super::utils::{branch_prefix, format_size, plural};

/// Formatter for directory tree output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render to a plain string without colors.
    pub fn format(&self, tree: &DirectoryTree) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing into a Vec cannot fail.
        let _ = self.write(tree, &mut out);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Print to stdout, colored when configured.
    pub fn print(&self, tree: &DirectoryTree) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write(tree, &mut stdout)
    }

    pub fn write<W: WriteColor>(&self, tree: &DirectoryTree, out: &mut W) -> io::Result<()> {
        let mut writer = TreeWriter {
            out,
            ancestors_last: Vec::new(),
        };
        let mut visit = tree.visit(tree.root_id());
        if let Some(depth) = self.config.max_depth {
            visit = visit.max_depth(depth);
        }
        if !self.config.show_files {
            visit = visit.dirs_only();
        }
        for entry in visit {
            writer.visit(&entry)?;
        }
        Ok(())
    }
}

struct TreeWriter<'w, W> {
    out: &'w mut W,
    ancestors_last: Vec<bool>,
}

impl<W: WriteColor> TreeWriter<'_, W> {
    fn write_dir(&mut self, dir: &DirectoryNode) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(self.out, "{}", dir.name())?;
        self.out.reset()?;

        write!(self.out, "  ")?;
        self.write_size(dir.size())?;
        write!(
            self.out,
            "  ({}, {})",
            plural(dir.file_count(), "file", "files"),
            plural(dir.subdir_count(), "dir", "dirs")
        )?;

        if !dir.is_complete() {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(self.out, "  [{} unreadable]", dir.unreadable().len())?;
            self.out.reset()?;
        }
        writeln!(self.out)
    }

    fn write_size(&mut self, bytes: u64) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(self.out, "{}", format_size(bytes))?;
        self.out.reset()
    }
}

impl<W: WriteColor> TreeVisitor for TreeWriter<'_, W> {
    type Error = io::Error;

    fn visit(&mut self, entry: &VisitEntry<'_>) -> io::Result<()> {
        if entry.depth > 0 {
            self.ancestors_last.truncate(entry.depth - 1);
            let prefix = branch_prefix(&self.ancestors_last, entry.is_last);
            write!(self.out, "{}", prefix)?;
            self.ancestors_last.push(entry.is_last);
        }

        match entry.item {
            Visited::Directory(dir) => self.write_dir(dir),
            Visited::File(file) => {
                write!(self.out, "{}  ", file.name())?;
                self.write_size(file.size())?;
                writeln!(self.out)
            }
        }
    }
}
