//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Deepest level printed below the root; `None` prints everything.
    pub max_depth: Option<usize>,
    /// List files under their directories, not just directories.
    pub show_files: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            max_depth: None,
            show_files: false,
        }
    }
}
