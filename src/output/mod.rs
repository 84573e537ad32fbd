//! Tree formatting and display
//!
//! This module provides formatters for outputting scan results:
//! - Console tree output with colors
//! - JSON output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Shared utility functions (size formatting, prefix calculation)
//! - `tree` - Tree formatter built on the tree's pre-order traversal
//! - `json` - JSON output

mod config;
mod json;
mod tree;
mod utils;

// Re-export public types and functions
pub use config::OutputConfig;
pub use json::{print_json, to_json};
pub use tree::TreeFormatter;
pub use utils::{format_number, format_size, format_size_precise, plural};
