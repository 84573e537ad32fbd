//! Configuration for the tree builder

/// Files between two progress log events.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Configuration for scanning behavior.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Glob patterns matched against entry names; matches are skipped entirely.
    pub exclude_patterns: Vec<String>,
    /// Log a progress event every N files. `None` disables progress events.
    pub progress_interval: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            progress_interval: Some(DEFAULT_PROGRESS_INTERVAL),
        }
    }
}
