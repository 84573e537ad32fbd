//! Shared helpers for scanning

use std::ffi::OsStr;

use glob::Pattern;

use crate::error::ScanError;

/// Compiled exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    /// Compile patterns, failing on the first invalid one.
    pub fn new(patterns: &[String]) -> Result<Self, ScanError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ScanError::InvalidPattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check an entry name against the patterns.
    pub fn matches(&self, name: &OsStr) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let name = name.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&name))
    }
}
