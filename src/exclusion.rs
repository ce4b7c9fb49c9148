//! Session-wide exclude-from-scan pattern list.

use parking_lot::RwLock;
use regex::Regex;

use crate::error::{Result, WardenError};

/// URLs matching any of these patterns are off-limits to every scan.
/// Shared by all scans; executors consult it before issuing an attack.
#[derive(Debug, Default)]
pub struct ExclusionList {
    patterns: RwLock<Vec<Regex>>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern. The regex is compiled up front so a malformed pattern
    /// is rejected instead of silently never matching.
    pub fn add(&self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern)
            .map_err(|_| WardenError::BadFormat(format!("regex: {pattern}")))?;
        self.patterns.write().push(regex);
        Ok(())
    }

    pub fn clear(&self) {
        self.patterns.write().clear();
    }

    /// The pattern strings, in insertion order.
    pub fn patterns(&self) -> Vec<String> {
        self.patterns
            .read()
            .iter()
            .map(|r| r.as_str().to_string())
            .collect()
    }

    /// True if any pattern matches the URL.
    pub fn is_excluded(&self, url: &str) -> bool {
        self.patterns.read().iter().any(|r| r.is_match(url))
    }
}
