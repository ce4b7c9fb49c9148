use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration from `.scanwarden.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// Settings applied to every new scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Cap on retained message ids per scan; exchanges beyond it are still
    /// counted but not listed.
    #[serde(default = "default_max_visible_evidence")]
    pub max_visible_evidence: usize,
}

fn default_max_visible_evidence() -> usize {
    1000
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_visible_evidence: default_max_visible_evidence(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# scanwarden configuration

[scanner]
# Cap on retained message ids per scan. Exchanges past the cap are still
# counted in the total but not listed, keeping large scans responsive.
max_visible_evidence = 1000
"#
    }
}
