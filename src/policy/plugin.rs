use serde::{Deserialize, Serialize};

/// Stable identifier of a scanner plugin.
///
/// Distinct from [`PolicyId`] so a category id can never be passed where a
/// plugin id is expected; both serialize as bare integers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(pub u32);

impl std::fmt::Display for PluginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a policy category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub u32);

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How aggressively a plugin probes a target.
///
/// `Default` is a sentinel resolved to [`AttackStrength::Medium`] when an
/// effective value is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackStrength {
    Default,
    Low,
    Medium,
    High,
    Insane,
}

impl AttackStrength {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "insane" => Some(Self::Insane),
            _ => None,
        }
    }

    /// Resolve the `Default` sentinel to the concrete strength it stands for.
    pub fn effective(self) -> Self {
        match self {
            Self::Default => Self::Medium,
            other => other,
        }
    }
}

impl std::fmt::Display for AttackStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Insane => write!(f, "insane"),
        }
    }
}

/// Confidence required before a plugin reports a finding.
///
/// `Off` means the plugin never alerts and is therefore disabled; `Default`
/// is a sentinel resolved to [`AlertThreshold::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertThreshold {
    Default,
    Off,
    Low,
    Medium,
    High,
}

impl AlertThreshold {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "off" => Some(Self::Off),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Resolve the `Default` sentinel to the concrete threshold it stands for.
    pub fn effective(self) -> Self {
        match self {
            Self::Default => Self::Medium,
            other => other,
        }
    }
}

impl std::fmt::Display for AlertThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Off => write!(f, "off"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A scan-check plugin as the policy layer sees it.
///
/// The attack logic itself lives behind the scan executor; this struct is
/// only the configuration surface: identity, category membership, enabled
/// flag, strength/threshold settings, prerequisites and classification ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerPlugin {
    pub id: PluginId,
    pub name: String,
    pub category: PolicyId,
    pub enabled: bool,
    pub attack_strength: AttackStrength,
    pub alert_threshold: AlertThreshold,
    /// Plugin ids that must run before this one.
    pub dependencies: Vec<PluginId>,
    pub cwe_id: Option<u32>,
    pub wasc_id: Option<u32>,
}

impl ScannerPlugin {
    pub fn new(id: PluginId, name: impl Into<String>, category: PolicyId) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            enabled: true,
            attack_strength: AttackStrength::Default,
            alert_threshold: AlertThreshold::Default,
            dependencies: Vec::new(),
            cwe_id: None,
            wasc_id: None,
        }
    }

    pub fn with_classification(mut self, cwe_id: u32, wasc_id: u32) -> Self {
        self.cwe_id = Some(cwe_id);
        self.wasc_id = Some(wasc_id);
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<PluginId>) -> Self {
        self.dependencies = deps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_parses_case_insensitively() {
        assert_eq!(
            AttackStrength::from_str_lenient("INSANE"),
            Some(AttackStrength::Insane)
        );
        assert_eq!(
            AttackStrength::from_str_lenient(" Medium "),
            Some(AttackStrength::Medium)
        );
        assert_eq!(AttackStrength::from_str_lenient("extreme"), None);
    }

    #[test]
    fn abbreviated_names_are_rejected() {
        // Only the exact member names parse; no shorthand.
        assert_eq!(AttackStrength::from_str_lenient("med"), None);
        assert_eq!(AlertThreshold::from_str_lenient("med"), None);
    }

    #[test]
    fn threshold_parses_case_insensitively() {
        assert_eq!(
            AlertThreshold::from_str_lenient("OFF"),
            Some(AlertThreshold::Off)
        );
        assert_eq!(AlertThreshold::from_str_lenient("never"), None);
    }

    #[test]
    fn default_sentinels_resolve_to_medium() {
        assert_eq!(AttackStrength::Default.effective(), AttackStrength::Medium);
        assert_eq!(AlertThreshold::Default.effective(), AlertThreshold::Medium);
        assert_eq!(AlertThreshold::Off.effective(), AlertThreshold::Off);
    }
}
