//! Logical response shapes of the control-plane views.
//!
//! Only the shape is defined here; rendering to a concrete wire format is
//! the host's concern.

use serde::Serialize;

use crate::policy::{AlertThreshold, AttackStrength, PluginId, PolicyId};
use crate::scan::{ScanId, ScanState};

/// One entry of the `scans` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub id: ScanId,
    pub progress: u8,
    pub state: ScanState,
}

/// One entry of the `scanners` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerDescriptor {
    pub id: PluginId,
    pub name: String,
    pub cwe_id: Option<u32>,
    pub wasc_id: Option<u32>,
    /// Effective strength, sentinel resolved.
    pub attack_strength: AttackStrength,
    /// Effective threshold, sentinel resolved.
    pub alert_threshold: AlertThreshold,
    pub policy_id: PolicyId,
    pub enabled: bool,
    pub all_dependencies_available: bool,
    pub dependencies: Vec<PluginId>,
}

/// One entry of the `policies` view. `None` for a setting means the plugins
/// in the category do not share a value ("mixed").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    pub id: PolicyId,
    pub name: String,
    pub attack_strength: Option<AttackStrength>,
    pub alert_threshold: Option<AlertThreshold>,
    pub enabled: bool,
}

/// Result of a dispatched action or view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiResponse {
    /// Generic acknowledgement of a mutating action.
    Ok,
    /// Id of a newly created scan.
    ScanId(ScanId),
    /// Progress percentage of one scan.
    Progress(u8),
    /// Message or alert ids of one scan.
    Ids(Vec<i64>),
    /// Exclusion patterns.
    Patterns(Vec<String>),
    Scans(Vec<ScanSummary>),
    Scanners(Vec<ScannerDescriptor>),
    Policies(Vec<PolicySummary>),
}

impl ApiResponse {
    /// The created scan id, for callers of the `scan` action.
    pub fn scan_id(&self) -> Option<ScanId> {
        match self {
            Self::ScanId(id) => Some(*id),
            _ => None,
        }
    }
}
