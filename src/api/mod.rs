//! The control-plane boundary: named actions and views dispatched over
//! validated parameter maps.
//!
//! Every call is validated before anything mutates; a failed validation is
//! a typed error with no partial application. Mutating verbs are actions,
//! read-only verbs are views.

pub mod params;
pub mod response;

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, WardenError};
use crate::exclusion::ExclusionList;
use crate::policy::{catalog, AlertThreshold, AttackStrength, PluginId, PolicyId, PolicyStore};
use crate::scan::{Scan, ScanId, ScanRegistry, Target};

pub use params::Params;
pub use response::{ApiResponse, PolicySummary, ScanSummary, ScannerDescriptor};

const PARAM_URL: &str = "url";
const PARAM_REGEX: &str = "regex";
const PARAM_RECURSE: &str = "recurse";
const PARAM_IN_SCOPE_ONLY: &str = "inScopeOnly";
const PARAM_IDS: &str = "ids";
const PARAM_ID: &str = "id";
const PARAM_ATTACK_STRENGTH: &str = "attackStrength";
const PARAM_ALERT_THRESHOLD: &str = "alertThreshold";
const PARAM_POLICY_ID: &str = "policyId";
const PARAM_SCAN_ID: &str = "scanId";

/// Declared parameter surface of one action or view.
struct Endpoint {
    name: &'static str,
    required: &'static [&'static str],
}

const ACTIONS: &[Endpoint] = &[
    Endpoint { name: "scan", required: &[PARAM_URL] },
    Endpoint { name: "pause", required: &[] },
    Endpoint { name: "resume", required: &[] },
    Endpoint { name: "stop", required: &[] },
    Endpoint { name: "removeScan", required: &[PARAM_SCAN_ID] },
    Endpoint { name: "pauseAll", required: &[] },
    Endpoint { name: "resumeAll", required: &[] },
    Endpoint { name: "stopAll", required: &[] },
    Endpoint { name: "removeAll", required: &[] },
    Endpoint { name: "excludeFromScan", required: &[PARAM_REGEX] },
    Endpoint { name: "clearExcluded", required: &[] },
    Endpoint { name: "enableAllScanners", required: &[] },
    Endpoint { name: "disableAllScanners", required: &[] },
    Endpoint { name: "enableScanners", required: &[PARAM_IDS] },
    Endpoint { name: "disableScanners", required: &[PARAM_IDS] },
    Endpoint { name: "setEnabledPolicies", required: &[PARAM_IDS] },
    Endpoint { name: "setPolicyAttackStrength", required: &[PARAM_ID, PARAM_ATTACK_STRENGTH] },
    Endpoint { name: "setPolicyAlertThreshold", required: &[PARAM_ID, PARAM_ALERT_THRESHOLD] },
    Endpoint { name: "setScannerAttackStrength", required: &[PARAM_ID, PARAM_ATTACK_STRENGTH] },
    Endpoint { name: "setScannerAlertThreshold", required: &[PARAM_ID, PARAM_ALERT_THRESHOLD] },
];

const VIEWS: &[Endpoint] = &[
    Endpoint { name: "status", required: &[] },
    Endpoint { name: "scans", required: &[] },
    Endpoint { name: "messagesIds", required: &[PARAM_SCAN_ID] },
    Endpoint { name: "alertsIds", required: &[PARAM_SCAN_ID] },
    Endpoint { name: "excludedFromScan", required: &[] },
    Endpoint { name: "scanners", required: &[] },
    Endpoint { name: "policies", required: &[] },
];

/// Resolved starting point for a scan, produced by the host's site model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSite {
    pub site: String,
    pub start_url: String,
}

/// Maps a requested URL onto the host's site model. Site-tree lookup is an
/// external concern; the engine only needs a yes/no and a site identifier.
pub trait SiteResolver: Send + Sync {
    fn resolve(&self, url: &Url) -> Option<ResolvedSite>;
}

/// Default resolver: any URL with a host resolves, the site identifier is
/// `host` or `host:port`.
#[derive(Debug, Default)]
pub struct HostResolver;

impl SiteResolver for HostResolver {
    fn resolve(&self, url: &Url) -> Option<ResolvedSite> {
        let host = url.host_str()?;
        let site = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Some(ResolvedSite {
            site,
            start_url: url.to_string(),
        })
    }
}

/// Synchronous command dispatcher over the scan registry and policy store.
pub struct ControlApi {
    registry: Arc<ScanRegistry>,
    policy: Arc<PolicyStore>,
    exclusions: Arc<ExclusionList>,
    resolver: Arc<dyn SiteResolver>,
}

impl std::fmt::Debug for ControlApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlApi")
            .field("registry", &self.registry)
            .finish()
    }
}

impl ControlApi {
    pub fn new(
        registry: Arc<ScanRegistry>,
        policy: Arc<PolicyStore>,
        exclusions: Arc<ExclusionList>,
        resolver: Arc<dyn SiteResolver>,
    ) -> Self {
        Self {
            registry,
            policy,
            exclusions,
            resolver,
        }
    }

    pub fn registry(&self) -> &Arc<ScanRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> &Arc<PolicyStore> {
        &self.policy
    }

    pub fn exclusions(&self) -> &Arc<ExclusionList> {
        &self.exclusions
    }

    /// Dispatch a mutating action by name.
    pub fn handle_action(&self, name: &str, params: &Params) -> Result<ApiResponse> {
        let endpoint = ACTIONS
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| WardenError::UnknownAction(name.into()))?;
        validate_required(endpoint, params)?;
        debug!(action = name, "dispatching action");

        match name {
            "scan" => self.action_scan(params),
            "pause" => {
                self.scan_for(params)?.pause();
                Ok(ApiResponse::Ok)
            }
            "resume" => {
                self.scan_for(params)?.resume();
                Ok(ApiResponse::Ok)
            }
            "stop" => {
                self.scan_for(params)?.stop();
                Ok(ApiResponse::Ok)
            }
            "removeScan" => {
                let id = ScanId(params::required_id(params, PARAM_SCAN_ID)?);
                self.registry
                    .remove(id)
                    .ok_or_else(|| WardenError::DoesNotExist(PARAM_SCAN_ID.into()))?;
                Ok(ApiResponse::Ok)
            }
            "pauseAll" => {
                self.registry.pause_all();
                Ok(ApiResponse::Ok)
            }
            "resumeAll" => {
                self.registry.resume_all();
                Ok(ApiResponse::Ok)
            }
            "stopAll" => {
                self.registry.stop_all();
                Ok(ApiResponse::Ok)
            }
            "removeAll" => {
                self.registry.remove_all();
                Ok(ApiResponse::Ok)
            }
            "excludeFromScan" => {
                let pattern = params::required(params, PARAM_REGEX)?;
                self.exclusions.add(pattern)?;
                Ok(ApiResponse::Ok)
            }
            "clearExcluded" => {
                self.exclusions.clear();
                Ok(ApiResponse::Ok)
            }
            "enableAllScanners" => {
                self.policy.set_all_enabled(true);
                Ok(ApiResponse::Ok)
            }
            "disableAllScanners" => {
                self.policy.set_all_enabled(false);
                Ok(ApiResponse::Ok)
            }
            "enableScanners" => {
                self.set_scanners_enabled(params, true)?;
                Ok(ApiResponse::Ok)
            }
            "disableScanners" => {
                self.set_scanners_enabled(params, false)?;
                Ok(ApiResponse::Ok)
            }
            "setEnabledPolicies" => {
                let categories = parse_category_ids(params)?;
                self.policy.set_enabled_categories(&categories)?;
                Ok(ApiResponse::Ok)
            }
            "setPolicyAttackStrength" => {
                let category = self.category_from_params(params)?;
                let strength = parse_attack_strength(params)?;
                self.policy.set_category_attack_strength(category, strength)?;
                Ok(ApiResponse::Ok)
            }
            "setPolicyAlertThreshold" => {
                let category = self.category_from_params(params)?;
                let threshold = parse_alert_threshold(params)?;
                self.policy.set_category_alert_threshold(category, threshold)?;
                Ok(ApiResponse::Ok)
            }
            "setScannerAttackStrength" => {
                let id = PluginId(params::required_id(params, PARAM_ID)?);
                let strength = parse_attack_strength(params)?;
                self.policy.set_attack_strength(id, strength)?;
                Ok(ApiResponse::Ok)
            }
            "setScannerAlertThreshold" => {
                let id = PluginId(params::required_id(params, PARAM_ID)?);
                let threshold = parse_alert_threshold(params)?;
                self.policy.set_alert_threshold(id, threshold)?;
                Ok(ApiResponse::Ok)
            }
            _ => unreachable!("endpoint table covers every dispatch arm"),
        }
    }

    /// Dispatch a read-only view by name.
    pub fn handle_view(&self, name: &str, params: &Params) -> Result<ApiResponse> {
        let endpoint = VIEWS
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| WardenError::UnknownView(name.into()))?;
        validate_required(endpoint, params)?;

        match name {
            "status" => {
                let scan = self.scan_for(params)?;
                Ok(ApiResponse::Progress(scan.progress()))
            }
            "scans" => {
                let summaries = self
                    .registry
                    .all()
                    .iter()
                    .map(|scan| ScanSummary {
                        id: scan.id(),
                        progress: scan.progress(),
                        state: scan.state(),
                    })
                    .collect();
                Ok(ApiResponse::Scans(summaries))
            }
            "messagesIds" => {
                let scan = self.scan_for(params)?;
                Ok(ApiResponse::Ids(scan.evidence().snapshot_message_ids()))
            }
            "alertsIds" => {
                let scan = self.scan_for(params)?;
                Ok(ApiResponse::Ids(scan.evidence().snapshot_alert_ids()))
            }
            "excludedFromScan" => Ok(ApiResponse::Patterns(self.exclusions.patterns())),
            "scanners" => self.view_scanners(params),
            "policies" => Ok(ApiResponse::Policies(self.view_policies())),
            _ => unreachable!("endpoint table covers every dispatch arm"),
        }
    }

    fn action_scan(&self, params: &Params) -> Result<ApiResponse> {
        let raw_url = params::required(params, PARAM_URL)?;
        let url =
            Url::parse(raw_url).map_err(|_| WardenError::BadFormat(PARAM_URL.into()))?;
        let resolved = self
            .resolver
            .resolve(&url)
            .ok_or_else(|| WardenError::DoesNotExist(PARAM_URL.into()))?;

        let target = Target {
            site: resolved.site,
            start_url: resolved.start_url,
            recurse: params::optional_bool(params, PARAM_RECURSE, true)?,
            in_scope_only: params::optional_bool(params, PARAM_IN_SCOPE_ONLY, false)?,
        };
        Ok(ApiResponse::ScanId(self.registry.create_scan(target)))
    }

    /// The scan addressed by `scanId`, defaulting to the last created scan.
    fn scan_for(&self, params: &Params) -> Result<Arc<Scan>> {
        let scan = match params::optional_id(params, PARAM_SCAN_ID)? {
            Some(id) => self.registry.get(ScanId(id)),
            None => self.registry.last(),
        };
        scan.ok_or_else(|| WardenError::DoesNotExist(PARAM_SCAN_ID.into()))
    }

    /// Per-scanner enable/disable tolerates unknown or unparseable ids in
    /// the list: they are skipped with a warning, unlike the all-or-nothing
    /// category bulk action.
    fn set_scanners_enabled(&self, params: &Params, enabled: bool) -> Result<()> {
        let ids = params::required(params, PARAM_IDS)?;
        for raw in ids.split(',') {
            let raw = raw.trim();
            match raw.parse::<u32>() {
                Ok(id) => {
                    if self.policy.set_enabled(PluginId(id), enabled).is_err() {
                        warn!(scanner = id, "skipping unknown scanner id");
                    }
                }
                Err(_) => warn!(value = raw, "skipping unparseable scanner id"),
            }
        }
        Ok(())
    }

    fn category_from_params(&self, params: &Params) -> Result<PolicyId> {
        let id = PolicyId(params::required_id(params, PARAM_ID)?);
        if !self.policy.has_category(id) {
            return Err(WardenError::DoesNotExist(PARAM_ID.into()));
        }
        Ok(id)
    }

    fn view_scanners(&self, params: &Params) -> Result<ApiResponse> {
        let filter = match params::optional_id(params, PARAM_POLICY_ID)? {
            Some(id) => {
                let id = PolicyId(id);
                if !self.policy.has_category(id) {
                    return Err(WardenError::DoesNotExist(PARAM_POLICY_ID.into()));
                }
                Some(id)
            }
            None => None,
        };

        let plugins = self.policy.all_plugins();
        let known: std::collections::HashSet<PluginId> = plugins.iter().map(|p| p.id).collect();

        let descriptors = plugins
            .iter()
            .filter(|p| filter.map_or(true, |f| p.category == f))
            .map(|p| ScannerDescriptor {
                id: p.id,
                name: p.name.clone(),
                cwe_id: p.cwe_id,
                wasc_id: p.wasc_id,
                attack_strength: p.attack_strength.effective(),
                alert_threshold: p.alert_threshold.effective(),
                policy_id: p.category,
                enabled: p.enabled,
                all_dependencies_available: p.dependencies.iter().all(|d| known.contains(d)),
                dependencies: p.dependencies.clone(),
            })
            .collect();
        Ok(ApiResponse::Scanners(descriptors))
    }

    fn view_policies(&self) -> Vec<PolicySummary> {
        catalog::CATEGORIES
            .iter()
            .map(|(id, name)| PolicySummary {
                id: *id,
                name: (*name).to_string(),
                attack_strength: self.policy.aggregate_attack_strength(*id).uniform(),
                alert_threshold: self.policy.aggregate_alert_threshold(*id).uniform(),
                enabled: self.policy.is_category_fully_enabled(*id),
            })
            .collect()
    }
}

fn validate_required(endpoint: &Endpoint, params: &Params) -> Result<()> {
    for name in endpoint.required {
        params::required(params, name)?;
    }
    Ok(())
}

fn parse_category_ids(p: &Params) -> Result<Vec<PolicyId>> {
    let raw = params::required(p, PARAM_IDS)?;
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map(PolicyId)
                .map_err(|_| WardenError::IllegalParameter(PARAM_IDS.into()))
        })
        .collect()
}

fn parse_attack_strength(p: &Params) -> Result<AttackStrength> {
    let raw = params::required(p, PARAM_ATTACK_STRENGTH)?;
    AttackStrength::from_str_lenient(raw)
        .ok_or_else(|| WardenError::DoesNotExist(PARAM_ATTACK_STRENGTH.into()))
}

fn parse_alert_threshold(p: &Params) -> Result<AlertThreshold> {
    let raw = params::required(p, PARAM_ALERT_THRESHOLD)?;
    AlertThreshold::from_str_lenient(raw)
        .ok_or_else(|| WardenError::DoesNotExist(PARAM_ALERT_THRESHOLD.into()))
}

#[cfg(test)]
mod tests {
    use super::params::params;
    use super::*;
    use crate::notify::Notifier;
    use crate::scan::{ScanExecutor, ScanState, WorkerHandle};
    use std::time::Duration;

    struct IdleExecutor;

    impl ScanExecutor for IdleExecutor {
        fn run(&self, handle: WorkerHandle) {
            while handle.checkpoint() {
                std::thread::sleep(Duration::from_millis(5));
            }
        }
    }

    fn test_api() -> ControlApi {
        let policy = Arc::new(PolicyStore::new());
        let registry = Arc::new(ScanRegistry::new(
            Arc::new(IdleExecutor),
            Notifier::default(),
            100,
        ));
        ControlApi::new(
            registry,
            policy,
            Arc::new(ExclusionList::new()),
            Arc::new(HostResolver),
        )
    }

    #[test]
    fn unknown_action_and_view_are_rejected() {
        let api = test_api();
        assert!(matches!(
            api.handle_action("fly", &params([])),
            Err(WardenError::UnknownAction(_))
        ));
        assert!(matches!(
            api.handle_view("crystalBall", &params([])),
            Err(WardenError::UnknownView(_))
        ));
    }

    #[test]
    fn missing_required_parameter_short_circuits() {
        let api = test_api();
        assert!(matches!(
            api.handle_action("scan", &params([])),
            Err(WardenError::MissingParameter(_))
        ));
        assert!(matches!(
            api.handle_view("messagesIds", &params([])),
            Err(WardenError::MissingParameter(_))
        ));
    }

    #[test]
    fn scan_round_trip() {
        let api = test_api();
        let response = api
            .handle_action("scan", &params([("url", "https://example.com/")]))
            .unwrap();
        let id = response.scan_id().expect("scan returns the new id");

        match api.handle_view("scans", &params([])).unwrap() {
            ApiResponse::Scans(scans) => {
                assert_eq!(scans.len(), 1);
                assert_eq!(scans[0].id, id);
                assert_eq!(scans[0].state, ScanState::Running);
                assert!(scans[0].progress <= 100);
            }
            other => panic!("unexpected response: {other:?}"),
        }

        api.handle_action("removeScan", &params([("scanId", &id.to_string())]))
            .unwrap();
        match api.handle_view("scans", &params([])).unwrap() {
            ApiResponse::Scans(scans) => assert!(scans.is_empty()),
            other => panic!("unexpected response: {other:?}"),
        }

        let err = api
            .handle_action("removeScan", &params([("scanId", "12345")]))
            .unwrap_err();
        assert!(matches!(err, WardenError::DoesNotExist(_)));
    }

    #[test]
    fn scan_rejects_malformed_url() {
        let api = test_api();
        let err = api
            .handle_action("scan", &params([("url", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, WardenError::BadFormat(_)));
    }

    #[test]
    fn pause_defaults_to_last_created_scan() {
        let api = test_api();
        api.handle_action("scan", &params([("url", "https://a.example/")]))
            .unwrap();
        let last = api
            .handle_action("scan", &params([("url", "https://b.example/")]))
            .unwrap()
            .scan_id()
            .unwrap();

        api.handle_action("pause", &params([])).unwrap();
        assert_eq!(
            api.registry().get(last).unwrap().state(),
            ScanState::Paused
        );
        api.handle_action("stopAll", &params([])).unwrap();
    }

    #[test]
    fn pause_with_no_scans_is_does_not_exist() {
        let api = test_api();
        let err = api.handle_action("pause", &params([])).unwrap_err();
        assert!(matches!(err, WardenError::DoesNotExist(_)));
    }

    #[test]
    fn status_reflects_reported_progress() {
        let api = test_api();
        let id = api
            .handle_action("scan", &params([("url", "https://example.com/")]))
            .unwrap()
            .scan_id()
            .unwrap();

        let scan = api.registry().get(id).unwrap();
        scan.notify_progress(37);

        match api
            .handle_view("status", &params([("scanId", &id.to_string())]))
            .unwrap()
        {
            ApiResponse::Progress(p) => assert_eq!(p, 37),
            other => panic!("unexpected response: {other:?}"),
        }
        api.handle_action("stopAll", &params([])).unwrap();
    }

    #[test]
    fn evidence_views_return_recorded_ids() {
        let api = test_api();
        let id = api
            .handle_action("scan", &params([("url", "https://example.com/")]))
            .unwrap()
            .scan_id()
            .unwrap();
        let scan = api.registry().get(id).unwrap();
        scan.notify_message(11);
        scan.notify_message(12);
        scan.notify_alert(7);

        let scan_id = id.to_string();
        match api
            .handle_view("messagesIds", &params([("scanId", &scan_id)]))
            .unwrap()
        {
            ApiResponse::Ids(ids) => assert_eq!(ids, vec![11, 12]),
            other => panic!("unexpected response: {other:?}"),
        }
        match api
            .handle_view("alertsIds", &params([("scanId", &scan_id)]))
            .unwrap()
        {
            ApiResponse::Ids(ids) => assert_eq!(ids, vec![7]),
            other => panic!("unexpected response: {other:?}"),
        }
        api.handle_action("stopAll", &params([])).unwrap();
    }

    #[test]
    fn threshold_off_disables_scanner_in_view() {
        let api = test_api();
        api.handle_action(
            "setScannerAlertThreshold",
            &params([("id", "40012"), ("alertThreshold", "OFF")]),
        )
        .unwrap();

        let plugin = api.policy().plugin(PluginId(40012)).unwrap();
        assert!(!plugin.enabled);

        api.handle_action(
            "setScannerAlertThreshold",
            &params([("id", "40012"), ("alertThreshold", "high")]),
        )
        .unwrap();
        assert!(api.policy().plugin(PluginId(40012)).unwrap().enabled);
    }

    #[test]
    fn set_enabled_policies_is_all_or_nothing() {
        let api = test_api();
        let before: Vec<bool> = api.policy().all_plugins().iter().map(|p| p.enabled).collect();

        let err = api
            .handle_action("setEnabledPolicies", &params([("ids", "2,999")]))
            .unwrap_err();
        assert!(matches!(err, WardenError::DoesNotExist(_)));
        let after: Vec<bool> = api.policy().all_plugins().iter().map(|p| p.enabled).collect();
        assert_eq!(before, after);

        api.handle_action("setEnabledPolicies", &params([("ids", "2,4")]))
            .unwrap();
        for plugin in api.policy().all_plugins() {
            let in_selection = plugin.category == PolicyId(2) || plugin.category == PolicyId(4);
            assert_eq!(plugin.enabled, in_selection, "plugin {}", plugin.id);
        }
    }

    #[test]
    fn policies_view_reports_mixed_after_single_change() {
        let api = test_api();
        api.handle_action(
            "setPolicyAttackStrength",
            &params([("id", "4"), ("attackStrength", "HIGH")]),
        )
        .unwrap();

        let strength_of = |api: &ControlApi| match api.handle_view("policies", &params([])).unwrap()
        {
            ApiResponse::Policies(policies) => policies
                .iter()
                .find(|p| p.id == PolicyId(4))
                .unwrap()
                .attack_strength,
            other => panic!("unexpected response: {other:?}"),
        };
        assert_eq!(strength_of(&api), Some(AttackStrength::High));

        api.handle_action(
            "setScannerAttackStrength",
            &params([("id", "40018"), ("attackStrength", "low")]),
        )
        .unwrap();
        assert_eq!(strength_of(&api), None, "mixed now");
    }

    #[test]
    fn scanners_view_filters_by_policy_and_rejects_unknown() {
        let api = test_api();
        match api
            .handle_view("scanners", &params([("policyId", "4")]))
            .unwrap()
        {
            ApiResponse::Scanners(scanners) => {
                assert!(!scanners.is_empty());
                assert!(scanners.iter().all(|s| s.policy_id == PolicyId(4)));
                assert!(scanners.iter().all(|s| s.all_dependencies_available));
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let err = api
            .handle_view("scanners", &params([("policyId", "777")]))
            .unwrap_err();
        assert!(matches!(err, WardenError::DoesNotExist(_)));
    }

    #[test]
    fn enable_scanners_skips_bad_ids() {
        let api = test_api();
        api.policy().set_all_enabled(false);
        api.handle_action("enableScanners", &params([("ids", "40012,bogus,555555")]))
            .unwrap();
        assert!(api.policy().plugin(PluginId(40012)).unwrap().enabled);
        assert!(!api.policy().plugin(PluginId(40018)).unwrap().enabled);
    }

    #[test]
    fn exclusion_actions_and_view() {
        let api = test_api();
        api.handle_action("excludeFromScan", &params([("regex", ".*logout.*")]))
            .unwrap();
        match api.handle_view("excludedFromScan", &params([])).unwrap() {
            ApiResponse::Patterns(patterns) => assert_eq!(patterns, vec![".*logout.*"]),
            other => panic!("unexpected response: {other:?}"),
        }

        let err = api
            .handle_action("excludeFromScan", &params([("regex", "[oops")]))
            .unwrap_err();
        assert!(matches!(err, WardenError::BadFormat(_)));

        api.handle_action("clearExcluded", &params([])).unwrap();
        match api.handle_view("excludedFromScan", &params([])).unwrap() {
            ApiResponse::Patterns(patterns) => assert!(patterns.is_empty()),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn negative_scan_id_is_illegal() {
        let api = test_api();
        let err = api
            .handle_action("removeScan", &params([("scanId", "-1")]))
            .unwrap_err();
        assert!(matches!(err, WardenError::IllegalParameter(_)));
    }
}
