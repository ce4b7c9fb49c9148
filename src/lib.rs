//! scanwarden — scan orchestration and policy control engine.
//!
//! Coordinates concurrently running vulnerability scans against target
//! sites, tracks their lifecycle and evidence, and exposes a control-plane
//! of named actions and views for driving scans and shaping the shared
//! scanner-plugin policy. The attack logic itself is pluggable: hosts
//! provide a [`ScanExecutor`] and the engine handles lifecycle, pause and
//! stop signalling, bounded evidence collection and policy consistency.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use scanwarden::{api::params::params, ScanExecutor, WardenBuilder, WorkerHandle};
//!
//! struct MyExecutor;
//! impl ScanExecutor for MyExecutor {
//!     fn run(&self, handle: WorkerHandle) {
//!         while handle.checkpoint() {
//!             // one unit of attack work, then report
//!             handle.report_progress(100);
//!             break;
//!         }
//!     }
//! }
//!
//! let api = WardenBuilder::new(Arc::new(MyExecutor)).build().unwrap();
//! let response = api
//!     .handle_action("scan", &params([("url", "https://example.com/")]))
//!     .unwrap();
//! println!("started scan {:?}", response.scan_id());
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod notify;
pub mod policy;
pub mod scan;

use std::sync::Arc;

pub use api::{ApiResponse, ControlApi, HostResolver, Params, ResolvedSite, SiteResolver};
pub use config::Config;
pub use error::{Result, WardenError};
pub use exclusion::ExclusionList;
pub use notify::{DeliveryContext, Notifier, ScanObserver, SyncDelivery};
pub use policy::{
    AlertThreshold, Aggregate, AttackStrength, PluginId, PolicyId, PolicyStore, ScannerPlugin,
};
pub use scan::{Scan, ScanExecutor, ScanId, ScanRegistry, ScanState, Target, WorkerHandle};

/// Wires registry, policy store, exclusions and resolver into a
/// [`ControlApi`]. Everything except the executor has a sensible default;
/// there are no process-global singletons, so several engines can coexist
/// in one process.
pub struct WardenBuilder {
    config: Config,
    executor: Arc<dyn ScanExecutor>,
    resolver: Arc<dyn SiteResolver>,
    delivery: Arc<dyn DeliveryContext>,
    observers: Vec<Arc<dyn ScanObserver>>,
    plugins: Option<Vec<ScannerPlugin>>,
}

impl WardenBuilder {
    pub fn new(executor: Arc<dyn ScanExecutor>) -> Self {
        Self {
            config: Config::default(),
            executor,
            resolver: Arc::new(HostResolver),
            delivery: Arc::new(SyncDelivery),
            observers: Vec::new(),
            plugins: None,
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn SiteResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Execution context observer notifications are marshalled onto.
    pub fn delivery_context(mut self, delivery: Arc<dyn DeliveryContext>) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Replace the built-in plugin catalog with a custom set.
    pub fn plugins(mut self, plugins: Vec<ScannerPlugin>) -> Self {
        self.plugins = Some(plugins);
        self
    }

    pub fn build(self) -> Result<ControlApi> {
        let mut notifier = Notifier::new(self.delivery);
        for observer in self.observers {
            notifier = notifier.with_observer(observer);
        }

        let policy = match self.plugins {
            Some(plugins) => PolicyStore::with_plugins(plugins)?,
            None => PolicyStore::new(),
        };
        let registry = ScanRegistry::new(
            self.executor,
            notifier,
            self.config.scanner.max_visible_evidence,
        );

        Ok(ControlApi::new(
            Arc::new(registry),
            Arc::new(policy),
            Arc::new(ExclusionList::new()),
            self.resolver,
        ))
    }
}
