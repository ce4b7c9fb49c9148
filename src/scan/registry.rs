use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error};

use crate::notify::Notifier;

use super::lifecycle::{Scan, ScanExecutor, ScanId, Target, WorkerHandle};

/// Owns every scan in the process and drives their worker threads.
///
/// Scan ids are assigned from a monotonically increasing counter; entries
/// live until an explicit `remove`/`remove_all` — there is no automatic
/// eviction. The most recently created scan is tracked separately so
/// control-plane calls can omit the scan id.
pub struct ScanRegistry {
    scans: RwLock<BTreeMap<ScanId, Arc<Scan>>>,
    last: RwLock<Option<Arc<Scan>>>,
    next_id: AtomicU32,
    executor: Arc<dyn ScanExecutor>,
    notifier: Notifier,
    max_visible_evidence: usize,
}

impl std::fmt::Debug for ScanRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanRegistry")
            .field("scans", &self.scans.read().len())
            .field("next_id", &self.next_id.load(Ordering::SeqCst))
            .finish()
    }
}

impl ScanRegistry {
    pub fn new(
        executor: Arc<dyn ScanExecutor>,
        notifier: Notifier,
        max_visible_evidence: usize,
    ) -> Self {
        Self {
            scans: RwLock::new(BTreeMap::new()),
            last: RwLock::new(None),
            next_id: AtomicU32::new(0),
            executor,
            notifier,
            max_visible_evidence,
        }
    }

    /// Create a scan against the resolved target, start it and hand it to a
    /// dedicated worker thread. Returns the assigned id.
    pub fn create_scan(&self, target: Target) -> ScanId {
        let id = ScanId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let scan = Arc::new(Scan::new(
            id,
            target,
            self.max_visible_evidence,
            self.notifier.clone(),
        ));

        self.scans.write().insert(id, Arc::clone(&scan));
        *self.last.write() = Some(Arc::clone(&scan));

        scan.start();
        debug!(scan = %id, site = scan.site(), "scan started");

        let executor = Arc::clone(&self.executor);
        let worker_scan = Arc::clone(&scan);
        std::thread::spawn(move || {
            let handle = WorkerHandle::new(Arc::clone(&worker_scan));
            // A panicking scan check is scan-local: log it and finish the
            // scan without touching the registry or its siblings.
            let outcome = catch_unwind(AssertUnwindSafe(|| executor.run(handle)));
            if let Err(panic) = outcome {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".into());
                error!(scan = %worker_scan.id(), %message, "scan worker failed");
            }
            worker_scan.notify_scanner_complete();
        });

        id
    }

    pub fn get(&self, id: ScanId) -> Option<Arc<Scan>> {
        self.scans.read().get(&id).cloned()
    }

    /// The most recently created scan, whatever state it is in.
    pub fn last(&self) -> Option<Arc<Scan>> {
        self.last.read().clone()
    }

    /// Every scan, ordered by id.
    pub fn all(&self) -> Vec<Arc<Scan>> {
        self.scans.read().values().cloned().collect()
    }

    /// Remove a scan, force-stopping its worker first. A still-running
    /// worker would otherwise keep probing a target nobody can see anymore.
    pub fn remove(&self, id: ScanId) -> Option<Arc<Scan>> {
        let removed = self.scans.write().remove(&id)?;
        removed.stop();

        let mut last = self.last.write();
        if last.as_ref().map(|s| s.id()) == Some(id) {
            *last = None;
        }
        Some(removed)
    }

    /// Remove every scan, force-stopping the running ones.
    pub fn remove_all(&self) {
        let drained: Vec<_> = {
            let mut scans = self.scans.write();
            std::mem::take(&mut *scans).into_values().collect()
        };
        for scan in &drained {
            scan.stop();
        }
        *self.last.write() = None;
    }

    /// Pause every running scan; scans not running are skipped.
    pub fn pause_all(&self) {
        for scan in self.all() {
            scan.pause();
        }
    }

    /// Resume every paused scan; scans not paused are skipped.
    pub fn resume_all(&self) {
        for scan in self.all() {
            scan.resume();
        }
    }

    /// Stop every active scan; already-finished scans are skipped.
    pub fn stop_all(&self) {
        for scan in self.all() {
            scan.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanState;
    use std::time::Duration;

    /// Loops at the checkpoint until stopped, never finishing on its own.
    struct IdleExecutor;

    impl ScanExecutor for IdleExecutor {
        fn run(&self, handle: WorkerHandle) {
            while handle.checkpoint() {
                std::thread::sleep(Duration::from_millis(5));
            }
        }
    }

    /// Reports progress then completes immediately.
    struct CompletingExecutor;

    impl ScanExecutor for CompletingExecutor {
        fn run(&self, handle: WorkerHandle) {
            handle.report_progress(100);
        }
    }

    struct PanickingExecutor;

    impl ScanExecutor for PanickingExecutor {
        fn run(&self, _handle: WorkerHandle) {
            panic!("boom");
        }
    }

    fn target(site: &str) -> Target {
        Target {
            site: site.into(),
            start_url: format!("https://{site}/"),
            recurse: true,
            in_scope_only: false,
        }
    }

    fn registry(executor: Arc<dyn ScanExecutor>) -> ScanRegistry {
        ScanRegistry::new(executor, Notifier::default(), 100)
    }

    fn wait_for<F: Fn() -> bool>(cond: F) {
        for _ in 0..200 {
            if cond() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("condition not reached in time");
    }

    #[test]
    fn ids_are_sequential_and_last_tracks_newest() {
        let registry = registry(Arc::new(IdleExecutor));
        let a = registry.create_scan(target("a.example"));
        let b = registry.create_scan(target("b.example"));
        assert_eq!(a, ScanId(0));
        assert_eq!(b, ScanId(1));
        assert_eq!(registry.last().unwrap().id(), b);
        registry.stop_all();
    }

    #[test]
    fn created_scan_is_running() {
        let registry = registry(Arc::new(IdleExecutor));
        let id = registry.create_scan(target("example.com"));
        let scan = registry.get(id).unwrap();
        assert_eq!(scan.state(), ScanState::Running);
        registry.stop_all();
    }

    #[test]
    fn remove_force_stops_a_running_scan() {
        let registry = registry(Arc::new(IdleExecutor));
        let id = registry.create_scan(target("example.com"));
        let removed = registry.remove(id).expect("scan exists");
        assert_eq!(removed.state(), ScanState::Finished);
        assert!(registry.get(id).is_none());
        assert!(registry.last().is_none());
    }

    #[test]
    fn remove_unknown_id_returns_none() {
        let registry = registry(Arc::new(IdleExecutor));
        assert!(registry.remove(ScanId(99)).is_none());
    }

    #[test]
    fn remove_all_clears_and_stops() {
        let registry = registry(Arc::new(IdleExecutor));
        registry.create_scan(target("a.example"));
        registry.create_scan(target("b.example"));
        registry.remove_all();
        assert!(registry.all().is_empty());
        assert!(registry.last().is_none());
    }

    #[test]
    fn bulk_transitions_skip_invalid_states() {
        let registry = registry(Arc::new(IdleExecutor));
        let a = registry.create_scan(target("a.example"));
        let b = registry.create_scan(target("b.example"));

        registry.get(b).unwrap().stop();
        registry.pause_all();
        assert_eq!(registry.get(a).unwrap().state(), ScanState::Paused);
        assert_eq!(registry.get(b).unwrap().state(), ScanState::Finished);

        registry.resume_all();
        assert_eq!(registry.get(a).unwrap().state(), ScanState::Running);
        registry.stop_all();
        assert_eq!(registry.get(a).unwrap().state(), ScanState::Finished);
    }

    #[test]
    fn worker_completion_finishes_the_scan() {
        let registry = registry(Arc::new(CompletingExecutor));
        let id = registry.create_scan(target("example.com"));
        let scan = registry.get(id).unwrap();
        wait_for(|| scan.state() == ScanState::Finished);
        assert_eq!(scan.progress(), 100);
        assert!(scan.time_finished().is_some());
    }

    #[test]
    fn worker_panic_is_scan_local() {
        let registry = registry(Arc::new(PanickingExecutor));
        let failing = registry.create_scan(target("a.example"));
        let scan = registry.get(failing).unwrap();
        wait_for(|| scan.state() == ScanState::Finished);

        // The registry stays usable for other scans.
        assert_eq!(registry.all().len(), 1);
    }
}
