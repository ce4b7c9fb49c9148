use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use crate::notify::Notifier;

use super::evidence::EvidenceTracker;

/// Registry-assigned scan identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(pub u32);

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of a scan.
///
/// `NOT_STARTED → RUNNING → {PAUSED ⇄ RUNNING} → FINISHED`, with an explicit
/// stop short-circuiting `RUNNING`/`PAUSED` straight to `FINISHED`. A
/// finished scan never leaves `FINISHED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanState {
    NotStarted,
    Running,
    Paused,
    Finished,
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NOT_STARTED"),
            Self::Running => write!(f, "RUNNING"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Finished => write!(f, "FINISHED"),
        }
    }
}

/// Resolved starting point of a scan, produced by the host's site resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Site identifier (host:port or equivalent).
    pub site: String,
    /// URL the scan starts from.
    pub start_url: String,
    /// Whether child nodes of the start point are scanned too.
    pub recurse: bool,
    /// Restrict attacks to in-scope nodes only.
    pub in_scope_only: bool,
}

/// Cooperative pause/stop signalling between the control plane and the
/// worker thread. Stop is sticky; pause is level-triggered and observed at
/// worker checkpoints.
#[derive(Debug, Default)]
struct WorkerSignal {
    stopped: AtomicBool,
    paused: Mutex<bool>,
    wake: Condvar,
}

impl WorkerSignal {
    fn pause(&self) {
        *self.paused.lock() = true;
    }

    fn resume(&self) {
        *self.paused.lock() = false;
        self.wake.notify_all();
    }

    fn stop(&self) {
        // The flag flips under the pause lock: a worker in `checkpoint` holds
        // it between evaluating the predicate and parking, so the store and
        // wakeup cannot slip into that window and be lost.
        let _paused = self.paused.lock();
        self.stopped.store(true, Ordering::SeqCst);
        self.wake.notify_all();
    }

    fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Block while paused. Returns `false` once the scan is stopped.
    fn checkpoint(&self) -> bool {
        if self.stopped() {
            return false;
        }
        let mut paused = self.paused.lock();
        while *paused && !self.stopped() {
            self.wake.wait(&mut paused);
        }
        !self.stopped()
    }
}

/// One scan against a target site: lifecycle state, progress, timing and
/// evidence.
///
/// Control-plane transitions (`pause`, `resume`, `stop`) are fire-and-forget:
/// they flip state and signal the worker without waiting for it to react.
/// Transitions requested from an invalid source state are skipped, not
/// errored; callers that need to distinguish check the returned flag.
#[derive(Debug)]
pub struct Scan {
    id: ScanId,
    target: Target,
    state: Mutex<ScanState>,
    progress: AtomicU8,
    time_started: Mutex<Option<DateTime<Utc>>>,
    time_finished: Mutex<Option<DateTime<Utc>>>,
    evidence: EvidenceTracker,
    signal: WorkerSignal,
    notifier: Notifier,
}

impl Scan {
    pub fn new(id: ScanId, target: Target, max_visible_evidence: usize, notifier: Notifier) -> Self {
        Self {
            id,
            target,
            state: Mutex::new(ScanState::NotStarted),
            progress: AtomicU8::new(0),
            time_started: Mutex::new(None),
            time_finished: Mutex::new(None),
            evidence: EvidenceTracker::new(max_visible_evidence),
            signal: WorkerSignal::default(),
            notifier,
        }
    }

    pub fn id(&self) -> ScanId {
        self.id
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn site(&self) -> &str {
        &self.target.site
    }

    pub fn state(&self) -> ScanState {
        *self.state.lock()
    }

    pub fn progress(&self) -> u8 {
        self.progress.load(Ordering::SeqCst)
    }

    pub fn time_started(&self) -> Option<DateTime<Utc>> {
        *self.time_started.lock()
    }

    pub fn time_finished(&self) -> Option<DateTime<Utc>> {
        *self.time_finished.lock()
    }

    pub fn evidence(&self) -> &EvidenceTracker {
        &self.evidence
    }

    /// Begin the scan. Valid only from `NOT_STARTED`; resets progress and
    /// evidence and records the start time. Returns `false` if the scan was
    /// already started.
    pub fn start(&self) -> bool {
        let mut state = self.state.lock();
        if *state != ScanState::NotStarted {
            return false;
        }
        self.evidence.reset();
        self.progress.store(0, Ordering::SeqCst);
        *self.time_started.lock() = Some(Utc::now());
        *state = ScanState::Running;
        drop(state);
        self.notify_state(ScanState::Running);
        true
    }

    /// Suspend the worker between units of work. Valid only from `RUNNING`.
    pub fn pause(&self) -> bool {
        let mut state = self.state.lock();
        if *state != ScanState::Running {
            return false;
        }
        self.signal.pause();
        *state = ScanState::Paused;
        drop(state);
        self.notify_state(ScanState::Paused);
        true
    }

    /// Wake a paused worker. Valid only from `PAUSED`.
    pub fn resume(&self) -> bool {
        let mut state = self.state.lock();
        if *state != ScanState::Paused {
            return false;
        }
        self.signal.resume();
        *state = ScanState::Running;
        drop(state);
        self.notify_state(ScanState::Running);
        true
    }

    /// Request cooperative cancellation. The scan is `FINISHED` immediately;
    /// the worker observes the flag at its next checkpoint and exits.
    pub fn stop(&self) -> bool {
        {
            let mut state = self.state.lock();
            if !matches!(*state, ScanState::Running | ScanState::Paused) {
                return false;
            }
            self.signal.stop();
            *state = ScanState::Finished;
        }
        self.record_finish();
        true
    }

    /// True once a stop was requested. Workers poll this through
    /// [`WorkerHandle::checkpoint`].
    pub fn stop_requested(&self) -> bool {
        self.signal.stopped()
    }

    /// Worker-reported completion. No-op once the scan is already finished
    /// (an explicit stop beat the worker to it).
    pub fn notify_scanner_complete(&self) {
        {
            let mut state = self.state.lock();
            if !matches!(*state, ScanState::Running | ScanState::Paused) {
                return;
            }
            *state = ScanState::Finished;
        }
        self.record_finish();
    }

    /// Latest worker-reported percentage, stored verbatim. Values above 100
    /// are clamped; repeated or out-of-order reports are accepted.
    pub fn notify_progress(&self, percent: u8) {
        let percent = percent.min(100);
        self.progress.store(percent, Ordering::SeqCst);
        let id = self.id;
        self.notifier.notify(move |o| o.progress_changed(id, percent));
    }

    /// Record an observed exchange by its external message id.
    pub fn notify_message(&self, message_id: i64) {
        self.evidence.record_exchange(message_id);
        let id = self.id;
        self.notifier
            .notify(move |o| o.message_observed(id, message_id));
    }

    /// Record a raised finding by its external alert id. Ids carrying the
    /// invalid sentinel are ignored.
    pub fn notify_alert(&self, alert_id: i64) {
        if alert_id < 0 {
            return;
        }
        self.evidence.record_finding(alert_id);
        let id = self.id;
        self.notifier.notify(move |o| o.alert_found(id, alert_id));
    }

    /// Record the finish timestamp (once) and tell observers. Called after
    /// the state lock is released; notifications never run under a lock.
    fn record_finish(&self) {
        {
            let mut finished = self.time_finished.lock();
            if finished.is_none() {
                *finished = Some(Utc::now());
            }
        }
        self.notify_state(ScanState::Finished);
        let id = self.id;
        self.notifier.notify(move |o| o.scan_finished(id));
    }

    fn notify_state(&self, new_state: ScanState) {
        let id = self.id;
        self.notifier.notify(move |o| o.state_changed(id, new_state));
    }
}

/// The worker-side surface of a scan, handed to the executor.
///
/// Executors call [`checkpoint`](Self::checkpoint) between units of work:
/// it parks the thread while the scan is paused and returns `false` once a
/// stop was requested, at which point the executor should return.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    scan: Arc<Scan>,
}

impl WorkerHandle {
    pub fn new(scan: Arc<Scan>) -> Self {
        Self { scan }
    }

    pub fn scan_id(&self) -> ScanId {
        self.scan.id()
    }

    pub fn target(&self) -> &Target {
        self.scan.target()
    }

    /// Honor pause/stop signals. Returns `true` to continue working.
    pub fn checkpoint(&self) -> bool {
        self.scan.signal.checkpoint()
    }

    pub fn report_progress(&self, percent: u8) {
        self.scan.notify_progress(percent);
    }

    pub fn record_exchange(&self, message_id: i64) {
        self.scan.notify_message(message_id);
    }

    pub fn record_finding(&self, alert_id: i64) {
        self.scan.notify_alert(alert_id);
    }
}

/// Executes the attack logic of one scan. Implementations run on a dedicated
/// thread per scan and are expected to call `handle.checkpoint()` between
/// units of work; returning from `run` reports completion.
pub trait ScanExecutor: Send + Sync {
    fn run(&self, handle: WorkerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_scan() -> Scan {
        Scan::new(
            ScanId(1),
            Target {
                site: "example.com".into(),
                start_url: "https://example.com/".into(),
                recurse: true,
                in_scope_only: false,
            },
            100,
            Notifier::default(),
        )
    }

    #[test]
    fn start_resets_progress_and_evidence() {
        let scan = test_scan();
        assert!(scan.start());
        assert_eq!(scan.state(), ScanState::Running);
        assert_eq!(scan.progress(), 0);
        assert!(scan.time_started().is_some());
        assert!(scan.time_finished().is_none());
    }

    #[test]
    fn start_twice_is_rejected() {
        let scan = test_scan();
        assert!(scan.start());
        assert!(!scan.start());
    }

    #[test]
    fn pause_resume_cycle() {
        let scan = test_scan();
        scan.start();
        assert!(scan.pause());
        assert_eq!(scan.state(), ScanState::Paused);
        assert!(scan.resume());
        assert_eq!(scan.state(), ScanState::Running);
    }

    #[test]
    fn pause_outside_running_is_a_noop() {
        let scan = test_scan();
        assert!(!scan.pause(), "not started yet");
        scan.start();
        scan.pause();
        assert!(!scan.pause(), "already paused");
        scan.stop();
        assert!(!scan.pause(), "finished");
        assert_eq!(scan.state(), ScanState::Finished);
    }

    #[test]
    fn resume_requires_paused() {
        let scan = test_scan();
        scan.start();
        assert!(!scan.resume());
    }

    #[test]
    fn stop_finishes_immediately() {
        let scan = test_scan();
        scan.start();
        assert!(scan.stop());
        assert_eq!(scan.state(), ScanState::Finished);
        assert!(scan.time_finished().is_some());
        assert!(scan.stop_requested());
    }

    #[test]
    fn stop_works_from_paused() {
        let scan = test_scan();
        scan.start();
        scan.pause();
        assert!(scan.stop());
        assert_eq!(scan.state(), ScanState::Finished);
    }

    #[test]
    fn time_finished_is_set_exactly_once() {
        let scan = test_scan();
        scan.start();
        scan.stop();
        let first = scan.time_finished();
        // A worker draining after the stop reports completion; the timestamp
        // must not move.
        scan.notify_scanner_complete();
        assert_eq!(scan.time_finished(), first);
    }

    #[test]
    fn completion_from_paused_finishes() {
        let scan = test_scan();
        scan.start();
        scan.pause();
        scan.notify_scanner_complete();
        assert_eq!(scan.state(), ScanState::Finished);
        assert!(scan.time_finished().is_some());
    }

    #[test]
    fn progress_is_stored_verbatim_and_clamped() {
        let scan = test_scan();
        scan.start();
        scan.notify_progress(30);
        scan.notify_progress(20);
        assert_eq!(scan.progress(), 20);
        scan.notify_progress(250);
        assert_eq!(scan.progress(), 100);
    }

    #[test]
    fn alerts_with_sentinel_id_are_ignored() {
        let scan = test_scan();
        scan.start();
        scan.notify_alert(-1);
        scan.notify_alert(9);
        assert_eq!(scan.evidence().snapshot_alert_ids(), vec![9]);
    }

    #[test]
    fn checkpoint_blocks_while_paused_and_observes_stop() {
        let scan = Arc::new(test_scan());
        scan.start();
        scan.pause();

        let handle = WorkerHandle::new(Arc::clone(&scan));
        let worker = std::thread::spawn(move || handle.checkpoint());

        // The worker is parked at the checkpoint; a stop must wake it and
        // make the checkpoint report cancellation.
        std::thread::sleep(Duration::from_millis(50));
        assert!(!worker.is_finished());
        scan.stop();
        assert!(!worker.join().unwrap());
    }

    #[test]
    fn stop_racing_a_pausing_checkpoint_never_strands_the_worker() {
        // A stop whose flag store and wakeup land between the checkpoint's
        // predicate check and its park would leave the worker parked with no
        // further wakeup possible. Race the two repeatedly; every worker must
        // observe the stop and exit.
        for _ in 0..500 {
            let scan = Arc::new(test_scan());
            scan.start();
            scan.pause();

            let handle = WorkerHandle::new(Arc::clone(&scan));
            let worker = std::thread::spawn(move || handle.checkpoint());
            scan.stop();
            assert!(!worker.join().unwrap());
        }
    }

    #[test]
    fn checkpoint_resumes_after_pause_lifts() {
        let scan = Arc::new(test_scan());
        scan.start();
        scan.pause();

        let handle = WorkerHandle::new(Arc::clone(&scan));
        let worker = std::thread::spawn(move || handle.checkpoint());

        std::thread::sleep(Duration::from_millis(50));
        scan.resume();
        assert!(worker.join().unwrap());
    }
}
