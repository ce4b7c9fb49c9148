use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

/// External record ids use `-1` to mean "not persisted yet"; findings
/// carrying it are counted nowhere.
pub const INVALID_ID: i64 = -1;

/// Per-scan, thread-safe evidence collection.
///
/// Every observed HTTP exchange bumps `total_observed`; only the first
/// `max_visible` exchanges keep their ids around. Very large retained lists
/// make big scans much slower for any consumer that renders them, so the
/// overflow is counted but not stored. Alert ids are retained without a cap.
///
/// Snapshots are owned copies, so callers iterate without holding any lock.
#[derive(Debug)]
pub struct EvidenceTracker {
    max_visible: usize,
    total_observed: AtomicUsize,
    visible_messages: Mutex<Vec<i64>>,
    alerts: Mutex<BTreeSet<i64>>,
}

impl EvidenceTracker {
    pub fn new(max_visible: usize) -> Self {
        Self {
            max_visible,
            total_observed: AtomicUsize::new(0),
            visible_messages: Mutex::new(Vec::new()),
            alerts: Mutex::new(BTreeSet::new()),
        }
    }

    /// Record one observed exchange. Always counted; retained only while the
    /// visible cap has room.
    pub fn record_exchange(&self, message_id: i64) {
        let observed = self.total_observed.fetch_add(1, Ordering::SeqCst) + 1;
        if observed <= self.max_visible {
            self.visible_messages.lock().push(message_id);
        }
    }

    /// Record one raised finding. Ids carrying the invalid sentinel are
    /// dropped; duplicates collapse.
    pub fn record_finding(&self, alert_id: i64) {
        if alert_id == INVALID_ID || alert_id < 0 {
            return;
        }
        self.alerts.lock().insert(alert_id);
    }

    /// Total exchanges observed so far, retained or not. Monotonic.
    pub fn total_observed(&self) -> usize {
        self.total_observed.load(Ordering::SeqCst)
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Point-in-time copy of the retained message ids, in observation order.
    pub fn snapshot_message_ids(&self) -> Vec<i64> {
        self.visible_messages.lock().clone()
    }

    /// Point-in-time copy of the alert ids.
    pub fn snapshot_alert_ids(&self) -> Vec<i64> {
        self.alerts.lock().iter().copied().collect()
    }

    /// Drop all recorded evidence and reset the counter. Used on (re)start.
    pub fn reset(&self) {
        let mut messages = self.visible_messages.lock();
        let mut alerts = self.alerts.lock();
        messages.clear();
        alerts.clear();
        self.total_observed.store(0, Ordering::SeqCst);
    }
}
