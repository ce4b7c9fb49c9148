//! Observer and delivery-context abstractions.
//!
//! Workers run on arbitrary threads; hosts with thread-affine observers (a
//! UI event loop, say) configure a [`DeliveryContext`] that marshals each
//! notification onto the right execution context. The default delivers
//! synchronously on the calling thread.

use std::sync::Arc;

use crate::scan::{ScanId, ScanState};

/// Receives lifecycle and evidence events from running scans.
///
/// All methods default to no-ops so observers implement only what they
/// care about. Calls arrive on the delivery context configured for the
/// scan, never assume a particular thread.
pub trait ScanObserver: Send + Sync {
    /// Latest worker-reported completion percentage, in `[0, 100]`.
    fn progress_changed(&self, _scan: ScanId, _percent: u8) {}

    /// The scan moved to a new lifecycle state.
    fn state_changed(&self, _scan: ScanId, _state: ScanState) {}

    /// A finding was raised, identified by its external alert id.
    fn alert_found(&self, _scan: ScanId, _alert_id: i64) {}

    /// An HTTP exchange was observed, identified by its external record id.
    fn message_observed(&self, _scan: ScanId, _message_id: i64) {}

    /// The worker reported completion.
    fn scan_finished(&self, _scan: ScanId) {}
}

/// Executes notification closures on whatever context observers require.
pub trait DeliveryContext: Send + Sync {
    fn deliver(&self, notification: Box<dyn FnOnce() + Send>);
}

/// Runs every notification inline on the calling thread.
#[derive(Debug, Default)]
pub struct SyncDelivery;

impl DeliveryContext for SyncDelivery {
    fn deliver(&self, notification: Box<dyn FnOnce() + Send>) {
        notification();
    }
}

/// Observer wiring shared by a scan: the registered observers plus the
/// context their notifications are delivered on.
#[derive(Clone)]
pub struct Notifier {
    observers: Vec<Arc<dyn ScanObserver>>,
    delivery: Arc<dyn DeliveryContext>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Notifier {
    pub fn new(delivery: Arc<dyn DeliveryContext>) -> Self {
        Self {
            observers: Vec::new(),
            delivery,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Deliver one event to every observer through the delivery context.
    pub fn notify(&self, event: impl Fn(&dyn ScanObserver) + Send + Clone + 'static) {
        for observer in &self.observers {
            let observer = Arc::clone(observer);
            let event = event.clone();
            self.delivery.deliver(Box::new(move || event(observer.as_ref())));
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Arc::new(SyncDelivery))
    }
}
