pub mod evidence;
pub mod lifecycle;
pub mod registry;

pub use evidence::EvidenceTracker;
pub use lifecycle::{Scan, ScanExecutor, ScanId, ScanState, Target, WorkerHandle};
pub use registry::ScanRegistry;
