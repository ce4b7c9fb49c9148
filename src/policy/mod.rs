pub mod catalog;
pub mod plugin;
pub mod store;

pub use plugin::{AlertThreshold, AttackStrength, PluginId, PolicyId, ScannerPlugin};
pub use store::{Aggregate, PolicyStore};
