//! Built-in plugin catalog and the fixed category table.
//!
//! The catalog seeds a fresh [`PolicyStore`](super::PolicyStore) with the
//! stock scan checks; hosts embedding the engine can register additional
//! plugins on top of it.

use super::plugin::{PluginId, PolicyId, ScannerPlugin};

/// The fixed policy categories. Purely a projection over plugin membership;
/// the store never mutates this table.
pub const CATEGORIES: &[(PolicyId, &str)] = &[
    (PolicyId(0), "information-gathering"),
    (PolicyId(1), "client-browser"),
    (PolicyId(2), "server-security"),
    (PolicyId(3), "miscellaneous"),
    (PolicyId(4), "injection"),
];

/// Look up a category name by id.
pub fn category_name(id: PolicyId) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(cid, _)| *cid == id)
        .map(|(_, name)| *name)
}

/// Returns the stock plugin set.
///
/// Ids are stable across releases; dependency lists reference other plugins
/// in this set (the stored-XSS check reuses the reflected-XSS probe results).
pub fn builtin_plugins() -> Vec<ScannerPlugin> {
    vec![
        ScannerPlugin::new(PluginId(6), "Path Traversal", PolicyId(2)).with_classification(22, 33),
        ScannerPlugin::new(PluginId(7), "Remote File Inclusion", PolicyId(2))
            .with_classification(98, 5),
        ScannerPlugin::new(PluginId(42), "Source Code Disclosure", PolicyId(0))
            .with_classification(541, 34),
        ScannerPlugin::new(PluginId(20019), "External Redirect", PolicyId(3))
            .with_classification(601, 38),
        ScannerPlugin::new(PluginId(30001), "Buffer Overflow", PolicyId(2))
            .with_classification(120, 7),
        ScannerPlugin::new(PluginId(30002), "Format String Error", PolicyId(2))
            .with_classification(134, 6),
        ScannerPlugin::new(PluginId(40003), "CRLF Injection", PolicyId(4))
            .with_classification(113, 25),
        ScannerPlugin::new(PluginId(40008), "Parameter Tampering", PolicyId(3))
            .with_classification(472, 20),
        ScannerPlugin::new(PluginId(40009), "Server Side Include", PolicyId(4))
            .with_classification(97, 31),
        ScannerPlugin::new(PluginId(40012), "Cross Site Scripting (Reflected)", PolicyId(1))
            .with_classification(79, 8),
        ScannerPlugin::new(PluginId(40014), "Cross Site Scripting (Persistent)", PolicyId(1))
            .with_classification(79, 8)
            .with_dependencies(vec![PluginId(40012)]),
        ScannerPlugin::new(PluginId(40018), "SQL Injection", PolicyId(4))
            .with_classification(89, 19),
        ScannerPlugin::new(PluginId(90020), "Remote OS Command Injection", PolicyId(4))
            .with_classification(78, 31),
    ]
}
