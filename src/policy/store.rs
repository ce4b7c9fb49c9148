use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::{Result, WardenError};

use super::catalog;
use super::plugin::{AlertThreshold, AttackStrength, PluginId, PolicyId, ScannerPlugin};

/// Result of asking a category for a setting shared by all of its plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate<T> {
    /// Every plugin in the category has this effective value.
    Uniform(T),
    /// Values differ across the category, or the category is empty.
    Mixed,
}

impl<T> Aggregate<T> {
    pub fn uniform(self) -> Option<T> {
        match self {
            Self::Uniform(v) => Some(v),
            Self::Mixed => None,
        }
    }
}

/// Process-wide scanner plugin configuration.
///
/// All scans observe the same store; mutation is global, never scan-scoped.
/// A single lock guards the whole plugin table so bulk operations
/// (enable cascades, category-wide settings) are atomic with respect to
/// readers.
///
/// Consistency rule enforced by every mutator: a plugin whose alert
/// threshold is `Off` is disabled, and an enabled plugin never carries an
/// `Off` threshold.
#[derive(Debug)]
pub struct PolicyStore {
    plugins: RwLock<BTreeMap<PluginId, ScannerPlugin>>,
}

impl PolicyStore {
    /// A store seeded with the built-in catalog.
    pub fn new() -> Self {
        Self::with_plugins(catalog::builtin_plugins())
            .expect("built-in catalog is internally consistent")
    }

    /// A store holding exactly the given plugins.
    pub fn with_plugins(plugins: Vec<ScannerPlugin>) -> Result<Self> {
        let store = Self {
            plugins: RwLock::new(BTreeMap::new()),
        };
        for plugin in plugins {
            store.register(plugin)?;
        }
        Ok(store)
    }

    /// Register an additional plugin. The id must be unused and the category
    /// must exist in the category table.
    pub fn register(&self, plugin: ScannerPlugin) -> Result<()> {
        if catalog::category_name(plugin.category).is_none() {
            return Err(WardenError::DoesNotExist(format!(
                "category {}",
                plugin.category
            )));
        }
        let mut plugins = self.plugins.write();
        if plugins.contains_key(&plugin.id) {
            return Err(WardenError::IllegalParameter(format!(
                "duplicate plugin id {}",
                plugin.id
            )));
        }
        plugins.insert(plugin.id, plugin);
        Ok(())
    }

    pub fn has_plugin(&self, id: PluginId) -> bool {
        self.plugins.read().contains_key(&id)
    }

    pub fn has_category(&self, id: PolicyId) -> bool {
        catalog::category_name(id).is_some()
    }

    /// Snapshot of a single plugin's configuration.
    pub fn plugin(&self, id: PluginId) -> Result<ScannerPlugin> {
        self.plugins
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| WardenError::DoesNotExist(format!("plugin {}", id)))
    }

    /// Snapshot of every plugin, ordered by id.
    pub fn all_plugins(&self) -> Vec<ScannerPlugin> {
        self.plugins.read().values().cloned().collect()
    }

    /// Enable or disable every plugin. Thresholds are untouched except to
    /// keep the enabled/`Off` rule: enabling a plugin parked at `Off` raises
    /// it to `Default`.
    pub fn set_all_enabled(&self, enabled: bool) {
        let mut plugins = self.plugins.write();
        for plugin in plugins.values_mut() {
            set_enabled_consistent(plugin, enabled);
        }
    }

    pub fn set_enabled(&self, id: PluginId, enabled: bool) -> Result<()> {
        let mut plugins = self.plugins.write();
        let plugin = plugins
            .get_mut(&id)
            .ok_or_else(|| WardenError::DoesNotExist(format!("plugin {}", id)))?;
        set_enabled_consistent(plugin, enabled);
        Ok(())
    }

    pub fn set_attack_strength(&self, id: PluginId, strength: AttackStrength) -> Result<()> {
        let mut plugins = self.plugins.write();
        let plugin = plugins
            .get_mut(&id)
            .ok_or_else(|| WardenError::DoesNotExist(format!("plugin {}", id)))?;
        plugin.attack_strength = strength;
        Ok(())
    }

    /// Apply a strength to every plugin in a category, atomically.
    pub fn set_category_attack_strength(
        &self,
        category: PolicyId,
        strength: AttackStrength,
    ) -> Result<()> {
        self.require_category(category)?;
        let mut plugins = self.plugins.write();
        for plugin in plugins.values_mut().filter(|p| p.category == category) {
            plugin.attack_strength = strength;
        }
        Ok(())
    }

    /// Set a plugin's alert threshold. The threshold is the authoritative
    /// signal: `Off` disables the plugin, any other value enables it.
    pub fn set_alert_threshold(&self, id: PluginId, threshold: AlertThreshold) -> Result<()> {
        let mut plugins = self.plugins.write();
        let plugin = plugins
            .get_mut(&id)
            .ok_or_else(|| WardenError::DoesNotExist(format!("plugin {}", id)))?;
        set_threshold_consistent(plugin, threshold);
        Ok(())
    }

    /// Apply a threshold to every plugin in a category, atomically.
    pub fn set_category_alert_threshold(
        &self,
        category: PolicyId,
        threshold: AlertThreshold,
    ) -> Result<()> {
        self.require_category(category)?;
        let mut plugins = self.plugins.write();
        for plugin in plugins.values_mut().filter(|p| p.category == category) {
            set_threshold_consistent(plugin, threshold);
        }
        Ok(())
    }

    /// Disable every plugin, then enable exactly those whose category is in
    /// `categories`. Unknown category ids reject the whole call before any
    /// mutation.
    pub fn set_enabled_categories(&self, categories: &[PolicyId]) -> Result<()> {
        for category in categories {
            self.require_category(*category)?;
        }
        let mut plugins = self.plugins.write();
        for plugin in plugins.values_mut() {
            set_enabled_consistent(plugin, categories.contains(&plugin.category));
        }
        Ok(())
    }

    /// The effective attack strength shared by every plugin in a category.
    pub fn aggregate_attack_strength(&self, category: PolicyId) -> Aggregate<AttackStrength> {
        aggregate(
            self.plugins.read().values(),
            category,
            |p| p.attack_strength.effective(),
        )
    }

    /// The effective alert threshold shared by every plugin in a category.
    pub fn aggregate_alert_threshold(&self, category: PolicyId) -> Aggregate<AlertThreshold> {
        aggregate(
            self.plugins.read().values(),
            category,
            |p| p.alert_threshold.effective(),
        )
    }

    /// True iff every plugin in the category is enabled.
    pub fn is_category_fully_enabled(&self, category: PolicyId) -> bool {
        self.plugins
            .read()
            .values()
            .filter(|p| p.category == category)
            .all(|p| p.enabled)
    }

    /// Prerequisite plugin ids, in declaration order.
    pub fn list_dependencies(&self, id: PluginId) -> Result<Vec<PluginId>> {
        Ok(self.plugin(id)?.dependencies)
    }

    /// True iff every prerequisite of the plugin is registered in the store.
    pub fn all_dependencies_available(&self, id: PluginId) -> Result<bool> {
        let plugins = self.plugins.read();
        let plugin = plugins
            .get(&id)
            .ok_or_else(|| WardenError::DoesNotExist(format!("plugin {}", id)))?;
        Ok(plugin.dependencies.iter().all(|d| plugins.contains_key(d)))
    }

    fn require_category(&self, category: PolicyId) -> Result<()> {
        if self.has_category(category) {
            Ok(())
        } else {
            Err(WardenError::DoesNotExist(format!("category {}", category)))
        }
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn set_enabled_consistent(plugin: &mut ScannerPlugin, enabled: bool) {
    plugin.enabled = enabled;
    if enabled && plugin.alert_threshold == AlertThreshold::Off {
        plugin.alert_threshold = AlertThreshold::Default;
    }
}

fn set_threshold_consistent(plugin: &mut ScannerPlugin, threshold: AlertThreshold) {
    plugin.alert_threshold = threshold;
    plugin.enabled = threshold != AlertThreshold::Off;
}

fn aggregate<'a, T: PartialEq>(
    plugins: impl Iterator<Item = &'a ScannerPlugin>,
    category: PolicyId,
    value: impl Fn(&ScannerPlugin) -> T,
) -> Aggregate<T> {
    let mut shared: Option<T> = None;
    for plugin in plugins.filter(|p| p.category == category) {
        let v = value(plugin);
        match &shared {
            None => shared = Some(v),
            Some(existing) if *existing == v => {}
            Some(_) => return Aggregate::Mixed,
        }
    }
    match shared {
        Some(v) => Aggregate::Uniform(v),
        None => Aggregate::Mixed,
    }
}
