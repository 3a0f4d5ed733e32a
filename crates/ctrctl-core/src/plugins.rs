//! # Plugin Aggregator
//!
//! Classifies the daemon's plugin list into functional categories.
//!
//! A plugin counts toward a category only if its dotted type has the
//! category's prefix AND it initialized without error. A snapshotter that
//! failed to start is not an available storage driver.
//!
//! Output order is always the order the daemon reported plugins in.

use serde::{Deserialize, Serialize};

use crate::primitives::SNAPSHOTTER_PLUGIN_PREFIX;

// =============================================================================
// PLUGIN RECORD
// =============================================================================

/// One entry of the daemon's plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord {
    /// Plugin ID within its type, e.g. `overlayfs`.
    pub id: String,
    /// Dotted type namespace, e.g. `io.containerd.snapshotter.v1`.
    #[serde(rename = "type")]
    pub plugin_type: String,
    /// Initialization error, if the plugin failed to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_err: Option<String>,
}

impl PluginRecord {
    /// A plugin that loaded successfully.
    #[must_use]
    pub fn loaded(plugin_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            plugin_type: plugin_type.into(),
            init_err: None,
        }
    }

    /// A plugin that failed to initialize.
    #[must_use]
    pub fn failed(
        plugin_type: impl Into<String>,
        id: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            plugin_type: plugin_type.into(),
            init_err: Some(error.into()),
        }
    }

    /// Health derived from the init error.
    #[must_use]
    pub fn health(&self) -> PluginHealth {
        match &self.init_err {
            None => PluginHealth::Loaded,
            Some(err) => PluginHealth::Failed(err.clone()),
        }
    }

    /// Whether the plugin initialized without error.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.init_err.is_none()
    }
}

/// Whether a plugin is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginHealth {
    Loaded,
    Failed(String),
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// IDs of healthy plugins whose type starts with `type_prefix`, in input order.
///
/// No match is an empty list, not an error.
#[must_use]
pub fn classify(plugins: &[PluginRecord], type_prefix: &str) -> Vec<String> {
    plugins
        .iter()
        .filter(|p| p.plugin_type.starts_with(type_prefix) && p.is_healthy())
        .map(|p| p.id.clone())
        .collect()
}

/// Healthy snapshotter IDs, in input order.
#[must_use]
pub fn classify_storage(plugins: &[PluginRecord]) -> Vec<String> {
    classify(plugins, SNAPSHOTTER_PLUGIN_PREFIX)
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Load status across the whole plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PluginSummary {
    /// Number of plugins that initialized.
    pub loaded: usize,
    /// `(type.id, error)` of every plugin that failed, in input order.
    pub failed: Vec<(String, String)>,
}

impl PluginSummary {
    /// Summarize a plugin list.
    #[must_use]
    pub fn from_plugins(plugins: &[PluginRecord]) -> Self {
        let mut summary = Self::default();
        for plugin in plugins {
            match &plugin.init_err {
                None => summary.loaded += 1,
                Some(err) => summary
                    .failed
                    .push((format!("{}.{}", plugin.plugin_type, plugin.id), err.clone())),
            }
        }
        summary
    }

    /// Total plugins seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.loaded + self.failed.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
