//! # Status Report
//!
//! The merged view shown by `ctrctl info`.
//!
//! Assembly is pure: the builder in the binary gathers probe results and hands
//! them to [`StatusReport::assemble`]. Storage drivers keep probe order and
//! security features follow a fixed check order, so an unchanged daemon always
//! yields an identical report.

use serde::{Deserialize, Serialize};

use crate::plugins::{PluginRecord, classify_storage};
use crate::primitives::{DEFAULT_SECCOMP_PROFILE, LOGGING_DRIVER};
use crate::types::{ClientInfo, HostFacts, VersionInfo};

// =============================================================================
// SECURITY FEATURES
// =============================================================================

/// A security option active for containers on this host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum SecurityFeature {
    AppArmor,
    Seccomp { profile: String },
    Cgroupns,
    Rootless,
}

impl SecurityFeature {
    /// Name as listed under "Security Options".
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SecurityFeature::AppArmor => "apparmor",
            SecurityFeature::Seccomp { .. } => "seccomp",
            SecurityFeature::Cgroupns => "cgroupns",
            SecurityFeature::Rootless => "rootless",
        }
    }
}

impl std::fmt::Display for SecurityFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Security features for a host, in fixed check order.
///
/// Absent modules are left out; absence is never an error.
#[must_use]
pub fn security_features(host: &HostFacts) -> Vec<SecurityFeature> {
    let mut features = Vec::with_capacity(4);
    if host.apparmor {
        features.push(SecurityFeature::AppArmor);
    }
    features.push(SecurityFeature::Seccomp {
        profile: DEFAULT_SECCOMP_PROFILE.to_string(),
    });
    if host.cgroupns_private {
        features.push(SecurityFeature::Cgroupns);
    }
    if host.rootless {
        features.push(SecurityFeature::Rootless);
    }
    features
}

// =============================================================================
// STATUS REPORT
// =============================================================================

/// System-wide status, built fresh on every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub client: ClientInfo,
    pub server_version: String,
    /// Configured snapshotter.
    pub storage_driver: String,
    pub logging_driver: String,
    pub cgroup_driver: String,
    pub cgroup_version: u8,
    /// Healthy snapshotter plugins, in probe order.
    pub storage_drivers: Vec<String>,
    pub security_features: Vec<SecurityFeature>,
    pub operating_system: String,
    pub kernel_version: String,
    pub instance_id: String,
}

impl StatusReport {
    /// Merge probe results into a report.
    #[must_use]
    pub fn assemble(
        client: ClientInfo,
        version: &VersionInfo,
        plugins: &[PluginRecord],
        host: &HostFacts,
        snapshotter: &str,
    ) -> Self {
        Self {
            client,
            server_version: version.version.clone(),
            storage_driver: snapshotter.to_string(),
            logging_driver: LOGGING_DRIVER.to_string(),
            cgroup_driver: host.cgroup_driver.clone(),
            cgroup_version: host.cgroup_version,
            storage_drivers: classify_storage(plugins),
            security_features: security_features(host),
            operating_system: host.operating_system.clone(),
            kernel_version: host.kernel_version.clone(),
            instance_id: version.instance_id.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
