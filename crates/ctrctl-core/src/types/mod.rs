//! # Core Type Definitions
//!
//! Shared types for ctrctl-core:
//! - Probe result shapes (`VersionInfo`, `HostFacts`) supplied by the gateway
//! - Client-side facts shown in the report (`ClientInfo`)
//! - The probe call identifier used in error context (`ProbeCall`)
//! - Error types (`CtrError`)
//!
//! Capability and plugin types live in their own modules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::primitives::{DEFAULT_NAMESPACE, UNKNOWN_OPERATING_SYSTEM};

// =============================================================================
// PROBE CALLS
// =============================================================================

/// Identifies one of the three gateway queries.
///
/// Carried by probe errors so the user sees which call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeCall {
    /// Daemon version and identity.
    Version,
    /// Plugin list from the introspection service.
    Plugins,
    /// Host kernel, distribution and security-module facts.
    HostFacts,
}

impl ProbeCall {
    /// Get the call name as used in log lines and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ProbeCall::Version => "version",
            ProbeCall::Plugins => "plugins",
            ProbeCall::HostFacts => "host facts",
        }
    }
}

impl std::fmt::Display for ProbeCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// VERSION INFO
// =============================================================================

/// Daemon version as reported by the version probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Daemon release, e.g. `v1.7.2`.
    pub version: String,
    /// Source revision the daemon was built from.
    #[serde(default)]
    pub revision: String,
    /// Daemon instance UUID, shown as the report `ID`.
    #[serde(rename = "uuid", default)]
    pub instance_id: String,
}

impl VersionInfo {
    /// Create version info.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        revision: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            revision: revision.into(),
            instance_id: instance_id.into(),
        }
    }
}

// =============================================================================
// HOST FACTS
// =============================================================================

/// Static facts about the host the CLI runs on.
///
/// Every field is advisory: a probe that cannot determine a fact reports the
/// default rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFacts {
    /// Distribution name, e.g. `Ubuntu 22.04.3 LTS`.
    pub operating_system: String,
    /// Kernel release, e.g. `6.5.0-14-generic`.
    pub kernel_version: String,
    /// AppArmor is loaded and enabled.
    pub apparmor: bool,
    /// 1 for legacy hierarchies, 2 for the unified hierarchy.
    pub cgroup_version: u8,
    /// `cgroupfs` or `systemd`.
    pub cgroup_driver: String,
    /// Containers get a private cgroup namespace by default.
    pub cgroupns_private: bool,
    /// The CLI runs inside a rootless user namespace.
    pub rootless: bool,
}

impl Default for HostFacts {
    fn default() -> Self {
        Self {
            operating_system: UNKNOWN_OPERATING_SYSTEM.to_string(),
            kernel_version: String::new(),
            apparmor: false,
            cgroup_version: 1,
            cgroup_driver: "cgroupfs".to_string(),
            cgroupns_private: false,
            rootless: false,
        }
    }
}

// =============================================================================
// CLIENT INFO
// =============================================================================

/// Client-side settings echoed in the report's "Client:" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Daemon namespace the CLI operates in.
    pub namespace: String,
    /// Debug mode flag.
    pub debug: bool,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            debug: false,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in ctrctl.
///
/// - No silent failures, and nothing is retried
/// - Each variant carries enough context (name, call) for a precise message
#[derive(Debug, Error)]
pub enum CtrError {
    /// A directive named a capability outside the capability table.
    #[error("unknown capability: {0:?}")]
    UnknownCapability(String),

    /// Directive text matched none of the accepted add/drop forms.
    #[error(
        "unrecognized capability directive {0:?}: expected --cap-add=NAME, --cap-drop=NAME, add:NAME or drop:NAME"
    )]
    InvalidDirective(String),

    /// Process status text could not be parsed into capability masks.
    #[error("malformed capability status: {0}")]
    MalformedCapabilityStatus(String),

    /// A probe call to the daemon failed.
    #[error("{call} probe failed: {message}")]
    ProbeFailure { call: ProbeCall, message: String },

    /// A probe call exceeded its deadline.
    #[error("{call} probe timed out after {timeout_ms}ms")]
    ProbeTimeout { call: ProbeCall, timeout_ms: u64 },

    /// An observed capability mask differs from the expected one.
    #[error("capability mismatch: expected {expected:016x}, got {actual:016x}")]
    CapabilityMismatch { expected: u64, actual: u64 },

    /// An observed seccomp mode differs from the expected one.
    #[error("seccomp mode mismatch: expected {expected}, got {actual}")]
    SeccompMismatch { expected: u8, actual: u8 },

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl CtrError {
    /// The probe call this error originated from, if any.
    #[must_use]
    pub fn probe_call(&self) -> Option<ProbeCall> {
        match self {
            CtrError::ProbeFailure { call, .. } | CtrError::ProbeTimeout { call, .. } => {
                Some(*call)
            }
            _ => None,
        }
    }

    /// Whether this error is a probe deadline expiry.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CtrError::ProbeTimeout { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
