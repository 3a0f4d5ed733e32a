//! # ctrctl-core
//!
//! The pure logic behind `ctrctl info` and the capability tooling.
//!
//! ## Components
//!
//! - `capability` - the static capability table, the add/drop resolver and the
//!   process-status bitmap parser
//! - `plugins` - classification of the daemon's plugin list by type and health
//! - `report` - assembly of the status report from probe results
//!
//! ## Architectural Constraints
//!
//! The core never talks to the daemon. Raw facts (version, plugin list, host
//! facts, process status text) are supplied by the caller, and everything in
//! here is a deterministic function of them. No async, no I/O.

// =============================================================================
// MODULES
// =============================================================================

pub mod capability;
pub mod plugins;
pub mod primitives;
pub mod report;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{ClientInfo, CtrError, HostFacts, ProbeCall, VersionInfo};

// =============================================================================
// RE-EXPORTS: Capabilities
// =============================================================================

pub use capability::{
    CAPABILITIES, CapAction, CapDirective, CapTarget, Capability, CapabilityMask, CapabilitySets,
    SeccompMode, parse_effective, parse_seccomp_mode, parse_status, resolve, resolve_named,
};

// =============================================================================
// RE-EXPORTS: Plugins & Report
// =============================================================================

pub use plugins::{PluginHealth, PluginRecord, PluginSummary, classify, classify_storage};
pub use report::{SecurityFeature, StatusReport, security_features};
