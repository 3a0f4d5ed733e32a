//! # Probe Gateway
//!
//! The three queries ctrctl asks of the outside world:
//!
//! - `version` - daemon version and instance ID
//! - `plugins` - the daemon's plugin list
//! - `host_facts` - kernel, distribution and security-module facts
//!
//! The builder only sees this trait, so tests drive it with fakes and the
//! binary uses [`HttpProbe`].

mod http;

pub use http::HttpProbe;

use ctrctl_core::{HostFacts, PluginRecord, VersionInfo};
use std::future::Future;

// =============================================================================
// PROBE ERRORS
// =============================================================================

/// Errors from a gateway implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Cannot reach the daemon.
    ConnectionFailed(String),
    /// 401 Unauthorized - invalid or missing API key.
    Unauthorized,
    /// The daemon answered with a non-success status.
    ServerError(u16, String),
    /// Failed to parse response body.
    ParseError(String),
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(url) => write!(f, "Cannot connect to daemon at {url}"),
            Self::Unauthorized => write!(f, "Unauthorized: invalid or missing API key"),
            Self::ServerError(status, msg) => write!(f, "Daemon error ({status}): {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProbeError {}

// =============================================================================
// GATEWAY TRAIT
// =============================================================================

/// Source of raw daemon and host facts.
pub trait ProbeGateway: Send + Sync {
    /// Daemon version and instance identity.
    fn version(&self) -> impl Future<Output = Result<VersionInfo, ProbeError>> + Send;

    /// Every plugin the daemon knows, in the daemon's order.
    fn plugins(&self) -> impl Future<Output = Result<Vec<PluginRecord>, ProbeError>> + Send;

    /// Facts about the host.
    fn host_facts(&self) -> impl Future<Output = Result<HostFacts, ProbeError>> + Send;
}

// =============================================================================
// TESTS
// =============================================================================
