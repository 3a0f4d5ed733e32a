//! # Status Report Builder
//!
//! Issues the three probe calls concurrently, each under its own deadline,
//! and assembles the report.
//!
//! Any failed or expired call aborts the build with the first error; the
//! remaining calls are dropped. No partial report is ever returned and
//! nothing is retried.

use ctrctl_core::{
    ClientInfo, CtrError, PluginSummary, ProbeCall, StatusReport,
    primitives::{DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_SNAPSHOTTER},
};
use std::future::Future;
use std::time::Duration;

use crate::probe::{ProbeError, ProbeGateway};

/// Settings for one report build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Deadline applied to each probe call.
    pub timeout: Duration,
    /// Configured snapshotter, reported as the storage driver.
    pub snapshotter: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            snapshotter: DEFAULT_SNAPSHOTTER.to_string(),
        }
    }
}

/// Run one probe call under a deadline, tagging failures with the call.
pub async fn bounded<T>(
    call: ProbeCall,
    timeout: Duration,
    fut: impl Future<Output = Result<T, ProbeError>>,
) -> Result<T, CtrError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => {
            tracing::debug!(%call, "probe succeeded");
            Ok(value)
        }
        Ok(Err(e)) => {
            tracing::debug!(%call, error = %e, "probe failed");
            Err(CtrError::ProbeFailure {
                call,
                message: e.to_string(),
            })
        }
        Err(_) => {
            tracing::debug!(%call, "probe timed out");
            Err(CtrError::ProbeTimeout {
                call,
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }
}

/// Build the status report from a gateway.
pub async fn build_report<P: ProbeGateway>(
    probe: &P,
    client: ClientInfo,
    options: &BuildOptions,
) -> Result<StatusReport, CtrError> {
    let (version, plugins, host) = tokio::try_join!(
        bounded(ProbeCall::Version, options.timeout, probe.version()),
        bounded(ProbeCall::Plugins, options.timeout, probe.plugins()),
        bounded(ProbeCall::HostFacts, options.timeout, probe.host_facts()),
    )?;

    let summary = PluginSummary::from_plugins(&plugins);
    for (plugin, error) in &summary.failed {
        tracing::warn!("plugin {} failed to initialize: {}", plugin, error);
    }
    tracing::info!(
        server_version = %version.version,
        plugins_loaded = summary.loaded,
        plugins_failed = summary.failed.len(),
        "status report built"
    );

    Ok(StatusReport::assemble(
        client,
        &version,
        &plugins,
        &host,
        &options.snapshotter,
    ))
}
