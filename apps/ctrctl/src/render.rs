//! # Output Rendering
//!
//! Text output for the `info`, `plugins` and `caps` commands. Rendering is a
//! pure function of its input so repeated runs diff cleanly.

use ctrctl_core::{
    CapabilityMask, CapabilitySets, CtrError, PluginHealth, PluginRecord, PluginSummary,
    SeccompMode, SecurityFeature, StatusReport,
};

/// Render a status report in `docker info` layout.
pub fn render_report(report: &StatusReport) -> String {
    let mut out = String::new();

    out.push_str("Client:\n");
    out.push_str(&format!(" Namespace:\t{}\n", report.client.namespace));
    out.push_str(&format!(" Debug Mode:\t{}\n", report.client.debug));
    out.push('\n');

    out.push_str("Server:\n");
    out.push_str(&format!(" Server Version: {}\n", report.server_version));
    out.push_str(&format!(" Storage Driver: {}\n", report.storage_driver));
    out.push_str(&format!(" Logging Driver: {}\n", report.logging_driver));
    out.push_str(&format!(" Cgroup Driver: {}\n", report.cgroup_driver));
    out.push_str(&format!(" Cgroup Version: {}\n", report.cgroup_version));
    out.push_str(" Plugins:\n");
    out.push_str(&format!("  Storage: {}\n", report.storage_drivers.join(" ")));
    out.push_str(" Security Options:\n");
    for feature in &report.security_features {
        out.push_str(&format!("  {}\n", feature.name()));
        if let SecurityFeature::Seccomp { profile } = feature {
            out.push_str(&format!("   Profile: {}\n", profile));
        }
    }
    out.push_str(&format!(" Operating System: {}\n", report.operating_system));
    out.push_str(&format!(" Kernel Version: {}\n", report.kernel_version));
    out.push_str(&format!(" ID: {}\n", report.instance_id));

    out
}

/// Render any serializable value as pretty JSON.
pub fn render_json<T: serde::Serialize>(value: &T) -> Result<String, CtrError> {
    serde_json::to_string_pretty(value).map_err(|e| CtrError::SerializationError(e.to_string()))
}

/// Render the plugin list as a table, followed by a summary line.
pub fn render_plugins(plugins: &[PluginRecord]) -> String {
    let type_width = plugins
        .iter()
        .map(|p| p.plugin_type.len())
        .max()
        .unwrap_or(0)
        .max("TYPE".len());
    let id_width = plugins
        .iter()
        .map(|p| p.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut out = format!("{:<type_width$}  {:<id_width$}  STATUS\n", "TYPE", "ID");
    for plugin in plugins {
        let status = match plugin.health() {
            PluginHealth::Loaded => "ok".to_string(),
            PluginHealth::Failed(err) => format!("error: {}", err),
        };
        out.push_str(&format!(
            "{:<type_width$}  {:<id_width$}  {}\n",
            plugin.plugin_type, plugin.id, status
        ));
    }

    let summary = PluginSummary::from_plugins(plugins);
    out.push_str(&format!(
        "\n{} plugins, {} loaded, {} failed\n",
        summary.total(),
        summary.loaded,
        summary.failed.len()
    ));
    out
}

/// Render a mask as status hex, optionally followed by one name per line.
///
/// Unnamed bits are listed as `reserved(N)`.
pub fn render_mask(mask: CapabilityMask, with_names: bool) -> String {
    let mut out = format!("{}\n", mask.to_status_hex());
    if with_names {
        for cap in mask.capabilities() {
            out.push_str(&format!("  {}\n", cap));
        }
        for bit in mask.reserved_bits() {
            out.push_str(&format!("  reserved({})\n", bit));
        }
    }
    out
}

/// Render all five capability sets of a process, then its seccomp mode when
/// the kernel reports one.
pub fn render_sets(
    sets: &CapabilitySets,
    seccomp: Option<SeccompMode>,
    with_names: bool,
) -> String {
    let mut out = String::new();
    for (label, mask) in sets.labeled() {
        out.push_str(&format!("{}:\t{}\n", label, mask.to_status_hex()));
        if with_names {
            let names: Vec<String> = mask
                .capabilities()
                .iter()
                .map(|c| c.to_string())
                .chain(mask.reserved_bits().iter().map(|b| format!("reserved({b})")))
                .collect();
            if !names.is_empty() {
                out.push_str(&format!("\t{}\n", names.join(",")));
            }
        }
    }
    if let Some(mode) = seccomp {
        out.push_str(&format!("Seccomp:\t{} ({})\n", mode.number(), mode));
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
