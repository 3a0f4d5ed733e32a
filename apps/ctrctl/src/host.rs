//! # Host Fact Detection
//!
//! Reads static facts about the machine the CLI runs on. All paths are
//! resolved below a root directory so tests can point at a fixture tree.
//!
//! | Fact | Source |
//! |---|---|
//! | Operating system | `etc/os-release` (`PRETTY_NAME`, then `NAME`) |
//! | Kernel version | `proc/sys/kernel/osrelease` |
//! | AppArmor | `sys/module/apparmor/parameters/enabled` is `Y` |
//! | Cgroup version | 2 if `sys/fs/cgroup/cgroup.controllers` exists |
//! | Rootless | `ROOTLESSKIT_STATE_DIR` is set |
//!
//! Detection never fails. A fact that cannot be read takes its default.

use ctrctl_core::{HostFacts, primitives::UNKNOWN_OPERATING_SYSTEM};
use std::path::Path;

/// Environment variable RootlessKit sets inside its user namespace.
pub const ROOTLESS_STATE_DIR_ENV: &str = "ROOTLESSKIT_STATE_DIR";

/// Detect host facts below `root`.
pub async fn detect(root: &Path, rootless_state_dir: Option<&str>) -> HostFacts {
    let operating_system = read_trimmed(root, "etc/os-release")
        .await
        .and_then(|text| parse_os_release(&text))
        .unwrap_or_else(|| UNKNOWN_OPERATING_SYSTEM.to_string());

    let kernel_version = read_trimmed(root, "proc/sys/kernel/osrelease")
        .await
        .unwrap_or_default();

    let apparmor = read_trimmed(root, "sys/module/apparmor/parameters/enabled")
        .await
        .is_some_and(|v| v.starts_with('Y'));

    let unified = tokio::fs::try_exists(root.join("sys/fs/cgroup/cgroup.controllers"))
        .await
        .unwrap_or(false);

    let rootless = rootless_state_dir.is_some_and(|dir| !dir.is_empty());

    let facts = HostFacts {
        operating_system,
        kernel_version,
        apparmor,
        cgroup_version: if unified { 2 } else { 1 },
        cgroup_driver: cgroup_driver(unified, rootless).to_string(),
        cgroupns_private: unified,
        rootless,
    };

    tracing::debug!(?facts, "detected host facts");
    facts
}

/// Cgroup manager containers are placed under.
fn cgroup_driver(unified: bool, rootless: bool) -> &'static str {
    if unified && rootless {
        "systemd"
    } else {
        "cgroupfs"
    }
}

/// Read a file below `root`, trimmed. `None` if missing or unreadable.
async fn read_trimmed(root: &Path, relative: &str) -> Option<String> {
    match tokio::fs::read_to_string(root.join(relative)).await {
        Ok(text) => Some(text.trim().to_string()),
        Err(e) => {
            tracing::trace!("cannot read {}: {}", relative, e);
            None
        }
    }
}

/// Distribution name from os-release text.
pub fn parse_os_release(text: &str) -> Option<String> {
    let field = |key: &str| {
        text.lines().find_map(|line| {
            let value = line.trim().strip_prefix(key)?.strip_prefix('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (!value.is_empty()).then(|| value.to_string())
        })
    };
    field("PRETTY_NAME").or_else(|| field("NAME"))
}

// =============================================================================
// TESTS
// =============================================================================
