//! # Built-in Constants
//!
//! Defaults and fixed values compiled into ctrctl.
//!
//! These mirror the behavior of the daemon-side defaults so that the CLI can
//! reason about a container's capabilities without asking the daemon.

/// Effective capability mask of a container started with no add/drop flags.
///
/// chown, dac_override, fowner, fsetid, kill, setgid, setuid, setpcap,
/// net_bind_service, net_raw, sys_chroot, mknod, audit_write, setfcap.
pub const DEFAULT_CAPABILITIES: u64 = 0xa804_25fb;

/// Plugin type prefix of snapshotter (storage driver) plugins.
pub const SNAPSHOTTER_PLUGIN_PREFIX: &str = "io.containerd.snapshotter.";

/// Snapshotter used when none is configured.
pub const DEFAULT_SNAPSHOTTER: &str = "overlayfs";

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Logging driver reported in the status report. Not configurable.
pub const LOGGING_DRIVER: &str = "json-file";

/// Seccomp profile name reported in the status report.
pub const DEFAULT_SECCOMP_PROFILE: &str = "default";

/// Operating system name when the host does not identify itself.
pub const UNKNOWN_OPERATING_SYSTEM: &str = "Linux";

/// Default deadline for each probe call, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Token that selects every capability in an add/drop directive.
pub const ALL_CAPABILITIES_TOKEN: &str = "all";
