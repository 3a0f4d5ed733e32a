//! Output rendering tests.
//!
//! The `info` layout is compared byte for byte so changes to it are deliberate.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use ctrctl::render::{render_json, render_report, render_sets};
use ctrctl_core::{
    ClientInfo, HostFacts, PluginRecord, SeccompMode, StatusReport, VersionInfo, parse_status,
};

fn sample_report(rootless: bool) -> StatusReport {
    let version = VersionInfo::new("v1.7.13", "7c3aca7", "6f1e0f8a-9c2d-4c1e-8d53-1f0a2b3c4d5e");
    let plugins = vec![
        PluginRecord::loaded("io.containerd.snapshotter.v1", "native"),
        PluginRecord::failed("io.containerd.snapshotter.v1", "btrfs", "not a btrfs filesystem"),
        PluginRecord::loaded("io.containerd.snapshotter.v1", "overlayfs"),
        PluginRecord::loaded("io.containerd.runtime.v2", "task"),
    ];
    let host = HostFacts {
        operating_system: "Debian GNU/Linux 12 (bookworm)".to_string(),
        kernel_version: "6.1.0-18-amd64".to_string(),
        apparmor: true,
        cgroup_version: 2,
        cgroup_driver: if rootless { "systemd" } else { "cgroupfs" }.to_string(),
        cgroupns_private: true,
        rootless,
    };
    StatusReport::assemble(ClientInfo::default(), &version, &plugins, &host, "overlayfs")
}

#[test]
fn test_info_layout() {
    let expected = "\
Client:
 Namespace:\tdefault
 Debug Mode:\tfalse

Server:
 Server Version: v1.7.13
 Storage Driver: overlayfs
 Logging Driver: json-file
 Cgroup Driver: cgroupfs
 Cgroup Version: 2
 Plugins:
  Storage: native overlayfs
 Security Options:
  apparmor
  seccomp
   Profile: default
  cgroupns
 Operating System: Debian GNU/Linux 12 (bookworm)
 Kernel Version: 6.1.0-18-amd64
 ID: 6f1e0f8a-9c2d-4c1e-8d53-1f0a2b3c4d5e
";
    assert_eq!(render_report(&sample_report(false)), expected);
}

#[test]
fn test_rootless_listed_last() {
    let text = render_report(&sample_report(true));
    let security: Vec<&str> = text
        .lines()
        .skip_while(|line| *line != " Security Options:")
        .skip(1)
        .take_while(|line| line.starts_with("  "))
        .collect();
    assert_eq!(
        security,
        vec!["  apparmor", "  seccomp", "   Profile: default", "  cgroupns", "  rootless"]
    );
    assert!(text.contains(" Cgroup Driver: systemd\n"));
}

#[test]
fn test_repeated_renders_are_identical() {
    let first = render_report(&sample_report(false));
    let second = render_report(&sample_report(false));
    assert_eq!(first, second);

    let json_first = render_json(&sample_report(false)).unwrap();
    let json_second = render_json(&sample_report(false)).unwrap();
    assert_eq!(json_first, json_second);
}

#[test]
fn test_json_field_names() {
    let json: serde_json::Value =
        serde_json::from_str(&render_json(&sample_report(false)).unwrap()).unwrap();
    assert_eq!(json["server_version"], "v1.7.13");
    assert_eq!(json["storage_drivers"], serde_json::json!(["native", "overlayfs"]));
    assert_eq!(json["security_features"][1]["name"], "seccomp");
    assert_eq!(json["security_features"][1]["profile"], "default");
    assert_eq!(json["client"]["namespace"], "default");
}

#[test]
fn test_sets_with_names() {
    let status = "\
Name:\tsleep
CapInh:\t0000000000000000
CapPrm:\t0000000000002000
CapEff:\t0000000000002000
CapBnd:\t0000000000002001
CapAmb:\t0000000000000000
";
    let sets = parse_status(status).unwrap();
    let text = render_sets(&sets, None, true);
    assert!(text.contains("CapEff:\t0000000000002000\n\tnet_raw\n"));
    assert!(text.contains("CapBnd:\t0000000000002001\n\tchown,net_raw\n"));
    assert!(text.contains("CapInh:\t0000000000000000\nCapPrm:"));
    assert!(!text.contains("Seccomp"));
}

#[test]
fn test_sets_end_with_seccomp_mode() {
    let status = "\
CapInh:\t0000000000000000
CapPrm:\t00000000a80425fb
CapEff:\t00000000a80425fb
CapBnd:\t00000000a80425fb
CapAmb:\t0000000000000000
";
    let sets = parse_status(status).unwrap();
    let text = render_sets(&sets, Some(SeccompMode::Filter), false);
    assert!(text.ends_with("CapAmb:\t0000000000000000\nSeccomp:\t2 (filter)\n"));
}
