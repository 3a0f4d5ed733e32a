//! # Scenario Tier Tests (T0-T3)
//!
//! End-to-end scenarios over the public API of ctrctl-core.
//!
//! ## Tiers
//! - T0: Capability Table
//! - T1: Directive Resolution
//! - T2: Plugin Classification
//! - T3: Status Report Assembly

use ctrctl_core::{
    CapAction, CapDirective, CapTarget, Capability, CapabilityMask, ClientInfo, CtrError,
    HostFacts, PluginRecord, StatusReport, VersionInfo, classify_storage, parse_effective,
    primitives::DEFAULT_CAPABILITIES, resolve, resolve_named,
};

const CAP_NET_RAW: u8 = 13;

/// Host mask used by the run tests: the default container set.
const ALL_CAPS: u64 = 0xa804_25fb;

// =============================================================================
// TIER T0: CAPABILITY TABLE
// =============================================================================

mod t0_capability_table {
    use super::*;

    /// T0.1: net_raw sits at bit 13.
    #[test]
    fn net_raw_bit() {
        assert_eq!(Capability::lookup("net_raw").expect("known").bit(), CAP_NET_RAW);
    }

    /// T0.2: the default set decodes to the expected names.
    #[test]
    fn default_set_names() {
        let names: Vec<_> = CapabilityMask::new(DEFAULT_CAPABILITIES)
            .capabilities()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "chown",
                "dac_override",
                "fowner",
                "fsetid",
                "kill",
                "setgid",
                "setuid",
                "setpcap",
                "net_bind_service",
                "net_raw",
                "sys_chroot",
                "mknod",
                "audit_write",
                "setfcap",
            ]
        );
    }
}

// =============================================================================
// TIER T1: DIRECTIVE RESOLUTION
// =============================================================================

mod t1_resolution {
    use super::*;

    fn run(args: &[&str]) -> u64 {
        let directives: Vec<CapDirective> = args
            .iter()
            .map(|a| CapDirective::parse(a).expect("directive"))
            .collect();
        resolve(
            CapabilityMask::new(DEFAULT_CAPABILITIES),
            &directives,
            CapabilityMask::new(ALL_CAPS),
        )
        .bits()
    }

    /// T1.1: no flags yields the default set.
    #[test]
    fn default_run() {
        assert_eq!(run(&[]), 0xa80425fb);
    }

    /// T1.2: --cap-add=all yields the host set.
    #[test]
    fn add_all() {
        assert_eq!(run(&["--cap-add=all"]), ALL_CAPS);
    }

    /// T1.3: --cap-add=all --cap-drop=net_raw clears exactly bit 13.
    #[test]
    fn add_all_drop_net_raw() {
        let result = run(&["--cap-add=all", "--cap-drop=net_raw"]);
        assert_eq!(result, ALL_CAPS ^ (1 << CAP_NET_RAW));
        assert_eq!(result, 0xa80405fb);
    }

    /// T1.4: --cap-drop=all --cap-add=net_raw leaves exactly bit 13.
    #[test]
    fn drop_all_add_net_raw() {
        assert_eq!(run(&["--cap-drop=all", "--cap-add=net_raw"]), 1 << CAP_NET_RAW);
    }

    /// T1.5: reversing add-all and drop differs.
    #[test]
    fn order_sensitivity() {
        let all = CapabilityMask::new(ALL_CAPS);
        let net_raw = CapTarget::Named(Capability::NetRaw);
        let a = resolve(
            CapabilityMask::EMPTY,
            &[CapDirective::Add(CapTarget::All), CapDirective::Drop(net_raw)],
            all,
        );
        let b = resolve(
            CapabilityMask::EMPTY,
            &[CapDirective::Drop(net_raw), CapDirective::Add(CapTarget::All)],
            all,
        );
        assert_eq!(a.bits(), ALL_CAPS & !(1 << CAP_NET_RAW));
        assert_eq!(b.bits(), ALL_CAPS);
        assert_ne!(a, b);
    }

    /// T1.6: unknown names surface verbatim.
    #[test]
    fn unknown_capability() {
        let result = resolve_named(
            CapabilityMask::new(DEFAULT_CAPABILITIES),
            &[(CapAction::Add, "CAP_TELEPORT")],
            CapabilityMask::new(ALL_CAPS),
        );
        match result {
            Err(CtrError::UnknownCapability(name)) => assert_eq!(name, "CAP_TELEPORT"),
            other => unreachable!("expected UnknownCapability, got {other:?}"),
        }
    }

    /// T1.7: the resolved mask compares bit-for-bit with a parsed status line.
    #[test]
    fn compare_with_status_line() {
        let observed = parse_effective("CapEff:\t00000000a80405fb\n").expect("parse");
        assert_eq!(observed.bits(), run(&["--cap-add=all", "--cap-drop=net_raw"]));
    }
}

// =============================================================================
// TIER T2: PLUGIN CLASSIFICATION
// =============================================================================

mod t2_plugins {
    use super::*;

    /// T2.1: three plugins, two snapshotters, one broken.
    #[test]
    fn one_healthy_snapshotter() {
        let plugins = vec![
            PluginRecord::loaded("io.containerd.snapshotter.v1", "overlayfs"),
            PluginRecord::failed("io.containerd.snapshotter.v1", "devmapper", "devmapper not configured"),
            PluginRecord::loaded("io.containerd.grpc.v1", "introspection"),
        ];
        assert_eq!(classify_storage(&plugins), vec!["overlayfs".to_string()]);
    }
}

// =============================================================================
// TIER T3: STATUS REPORT ASSEMBLY
// =============================================================================

mod t3_report {
    use super::*;

    /// T3.1: assembling twice yields identical reports.
    #[test]
    fn assembly_is_deterministic() {
        let version = VersionInfo::new("v2.0.0", "207ad711", "3b4f1c2e");
        let plugins = vec![
            PluginRecord::loaded("io.containerd.snapshotter.v1", "overlayfs"),
            PluginRecord::loaded("io.containerd.snapshotter.v1", "native"),
        ];
        let host = HostFacts::default();

        let a = StatusReport::assemble(ClientInfo::default(), &version, &plugins, &host, "overlayfs");
        let b = StatusReport::assemble(ClientInfo::default(), &version, &plugins, &host, "overlayfs");
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).expect("json"),
            serde_json::to_string(&b).expect("json")
        );
    }
}
