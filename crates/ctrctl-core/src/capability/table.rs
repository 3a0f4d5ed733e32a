//! # Capability Table
//!
//! The fixed catalog of Linux capabilities known to this build, in kernel bit
//! order (`include/uapi/linux/capability.h`).
//!
//! Names are canonicalized to lower case without the `cap_` prefix. Lookup is
//! case-insensitive and tolerates the prefix, so `CAP_NET_RAW`, `net_raw` and
//! `Net_Raw` all resolve to [`Capability::NetRaw`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::CtrError;

/// A Linux capability. The discriminant is the kernel bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Capability {
    Chown = 0,
    DacOverride = 1,
    DacReadSearch = 2,
    Fowner = 3,
    Fsetid = 4,
    Kill = 5,
    Setgid = 6,
    Setuid = 7,
    Setpcap = 8,
    LinuxImmutable = 9,
    NetBindService = 10,
    NetBroadcast = 11,
    NetAdmin = 12,
    NetRaw = 13,
    IpcLock = 14,
    IpcOwner = 15,
    SysModule = 16,
    SysRawio = 17,
    SysChroot = 18,
    SysPtrace = 19,
    SysPacct = 20,
    SysAdmin = 21,
    SysBoot = 22,
    SysNice = 23,
    SysResource = 24,
    SysTime = 25,
    SysTtyConfig = 26,
    Mknod = 27,
    Lease = 28,
    AuditWrite = 29,
    AuditControl = 30,
    Setfcap = 31,
    MacOverride = 32,
    MacAdmin = 33,
    Syslog = 34,
    WakeAlarm = 35,
    BlockSuspend = 36,
    AuditRead = 37,
    Perfmon = 38,
    Bpf = 39,
    CheckpointRestore = 40,
}

/// Every known capability, indexed by bit.
pub const CAPABILITIES: [Capability; 41] = [
    Capability::Chown,
    Capability::DacOverride,
    Capability::DacReadSearch,
    Capability::Fowner,
    Capability::Fsetid,
    Capability::Kill,
    Capability::Setgid,
    Capability::Setuid,
    Capability::Setpcap,
    Capability::LinuxImmutable,
    Capability::NetBindService,
    Capability::NetBroadcast,
    Capability::NetAdmin,
    Capability::NetRaw,
    Capability::IpcLock,
    Capability::IpcOwner,
    Capability::SysModule,
    Capability::SysRawio,
    Capability::SysChroot,
    Capability::SysPtrace,
    Capability::SysPacct,
    Capability::SysAdmin,
    Capability::SysBoot,
    Capability::SysNice,
    Capability::SysResource,
    Capability::SysTime,
    Capability::SysTtyConfig,
    Capability::Mknod,
    Capability::Lease,
    Capability::AuditWrite,
    Capability::AuditControl,
    Capability::Setfcap,
    Capability::MacOverride,
    Capability::MacAdmin,
    Capability::Syslog,
    Capability::WakeAlarm,
    Capability::BlockSuspend,
    Capability::AuditRead,
    Capability::Perfmon,
    Capability::Bpf,
    Capability::CheckpointRestore,
];

impl Capability {
    /// Kernel bit position.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this capability.
    #[must_use]
    pub const fn mask(self) -> u64 {
        1u64 << self.bit()
    }

    /// Canonical name, lower case without the `cap_` prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Capability::Chown => "chown",
            Capability::DacOverride => "dac_override",
            Capability::DacReadSearch => "dac_read_search",
            Capability::Fowner => "fowner",
            Capability::Fsetid => "fsetid",
            Capability::Kill => "kill",
            Capability::Setgid => "setgid",
            Capability::Setuid => "setuid",
            Capability::Setpcap => "setpcap",
            Capability::LinuxImmutable => "linux_immutable",
            Capability::NetBindService => "net_bind_service",
            Capability::NetBroadcast => "net_broadcast",
            Capability::NetAdmin => "net_admin",
            Capability::NetRaw => "net_raw",
            Capability::IpcLock => "ipc_lock",
            Capability::IpcOwner => "ipc_owner",
            Capability::SysModule => "sys_module",
            Capability::SysRawio => "sys_rawio",
            Capability::SysChroot => "sys_chroot",
            Capability::SysPtrace => "sys_ptrace",
            Capability::SysPacct => "sys_pacct",
            Capability::SysAdmin => "sys_admin",
            Capability::SysBoot => "sys_boot",
            Capability::SysNice => "sys_nice",
            Capability::SysResource => "sys_resource",
            Capability::SysTime => "sys_time",
            Capability::SysTtyConfig => "sys_tty_config",
            Capability::Mknod => "mknod",
            Capability::Lease => "lease",
            Capability::AuditWrite => "audit_write",
            Capability::AuditControl => "audit_control",
            Capability::Setfcap => "setfcap",
            Capability::MacOverride => "mac_override",
            Capability::MacAdmin => "mac_admin",
            Capability::Syslog => "syslog",
            Capability::WakeAlarm => "wake_alarm",
            Capability::BlockSuspend => "block_suspend",
            Capability::AuditRead => "audit_read",
            Capability::Perfmon => "perfmon",
            Capability::Bpf => "bpf",
            Capability::CheckpointRestore => "checkpoint_restore",
        }
    }

    /// Capability at the given bit, if this build knows it.
    #[must_use]
    pub fn from_bit(bit: u8) -> Option<Capability> {
        CAPABILITIES.get(usize::from(bit)).copied()
    }

    /// Look up a capability by name.
    ///
    /// Accepts any case and an optional `cap_` prefix. The error carries the
    /// name exactly as supplied.
    pub fn lookup(name: &str) -> Result<Capability, CtrError> {
        let lowered = name.trim().to_ascii_lowercase();
        let bare = lowered.strip_prefix("cap_").unwrap_or(&lowered);

        CAPABILITIES
            .iter()
            .copied()
            .find(|cap| cap.name() == bare)
            .ok_or_else(|| CtrError::UnknownCapability(name.to_string()))
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = CtrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::lookup(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
