//! # Process Status Capability Parser
//!
//! Reads the five capability bitmaps out of `/proc/<pid>/status` text:
//!
//! ```text
//! CapInh:	0000000000000000
//! CapPrm:	00000000a80425fb
//! CapEff:	00000000a80425fb
//! CapBnd:	00000000a80425fb
//! CapAmb:	0000000000000000
//! ```
//!
//! Lines with other labels are ignored. Any of the five labels missing,
//! repeated, or carrying a value that is not a hex bitmap is an error.
//!
//! The same file carries the process's seccomp mode (`Seccomp:\t2`), read
//! separately by [`parse_seccomp_mode`]. Kernels built without seccomp omit
//! the line.

use serde::{Deserialize, Serialize};

use super::mask::CapabilityMask;
use crate::types::CtrError;

const LABELS: [&str; 5] = ["CapInh", "CapPrm", "CapEff", "CapBnd", "CapAmb"];

/// The capability sets of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CapabilitySets {
    pub inheritable: CapabilityMask,
    pub permitted: CapabilityMask,
    pub effective: CapabilityMask,
    pub bounding: CapabilityMask,
    pub ambient: CapabilityMask,
}

impl CapabilitySets {
    /// Sets as `(label, mask)` pairs in status-file order.
    #[must_use]
    pub fn labeled(&self) -> [(&'static str, CapabilityMask); 5] {
        [
            (LABELS[0], self.inheritable),
            (LABELS[1], self.permitted),
            (LABELS[2], self.effective),
            (LABELS[3], self.bounding),
            (LABELS[4], self.ambient),
        ]
    }
}

/// Parse all five capability sets from process status text.
pub fn parse_status(text: &str) -> Result<CapabilitySets, CtrError> {
    let mut found: [Option<CapabilityMask>; 5] = [None; 5];

    for (line_no, line) in text.lines().enumerate() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let Some(slot) = LABELS.iter().position(|l| *l == label.trim()) else {
            continue;
        };

        if found[slot].is_some() {
            return Err(CtrError::MalformedCapabilityStatus(format!(
                "duplicate {} on line {}",
                LABELS[slot],
                line_no + 1
            )));
        }

        let mask = CapabilityMask::from_hex(value).ok_or_else(|| {
            CtrError::MalformedCapabilityStatus(format!(
                "invalid {} bitmap {:?} on line {}",
                LABELS[slot],
                value.trim(),
                line_no + 1
            ))
        })?;
        found[slot] = Some(mask);
    }

    let take = |slot: usize| {
        found[slot].ok_or_else(|| {
            CtrError::MalformedCapabilityStatus(format!("missing {}", LABELS[slot]))
        })
    };

    Ok(CapabilitySets {
        inheritable: take(0)?,
        permitted: take(1)?,
        effective: take(2)?,
        bounding: take(3)?,
        ambient: take(4)?,
    })
}

/// Parse only the effective set (`CapEff`).
///
/// Unlike [`parse_status`] this does not require the other four labels, so it
/// also works on the single line produced by `grep CapEff /proc/1/status`.
pub fn parse_effective(text: &str) -> Result<CapabilityMask, CtrError> {
    let mut effective = None;

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        if label.trim() != "CapEff" {
            continue;
        }
        if effective.is_some() {
            return Err(CtrError::MalformedCapabilityStatus(
                "duplicate CapEff".to_string(),
            ));
        }
        effective = Some(CapabilityMask::from_hex(value).ok_or_else(|| {
            CtrError::MalformedCapabilityStatus(format!(
                "invalid CapEff bitmap {:?}",
                value.trim()
            ))
        })?);
    }

    effective.ok_or_else(|| CtrError::MalformedCapabilityStatus("missing CapEff".to_string()))
}

// =============================================================================
// SECCOMP MODE
// =============================================================================

/// Seccomp mode of a process, as the kernel numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SeccompMode {
    /// No filtering (`seccomp=unconfined`, `--privileged`).
    Disabled = 0,
    Strict = 1,
    /// A BPF filter is installed; the default for containers.
    Filter = 2,
}

impl SeccompMode {
    /// Mode from its kernel number.
    pub fn from_number(n: u8) -> Option<SeccompMode> {
        match n {
            0 => Some(SeccompMode::Disabled),
            1 => Some(SeccompMode::Strict),
            2 => Some(SeccompMode::Filter),
            _ => None,
        }
    }

    /// Kernel number of this mode.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SeccompMode::Disabled => "disabled",
            SeccompMode::Strict => "strict",
            SeccompMode::Filter => "filter",
        }
    }
}

impl std::fmt::Display for SeccompMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SeccompMode {
    type Err = CtrError;

    /// Accepts the number (`0`..`2`) or the name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_number = s.parse::<u8>().ok().and_then(SeccompMode::from_number);
        by_number
            .or_else(|| {
                [SeccompMode::Disabled, SeccompMode::Strict, SeccompMode::Filter]
                    .into_iter()
                    .find(|mode| mode.name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| {
                CtrError::MalformedCapabilityStatus(format!("invalid Seccomp mode {:?}", s))
            })
    }
}

/// Parse the `Seccomp` line. `None` when the kernel does not report one.
pub fn parse_seccomp_mode(text: &str) -> Result<Option<SeccompMode>, CtrError> {
    let mut mode = None;

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        if label.trim() != "Seccomp" {
            continue;
        }
        if mode.is_some() {
            return Err(CtrError::MalformedCapabilityStatus(
                "duplicate Seccomp".to_string(),
            ));
        }
        // Only the kernel's numeric form appears in status files.
        let parsed = value.trim().parse::<u8>().ok().and_then(SeccompMode::from_number);
        mode = Some(parsed.ok_or_else(|| {
            CtrError::MalformedCapabilityStatus(format!(
                "invalid Seccomp mode {:?}",
                value.trim()
            ))
        })?);
    }

    Ok(mode)
}

// =============================================================================
// TESTS
// =============================================================================
