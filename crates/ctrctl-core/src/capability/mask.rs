//! # Capability Masks
//!
//! A 64-bit capability bitmap. Bits the table does not know are kept as-is
//! and surfaced as reserved bits; a mask is never rejected for carrying them.

use serde::{Deserialize, Serialize};

use super::table::{CAPABILITIES, Capability};

/// Bitmap of granted capabilities, bit N = capability with kernel number N.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CapabilityMask(pub u64);

impl CapabilityMask {
    /// The empty mask.
    pub const EMPTY: CapabilityMask = CapabilityMask(0);

    /// Create a mask from raw bits.
    #[must_use]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Mask with every capability in the table set.
    #[must_use]
    pub fn known() -> Self {
        Self::from_capabilities(CAPABILITIES)
    }

    /// Mask with exactly the given capabilities set.
    #[must_use]
    pub fn from_capabilities(caps: impl IntoIterator<Item = Capability>) -> Self {
        Self(caps.into_iter().fold(0, |bits, cap| bits | cap.mask()))
    }

    /// Get the raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Check whether a capability is set.
    #[must_use]
    pub const fn contains(self, cap: Capability) -> bool {
        self.0 & cap.mask() != 0
    }

    /// Set one capability.
    #[must_use]
    pub const fn with(self, cap: Capability) -> Self {
        Self(self.0 | cap.mask())
    }

    /// Clear one capability.
    #[must_use]
    pub const fn without(self, cap: Capability) -> Self {
        Self(self.0 & !cap.mask())
    }

    /// Set every bit of `other`.
    #[must_use]
    pub const fn union(self, other: CapabilityMask) -> Self {
        Self(self.0 | other.0)
    }

    /// Known capabilities present in this mask, ascending by bit.
    #[must_use]
    pub fn capabilities(self) -> Vec<Capability> {
        CAPABILITIES
            .iter()
            .copied()
            .filter(|cap| self.contains(*cap))
            .collect()
    }

    /// Set bits that this build has no name for, ascending.
    #[must_use]
    pub fn reserved_bits(self) -> Vec<u8> {
        let unknown = self.0 & !Self::known().0;
        (0..64u8).filter(|bit| unknown & (1u64 << bit) != 0).collect()
    }

    /// Render as the 16-digit lowercase hex used by `/proc/<pid>/status`.
    #[must_use]
    pub fn to_status_hex(self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse a hex bitmap, with or without a `0x` prefix.
    ///
    /// Returns `None` for empty input, non-hex digits or more than 64 bits.
    #[must_use]
    pub fn from_hex(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty()
            || digits.len() > 16
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }
        u64::from_str_radix(digits, 16).ok().map(Self)
    }
}

impl std::fmt::Display for CapabilityMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for CapabilityMask {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<CapabilityMask> for u64 {
    fn from(mask: CapabilityMask) -> Self {
        mask.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
