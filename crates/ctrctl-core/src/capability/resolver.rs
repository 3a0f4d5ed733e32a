//! # Capability Set Resolver
//!
//! Folds an ordered list of add/drop directives over a base mask.
//!
//! Directives apply strictly left to right and each one acts on the running
//! result, so a later directive overrides an earlier one on the same bit:
//!
//! | Directive | Effect |
//! |---|---|
//! | `Add(All)` | `result \| all_caps` |
//! | `Add(Named(c))` | `result \| bit(c)` |
//! | `Drop(All)` | `0` |
//! | `Drop(Named(c))` | `result & !bit(c)` |
//!
//! `all_caps` is whatever the running kernel supports, so it is an input
//! rather than [`CapabilityMask::known`].

use serde::{Deserialize, Serialize};

use super::mask::CapabilityMask;
use super::table::Capability;
use crate::primitives::ALL_CAPABILITIES_TOKEN;
use crate::types::CtrError;

// =============================================================================
// DIRECTIVES
// =============================================================================

/// What a directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapTarget {
    /// One capability from the table.
    Named(Capability),
    /// Every capability the host supports.
    All,
}

impl CapTarget {
    /// Parse a directive target. `all` (any case) is the wildcard.
    pub fn parse(name: &str) -> Result<CapTarget, CtrError> {
        if name.trim().eq_ignore_ascii_case(ALL_CAPABILITIES_TOKEN) {
            Ok(CapTarget::All)
        } else {
            Capability::lookup(name).map(CapTarget::Named)
        }
    }
}

impl std::fmt::Display for CapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapTarget::Named(cap) => write!(f, "{cap}"),
            CapTarget::All => f.write_str(ALL_CAPABILITIES_TOKEN),
        }
    }
}

/// Direction of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapAction {
    Add,
    Drop,
}

/// One add/drop instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapDirective {
    Add(CapTarget),
    Drop(CapTarget),
}

impl CapDirective {
    /// Build a directive from an action and a capability name.
    pub fn new(action: CapAction, name: &str) -> Result<CapDirective, CtrError> {
        let target = CapTarget::parse(name)?;
        Ok(match action {
            CapAction::Add => CapDirective::Add(target),
            CapAction::Drop => CapDirective::Drop(target),
        })
    }

    /// Parse the textual forms `--cap-add=NAME`, `--cap-drop=NAME`,
    /// `add:NAME` and `drop:NAME`.
    pub fn parse(text: &str) -> Result<CapDirective, CtrError> {
        let text = text.trim();
        let (action, name) = if let Some(name) = text.strip_prefix("--cap-add=") {
            (CapAction::Add, name)
        } else if let Some(name) = text.strip_prefix("--cap-drop=") {
            (CapAction::Drop, name)
        } else if let Some(name) = text.strip_prefix("add:") {
            (CapAction::Add, name)
        } else if let Some(name) = text.strip_prefix("drop:") {
            (CapAction::Drop, name)
        } else {
            return Err(CtrError::InvalidDirective(text.to_string()));
        };
        CapDirective::new(action, name)
    }

    /// The direction of this directive.
    #[must_use]
    pub fn action(&self) -> CapAction {
        match self {
            CapDirective::Add(_) => CapAction::Add,
            CapDirective::Drop(_) => CapAction::Drop,
        }
    }

    /// The target of this directive.
    #[must_use]
    pub fn target(&self) -> CapTarget {
        match self {
            CapDirective::Add(target) | CapDirective::Drop(target) => *target,
        }
    }

    /// Apply this directive to a running mask.
    #[must_use]
    pub fn apply(&self, current: CapabilityMask, all_caps: CapabilityMask) -> CapabilityMask {
        match self {
            CapDirective::Add(CapTarget::All) => current.union(all_caps),
            CapDirective::Add(CapTarget::Named(cap)) => current.with(*cap),
            CapDirective::Drop(CapTarget::All) => CapabilityMask::EMPTY,
            CapDirective::Drop(CapTarget::Named(cap)) => current.without(*cap),
        }
    }
}

impl std::fmt::Display for CapDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapDirective::Add(target) => write!(f, "--cap-add={target}"),
            CapDirective::Drop(target) => write!(f, "--cap-drop={target}"),
        }
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Resolve typed directives against a base mask.
///
/// An empty directive list returns `base` unchanged.
#[must_use]
pub fn resolve(
    base: CapabilityMask,
    directives: &[CapDirective],
    all_caps: CapabilityMask,
) -> CapabilityMask {
    directives
        .iter()
        .fold(base, |current, directive| directive.apply(current, all_caps))
}

/// Resolve textual `(action, name)` directives against a base mask.
///
/// Every name is validated before any directive is applied, so an unknown
/// capability anywhere in the list fails the whole call with
/// [`CtrError::UnknownCapability`].
pub fn resolve_named(
    base: CapabilityMask,
    directives: &[(CapAction, &str)],
    all_caps: CapabilityMask,
) -> Result<CapabilityMask, CtrError> {
    let typed = directives
        .iter()
        .map(|(action, name)| CapDirective::new(*action, name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(resolve(base, &typed, all_caps))
}

// =============================================================================
// TESTS
// =============================================================================
