//! # Property-Based Tests
//!
//! Resolver invariants checked with proptest over arbitrary masks and
//! directive sequences.

use ctrctl_core::{
    CAPABILITIES, CapAction, CapDirective, CapTarget, Capability, CapabilityMask, resolve,
    resolve_named,
};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn capability() -> impl Strategy<Value = Capability> {
    (0..CAPABILITIES.len()).prop_map(|i| CAPABILITIES[i])
}

fn target() -> impl Strategy<Value = CapTarget> {
    prop_oneof![
        1 => Just(CapTarget::All),
        6 => capability().prop_map(CapTarget::Named),
    ]
}

fn directive() -> impl Strategy<Value = CapDirective> {
    prop_oneof![
        target().prop_map(CapDirective::Add),
        target().prop_map(CapDirective::Drop),
    ]
}

fn mask() -> impl Strategy<Value = CapabilityMask> {
    any::<u64>().prop_map(CapabilityMask::new)
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Same inputs always produce the same mask.
    #[test]
    fn resolve_is_deterministic(
        base in mask(),
        all in mask(),
        directives in vec(directive(), 0..16)
    ) {
        prop_assert_eq!(resolve(base, &directives, all), resolve(base, &directives, all));
    }

    /// No directives leaves the base untouched, reserved bits included.
    #[test]
    fn empty_is_identity(base in mask(), all in mask()) {
        prop_assert_eq!(resolve(base, &[], all), base);
    }

    /// Dropping all clears every bit.
    #[test]
    fn drop_all_is_zero(base in mask(), all in mask()) {
        let result = resolve(base, &[CapDirective::Drop(CapTarget::All)], all);
        prop_assert_eq!(result, CapabilityMask::EMPTY);
    }

    /// Adding all is a union with the host mask.
    #[test]
    fn add_all_is_union(base in mask(), all in mask()) {
        let result = resolve(base, &[CapDirective::Add(CapTarget::All)], all);
        prop_assert_eq!(result.bits(), base.bits() | all.bits());
    }

    /// A trailing named directive decides that bit regardless of history.
    #[test]
    fn last_named_directive_wins_its_bit(
        base in mask(),
        all in mask(),
        mut directives in vec(directive(), 0..16),
        cap in capability(),
        add in any::<bool>()
    ) {
        directives.push(if add {
            CapDirective::Add(CapTarget::Named(cap))
        } else {
            CapDirective::Drop(CapTarget::Named(cap))
        });
        let result = resolve(base, &directives, all);
        prop_assert_eq!(result.contains(cap), add);
    }

    /// Named directives never touch bits outside the named capability.
    #[test]
    fn named_directive_is_local(base in mask(), all in mask(), cap in capability()) {
        let added = resolve(base, &[CapDirective::Add(CapTarget::Named(cap))], all);
        let dropped = resolve(base, &[CapDirective::Drop(CapTarget::Named(cap))], all);
        prop_assert_eq!(added.bits() & !cap.mask(), base.bits() & !cap.mask());
        prop_assert_eq!(dropped.bits() & !cap.mask(), base.bits() & !cap.mask());
    }

    /// Any unknown name fails the call, wherever it appears.
    #[test]
    fn unknown_name_always_fails(
        base in mask(),
        all in mask(),
        position in 0usize..4,
        bogus in "[a-z]{3,8}_zz"
    ) {
        let mut directives: Vec<(CapAction, &str)> = vec![
            (CapAction::Add, "all"),
            (CapAction::Drop, "net_raw"),
            (CapAction::Add, "sys_admin"),
        ];
        directives.insert(position.min(directives.len()), (CapAction::Drop, bogus.as_str()));
        prop_assert!(resolve_named(base, &directives, all).is_err());
    }
}
