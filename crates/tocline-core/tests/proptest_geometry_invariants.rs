//! Property-based invariant tests for viewport classification and snapshots.
//!
//! ## Invariants
//!
//! 1. Exclusivity: a position satisfies at most one placement predicate
//! 2. Ordering: placements never move "up" as `y` grows
//! 3. Band membership agrees with the raw threshold comparisons
//! 4. Every key in a snapshot resolves to an index that carries it

use proptest::prelude::*;
use tocline_core::{HeadingEntry, HeadingLevel, HeadingSequence, Placement, ViewportBands};

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_y() -> impl Strategy<Value = f64> {
    prop_oneof![
        -10_000.0f64..10_000.0,
        -1.0f64..10.0,
        Just(0.0),
        Just(0.26),
        Just(9.0),
    ]
}

fn rank(p: Placement) -> u8 {
    match p {
        Placement::AboveViewport => 0,
        Placement::Unbanded | Placement::AtTop => 1,
        Placement::BelowTop => 2,
    }
}

// ── 1. Exclusivity ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn predicates_are_exclusive(y in arb_y()) {
        let p = ViewportBands::default().classify(y);
        let hits = [p.is_above_viewport(), p.is_at_top(), p.is_below_top()]
            .iter()
            .filter(|hit| **hit)
            .count();
        prop_assert!(hits <= 1);
        prop_assert_eq!(hits == 0, p == Placement::Unbanded);
    }
}

// ── 2. Ordering ───────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn placement_rank_is_monotone(a in arb_y(), b in arb_y()) {
        let bands = ViewportBands::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(bands.classify(lo)) <= rank(bands.classify(hi)));
    }
}

// ── 3. Raw thresholds ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn classification_matches_thresholds(y in arb_y()) {
        let p = ViewportBands::default().classify(y);
        prop_assert_eq!(p.is_above_viewport(), y <= 0.0);
        prop_assert_eq!(p.is_at_top(), y > 0.26 && y < 9.0);
        prop_assert_eq!(p.is_below_top(), y > 9.0);
    }
}

// ── 4. Snapshot lookup ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_key_resolves(keys in prop::collection::hash_set("[a-z]{1,6}", 0..40)) {
        let seq: HeadingSequence = keys
            .iter()
            .map(|k| HeadingEntry::new(k.as_str(), k.as_str(), HeadingLevel::H2))
            .collect();
        prop_assert_eq!(seq.len(), keys.len());
        for entry in &seq {
            let index = seq.position_of(&entry.key).unwrap();
            prop_assert_eq!(seq.key_at(index), Some(&entry.key));
        }
    }
}
