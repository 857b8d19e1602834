#![forbid(unsafe_code)]

//! End-to-end outline scenarios over a synthetic document.
//!
//! Each scenario mounts a controller on a [`SyntheticDocument`], scrolls it
//! the way a reader would, and checks the active entry after every coalesced
//! walk.
//!
//! Run:
//!   cargo test -p tocline-harness --test e2e_outline_scenarios

use proptest::prelude::*;
use tocline_core::{HeadingEntry, HeadingKey, HeadingLevel, OutlineError};
use tocline_harness::{
    ScrollAlign, ScrollPattern, ScrollScriptConfig, SyntheticDocument, controller_for,
    generate_script, replay,
};
use tocline_runtime::{NavigationOutcome, OutlineConfig, OutlineController, WalkOutcome};
use tocline_widgets::{Marker, OutlineView};
use web_time::{Duration, Instant};

const QUIET: Duration = Duration::from_millis(10);

fn article() -> SyntheticDocument {
    let mut doc = SyntheticDocument::new(500.0);
    for (key, text, level, offset) in [
        ("intro", "Introduction", HeadingLevel::H2, 0.0),
        ("goals", "Goals", HeadingLevel::H3, 400.0),
        ("design", "Design", HeadingLevel::H2, 900.0),
        ("data", "Data model", HeadingLevel::H3, 1_300.0),
        ("api", "API", HeadingLevel::H3, 1_800.0),
        ("faq", "FAQ", HeadingLevel::H2, 2_600.0),
    ] {
        doc.push_heading(HeadingEntry::new(key, text, level), offset);
    }
    doc.set_content_height(3_400.0);
    doc
}

/// [`article`] with the page ending 300 below the "faq" heading, so the
/// last section can never scroll to the top of the viewport.
fn short_tail_article() -> SyntheticDocument {
    article().with_content_height(2_900.0)
}

fn mounted(doc: SyntheticDocument) -> OutlineController<SyntheticDocument> {
    controller_for(doc, &OutlineConfig::default())
}

/// Scroll to `top`, fire one event, and let the quiet period elapse.
fn settle_at(ctl: &mut OutlineController<SyntheticDocument>, top: f64, now: &mut Instant) {
    ctl.oracle_mut().scroll_to(top);
    ctl.on_scroll(*now);
    *now += QUIET;
    ctl.tick(*now);
    *now += QUIET;
}

fn active(ctl: &OutlineController<SyntheticDocument>) -> Option<&str> {
    ctl.state().selected_key().map(HeadingKey::as_str)
}

// ============================================================================
// Reading order
// ============================================================================

#[test]
fn reading_down_the_article() {
    let mut ctl = mounted(article());
    let mut now = Instant::now();
    assert_eq!(active(&ctl), Some("intro"));

    // "goals" reaches the top band.
    settle_at(&mut ctl, 395.0, &mut now);
    assert_eq!(active(&ctl), Some("goals"));

    // Between headings: the last passed heading stays active.
    settle_at(&mut ctl, 700.0, &mut now);
    assert_eq!(active(&ctl), Some("goals"));

    // Past "design" and "data" in one burst.
    settle_at(&mut ctl, 1_350.0, &mut now);
    assert_eq!(active(&ctl), Some("data"));

    settle_at(&mut ctl, 2_900.0, &mut now);
    assert_eq!(active(&ctl), Some("faq"));
}

#[test]
fn reading_back_up() {
    let mut ctl = mounted(article());
    let mut now = Instant::now();
    settle_at(&mut ctl, 2_900.0, &mut now);
    assert_eq!(active(&ctl), Some("faq"));

    // "faq" drops below the top band; "api" is above the viewport.
    settle_at(&mut ctl, 2_000.0, &mut now);
    assert_eq!(active(&ctl), Some("api"));

    settle_at(&mut ctl, 0.0, &mut now);
    assert_eq!(active(&ctl), Some("intro"));
}

#[test]
fn burst_of_fifty_events_walks_once() {
    let mut ctl = mounted(article());
    let t0 = Instant::now();
    for i in 0..50u32 {
        ctl.oracle_mut().scroll_to(f64::from(i) * 30.0);
        ctl.on_scroll(t0 + Duration::from_micros(u64::from(i) * 180));
    }
    let mut walks = 0;
    for ms in 0..40u64 {
        if ctl.tick(t0 + Duration::from_millis(ms)).is_some() {
            walks += 1;
        }
    }
    assert_eq!(walks, 1);
    assert_eq!(ctl.tracker().stats().walks, 1);
    // 49 * 30 = 1470: "data" (1300) has passed, "api" (1800) has not.
    assert_eq!(active(&ctl), Some("data"));
}

#[test]
fn reading_a_page_whose_tail_cannot_reach_the_top() {
    let mut ctl = mounted(short_tail_article());
    let mut now = Instant::now();
    assert_eq!(ctl.oracle().max_scroll(), 2_400.0);

    settle_at(&mut ctl, 395.0, &mut now);
    assert_eq!(active(&ctl), Some("goals"));
    settle_at(&mut ctl, 1_350.0, &mut now);
    assert_eq!(active(&ctl), Some("data"));

    // Bottom of the page: "faq" is still 200 below the top.
    settle_at(&mut ctl, 5_000.0, &mut now);
    assert_eq!(ctl.oracle().scroll_top(), 2_400.0);
    assert_eq!(active(&ctl), Some("api"));

    settle_at(&mut ctl, 0.0, &mut now);
    assert_eq!(active(&ctl), Some("intro"));
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn click_on_tail_heading_survives_its_own_scroll() {
    let mut ctl = mounted(short_tail_article());
    let mut view = OutlineView::new();
    let mut now = Instant::now();

    assert_eq!(view.activate(&mut ctl, 5).index(), Some(5));
    assert_eq!(ctl.oracle().scroll_top(), 2_400.0);

    // The scroll-into-view event is delivered and walked.
    ctl.on_scroll(now);
    now += QUIET;
    assert_eq!(ctl.tick(now).unwrap().outcome, WalkOutcome::Unchanged);
    assert_eq!(active(&ctl), Some("faq"));
    assert_eq!(view.rows(ctl.tracker())[5].marker, Marker::Dot);

    // A redundant event at the same position keeps it.
    now += QUIET;
    settle_at(&mut ctl, 2_400.0, &mut now);
    assert_eq!(active(&ctl), Some("faq"));

    // Reading back up releases the selection.
    settle_at(&mut ctl, 2_000.0, &mut now);
    assert_eq!(active(&ctl), Some("api"));
    settle_at(&mut ctl, 0.0, &mut now);
    assert_eq!(active(&ctl), Some("intro"));
}

#[test]
fn click_scrolls_and_selects_without_intermediate_steps() {
    let mut ctl = mounted(article());
    let mut view = OutlineView::new();
    let outcome = view.activate(&mut ctl, 4);
    assert_eq!(
        outcome,
        NavigationOutcome::Selected {
            index: 4,
            key: "api".into(),
            previous: Some(0),
        }
    );
    assert_eq!(ctl.oracle().scroll_top(), 1_800.0);
    assert_eq!(ctl.tracker().stats().steps, 0);

    // The programmatic scroll reaches the listener; the walk agrees.
    let now = Instant::now();
    ctl.on_scroll(now);
    let report = ctl.tick(now + QUIET).unwrap();
    assert_eq!(report.outcome, WalkOutcome::Unchanged);
    assert_eq!(active(&ctl), Some("api"));

    let rows = view.rows(ctl.tracker());
    assert_eq!(rows[4].marker, Marker::Dot);
}

#[test]
fn click_with_offset_alignment_keeps_heading_in_top_band() {
    let mut doc = article();
    doc.set_align(ScrollAlign::Offset(4.0));
    let mut ctl = mounted(doc);
    ctl.select_heading(&"design".into(), 2);

    let now = Instant::now();
    ctl.on_scroll(now);
    assert_eq!(ctl.tick(now + QUIET).unwrap().outcome, WalkOutcome::Unchanged);
    assert_eq!(active(&ctl), Some("design"));
}

#[test]
fn click_on_detached_heading_changes_nothing() {
    let mut ctl = mounted(article());
    ctl.oracle_mut().detach(&"faq".into());
    let outcome = ctl.select_heading(&"faq".into(), 5);
    assert_eq!(
        outcome,
        NavigationOutcome::Skipped(OutlineError::GeometryUnavailable { key: "faq".into() })
    );
    assert_eq!(active(&ctl), Some("intro"));
    assert_eq!(ctl.oracle().scroll_top(), 0.0);
}

// ============================================================================
// Degraded geometry and lifecycle
// ============================================================================

#[test]
fn detached_next_heading_is_stepped_onto() {
    let mut ctl = mounted(article());
    let mut now = Instant::now();
    ctl.oracle_mut().detach(&"goals".into());
    settle_at(&mut ctl, 1_000.0, &mut now);
    // One step onto the unmeasurable heading, then the walk stops.
    assert_eq!(active(&ctl), Some("goals"));

    ctl.oracle_mut().attach(&"goals".into());
    settle_at(&mut ctl, 1_010.0, &mut now);
    assert_eq!(active(&ctl), Some("design"));
}

#[test]
fn detached_active_heading_skips_walks() {
    let mut ctl = mounted(article());
    let mut now = Instant::now();
    ctl.oracle_mut().detach(&"intro".into());
    settle_at(&mut ctl, 2_000.0, &mut now);
    assert_eq!(active(&ctl), Some("intro"));
    assert_eq!(ctl.tracker().stats().skips, 1);
}

#[test]
fn teardown_stops_tracking() {
    let mut ctl = mounted(article());
    assert_eq!(ctl.oracle().listeners().len(), 1);
    let t0 = Instant::now();
    ctl.oracle_mut().scroll_to(1_500.0);
    ctl.on_scroll(t0);
    ctl.teardown_on_oracle();

    assert!(ctl.oracle().listeners().is_empty());
    assert!(ctl.tick(t0 + Duration::from_secs(1)).is_none());
    assert_eq!(active(&ctl), Some("intro"));
}

#[test]
fn remount_does_not_double_subscribe() {
    let mut ctl = mounted(article());
    ctl.mount_on_oracle();
    ctl.mount_on_oracle();
    assert_eq!(ctl.oracle().subscribe_calls(), 1);
}

#[test]
fn replacing_headings_mid_scroll() {
    let mut ctl = mounted(article());
    let mut now = Instant::now();
    settle_at(&mut ctl, 2_900.0, &mut now);
    assert_eq!(ctl.state().cursor(), Some(5));

    let shorter = ctl.headings().iter().take(3).cloned().collect();
    ctl.set_headings(shorter);
    assert_eq!(ctl.state().cursor(), Some(2));

    settle_at(&mut ctl, 2_910.0, &mut now);
    assert_eq!(active(&ctl), Some("design"));
}

// ============================================================================
// Scripted replays
// ============================================================================

fn scripted(pattern: ScrollPattern, seed: u64) -> Vec<usize> {
    scripted_on(SyntheticDocument::evenly_spaced(30, 140.0, 640.0), pattern, seed)
}

fn scripted_on(doc: SyntheticDocument, pattern: ScrollPattern, seed: u64) -> Vec<usize> {
    let max = doc.max_scroll();
    let mut ctl = mounted(doc);
    if matches!(pattern, ScrollPattern::MonotonicUp { .. }) {
        let mut now = Instant::now();
        settle_at(&mut ctl, max, &mut now);
    }
    let script = generate_script(&ScrollScriptConfig::new(pattern, seed, max));
    replay(&mut ctl, &script, Instant::now()).cursor_trace()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scripted_down_never_retreats(seed in any::<u64>(), events in 1usize..150) {
        let trace = scripted(ScrollPattern::MonotonicDown { events }, seed);
        prop_assert!(trace.windows(2).all(|w| w[0] <= w[1]), "{trace:?}");
    }

    #[test]
    fn scripted_up_never_advances(seed in any::<u64>(), events in 1usize..150) {
        let trace = scripted(ScrollPattern::MonotonicUp { events }, seed);
        prop_assert!(trace.windows(2).all(|w| w[0] >= w[1]), "{trace:?}");
    }

    #[test]
    fn scripted_down_on_short_tail_never_retreats(seed in any::<u64>(), events in 1usize..150) {
        let doc = SyntheticDocument::evenly_spaced(30, 140.0, 640.0).with_content_height(4_200.0);
        let trace = scripted_on(doc, ScrollPattern::MonotonicDown { events }, seed);
        prop_assert!(trace.windows(2).all(|w| w[0] <= w[1]), "{trace:?}");
    }

    #[test]
    fn selection_survives_its_own_scroll(index in 0usize..24, start in 0.0f64..2_280.0) {
        // Headings 20..24 cannot reach the top of the viewport.
        let doc = SyntheticDocument::evenly_spaced(24, 120.0, 600.0).with_content_height(2_880.0);
        let mut ctl = mounted(doc);
        let mut now = Instant::now();
        settle_at(&mut ctl, start, &mut now);

        let key = ctl.headings().key_at(index).cloned().unwrap();
        prop_assert_eq!(ctl.select_heading(&key, index).index(), Some(index));
        ctl.on_scroll(now);
        now += QUIET;
        let report = ctl.tick(now).unwrap();
        prop_assert_eq!(report.outcome, WalkOutcome::Unchanged);
        prop_assert_eq!(ctl.state().cursor(), Some(index));
    }
}
