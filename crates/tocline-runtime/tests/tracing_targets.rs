#![forbid(unsafe_code)]

//! Tracing target tests.
//!
//! Verify that walks, replacements, and navigation emit events under the
//! documented `tocline.*` targets with the fields operators filter on.
//!
//! Run:
//!   cargo test -p tocline-runtime --test tracing_targets

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tocline_core::{HeadingEntry, HeadingLevel, HeadingSequence, PositionMap};
use tocline_runtime::{ScrollTracker, select_heading};
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its metadata.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn new() -> (Self, Arc<Mutex<Vec<CapturedEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }
}

/// Visitor that extracts event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let (layer, events) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().unwrap().clone();
    events
}

fn headings(keys: &[&str]) -> HeadingSequence {
    keys.iter()
        .map(|k| HeadingEntry::new(*k, *k, HeadingLevel::H2))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn walk_emits_steps_and_summary_on_tracker_target() {
    let geo: PositionMap = [("a", -90.0), ("b", -40.0), ("c", 3.0)].into_iter().collect();
    let events = capture(|| {
        let mut tracker = ScrollTracker::new(headings(&["a", "b", "c"]));
        tracker.walk(&geo);
    });

    let steps: Vec<_> = events
        .iter()
        .filter(|e| e.target == "tocline.tracker" && e.message == "walk step")
        .collect();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].level, tracing::Level::TRACE);
    assert_eq!(steps[0].fields.get("cursor").map(String::as_str), Some("1"));
    assert_eq!(steps[1].fields.get("key").map(String::as_str), Some("c"));

    let summary = events
        .iter()
        .find(|e| e.message == "cursor advanced")
        .expect("advance summary");
    assert_eq!(summary.target, "tocline.tracker");
    assert_eq!(summary.level, tracing::Level::DEBUG);
    assert_eq!(summary.fields.get("from").map(String::as_str), Some("0"));
    assert_eq!(summary.fields.get("to").map(String::as_str), Some("2"));
}

#[test]
fn skipped_walk_reports_reason() {
    let events = capture(|| {
        let mut tracker = ScrollTracker::new(headings(&["a"]));
        tracker.walk(&PositionMap::new());
    });
    let skip = events
        .iter()
        .find(|e| e.message == "walk skipped")
        .expect("skip event");
    assert_eq!(
        skip.fields.get("reason").map(String::as_str),
        Some("geometry_unavailable")
    );
}

#[test]
fn clamped_replacement_logs_stale_index() {
    let events = capture(|| {
        let mut tracker = ScrollTracker::new(headings(&["a", "b", "c", "d"]));
        tracker.select_index(3).unwrap();
        tracker.replace_headings(headings(&["x"]));
    });
    let clamp = events
        .iter()
        .find(|e| e.message == "cursor clamped after heading replacement")
        .expect("clamp event");
    assert_eq!(clamp.target, "tocline.tracker");
    assert_eq!(
        clamp.fields.get("error").map(String::as_str),
        Some("index 3 out of bounds for 1 headings")
    );
    assert_eq!(clamp.fields.get("clamped_to").map(String::as_str), Some("0"));
}

#[test]
fn navigation_logs_on_its_own_target() {
    let events = capture(|| {
        let mut tracker = ScrollTracker::new(headings(&["a", "b"]));
        let mut geo: PositionMap = [("a", 0.0), ("b", 300.0)].into_iter().collect();
        select_heading(&mut tracker, &mut geo, &"b".into(), 1);
        select_heading(&mut tracker, &mut geo, &"gone".into(), 0);
    });
    let nav: Vec<_> = events
        .iter()
        .filter(|e| e.target == "tocline.navigation")
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(nav, vec!["heading selected", "selection skipped"]);
}

#[test]
fn unchanged_walk_is_quiet_at_debug() {
    let geo: PositionMap = [("a", 4.0)].into_iter().collect();
    let events = capture(|| {
        let mut tracker = ScrollTracker::new(headings(&["a"]));
        tracker.walk(&geo);
    });
    assert!(
        events
            .iter()
            .all(|e| e.level != tracing::Level::DEBUG || e.target != "tocline.tracker")
    );
}
