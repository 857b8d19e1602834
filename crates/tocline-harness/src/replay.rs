#![forbid(unsafe_code)]

//! Replay a scroll script through an outline controller.
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"replay_start","pattern":"monotonic_down","seed":42,"events":200,"headings":40}
//! {"event":"walk","idx":0,"at_us":10400,"burst_events":6,"outcome":"advanced","from":0,"to":2,"steps":[1,2]}
//! {"event":"replay_complete","events":200,"walks":31,"final_cursor":39,"final_key":"section-39"}
//! ```
//!
//! `walk` lines are emitted for every coalesced walk, including ones that
//! leave the cursor in place (`"outcome":"unchanged"`) and ones that were
//! skipped (`"outcome":"skipped"` with a `"reason"`).

use serde_json::json;
use tocline_runtime::{OutlineConfig, OutlineController, TickReport, WalkOutcome};
use web_time::{Duration, Instant};

use crate::document::SyntheticDocument;
use crate::scroll_script::ScrollScript;

/// One coalesced walk observed during a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRecord {
    /// Time since the start of the replay.
    pub at: Duration,
    /// Events folded into the burst.
    pub burst_events: u32,
    pub outcome: WalkOutcome,
    /// Every cursor position the walk stepped through.
    pub steps: Vec<usize>,
    /// Cursor once the walk finished.
    pub cursor: Option<usize>,
}

/// Result of [`replay`].
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub events: usize,
    pub walks: Vec<WalkRecord>,
    pub final_cursor: Option<usize>,
    /// One JSON object per line.
    pub jsonl: Vec<String>,
}

impl ReplayReport {
    /// Cursor after each walk, in order.
    #[must_use]
    pub fn cursor_trace(&self) -> Vec<usize> {
        self.walks.iter().filter_map(|w| w.cursor).collect()
    }
}

/// Drive `controller` through `script`, with the document as both oracle and
/// scroll source.
///
/// The controller is mounted if it is not already, and ticked once more after
/// the last event so the trailing burst is walked.
pub fn replay(
    controller: &mut OutlineController<SyntheticDocument>,
    script: &ScrollScript,
    start: Instant,
) -> ReplayReport {
    controller.mount_on_oracle();
    let quiet = controller.coalescer().quiet_period();

    let mut jsonl = vec![
        json!({
            "event": "replay_start",
            "pattern": script.pattern_name,
            "seed": script.seed,
            "events": script.steps.len(),
            "headings": controller.headings().len(),
        })
        .to_string(),
    ];
    let mut walks = Vec::new();

    for step in &script.steps {
        let now = start + step.at;
        tick_into(controller, now, start, &mut walks, &mut jsonl);
        controller.oracle_mut().scroll_to(step.scroll_top);
        controller.on_scroll(now);
    }
    let end = start + script.duration() + quiet;
    tick_into(controller, end, start, &mut walks, &mut jsonl);

    let final_cursor = controller.state().cursor();
    jsonl.push(
        json!({
            "event": "replay_complete",
            "events": script.steps.len(),
            "walks": walks.len(),
            "final_cursor": final_cursor,
            "final_key": controller.state().selected_key().map(|k| k.as_str()),
        })
        .to_string(),
    );

    tracing::info!(
        target: "tocline.harness",
        pattern = script.pattern_name,
        seed = script.seed,
        events = script.steps.len(),
        walks = walks.len(),
        final_cursor = ?final_cursor,
        "replay complete"
    );

    ReplayReport {
        events: script.steps.len(),
        walks,
        final_cursor,
        jsonl,
    }
}

fn tick_into(
    controller: &mut OutlineController<SyntheticDocument>,
    now: Instant,
    start: Instant,
    walks: &mut Vec<WalkRecord>,
    jsonl: &mut Vec<String>,
) {
    let mut steps = Vec::new();
    let Some(TickReport { burst, outcome }) =
        controller.tick_observed(now, |sel| steps.push(sel.cursor))
    else {
        return;
    };
    let at = now.saturating_duration_since(start);

    let mut line = json!({
        "event": "walk",
        "idx": walks.len(),
        "at_us": at.as_micros() as u64,
        "burst_events": burst.events,
        "outcome": outcome.as_str(),
        "steps": steps,
    });
    match &outcome {
        WalkOutcome::Advanced { from, to } | WalkOutcome::Retreated { from, to } => {
            line["from"] = json!(from);
            line["to"] = json!(to);
        }
        WalkOutcome::Skipped(err) => {
            line["reason"] = json!(err.kind());
        }
        WalkOutcome::Unchanged => {}
    }
    jsonl.push(line.to_string());

    walks.push(WalkRecord {
        at,
        burst_events: burst.events,
        outcome,
        steps,
        cursor: controller.state().cursor(),
    });
}

/// Build a mounted controller over `doc` with `config`.
#[must_use]
pub fn controller_for(
    doc: SyntheticDocument,
    config: &OutlineConfig,
) -> OutlineController<SyntheticDocument> {
    let headings = doc.heading_sequence();
    let mut controller = OutlineController::with_config(doc, headings, config);
    controller.mount_on_oracle();
    controller
}
