#![forbid(unsafe_code)]

//! Outline controller: wires the coalescer, tracker, and navigation to a host.
//!
//! # Lifecycle
//!
//! 1. [`OutlineController::new`] builds the tracker from the first heading
//!    snapshot (cursor 0).
//! 2. [`mount`](OutlineController::mount) subscribes once to the host's
//!    [`ScrollSource`].
//! 3. The host forwards every scroll event to
//!    [`on_scroll`](OutlineController::on_scroll) and calls
//!    [`tick`](OutlineController::tick) from its loop; a walk runs when a
//!    coalesced burst falls due.
//! 4. [`teardown`](OutlineController::teardown) unsubscribes and cancels any
//!    pending walk. Events and ticks after teardown are ignored.
//!
//! Everything runs on the caller's thread. A walk completes inside a single
//! `tick`, so no caller observes a half-advanced cursor, and walks are
//! strictly serial.

use tocline_core::{GeometryOracle, HeadingKey, HeadingSequence, ListenerId, ScrollSource};
use web_time::Instant;

use crate::coalescer::{CoalescedBurst, ScrollCoalescer};
use crate::config::OutlineConfig;
use crate::navigation::{NavigationOutcome, select_heading};
use crate::state::{OutlineState, Reconciliation, Selection};
use crate::tracker::ScrollTracker;
use crate::walk::WalkOutcome;

/// A walk that ran because a burst fell due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// The burst that triggered the walk.
    pub burst: CoalescedBurst,
    /// What the walk did.
    pub outcome: WalkOutcome,
}

/// Owns one outline's tracker, coalescer, and geometry oracle.
#[derive(Debug)]
pub struct OutlineController<O> {
    oracle: O,
    tracker: ScrollTracker,
    coalescer: ScrollCoalescer,
    listener: Option<ListenerId>,
}

impl<O: GeometryOracle> OutlineController<O> {
    /// Create a controller with default configuration.
    #[must_use]
    pub fn new(oracle: O, headings: HeadingSequence) -> Self {
        Self::with_config(oracle, headings, &OutlineConfig::default())
    }

    /// Create a controller from an [`OutlineConfig`].
    #[must_use]
    pub fn with_config(oracle: O, headings: HeadingSequence, config: &OutlineConfig) -> Self {
        Self {
            oracle,
            tracker: ScrollTracker::with_bands(headings, config.viewport_bands()),
            coalescer: ScrollCoalescer::new(config.quiet_period()),
            listener: None,
        }
    }

    /// Subscribe to the host's scroll events.
    ///
    /// Mounting an already mounted controller returns the existing listener.
    pub fn mount<S>(&mut self, source: &mut S) -> ListenerId
    where
        S: ScrollSource + ?Sized,
    {
        match self.listener {
            Some(id) => id,
            None => self.mounted(source.subscribe()),
        }
    }

    /// Unsubscribe and drop any pending walk.
    pub fn teardown<S>(&mut self, source: &mut S)
    where
        S: ScrollSource + ?Sized,
    {
        if let Some(id) = self.listener.take() {
            source.unsubscribe(id);
            self.torn_down(id);
        }
    }

    fn mounted(&mut self, id: ListenerId) -> ListenerId {
        self.listener = Some(id);
        tracing::debug!(
            target: "tocline.controller",
            listener = id.0,
            headings = self.tracker.headings().len(),
            "outline mounted"
        );
        id
    }

    fn torn_down(&mut self, id: ListenerId) {
        let cancelled = self.coalescer.cancel();
        tracing::debug!(
            target: "tocline.controller",
            listener = id.0,
            cancelled_pending = cancelled,
            "outline torn down"
        );
    }

    /// Whether the controller is subscribed to scroll events.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Record a scroll event. Returns `false` when not mounted.
    pub fn on_scroll(&mut self, now: Instant) -> bool {
        if self.listener.is_none() {
            return false;
        }
        self.coalescer.schedule(now);
        true
    }

    /// Run the coalesced walk if its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<TickReport> {
        self.tick_observed(now, |_| {})
    }

    /// [`tick`](Self::tick), reporting each intermediate cursor step.
    pub fn tick_observed<F>(&mut self, now: Instant, on_step: F) -> Option<TickReport>
    where
        F: FnMut(&Selection),
    {
        if self.listener.is_none() {
            return None;
        }
        let burst = self.coalescer.poll(now)?;
        let outcome = self.tracker.walk_observed(&self.oracle, on_step);
        Some(TickReport { burst, outcome })
    }

    /// When the next walk is due, if one is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.coalescer.deadline()
    }

    /// Handle a click or keyboard activation on an outline row.
    pub fn select_heading(&mut self, key: &HeadingKey, index: usize) -> NavigationOutcome {
        select_heading(&mut self.tracker, &mut self.oracle, key, index)
    }

    /// Replace the heading snapshot.
    pub fn set_headings(&mut self, headings: HeadingSequence) -> Reconciliation {
        self.tracker.replace_headings(headings)
    }

    /// Current cursor state.
    #[must_use]
    pub fn state(&self) -> &OutlineState {
        self.tracker.state()
    }

    /// Current heading snapshot.
    #[must_use]
    pub fn headings(&self) -> &HeadingSequence {
        self.tracker.headings()
    }

    /// The tracker.
    #[must_use]
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// The coalescer.
    #[must_use]
    pub fn coalescer(&self) -> &ScrollCoalescer {
        &self.coalescer
    }

    /// The geometry oracle.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Mutable access to the geometry oracle (e.g. to scroll a synthetic
    /// document).
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }
}

impl<O: GeometryOracle + ScrollSource> OutlineController<O> {
    /// [`mount`](Self::mount) for hosts whose oracle is also the scroll
    /// source.
    pub fn mount_on_oracle(&mut self) -> ListenerId {
        match self.listener {
            Some(id) => id,
            None => {
                let id = self.oracle.subscribe();
                self.mounted(id)
            }
        }
    }

    /// [`teardown`](Self::teardown) for hosts whose oracle is also the
    /// scroll source.
    pub fn teardown_on_oracle(&mut self) {
        if let Some(id) = self.listener.take() {
            self.oracle.unsubscribe(id);
            self.torn_down(id);
        }
    }
}
