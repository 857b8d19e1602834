#![forbid(unsafe_code)]

//! Trailing-edge coalescing for scroll events.
//!
//! Scroll sources fire far more often than the outline needs to update.
//! [`ScrollCoalescer`] folds a burst of events into one trailing callback
//! that fires once the stream has been quiet for the configured period.
//!
//! # Design
//!
//! The coalescer owns no timer. Every event calls [`schedule`] with the
//! current instant, which cancels the pending deadline and arms a new one at
//! `now + quiet_period`. The host polls [`poll`] from its event loop (or
//! sleeps until [`deadline`]) and runs the callback when a burst is returned.
//! Injecting `now` keeps the component deterministic under test.
//!
//! Guarantees:
//! - at most one burst per quiet period, regardless of event volume;
//! - a burst is eventually returned once events stop for `quiet_period`;
//! - [`cancel`] drops the pending burst (used on teardown).
//!
//! # Usage
//!
//! ```
//! use tocline_runtime::coalescer::ScrollCoalescer;
//! use web_time::{Duration, Instant};
//!
//! let mut coalescer = ScrollCoalescer::new(Duration::from_millis(10));
//! let t0 = Instant::now();
//!
//! for i in 0..50u64 {
//!     coalescer.schedule(t0 + Duration::from_micros(i * 100));
//! }
//! assert!(coalescer.poll(t0 + Duration::from_millis(5)).is_none());
//!
//! let burst = coalescer.poll(t0 + Duration::from_millis(20)).unwrap();
//! assert_eq!(burst.events, 50);
//! assert!(coalescer.poll(t0 + Duration::from_millis(40)).is_none());
//! ```
//!
//! [`schedule`]: ScrollCoalescer::schedule
//! [`poll`]: ScrollCoalescer::poll
//! [`deadline`]: ScrollCoalescer::deadline
//! [`cancel`]: ScrollCoalescer::cancel

use web_time::{Duration, Instant};

/// Quiet period used by the outline: 10 ms.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(10);

/// A burst of events that has gone quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescedBurst {
    /// Number of events folded into this burst.
    pub events: u32,
    /// When the first event of the burst arrived.
    pub first_at: Instant,
    /// When the last event of the burst arrived.
    pub last_at: Instant,
}

impl CoalescedBurst {
    /// Time between the first and last event.
    #[must_use]
    pub fn span(&self) -> Duration {
        self.last_at.saturating_duration_since(self.first_at)
    }
}

/// Counters for one coalescer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Events passed to `schedule`.
    pub scheduled: u64,
    /// Bursts returned by `poll`.
    pub fired: u64,
    /// Pending bursts dropped by `cancel`.
    pub cancelled: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingBurst {
    deadline: Instant,
    events: u32,
    first_at: Instant,
    last_at: Instant,
}

/// Debounces a high-frequency event stream into trailing bursts.
///
/// Not thread-safe; drive it from the event loop that owns the outline.
#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    quiet_period: Duration,
    pending: Option<PendingBurst>,
    stats: CoalescerStats,
}

impl Default for ScrollCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl ScrollCoalescer {
    /// Create a coalescer with the given quiet period.
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            stats: CoalescerStats::default(),
        }
    }

    /// Configured quiet period.
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Change the quiet period. A pending deadline is re-armed from the
    /// burst's last event.
    pub fn set_quiet_period(&mut self, quiet_period: Duration) {
        self.quiet_period = quiet_period;
        if let Some(pending) = &mut self.pending {
            pending.deadline = pending.last_at + quiet_period;
        }
    }

    /// Record an event at `now`, pushing the deadline out to
    /// `now + quiet_period`.
    pub fn schedule(&mut self, now: Instant) {
        self.stats.scheduled += 1;
        let deadline = now + self.quiet_period;
        self.pending = Some(match self.pending {
            Some(pending) => PendingBurst {
                deadline,
                events: pending.events.saturating_add(1),
                last_at: now,
                ..pending
            },
            None => PendingBurst {
                deadline,
                events: 1,
                first_at: now,
                last_at: now,
            },
        });
        tracing::trace!(
            target: "tocline.coalescer",
            pending_events = self.pending_events(),
            "scroll scheduled"
        );
    }

    /// Return the pending burst if its deadline has passed.
    ///
    /// A burst is returned at most once.
    pub fn poll(&mut self, now: Instant) -> Option<CoalescedBurst> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        self.stats.fired += 1;
        let burst = CoalescedBurst {
            events: pending.events,
            first_at: pending.first_at,
            last_at: pending.last_at,
        };
        tracing::trace!(
            target: "tocline.coalescer",
            events = burst.events,
            span_us = burst.span().as_micros() as u64,
            "burst fired"
        );
        Some(burst)
    }

    /// [`poll`](Self::poll), running `callback` on the burst if one is due.
    pub fn poll_with<F, R>(&mut self, now: Instant, callback: F) -> Option<R>
    where
        F: FnOnce(CoalescedBurst) -> R,
    {
        self.poll(now).map(callback)
    }

    /// Drop any pending burst. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        let had_pending = self.pending.take().is_some();
        if had_pending {
            self.stats.cancelled += 1;
            tracing::trace!(target: "tocline.coalescer", "pending burst cancelled");
        }
        had_pending
    }

    /// Whether a burst is waiting for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending burst becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Time left until the pending burst is due (zero if overdue).
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Events folded into the pending burst so far.
    #[must_use]
    pub fn pending_events(&self) -> u32 {
        self.pending.map(|p| p.events).unwrap_or(0)
    }

    /// Counters since creation.
    #[must_use]
    pub fn stats(&self) -> CoalescerStats {
        self.stats
    }
}
