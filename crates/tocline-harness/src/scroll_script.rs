#![forbid(unsafe_code)]

//! Deterministic scroll scripts.
//!
//! Generates timestamped scroll positions for driving a controller against a
//! [`SyntheticDocument`](crate::document::SyntheticDocument). Events arrive in
//! bursts a few hundred microseconds apart, separated by pauses longer than
//! the coalescer's quiet period, the way a wheel or trackpad reports.
//!
//! # Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | [`ScrollPattern::MonotonicDown`] | Top to bottom, never moving up |
//! | [`ScrollPattern::MonotonicUp`] | Bottom to top, never moving down |
//! | [`ScrollPattern::Jumps`] | Random absolute positions (anchor links, scrollbar drags) |

use clap::ValueEnum;
use web_time::Duration;

// ============================================================================
// Configuration
// ============================================================================

/// Shape of a generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPattern {
    /// Scroll from the top of the document to the bottom.
    MonotonicDown {
        /// Number of scroll events.
        events: usize,
    },
    /// Scroll from the bottom of the document to the top.
    MonotonicUp {
        /// Number of scroll events.
        events: usize,
    },
    /// Jump to random positions.
    Jumps {
        /// Number of jumps.
        count: usize,
    },
}

impl ScrollPattern {
    /// Stable name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MonotonicDown { .. } => "monotonic_down",
            Self::MonotonicUp { .. } => "monotonic_up",
            Self::Jumps { .. } => "jumps",
        }
    }

    /// Which kind of pattern this is.
    #[must_use]
    pub fn kind(&self) -> ScrollPatternKind {
        match self {
            Self::MonotonicDown { .. } => ScrollPatternKind::Down,
            Self::MonotonicUp { .. } => ScrollPatternKind::Up,
            Self::Jumps { .. } => ScrollPatternKind::Jumps,
        }
    }
}

/// Pattern selector without an event count, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScrollPatternKind {
    #[value(alias = "monotonic_down")]
    Down,
    #[value(alias = "monotonic_up")]
    Up,
    #[value(alias = "jump")]
    Jumps,
}

impl ScrollPatternKind {
    /// Pattern of this kind with `events` scroll events.
    #[must_use]
    pub const fn with_events(self, events: usize) -> ScrollPattern {
        match self {
            Self::Down => ScrollPattern::MonotonicDown { events },
            Self::Up => ScrollPattern::MonotonicUp { events },
            Self::Jumps => ScrollPattern::Jumps { count: events },
        }
    }
}

/// Inputs to [`generate_script`].
#[derive(Debug, Clone)]
pub struct ScrollScriptConfig {
    pub pattern: ScrollPattern,
    pub seed: u64,
    /// Scroll range of the target document.
    pub max_scroll: f64,
    /// Average events per burst before a pause.
    pub burst_len: usize,
    /// Pause between bursts.
    pub pause: Duration,
}

impl ScrollScriptConfig {
    /// Config with 8-event bursts and 40 ms pauses.
    #[must_use]
    pub fn new(pattern: ScrollPattern, seed: u64, max_scroll: f64) -> Self {
        Self {
            pattern,
            seed,
            max_scroll,
            burst_len: 8,
            pause: Duration::from_millis(40),
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// xorshift64; reproducible across platforms.
#[derive(Debug, Clone)]
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: u64) -> u64 {
        if max == 0 { 0 } else { self.next() % max }
    }

    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// One scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStep {
    /// Time since the script started.
    pub at: Duration,
    /// Requested scroll offset.
    pub scroll_top: f64,
}

/// A generated script.
#[derive(Debug, Clone)]
pub struct ScrollScript {
    pub steps: Vec<ScrollStep>,
    pub pattern_name: &'static str,
    pub seed: u64,
}

impl ScrollScript {
    /// Time of the last event.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |s| s.at)
    }
}

/// Generate a script from `config`.
#[must_use]
pub fn generate_script(config: &ScrollScriptConfig) -> ScrollScript {
    let mut rng = Rng::new(config.seed);
    let max = config.max_scroll.max(0.0);
    let positions = match config.pattern {
        ScrollPattern::MonotonicDown { events } => monotonic(events, max, &mut rng),
        ScrollPattern::MonotonicUp { events } => monotonic(events, max, &mut rng)
            .into_iter()
            .map(|p| max - p)
            .collect(),
        ScrollPattern::Jumps { count } => (0..count).map(|_| (rng.unit() * max).round()).collect(),
    };

    let burst_len = config.burst_len.max(1) as u64;
    let mut at = Duration::ZERO;
    let mut left_in_burst = 1 + rng.below(burst_len * 2);
    let steps = positions
        .into_iter()
        .enumerate()
        .map(|(i, scroll_top)| {
            if i > 0 {
                if left_in_burst == 0 {
                    at += config.pause;
                    left_in_burst = 1 + rng.below(burst_len * 2);
                } else {
                    at += Duration::from_micros(200 + rng.below(1_800));
                }
            }
            left_in_burst = left_in_burst.saturating_sub(1);
            ScrollStep { at, scroll_top }
        })
        .collect();

    ScrollScript {
        steps,
        pattern_name: config.pattern.name(),
        seed: config.seed,
    }
}

/// Non-decreasing positions from 0 to `max`, ending exactly at `max`.
fn monotonic(events: usize, max: f64, rng: &mut Rng) -> Vec<f64> {
    if events == 0 {
        return Vec::new();
    }
    let weights: Vec<f64> = (0..events).map(|_| 0.1 + rng.unit()).collect();
    let total: f64 = weights.iter().sum();
    let mut at = 0.0;
    let mut out: Vec<f64> = weights
        .iter()
        .map(|w| {
            at += w / total * max;
            at.round().min(max)
        })
        .collect();
    if let Some(last) = out.last_mut() {
        *last = max;
    }
    out
}
