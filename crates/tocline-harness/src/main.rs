#![forbid(unsafe_code)]

//! Scroll replay tool.
//!
//! Generates a seeded scroll script over a synthetic document, runs it
//! through an outline controller, and prints the JSONL walk trace.
//!
//! # Running
//!
//! ```sh
//! cargo run -p tocline-harness -- --pattern down --events 200 --seed 42
//! TOCLINE_LOG=tocline=debug cargo run -p tocline-harness -- --pattern jumps
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tocline_core::logging::LOG_ENV;
use tocline_harness::{
    ScrollPatternKind, ScrollScriptConfig, SyntheticDocument, controller_for, generate_script, replay,
};
use tocline_runtime::OutlineConfig;
use tocline_widgets::OutlineView;
use tracing_subscriber::EnvFilter;
use web_time::Instant;

#[derive(Debug, Parser)]
#[command(
    name = "tocline-replay",
    about = "Replay a seeded scroll script against a synthetic outline",
    version
)]
struct Args {
    /// Scroll pattern.
    #[arg(long, value_enum, default_value_t = ScrollPatternKind::Down)]
    pattern: ScrollPatternKind,

    /// Number of scroll events.
    #[arg(long, default_value_t = 200)]
    events: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of headings in the synthetic document.
    #[arg(long, default_value_t = 40)]
    headings: usize,

    /// Distance between consecutive headings.
    #[arg(long, default_value_t = 180.0)]
    spacing: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 720.0)]
    viewport: f64,

    /// TOML config file (quiet period and band thresholds).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final outline after the trace.
    #[arg(long)]
    outline: bool,

    /// Width for the printed outline.
    #[arg(long, default_value_t = 32)]
    width: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Traces go to stderr so stdout stays pure JSONL.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let pattern = args.pattern.with_events(args.events);

    let config = match &args.config {
        Some(path) => match OutlineConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                return ExitCode::from(2);
            }
        },
        None => OutlineConfig::default(),
    };

    let doc = SyntheticDocument::evenly_spaced(args.headings, args.spacing, args.viewport);
    let script = generate_script(&ScrollScriptConfig::new(pattern, args.seed, doc.max_scroll()));
    let mut controller = controller_for(doc, &config);
    let report = replay(&mut controller, &script, Instant::now());

    for line in &report.jsonl {
        println!("{line}");
    }

    if args.outline {
        for line in OutlineView::new().render_lines(controller.tracker(), args.width) {
            eprintln!("{line}");
        }
    }
    ExitCode::SUCCESS
}
