use anyhow::Context;
use clap::Parser;
use generator::profile::GeneratorConfig;
use lifecore::{EventKind, Tracker};
use log::info;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio::time::{self, Instant, MissedTickBehavior};
use workflow::runner::{FrameLog, Runner, WorkflowPlan, WorkflowResult};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless life event recorder")]
struct Args {
    /// Load tracker settings from YAML (defaults to ./lifelog.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the autosave file read at startup and written at exit
    #[arg(long)]
    autosave: Option<PathBuf>,
    /// Override the redraw period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Replace the series with the contents of a saved chart
    #[arg(long)]
    import: Option<PathBuf>,
    /// Clear the series before recording
    #[arg(long, default_value_t = false)]
    clear: bool,
    /// Record an event: small-good, big-good, small-bad or horrible (repeatable)
    #[arg(long = "event")]
    events: Vec<EventKind>,
    /// Record this many randomly chosen events
    #[arg(long, default_value_t = 0)]
    generate: usize,
    /// Seed for --generate
    #[arg(long)]
    seed: Option<u64>,
    /// Limit --generate to these categories (repeatable; default all four)
    #[arg(long = "kind")]
    kinds: Vec<EventKind>,
    /// Run this many redraw ticks after recording
    #[arg(long, default_value_t = 0)]
    ticks: usize,
    /// Save the resulting chart to this file
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print the resulting series as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Keep ticking at the configured period until Ctrl+C
    #[arg(long, default_value_t = false)]
    watch: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = workflow::config::resolve(args.config.as_deref(), args.autosave, args.tick_ms)?;
    let mut tracker = Tracker::startup(&config)
        .with_context(|| format!("restoring autosave {}", config.autosave_path.display()))?;

    let plan = WorkflowPlan {
        import: args.import,
        clear: args.clear,
        events: args.events,
        generator: GeneratorConfig {
            count: args.generate,
            seed: args.seed,
            kinds: args.kinds,
        },
        ticks: args.ticks,
        export: args.export,
    };
    let outcome = Runner::new(plan).execute(&mut tracker);

    if outcome.is_ok() && args.watch {
        watch(&mut tracker)?;
    }

    tracker
        .shutdown()
        .with_context(|| format!("writing autosave {}", tracker.autosave_path().display()))?;

    let result = outcome?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn watch(tracker: &mut Tracker) -> anyhow::Result<()> {
    let period = tracker.scheduler().period();
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the redraw timer")?;

    info!("ticking every {:?} (Ctrl+C to stop)", period);
    runtime.block_on(async {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = FrameLog::default();
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    tracker.tick(&mut frames);
                }
                result = signal::ctrl_c() => {
                    result.context("awaiting Ctrl+C to exit")?;
                    break;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}

fn print_summary(result: &WorkflowResult) {
    let metrics = &result.metrics;
    println!(
        "points={} running_value={:.3} recorded={} frames={}",
        result.points.len(),
        result.current_value,
        result.recorded,
        result.rendered
    );
    println!(
        "small_good={} big_good={} small_bad={} horrible={} fillers={} skipped_lines={}",
        metrics.small_good,
        metrics.big_good,
        metrics.small_bad,
        metrics.horrible,
        metrics.fillers,
        metrics.skipped_lines
    );
}
