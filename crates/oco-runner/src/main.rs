//! # oco-runner
//!
//! Command-line front end for composing and submitting an OCO job.
//!
//! Loads a draft (JSON, the same camelCase fields as the edit form), applies
//! any `--set` overrides, builds the job for the selected instrument, prints
//! it, and hands it to an in-process execution queue.
//!
//! # Usage
//!
//! ```bash
//! oco-runner draft.json --instrument binance/BTC/USDT --set highTrailing=true --tick 101.5
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use oco_core::builder::JobBuilder;
use oco_core::config::{AppConfig, load_config};
use oco_core::draft::{DraftField, DraftState, EditingSession};
use oco_core::{Job, TickTrigger};
use oco_submit::event::SubmitEvent;
use oco_submit::queue::QueueSubmitter;
use oco_submit::validating::ValidatingSubmitter;
use oco_submit::{JobSubmitter, dispatch};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

/// Stop-loss / take-profit OCO job runner.
#[derive(Parser)]
#[command(name = "oco-runner", about = "Build and submit a stop-loss / take-profit OCO job")]
struct Cli {
    /// Draft file path (JSON).
    draft: PathBuf,

    /// Configuration file path (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Selected instrument as exchange/base/counter. Overrides the config.
    #[arg(short, long)]
    instrument: Option<String>,

    /// Override a draft field, e.g. `lowPrice=100`. Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    sets: Vec<String>,

    /// Report which side a tick at this price would fire.
    #[arg(long)]
    tick: Option<Decimal>,

    /// Print the job without submitting it.
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Configuration and logging
    let config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    oco_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &config.module_name());

    info!("oco-runner starting, draft={}, log_level={}", cli.draft.display(), cli.log_level);

    // 2. Selected instrument
    let instrument: TickTrigger = match (&cli.instrument, &config.instrument) {
        (Some(s), _) => s.parse()?,
        (None, Some(t)) => t.clone(),
        (None, None) => return Err(anyhow!("no instrument: pass --instrument or set it in the config")),
    };

    // 3. Draft
    let content =
        std::fs::read_to_string(&cli.draft).with_context(|| format!("reading draft {}", cli.draft.display()))?;
    let draft: DraftState = serde_json::from_str(&content)?;
    let mut session = EditingSession::from_draft(draft);
    for set in &cli.sets {
        let (name, value) = set
            .split_once('=')
            .ok_or_else(|| anyhow!("--set expects FIELD=VALUE, got {set:?}"))?;
        let field: DraftField = name.parse()?;
        session.set(field, value)?;
    }

    // 4. Build
    let job = session.build(&JobBuilder::uuid(), &instrument);
    drop(session);
    info!("built OCO job {} on {}", job.id, instrument);

    if let Some(price) = cli.tick {
        match job.triggered(price)? {
            Some(side) => info!("tick at {price} fires the {side} side"),
            None => info!("tick at {price} fires neither side"),
        }
    }

    let job = Job::from(job);
    println!("{}", serde_json::to_string_pretty(&job)?);

    if cli.dry_run {
        return Ok(());
    }

    // 5. Submit
    let (queue, mut jobs, mut events) = QueueSubmitter::new();
    let events_tx = queue.events();
    let submitter = ValidatingSubmitter::new(queue, config.validation).with_events(events_tx);
    info!("submitting via '{}' with policy {:?}", submitter.name(), submitter.policy());

    let worker = tokio::spawn(async move {
        while let Some(job) = jobs.recv().await {
            info!("execution side received {} job {}", job.job_type(), job.id());
        }
    });

    let submitter: Arc<dyn JobSubmitter> = Arc::new(submitter);
    dispatch(submitter, job).await?;

    // The dispatched task held the last submitter; once it finishes the
    // queue closes and the worker drains out.
    worker.await?;

    let mut rejected = false;
    while let Ok(event) = events.try_recv() {
        match event {
            SubmitEvent::Accepted { job_id, job_type } => info!("accepted {job_type} job {job_id}"),
            SubmitEvent::Rejected { job_id, reason } => {
                warn!("rejected job {job_id}: {reason}");
                rejected = true;
            }
        }
    }

    if rejected {
        error!("job was not submitted");
        return Err(anyhow!("job rejected"));
    }
    info!("done");
    Ok(())
}
