use crate::commands::scan::{load_document, OutputFormat};
use crate::config::Config;
use crate::recorder::{attach_recorders, drain, SurfaceCommand};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use svgsync_editor::{ElementRecord, SyncEvent, SyncOutcome, SyncSession, SyncState};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// SVG document loaded before the script runs
    pub input: PathBuf,

    /// JSON array of sync events
    pub script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStep {
    pub event: SyncEvent,
    pub outcome: SyncOutcome,
    pub commands: Vec<SurfaceCommand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub final_state: SyncState,
}

pub fn replay(args: ReplayArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let records = load_document(&args.input, &config)?;

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let events = SyncEvent::parse_script(&script)
        .with_context(|| format!("Invalid script {}", args.script.display()))?;

    let report = run_script(&config, records, events);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report)?,
    }

    Ok(())
}

/// Load `records` into a fresh session with recording surfaces and
/// dispatch every event in order
pub fn run_script(
    config: &Config,
    records: Vec<ElementRecord>,
    events: Vec<SyncEvent>,
) -> ReplayReport {
    let session = SyncSession::with_options(config.sync.clone());
    let log = attach_recorders(&session);
    session.replace_document(records);
    drain(&log);

    let steps = events
        .into_iter()
        .map(|event| {
            let outcome = session.dispatch(event.clone());
            tracing::debug!(%outcome, "Replayed event");
            ReplayStep {
                event,
                outcome,
                commands: drain(&log),
            }
        })
        .collect();

    ReplayReport {
        steps,
        final_state: session.state(),
    }
}

fn print_report(report: &ReplayReport) -> Result<()> {
    for (i, step) in report.steps.iter().enumerate() {
        let outcome = match &step.outcome {
            SyncOutcome::Applied { .. } => step.outcome.to_string().green(),
            SyncOutcome::Skipped { .. } => step.outcome.to_string().yellow(),
            _ => step.outcome.to_string().blue(),
        };

        println!("{} {}", format!("#{}", i + 1).bold(), describe(&step.event));
        println!("   {}", outcome);
        for command in &step.commands {
            println!("   {} {}", "→".dimmed(), command);
        }
    }

    println!();
    println!("{}", "Final state".bold());
    println!("{}", serde_json::to_string_pretty(&report.final_state)?);
    Ok(())
}

fn describe(event: &SyncEvent) -> String {
    match event {
        SyncEvent::CodeSelectionChange { range } => format!("code selection {}", range),
        SyncEvent::VisualSelectionChange { element_ids } => {
            format!("visual selection [{}]", element_ids.join(", "))
        }
        SyncEvent::DocumentChange { elements } => {
            format!("document change ({} elements)", elements.len())
        }
        SyncEvent::DocumentRefresh { elements } => {
            format!("document refresh ({} elements)", elements.len())
        }
        SyncEvent::DocumentClose => "document close".to_string(),
    }
}
