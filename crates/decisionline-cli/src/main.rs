mod config;
mod output;

use anyhow::{Context, Result};
use config::{parse_args, Command, LayoutArgs};
use decisionline_core::{DecisionFactor, TimelineEvent};
use decisionline_layout::{
    filter_events, layout_timeline, normalize_factors, resolve_links, settings, DefaultPalette,
};
use output::{count_by_type, render_nodes, LayoutOutput};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

fn init_tracing() {
    // stdout carries the JSON result
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    match parse_args()? {
        Command::Layout(args) => run_layout(args),
        Command::Factors { factors } => run_factors(&factors),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
    } else {
        raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    serde_json::from_str(&raw).with_context(|| format!("failed to decode {}", path.display()))
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to encode output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let mut settings = match &args.settings {
        Some(path) => settings::load_from_path(path)?,
        None => settings::load_or_default(),
    };
    if let Some(width) = args.width {
        settings.layout.width = width;
    }

    let events: Vec<TimelineEvent> = read_json(&args.events)?;
    let events = if args.criteria.is_empty() {
        events
    } else {
        filter_events(&events, &args.criteria)
    };

    if events.is_empty() {
        tracing::warn!("no events left to lay out");
        return write_json(&LayoutOutput::empty());
    }

    let nodes = layout_timeline(&events, &settings.layout).context("timeline layout failed")?;
    let links = resolve_links(&nodes);
    let palette = settings.palette.clone().over(DefaultPalette);

    tracing::info!(
        nodes = nodes.len(),
        links = links.len(),
        by_type = ?count_by_type(&nodes),
        "timeline ready"
    );

    write_json(&LayoutOutput {
        nodes: render_nodes(&nodes, &settings, &palette),
        links,
    })
}

fn run_factors(path: &Path) -> Result<()> {
    let factors: Vec<DecisionFactor> = read_json(path)?;
    let shares = normalize_factors(&factors);
    tracing::info!(factors = shares.len(), "factors normalized");
    write_json(&shares)
}
