//! autopilot-report - relationship health report CLI
//!
//! Scores every contact in a message log and prints the result as a
//! terminal table, Markdown, or JSON.

use anyhow::{Context, Result};
use autopilot_core::analytics::{analyze_relationships, simulate_no_contact, PortfolioSummary};
use autopilot_core::demo::{demo_events, DEMO_SELF};
use autopilot_core::features::FeatureBundle;
use autopilot_core::timestamp::parse_timestamp;
use autopilot_core::{parse_events, Config, ContactAnalysis, RawEvent, RelationshipState};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autopilot-report")]
#[command(about = "Social Autopilot - relationship health report")]
#[command(version)]
struct Args {
    /// JSON file with an array of {timestamp, sender, receiver, message} events
    #[arg(long, conflicts_with_all = ["demo", "features"])]
    input: Option<PathBuf>,

    /// JSON feature bundle produced by the upstream extraction service
    #[arg(long, conflicts_with = "demo")]
    features: Option<PathBuf>,

    /// Use the built-in demo dataset
    #[arg(long)]
    demo: bool,

    /// Evaluate as of this instant (default: now). Feature bundles are
    /// already evaluated upstream, so this cannot be combined with --features
    #[arg(long, conflicts_with = "features")]
    as_of: Option<String>,

    /// Identity whose relationships are assessed (overrides config)
    #[arg(long)]
    self_id: Option<String>,

    /// Project 30 days of silence onto the results
    #[arg(long)]
    simulate: bool,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    let _log_guard = autopilot_core::logging::init(&config.logging).ok();

    if args.demo {
        config.engine.self_identity = DEMO_SELF.to_string();
    }
    if let Some(self_id) = &args.self_id {
        config.engine.self_identity = self_id.clone();
    }

    let as_of = match &args.as_of {
        Some(text) => parse_timestamp(text)
            .with_context(|| format!("invalid --as-of timestamp: {}", text))?,
        None => Utc::now(),
    };

    let analyses = if let Some(path) = &args.features {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        FeatureBundle::from_json(&json)
            .context("failed to parse feature bundle")?
            .into_analyses(&config.scoring)
            .context("failed to adapt feature bundle")?
    } else {
        let events = if args.demo {
            demo_events(as_of)
        } else if let Some(path) = &args.input {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let raw: Vec<RawEvent> =
                serde_json::from_str(&json).context("failed to parse event file")?;
            parse_events(&raw, &config.engine.self_identity)
                .context("event log rejected")?
        } else {
            anyhow::bail!("No input given. Use --input <FILE>, --features <FILE> or --demo");
        };
        analyze_relationships(&events, as_of, &config.policy())
            .context("failed to analyze relationships")?
    };

    let analyses = if args.simulate {
        simulate_no_contact(&analyses, &config.decay)
    } else {
        analyses
    };

    tracing::info!(
        contacts = analyses.len(),
        simulated = args.simulate,
        "Report generated"
    );

    match args.export.as_deref() {
        Some("json") => print_json(&analyses, as_of, args.simulate)?,
        Some("md") => print_markdown(&analyses, args.simulate),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&analyses, args.simulate),
    }

    Ok(())
}

fn title(simulated: bool) -> &'static str {
    if simulated {
        "RELATIONSHIP HEALTH (+30 DAYS OF SILENCE)"
    } else {
        "RELATIONSHIP HEALTH"
    }
}

fn print_terminal(analyses: &[ContactAnalysis], simulated: bool) {
    println!();
    println!("╭{}╮", "─".repeat(72));
    println!("│{:^72}│", title(simulated));
    println!("╰{}╯", "─".repeat(72));
    println!();

    if analyses.is_empty() {
        println!("  No contacts found.");
        println!();
        return;
    }

    let summary = PortfolioSummary::from_analyses(analyses);
    println!(
        "   Contacts: {:<8} Avg Health: {:<6} Pending: {}",
        summary.contact_count, summary.average_health, summary.pending_issues
    );
    let counts: Vec<String> = summary
        .state_counts
        .iter()
        .map(|(state, n)| format!("{}: {}", state, n))
        .collect();
    println!("   {}", counts.join("  │  "));
    println!();

    println!(
        "   {:<20} {:>6}  {:<9} {:>5} {:>6} {:>6}  {:<6} {}",
        "CONTACT", "HEALTH", "STATE", "DAYS", "30D", "TREND", "DIR", "ACTION"
    );
    for a in analyses {
        println!(
            "   {:<20} {:>6}  {:<9} {:>5} {:>6} {:>5}%  {:<6} {}",
            truncate(&a.name, 20),
            a.health_score,
            a.state.as_str(),
            a.days_since_last_interaction,
            a.interaction_count_last30,
            a.frequency_trend_percent,
            a.trend_direction.as_str(),
            a.suggested_action
        );
    }
    println!();
}

fn print_markdown(analyses: &[ContactAnalysis], simulated: bool) {
    println!("# {}", title(simulated));
    println!();

    if analyses.is_empty() {
        println!("*No contacts found.*");
        return;
    }

    let summary = PortfolioSummary::from_analyses(analyses);
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Contacts | {} |", summary.contact_count);
    println!("| Average health | {} |", summary.average_health);
    for state in RelationshipState::ALL {
        println!("| {} | {} |", state, summary.count(state));
    }
    println!();

    println!("## Contacts");
    println!();
    println!("| Contact | Health | State | Days | Last 30d | Trend | Initiation | Reply delay | Action |");
    println!("|---------|--------|-------|------|----------|-------|------------|-------------|--------|");
    for a in analyses {
        println!(
            "| {} | {} | {} | {} | {} | {}% ({}) | {}% | {}h | {} |",
            a.name,
            a.health_score,
            a.state,
            a.days_since_last_interaction,
            a.interaction_count_last30,
            a.frequency_trend_percent,
            a.trend_direction,
            a.initiation_ratio,
            a.avg_response_delay,
            a.suggested_action
        );
    }
    println!();
    println!("---");
    println!("*Generated by autopilot-report*");
}

fn print_json(analyses: &[ContactAnalysis], as_of: DateTime<Utc>, simulated: bool) -> Result<()> {
    let json = serde_json::json!({
        "asOf": as_of.to_rfc3339(),
        "simulated": simulated,
        "summary": PortfolioSummary::from_analyses(analyses),
        "contacts": analyses,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let kept: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
