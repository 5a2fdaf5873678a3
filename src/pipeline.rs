use crate::aggregate::aggregate;
use crate::config::VizConfig;
use crate::locate::{find_latest, load_snapshot, DataFile, DataKind};
use crate::model::RunAggregate;
use crate::render::{renderer_for, Artifact, Renderer, RendererKind};
use crate::util::{signed_thousands, thousands};
use anyhow::Context;
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn load_aggregate(config: &VizConfig) -> anyhow::Result<(DataFile, RunAggregate)> {
    let dir = config.data_dir().context("Failed to resolve data directory")?;
    let file = find_latest(&dir)?;
    let snapshot = load_snapshot(&file.path)?;
    let aggregate = aggregate(&snapshot, &config.default_repository, Utc::now())?;
    Ok((file, aggregate))
}

/// Locate, load, aggregate and rank the newest snapshot.
pub fn prepare(config: &VizConfig) -> anyhow::Result<RunAggregate> {
    let (file, aggregate) = load_aggregate(config)?;
    let kind = match file.kind {
        DataKind::Full => "full",
        DataKind::Summary => "summary",
    };
    println!("📊 Loaded data from: {} ({} dataset)", style(file.file_name()).cyan(), kind);

    if aggregate.contributors.is_empty() {
        println!("{} No contributors found in data", style("⚠️").yellow());
    } else {
        println!("📊 Found {} contributors", style(aggregate.total_contributors).cyan());
    }
    Ok(aggregate)
}

pub fn render_all(renderer: &dyn Renderer, aggregate: &RunAggregate, config: &VizConfig) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output directory {}", config.output_dir.display()))?;

    let mut written = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        let path = artifact.path_in(&config.output_dir);
        let pb = spinner(format!("Rendering {} with the {} backend", artifact.file_name(), renderer.name()));
        let started = Instant::now();

        let result = renderer.render_artifact(artifact, aggregate, &path);
        pb.finish_and_clear();
        result.with_context(|| format!("Failed to generate {}", artifact.file_name()))?;

        let elapsed = whole_millis(started.elapsed());
        println!(
            "✅ {} saved to: {} ({})",
            artifact.file_name(),
            style(path.display()).green(),
            humantime::format_duration(elapsed)
        );
        written.push(path);
    }
    Ok(written)
}

/// Truncate to whole milliseconds for display, saturating past `u64::MAX` ms.
fn whole_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn exec_render(config: &VizConfig, kind: RendererKind) -> anyhow::Result<()> {
    let label = match kind {
        RendererKind::Browser => "HTML-to-image stats generator",
        RendererKind::Chart => "contributor chart generator",
    };
    println!("🎨 Starting {}...", label);

    let aggregate = prepare(config)?;
    let renderer = renderer_for(kind, config)?;
    render_all(renderer.as_ref(), &aggregate, config)?;

    println!("🎉 {} images generated in {}", Artifact::ALL.len(), style(config.output_dir.display()).bold());
    Ok(())
}

pub fn exec_summary(config: &VizConfig, json: bool) -> anyhow::Result<()> {
    if json {
        // no progress lines, stdout stays machine-readable
        let (_, aggregate) = load_aggregate(config)?;
        println!("{}", serde_json::to_string_pretty(&aggregate)?);
    } else {
        let aggregate = prepare(config)?;
        output_table(&aggregate);
    }
    Ok(())
}

fn output_table(aggregate: &RunAggregate) {
    println!();
    println!("{} {}", style("Repository:").bold(), aggregate.repository);
    println!(
        "Contributors: {}  Commits: {}  Added: {}  Removed: {}  Net: {}",
        style(thousands(aggregate.total_contributors as u64)).cyan(),
        style(thousands(aggregate.total_commits)).cyan(),
        style(thousands(aggregate.total_additions)).green(),
        style(thousands(aggregate.total_deletions)).red(),
        style(signed_thousands(aggregate.net_lines)).yellow(),
    );
    println!();
    println!(
        "{:>4} {:<30} {:>10} {:>12} {:>12} {:>12}",
        style("#").bold(),
        style("Contributor").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Removed").bold(),
        style("Net").bold()
    );
    println!("{}", "─".repeat(85));
    for (i, c) in aggregate.ranking().iter().take(50).enumerate() {
        println!(
            "{:>4} {:<30} {:>10} {:>12} {:>12} {:>12}",
            i + 1,
            format!("@{}", c.name),
            thousands(c.commits),
            thousands(c.additions),
            thousands(c.deletions),
            signed_thousands(c.net_lines)
        );
    }
    if aggregate.contributors.len() > 50 {
        println!("\n... and {} more contributors", aggregate.contributors.len() - 50);
    }
}
