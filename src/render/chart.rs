//! Bar charts drawn directly with plotters' bitmap backend.

use super::{Artifact, Renderer, TOP_CONTRIBUTORS};
use crate::error::{Result, VizError};
use crate::model::{ContributorSummary, RunAggregate};
use crate::util::thousands;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

const TOP_SIZE: (u32, u32) = (1200, 800);
const RANKING_SIZE: (u32, u32) = (1400, 1200);
/// The ranking chart stays readable up to this many contributors.
const RANKING_CHART_LIMIT: usize = 10;

const FONT: &str = "sans-serif";
const BACKGROUND: RGBColor = RGBColor(0xF8, 0xF9, 0xFA);
const TEXT: RGBColor = RGBColor(0x2C, 0x3E, 0x50);
const GRID: RGBColor = RGBColor(0xE9, 0xEC, 0xEF);
const PODIUM: [RGBColor; 3] = [
    RGBColor(0x2E, 0x86, 0xAB),
    RGBColor(0xA2, 0x3B, 0x72),
    RGBColor(0xF1, 0x8F, 0x01),
];
const ADDITIONS: RGBColor = RGBColor(0xC7, 0x3E, 0x1D);
const DELETIONS: RGBColor = RGBColor(0xF1, 0x8F, 0x01);

#[derive(Debug, Default)]
pub struct ChartRenderer;

impl ChartRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for ChartRenderer {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn render_artifact(&self, artifact: Artifact, aggregate: &RunAggregate, path: &Path) -> Result<()> {
        let drawn = match artifact {
            Artifact::TopContributors => draw_top_contributors(aggregate, path),
            Artifact::CompleteRanking => draw_complete_ranking(aggregate, path),
        };
        drawn.map_err(|e| VizError::render(format!("Failed to draw {}: {}", artifact.file_name(), e)))
    }
}

/// Axis upper bound leaving room for value labels above the tallest bar.
fn headroom(max: u64) -> u64 {
    max.saturating_add(max / 10).saturating_add(1)
}

/// Slot ranges centre each bar on an integer; `n = 0` still yields a
/// drawable axis.
fn slot_range(n: usize) -> std::ops::Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

/// Label for the bar centred on `x`, or nothing between bars.
fn slot_label(names: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 0.05 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

fn handles(contributors: &[ContributorSummary]) -> Vec<String> {
    contributors.iter().map(|c| format!("@{}", c.name)).collect()
}

fn draw_footer(root: &DrawingArea<BitMapBackend, plotters::coord::Shift>, aggregate: &RunAggregate) -> DrawResult {
    let (width, height) = root.dim_in_pixel();
    let style = (FONT, 16).into_font().color(&TEXT);
    root.draw(&Text::new(
        format!("Repository: {}", aggregate.repository),
        (16, 12),
        style.clone().pos(Pos::new(HPos::Left, VPos::Top)),
    ))?;
    root.draw(&Text::new(
        format!("Generated {}", aggregate.last_updated()),
        (width as i32 - 16, height as i32 - 12),
        style.pos(Pos::new(HPos::Right, VPos::Bottom)),
    ))?;
    Ok(())
}

fn draw_top_contributors(aggregate: &RunAggregate, path: &Path) -> DrawResult {
    let top = aggregate.top(TOP_CONTRIBUTORS);
    let names = handles(top);
    let y_max = headroom(top.iter().map(|c| c.commits).max().unwrap_or(0));

    let root = BitMapBackend::new(path, TOP_SIZE).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top 3 Contributors", (FONT, 36).into_font().color(&TEXT))
        .margin(40)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(slot_range(top.len()), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(GRID)
        .x_labels(top.len().max(1))
        .x_label_formatter(&|x| slot_label(&names, *x))
        .y_label_formatter(&|y| thousands(*y))
        .x_desc("Contributors")
        .y_desc("Commits")
        .label_style((FONT, 18).into_font().color(&TEXT))
        .axis_desc_style((FONT, 20).into_font().color(&TEXT))
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(i, c)| {
        let x = i as f64;
        Rectangle::new([(x - 0.3, 0), (x + 0.3, c.commits)], PODIUM[i % PODIUM.len()].mix(0.85).filled())
    }))?;

    let value_style = (FONT, 22).into_font().color(&TEXT).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(top.iter().enumerate().map(|(i, c)| {
        EmptyElement::at((i as f64, c.commits)) + Text::new(thousands(c.commits), (0, -6), value_style.clone())
    }))?;

    draw_footer(&root, aggregate)?;
    root.present()?;
    Ok(())
}

fn draw_complete_ranking(aggregate: &RunAggregate, path: &Path) -> DrawResult {
    let shown = aggregate.top(RANKING_CHART_LIMIT);
    let names = handles(shown);

    let root = BitMapBackend::new(path, RANKING_SIZE).into_drawing_area();
    root.fill(&BACKGROUND)?;
    let (upper, lower) = root.margin(40, 30, 20, 20).split_vertically((RANKING_SIZE.1 / 2) as i32);

    draw_commit_bars(&upper, shown, &names)?;
    draw_line_bars(&lower, shown, &names)?;

    draw_footer(&root, aggregate)?;
    root.present()?;
    Ok(())
}

fn draw_commit_bars(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    shown: &[ContributorSummary],
    names: &[String],
) -> DrawResult {
    let n = shown.len();
    let x_max = headroom(shown.iter().map(|c| c.commits).max().unwrap_or(0));
    // rank 1 is drawn at the top
    let row = |i: usize| (n - 1 - i) as f64;
    let label_for = |y: f64| {
        let idx = y.round();
        if idx < 0.0 || idx as usize >= n {
            return String::new();
        }
        slot_label(names, (n - 1) as f64 - y)
    };

    let mut chart = ChartBuilder::on(area)
        .caption("Complete Ranking - Commits per Contributor", (FONT, 28).into_font().color(&TEXT))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(160)
        .build_cartesian_2d(0u64..x_max, slot_range(n))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .light_line_style(GRID)
        .y_labels(n.max(1))
        .y_label_formatter(&|y| label_for(*y))
        .x_label_formatter(&|x| thousands(*x))
        .x_desc("Commits")
        .label_style((FONT, 16).into_font().color(&TEXT))
        .axis_desc_style((FONT, 18).into_font().color(&TEXT))
        .draw()?;

    chart.draw_series(shown.iter().enumerate().map(|(i, c)| {
        let y = row(i);
        Rectangle::new([(0, y - 0.35), (c.commits, y + 0.35)], PODIUM[0].mix(0.85).filled())
    }))?;

    let value_style = (FONT, 16).into_font().color(&TEXT).pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(shown.iter().enumerate().map(|(i, c)| {
        EmptyElement::at((c.commits, row(i))) + Text::new(thousands(c.commits), (6, 0), value_style.clone())
    }))?;

    Ok(())
}

fn draw_line_bars(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    shown: &[ContributorSummary],
    names: &[String],
) -> DrawResult {
    let n = shown.len();
    let y_max = headroom(
        shown
            .iter()
            .map(|c| c.additions.max(c.deletions))
            .max()
            .unwrap_or(0),
    );

    let mut chart = ChartBuilder::on(area)
        .caption("Lines Added vs Removed", (FONT, 28).into_font().color(&TEXT))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d(slot_range(n), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(GRID)
        .x_labels(n.max(1))
        .x_label_formatter(&|x| slot_label(names, *x))
        .y_label_formatter(&|y| thousands(*y))
        .x_desc("Contributors")
        .y_desc("Lines")
        .label_style((FONT, 15).into_font().color(&TEXT))
        .axis_desc_style((FONT, 18).into_font().color(&TEXT))
        .draw()?;

    chart
        .draw_series(shown.iter().enumerate().map(|(i, c)| {
            let x = i as f64;
            Rectangle::new([(x - 0.38, 0), (x, c.additions)], ADDITIONS.mix(0.85).filled())
        }))?
        .label("Lines added")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], ADDITIONS.filled()));

    chart
        .draw_series(shown.iter().enumerate().map(|(i, c)| {
            let x = i as f64;
            Rectangle::new([(x, 0), (x + 0.38, c.deletions)], DELETIONS.mix(0.85).filled())
        }))?
        .label("Lines removed")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], DELETIONS.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(GRID)
        .label_font((FONT, 16).into_font().color(&TEXT))
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SCHEMA_VERSION;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn aggregate_of(n: usize) -> RunAggregate {
        let contributors: Vec<ContributorSummary> = (0..n as u64)
            .map(|i| ContributorSummary {
                name: format!("dev{i}"),
                commits: 100 - i * 7,
                additions: 1_000 * (i + 1),
                deletions: 3_000 * i,
                net_lines: i128::from(1_000 * (i + 1)) - i128::from(3_000 * i),
                avatar_url: None,
                profile_url: None,
            })
            .collect();
        let total_additions = contributors.iter().map(|c| c.additions).sum::<u64>();
        let total_deletions = contributors.iter().map(|c| c.deletions).sum::<u64>();
        RunAggregate {
            version: SCHEMA_VERSION,
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            repository: "octo/charts".to_string(),
            total_contributors: contributors.len(),
            total_commits: contributors.iter().map(|c| c.commits).sum(),
            total_additions,
            total_deletions,
            net_lines: i128::from(total_additions) - i128::from(total_deletions),
            contributors,
        }
    }

    fn render_both(n: usize) {
        let dir = tempdir().unwrap();
        let agg = aggregate_of(n);
        let renderer = ChartRenderer::new();
        for artifact in Artifact::ALL {
            let path = artifact.path_in(dir.path());
            renderer.render_artifact(artifact, &agg, &path).unwrap();
            let meta = std::fs::metadata(&path).unwrap();
            assert!(meta.len() > 0, "{} is empty for {n} contributors", artifact.file_name());
        }
    }

    #[test]
    fn renders_both_charts_without_contributors() {
        render_both(0);
    }

    #[test]
    fn renders_both_charts_for_a_small_team() {
        render_both(2);
    }

    #[test]
    fn renders_both_charts_past_the_bar_limit() {
        render_both(RANKING_CHART_LIMIT + 2);
    }

    #[test]
    fn headroom_is_never_zero() {
        assert_eq!(headroom(0), 1);
        assert_eq!(headroom(100), 111);
        assert_eq!(headroom(u64::MAX), u64::MAX);
    }

    #[test]
    fn slot_range_covers_every_bar() {
        assert_eq!(slot_range(0), -0.5..0.5);
        assert_eq!(slot_range(3), -0.5..2.5);
    }

    #[test]
    fn labels_only_on_bar_centres() {
        let names = vec!["@a".to_string(), "@b".to_string()];
        assert_eq!(slot_label(&names, 0.0), "@a");
        assert_eq!(slot_label(&names, 1.0), "@b");
        assert_eq!(slot_label(&names, 0.5), "");
        assert_eq!(slot_label(&names, 2.0), "");
        assert_eq!(slot_label(&names, -1.0), "");
    }
}
