use super::{Artifact, TOP_CONTRIBUTORS};
use crate::error::{Result, VizError};
use crate::model::RunAggregate;
use crate::util::{escape_html, signed_thousands, thousands};
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::Path;

const OVERVIEW_TEMPLATE: &str = include_str!("../../templates/overview-stats.html");
const RANKING_TEMPLATE: &str = include_str!("../../templates/detailed-ranking.html");

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const OTHER_MEDAL: &str = "🏅";

fn medal(rank: usize) -> &'static str {
    MEDALS.get(rank).copied().unwrap_or(OTHER_MEDAL)
}

impl Artifact {
    pub fn template_name(self) -> &'static str {
        match self {
            Artifact::TopContributors => "overview-stats.html",
            Artifact::CompleteRanking => "detailed-ranking.html",
        }
    }

    fn builtin_template(self) -> &'static str {
        match self {
            Artifact::TopContributors => OVERVIEW_TEMPLATE,
            Artifact::CompleteRanking => RANKING_TEMPLATE,
        }
    }
}

/// Read the template for `artifact` from `dir`, or the built-in copy when the
/// file does not exist.
pub fn load_template(dir: &Path, artifact: Artifact) -> Result<String> {
    let path = dir.join(artifact.template_name());
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(artifact.builtin_template().to_string()),
        Err(e) => Err(VizError::render(format!("Failed to read template {}: {}", path.display(), e))),
    }
}

/// Replace every `{{KEY}}` with its value.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |html, (key, value)| {
        html.replace(&format!("{{{{{key}}}}}", key = key), value)
    })
}

fn common_values(aggregate: &RunAggregate) -> Vec<(&'static str, String)> {
    vec![
        ("REPOSITORY", escape_html(&aggregate.repository)),
        ("TOTAL_CONTRIBUTORS", thousands(aggregate.total_contributors as u64)),
        ("TOTAL_COMMITS", thousands(aggregate.total_commits)),
        ("TOTAL_ADDITIONS", thousands(aggregate.total_additions)),
        ("TOTAL_DELETIONS", thousands(aggregate.total_deletions)),
        ("LAST_UPDATED", aggregate.last_updated()),
    ]
}

pub fn contributors_list(aggregate: &RunAggregate) -> String {
    let mut html = String::new();
    for (i, c) in aggregate.top(TOP_CONTRIBUTORS).iter().enumerate() {
        let _ = write!(
            html,
            r#"
                <div class="contributor-item">
                    <span class="contributor-rank">{medal}</span>
                    <span class="contributor-name">@{name}</span>
                    <span class="contributor-stats">{commits} commits</span>
                </div>"#,
            medal = medal(i),
            name = escape_html(&c.name),
            commits = thousands(c.commits),
        );
    }
    html
}

pub fn ranking_rows(aggregate: &RunAggregate) -> String {
    let mut html = String::new();
    for (i, c) in aggregate.ranking().iter().enumerate() {
        let _ = write!(
            html,
            r#"
                <tr>
                    <td class="rank-cell"><span class="medal">{medal}</span>{rank}</td>
                    <td class="contributor-name">@{name}</td>
                    <td class="commits-cell">{commits}</td>
                    <td class="lines-added">+{additions}</td>
                    <td class="lines-deleted">-{deletions}</td>
                    <td class="lines-net">{net}</td>
                </tr>"#,
            medal = medal(i),
            rank = i + 1,
            name = escape_html(&c.name),
            commits = thousands(c.commits),
            additions = thousands(c.additions),
            deletions = thousands(c.deletions),
            net = signed_thousands(c.net_lines),
        );
    }
    html
}

/// Produce the finished page for `artifact`.
pub fn render_page(artifact: Artifact, aggregate: &RunAggregate, template: &str) -> String {
    let mut values = common_values(aggregate);
    match artifact {
        Artifact::TopContributors => {
            values.push(("CONTRIBUTORS_LIST", contributors_list(aggregate)));
        }
        Artifact::CompleteRanking => {
            values.push(("NET_LINES", thousands(aggregate.net_lines)));
            values.push(("RANKING_TABLE_ROWS", ranking_rows(aggregate)));
        }
    }
    fill(template, &values)
}
