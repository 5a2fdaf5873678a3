use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// One week of contribution history. Only the line counts are used; the
/// remaining fields the data fetcher writes (`w`, `c`) are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullRecord {
    pub author: Author,
    pub total_commits: u64,
    pub weeks: Vec<WeekStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub author: Author,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
}

/// A contributor entry, resolved to one of the two input shapes by the
/// presence of a `weeks` key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawContributor")]
pub enum ContributorRecord {
    Full(FullRecord),
    Summary(SummaryRecord),
}

#[derive(Deserialize)]
struct RawContributor {
    author: Author,
    total_commits: u64,
    #[serde(default)]
    weeks: Option<Vec<WeekStats>>,
    #[serde(default)]
    total_additions: u64,
    #[serde(default)]
    total_deletions: u64,
}

impl From<RawContributor> for ContributorRecord {
    fn from(raw: RawContributor) -> Self {
        match raw.weeks {
            Some(weeks) => ContributorRecord::Full(FullRecord {
                author: raw.author,
                total_commits: raw.total_commits,
                weeks,
            }),
            None => ContributorRecord::Summary(SummaryRecord {
                author: raw.author,
                total_commits: raw.total_commits,
                total_additions: raw.total_additions,
                total_deletions: raw.total_deletions,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotStatistics {
    #[serde(default)]
    pub total_commits: Option<u64>,
}

/// Parsed content of a `contributors-*.json` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributorSnapshot {
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub contributors: Vec<ContributorRecord>,
    #[serde(default)]
    pub statistics: Option<SnapshotStatistics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorSummary {
    pub name: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub net_lines: i128,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAggregate {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub total_contributors: usize,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub net_lines: i128,
    pub contributors: Vec<ContributorSummary>,
}

impl RunAggregate {
    /// Every contributor, most commits first.
    pub fn ranking(&self) -> &[ContributorSummary] {
        &self.contributors
    }

    pub fn top(&self, n: usize) -> &[ContributorSummary] {
        crate::rank::top_n(&self.contributors, n)
    }

    pub fn top3(&self) -> &[ContributorSummary] {
        self.top(3)
    }

    pub fn last_updated(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}
