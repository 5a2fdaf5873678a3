use crate::error::{Result, VizError};
use crate::model::{
    ContributorRecord, ContributorSnapshot, ContributorSummary, FullRecord, RunAggregate, SummaryRecord,
    SCHEMA_VERSION,
};
use crate::rank::rank;
use chrono::{DateTime, Utc};

fn net(additions: u64, deletions: u64) -> i128 {
    i128::from(additions) - i128::from(deletions)
}

/// Sum `values`, failing instead of wrapping when the total leaves `u64`.
fn checked_sum(values: impl IntoIterator<Item = u64>, what: impl FnOnce() -> String) -> Result<u64> {
    values
        .into_iter()
        .try_fold(0u64, u64::checked_add)
        .ok_or_else(|| VizError::CountOverflow(what()))
}

impl FullRecord {
    pub fn summarize(&self) -> Result<ContributorSummary> {
        let login = &self.author.login;
        let additions = checked_sum(self.weeks.iter().map(|w| w.additions), || format!("additions of {login}"))?;
        let deletions = checked_sum(self.weeks.iter().map(|w| w.deletions), || format!("deletions of {login}"))?;
        Ok(ContributorSummary {
            name: login.clone(),
            commits: self.total_commits,
            additions,
            deletions,
            net_lines: net(additions, deletions),
            avatar_url: self.author.avatar_url.clone(),
            profile_url: self.author.html_url.clone(),
        })
    }
}

impl SummaryRecord {
    pub fn summarize(&self) -> Result<ContributorSummary> {
        Ok(ContributorSummary {
            name: self.author.login.clone(),
            commits: self.total_commits,
            additions: self.total_additions,
            deletions: self.total_deletions,
            net_lines: net(self.total_additions, self.total_deletions),
            avatar_url: self.author.avatar_url.clone(),
            profile_url: self.author.html_url.clone(),
        })
    }
}

impl ContributorRecord {
    pub fn summarize(&self) -> Result<ContributorSummary> {
        match self {
            ContributorRecord::Full(r) => r.summarize(),
            ContributorRecord::Summary(r) => r.summarize(),
        }
    }
}

/// Build the ranked, totals-annotated view of one snapshot.
pub fn aggregate(
    snapshot: &ContributorSnapshot,
    default_repository: &str,
    generated_at: DateTime<Utc>,
) -> Result<RunAggregate> {
    let summaries = snapshot
        .contributors
        .iter()
        .map(ContributorRecord::summarize)
        .collect::<Result<Vec<_>>>()?;

    let total_additions = checked_sum(summaries.iter().map(|c| c.additions), || "total additions".to_string())?;
    let total_deletions = checked_sum(summaries.iter().map(|c| c.deletions), || "total deletions".to_string())?;
    let total_commits = match snapshot.statistics.as_ref().and_then(|s| s.total_commits) {
        Some(total) => total,
        None => checked_sum(summaries.iter().map(|c| c.commits), || "total commits".to_string())?,
    };

    Ok(RunAggregate {
        version: SCHEMA_VERSION,
        generated_at,
        repository: snapshot
            .repository
            .clone()
            .unwrap_or_else(|| default_repository.to_string()),
        total_contributors: snapshot.contributors.len(),
        total_commits,
        total_additions,
        total_deletions,
        net_lines: net(total_additions, total_deletions),
        contributors: rank(summaries),
    })
}
