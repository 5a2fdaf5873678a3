use crate::model::ContributorSummary;

/// Sort by commit count, highest first. `sort_by` is stable, so contributors
/// with equal counts keep their input order.
pub fn rank(mut contributors: Vec<ContributorSummary>) -> Vec<ContributorSummary> {
    contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
    contributors
}

pub fn top_n(ranked: &[ContributorSummary], n: usize) -> &[ContributorSummary] {
    &ranked[..n.min(ranked.len())]
}
