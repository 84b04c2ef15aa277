use chrono::Datelike;
use normalizer::payloads::{IssueNode, PullRequestNode};
use normalizer::{IssueStats, PullRequestStats};

const OPEN: &str = "OPEN";
const CLOSED: &str = "CLOSED";

/// Tallies pull requests created in `year` (UTC). A merged pull request is
/// counted as merged only, never as closed.
pub fn pull_request_stats<I>(nodes: I, year: i32) -> PullRequestStats
where
    I: IntoIterator<Item = PullRequestNode>,
{
    let mut stats = PullRequestStats::default();
    for pr in nodes.into_iter().filter(|pr| pr.created_at.year() == year) {
        stats.total += 1;
        if pr.merged {
            stats.merged += 1;
        } else if pr.state == OPEN {
            stats.open += 1;
        } else if pr.state == CLOSED {
            stats.closed += 1;
        }
    }
    stats
}

pub fn issue_stats<I>(nodes: I, year: i32) -> IssueStats
where
    I: IntoIterator<Item = IssueNode>,
{
    let mut stats = IssueStats::default();
    for issue in nodes.into_iter().filter(|issue| issue.created_at.year() == year) {
        stats.total += 1;
        match issue.state.as_str() {
            OPEN => stats.open += 1,
            CLOSED => stats.closed += 1,
            _ => {}
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn pr(ts: &str, state: &str, merged: bool) -> PullRequestNode {
        PullRequestNode {
            created_at: at(ts),
            state: state.to_string(),
            merged,
        }
    }

    #[test]
    fn pull_requests_filtered_by_year() {
        let nodes = vec![
            pr("2024-03-01T10:00:00Z", "MERGED", true),
            pr("2024-06-01T10:00:00Z", "OPEN", false),
            pr("2024-07-01T10:00:00Z", "CLOSED", false),
            pr("2023-12-31T23:59:59Z", "OPEN", false),
            pr("2025-01-01T00:00:00Z", "MERGED", true),
        ];
        let stats = pull_request_stats(nodes, 2024);
        assert_eq!(
            stats,
            PullRequestStats {
                total: 3,
                merged: 1,
                open: 1,
                closed: 1,
            }
        );
    }

    #[test]
    fn merged_is_not_counted_as_closed() {
        let stats = pull_request_stats(vec![pr("2024-01-02T00:00:00Z", "CLOSED", true)], 2024);
        assert_eq!(stats.merged, 1);
        assert_eq!(stats.closed, 0);
        assert!(stats.merged + stats.open + stats.closed <= stats.total);
    }

    #[test]
    fn issues_filtered_by_year() {
        let issue = |ts: &str, state: &str| IssueNode {
            created_at: at(ts),
            state: state.to_string(),
        };
        let stats = issue_stats(
            vec![
                issue("2024-02-02T00:00:00Z", "OPEN"),
                issue("2024-02-03T00:00:00Z", "CLOSED"),
                issue("2024-02-04T00:00:00Z", "CLOSED"),
                issue("2022-02-04T00:00:00Z", "CLOSED"),
            ],
            2024,
        );
        assert_eq!(
            stats,
            IssueStats {
                total: 3,
                open: 1,
                closed: 2,
            }
        );
    }
}
