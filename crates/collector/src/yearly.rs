use std::time::Instant;

use analysis::{
    active_days, active_hours, compute_streaks, first_contribution, issue_stats,
    merge_org_commits, most_productive_day, pull_request_stats, LanguageTally,
};
use common::config::CollectorConfig;
use gh_graphql::{GraphqlClient, GraphqlError, Operation};
use normalizer::payloads::{
    ContributionsResponse, IssuesResponse, ItemConnection, LanguageConnection,
    LanguagesResponse, PullRequestsResponse, RepositoriesResponse, UserResponse,
};
use normalizer::{
    contribution_breakdown, normalize_repository, normalize_user, CommitStats, YearlyStats,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::error::StatsError;
use crate::metrics;
use crate::org::{OrgCollection, OrgCollector};
use crate::queries::{self, year_bounds};
use crate::report::CollectionReport;
use crate::safe::safe_request;

const TOP_LANGUAGES: usize = 10;

/// Builds the yearly snapshot for `username`. Fails only when the user
/// profile, the contribution calendar or the top repositories cannot be
/// fetched.
pub async fn fetch_yearly_stats(
    client: &GraphqlClient,
    config: &CollectorConfig,
    username: &str,
    year: i32,
) -> Result<YearlyStats, StatsError> {
    fetch_yearly_stats_with_report(client, config, username, year)
        .await
        .map(|(stats, _)| stats)
}

/// Same as [`fetch_yearly_stats`], also returning which organization
/// sources were skipped or only partly readable.
#[instrument(skip(client, config))]
pub async fn fetch_yearly_stats_with_report(
    client: &GraphqlClient,
    config: &CollectorConfig,
    username: &str,
    year: i32,
) -> Result<(YearlyStats, CollectionReport), StatsError> {
    let login = username.trim();
    if login.is_empty() {
        return Err(StatsError::InvalidInput("username must not be empty".into()));
    }

    let started = Instant::now();
    let result = aggregate(client, config, login, year).await;
    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::AGGREGATIONS_TOTAL
        .with_label_values(&[outcome])
        .inc();
    metrics::AGGREGATION_DURATION.observe(started.elapsed().as_secs_f64());
    result
}

async fn aggregate(
    client: &GraphqlClient,
    config: &CollectorConfig,
    login: &str,
    year: i32,
) -> Result<(YearlyStats, CollectionReport), StatsError> {
    let (from, to) = year_bounds(year);

    let (user, contributions, repositories, languages, pull_requests, issues, orgs) = futures::try_join!(
        required::<UserResponse>(client, &queries::GET_USER, json!({ "login": login })),
        required::<ContributionsResponse>(
            client,
            &queries::GET_CONTRIBUTIONS,
            json!({ "login": login, "from": from, "to": to }),
        ),
        required::<RepositoriesResponse>(
            client,
            &queries::GET_REPOSITORIES,
            json!({ "login": login, "first": config.top_repo_limit }),
        ),
        optional::<LanguagesResponse>(
            client,
            &queries::GET_LANGUAGES,
            json!({
                "login": login,
                "first": config.language_repo_limit,
                "languages": config.languages_per_repo,
            }),
        ),
        optional::<PullRequestsResponse>(
            client,
            &queries::GET_PULL_REQUESTS,
            json!({ "login": login, "first": config.item_limit }),
        ),
        optional::<IssuesResponse>(
            client,
            &queries::GET_ISSUES,
            json!({ "login": login, "first": config.item_limit }),
        ),
        organizations(client, config, login, year),
    )?;

    let user = user
        .user
        .ok_or_else(|| StatsError::upstream(&queries::GET_USER, GraphqlError::MissingData))?;
    let collection = contributions
        .user
        .ok_or_else(|| StatsError::upstream(&queries::GET_CONTRIBUTIONS, GraphqlError::MissingData))?
        .contributions_collection;
    let repositories = repositories
        .user
        .ok_or_else(|| StatsError::upstream(&queries::GET_REPOSITORIES, GraphqlError::MissingData))?
        .repositories;

    let OrgCollection { stats: org, report } = orgs;
    let breakdown = contribution_breakdown(&collection);
    let personal = collection.contribution_calendar;

    let merge = merge_org_commits(&personal, &org.commits_by_date, org.total_commits);
    if !merge.dropped_days.is_empty() {
        debug!(
            dropped = merge.dropped_days.len(),
            "organization commit days fall outside the calendar"
        );
    }
    info!(
        org_commits = org.total_commits,
        merged_days = merge.merged_days,
        "merged organization commits into calendar"
    );
    let calendar = merge.calendar;

    let streaks = compute_streaks(calendar.days());
    let day_total: u64 = calendar.days().map(|day| day.contribution_count).sum();

    let mut tally = LanguageTally::new();
    for repo in languages.user.into_iter().flat_map(|user| user.repositories.items()) {
        for edge in repo.languages.into_iter().flat_map(LanguageConnection::edges) {
            tally.add(&edge.node.name, edge.node.color, edge.size);
        }
    }
    tally.merge(org.languages);

    let pull_request_stats = pull_request_stats(
        pull_requests
            .user
            .and_then(|user| user.pull_requests)
            .into_iter()
            .flat_map(ItemConnection::items),
        year,
    );
    let issue_stats = issue_stats(
        issues
            .user
            .and_then(|user| user.issues)
            .into_iter()
            .flat_map(ItemConnection::items),
        year,
    );

    let stats = YearlyStats {
        user: normalize_user(user),
        year,
        contribution_breakdown: breakdown,
        top_repositories: repositories
            .items()
            .take(config.top_repo_limit as usize)
            .map(normalize_repository)
            .collect(),
        language_stats: tally.into_ranked(TOP_LANGUAGES),
        commit_stats: CommitStats {
            total_commits: breakdown.commits + org.total_commits,
            additions: org.additions,
            deletions: org.deletions,
        },
        pull_request_stats,
        issue_stats,
        active_hours: active_hours(day_total),
        active_days: active_days(&personal),
        longest_streak: streaks.longest,
        current_streak: streaks.current,
        most_productive_day: most_productive_day(calendar.days()),
        first_contribution: first_contribution(calendar.days()),
        contributions: calendar,
    };
    Ok((stats, report))
}

async fn required<T: DeserializeOwned>(
    client: &GraphqlClient,
    op: &Operation,
    variables: Value,
) -> Result<T, StatsError> {
    client
        .query(op, variables)
        .await
        .map_err(|source| StatsError::upstream(op, source))
}

/// Safe-wrapped query whose remaining failures are absorbed into an empty
/// default.
async fn optional<T: DeserializeOwned + Default>(
    client: &GraphqlClient,
    op: &Operation,
    variables: Value,
) -> Result<T, StatsError> {
    match safe_request(client, op, variables, T::default()).await {
        Ok(safe) => Ok(safe.value),
        Err(err) => {
            warn!(operation = op.name, error = %err, "optional query failed, using empty result");
            Ok(T::default())
        }
    }
}

async fn organizations(
    client: &GraphqlClient,
    config: &CollectorConfig,
    login: &str,
    year: i32,
) -> Result<OrgCollection, StatsError> {
    match OrgCollector::new(client, config).collect(login, year).await {
        Ok(collection) => Ok(collection),
        Err(err) => {
            warn!(error = %err, "organization collection failed, continuing without it");
            Ok(OrgCollection::default())
        }
    }
}
