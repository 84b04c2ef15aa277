use std::collections::BTreeMap;

use analysis::LanguageTally;
use chrono::NaiveDate;
use common::config::CollectorConfig;
use futures::stream::{self, StreamExt};
use gh_graphql::{GraphqlClient, GraphqlError};
use normalizer::payloads::{
    CommitHistory, LanguageConnection, OrgRepoNode, OrgReposResponse, OrganizationNode,
    OrganizationsResponse, RepoCommitsResponse, UserIdResponse,
};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::error::StatsError;
use crate::metrics;
use crate::queries::{self, year_bounds};
use crate::report::{CollectionReport, OutcomeKind, SkipReason, Source, SourceOutcome};
use crate::safe::{safe_request, SafeOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRepo {
    pub name: String,
    pub commits: u64,
}

/// Commit activity across the user's organization repositories for one year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgContributionStats {
    pub total_commits: u64,
    /// Summed over the returned commit nodes only.
    pub additions: u64,
    pub deletions: u64,
    pub commits_by_date: BTreeMap<NaiveDate, u64>,
    pub languages: LanguageTally,
    /// Busiest repositories first.
    pub active_repos: Vec<ActiveRepo>,
}

impl OrgContributionStats {
    fn absorb(&mut self, repo: RepoContribution) {
        self.total_commits += repo.commits;
        self.additions += repo.additions;
        self.deletions += repo.deletions;
        for (date, count) in repo.commits_by_date {
            *self.commits_by_date.entry(date).or_insert(0) += count;
        }
        self.languages.merge(repo.languages);
        self.active_repos.push(ActiveRepo {
            name: repo.name,
            commits: repo.commits,
        });
    }

    fn rank_active_repos(&mut self, limit: usize) {
        self.active_repos.sort_by(|a, b| b.commits.cmp(&a.commits));
        self.active_repos.truncate(limit);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgCollection {
    pub stats: OrgContributionStats,
    pub report: CollectionReport,
}

/// One repository's share, kept apart until it is folded in repository
/// order.
#[derive(Debug, Default)]
struct RepoContribution {
    name: String,
    commits: u64,
    additions: u64,
    deletions: u64,
    commits_by_date: BTreeMap<NaiveDate, u64>,
    languages: LanguageTally,
}

impl RepoContribution {
    fn from_history(repo: OrgRepoNode, history: CommitHistory) -> Self {
        let mut contribution = RepoContribution {
            name: repo.name_with_owner,
            commits: history.total_count,
            ..RepoContribution::default()
        };
        for commit in history.commits() {
            contribution.additions += commit.additions;
            contribution.deletions += commit.deletions;
            *contribution
                .commits_by_date
                .entry(commit.committed_date.date_naive())
                .or_insert(0) += 1;
        }
        for edge in repo.languages.into_iter().flat_map(LanguageConnection::edges) {
            contribution
                .languages
                .add(&edge.node.name, edge.node.color, edge.size);
        }
        contribution
    }
}

struct CommitWindow<'a> {
    author_id: &'a str,
    since: String,
    until: String,
}

type RepoResult = (SourceOutcome, Option<RepoContribution>);

pub struct OrgCollector<'a> {
    client: &'a GraphqlClient,
    config: &'a CollectorConfig,
}

impl<'a> OrgCollector<'a> {
    pub fn new(client: &'a GraphqlClient, config: &'a CollectorConfig) -> Self {
        Self { client, config }
    }

    /// Walks organizations one at a time; repositories inside an
    /// organization are queried `max_concurrent_repos` at a time. Only a
    /// failure to resolve the user's node id is returned as an error.
    #[instrument(skip(self))]
    pub async fn collect(&self, username: &str, year: i32) -> Result<OrgCollection, StatsError> {
        let author_id = self.resolve_user_id(username).await?;
        let (since, until) = year_bounds(year);
        let window = CommitWindow {
            author_id: &author_id,
            since,
            until,
        };

        let mut collection = OrgCollection::default();
        let orgs = self.organizations(username, &mut collection.report).await;
        info!(count = orgs.len(), "found organizations");

        for org in &orgs {
            self.collect_org(&org.login, &window, &mut collection).await;
        }

        collection
            .stats
            .rank_active_repos(self.config.active_repo_limit);
        info!(
            total_commits = collection.stats.total_commits,
            active_repos = collection.stats.active_repos.len(),
            skipped = collection.report.skipped().count(),
            "organization collection finished"
        );
        Ok(collection)
    }

    async fn resolve_user_id(&self, username: &str) -> Result<String, StatsError> {
        let op = &queries::GET_USER_ID;
        let response: UserIdResponse = self
            .client
            .query(op, json!({ "login": username }))
            .await
            .map_err(|source| StatsError::upstream(op, source))?;
        response
            .user
            .map(|user| user.id)
            .ok_or_else(|| StatsError::upstream(op, GraphqlError::MissingData))
    }

    async fn organizations(
        &self,
        username: &str,
        report: &mut CollectionReport,
    ) -> Vec<OrganizationNode> {
        let source = Source::Memberships(username.to_string());
        let variables = json!({ "login": username, "first": self.config.org_limit });
        let fetched = safe_request(
            self.client,
            &queries::GET_ORGANIZATIONS,
            variables,
            OrganizationsResponse::default(),
        )
        .await;

        match fetched {
            Ok(safe) => {
                if safe.outcome != SafeOutcome::Complete {
                    let kind = if safe.value.user.is_some() {
                        OutcomeKind::Partial
                    } else {
                        OutcomeKind::Skipped(SkipReason::PartialAuthorization)
                    };
                    report.push(source, kind);
                }
                safe.value
                    .user
                    .map(|user| user.organizations.items().collect())
                    .unwrap_or_default()
            }
            Err(err) => {
                warn!(error = %err, "could not list organizations");
                report.push(
                    source,
                    OutcomeKind::Skipped(SkipReason::RepositoryAccess(err.to_string())),
                );
                Vec::new()
            }
        }
    }

    async fn collect_org(
        &self,
        org: &str,
        window: &CommitWindow<'_>,
        collection: &mut OrgCollection,
    ) {
        let variables = json!({
            "org": org,
            "first": self.config.org_repo_limit,
            "languages": self.config.languages_per_repo,
        });
        let fetched = safe_request(
            self.client,
            &queries::GET_ORG_REPOS,
            variables,
            OrgReposResponse::default(),
        )
        .await;

        let (repos, partial) = match fetched {
            // Fallback and null partial data both leave nothing to walk.
            Ok(safe)
                if safe.outcome != SafeOutcome::Complete && safe.value.organization.is_none() =>
            {
                warn!(org = %org, "organization repositories are SAML protected, skipping");
                record_org(
                    collection,
                    org,
                    OutcomeKind::Skipped(SkipReason::PartialAuthorization),
                );
                return;
            }
            Ok(safe) => {
                let partial = safe.outcome == SafeOutcome::Partial;
                let repos: Vec<OrgRepoNode> = safe
                    .value
                    .organization
                    .map(|found| found.repositories.items().collect())
                    .unwrap_or_default();
                (repos, partial)
            }
            Err(err) => {
                warn!(org = %org, error = %err, "could not fetch organization repositories");
                record_org(
                    collection,
                    org,
                    OutcomeKind::Skipped(SkipReason::RepositoryAccess(err.to_string())),
                );
                return;
            }
        };
        debug!(org = %org, count = repos.len(), "found organization repositories");

        let results: Vec<RepoResult> = stream::iter(repos)
            .map(|repo| self.collect_repo(repo, window))
            .buffered(self.config.max_concurrent_repos.max(1))
            .collect()
            .await;

        let mut org_commits = 0;
        for (outcome, contribution) in results {
            metrics::REPO_OUTCOMES_TOTAL
                .with_label_values(&[outcome.kind.label()])
                .inc();
            collection.report.push_outcome(outcome);
            if let Some(contribution) = contribution {
                org_commits += contribution.commits;
                collection.stats.absorb(contribution);
            }
        }

        let kind = if partial {
            OutcomeKind::Partial
        } else if org_commits > 0 {
            OutcomeKind::Counted {
                commits: org_commits,
            }
        } else {
            OutcomeKind::NoCommits
        };
        record_org(collection, org, kind);
    }

    async fn collect_repo(&self, repo: OrgRepoNode, window: &CommitWindow<'_>) -> RepoResult {
        let source = Source::Repository(repo.name_with_owner.clone());
        if repo.default_branch_ref.is_none() {
            return (SourceOutcome::new(source, OutcomeKind::NoDefaultBranch), None);
        }

        let (owner, name) = repo.owner_and_name();
        let variables = json!({
            "owner": owner,
            "name": name,
            "authorId": window.author_id,
            "since": window.since,
            "until": window.until,
            "first": self.config.commit_limit,
        });
        let fetched = safe_request(
            self.client,
            &queries::GET_REPO_COMMITS,
            variables,
            RepoCommitsResponse::default(),
        )
        .await;

        let safe = match fetched {
            Ok(safe) => safe,
            Err(err) => {
                warn!(repo = %repo.name_with_owner, error = %err, "could not fetch commits");
                let kind = OutcomeKind::Skipped(SkipReason::RepositoryAccess(err.to_string()));
                return (SourceOutcome::new(source, kind), None);
            }
        };
        if safe.outcome != SafeOutcome::Complete && safe.value.repository.is_none() {
            let kind = OutcomeKind::Skipped(SkipReason::PartialAuthorization);
            return (SourceOutcome::new(source, kind), None);
        }

        let partial = safe.outcome == SafeOutcome::Partial;
        let contribution = safe
            .value
            .into_history()
            .filter(|history| history.total_count > 0)
            .map(|history| RepoContribution::from_history(repo, history));
        let kind = match &contribution {
            _ if partial => OutcomeKind::Partial,
            Some(found) => OutcomeKind::Counted {
                commits: found.commits,
            },
            None => OutcomeKind::NoCommits,
        };
        (SourceOutcome::new(source, kind), contribution)
    }
}

fn record_org(collection: &mut OrgCollection, org: &str, kind: OutcomeKind) {
    metrics::ORG_OUTCOMES_TOTAL
        .with_label_values(&[kind.label()])
        .inc();
    collection
        .report
        .push(Source::Organization(org.to_string()), kind);
}
