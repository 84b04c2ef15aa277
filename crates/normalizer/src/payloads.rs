//! Response schemas, one per GraphQL document. Nullable GraphQL fields are
//! `Option`, connection node lists tolerate `null` entries (what GitHub
//! returns for SAML-gated nodes) and absent scalars fall back to defaults.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::ContributionCalendar;

/// `nodes` list of a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Option<Vec<Option<T>>>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: None }
    }
}

impl<T> Nodes<T> {
    /// Non-null nodes in response order.
    pub fn items(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageRef {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEdge {
    #[serde(default)]
    pub size: u64,
    pub node: LanguageRef,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageConnection {
    #[serde(default)]
    pub edges: Option<Vec<Option<LanguageEdge>>>,
}

impl LanguageConnection {
    pub fn edges(self) -> impl Iterator<Item = LanguageEdge> {
        self.edges.into_iter().flatten().flatten()
    }
}

// GetUser

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub user: Option<UserNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub followers: TotalCount,
    #[serde(default)]
    pub following: TotalCount,
    pub created_at: DateTime<Utc>,
}

// GetContributions

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsResponse {
    #[serde(default)]
    pub user: Option<ContributionsUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    #[serde(default)]
    pub contribution_calendar: ContributionCalendar,
    #[serde(default)]
    pub total_commit_contributions: u64,
    #[serde(default)]
    pub total_pull_request_contributions: u64,
    #[serde(default)]
    pub total_issue_contributions: u64,
    #[serde(default)]
    pub total_pull_request_review_contributions: u64,
    #[serde(default)]
    pub restricted_contributions_count: u64,
}

// GetRepositories

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoriesResponse {
    #[serde(default)]
    pub user: Option<RepositoriesUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoriesUser {
    #[serde(default)]
    pub repositories: Nodes<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub primary_language: Option<LanguageRef>,
    #[serde(default)]
    pub stargazer_count: u64,
    #[serde(default)]
    pub fork_count: u64,
    #[serde(default)]
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// GetLanguages

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguagesResponse {
    #[serde(default)]
    pub user: Option<LanguagesUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguagesUser {
    #[serde(default)]
    pub repositories: Nodes<LanguageRepoNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageRepoNode {
    #[serde(default)]
    pub languages: Option<LanguageConnection>,
}

// GetPullRequests

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestsResponse {
    #[serde(default)]
    pub user: Option<PullRequestsUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestsUser {
    #[serde(default)]
    pub pull_requests: Option<ItemConnection<PullRequestNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub merged: bool,
}

// GetIssues

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuesResponse {
    #[serde(default)]
    pub user: Option<IssuesUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuesUser {
    #[serde(default)]
    pub issues: Option<ItemConnection<IssueNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConnection<T> {
    pub nodes: Option<Vec<Option<T>>>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for ItemConnection<T> {
    fn default() -> Self {
        Self {
            nodes: None,
            total_count: 0,
        }
    }
}

impl<T> ItemConnection<T> {
    pub fn items(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten().flatten()
    }
}

// GetUserId

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdResponse {
    #[serde(default)]
    pub user: Option<UserIdNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdNode {
    pub id: String,
}

// GetOrganizations

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationsResponse {
    #[serde(default)]
    pub user: Option<OrganizationsUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationsUser {
    #[serde(default)]
    pub organizations: Nodes<OrganizationNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationNode {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

// GetOrgRepos

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgReposResponse {
    #[serde(default)]
    pub organization: Option<OrgRepositories>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgRepositories {
    #[serde(default)]
    pub repositories: Nodes<OrgRepoNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgRepoNode {
    pub name: String,
    pub name_with_owner: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub languages: Option<LanguageConnection>,
    #[serde(default)]
    pub default_branch_ref: Option<BranchRef>,
}

impl OrgRepoNode {
    /// `(owner, name)` split from `nameWithOwner`.
    pub fn owner_and_name(&self) -> (&str, &str) {
        match self.name_with_owner.split_once('/') {
            Some((owner, name)) => (owner, name),
            None => ("", self.name.as_str()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    pub name: String,
}

// GetRepoCommits

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoCommitsResponse {
    #[serde(default)]
    pub repository: Option<CommitsRepository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsRepository {
    #[serde(default)]
    pub default_branch_ref: Option<CommitsBranch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitsBranch {
    #[serde(default)]
    pub target: Option<CommitTarget>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitTarget {
    #[serde(default)]
    pub history: Option<CommitHistory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHistory {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Option<Vec<Option<CommitNode>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub committed_date: DateTime<Utc>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl RepoCommitsResponse {
    /// Commit history of the default branch; absent anywhere along the path means none.
    pub fn into_history(self) -> Option<CommitHistory> {
        self.repository?.default_branch_ref?.target?.history
    }
}

impl CommitHistory {
    pub fn commits(self) -> impl Iterator<Item = CommitNode> {
        self.nodes.into_iter().flatten().flatten()
    }
}
