//! GraphQL documents issued by the collector. Each operation name matches
//! the `query` name inside its document.

use gh_graphql::Operation;

pub const GET_USER: Operation = Operation::new(
    "GetUser",
    r#"
query GetUser($login: String!) {
  user(login: $login) {
    login
    name
    avatarUrl
    bio
    company
    location
    followers { totalCount }
    following { totalCount }
    createdAt
  }
}
"#,
);

pub const GET_CONTRIBUTIONS: Operation = Operation::new(
    "GetContributions",
    r#"
query GetContributions($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            contributionLevel
          }
        }
      }
      totalCommitContributions
      totalPullRequestContributions
      totalIssueContributions
      totalPullRequestReviewContributions
      restrictedContributionsCount
    }
  }
}
"#,
);

pub const GET_REPOSITORIES: Operation = Operation::new(
    "GetRepositories",
    r#"
query GetRepositories($login: String!, $first: Int!) {
  user(login: $login) {
    repositories(
      first: $first
      orderBy: { field: STARGAZERS, direction: DESC }
      ownerAffiliations: [OWNER]
    ) {
      nodes {
        name
        description
        url
        primaryLanguage { name color }
        stargazerCount
        forkCount
        isPrivate
        createdAt
        updatedAt
      }
    }
  }
}
"#,
);

pub const GET_LANGUAGES: Operation = Operation::new(
    "GetLanguages",
    r#"
query GetLanguages($login: String!, $first: Int!, $languages: Int!) {
  user(login: $login) {
    repositories(first: $first, ownerAffiliations: [OWNER]) {
      nodes {
        languages(first: $languages, orderBy: { field: SIZE, direction: DESC }) {
          edges {
            size
            node { name color }
          }
        }
      }
    }
  }
}
"#,
);

pub const GET_PULL_REQUESTS: Operation = Operation::new(
    "GetPullRequests",
    r#"
query GetPullRequests($login: String!, $first: Int!) {
  user(login: $login) {
    pullRequests(first: $first, orderBy: { field: CREATED_AT, direction: DESC }) {
      nodes {
        createdAt
        state
        merged
      }
      totalCount
    }
  }
}
"#,
);

pub const GET_ISSUES: Operation = Operation::new(
    "GetIssues",
    r#"
query GetIssues($login: String!, $first: Int!) {
  user(login: $login) {
    issues(first: $first, orderBy: { field: CREATED_AT, direction: DESC }) {
      nodes {
        createdAt
        state
      }
      totalCount
    }
  }
}
"#,
);

pub const GET_USER_ID: Operation = Operation::new(
    "GetUserId",
    r#"
query GetUserId($login: String!) {
  user(login: $login) {
    id
  }
}
"#,
);

pub const GET_ORGANIZATIONS: Operation = Operation::new(
    "GetOrganizations",
    r#"
query GetOrganizations($login: String!, $first: Int!) {
  user(login: $login) {
    organizations(first: $first) {
      nodes {
        login
        name
        avatarUrl
      }
    }
  }
}
"#,
);

pub const GET_ORG_REPOS: Operation = Operation::new(
    "GetOrgRepos",
    r#"
query GetOrgRepos($org: String!, $first: Int!, $languages: Int!) {
  organization(login: $org) {
    repositories(first: $first, orderBy: { field: PUSHED_AT, direction: DESC }) {
      nodes {
        name
        nameWithOwner
        isPrivate
        languages(first: $languages, orderBy: { field: SIZE, direction: DESC }) {
          edges {
            size
            node { name color }
          }
        }
        defaultBranchRef { name }
      }
    }
  }
}
"#,
);

pub const GET_REPO_COMMITS: Operation = Operation::new(
    "GetRepoCommits",
    r#"
query GetRepoCommits(
  $owner: String!,
  $name: String!,
  $authorId: ID!,
  $since: GitTimestamp!,
  $until: GitTimestamp!,
  $first: Int!
) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $first, author: { id: $authorId }, since: $since, until: $until) {
            totalCount
            nodes {
              committedDate
              additions
              deletions
            }
          }
        }
      }
    }
  }
}
"#,
);

/// Inclusive UTC bounds of `year` in the form GitHub expects for
/// `DateTime` and `GitTimestamp` arguments.
pub fn year_bounds(year: i32) -> (String, String) {
    (
        format!("{year}-01-01T00:00:00Z"),
        format!("{year}-12-31T23:59:59Z"),
    )
}
