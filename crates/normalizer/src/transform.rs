use crate::models::{
    ContributionBreakdown, GitHubUser, PrimaryLanguage, Repository, DEFAULT_LANGUAGE_COLOR,
};
use crate::payloads::{ContributionsCollection, LanguageRef, RepositoryNode, UserNode};

pub fn normalize_user(payload: UserNode) -> GitHubUser {
    GitHubUser {
        login: payload.login,
        name: payload.name,
        avatar_url: payload.avatar_url,
        bio: payload.bio,
        company: payload.company,
        location: payload.location,
        followers: payload.followers.total_count,
        following: payload.following.total_count,
        created_at: payload.created_at,
    }
}

pub fn normalize_repository(payload: RepositoryNode) -> Repository {
    Repository {
        name: payload.name,
        description: payload.description,
        url: payload.url,
        primary_language: payload.primary_language.map(normalize_language),
        stargazer_count: payload.stargazer_count,
        fork_count: payload.fork_count,
        is_private: payload.is_private,
        created_at: payload.created_at,
        updated_at: payload.updated_at,
    }
}

pub fn normalize_language(payload: LanguageRef) -> PrimaryLanguage {
    PrimaryLanguage {
        color: language_color(payload.color),
        name: payload.name,
    }
}

/// GitHub leaves `color` null for some languages.
pub fn language_color(color: Option<String>) -> String {
    color
        .filter(|color| !color.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE_COLOR.to_string())
}

pub fn contribution_breakdown(collection: &ContributionsCollection) -> ContributionBreakdown {
    ContributionBreakdown {
        commits: collection.total_commit_contributions,
        pull_requests: collection.total_pull_request_contributions,
        issues: collection.total_issue_contributions,
        pull_request_reviews: collection.total_pull_request_review_contributions,
        restricted: collection.restricted_contributions_count,
    }
}
