pub mod models;
pub mod payloads;
pub mod transform;

pub use models::{
    ActiveDay, ActiveHour, CommitStats, ContributionBreakdown, ContributionCalendar,
    ContributionDay, ContributionLevel, ContributionWeek, GitHubUser, IssueStats, LanguageStat,
    PrimaryLanguage, PullRequestStats, Repository, YearlyStats, DEFAULT_LANGUAGE_COLOR,
};
pub use transform::{
    contribution_breakdown, language_color, normalize_language, normalize_repository,
    normalize_user,
};
