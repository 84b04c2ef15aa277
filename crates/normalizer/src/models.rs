use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE_COLOR: &str = "#808080";

/// The finished snapshot handed to the renderer. Field names follow the
/// renderer's JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStats {
    pub user: GitHubUser,
    pub year: i32,
    pub contributions: ContributionCalendar,
    pub contribution_breakdown: ContributionBreakdown,
    pub top_repositories: Vec<Repository>,
    pub language_stats: Vec<LanguageStat>,
    pub commit_stats: CommitStats,
    pub pull_request_stats: PullRequestStats,
    pub issue_stats: IssueStats,
    pub active_hours: Vec<ActiveHour>,
    pub active_days: Vec<ActiveDay>,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub most_productive_day: Option<ContributionDay>,
    pub first_contribution: Option<ContributionDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u64,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    /// All days in calendar order (weeks oldest first, Sunday first).
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|week| week.contribution_days.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub contribution_count: u64,
    #[serde(default)]
    pub contribution_level: ContributionLevel,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionLevel {
    #[default]
    None,
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
}

impl ContributionLevel {
    /// Fixed-threshold bucket used after organization commits are merged in.
    pub fn for_count(count: u64) -> Self {
        match count {
            30.. => ContributionLevel::FourthQuartile,
            20..=29 => ContributionLevel::ThirdQuartile,
            10..=19 => ContributionLevel::SecondQuartile,
            1..=9 => ContributionLevel::FirstQuartile,
            0 => ContributionLevel::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBreakdown {
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
    pub pull_request_reviews: u64,
    pub restricted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub primary_language: Option<PrimaryLanguage>,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrimaryLanguage {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageStat {
    pub name: String,
    pub color: String,
    pub size: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitStats {
    pub total_commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestStats {
    #[serde(rename = "totalPRs")]
    pub total: u64,
    pub merged: u64,
    pub open: u64,
    pub closed: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueStats {
    #[serde(rename = "totalIssues")]
    pub total: u64,
    pub open: u64,
    pub closed: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveHour {
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveDay {
    pub day: String,
    pub count: u64,
}
