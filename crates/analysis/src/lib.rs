pub mod activity;
pub mod calendar;
pub mod items;
pub mod languages;
pub mod streaks;

pub use activity::{active_days, active_hours, first_contribution, most_productive_day};
pub use calendar::{merge_org_commits, CalendarMerge};
pub use items::{issue_stats, pull_request_stats};
pub use languages::LanguageTally;
pub use streaks::{compute_streaks, Streaks};
