use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use normalizer::{ContributionCalendar, ContributionLevel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMerge {
    pub calendar: ContributionCalendar,
    /// Days that received organization commits.
    pub merged_days: usize,
    /// Organization commit days outside the fetched week range. These are
    /// not added to the calendar.
    pub dropped_days: Vec<NaiveDate>,
}

/// Adds organization commit counts onto the personal calendar, re-bucketing
/// each touched day. The week/day shape is unchanged. `totalContributions`
/// becomes the personal total plus `org_total_commits`, independent of the
/// per-day additions.
pub fn merge_org_commits(
    personal: &ContributionCalendar,
    commits_by_date: &BTreeMap<NaiveDate, u64>,
    org_total_commits: u64,
) -> CalendarMerge {
    let mut calendar = personal.clone();
    let mut merged_days = 0;

    for day in calendar
        .weeks
        .iter_mut()
        .flat_map(|week| week.contribution_days.iter_mut())
    {
        if let Some(extra) = commits_by_date.get(&day.date) {
            day.contribution_count += extra;
            day.contribution_level = ContributionLevel::for_count(day.contribution_count);
            merged_days += 1;
        }
    }

    let known: HashSet<NaiveDate> = personal.days().map(|day| day.date).collect();
    let dropped_days = commits_by_date
        .keys()
        .filter(|date| !known.contains(date))
        .copied()
        .collect();

    calendar.total_contributions = personal.total_contributions + org_total_commits;

    CalendarMerge {
        calendar,
        merged_days,
        dropped_days,
    }
}
