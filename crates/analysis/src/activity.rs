use chrono::Datelike;
use normalizer::{ActiveDay, ActiveHour, ContributionCalendar, ContributionDay};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Typical developer activity by UTC hour. GitHub exposes no per-hour data,
/// so the hourly chart spreads the year's total along this curve.
const HOURLY_WEIGHTS: [f64; 24] = [
    0.01, 0.005, 0.003, 0.002, 0.002, 0.003, 0.02, 0.04, 0.06, 0.08, 0.09, 0.08, 0.05, 0.06, 0.08,
    0.09, 0.08, 0.06, 0.04, 0.05, 0.06, 0.05, 0.03, 0.02,
];

/// The hourly curve scaled to sum to 1.0.
pub fn hourly_distribution() -> [f64; 24] {
    let sum: f64 = HOURLY_WEIGHTS.iter().sum();
    HOURLY_WEIGHTS.map(|weight| weight / sum)
}

/// Estimated activity per hour. Each bucket is rounded on its own, so the
/// counts need not add up to exactly `total`.
pub fn active_hours(total: u64) -> Vec<ActiveHour> {
    hourly_distribution()
        .iter()
        .enumerate()
        .map(|(hour, share)| ActiveHour {
            hour: hour as u8,
            count: (total as f64 * share).round() as u64,
        })
        .collect()
}

/// Contributions per weekday, Sunday first.
pub fn active_days(calendar: &ContributionCalendar) -> Vec<ActiveDay> {
    let mut counts = [0u64; 7];
    for day in calendar.days() {
        counts[day.date.weekday().num_days_from_sunday() as usize] += day.contribution_count;
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(name, count)| ActiveDay {
            day: (*name).to_string(),
            count,
        })
        .collect()
}

/// Highest-count day. The earliest wins a tie. `None` when nothing was
/// contributed.
pub fn most_productive_day<'a, I>(days: I) -> Option<ContributionDay>
where
    I: IntoIterator<Item = &'a ContributionDay>,
{
    let mut best: Option<&ContributionDay> = None;
    for day in days {
        if day.contribution_count == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some(current) => {
                day.contribution_count > current.contribution_count
                    || (day.contribution_count == current.contribution_count
                        && day.date < current.date)
            }
        };
        if better {
            best = Some(day);
        }
    }
    best.cloned()
}

pub fn first_contribution<'a, I>(days: I) -> Option<ContributionDay>
where
    I: IntoIterator<Item = &'a ContributionDay>,
{
    days.into_iter()
        .filter(|day| day.contribution_count > 0)
        .min_by_key(|day| day.date)
        .cloned()
}
