use normalizer::ContributionDay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub longest: u32,
    /// Run of consecutive non-zero days ending at the last calendar day.
    pub current: u32,
}

/// Walks the days in date order. Callers may pass them in any order.
pub fn compute_streaks<'a, I>(days: I) -> Streaks
where
    I: IntoIterator<Item = &'a ContributionDay>,
{
    let mut ordered: Vec<&ContributionDay> = days.into_iter().collect();
    ordered.sort_by_key(|day| day.date);

    let mut longest = 0;
    let mut run = 0;
    for day in &ordered {
        if day.contribution_count > 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    Streaks {
        longest,
        current: run,
    }
}
