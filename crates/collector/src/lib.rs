pub mod error;
pub mod metrics;
pub mod org;
pub mod queries;
pub mod report;
pub mod safe;
pub mod yearly;

pub use error::StatsError;
pub use org::{ActiveRepo, OrgCollection, OrgCollector, OrgContributionStats};
pub use report::{CollectionReport, OutcomeKind, SkipReason, Source, SourceOutcome};
pub use safe::{safe_request, Safe, SafeOutcome};
pub use yearly::{fetch_yearly_stats, fetch_yearly_stats_with_report};
