use std::fmt;

use serde::Serialize;

/// What a report entry is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The organization membership listing of a user.
    Memberships(String),
    Organization(String),
    /// `owner/name` of an organization repository.
    Repository(String),
}

impl Source {
    pub fn name(&self) -> &str {
        match self {
            Source::Memberships(name) | Source::Organization(name) | Source::Repository(name) => {
                name
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Memberships(login) => write!(f, "organizations of {login}"),
            Source::Organization(login) => write!(f, "organization {login}"),
            Source::Repository(name) => write!(f, "repository {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// SAML-gated and no partial data came back.
    PartialAuthorization,
    /// Any other failure; carries the error message.
    RepositoryAccess(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Counted { commits: u64 },
    NoCommits,
    NoDefaultBranch,
    /// SAML-gated, but the partial data that came back was used.
    Partial,
    Skipped(SkipReason),
}

impl OutcomeKind {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Counted { .. } => "counted",
            OutcomeKind::NoCommits => "no_commits",
            OutcomeKind::NoDefaultBranch => "no_default_branch",
            OutcomeKind::Partial => "partial",
            OutcomeKind::Skipped(SkipReason::PartialAuthorization) => "skipped_partial_authorization",
            OutcomeKind::Skipped(SkipReason::RepositoryAccess(_)) => "skipped_access",
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, OutcomeKind::Skipped(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub source: Source,
    pub kind: OutcomeKind,
}

impl SourceOutcome {
    pub fn new(source: Source, kind: OutcomeKind) -> Self {
        Self { source, kind }
    }
}

/// Per-organization and per-repository outcomes of one collection pass, in
/// visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    outcomes: Vec<SourceOutcome>,
}

impl CollectionReport {
    pub fn push(&mut self, source: Source, kind: OutcomeKind) {
        self.outcomes.push(SourceOutcome::new(source, kind));
    }

    pub fn push_outcome(&mut self, outcome: SourceOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[SourceOutcome] {
        &self.outcomes
    }

    /// Kind recorded for the source with this name, if it was visited.
    pub fn kind_of(&self, name: &str) -> Option<&OutcomeKind> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.source.name() == name)
            .map(|outcome| &outcome.kind)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.kind.is_skipped())
    }

    /// No source was skipped or answered only partially.
    pub fn is_complete(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| !outcome.kind.is_skipped() && outcome.kind != OutcomeKind::Partial)
    }
}
