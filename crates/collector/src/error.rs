use gh_graphql::{GraphqlError, Operation};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// A required query failed, or answered without the requested user.
    #[error("upstream query {operation} failed: {source}")]
    UpstreamQuery {
        operation: &'static str,
        #[source]
        source: GraphqlError,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    pub fn upstream(op: &Operation, source: GraphqlError) -> Self {
        StatsError::UpstreamQuery {
            operation: op.name,
            source,
        }
    }

    pub fn operation(&self) -> Option<&'static str> {
        match self {
            StatsError::UpstreamQuery { operation, .. } => Some(*operation),
            StatsError::InvalidInput(_) => None,
        }
    }
}
