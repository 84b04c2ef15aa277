use std::fmt;

use http::StatusCode;
use serde_json::Value;

use crate::model::ErrorEntry;

#[derive(Debug)]
pub struct HttpStatusError {
    pub status: StatusCode,
    pub endpoint: String,
}

impl HttpStatusError {
    pub fn with_endpoint(status: StatusCode, endpoint: impl Into<String>) -> Self {
        Self {
            status,
            endpoint: endpoint.into(),
        }
    }
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.endpoint.is_empty() {
            write!(f, "unexpected status {}", self.status)
        } else {
            write!(f, "unexpected status {} for {}", self.status, self.endpoint)
        }
    }
}

impl std::error::Error for HttpStatusError {}

#[derive(Debug, thiserror::Error)]
pub enum GraphqlError {
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("{status}: {body_preview}")]
    Status {
        #[source]
        status: HttpStatusError,
        body_preview: String,
    },
    #[error("malformed graphql response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("graphql error: {message}")]
    Response {
        message: String,
        errors: Vec<ErrorEntry>,
        data: Option<Value>,
    },
    #[error("graphql response carried no data")]
    MissingData,
}

impl GraphqlError {
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self::Transport(err.into())
    }

    pub(crate) fn from_entries(errors: Vec<ErrorEntry>, data: Option<Value>) -> Self {
        let message = errors
            .first()
            .map(|entry| entry.message.clone())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "unknown GraphQL error".to_string());
        Self::Response {
            message,
            errors,
            data,
        }
    }

    /// True when any reported error stems from SAML-enforced access control.
    pub fn is_partial_authorization(&self) -> bool {
        match self {
            GraphqlError::Response { errors, .. } => errors.iter().any(ErrorEntry::is_saml_failure),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            GraphqlError::Status { status, .. } => Some(status.status),
            _ => None,
        }
    }

    /// Partial `data` delivered alongside errors, if any was non-null.
    pub fn take_partial_data(&mut self) -> Option<Value> {
        match self {
            GraphqlError::Response { data, .. } => data.take().filter(|value| !value.is_null()),
            _ => None,
        }
    }
}
