use std::sync::Arc;
use std::time::Instant;

use http::{header, HeaderValue, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{GraphqlError, HttpStatusError};
use crate::executor::{HttpExec, ReqwestExecutor};
use crate::metrics;
use crate::model::{GraphqlRequest, GraphqlResponse, Operation};

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: "github-year-in-review".to_string(),
        }
    }
}

/// An access token bound to a GraphQL endpoint. Cheap to clone; every
/// aggregation run owns its own client.
#[derive(Clone)]
pub struct GraphqlClient {
    exec: Arc<dyn HttpExec>,
    endpoint: Url,
    authorization: HeaderValue,
    user_agent: HeaderValue,
}

impl GraphqlClient {
    pub fn new(token: &str, options: ClientOptions) -> anyhow::Result<Self> {
        let exec = Arc::new(ReqwestExecutor::new(&options.user_agent)?);
        Self::with_executor(exec, token, options)
    }

    pub fn with_executor(
        exec: Arc<dyn HttpExec>,
        token: &str,
        options: ClientOptions,
    ) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&options.endpoint)?;
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.trim()))?;
        authorization.set_sensitive(true);
        let user_agent = HeaderValue::from_str(&options.user_agent)?;
        Ok(Self {
            exec,
            endpoint,
            authorization,
            user_agent,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs `op` and narrows its `data` into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        op: &Operation,
        variables: Value,
    ) -> Result<T, GraphqlError> {
        let data = self.query_value(op, variables).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Runs `op` once and returns the raw `data` object. Any entry in
    /// `errors` fails the call; partial data rides along on the error.
    pub async fn query_value(&self, op: &Operation, variables: Value) -> Result<Value, GraphqlError> {
        let start = Instant::now();
        let result = self.execute(op, &variables).await;
        let elapsed = start.elapsed().as_secs_f64();
        let outcome = match &result {
            Ok(_) => "success",
            Err(err) if err.is_partial_authorization() => "partial_authorization",
            Err(_) => "error",
        };
        metrics::record(op.name, outcome, elapsed);
        result
    }

    async fn execute(&self, op: &Operation, variables: &Value) -> Result<Value, GraphqlError> {
        let payload = serde_json::to_vec(&GraphqlRequest {
            query: op.document,
            variables,
        })?;

        let request = Request::builder()
            .method("POST")
            .uri(self.endpoint.as_str())
            .header(header::USER_AGENT, self.user_agent.clone())
            .header(header::AUTHORIZATION, self.authorization.clone())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .body(payload)
            .map_err(GraphqlError::transport)?;

        debug!(operation = op.name, "Dispatching GraphQL request");
        let response = self
            .exec
            .execute(request)
            .await
            .map_err(GraphqlError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body_preview = body_preview(response.body());
            warn!(
                operation = op.name,
                status = %status,
                body_preview = %body_preview,
                "GitHub returned error response"
            );
            return Err(GraphqlError::Status {
                status: HttpStatusError::with_endpoint(status, self.endpoint.as_str()),
                body_preview,
            });
        }

        let envelope: GraphqlResponse = serde_json::from_slice(response.body())?;
        if !envelope.errors.is_empty() {
            debug!(
                operation = op.name,
                count = envelope.errors.len(),
                kind = envelope.errors[0].kind().unwrap_or("unknown"),
                "GraphQL response carried errors"
            );
            return Err(GraphqlError::from_entries(envelope.errors, envelope.data));
        }

        match envelope.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(GraphqlError::MissingData),
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    let text = String::from_utf8_lossy(body);
    truncate_str(&text, 256)
}

fn truncate_str(value: &str, limit: usize) -> String {
    let mut truncated: String = value.chars().take(limit).collect();
    if truncated.len() < value.len() {
        truncated.push('…');
    }
    truncated
}
