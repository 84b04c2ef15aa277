use gh_graphql::{GraphqlClient, GraphqlError, Operation};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeOutcome {
    Complete,
    /// SAML-gated parts were nulled out; the rest of the response is used.
    Partial,
    /// SAML-gated with nothing usable; the caller's fallback is returned.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Safe<T> {
    pub value: T,
    pub outcome: SafeOutcome,
}

/// Runs `op` once, absorbing partial-authorization failures. Any other
/// failure is returned to the caller.
pub async fn safe_request<T>(
    client: &GraphqlClient,
    op: &Operation,
    variables: Value,
    fallback: T,
) -> Result<Safe<T>, GraphqlError>
where
    T: DeserializeOwned,
{
    let mut err = match client.query::<T>(op, variables).await {
        Ok(value) => {
            return Ok(Safe {
                value,
                outcome: SafeOutcome::Complete,
            })
        }
        Err(err) if err.is_partial_authorization() => err,
        Err(err) => return Err(err),
    };

    let partial = err
        .take_partial_data()
        .map(serde_json::from_value::<T>)
        .transpose();
    match partial {
        Ok(Some(value)) => {
            warn!(operation = op.name, "SAML protected resource encountered, using partial data");
            Ok(Safe {
                value,
                outcome: SafeOutcome::Partial,
            })
        }
        Ok(None) => {
            warn!(operation = op.name, "SAML protected resource encountered, using fallback");
            Ok(Safe {
                value: fallback,
                outcome: SafeOutcome::Fallback,
            })
        }
        Err(decode) => {
            warn!(
                operation = op.name,
                error = %decode,
                "partial data did not match response schema, using fallback"
            );
            Ok(Safe {
                value: fallback,
                outcome: SafeOutcome::Fallback,
            })
        }
    }
}
