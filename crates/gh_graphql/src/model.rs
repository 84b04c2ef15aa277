use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named GraphQL document. The name labels logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

impl Operation {
    pub const fn new(name: &'static str, document: &'static str) -> Self {
        Self { name, document }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// Response envelope. `data` and `errors` may both be present when the
/// server resolved part of the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub path: Vec<Value>,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub saml_failure: bool,
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorEntry {
    /// The resource exists but is gated behind an SSO/SAML policy the token
    /// has not been authorized for.
    pub fn is_saml_failure(&self) -> bool {
        self.extensions
            .as_ref()
            .map(|ext| ext.saml_failure)
            .unwrap_or(false)
    }

    pub fn kind(&self) -> Option<&str> {
        self.error_type
            .as_deref()
            .or_else(|| self.extensions.as_ref().and_then(|ext| ext.code.as_deref()))
    }
}
