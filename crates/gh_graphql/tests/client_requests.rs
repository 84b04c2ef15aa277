use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use gh_graphql::{ClientOptions, GraphqlClient, GraphqlError, HttpExec, Operation};
use http::{Request, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

const VIEWER: Operation = Operation::new("Viewer", "query Viewer { viewer { login } }");

struct CannedExec {
    status: StatusCode,
    body: Value,
    seen: Mutex<Vec<Request<Vec<u8>>>>,
}

impl CannedExec {
    fn new(status: StatusCode, body: Value) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpExec for CannedExec {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        self.seen.lock().unwrap().push(req);
        Ok(Response::builder()
            .status(self.status)
            .header("content-type", "application/json")
            .body(self.body.to_string().into_bytes())
            .unwrap())
    }
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: String,
}

#[tokio::test]
async fn binds_bearer_token_and_posts_document() -> Result<()> {
    let exec = CannedExec::new(
        StatusCode::OK,
        json!({ "data": { "viewer": { "login": "octocat" } } }),
    );
    let client = GraphqlClient::with_executor(exec.clone(), "secret-token", ClientOptions::default())?;

    let data: ViewerData = client.query(&VIEWER, json!({ "first": 1 })).await?;
    assert_eq!(data.viewer.login, "octocat");

    let seen = exec.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.method(), "POST");
    assert_eq!(request.uri(), "https://api.github.com/graphql");
    assert_eq!(
        request.headers().get(http::header::AUTHORIZATION).unwrap(),
        "Bearer secret-token"
    );
    assert!(request.headers().contains_key(http::header::USER_AGENT));
    let body: Value = serde_json::from_slice(request.body())?;
    assert_eq!(body["query"], VIEWER.document);
    assert_eq!(body["variables"]["first"], 1);
    Ok(())
}

#[tokio::test]
async fn saml_errors_keep_partial_data() -> Result<()> {
    let exec = CannedExec::new(
        StatusCode::OK,
        json!({
            "data": { "org": null },
            "errors": [{
                "message": "Resource protected by organization SAML enforcement.",
                "extensions": { "saml_failure": true }
            }]
        }),
    );
    let client = GraphqlClient::with_executor(exec, "t", ClientOptions::default())?;

    let mut err = client.query_value(&VIEWER, json!({})).await.unwrap_err();
    assert!(err.is_partial_authorization());
    assert_eq!(err.take_partial_data(), Some(json!({ "org": null })));
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_reported() -> Result<()> {
    let exec = CannedExec::new(
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Bad credentials" }),
    );
    let client = GraphqlClient::with_executor(exec, "t", ClientOptions::default())?;

    let err = client.query_value(&VIEWER, json!({})).await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::UNAUTHORIZED));
    assert!(!err.is_partial_authorization());
    match err {
        GraphqlError::Status {
            status,
            body_preview,
        } => {
            assert_eq!(status.endpoint, "https://api.github.com/graphql");
            assert!(body_preview.contains("Bad credentials"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn null_data_without_errors_is_missing_data() -> Result<()> {
    let exec = CannedExec::new(StatusCode::OK, json!({ "data": null }));
    let client = GraphqlClient::with_executor(exec, "t", ClientOptions::default())?;

    let err = client.query_value(&VIEWER, json!({})).await.unwrap_err();
    assert!(matches!(err, GraphqlError::MissingData));
    Ok(())
}

#[tokio::test]
async fn custom_endpoint_is_used() -> Result<()> {
    let exec = CannedExec::new(StatusCode::OK, json!({ "data": { "viewer": { "login": "a" } } }));
    let options = ClientOptions {
        endpoint: "https://ghe.example.com/api/graphql".into(),
        user_agent: "tests".into(),
    };
    let client = GraphqlClient::with_executor(exec.clone(), "t", options)?;
    client.query_value(&VIEWER, json!({})).await?;

    let seen = exec.seen.lock().unwrap();
    assert_eq!(seen[0].uri(), "https://ghe.example.com/api/graphql");
    assert_eq!(seen[0].headers().get(http::header::USER_AGENT).unwrap(), "tests");
    Ok(())
}
