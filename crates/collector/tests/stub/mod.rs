//! Routed GraphQL stub: each request is answered by the handler registered
//! for its operation name. Unrouted operations get a 502.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use gh_graphql::{ClientOptions, GraphqlClient, HttpExec};
use http::{Request, Response, StatusCode};
use serde_json::{json, Value};

type Handler = Box<dyn Fn(&Value) -> (StatusCode, Value) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Call {
    pub operation: String,
    pub variables: Value,
}

#[derive(Default)]
pub struct StubExec {
    routes: HashMap<String, Handler>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StubExec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, operation: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        self.routes.insert(operation.to_string(), Box::new(handler));
        self
    }

    /// Same `data` for every call of `operation`.
    pub fn data(self, operation: &str, data: Value) -> Self {
        self.on(operation, move |_| ok(data.clone()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation == operation)
            .collect()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn into_client(self) -> (Arc<StubExec>, GraphqlClient) {
        let exec = Arc::new(self);
        let client = GraphqlClient::with_executor(exec.clone(), "test-token", ClientOptions::default())
            .unwrap();
        (exec, client)
    }
}

#[async_trait]
impl HttpExec for StubExec {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        let body: Value = serde_json::from_slice(req.body())?;
        let operation = operation_name(body["query"].as_str().unwrap_or_default());
        let variables = body["variables"].clone();
        self.calls.lock().unwrap().push(Call {
            operation: operation.clone(),
            variables: variables.clone(),
        });

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        // Give other buffered requests a chance to start.
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let (status, payload) = match self.routes.get(&operation) {
            Some(handler) => handler(&variables),
            None => (
                StatusCode::BAD_GATEWAY,
                json!({ "message": format!("no route for {operation}") }),
            ),
        };
        Ok(Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(payload.to_string().into_bytes())?)
    }
}

fn operation_name(document: &str) -> String {
    document
        .split("query ")
        .nth(1)
        .and_then(|rest| rest.split(|c: char| c == '(' || c.is_whitespace()).next())
        .unwrap_or_default()
        .to_string()
}

pub fn ok(data: Value) -> (StatusCode, Value) {
    (StatusCode::OK, json!({ "data": data }))
}

/// SAML enforcement error with the given partial `data` (may be null).
pub fn saml(data: Value) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({
            "data": data,
            "errors": [{
                "message": "Resource protected by organization SAML enforcement. You must grant your Personal Access token access to this organization.",
                "type": "FORBIDDEN",
                "extensions": { "saml_failure": true }
            }]
        }),
    )
}

pub fn graphql_error(message: &str) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({ "data": null, "errors": [{ "message": message, "type": "NOT_FOUND" }] }),
    )
}

pub fn server_error() -> (StatusCode, Value) {
    (StatusCode::BAD_GATEWAY, json!({ "message": "Server Error" }))
}

// Canned upstream payloads

pub const LOGIN: &str = "octocat";

pub fn user_data() -> Value {
    json!({ "user": {
        "login": LOGIN,
        "name": "The Octocat",
        "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
        "bio": null,
        "company": "@github",
        "location": "San Francisco",
        "followers": { "totalCount": 120 },
        "following": { "totalCount": 9 },
        "createdAt": "2011-01-25T18:44:36Z"
    } })
}

fn level(count: u64) -> &'static str {
    match count {
        0 => "NONE",
        1..=3 => "FIRST_QUARTILE",
        4..=6 => "SECOND_QUARTILE",
        7..=9 => "THIRD_QUARTILE",
        _ => "FOURTH_QUARTILE",
    }
}

/// Two full weeks starting Sunday 2024-03-03 with the given counts.
pub fn contributions_data(counts: [u64; 14], commit_contributions: u64) -> Value {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
    let weeks: Vec<Value> = counts
        .chunks(7)
        .enumerate()
        .map(|(week, chunk)| {
            let days: Vec<Value> = chunk
                .iter()
                .enumerate()
                .map(|(day, &count)| {
                    let date = start + chrono::Duration::days((week * 7 + day) as i64);
                    json!({
                        "date": date.to_string(),
                        "contributionCount": count,
                        "contributionLevel": level(count)
                    })
                })
                .collect();
            json!({ "contributionDays": days })
        })
        .collect();
    json!({ "user": { "contributionsCollection": {
        "contributionCalendar": {
            "totalContributions": counts.iter().sum::<u64>(),
            "weeks": weeks
        },
        "totalCommitContributions": commit_contributions,
        "totalPullRequestContributions": 4,
        "totalIssueContributions": 2,
        "totalPullRequestReviewContributions": 3,
        "restrictedContributionsCount": 0
    } } })
}

pub fn repositories_data() -> Value {
    json!({ "user": { "repositories": { "nodes": [
        {
            "name": "hello-world",
            "description": "My first repository",
            "url": "https://github.com/octocat/hello-world",
            "primaryLanguage": { "name": "Rust", "color": "#dea584" },
            "stargazerCount": 80,
            "forkCount": 9,
            "isPrivate": false,
            "createdAt": "2020-01-01T00:00:00Z",
            "updatedAt": "2024-06-01T00:00:00Z"
        },
        {
            "name": "notes",
            "description": null,
            "url": "https://github.com/octocat/notes",
            "primaryLanguage": null,
            "stargazerCount": 2,
            "forkCount": 0,
            "isPrivate": true,
            "createdAt": "2021-01-01T00:00:00Z",
            "updatedAt": "2024-02-01T00:00:00Z"
        }
    ] } } })
}

pub fn languages_data() -> Value {
    json!({ "user": { "repositories": { "nodes": [
        { "languages": { "edges": [
            { "size": 100, "node": { "name": "Rust", "color": "#dea584" } },
            { "size": 300, "node": { "name": "Go", "color": "#00ADD8" } }
        ] } },
        null
    ] } } })
}

pub fn pull_requests_data() -> Value {
    json!({ "user": { "pullRequests": {
        "totalCount": 4,
        "nodes": [
            { "createdAt": "2024-05-01T12:00:00Z", "state": "MERGED", "merged": true },
            { "createdAt": "2024-05-02T12:00:00Z", "state": "OPEN", "merged": false },
            { "createdAt": "2024-05-03T12:00:00Z", "state": "CLOSED", "merged": false },
            { "createdAt": "2023-12-31T12:00:00Z", "state": "MERGED", "merged": true }
        ]
    } } })
}

pub fn issues_data() -> Value {
    json!({ "user": { "issues": {
        "totalCount": 3,
        "nodes": [
            { "createdAt": "2024-01-10T08:00:00Z", "state": "OPEN" },
            { "createdAt": "2024-02-10T08:00:00Z", "state": "CLOSED" },
            null
        ]
    } } })
}

pub fn user_id_data() -> Value {
    json!({ "user": { "id": "MDQ6VXNlcjU4MzIzMQ==" } })
}

pub fn organizations_data(logins: &[&str]) -> Value {
    let nodes: Vec<Value> = logins
        .iter()
        .map(|login| json!({ "login": login, "name": null, "avatarUrl": "https://a.example" }))
        .collect();
    json!({ "user": { "organizations": { "nodes": nodes } } })
}

/// An organization repository node. `languages` are `(name, size)` pairs.
pub fn org_repo(name_with_owner: &str, default_branch: bool, languages: &[(&str, u64)]) -> Value {
    let name = name_with_owner.split('/').nth(1).unwrap_or(name_with_owner);
    let edges: Vec<Value> = languages
        .iter()
        .map(|(language, size)| json!({ "size": size, "node": { "name": language, "color": null } }))
        .collect();
    json!({
        "name": name,
        "nameWithOwner": name_with_owner,
        "isPrivate": true,
        "languages": { "edges": edges },
        "defaultBranchRef": if default_branch { json!({ "name": "main" }) } else { Value::Null }
    })
}

pub fn org_repos_data(repos: Vec<Value>) -> Value {
    json!({ "organization": { "repositories": { "nodes": repos } } })
}

/// Commit history with one node per timestamp. Each node adds 10 and
/// deletes 2 lines.
pub fn commits_data(total_count: u64, committed: &[&str]) -> Value {
    let nodes: Vec<Value> = committed
        .iter()
        .map(|ts| json!({ "committedDate": ts, "additions": 10, "deletions": 2 }))
        .collect();
    json!({ "repository": { "defaultBranchRef": { "target": { "history": {
        "totalCount": total_count,
        "nodes": nodes
    } } } } })
}

/// Stub answering every personal query with the canned payloads above and
/// reporting no organizations.
pub fn personal_only(counts: [u64; 14], commit_contributions: u64) -> StubExec {
    StubExec::new()
        .data("GetUser", user_data())
        .data("GetContributions", contributions_data(counts, commit_contributions))
        .data("GetRepositories", repositories_data())
        .data("GetLanguages", languages_data())
        .data("GetPullRequests", pull_requests_data())
        .data("GetIssues", issues_data())
        .data("GetUserId", user_id_data())
        .data("GetOrganizations", organizations_data(&[]))
}

/// Routes one organization `acme` with four repositories:
/// `api` (3 commits, all returned), `docs` (no default branch),
/// `web` (2 commits, one returned) and `empty` (no commits).
pub fn with_acme(stub: StubExec) -> StubExec {
    stub.data("GetOrganizations", organizations_data(&["acme"]))
        .data(
            "GetOrgRepos",
            org_repos_data(vec![
                org_repo("acme/api", true, &[("Rust", 1000)]),
                org_repo("acme/docs", false, &[("Markdown", 50)]),
                org_repo("acme/web", true, &[("TypeScript", 500), ("Rust", 200)]),
                org_repo("acme/empty", true, &[]),
            ]),
        )
        .on("GetRepoCommits", |vars| match vars["name"].as_str() {
            Some("api") => ok(commits_data(
                3,
                &[
                    "2024-03-05T10:00:00Z",
                    "2024-03-05T23:30:00Z",
                    "2024-03-06T01:00:00Z",
                ],
            )),
            Some("web") => ok(commits_data(2, &["2024-03-06T09:00:00Z"])),
            _ => ok(commits_data(0, &[])),
        })
}
