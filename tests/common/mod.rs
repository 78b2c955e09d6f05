//! Common test utilities for integration tests
//!
//! Builds a [`GitHubClient`] pointed at a mockito server and canned GitHub
//! payloads.

#![allow(dead_code)]

use mockito::ServerGuard;
use relsync::adapters::github::GitHubClient;
use relsync::domain::models::Config;
use serde_json::{json, Value};

pub const OWNER: &str = "octo-org";
pub const REPO: &str = "widgets";
pub const TOKEN: &str = "test-token";

/// Valid configuration pointing at `base_url`.
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.github.owner = OWNER.to_string();
    config.github.repo = REPO.to_string();
    config.github.token = Some(TOKEN.to_string());
    config.github.api_base_url = base_url.to_string();
    config.github.timeout_secs = 5;
    config
}

/// Client whose REST and GraphQL endpoints live on `server`.
pub fn client_for(server: &ServerGuard) -> GitHubClient {
    GitHubClient::from_config(&config_for(&server.url())).expect("client should build")
}

/// REST path under the test repository.
pub fn repo_path(path: &str) -> String {
    format!("/repos/{OWNER}/{REPO}{path}")
}

pub fn commit_json(sha: &str, message: &str) -> Value {
    json!({
        "sha": sha,
        "node_id": format!("C_{sha}"),
        "commit": {
            "message": message,
            "author": { "name": "dev", "email": "dev@example.com" }
        },
        "html_url": format!("https://github.com/{OWNER}/{REPO}/commit/{sha}")
    })
}

pub fn issue_json(number: u64, title: &str, labels: &[&str]) -> Value {
    let labels: Vec<Value> = labels
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i + 1, "name": name, "color": "ededed" }))
        .collect();
    json!({
        "id": 1000 + number,
        "node_id": format!("I_{number}"),
        "number": number,
        "title": title,
        "state": "closed",
        "labels": labels
    })
}

pub fn pull_request_json(number: u64, title: &str) -> Value {
    json!({
        "id": 2000 + number,
        "node_id": format!("PR_{number}"),
        "number": number,
        "title": title,
        "state": "closed",
        "labels": [],
        "pull_request": {
            "url": format!("https://api.github.com/repos/{OWNER}/{REPO}/pulls/{number}")
        }
    })
}

/// GraphQL response for a pull request's closing issues.
pub fn closing_issues_json(numbers: &[i64]) -> Value {
    let nodes: Vec<Value> = numbers.iter().map(|n| json!({ "number": n })).collect();
    json!({
        "data": {
            "repository": {
                "pullRequest": {
                    "closingIssuesReferences": { "nodes": nodes }
                }
            }
        }
    })
}
