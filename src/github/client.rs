use crate::error::{ReleaseGateError, Result};
use crate::github::{CommentId, Issue, IssueRef, IssueState, IssueTracker};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct CommentCreated {
    id: CommentId,
}

/// GitHub REST API client for issue operations
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubClient {
    /// Create a client authenticated with `token` against `api_base`.
    ///
    /// Without a timeout the reqwest default applies.
    pub fn new(api_base: &str, token: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("release-gate/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| ReleaseGateError::config("github-token contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(GithubClient {
            http: builder.build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn issue_url(&self, issue: &IssueRef) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_base, issue.owner, issue.repo, issue.number
        )
    }

    async fn send(&self, operation: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ReleaseGateError::api(operation, status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl IssueTracker for GithubClient {
    async fn get_issue(&self, issue: &IssueRef) -> Result<Issue> {
        self.send_json("get issue", self.http.get(self.issue_url(issue)))
            .await
    }

    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<CommentId> {
        let request = self
            .http
            .post(format!("{}/comments", self.issue_url(issue)))
            .json(&json!({ "body": body }));
        let created: CommentCreated = self.send_json("create issue comment", request).await?;
        Ok(created.id)
    }

    async fn update_issue_state(&self, issue: &IssueRef, state: IssueState) -> Result<()> {
        let request = self
            .http
            .patch(self.issue_url(issue))
            .json(&json!({ "state": state }));
        self.send("update issue", request).await?;
        Ok(())
    }
}
