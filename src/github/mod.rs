//! Issue tracker abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of issue
//! operations release-gate needs, with a real GitHub REST implementation and
//! an in-memory mock for testing.
//!
//! # Overview
//!
//! - [client::GithubClient]: talks to the GitHub REST API through `reqwest`
//! - [mock::MockTracker]: records calls in memory
//!
//! Handlers depend on the [IssueTracker] trait rather than a concrete client.

pub mod client;
pub mod mock;

pub use client::GithubClient;
pub use mock::MockTracker;

use crate::error::{ReleaseGateError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates of the issue that triggered the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl IssueRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        IssueRef {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Builds a reference from an `owner/repo` slug and an issue number
    pub fn from_slug(slug: &str, number: u64) -> Result<Self> {
        let (owner, repo) = slug
            .trim()
            .split_once('/')
            .ok_or_else(|| ReleaseGateError::context(format!("invalid repository '{}'", slug)))?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(ReleaseGateError::context(format!(
                "invalid repository '{}', expected owner/repo",
                slug
            )));
        }
        Ok(IssueRef::new(owner, repo, number))
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Author of an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueUser {
    pub login: String,
}

/// Issue as returned by the tracker; only the fields release-gate reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub user: IssueUser,
    #[serde(default)]
    pub state: IssueState,
}

impl Issue {
    pub fn author(&self) -> &str {
        &self.user.login
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

/// Identifier of a posted comment
pub type CommentId = u64;

/// Issue operations used by the deployment handlers.
///
/// Implementations must surface every transport or API failure as an error;
/// callers never retry.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch the issue
    async fn get_issue(&self, issue: &IssueRef) -> Result<Issue>;

    /// Append a comment to the issue
    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<CommentId>;

    /// Move the issue to the given state
    async fn update_issue_state(&self, issue: &IssueRef, state: IssueState) -> Result<()>;
}
