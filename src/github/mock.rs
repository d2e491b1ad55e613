use crate::error::{ReleaseGateError, Result};
use crate::github::{CommentId, Issue, IssueRef, IssueState, IssueTracker, IssueUser};
use async_trait::async_trait;
use std::sync::Mutex;

/// Tracker call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    GetIssue,
    CreateComment(String),
    UpdateState(IssueState),
}

/// In-memory issue tracker for testing without network access
pub struct MockTracker {
    issue: Issue,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<TrackerCall>>,
}

impl MockTracker {
    /// Create a tracker holding one open issue
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        MockTracker {
            issue: Issue {
                number: 1,
                title: title.into(),
                user: IssueUser {
                    login: author.into(),
                },
                state: IssueState::Open,
            },
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make the named operation (`get_issue`, `create_comment`,
    /// `update_issue_state`) fail with a 500 response
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Bodies of all comments posted so far
    pub fn comments(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TrackerCall::CreateComment(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    /// State transitions requested so far
    pub fn state_updates(&self) -> Vec<IssueState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TrackerCall::UpdateState(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    fn record(&self, operation: &'static str, call: TrackerCall) -> Result<()> {
        if self.fail_on == Some(operation) {
            return Err(ReleaseGateError::api(operation, 500, "mock failure"));
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn get_issue(&self, issue: &IssueRef) -> Result<Issue> {
        self.record("get_issue", TrackerCall::GetIssue)?;
        Ok(Issue {
            number: issue.number,
            ..self.issue.clone()
        })
    }

    async fn create_comment(&self, _issue: &IssueRef, body: &str) -> Result<CommentId> {
        self.record("create_comment", TrackerCall::CreateComment(body.to_string()))?;
        Ok(self.comments().len() as CommentId)
    }

    async fn update_issue_state(&self, _issue: &IssueRef, state: IssueState) -> Result<()> {
        self.record("update_issue_state", TrackerCall::UpdateState(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_ref() -> IssueRef {
        IssueRef::new("octo", "app", 9)
    }

    #[tokio::test]
    async fn test_mock_returns_issue_with_requested_number() {
        let tracker = MockTracker::new("!release 1.0.0", "alice");
        let issue = tracker.get_issue(&issue_ref()).await.unwrap();
        assert_eq!(issue.number, 9);
        assert_eq!(issue.author(), "alice");
        assert_eq!(tracker.calls(), vec![TrackerCall::GetIssue]);
    }

    #[tokio::test]
    async fn test_mock_records_comments_and_states() {
        let tracker = MockTracker::new("t", "a");
        let first = tracker.create_comment(&issue_ref(), "one").await.unwrap();
        let second = tracker.create_comment(&issue_ref(), "two").await.unwrap();
        tracker
            .update_issue_state(&issue_ref(), IssueState::Closed)
            .await
            .unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(tracker.comments(), vec!["one", "two"]);
        assert_eq!(tracker.state_updates(), vec![IssueState::Closed]);
    }

    #[tokio::test]
    async fn test_mock_failure_is_not_recorded() {
        let tracker = MockTracker::new("t", "a").failing_on("create_comment");
        assert!(tracker.create_comment(&issue_ref(), "x").await.is_err());
        assert!(tracker.comments().is_empty());
    }
}
