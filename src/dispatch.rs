//! Deployment workflow dispatch
//!
//! Resolves one [Mode] to its handler and runs it against an
//! [IssueTracker]. Each handler is a single pass with no retries; the first
//! tracker error aborts the run.

use crate::config::MessagesConfig;
use crate::error::Result;
use crate::github::{IssueRef, IssueState, IssueTracker};
use crate::mode::Mode;
use crate::request::{AllowList, ReleaseRequest};
use crate::skip::SkipReason;
use crate::workflow;

/// Step output carrying the requested version
pub const VERSION_OUTPUT: &str = "version";

/// Settings shared by all handlers
#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    pub allow_list: AllowList,
    pub messages: MessagesConfig,
}

/// What a handler did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Authorized release request acknowledged
    Started { version: String },
    /// Release request ignored without failing
    Skipped(SkipReason),
    /// Status comment posted, issue left as is
    Reported(Mode),
    /// Success comment posted and issue closed
    Closed,
}

impl Outcome {
    /// Step outputs this outcome publishes
    pub fn outputs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Outcome::Started { version } => vec![(VERSION_OUTPUT, version.as_str())],
            _ => Vec::new(),
        }
    }
}

/// Runs the handler for `mode`
pub async fn run<T: IssueTracker + ?Sized>(
    mode: Mode,
    tracker: &T,
    issue: &IssueRef,
    settings: &DispatchSettings,
) -> Result<Outcome> {
    match mode {
        Mode::Initial => initial(tracker, issue, settings).await,
        Mode::Success => success(tracker, issue, settings).await,
        Mode::Failure => report(tracker, issue, Mode::Failure, &settings.messages.failure).await,
        Mode::Canceled => report(tracker, issue, Mode::Canceled, &settings.messages.canceled).await,
    }
}

async fn initial<T: IssueTracker + ?Sized>(
    tracker: &T,
    issue: &IssueRef,
    settings: &DispatchSettings,
) -> Result<Outcome> {
    let fetched = tracker.get_issue(issue).await?;

    workflow::info(&format!("Valid users: {}", settings.allow_list));
    workflow::info(&format!("Issue title: {}", fetched.title));

    let Some(request) = ReleaseRequest::parse(&fetched.title) else {
        let reason = SkipReason::TitleMismatch {
            title: fetched.title,
        };
        workflow::warning(&reason.to_string());
        return Ok(Outcome::Skipped(reason));
    };

    workflow::info(&format!("Version: {}", request.version));
    if !request.is_semver() {
        workflow::notice(&format!(
            "Version '{}' is not a semantic version",
            request.version
        ));
    }

    if !settings.allow_list.contains(fetched.author()) {
        let reason = SkipReason::UnauthorizedAuthor {
            login: fetched.user.login,
        };
        workflow::warning(&reason.to_string());
        return Ok(Outcome::Skipped(reason));
    }

    tracker
        .create_comment(issue, &settings.messages.started)
        .await?;

    Ok(Outcome::Started {
        version: request.version,
    })
}

async fn success<T: IssueTracker + ?Sized>(
    tracker: &T,
    issue: &IssueRef,
    settings: &DispatchSettings,
) -> Result<Outcome> {
    tracker.get_issue(issue).await?;
    tracker
        .create_comment(issue, &settings.messages.success)
        .await?;
    tracker
        .update_issue_state(issue, IssueState::Closed)
        .await?;
    Ok(Outcome::Closed)
}

async fn report<T: IssueTracker + ?Sized>(
    tracker: &T,
    issue: &IssueRef,
    mode: Mode,
    body: &str,
) -> Result<Outcome> {
    tracker.get_issue(issue).await?;
    tracker.create_comment(issue, body).await?;
    Ok(Outcome::Reported(mode))
}
