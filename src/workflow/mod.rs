//! CI step plumbing - inputs, outputs, event context and logging.
//!
//! Separates concerns:
//! - `formatter` - Workflow-command log lines
//! - This module - Reading inputs and the triggering event, writing outputs

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::error::{ReleaseGateError, Result};
use crate::github::IssueRef;

pub mod formatter;

pub use formatter::{debug, error, info, notice, success, warning};

/// Environment variable name carrying a step input
///
/// `github-token` becomes `INPUT_GITHUB-TOKEN`; spaces turn into underscores.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Reads a step input, trimmed. Unset inputs read as empty.
pub fn get_input(name: &str) -> String {
    env::var(input_env_name(name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Reads a step input that must be present and non-empty
pub fn get_required_input(name: &str) -> Result<String> {
    let value = get_input(name);
    if value.is_empty() {
        return Err(ReleaseGateError::missing_input(name));
    }
    Ok(value)
}

/// Publishes a step output for later steps.
///
/// Appends to the `GITHUB_OUTPUT` file when the runner provides one,
/// otherwise prints the legacy `set-output` command.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => append_output(Path::new(&path), name, value),
        _ => {
            println!(
                "::set-output name={}::{}",
                formatter::escape_property(name),
                formatter::escape_data(value)
            );
            Ok(())
        }
    }
}

/// Appends `name<<DELIM` / value / `DELIM` to an output file
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = output_delimiter();
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(ReleaseGateError::config(format!(
            "output '{}' collides with delimiter",
            name
        )));
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")?;
    Ok(())
}

fn output_delimiter() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("ghadelimiter_{}_{:x}", std::process::id(), nanos)
}

/// Extracts the issue (or pull request) number from an event payload
pub fn issue_number_from_event(payload: &Value) -> Option<u64> {
    payload
        .pointer("/issue/number")
        .or_else(|| payload.pointer("/pull_request/number"))
        .or_else(|| payload.get("number"))
        .and_then(Value::as_u64)
}

/// Reads the issue number from the event payload file
pub fn read_event_issue_number(event_path: &Path) -> Result<Option<u64>> {
    let raw = fs::read_to_string(event_path)?;
    let payload: Value = serde_json::from_str(&raw).map_err(|e| {
        ReleaseGateError::context(format!(
            "cannot parse event payload {}: {}",
            event_path.display(),
            e
        ))
    })?;
    Ok(issue_number_from_event(&payload))
}

/// Resolves the triggering issue from overrides or the runner environment.
///
/// The repository comes from `repository` or `GITHUB_REPOSITORY`; the
/// number comes from `issue` or the payload at `GITHUB_EVENT_PATH`.
pub fn resolve_issue_ref(repository: Option<&str>, issue: Option<u64>) -> Result<IssueRef> {
    let slug = match repository {
        Some(slug) => slug.to_string(),
        None => env::var("GITHUB_REPOSITORY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ReleaseGateError::context("GITHUB_REPOSITORY is not set"))?,
    };

    let number = match issue {
        Some(number) => number,
        None => {
            let event_path = env::var("GITHUB_EVENT_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ReleaseGateError::context("GITHUB_EVENT_PATH is not set"))?;
            read_event_issue_number(Path::new(&event_path))?.ok_or_else(|| {
                ReleaseGateError::context("event payload does not reference an issue")
            })?
        }
    };

    IssueRef::from_slug(&slug, number)
}
