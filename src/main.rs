use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use release_gate::config;
use release_gate::dispatch::{self, DispatchSettings};
use release_gate::github::client::{GithubClient, DEFAULT_API_URL};
use release_gate::mode::{resolve_mode, Mode};
use release_gate::request::AllowList;
use release_gate::workflow;

/// Flags override the matching `INPUT_*` step inputs and runner variables.
#[derive(clap::Parser)]
#[command(
    name = "release-gate",
    version,
    about = "Approve and report issue-driven deployments from a CI step"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Deployment status: empty, Success, Failure or Canceled")]
    status: Option<String>,

    #[arg(short, long, help = "Comma-separated users allowed to request releases")]
    users: Option<String>,

    #[arg(
        long,
        help = "Token for the GitHub API; prefer INPUT_GITHUB-TOKEN, flags are visible in the process list"
    )]
    github_token: Option<String>,

    #[arg(long, help = "Repository as owner/repo")]
    repository: Option<String>,

    #[arg(long, help = "Issue number")]
    issue: Option<u64>,

    #[arg(long, help = "GitHub API base URL")]
    api_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        workflow::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let status = args.status.unwrap_or_else(|| workflow::get_input("status"));
    workflow::info(&format!("Mode \"{}\"", status));
    let mode = resolve_mode(status.trim())?;

    let config = config::load_config(args.config.as_deref())?;

    let token = match args.github_token {
        Some(token) if !token.trim().is_empty() => token,
        _ => workflow::get_required_input("github-token")?,
    };

    let allow_list = if mode == Mode::Initial {
        resolve_allow_list(args.users)?
    } else {
        AllowList::default()
    };

    let issue = workflow::resolve_issue_ref(args.repository.as_deref(), args.issue)?;

    let api_url = args
        .api_url
        .or(config.api_url)
        .or_else(|| std::env::var("GITHUB_API_URL").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    workflow::debug(&format!("Using {} for {}", api_url, issue));

    let client = GithubClient::new(
        &api_url,
        &token,
        config.timeout_ms.map(Duration::from_millis),
    )?;

    let settings = DispatchSettings {
        allow_list,
        messages: config.messages,
    };

    let outcome = dispatch::run(mode, &client, &issue, &settings).await?;
    for (name, value) in outcome.outputs() {
        workflow::set_output(name, value)?;
    }
    workflow::success(&format!("{} handled for {}", mode, issue));

    Ok(())
}

/// `users` flag, then the required `users` input
fn resolve_allow_list(flag: Option<String>) -> Result<AllowList> {
    let raw = match flag {
        Some(users) if !users.trim().is_empty() => users,
        _ => workflow::get_required_input("users")?,
    };
    Ok(AllowList::parse(&raw))
}
