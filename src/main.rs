use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::{error, info};

use repolens::config::{Cli, Config};
use repolens::dashboard::{Dashboard, FetchOptions};
use repolens::github::GitHubClient;
use repolens::report::format_dashboard;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("repolens=info".parse()?),
        )
        .init();

    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(config.timeout)
        .build()?;
    let github = GitHubClient::with_base_url(http, &config.api_url);

    let dashboard = Dashboard::new();
    let options = FetchOptions {
        include_profile: config.include_profile,
        ..Default::default()
    };
    dashboard
        .refresh(&github, &config.user, config.credential.as_ref(), options)
        .await;

    let state = dashboard.snapshot();
    if let Some(message) = state.error {
        error!("fetch failed");
        eprintln!("error: {message}");
        return Ok(ExitCode::FAILURE);
    }
    let Some(data) = state.result else {
        return Ok(ExitCode::FAILURE);
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&*data)?);
    } else {
        print!("{}", format_dashboard(config.user.trim(), &data));
    }

    info!(repos = data.repo_count, "done");
    Ok(ExitCode::SUCCESS)
}
