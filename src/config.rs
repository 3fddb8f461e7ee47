use std::env;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, warn};

use crate::github::{API_BASE, Credential};

/// Summarize a GitHub user's public repositories.
#[derive(Parser, Debug)]
#[command(name = "repolens", version, about)]
pub struct Cli {
    /// GitHub username to look up
    pub user: String,

    /// Personal access token (falls back to GITHUB_TOKEN, then GH_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// API base URL (falls back to REPOLENS_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Skip the user profile lookup
    #[arg(long)]
    pub no_profile: bool,

    /// Print the result as JSON instead of a Markdown report
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid API URL: must be HTTP(S), got '{0}'")]
    InvalidScheme(String),

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Resolved runtime settings. The token is kept in memory for this run only.
#[derive(Debug)]
pub struct Config {
    pub user: String,
    pub credential: Option<Credential>,
    pub api_url: String,
    pub include_profile: bool,
    pub json: bool,
    pub timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, |var| env::var(var).ok())
    }

    fn resolve(cli: Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credential = cli
            .token
            .and_then(Credential::new)
            .or_else(|| resolve_token(&lookup));
        if credential.is_some() {
            debug!("GitHub token configured");
        } else {
            warn!("No GitHub token found. Rate limit: 60 req/hour. Pass --token or set GITHUB_TOKEN.");
        }

        let api_url = cli
            .api_url
            .or_else(|| lookup("REPOLENS_API_URL"))
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| API_BASE.to_string());
        validate_api_url(&api_url)?;

        if cli.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            user: cli.user,
            credential,
            api_url,
            include_profile: !cli.no_profile,
            json: cli.json,
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

fn resolve_token(lookup: &impl Fn(&str) -> Option<String>) -> Option<Credential> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .iter()
        .filter_map(|var| lookup(var))
        .find_map(Credential::new)
}

fn validate_api_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::InvalidScheme(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("repolens").chain(args.iter().copied())).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(cli(&["octocat"]), no_env).unwrap();
        assert_eq!(config.user, "octocat");
        assert!(config.credential.is_none());
        assert_eq!(config.api_url, "https://api.github.com");
        assert!(config.include_profile);
        assert!(!config.json);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn flag_token_wins_over_env() {
        let config = Config::resolve(cli(&["octocat", "--token", "from-flag"]), |var| {
            (var == "GITHUB_TOKEN").then(|| "from-env".to_string())
        })
        .unwrap();
        assert!(config.credential.is_some());
    }

    #[test]
    fn blank_github_token_falls_through_to_gh_token() {
        let config = Config::resolve(cli(&["octocat"]), |var| match var {
            "GITHUB_TOKEN" => Some("  ".into()),
            "GH_TOKEN" => Some("gho_abc".into()),
            _ => None,
        })
        .unwrap();
        assert!(config.credential.is_some());
    }

    #[test]
    fn api_url_from_env() {
        let config = Config::resolve(cli(&["octocat"]), |var| {
            (var == "REPOLENS_API_URL").then(|| "https://ghe.example.com/api/v3".to_string())
        })
        .unwrap();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn rejects_non_http_api_url() {
        let err = Config::resolve(cli(&["octocat", "--api-url", "ftp://example.com"]), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScheme(_)));
        assert_eq!(
            err.to_string(),
            "invalid API URL: must be HTTP(S), got 'ftp://example.com'"
        );
    }

    #[test]
    fn rejects_unparseable_api_url() {
        let err = Config::resolve(cli(&["octocat", "--api-url", "not a url"]), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::resolve(cli(&["octocat", "--timeout", "0"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
        assert_eq!(err.to_string(), "timeout must be at least 1 second");
    }

    #[test]
    fn flags_toggle_profile_and_json() {
        let config =
            Config::resolve(cli(&["octocat", "--no-profile", "--json"]), no_env).unwrap();
        assert!(!config.include_profile);
        assert!(config.json);
    }
}
