//! Fetch orchestration and the observable state published to the presentation layer.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::github::types::UserProfile;
use crate::github::{Credential, GitHubError, PageLimits, RepoSource, fetch_all_pages};
use crate::stats::{LanguageCount, RepoStats, TopRepoEntry, aggregate};

/// Terminal failure of one fetch invocation. Each variant has exactly one message.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Please enter a GitHub username.")]
    Validation,

    #[error(transparent)]
    Api(#[from] GitHubError),

    #[error("No public repositories found for this user.")]
    EmptyResult,

    #[error("Repositories were found, but none of them report a primary language.")]
    NoLanguageData,
}

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Look up the user profile before listing repositories.
    pub include_profile: bool,
    pub limits: PageLimits,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            include_profile: true,
            limits: PageLimits::default(),
        }
    }
}

/// Everything the presentation layer needs, computed fresh per invocation.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    pub languages: Vec<LanguageCount>,
    pub stats: RepoStats,
    pub top_repos: Vec<TopRepoEntry>,
    pub repo_count: usize,
}

/// Validate, look up the profile, page through repositories, and aggregate.
///
/// Short-circuits on the first failure; nothing fetched by a failed invocation
/// is returned.
pub async fn run_fetch(
    source: &impl RepoSource,
    user_id: &str,
    credential: Option<&Credential>,
    options: FetchOptions,
) -> Result<DashboardData, FetchError> {
    let user = user_id.trim();
    if user.is_empty() {
        return Err(FetchError::Validation);
    }

    info!(user, authenticated = credential.is_some(), "fetching repositories");

    let profile = if options.include_profile {
        Some(source.user_profile(user, credential).await?)
    } else {
        None
    };

    let records = fetch_all_pages(source, user, options.limits, credential).await?;
    if records.is_empty() {
        return Err(FetchError::EmptyResult);
    }

    let agg = aggregate(&records);
    if !agg.has_language_data() {
        return Err(FetchError::NoLanguageData);
    }

    info!(
        user,
        repos = records.len(),
        languages = agg.languages.len(),
        total_stars = agg.stats.total_stars,
        "aggregation complete"
    );

    Ok(DashboardData {
        profile,
        languages: agg.languages,
        stats: agg.stats,
        top_repos: agg.top_repos,
        repo_count: records.len(),
    })
}

/// Snapshot of the dashboard as seen by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    /// Set only between the start of an attempt and its terminal outcome.
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<Arc<DashboardData>>,
    generation: u64,
}

impl FetchState {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Single state container written by [`Dashboard::refresh`].
///
/// Overlapping refreshes are resolved by generation: only the most recently
/// started refresh may write its outcome.
pub struct Dashboard {
    state: watch::Sender<FetchState>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Run one fetch and publish its outcome.
    ///
    /// Returns `false` when a newer refresh started before this one settled,
    /// in which case the outcome was discarded.
    pub async fn refresh(
        &self,
        source: &impl RepoSource,
        user_id: &str,
        credential: Option<&Credential>,
        options: FetchOptions,
    ) -> bool {
        let generation = self.begin();
        let outcome = run_fetch(source, user_id, credential, options).await;
        self.settle(generation, outcome)
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = state.generation + 1;
            *state = FetchState {
                loading: true,
                error: None,
                result: None,
                generation,
            };
        });
        debug!(generation, "fetch started");
        generation
    }

    fn settle(&self, generation: u64, outcome: Result<DashboardData, FetchError>) -> bool {
        self.state.send_if_modified(|state| {
            if state.generation != generation {
                warn!(
                    generation,
                    current = state.generation,
                    "discarding result of superseded fetch"
                );
                return false;
            }
            state.loading = false;
            match outcome {
                Ok(data) => state.result = Some(Arc::new(data)),
                Err(e) => state.error = Some(e.to_string()),
            }
            true
        })
    }
}
