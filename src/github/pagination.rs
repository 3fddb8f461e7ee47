//! Sequential fetch-all-pages over the user repositories endpoint.

use tracing::{debug, warn};

use super::types::RepositoryRecord;
use super::{Credential, GitHubError, RepoSource};

/// GitHub's maximum page size for repository listings.
pub const PER_PAGE: u32 = 100;
/// Hard cap on page requests per invocation.
pub const MAX_PAGES: u32 = 10;

/// Bounds for a paginated fetch. At most `per_page * max_pages` records are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub per_page: u32,
    pub max_pages: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            per_page: PER_PAGE,
            max_pages: MAX_PAGES,
        }
    }
}

/// Fetch pages 1..N in order until a short page or the page cap.
///
/// Each request completes before the next is issued. The first failing page
/// aborts the whole fetch and records from earlier pages are dropped.
pub async fn fetch_all_pages(
    source: &impl RepoSource,
    user: &str,
    limits: PageLimits,
    credential: Option<&Credential>,
) -> Result<Vec<RepositoryRecord>, GitHubError> {
    let mut all = Vec::new();

    for page in 1..=limits.max_pages {
        let items = source
            .repo_page(user, page, limits.per_page, credential)
            .await?;
        let count = items.len();
        all.extend(items);
        debug!(user, page, count, total = all.len(), "fetched repository page");

        if count < limits.per_page as usize {
            return Ok(all);
        }
        if page == limits.max_pages {
            warn!(
                user,
                max_pages = limits.max_pages,
                total = all.len(),
                "page cap reached, remaining repositories not fetched"
            );
        }
    }

    Ok(all)
}
