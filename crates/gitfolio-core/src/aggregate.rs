//! Repository enrichment engine

use crate::error::Result;
use crate::filter::SearchQuery;
use crate::github::RepositorySource;
use crate::types::{RawRepository, RepositoryRecord};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns raw repository listings into enriched records
pub struct Aggregator {
    source: Arc<dyn RepositorySource>,
    concurrency: usize,
}

impl Aggregator {
    /// Create an aggregator enriching up to `concurrency` repositories at once
    pub fn new(source: Arc<dyn RepositorySource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// Enrich a single repository.
    ///
    /// Each facet is fetched independently; a failed facet keeps its
    /// default and is only logged.
    pub async fn enrich(&self, repo: &RawRepository) -> RepositoryRecord {
        let mut record = RepositoryRecord::from_raw(repo);

        let (commit, languages, pulls) = tokio::join!(
            self.source.last_commit_date(&repo.owner, &repo.name),
            self.source.languages(&repo.owner, &repo.name),
            self.source.pull_request_count(&repo.owner, &repo.name),
        );

        match commit {
            Ok(date) => record.last_commit_date = date,
            Err(e) => warn!(
                owner = %repo.owner,
                repo = %repo.name,
                facet = "commits",
                "Enrichment failed: {}",
                e
            ),
        }
        match languages {
            Ok(map) => record.languages = map,
            Err(e) => warn!(
                owner = %repo.owner,
                repo = %repo.name,
                facet = "languages",
                "Enrichment failed: {}",
                e
            ),
        }
        match pulls {
            Ok(count) => record.pull_requests_count = count,
            Err(e) => warn!(
                owner = %repo.owner,
                repo = %repo.name,
                facet = "pulls",
                "Enrichment failed: {}",
                e
            ),
        }

        record
    }

    /// Enrich every repository, preserving input order.
    ///
    /// Always returns one record per input repository.
    pub async fn aggregate(&self, repos: Vec<RawRepository>) -> Vec<RepositoryRecord> {
        debug!(
            "Enriching {} repositories with concurrency {}",
            repos.len(),
            self.concurrency
        );

        stream::iter(repos)
            .map(|repo| async move { self.enrich(&repo).await })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Enriched repositories of `username`.
    ///
    /// A blank username yields an empty portfolio without contacting GitHub.
    pub async fn portfolio(&self, username: &str) -> Result<Vec<RepositoryRecord>> {
        let username = username.trim();
        if username.is_empty() {
            info!("No portfolio username configured, returning empty portfolio");
            return Ok(Vec::new());
        }

        let repos = self.source.list_user_repositories(username).await?;
        info!("Fetched {} repositories for {}", repos.len(), username);
        Ok(self.aggregate(repos).await)
    }

    /// Enriched search results in upstream relevance order
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<RepositoryRecord>> {
        let repos = self.source.search_repositories(query).await?;
        info!(
            "Search {:?} matched {} repositories",
            query.to_query_string(),
            repos.len()
        );
        Ok(self.aggregate(repos).await)
    }
}
