//! Common types used throughout gitfolio-core

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Repository listing as returned by GitHub, before enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRepository {
    /// Owner login
    pub owner: String,

    /// Repository name
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Browser URL
    pub html_url: String,

    /// Project homepage
    pub homepage: Option<String>,

    /// Star count
    pub stargazers_count: u64,
}

/// Enriched repository snapshot served by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    /// Repository name
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Canonical URL
    pub url: String,

    /// Project homepage
    pub homepage: Option<String>,

    /// Star count
    pub stars: u64,

    /// Pull requests in the upstream default scope, 0 if unknown
    pub pull_requests_count: u64,

    /// Date of the most recent commit, `None` if unknown or no commits
    pub last_commit_date: Option<DateTime<Utc>>,

    /// Language name to byte count
    pub languages: BTreeMap<String, u64>,
}

impl RepositoryRecord {
    /// Record carrying only the listing fields; enrichment facets are empty.
    pub fn from_raw(raw: &RawRepository) -> Self {
        Self {
            name: raw.name.clone(),
            description: raw.description.clone(),
            url: raw.html_url.clone(),
            homepage: raw.homepage.clone(),
            stars: raw.stargazers_count,
            pull_requests_count: 0,
            last_commit_date: None,
            languages: BTreeMap::new(),
        }
    }
}
