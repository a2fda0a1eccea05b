//! GitHub API integration

use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::filter::SearchQuery;
use crate::types::RawRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

const PER_PAGE: &str = "100";

/// Remote source of repository data.
///
/// Listing and search failures matter to the caller. The three
/// per-repository facets may fail on their own (empty or disabled
/// repositories) and callers are expected to tolerate that.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Repositories owned by `username`, in upstream order
    async fn list_user_repositories(&self, username: &str) -> Result<Vec<RawRepository>>;

    /// Repositories matching `query`, in upstream relevance order
    async fn search_repositories(&self, query: &SearchQuery) -> Result<Vec<RawRepository>>;

    /// Date of the newest commit, `None` when there are no commits
    async fn last_commit_date(&self, owner: &str, repo: &str) -> Result<Option<DateTime<Utc>>>;

    /// Language name to byte count
    async fn languages(&self, owner: &str, repo: &str) -> Result<BTreeMap<String, u64>>;

    /// Number of pull requests in the upstream default scope
    async fn pull_request_count(&self, owner: &str, repo: &str) -> Result<u64>;
}

/// GitHub REST API client
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client from configuration
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Config(format!("Invalid GitHub token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Body of a successful GET plus the `rel="next"` link, if any
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<(String, Option<String>)> {
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        let next = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        Ok((body, next))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let (body, _) = self.fetch(&format!("{}{}", self.api_url, path), query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Items of a list endpoint across all of its pages
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let (body, mut next) = self.fetch(&format!("{}{}", self.api_url, path), query).await?;
        let mut items: Vec<T> = serde_json::from_str(&body)?;

        // Later page URLs already carry the full query string.
        while let Some(url) = next {
            let (body, link) = self.fetch(&url, &[]).await?;
            items.extend(serde_json::from_str::<Vec<T>>(&body)?);
            next = link;
        }

        Ok(items)
    }
}

/// Target of the `rel="next"` entry in a `Link` header
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#)
            .then(|| {
                target
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string()
            })
    })
}

fn upstream_error(status: StatusCode, body: &str) -> Error {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    Error::GitHub {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn list_user_repositories(&self, username: &str) -> Result<Vec<RawRepository>> {
        let repos: Vec<GitHubRepo> = self
            .get_all_pages(&format!("/users/{}/repos", username), &[("per_page", PER_PAGE)])
            .await?;
        Ok(repos.into_iter().map(Into::into).collect())
    }

    async fn search_repositories(&self, query: &SearchQuery) -> Result<Vec<RawRepository>> {
        let q = query.to_query_string();
        let result: SearchResponse = self
            .get_json("/search/repositories", &[("q", q.as_str()), ("per_page", PER_PAGE)])
            .await?;
        Ok(result.items.into_iter().map(Into::into).collect())
    }

    async fn last_commit_date(&self, owner: &str, repo: &str) -> Result<Option<DateTime<Utc>>> {
        let commits: Vec<GitHubCommit> = self
            .get_json(&format!("/repos/{}/{}/commits", owner, repo), &[("per_page", "1")])
            .await?;
        Ok(commits.into_iter().next().and_then(|c| {
            let GitHubCommitDetail { committer, author } = c.commit;
            committer.or(author).map(|sig| sig.date)
        }))
    }

    async fn languages(&self, owner: &str, repo: &str) -> Result<BTreeMap<String, u64>> {
        self.get_json(&format!("/repos/{}/{}/languages", owner, repo), &[])
            .await
    }

    async fn pull_request_count(&self, owner: &str, repo: &str) -> Result<u64> {
        let pulls: Vec<serde_json::Value> = self
            .get_all_pages(&format!("/repos/{}/{}/pulls", owner, repo), &[("per_page", PER_PAGE)])
            .await?;
        Ok(pulls.len() as u64)
    }
}

/// GitHub API repository response
#[derive(Debug, Deserialize)]
struct GitHubRepo {
    name: String,
    owner: GitHubOwner,
    description: Option<String>,
    html_url: String,
    homepage: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Debug, Deserialize)]
struct GitHubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<GitHubRepo>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommit {
    commit: GitHubCommitDetail,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitDetail {
    committer: Option<GitHubSignature>,
    author: Option<GitHubSignature>,
}

#[derive(Debug, Deserialize)]
struct GitHubSignature {
    date: DateTime<Utc>,
}

impl From<GitHubRepo> for RawRepository {
    fn from(gh: GitHubRepo) -> Self {
        Self {
            owner: gh.owner.login,
            name: gh.name,
            description: gh.description,
            html_url: gh.html_url,
            // GitHub reports an unset homepage as "" on some repositories
            homepage: gh.homepage.filter(|h| !h.is_empty()),
            stargazers_count: gh.stargazers_count,
        }
    }
}
