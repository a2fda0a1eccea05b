//! # gitfolio-server
//!
//! HTTP API for gitfolio: the cached portfolio endpoint, uncached search and
//! optional hosting of a static frontend.

pub mod error;
pub mod handlers;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use gitfolio_core::{Aggregator, Config, GitHubClient, PortfolioCache, RepositorySource};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub portfolio: Arc<PortfolioCache>,
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    /// Wire the services around an arbitrary repository source
    pub fn new(source: Arc<dyn RepositorySource>, config: &Config) -> Self {
        let aggregator = Arc::new(Aggregator::new(source, config.aggregate.concurrency));
        let portfolio = Arc::new(PortfolioCache::new(
            Arc::clone(&aggregator),
            config.github.username.clone(),
            config.cache.ttl(),
        ));
        Self {
            portfolio,
            aggregator,
        }
    }

    /// Wire the services around the real GitHub API
    pub fn from_config(config: &Config) -> gitfolio_core::Result<Self> {
        let client = GitHubClient::new(&config.github)?;
        Ok(Self::new(Arc::new(client), config))
    }
}

/// Build the application router
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/api/portfolio", get(handlers::get_portfolio))
        .route("/api/portfolio/search", get(handlers::search))
        .route("/health", get(handlers::health))
        .with_state(state);

    if let Some(dir) = static_dir {
        if dir.is_dir() {
            info!("Serving static files from {}", dir.display());
            router = router
                .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
        } else {
            warn!("Static directory {} does not exist, not serving files", dir.display());
        }
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind `addr` and serve `router` until Ctrl-C
pub async fn serve(addr: &str, router: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Utc};
    use gitfolio_core::{Error, RawRepository, Result, SearchQuery};
    use serde_json::Value;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Fake GitHub that records search queries
    #[derive(Default)]
    struct FakeSource {
        fail_listing: bool,
        searches: Mutex<Vec<SearchQuery>>,
    }

    fn raw(owner: &str, name: &str) -> RawRepository {
        RawRepository {
            owner: owner.to_string(),
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            html_url: format!("https://github.com/{}/{}", owner, name),
            homepage: None,
            stargazers_count: 3,
        }
    }

    #[async_trait]
    impl RepositorySource for FakeSource {
        async fn list_user_repositories(&self, username: &str) -> Result<Vec<RawRepository>> {
            if self.fail_listing {
                return Err(Error::GitHub {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                });
            }
            Ok(vec![raw(username, "alpha"), raw(username, "beta")])
        }

        async fn search_repositories(&self, query: &SearchQuery) -> Result<Vec<RawRepository>> {
            self.searches.lock().unwrap().push(query.clone());
            let owner = query.owner.clone().unwrap_or_else(|| "someone".to_string());
            Ok(vec![raw(&owner, "hit")])
        }

        async fn last_commit_date(&self, _: &str, repo: &str) -> Result<Option<DateTime<Utc>>> {
            if repo == "beta" {
                return Err(Error::GitHub {
                    status: 409,
                    message: "Git Repository is empty.".to_string(),
                });
            }
            Ok(Some("2024-02-03T04:05:06Z".parse().unwrap()))
        }

        async fn languages(&self, _: &str, _: &str) -> Result<BTreeMap<String, u64>> {
            Ok(BTreeMap::from([("Rust".to_string(), 100)]))
        }

        async fn pull_request_count(&self, _: &str, _: &str) -> Result<u64> {
            Ok(4)
        }
    }

    fn test_app(source: Arc<FakeSource>, username: &str) -> Router {
        let mut config = Config::default();
        config.github.username = username.to_string();
        create_router(AppState::new(source, &config), None)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_portfolio_returns_enriched_records() {
        let app = test_app(Arc::new(FakeSource::default()), "octocat");
        let (status, body) = get_json(app, "/api/portfolio").await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "alpha");
        assert_eq!(records[0]["url"], "https://github.com/octocat/alpha");
        assert_eq!(records[0]["stars"], 3);
        assert_eq!(records[0]["pullRequestsCount"], 4);
        assert_eq!(records[0]["lastCommitDate"], "2024-02-03T04:05:06Z");
        assert_eq!(records[0]["languages"]["Rust"], 100);
        assert!(records[1]["lastCommitDate"].is_null());
        assert_eq!(records[1]["pullRequestsCount"], 4);
    }

    #[tokio::test]
    async fn test_portfolio_without_username_is_empty() {
        let app = test_app(Arc::new(FakeSource::default()), "");
        let (status, body) = get_json(app, "/api/portfolio").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_portfolio_upstream_failure_is_bad_gateway() {
        let source = Arc::new(FakeSource {
            fail_listing: true,
            ..Default::default()
        });
        let (status, body) = get_json(test_app(source, "octocat"), "/api/portfolio").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], 502);
    }

    #[tokio::test]
    async fn test_search_by_user_only_uses_wildcard() {
        let source = Arc::new(FakeSource::default());
        let app = test_app(Arc::clone(&source), "octocat");
        let (status, body) = get_json(app, "/api/portfolio/search?repoName=&user=alice").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["url"], "https://github.com/alice/hit");

        let searches = source.searches.lock().unwrap();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].term, "*");
        assert_eq!(searches[0].owner.as_deref(), Some("alice"));
        assert_eq!(searches[0].language, None);
    }

    #[tokio::test]
    async fn test_search_without_parameters() {
        let source = Arc::new(FakeSource::default());
        let app = test_app(Arc::clone(&source), "");
        let (status, _) = get_json(app, "/api/portfolio/search").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.searches.lock().unwrap()[0].to_query_string(), "*");
    }

    #[tokio::test]
    async fn test_search_invalid_language_is_bad_request() {
        let source = Arc::new(FakeSource::default());
        let app = test_app(Arc::clone(&source), "octocat");
        let (status, body) =
            get_json(app, "/api/portfolio/search?language=not-a-real-language").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "language");
        assert!(source.searches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_cache_counters() {
        let app = test_app(Arc::new(FakeSource::default()), "octocat");
        get_json(app.clone(), "/api/portfolio").await;
        get_json(app.clone(), "/api/portfolio").await;

        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cache"]["misses"], 1);
        assert_eq!(body["cache"]["hits"], 1);
        assert_eq!(body["cache"]["refreshes"], 1);
        assert_eq!(body["cache"]["staleServed"], 0);
    }

    #[tokio::test]
    async fn test_static_files_served_as_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>portfolio</h1>").unwrap();

        let state = AppState::new(Arc::new(FakeSource::default()), &Config::default());
        let app = create_router(state, Some(dir.path().to_path_buf()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>portfolio</h1>");
    }
}
