//! # gitfolio-core
//!
//! Core library for gitfolio - a read-through cache that turns a GitHub
//! account into a portfolio.
//!
//! This library provides the foundational functionality for:
//! - GitHub API integration
//! - Repository enrichment (commits, languages, pull requests)
//! - Time-bounded portfolio caching
//! - Configuration management
//! - Search filter parsing

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod github;
pub mod language;
pub mod types;

// Re-export commonly used types
pub use aggregate::Aggregator;
pub use cache::{CacheStats, Portfolio, PortfolioCache};
pub use config::Config;
pub use error::{Error, Result};
pub use filter::SearchQuery;
pub use github::{GitHubClient, RepositorySource};
pub use language::Language;
pub use types::{RawRepository, RepositoryRecord};
