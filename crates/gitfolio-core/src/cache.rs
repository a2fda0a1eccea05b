//! Time-bounded portfolio cache
//!
//! Holds one portfolio snapshot. Readers share the current snapshot through
//! an `Arc`; a refresh builds a complete new snapshot and swaps it in. Only
//! one refresh runs at a time, and callers that arrive while it runs wait
//! for its outcome instead of starting their own. That holds for a failed
//! refresh too: everyone queued behind it gets the same stale value or the
//! same error.

use crate::aggregate::Aggregator;
use crate::error::{Error, Result};
use crate::types::RepositoryRecord;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Portfolio snapshot shared with callers
pub type Portfolio = Arc<Vec<RepositoryRecord>>;

/// A cached portfolio and its age
#[derive(Debug)]
pub struct CacheEntry {
    /// Cached records
    pub value: Portfolio,

    /// When the records were fetched
    pub created_at: Instant,

    /// How long the records stay valid
    pub ttl: Duration,
}

impl CacheEntry {
    fn new(value: Vec<RepositoryRecord>, ttl: Duration) -> Self {
        Self {
            value: Arc::new(value),
            created_at: Instant::now(),
            ttl,
        }
    }

    /// True while `now - created_at < ttl`
    pub fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) < self.ttl
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Calls answered from a fresh entry
    pub hits: u64,

    /// Calls that found no fresh entry
    pub misses: u64,

    /// Successful upstream refreshes
    pub refreshes: u64,

    /// Calls answered with an expired entry because a refresh failed
    pub stale_served: u64,
}

/// Outcome of the most recent upstream fetch
struct Attempt {
    generation: u64,
    outcome: std::result::Result<Portfolio, Arc<Error>>,
}

impl Attempt {
    fn shared(&self) -> Result<Portfolio> {
        self.outcome.clone().map_err(Error::Refresh)
    }
}

/// Read-through cache in front of [`Aggregator::portfolio`]
pub struct PortfolioCache {
    aggregator: Arc<Aggregator>,
    username: String,
    ttl: Duration,
    slot: RwLock<Option<Arc<CacheEntry>>>,
    refresh: Mutex<Option<Attempt>>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    stale_served: AtomicU64,
}

impl PortfolioCache {
    /// Create an empty cache for `username`'s portfolio
    pub fn new(aggregator: Arc<Aggregator>, username: impl Into<String>, ttl: Duration) -> Self {
        Self {
            aggregator,
            username: username.into(),
            ttl,
            slot: RwLock::new(None),
            refresh: Mutex::new(None),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
            stale_served: AtomicU64::new(0),
        }
    }

    /// Current portfolio, refreshing from GitHub when the cached one expired.
    ///
    /// When a refresh fails and an expired portfolio is available, the
    /// expired one is returned. The error is returned only if nothing was
    /// ever cached. Callers that queued behind a refresh get its outcome
    /// rather than fetching again.
    pub async fn get_portfolio(&self) -> Result<Portfolio> {
        if let Some(value) = self.fresh_value().await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Portfolio cache hit");
            return Ok(value);
        }

        let seen = self.generation.load(Ordering::Acquire);
        let mut last = self.refresh.lock().await;

        // Someone else may have refreshed while we waited for the lock.
        if let Some(value) = self.fresh_value().await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Portfolio refreshed by a concurrent caller");
            return Ok(value);
        }
        if let Some(attempt) = last.as_ref().filter(|a| a.generation > seen) {
            debug!("Reusing outcome of refresh #{}", attempt.generation);
            return attempt.shared();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        info!("Portfolio cache miss, refreshing for {:?}", self.username);

        let outcome = match self.aggregator.portfolio(&self.username).await {
            Ok(records) => {
                let entry = Arc::new(CacheEntry::new(records, self.ttl));
                let value = Arc::clone(&entry.value);
                *self.slot.write().await = Some(entry);
                self.refreshes.fetch_add(1, Ordering::Relaxed);
                info!("Cached portfolio with {} repositories", value.len());
                Ok(value)
            }
            Err(e) => {
                let stale = self.slot.read().await.clone();
                match stale {
                    Some(entry) => {
                        self.stale_served.fetch_add(1, Ordering::Relaxed);
                        warn!("Portfolio refresh failed, serving stale data: {}", e);
                        Ok(Arc::clone(&entry.value))
                    }
                    None => {
                        warn!("Portfolio refresh failed with nothing cached: {}", e);
                        Err(Arc::new(e))
                    }
                }
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let attempt = Attempt {
            generation,
            outcome,
        };
        let result = attempt.shared();
        *last = Some(attempt);
        debug!(stats = ?self.stats(), "Portfolio refresh #{} finished", generation);
        result
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            stale_served: self.stale_served.load(Ordering::Relaxed),
        }
    }

    async fn fresh_value(&self) -> Option<Portfolio> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(Instant::now()))
            .map(|entry| Arc::clone(&entry.value))
    }
}
