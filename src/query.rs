//! Polling query layer
//!
//! A [`QueryClient`] owns the tokio runtime and the process-wide response cache. Each
//! panel holds a [`Query`] and polls it once per frame with its current key:
//!
//! - a changed key starts a fetch for the new key right away
//! - an unchanged key is refetched every `interval`
//! - responses are written to the cache by the fetch task itself, tagged with a request
//!   sequence number; an older request never overwrites a newer one for the same key
//! - dropping a `Query` aborts its in-flight request

use crate::async_job::AsyncJob;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::runtime::{Builder, Handle, Runtime};

type SharedValue = Arc<dyn Any + Send + Sync>;

struct CacheEntry {
    seq: u64,
    value: SharedValue,
    updated_at: Instant,
}

type Cache = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// Shared runtime + response cache. Created once at startup.
pub struct QueryClient {
    runtime: Runtime,
    cache: Cache,
    next_seq: AtomicU64,
    // Requests numbered below this were issued before the last `clear`
    min_seq: Arc<AtomicU64>,
}

impl QueryClient {
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("swapfees-io")
            .enable_all()
            .build()
            .map_err(|e| anyhow!("Failed to create async runtime: {}", e))?;
        Ok(Self {
            runtime,
            cache: Arc::new(RwLock::new(HashMap::new())),
            next_seq: AtomicU64::new(1),
            min_seq: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn handle(&self) -> &Handle {
        self.runtime.handle()
    }

    /// Run a one-off job on the shared runtime (not cached)
    pub fn spawn<T, Fut>(&self, fut: Fut) -> AsyncJob<T>
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        AsyncJob::spawn(self.handle(), fut)
    }

    /// Latest cached response for `key`, if any
    pub fn get<T: Send + Sync + 'static>(&self, key: &str) -> Option<(Arc<T>, Instant)> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        let entry = cache.get(key)?;
        let value = Arc::clone(&entry.value).downcast::<T>().ok()?;
        Some((value, entry.updated_at))
    }

    /// Drop every cached response (e.g. after switching backends). Requests issued
    /// before the clear can no longer write to the cache, detached ones included.
    pub fn clear(&self) {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        self.min_seq
            .store(self.next_seq.load(Ordering::SeqCst), Ordering::SeqCst);
        cache.clear();
    }

    /// Fetch on the runtime and store the response under `key`
    fn fetch<T, Fut>(&self, key: String, fut: Fut) -> AsyncJob<()>
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let cache = Arc::clone(&self.cache);
        let min_seq = Arc::clone(&self.min_seq);
        self.spawn(async move {
            let value = fut.await?;
            if !store(&cache, &min_seq, &key, seq, Arc::new(value)) {
                tracing::debug!(key = %key, seq, "Discarded stale response");
            }
            Ok(())
        })
    }
}

/// Write `value` unless the request predates the last clear or a newer request already
/// stored a response for `key`
fn store(
    cache: &RwLock<HashMap<String, CacheEntry>>,
    min_seq: &AtomicU64,
    key: &str,
    seq: u64,
    value: SharedValue,
) -> bool {
    let mut cache = cache.write().unwrap_or_else(|e| e.into_inner());
    if seq < min_seq.load(Ordering::SeqCst) {
        return false;
    }
    if cache.get(key).is_some_and(|existing| existing.seq > seq) {
        return false;
    }
    cache.insert(
        key.to_string(),
        CacheEntry {
            seq,
            value,
            updated_at: Instant::now(),
        },
    );
    true
}

/// Build the cache key for a query name and key value
pub fn cache_key<K: Serialize>(name: &str, key: &K) -> String {
    match serde_json::to_string(key) {
        Ok(json) => format!("{}:{}", name, json),
        Err(_) => name.to_string(),
    }
}

/// What a panel needs to render a query
pub struct QueryResult<T> {
    pub data: Option<Arc<T>>,
    pub error: Option<String>,
    pub is_fetching: bool,
    pub updated_at: Option<Instant>,
}

pub enum QueryStatus<'a, T> {
    Loading,
    Error(&'a str),
    Success(&'a T),
}

impl<T> QueryResult<T> {
    /// No data yet and no failure to report
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    pub fn status(&self) -> QueryStatus<'_, T> {
        if let Some(error) = &self.error {
            QueryStatus::Error(error)
        } else if let Some(data) = &self.data {
            QueryStatus::Success(data)
        } else {
            QueryStatus::Loading
        }
    }
}

/// A keyed, periodically refetched query
pub struct Query<K, T> {
    name: &'static str,
    interval: Duration,
    key: Option<K>,
    cache_key: String,
    job: Option<AsyncJob<()>>,
    last_started: Option<Instant>,
    error: Option<String>,
    _data: std::marker::PhantomData<fn() -> T>,
}

impl<K, T> Query<K, T>
where
    K: Serialize + PartialEq + Clone,
    T: Send + Sync + 'static,
{
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self {
            name,
            interval,
            key: None,
            cache_key: String::new(),
            job: None,
            last_started: None,
            error: None,
            _data: std::marker::PhantomData,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive the query: collect finished fetches, start a new one when the key changed or
    /// the interval elapsed, and report the current state for `key`.
    pub fn poll<F, Fut>(&mut self, client: &QueryClient, key: &K, fetch: F) -> QueryResult<T>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        if self.key.as_ref() != Some(key) {
            if let Some(job) = self.job.take() {
                // Its response still lands in the cache under the old key
                job.detach();
            }
            self.key = Some(key.clone());
            self.cache_key = cache_key(self.name, key);
            self.error = None;
            self.last_started = None;
        }

        if let Some(job) = &mut self.job {
            if let Some(result) = job.poll() {
                self.job = None;
                match result {
                    Ok(()) => {
                        tracing::debug!(query = self.name, "Fetch succeeded");
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(query = self.name, "Fetch failed: {:#}", e);
                        self.error = Some(format!("{:#}", e));
                    }
                }
            }
        }

        if self.job.is_none() && self.is_due() {
            self.job = Some(client.fetch(self.cache_key.clone(), fetch(key.clone())));
            self.last_started = Some(Instant::now());
        }

        let cached = client.get::<T>(&self.cache_key);
        QueryResult {
            updated_at: cached.as_ref().map(|(_, at)| *at),
            data: cached.map(|(data, _)| data),
            error: self.error.clone(),
            is_fetching: self.job.is_some(),
        }
    }

    /// Force a fetch on the next poll
    pub fn refetch(&mut self) {
        self.last_started = None;
    }

    /// Abort any in-flight fetch and forget the key; the next poll starts over
    pub fn reset(&mut self) {
        self.job = None;
        self.key = None;
        self.cache_key.clear();
        self.error = None;
        self.last_started = None;
    }

    /// Time until the next scheduled fetch (zero if one is due or running)
    pub fn next_refetch_in(&self) -> Duration {
        match self.last_started {
            Some(started) if self.job.is_none() => self.interval.saturating_sub(started.elapsed()),
            _ => Duration::ZERO,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.job.is_some()
    }

    fn is_due(&self) -> bool {
        self.last_started
            .map(|started| started.elapsed() >= self.interval)
            .unwrap_or(true)
    }
}
