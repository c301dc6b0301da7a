//! Bulk catalog snapshot with derived lookup indices.
//!
//! [`CatalogIndex`] holds the whole problem set as one immutable
//! [`Snapshot`]: the records keyed by id (in upstream order) plus the
//! `slug → id` and `display id → slug` indices derived from them. A refresh
//! builds a complete new snapshot and publishes it with a single `Arc` swap,
//! so readers only ever see a whole snapshot.
//!
//! # Refresh discipline
//!
//! [`CatalogIndex::ensure_fresh()`] takes an async mutex for the entire
//! check-fetch-publish sequence. At most one refresh is in flight, and every
//! `ensure_fresh` caller queues behind it, including callers that would have
//! found the snapshot fresh. Callers that queued behind a refresh attempt take
//! its outcome, success or failure, instead of starting another one. Readers
//! that only call the lookup methods never wait on the mutex.
//!
//! # Failure policy
//!
//! A failed refresh is logged and counted, never returned. The previous
//! snapshot (possibly empty, possibly stale) stays in place and its refresh
//! instant is left untouched, so the next `ensure_fresh` that arrives after
//! the failed attempt tries again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::telemetry;
use crate::types::SummaryRecord;
use crate::upstream::RemoteCaller;
use crate::upstream::queries::PROBLEMSET_LIST;
use crate::upstream::wire::QuestionList;
use crate::{MimirError, Result};

/// Default snapshot time-to-live: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// One immutable copy of the catalog.
#[derive(Debug, Default)]
pub struct Snapshot {
    records: IndexMap<String, SummaryRecord>,
    slug_to_id: HashMap<String, String>,
    display_id_to_slug: HashMap<String, String>,
    refreshed_at: Option<Instant>,
}

impl Snapshot {
    /// Build a snapshot from upstream records.
    ///
    /// Records are keyed by id; a repeated id keeps its first position and
    /// its last value. Both indices are derived from the deduplicated set.
    pub fn from_records(records: impl IntoIterator<Item = SummaryRecord>) -> Self {
        let mut by_id: IndexMap<String, SummaryRecord> = IndexMap::new();
        for record in records {
            by_id.insert(record.id.clone(), record);
        }

        let mut slug_to_id = HashMap::with_capacity(by_id.len());
        let mut display_id_to_slug = HashMap::with_capacity(by_id.len());
        for record in by_id.values() {
            slug_to_id.insert(record.slug.clone(), record.id.clone());
            display_id_to_slug.insert(record.frontend_id.clone(), record.slug.clone());
        }

        Self {
            records: by_id,
            slug_to_id,
            display_id_to_slug,
            refreshed_at: None,
        }
    }

    fn stamped(mut self, at: Instant) -> Self {
        self.refreshed_at = Some(at);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When this snapshot was fetched. `None` for a snapshot that never came
    /// from a refresh.
    pub fn refreshed_at(&self) -> Option<Instant> {
        self.refreshed_at
    }

    /// Look up by primary id.
    pub fn get(&self, id: &str) -> Option<&SummaryRecord> {
        self.records.get(id)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&SummaryRecord> {
        self.slug_to_id.get(slug).and_then(|id| self.records.get(id))
    }

    pub fn by_display_id(&self, display_id: &str) -> Option<&SummaryRecord> {
        self.display_id_to_slug
            .get(display_id)
            .and_then(|slug| self.by_slug(slug))
    }

    /// Records in upstream order.
    pub fn iter(&self) -> impl Iterator<Item = &SummaryRecord> {
        self.records.values()
    }

    /// Record at `index` in upstream order.
    pub fn get_index(&self, index: usize) -> Option<&SummaryRecord> {
        self.records.get_index(index).map(|(_, record)| record)
    }
}

/// Point-in-time view of the index, for health reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStatus {
    /// Number of records in the current snapshot.
    pub records: usize,
    /// Age of the current snapshot, or `None` if no refresh has succeeded.
    pub age: Option<Duration>,
    pub ttl: Duration,
}

impl CatalogStatus {
    /// Whether the next `ensure_fresh` would refresh.
    pub fn is_stale(&self) -> bool {
        is_stale(self.records, self.age, self.ttl)
    }
}

fn is_stale(records: usize, age: Option<Duration>, ttl: Duration) -> bool {
    if records == 0 {
        return true;
    }
    match age {
        None => true,
        Some(age) => ttl.is_zero() || age > ttl,
    }
}

/// TTL-refreshed catalog snapshot with slug and display-id indices.
pub struct CatalogIndex {
    caller: RemoteCaller,
    ttl: Duration,
    refresh_gate: Mutex<()>,
    /// Completed refresh attempts, successful or not.
    attempts: AtomicU64,
    current: RwLock<Arc<Snapshot>>,
}

impl CatalogIndex {
    /// Create an empty index. The first `ensure_fresh` performs the fetch.
    pub fn new(caller: RemoteCaller, ttl: Duration) -> Self {
        Self {
            caller,
            ttl,
            refresh_gate: Mutex::new(()),
            attempts: AtomicU64::new(0),
            current: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        match self.current.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    pub fn status(&self) -> CatalogStatus {
        let snapshot = self.snapshot();
        CatalogStatus {
            records: snapshot.len(),
            age: snapshot.refreshed_at().map(|at| at.elapsed()),
            ttl: self.ttl,
        }
    }

    /// Refresh the snapshot if it is empty or older than the TTL.
    ///
    /// Never fails: a refresh error leaves the previous snapshot in place.
    /// Callers that waited on an in-flight attempt return once it finishes.
    pub async fn ensure_fresh(&self) {
        let seen = self.attempts.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;

        if self.attempts.load(Ordering::Acquire) != seen {
            debug!("refresh attempted while waiting, sharing its outcome");
            return;
        }
        if !self.status().is_stale() {
            return;
        }

        let outcome = self.fetch().await;
        self.attempts.fetch_add(1, Ordering::Release);

        match outcome {
            Ok(snapshot) => {
                let count = snapshot.len();
                self.publish(snapshot.stamped(Instant::now()));
                metrics::counter!(telemetry::CATALOG_REFRESHES_TOTAL, "status" => "ok")
                    .increment(1);
                metrics::gauge!(telemetry::CATALOG_SIZE).set(count as f64);
                info!(count, "catalog refreshed");
            }
            Err(e) => {
                metrics::counter!(telemetry::CATALOG_REFRESHES_TOTAL, "status" => "error")
                    .increment(1);
                warn!(
                    error = %e,
                    previous = self.snapshot().len(),
                    "catalog refresh failed, keeping previous snapshot"
                );
            }
        }
    }

    async fn fetch(&self) -> Result<Snapshot> {
        debug!(operation = PROBLEMSET_LIST.name, "fetching catalog");
        let document = self
            .caller
            .execute(&PROBLEMSET_LIST, Value::Object(Map::new()))
            .await?;

        let list: QuestionList = document.field("problemsetQuestionList")?.ok_or_else(|| {
            MimirError::NotFound(format!(
                "listing response has no question list ({} upstream errors)",
                document.errors.len()
            ))
        })?;

        Ok(Snapshot::from_records(
            list.questions.into_iter().map(SummaryRecord::from),
        ))
    }

    pub fn lookup_by_slug(&self, slug: &str) -> Option<SummaryRecord> {
        self.snapshot().by_slug(slug).cloned()
    }

    pub fn lookup_by_display_id(&self, display_id: &str) -> Option<SummaryRecord> {
        self.snapshot().by_display_id(display_id).cloned()
    }

    /// Every record of the current snapshot, in upstream order.
    pub fn all(&self) -> Vec<SummaryRecord> {
        self.snapshot().iter().cloned().collect()
    }
}
