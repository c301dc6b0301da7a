//! Integration tests for [`CatalogIndex`]: freshness, refresh exclusivity,
//! fail-open refresh, and index consistency.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use mimir::cache::CatalogIndex;
use mimir::upstream::{QueryTransport, RemoteCaller, RetryConfig};
use mimir::{Document, MimirError, Operation, Result};
use serde_json::{Value, json};

// ============================================================================
// Mock transport
// ============================================================================

/// Serves the bulk listing from an editable question list.
struct ListingTransport {
    calls: AtomicU32,
    failing: AtomicBool,
    latency: Duration,
    questions: Mutex<Value>,
}

impl ListingTransport {
    fn new(questions: Value) -> Self {
        Self {
            calls: AtomicU32::new(0),
            failing: AtomicBool::new(false),
            latency: Duration::ZERO,
            questions: Mutex::new(questions),
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn set_questions(&self, questions: Value) {
        *self.questions.lock().unwrap() = questions;
    }
}

#[async_trait]
impl QueryTransport for ListingTransport {
    fn name(&self) -> &str {
        "mock-listing"
    }

    async fn execute(&self, operation: &Operation, _variables: &Value) -> Result<Document> {
        assert_eq!(operation.name, "problemsetQuestionList");
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(MimirError::Http("connection refused".into()));
        }
        let questions = self.questions.lock().unwrap().clone();
        Ok(Document {
            data: Some(json!({ "problemsetQuestionList": { "questions": questions } })),
            errors: vec![],
        })
    }
}

fn question(id: &str, frontend_id: &str, slug: &str, title: &str) -> Value {
    json!({
        "questionId": id,
        "questionFrontendId": frontend_id,
        "title": title,
        "titleSlug": slug,
        "difficulty": "Easy",
        "paidOnly": false,
        "hasSolution": true,
        "hasVideoSolution": false,
    })
}

fn starter_set() -> Value {
    json!([
        question("1", "1", "two-sum", "Two Sum"),
        question("2", "2", "add-two-numbers", "Add Two Numbers"),
        question("3", "3", "longest-substring", "Longest Substring"),
    ])
}

fn index(transport: &Arc<ListingTransport>, ttl: Duration) -> CatalogIndex {
    let caller = RemoteCaller::new(
        transport.clone(),
        RetryConfig::new().delay(Duration::ZERO),
    );
    CatalogIndex::new(caller, ttl)
}

// ============================================================================
// Freshness
// ============================================================================

#[tokio::test(start_paused = true)]
async fn refreshes_only_when_older_than_ttl() {
    let transport = Arc::new(ListingTransport::new(starter_set()));
    let catalog = index(&transport, Duration::from_secs(60));

    catalog.ensure_fresh().await;
    assert_eq!(transport.call_count(), 1);
    assert_eq!(catalog.status().records, 3);

    tokio::time::advance(Duration::from_secs(30)).await;
    catalog.ensure_fresh().await;
    assert_eq!(transport.call_count(), 1, "fresh snapshot must not refetch");

    // Exactly at the TTL the snapshot is still fresh.
    tokio::time::advance(Duration::from_secs(30)).await;
    catalog.ensure_fresh().await;
    assert_eq!(transport.call_count(), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    catalog.ensure_fresh().await;
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn zero_ttl_refreshes_every_time() {
    let transport = Arc::new(ListingTransport::new(starter_set()));
    let catalog = index(&transport, Duration::ZERO);

    catalog.ensure_fresh().await;
    catalog.ensure_fresh().await;
    catalog.ensure_fresh().await;

    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn empty_listing_is_refetched() {
    let transport = Arc::new(ListingTransport::new(json!([])));
    let catalog = index(&transport, Duration::from_secs(3600));

    catalog.ensure_fresh().await;
    catalog.ensure_fresh().await;

    assert_eq!(transport.call_count(), 2);
    assert!(catalog.status().is_stale());
}

#[tokio::test(start_paused = true)]
async fn status_reports_age_and_ttl() {
    let transport = Arc::new(ListingTransport::new(starter_set()));
    let catalog = index(&transport, Duration::from_secs(60));

    let before = catalog.status();
    assert_eq!(before.records, 0);
    assert_eq!(before.age, None);
    assert!(before.is_stale());

    catalog.ensure_fresh().await;
    tokio::time::advance(Duration::from_secs(10)).await;

    let after = catalog.status();
    assert_eq!(after.records, 3);
    assert_eq!(after.age, Some(Duration::from_secs(10)));
    assert_eq!(after.ttl, Duration::from_secs(60));
    assert!(!after.is_stale());
}

// ============================================================================
// Exclusivity
// ============================================================================

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_refresh() {
    let transport = Arc::new(
        ListingTransport::new(starter_set()).with_latency(Duration::from_millis(500)),
    );
    let catalog = index(&transport, Duration::from_secs(3600));

    join_all((0..10).map(|_| catalog.ensure_fresh())).await;

    assert_eq!(transport.call_count(), 1);
    assert_eq!(catalog.status().records, 3);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_on_expired_snapshot_share_one_refresh() {
    let transport = Arc::new(
        ListingTransport::new(starter_set()).with_latency(Duration::from_millis(500)),
    );
    let catalog = index(&transport, Duration::from_secs(60));

    catalog.ensure_fresh().await;
    tokio::time::advance(Duration::from_secs(61)).await;

    join_all((0..10).map(|_| catalog.ensure_fresh())).await;

    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_failed_refresh() {
    let transport = Arc::new(
        ListingTransport::new(starter_set()).with_latency(Duration::from_millis(500)),
    );
    let catalog = index(&transport, Duration::from_secs(60));

    catalog.ensure_fresh().await;
    let before = catalog.snapshot();
    tokio::time::advance(Duration::from_secs(61)).await;
    transport.set_failing(true);

    join_all((0..10).map(|_| catalog.ensure_fresh())).await;

    // One initial load plus a single three-attempt refresh for all ten callers.
    assert_eq!(transport.call_count(), 4);
    assert!(Arc::ptr_eq(&before, &catalog.snapshot()));
    assert!(catalog.status().is_stale());

    // A caller arriving after the failed attempt tries again.
    transport.set_failing(false);
    catalog.ensure_fresh().await;
    assert_eq!(transport.call_count(), 5);
    assert!(!catalog.status().is_stale());
}

// ============================================================================
// Fail-open
// ============================================================================

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_previous_snapshot() {
    let transport = Arc::new(ListingTransport::new(starter_set()));
    let catalog = index(&transport, Duration::from_secs(60));

    catalog.ensure_fresh().await;
    let before = catalog.snapshot();

    tokio::time::advance(Duration::from_secs(120)).await;
    transport.set_failing(true);
    catalog.ensure_fresh().await;

    // Default policy: three attempts, all failed.
    assert_eq!(transport.call_count(), 4);
    let after = catalog.snapshot();
    assert!(Arc::ptr_eq(&before, &after), "snapshot must be untouched");
    assert_eq!(catalog.lookup_by_slug("two-sum").unwrap().frontend_id, "1");

    // Still stale, so the next call tries again.
    assert!(catalog.status().is_stale());
    transport.set_failing(false);
    catalog.ensure_fresh().await;
    assert_eq!(transport.call_count(), 5);
    assert!(!catalog.status().is_stale());
}

#[tokio::test(start_paused = true)]
async fn failed_first_refresh_leaves_index_empty() {
    let transport = Arc::new(ListingTransport::new(starter_set()));
    transport.set_failing(true);
    let catalog = index(&transport, Duration::from_secs(60));

    catalog.ensure_fresh().await;

    assert_eq!(catalog.status().records, 0);
    assert!(catalog.lookup_by_slug("two-sum").is_none());
    assert!(catalog.all().is_empty());
}

/// A listing document without a question list counts as a failed refresh.
struct ErrorsOnlyTransport;

#[async_trait]
impl QueryTransport for ErrorsOnlyTransport {
    fn name(&self) -> &str {
        "errors-only"
    }

    async fn execute(&self, _operation: &Operation, _variables: &Value) -> Result<Document> {
        Ok(Document {
            data: None,
            errors: vec![json!({ "message": "rate limited" })],
        })
    }
}

#[tokio::test]
async fn listing_without_question_list_is_ignored() {
    let caller = RemoteCaller::new(Arc::new(ErrorsOnlyTransport), RetryConfig::default());
    let catalog = CatalogIndex::new(caller, Duration::from_secs(60));

    catalog.ensure_fresh().await;

    let status = catalog.status();
    assert_eq!(status.records, 0);
    assert_eq!(status.age, None);
}

// ============================================================================
// Index consistency
// ============================================================================

#[tokio::test(start_paused = true)]
async fn every_record_is_reachable_by_slug_and_display_id() {
    let transport = Arc::new(ListingTransport::new(json!([
        question("1", "1", "two-sum", "Two Sum"),
        question("1000021", "LCP 01", "guess-numbers", "Guess Numbers"),
        question("2", "2", "add-two-numbers", "Add Two Numbers"),
    ])));
    let catalog = index(&transport, Duration::from_secs(60));
    catalog.ensure_fresh().await;

    let all = catalog.all();
    assert_eq!(
        all.iter().map(|r| r.slug.as_str()).collect::<Vec<_>>(),
        ["two-sum", "guess-numbers", "add-two-numbers"],
        "upstream order is preserved"
    );
    for record in &all {
        assert_eq!(catalog.lookup_by_slug(&record.slug).as_ref(), Some(record));
        assert_eq!(
            catalog.lookup_by_display_id(&record.frontend_id).as_ref(),
            Some(record)
        );
    }
}

#[tokio::test(start_paused = true)]
async fn refresh_replaces_the_whole_snapshot() {
    let transport = Arc::new(ListingTransport::new(starter_set()));
    let catalog = index(&transport, Duration::from_secs(60));
    catalog.ensure_fresh().await;
    let old = catalog.snapshot();

    transport.set_questions(json!([
        question("1", "1", "two-sum-renamed", "Two Sum"),
        question("4", "4", "median-of-two-sorted-arrays", "Median of Two Sorted Arrays"),
    ]));
    tokio::time::advance(Duration::from_secs(61)).await;
    catalog.ensure_fresh().await;

    assert_eq!(catalog.status().records, 2);
    assert!(catalog.lookup_by_slug("two-sum").is_none());
    assert!(catalog.lookup_by_slug("add-two-numbers").is_none());
    assert_eq!(catalog.lookup_by_display_id("1").unwrap().slug, "two-sum-renamed");

    // Readers holding the previous snapshot still see it whole.
    assert_eq!(old.len(), 3);
    assert!(old.by_slug("two-sum").is_some());
}
