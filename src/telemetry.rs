//! Telemetry metric name constants.
//!
//! Centralised metric names for mimir operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `mimir_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `operation`: upstream operation name (e.g. "problemsetQuestionList")
//! - `status`: outcome: "ok" or "error"

/// Total upstream attempts, including retries.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const UPSTREAM_REQUESTS_TOTAL: &str = "mimir_upstream_requests_total";

/// Total failed attempts that were followed by, or exhausted, the retry loop.
///
/// Labels: `operation`.
pub const UPSTREAM_RETRIES_TOTAL: &str = "mimir_upstream_retries_total";

/// Total catalog refresh attempts.
///
/// Labels: `status` ("ok" | "error").
pub const CATALOG_REFRESHES_TOTAL: &str = "mimir_catalog_refreshes_total";

/// Number of records in the current catalog snapshot.
pub const CATALOG_SIZE: &str = "mimir_catalog_size";

/// Total detail cache hits.
pub const DETAIL_CACHE_HITS_TOTAL: &str = "mimir_detail_cache_hits_total";

/// Total detail cache misses.
pub const DETAIL_CACHE_MISSES_TOTAL: &str = "mimir_detail_cache_misses_total";
