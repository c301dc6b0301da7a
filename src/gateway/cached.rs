//! CachedGateway - catalog index plus detail cache in front of the upstream

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::{CatalogIndex, CatalogStatus, DetailCache};
use crate::types::Operation;
use crate::upstream::queries::{
    self, DAILY_CHALLENGE, PROBLEMS_BY_TOPIC, QUESTION_DETAIL, RECENT_SUBMISSIONS,
    SOLUTION_ARTICLES, SOLUTION_CONTENT, USER_CONTESTS, USER_PROFILE,
};
use crate::upstream::wire::{QuestionDetailEntry, into_detail_record};
use crate::upstream::{ArticleQuery, RemoteCaller, SolutionId};
use crate::{DetailRecord, MimirError, ProblemGateway, Result, SummaryRecord};

/// Default number of submissions returned by `recent_submissions`.
pub const DEFAULT_SUBMISSION_LIMIT: u32 = 20;

/// Gateway serving catalog lookups from a TTL-refreshed snapshot and problem
/// details from a memoizing cache.
///
/// Build one with [`Mimir::builder()`](crate::Mimir::builder) and share it
/// behind an `Arc`.
pub struct CachedGateway {
    caller: RemoteCaller,
    catalog: CatalogIndex,
    details: DetailCache,
}

impl CachedGateway {
    pub(crate) fn new(caller: RemoteCaller, catalog: CatalogIndex, details: DetailCache) -> Self {
        Self {
            caller,
            catalog,
            details,
        }
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn details(&self) -> &DetailCache {
        &self.details
    }

    /// Snapshot size, age and TTL.
    pub fn status(&self) -> CatalogStatus {
        self.catalog.status()
    }

    /// Load the catalog ahead of the first request.
    ///
    /// Like every refresh this fails open; check [`status()`](Self::status)
    /// to see whether anything was loaded.
    pub async fn warm(&self) {
        self.catalog.ensure_fresh().await;
        info!(records = self.catalog.status().records, "catalog warmed");
    }

    /// Spawn a task that calls `ensure_fresh` every `period`.
    ///
    /// The task stops when the returned [`RefreshTask`] is dropped. A zero
    /// period is rejected.
    pub fn spawn_refresher(self: &Arc<Self>, period: Duration) -> Result<RefreshTask> {
        if period.is_zero() {
            return Err(MimirError::InvalidInput(
                "refresh period must be greater than zero".into(),
            ));
        }

        let gateway = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                gateway.catalog.ensure_fresh().await;
            }
        });
        debug!(period_ms = period.as_millis() as u64, "catalog refresher started");

        Ok(RefreshTask { handle })
    }

    /// Run one uncached operation and pull `data.<field>` out of the result.
    async fn pass_through(
        &self,
        operation: &Operation,
        variables: Value,
        field: &str,
        missing: impl FnOnce() -> String,
    ) -> Result<Value> {
        let document = self.caller.execute(operation, variables).await?;
        document
            .field(field)?
            .ok_or_else(|| MimirError::NotFound(missing()))
    }
}

fn require_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(MimirError::InvalidInput("username must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl ProblemGateway for CachedGateway {
    async fn resolve(&self, id_or_slug: &str) -> Result<SummaryRecord> {
        self.catalog.ensure_fresh().await;
        let snapshot = self.catalog.snapshot();
        snapshot
            .by_display_id(id_or_slug)
            .or_else(|| snapshot.by_slug(id_or_slug))
            .cloned()
            .ok_or_else(|| MimirError::NotFound(format!("problem '{id_or_slug}'")))
    }

    async fn detail(&self, id_or_slug: &str) -> Result<DetailRecord> {
        let summary = self.resolve(id_or_slug).await?;

        if let Some(record) = self.details.get(&summary.id).await {
            return Ok(record);
        }

        let document = self
            .caller
            .execute(&QUESTION_DETAIL, queries::detail_variables(&summary.slug))
            .await?;
        let entry: QuestionDetailEntry = document.field("question")?.ok_or_else(|| {
            MimirError::NotFound(format!("no detail returned for '{}'", summary.slug))
        })?;

        let record = into_detail_record(entry, &summary.slug);
        self.details.put(summary.id.clone(), record.clone()).await;
        debug!(id = %summary.id, slug = %summary.slug, "detail cached");
        Ok(record)
    }

    async fn search(&self, query: &str) -> Result<Vec<SummaryRecord>> {
        self.catalog.ensure_fresh().await;
        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .snapshot()
            .iter()
            .filter(|record| record.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn random(&self) -> Result<SummaryRecord> {
        self.catalog.ensure_fresh().await;
        let snapshot = self.catalog.snapshot();
        if snapshot.is_empty() {
            return Err(MimirError::NotFound("catalog is empty".into()));
        }
        let index = rand::rng().random_range(0..snapshot.len());
        snapshot
            .get_index(index)
            .cloned()
            .ok_or_else(|| MimirError::NotFound("catalog is empty".into()))
    }

    async fn list(&self) -> Result<Vec<SummaryRecord>> {
        self.catalog.ensure_fresh().await;
        Ok(self.catalog.all())
    }

    async fn daily(&self) -> Result<Value> {
        self.pass_through(
            &DAILY_CHALLENGE,
            Value::Object(Default::default()),
            "activeDailyCodingChallengeQuestion",
            || "no daily challenge".into(),
        )
        .await
    }

    async fn user_profile(&self, username: &str) -> Result<Value> {
        require_username(username)?;
        self.pass_through(
            &USER_PROFILE,
            queries::username_variables(username),
            "matchedUser",
            || format!("user '{username}'"),
        )
        .await
    }

    async fn user_contests(&self, username: &str) -> Result<Value> {
        require_username(username)?;
        let document = self
            .caller
            .execute(&USER_CONTESTS, queries::username_variables(username))
            .await?;
        document
            .into_data()
            .ok_or_else(|| MimirError::NotFound(format!("user '{username}'")))
    }

    async fn recent_submissions(&self, username: &str, limit: u32) -> Result<Value> {
        require_username(username)?;
        let document = self
            .caller
            .execute(
                &RECENT_SUBMISSIONS,
                queries::submissions_variables(username, limit),
            )
            .await?;
        if document.has_errors() {
            return Err(MimirError::NotFound(format!("user '{username}'")));
        }
        document
            .field("recentSubmissionList")?
            .ok_or_else(|| MimirError::NotFound(format!("user '{username}'")))
    }

    async fn problems_by_topic(&self, topic: &str) -> Result<Value> {
        let list = self
            .pass_through(
                &PROBLEMS_BY_TOPIC,
                queries::topic_variables(topic),
                "problemsetQuestionList",
                || format!("topic '{topic}'"),
            )
            .await?;
        match list.get("questions") {
            Some(questions) if !questions.is_null() => Ok(questions.clone()),
            _ => Err(MimirError::NotFound(format!("topic '{topic}'"))),
        }
    }

    async fn solution_articles(&self, slug: &str, query: &ArticleQuery) -> Result<Value> {
        self.pass_through(
            &SOLUTION_ARTICLES,
            queries::article_variables(slug, query),
            "ugcArticleSolutionArticles",
            || format!("solution articles for '{slug}'"),
        )
        .await
    }

    async fn solution_content(&self, id: &SolutionId) -> Result<Value> {
        self.pass_through(
            &SOLUTION_CONTENT,
            queries::solution_variables(id),
            "ugcArticleSolutionArticle",
            || format!("solution article {id:?}"),
        )
        .await
    }
}

/// Handle to a background catalog refresher.
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task and wait for it to stop.
    pub async fn shutdown(mut self) {
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
