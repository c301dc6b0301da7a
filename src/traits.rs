//! Core ProblemGateway trait

use async_trait::async_trait;
use serde_json::Value;

use crate::upstream::{ArticleQuery, SolutionId};
use crate::{DetailRecord, MimirError, Result, SummaryRecord};

/// Lookup and fetch operations over the problem catalog.
///
/// This is the surface an endpoint layer (HTTP handlers, a CLI) consumes.
/// Implementations decide how much is served from cache; callers only see
/// values or typed errors ([`MimirError::NotFound`],
/// [`MimirError::UpstreamExhausted`], ...).
#[async_trait]
pub trait ProblemGateway: Send + Sync {
    // ===== Catalog (must implement) =====

    /// Resolve a display id (e.g. "1") or slug (e.g. "two-sum").
    async fn resolve(&self, id_or_slug: &str) -> Result<SummaryRecord>;

    /// Full record for a display id or slug.
    async fn detail(&self, id_or_slug: &str) -> Result<DetailRecord>;

    /// Case-insensitive title substring search, in catalog order.
    async fn search(&self, query: &str) -> Result<Vec<SummaryRecord>>;

    /// A uniformly random catalog entry.
    async fn random(&self) -> Result<SummaryRecord>;

    /// The whole catalog, in catalog order.
    async fn list(&self) -> Result<Vec<SummaryRecord>>;

    // ===== Pass-through queries: default stubs =====

    /// Today's daily challenge.
    async fn daily(&self) -> Result<Value> {
        Err(MimirError::NotImplemented("daily"))
    }

    /// Public profile of a user.
    async fn user_profile(&self, _username: &str) -> Result<Value> {
        Err(MimirError::NotImplemented("user_profile"))
    }

    /// Contest ranking and history of a user.
    async fn user_contests(&self, _username: &str) -> Result<Value> {
        Err(MimirError::NotImplemented("user_contests"))
    }

    /// Most recent submissions of a user.
    async fn recent_submissions(&self, _username: &str, _limit: u32) -> Result<Value> {
        Err(MimirError::NotImplemented("recent_submissions"))
    }

    /// Problems tagged with `topic` (a tag slug such as "dynamic-programming"),
    /// as a bare array of question objects.
    async fn problems_by_topic(&self, _topic: &str) -> Result<Value> {
        Err(MimirError::NotImplemented("problems_by_topic"))
    }

    /// Community solution articles for a problem slug.
    async fn solution_articles(&self, _slug: &str, _query: &ArticleQuery) -> Result<Value> {
        Err(MimirError::NotImplemented("solution_articles"))
    }

    /// Solution articles matching `text`.
    async fn search_solution_articles(
        &self,
        slug: &str,
        text: &str,
        query: &ArticleQuery,
    ) -> Result<Value> {
        let query = query.clone().search(text).clear_tags();
        self.solution_articles(slug, &query).await
    }

    /// Full content of one solution article.
    async fn solution_content(&self, _id: &SolutionId) -> Result<Value> {
        Err(MimirError::NotImplemented("solution_content"))
    }
}
