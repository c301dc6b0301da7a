//! Problem catalog records.
//!
//! [`SummaryRecord`] is one entry of the bulk catalog snapshot;
//! [`DetailRecord`] is the full content of a single problem, fetched on
//! demand. Both serialize with snake_case field names; the upstream
//! camelCase shapes live in [`crate::upstream::wire`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base URL for problem pages.
pub const PROBLEM_URL_BASE: &str = "https://leetcode.com/problems";

/// Canonical page URL for a problem slug.
pub fn problem_url(slug: &str) -> String {
    format!("{PROBLEM_URL_BASE}/{slug}/")
}

/// Difficulty tier of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// A tier the upstream reported that this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    /// Returns the upstream string form of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry.
///
/// `id` is the primary key. `frontend_id` (the number shown to users) and
/// `slug` are 1:1 with it within a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Internal question identifier.
    pub id: String,
    /// Human-facing display identifier (e.g. "1" for Two Sum).
    pub frontend_id: String,
    pub title: String,
    /// URL-safe unique slug (e.g. "two-sum").
    pub slug: String,
    pub difficulty: Difficulty,
    pub paid_only: bool,
    pub has_solution: bool,
    pub has_video_solution: bool,
}

impl SummaryRecord {
    /// Canonical page URL for this problem.
    pub fn url(&self) -> String {
        problem_url(&self.slug)
    }
}

/// A named tag (topic or company).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Official solution indicator attached to a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionInfo {
    pub can_see_detail: bool,
    pub content: Option<String>,
}

/// Full content of a single problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: String,
    pub frontend_id: String,
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub paid_only: bool,
    pub has_solution: bool,
    pub has_video_solution: bool,
    /// HTML problem statement. `None` for paid-only problems.
    pub content: Option<String>,
    pub likes: u64,
    pub dislikes: u64,
    /// JSON-encoded acceptance statistics, as delivered upstream.
    pub stats: Option<String>,
    /// JSON-encoded list of similar questions, as delivered upstream.
    pub similar_questions: Option<String>,
    pub category_title: Option<String>,
    pub hints: Vec<String>,
    pub topic_tags: Vec<Tag>,
    pub company_tags: Vec<Tag>,
    pub solution: Option<SolutionInfo>,
    pub url: String,
}

impl DetailRecord {
    /// The summary portion of this record.
    pub fn summary(&self) -> SummaryRecord {
        SummaryRecord {
            id: self.id.clone(),
            frontend_id: self.frontend_id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            difficulty: self.difficulty,
            paid_only: self.paid_only,
            has_solution: self.has_solution,
            has_video_solution: self.has_video_solution,
        }
    }
}
