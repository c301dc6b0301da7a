//! Upstream response shapes and conversion.
//!
//! Mirrors the camelCase JSON returned by the GraphQL API and converts it
//! into [`SummaryRecord`] / [`DetailRecord`]. Most fields are optional on the
//! wire; missing flags default to `false` and missing tiers to
//! [`Difficulty::Unknown`].

use serde::Deserialize;

use crate::types::{DetailRecord, Difficulty, SolutionInfo, SummaryRecord, Tag, problem_url};

/// `data.problemsetQuestionList` of the bulk listing.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionList {
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

/// A single entry of the bulk listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionEntry {
    pub question_id: String,
    pub question_frontend_id: String,
    pub title: String,
    pub title_slug: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, alias = "isPaidOnly")]
    pub paid_only: Option<bool>,
    #[serde(default)]
    pub has_solution: Option<bool>,
    #[serde(default)]
    pub has_video_solution: Option<bool>,
}

impl From<QuestionEntry> for SummaryRecord {
    fn from(entry: QuestionEntry) -> Self {
        SummaryRecord {
            id: entry.question_id,
            frontend_id: entry.question_frontend_id,
            title: entry.title,
            slug: entry.title_slug,
            difficulty: entry.difficulty.unwrap_or(Difficulty::Unknown),
            paid_only: entry.paid_only.unwrap_or(false),
            has_solution: entry.has_solution.unwrap_or(false),
            has_video_solution: entry.has_video_solution.unwrap_or(false),
        }
    }
}

/// `data.question` of the detail query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionDetailEntry {
    pub question_id: String,
    pub question_frontend_id: String,
    pub title: String,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub dislikes: Option<u64>,
    #[serde(default)]
    pub stats: Option<String>,
    #[serde(default)]
    pub similar_questions: Option<String>,
    #[serde(default)]
    pub category_title: Option<String>,
    #[serde(default)]
    pub hints: Option<Vec<String>>,
    #[serde(default)]
    pub topic_tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub company_tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, alias = "paidOnly")]
    pub is_paid_only: Option<bool>,
    #[serde(default)]
    pub solution: Option<SolutionEntry>,
    #[serde(default)]
    pub has_solution: Option<bool>,
    #[serde(default)]
    pub has_video_solution: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SolutionEntry {
    #[serde(default)]
    pub can_see_detail: Option<bool>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Convert a detail entry, falling back to `requested_slug` when the
/// upstream omits `titleSlug`.
pub(crate) fn into_detail_record(entry: QuestionDetailEntry, requested_slug: &str) -> DetailRecord {
    let slug = entry
        .title_slug
        .unwrap_or_else(|| requested_slug.to_string());
    let url = problem_url(&slug);

    DetailRecord {
        id: entry.question_id,
        frontend_id: entry.question_frontend_id,
        title: entry.title,
        slug,
        difficulty: entry.difficulty.unwrap_or(Difficulty::Unknown),
        paid_only: entry.is_paid_only.unwrap_or(false),
        has_solution: entry.has_solution.unwrap_or(false),
        has_video_solution: entry.has_video_solution.unwrap_or(false),
        content: entry.content,
        likes: entry.likes.unwrap_or(0),
        dislikes: entry.dislikes.unwrap_or(0),
        stats: entry.stats,
        similar_questions: entry.similar_questions,
        category_title: entry.category_title,
        hints: entry.hints.unwrap_or_default(),
        topic_tags: entry.topic_tags.unwrap_or_default(),
        company_tags: entry.company_tags.unwrap_or_default(),
        solution: entry.solution.map(|s| SolutionInfo {
            can_see_detail: s.can_see_detail.unwrap_or(false),
            content: s.content,
        }),
        url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_listing_entry() {
        let entry: QuestionEntry = serde_json::from_value(json!({
            "questionId": "1",
            "questionFrontendId": "1",
            "title": "Two Sum",
            "titleSlug": "two-sum",
            "difficulty": "Easy",
            "paidOnly": false,
            "hasSolution": true,
            "hasVideoSolution": true
        }))
        .unwrap();
        let record = SummaryRecord::from(entry);

        assert_eq!(record.id, "1");
        assert_eq!(record.slug, "two-sum");
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert!(record.has_solution);
        assert!(!record.paid_only);
    }

    #[test]
    fn listing_entry_tolerates_nulls_and_alias() {
        let entry: QuestionEntry = serde_json::from_value(json!({
            "questionId": "156",
            "questionFrontendId": "156",
            "title": "Binary Tree Upside Down",
            "titleSlug": "binary-tree-upside-down",
            "isPaidOnly": true,
            "hasSolution": null
        }))
        .unwrap();
        let record = SummaryRecord::from(entry);

        assert!(record.paid_only);
        assert!(!record.has_solution);
        assert!(!record.has_video_solution);
        assert_eq!(record.difficulty, Difficulty::Unknown);
    }

    #[test]
    fn converts_detail_entry() {
        let entry: QuestionDetailEntry = serde_json::from_value(json!({
            "questionId": "1",
            "questionFrontendId": "1",
            "title": "Two Sum",
            "content": "<p>Given an array...</p>",
            "likes": 50000,
            "dislikes": 1700,
            "stats": "{\"totalAcceptedRaw\": 10}",
            "similarQuestions": "[]",
            "categoryTitle": "Algorithms",
            "hints": ["Use a hash map."],
            "topicTags": [{"name": "Array"}, {"name": "Hash Table"}],
            "companyTags": null,
            "difficulty": "Easy",
            "isPaidOnly": false,
            "solution": {"canSeeDetail": true, "content": "..."},
            "hasSolution": true,
            "hasVideoSolution": false
        }))
        .unwrap();
        let record = into_detail_record(entry, "two-sum");

        assert_eq!(record.slug, "two-sum");
        assert_eq!(record.url, "https://leetcode.com/problems/two-sum/");
        assert_eq!(record.likes, 50000);
        assert_eq!(record.topic_tags.len(), 2);
        assert!(record.company_tags.is_empty());
        assert_eq!(record.hints, vec!["Use a hash map.".to_string()]);
        assert!(record.solution.as_ref().unwrap().can_see_detail);
        assert_eq!(record.summary().frontend_id, "1");
    }

    #[test]
    fn detail_prefers_upstream_slug() {
        let entry: QuestionDetailEntry = serde_json::from_value(json!({
            "questionId": "2",
            "questionFrontendId": "2",
            "title": "Add Two Numbers",
            "titleSlug": "add-two-numbers"
        }))
        .unwrap();
        let record = into_detail_record(entry, "ignored");
        assert_eq!(record.slug, "add-two-numbers");
        assert_eq!(record.likes, 0);
        assert!(record.solution.is_none());
    }
}
