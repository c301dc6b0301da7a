//! GraphQL operations issued against the upstream.
//!
//! Each constant is a complete, fixed operation; callers only supply
//! variables. The variable builders below keep variable names next to the
//! documents that declare them.

use serde_json::{Value, json};

use crate::types::Operation;

/// Bulk catalog listing. Takes no variables; the page size of 10000 covers
/// the whole problem set in one request.
pub const PROBLEMSET_LIST: Operation = Operation {
    name: "problemsetQuestionList",
    document: r#"query problemsetQuestionList {
  problemsetQuestionList: questionList(
    categorySlug: ""
    limit: 10000
    skip: 0
    filters: {}
  ) {
    questions: data {
      questionId
      questionFrontendId
      title
      titleSlug
      difficulty
      paidOnly: isPaidOnly
      hasSolution
      hasVideoSolution
    }
  }
}"#,
};

/// Full content of one problem. Variables: `titleSlug`.
pub const QUESTION_DETAIL: Operation = Operation {
    name: "questionData",
    document: r#"query questionData($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    questionFrontendId
    title
    titleSlug
    content
    likes
    dislikes
    stats
    similarQuestions
    categoryTitle
    hints
    topicTags { name }
    companyTags { name }
    difficulty
    isPaidOnly
    solution { canSeeDetail content }
    hasSolution
    hasVideoSolution
  }
}"#,
};

/// Today's daily challenge. Takes no variables.
pub const DAILY_CHALLENGE: Operation = Operation {
    name: "questionOfToday",
    document: r#"query questionOfToday {
  activeDailyCodingChallengeQuestion {
    date
    link
    question {
      questionId
      questionFrontendId
      title
      titleSlug
      difficulty
      content
    }
  }
}"#,
};

/// Public profile of a user. Variables: `username`.
pub const USER_PROFILE: Operation = Operation {
    name: "userPublicProfile",
    document: r#"query userPublicProfile($username: String!) {
  matchedUser(username: $username) {
    username
    profile {
      realName
      websites
      countryName
      company
      school
      aboutMe
      reputation
      ranking
    }
    submitStats {
      acSubmissionNum { difficulty count submissions }
      totalSubmissionNum { difficulty count submissions }
    }
  }
}"#,
};

/// Contest ranking and history of a user. Variables: `username`.
pub const USER_CONTESTS: Operation = Operation {
    name: "userContestRankingInfo",
    document: r#"query userContestRankingInfo($username: String!) {
  userContestRanking(username: $username) {
    attendedContestsCount
    rating
    globalRanking
    totalParticipants
    topPercentage
  }
  userContestRankingHistory(username: $username) {
    attended
    trendDirection
    problemsSolved
    totalProblems
    finishTimeInSeconds
    rating
    ranking
  }
}"#,
};

/// Recent accepted and rejected submissions. Variables: `username`, `limit`.
pub const RECENT_SUBMISSIONS: Operation = Operation {
    name: "recentSubmissions",
    document: r#"query recentSubmissions($username: String!, $limit: Int) {
  recentSubmissionList(username: $username, limit: $limit) {
    title
    titleSlug
    timestamp
    statusDisplay
    lang
    url
  }
}"#,
};

/// Problems carrying a topic tag. Variables: `categorySlug`, `filters`.
pub const PROBLEMS_BY_TOPIC: Operation = Operation {
    name: "problemsetQuestionList",
    document: r#"query problemsetQuestionList($categorySlug: String, $filters: QuestionListFilterInput) {
  problemsetQuestionList: questionList(
    categorySlug: $categorySlug
    filters: $filters
  ) {
    questions: data {
      questionId
      title
      titleSlug
      difficulty
      topicTags { name }
    }
  }
}"#,
};

/// Community solution articles for a problem.
///
/// Variables: `questionSlug`, `orderBy`, `userInput`, `tagSlugs`, `skip`,
/// `first`, `before`, `after`, `last`, `isMine`.
pub const SOLUTION_ARTICLES: Operation = Operation {
    name: "ugcArticleSolutionArticles",
    document: r#"query ugcArticleSolutionArticles($questionSlug: String!, $orderBy: ArticleOrderByEnum, $userInput: String, $tagSlugs: [String!], $skip: Int, $before: String, $after: String, $first: Int, $last: Int, $isMine: Boolean) {
  ugcArticleSolutionArticles(
    questionSlug: $questionSlug
    orderBy: $orderBy
    userInput: $userInput
    tagSlugs: $tagSlugs
    skip: $skip
    first: $first
    before: $before
    after: $after
    last: $last
    isMine: $isMine
  ) {
    totalNum
    pageInfo { hasNextPage }
    edges { node { ...ugcSolutionArticleFragment } }
  }
}
fragment ugcSolutionArticleFragment on SolutionArticleNode {
  uuid
  title
  slug
  summary
  author {
    realName
    userAvatar
    userSlug
    userName
    nameColor
    certificationLevel
    activeBadge { icon displayName }
  }
  articleType
  thumbnail
  createdAt
  updatedAt
  status
  isLeetcode
  canSee
  canEdit
  isMyFavorite
  chargeType
  myReactionType
  topicId
  hitCount
  hasVideoArticle
  reactions { count reactionType }
  tags { name slug tagType }
  topic { id topLevelCommentCount }
}"#,
};

/// Full content of one solution article. Variables: `articleId`, `topicId`.
pub const SOLUTION_CONTENT: Operation = Operation {
    name: "ugcArticleSolutionArticle",
    document: r#"query ugcArticleSolutionArticle($articleId: ID, $topicId: ID) {
  ugcArticleSolutionArticle(articleId: $articleId, topicId: $topicId) {
    ...ugcSolutionArticleFragment
    content
    isSerialized
    isAuthorArticleReviewer
    scoreInfo { scoreCoefficient }
    prev { uuid slug topicId title }
    next { uuid slug topicId title }
  }
}
fragment ugcSolutionArticleFragment on SolutionArticleNode {
  uuid
  title
  slug
  summary
  author {
    realName
    userAvatar
    userSlug
    userName
    nameColor
    certificationLevel
    activeBadge { icon displayName }
  }
  articleType
  thumbnail
  createdAt
  updatedAt
  status
  isLeetcode
  canSee
  canEdit
  isMyFavorite
  chargeType
  myReactionType
  topicId
  hitCount
  hasVideoArticle
  reactions { count reactionType }
  tags { name slug tagType }
  topic { id topLevelCommentCount }
}"#,
};

/// Sort order for solution article listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleOrder {
    #[default]
    Hot,
    Newest,
    Oldest,
    MostVotes,
}

impl ArticleOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleOrder::Hot => "HOT",
            ArticleOrder::Newest => "NEWEST",
            ArticleOrder::Oldest => "OLDEST",
            ArticleOrder::MostVotes => "MOST_VOTES",
        }
    }
}

impl std::str::FromStr for ArticleOrder {
    type Err = crate::MimirError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HOT" => Ok(ArticleOrder::Hot),
            "NEWEST" => Ok(ArticleOrder::Newest),
            "OLDEST" => Ok(ArticleOrder::Oldest),
            "MOST_VOTES" => Ok(ArticleOrder::MostVotes),
            other => Err(crate::MimirError::InvalidInput(format!(
                "unknown article order '{other}'"
            ))),
        }
    }
}

/// Paging and filtering for [`SOLUTION_ARTICLES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub order_by: ArticleOrder,
    pub skip: u32,
    pub first: u32,
    /// Free-text filter over article titles and bodies.
    pub user_input: String,
    pub tag_slugs: Vec<String>,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            order_by: ArticleOrder::Hot,
            skip: 0,
            first: 15,
            user_input: String::new(),
            tag_slugs: Vec::new(),
        }
    }
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, order: ArticleOrder) -> Self {
        self.order_by = order;
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn first(mut self, first: u32) -> Self {
        self.first = first;
        self
    }

    /// Restrict to articles matching `text`.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.user_input = text.into();
        self
    }

    pub fn tag(mut self, slug: impl Into<String>) -> Self {
        self.tag_slugs.push(slug.into());
        self
    }

    pub fn clear_tags(mut self) -> Self {
        self.tag_slugs.clear();
        self
    }
}

/// How a solution article is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionId {
    Topic(String),
    Article(String),
}

pub(crate) fn detail_variables(slug: &str) -> Value {
    json!({ "titleSlug": slug })
}

pub(crate) fn username_variables(username: &str) -> Value {
    json!({ "username": username })
}

pub(crate) fn submissions_variables(username: &str, limit: u32) -> Value {
    json!({ "username": username, "limit": limit })
}

pub(crate) fn topic_variables(topic: &str) -> Value {
    json!({ "categorySlug": "", "filters": { "tags": [topic] } })
}

pub(crate) fn article_variables(slug: &str, query: &ArticleQuery) -> Value {
    json!({
        "questionSlug": slug,
        "orderBy": query.order_by.as_str(),
        "userInput": query.user_input,
        "tagSlugs": query.tag_slugs,
        "skip": query.skip,
        "first": query.first,
        "before": null,
        "after": null,
        "last": null,
        "isMine": false,
    })
}

pub(crate) fn solution_variables(id: &SolutionId) -> Value {
    match id {
        SolutionId::Topic(topic) => json!({ "topicId": topic, "articleId": null }),
        SolutionId::Article(article) => json!({ "articleId": article, "topicId": null }),
    }
}
